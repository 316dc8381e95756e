//! In-memory backend and fixed clock for unit tests

use crate::backend::*;
use crate::wire::*;
use async_trait::async_trait;
use chrono::NaiveDate;
use medisys_shared::{Clock, FixedClock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 2024-07-20, the day of the first seeded appointment
pub fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
        1_721_433_600_000,
    ))
}

#[derive(Default)]
pub struct FakeBackend {
    failure: Option<String>,
    appointments: Mutex<Vec<WireAppointment>>,
    doctors: Mutex<Vec<WireDoctor>>,
    booking_error: Mutex<Option<String>>,
    bookings: Mutex<Vec<BookingRequest>>,
    booking_calls: AtomicUsize,
    created: Mutex<Vec<(Resource, serde_json::Value)>>,
}

impl FakeBackend {
    /// Every call answers with `{ "error": message }`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn set_appointments(&self, rows: Vec<WireAppointment>) {
        *self.appointments.lock().unwrap() = rows;
    }

    pub fn set_doctors(&self, rows: Vec<WireDoctor>) {
        *self.doctors.lock().unwrap() = rows;
    }

    pub fn reject_bookings(&self, message: &str) {
        *self.booking_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn booking_calls(&self) -> usize {
        self.booking_calls.load(Ordering::SeqCst)
    }

    pub fn bookings(&self) -> Vec<BookingRequest> {
        self.bookings.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<(Resource, serde_json::Value)> {
        self.created.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), BackendError> {
        match &self.failure {
            Some(message) => Err(BackendError::Remote(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_appointments(
        &self,
        _filter: &AppointmentFilter,
    ) -> Result<Vec<WireAppointment>, BackendError> {
        self.check()?;
        Ok(self.appointments.lock().unwrap().clone())
    }

    async fn book_appointment(&self, request: &BookingRequest) -> Result<BookingReceipt, BackendError> {
        self.booking_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if let Some(message) = self.booking_error.lock().unwrap().clone() {
            return Err(BackendError::Remote(message));
        }

        let id = 100 + self.bookings.lock().unwrap().len() as i64;
        self.bookings.lock().unwrap().push(request.clone());
        self.appointments.lock().unwrap().push(WireAppointment {
            appointment_id: WireId::Number(id),
            doctor_id: WireId::Number(request.doctor_id),
            patient_id: WireId::Number(request.patient_id),
            appointment_date: request.appointment_date.clone(),
            appointment_time: format!("{}:00", request.appointment_time),
            status: "Scheduled".to_string(),
            admin_id: None,
            notes: request.notes.clone(),
            created_at: None,
            updated_at: None,
            patient_name: "Unknown Patient".to_string(),
            doctor_name: "Unknown Doctor".to_string(),
            specialization_name: "General".to_string(),
        });

        Ok(BookingReceipt {
            success: true,
            message: "Appointment booked successfully".to_string(),
            appointment_id: Some(WireId::Number(id)),
        })
    }

    async fn list_doctors(&self, _filter: &DoctorFilter) -> Result<Vec<WireDoctor>, BackendError> {
        self.check()?;
        Ok(self.doctors.lock().unwrap().clone())
    }

    async fn list_patients(&self) -> Result<Vec<WirePatient>, BackendError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn list_bills(&self) -> Result<Vec<WireBill>, BackendError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn list_lab_tests(&self) -> Result<Vec<WireLabTest>, BackendError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn list_rooms(&self, _filter: &RoomFilter) -> Result<Vec<WireRoom>, BackendError> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn create(
        &self,
        resource: Resource,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, BackendError> {
        self.check()?;
        self.created.lock().unwrap().push((resource, body.clone()));
        Ok(body.clone())
    }

    async fn report(&self, kind: ReportKind) -> Result<serde_json::Value, BackendError> {
        self.check()?;
        Ok(serde_json::json!({ "type": kind.as_query(), "rows": [] }))
    }

    async fn dashboard_stats(&self) -> Result<BackendStats, BackendError> {
        self.check()?;
        Ok(BackendStats::default())
    }

    fn name(&self) -> &str {
        "fake"
    }
}
