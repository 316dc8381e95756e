//! Shared fixtures for the scenario tests
//!
//! `JsonBackend` answers every route with a canned JSON body and decodes it
//! through the same path the HTTP client uses, so the scenarios cover the
//! wire shapes as well as the store.

use async_trait::async_trait;
use chrono::NaiveDate;
use medisys_backend::{decode_object, decode_response};
use medisys_shared::{Clock, FixedClock};
use medisys_store::backend::*;
use medisys_store::wire::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 2024-07-20 00:00 UTC
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 7, 20).unwrap_or_default(),
        1_721_433_600_000,
    ))
}

/// Fresh directory under the system temp dir, removed on drop
pub struct TempDir(PathBuf);

impl TempDir {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("medisys-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        Self(dir)
    }

    pub fn path(&self) -> &PathBuf {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[derive(Default)]
pub struct JsonBackend {
    bodies: Mutex<HashMap<&'static str, String>>,
    bookings: Mutex<Vec<BookingRequest>>,
}

impl JsonBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `route` with `body`
    pub fn respond(self, route: &'static str, body: Value) -> Self {
        self.set(route, body);
        self
    }

    pub fn set(&self, route: &'static str, body: Value) {
        if let Ok(mut bodies) = self.bodies.lock() {
            bodies.insert(route, body.to_string());
        }
    }

    /// Answer `route` with the `{ "error": ... }` payload
    pub fn fail(self, route: &'static str, message: &str) -> Self {
        self.respond(route, json!({ "error": message }))
    }

    pub fn bookings(&self) -> Vec<BookingRequest> {
        self.bookings.lock().map(|b| b.clone()).unwrap_or_default()
    }

    fn body(&self, route: &str) -> String {
        self.bodies
            .lock()
            .ok()
            .and_then(|b| b.get(route).cloned())
            .unwrap_or_else(|| "[]".to_string())
    }

    fn answer<T: serde::de::DeserializeOwned>(&self, route: &str) -> Result<T, BackendError> {
        decode_response(200, &self.body(route))
    }
}

#[async_trait]
impl Backend for JsonBackend {
    async fn list_appointments(
        &self,
        _filter: &AppointmentFilter,
    ) -> Result<Vec<WireAppointment>, BackendError> {
        self.answer("appointments")
    }

    async fn book_appointment(&self, request: &BookingRequest) -> Result<BookingReceipt, BackendError> {
        let receipt: BookingReceipt = self.answer("book")?;

        let mut rows: Vec<Value> = serde_json::from_str(&self.body("appointments")).unwrap_or_default();
        rows.push(json!({
            "Appointment_ID": 500 + rows.len() as i64,
            "Doctor_ID": request.doctor_id,
            "Patient_ID": request.patient_id,
            "Appointment_Date": request.appointment_date,
            "Appointment_Time": format!("{}:00", request.appointment_time),
            "Status": "Scheduled",
            "Patient_Name": "Priya Patel",
            "Doctor_Name": "Dr. Meera Iyer",
            "Specialization_Name": "Cardiology"
        }));
        self.set("appointments", Value::Array(rows));
        if let Ok(mut bookings) = self.bookings.lock() {
            bookings.push(request.clone());
        }
        Ok(receipt)
    }

    async fn list_doctors(&self, _filter: &DoctorFilter) -> Result<Vec<WireDoctor>, BackendError> {
        self.answer("doctors")
    }

    async fn list_patients(&self) -> Result<Vec<WirePatient>, BackendError> {
        self.answer("patients")
    }

    async fn list_bills(&self) -> Result<Vec<WireBill>, BackendError> {
        self.answer("billing")
    }

    async fn list_lab_tests(&self) -> Result<Vec<WireLabTest>, BackendError> {
        self.answer("lab-tests")
    }

    async fn list_rooms(&self, _filter: &RoomFilter) -> Result<Vec<WireRoom>, BackendError> {
        self.answer("rooms")
    }

    async fn create(&self, resource: Resource, body: &Value) -> Result<Value, BackendError> {
        let mut created = body.clone();
        if let Some(obj) = created.as_object_mut() {
            obj.insert("resource".to_string(), json!(resource.path()));
        }
        Ok(created)
    }

    async fn report(&self, kind: ReportKind) -> Result<Value, BackendError> {
        self.answer(kind.as_query())
    }

    async fn dashboard_stats(&self) -> Result<BackendStats, BackendError> {
        decode_object(200, &self.body("dashboard/stats"))
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Two backend doctors: one available cardiologist, one unavailable dermatologist
pub fn backend_doctors() -> Value {
    json!([
        {
            "Doctor_ID": 7,
            "Doctor_Name": "Dr. Meera Iyer",
            "Availability_Status": "Available",
            "Specialization_Name": "Cardiology",
            "Department_Name": "Heart Centre"
        },
        {
            "Doctor_ID": "8",
            "Doctor_Name": "Dr. Kabir Khan",
            "Availability_Status": "On Leave",
            "Specialization_Name": "Dermatology"
        }
    ])
}
