//! Domain record store
//!
//! Owns the seven collections. Local mutations apply immediately; refreshes
//! fetch from the backend and replace a collection wholesale on success.

use crate::backend::{AppointmentFilter, Backend, BackendError, DoctorFilter, Resource, RoomFilter};
use crate::reconcile;
use medisys_records::*;
use medisys_shared::{log_mutation, AuditAction, Clock, IdGenerator, Toast, ValidationFailed};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationFailed),
    #[error("Cannot move {kind} '{id}' from {from} to {to}")]
    InvalidTransition {
        kind: &'static str,
        id: String,
        from: String,
        to: String,
    },
}

pub struct RecordStore {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    bills: Vec<Bill>,
    lab_tests: Vec<LabTest>,
    medical_records: Vec<MedicalRecord>,
    rooms: Vec<Room>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
    toasts: Vec<Toast>,
}

impl RecordStore {
    /// Store holding the static fixtures
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        Self {
            patients: seed::patients(),
            doctors: seed::doctors(),
            appointments: seed::appointments(),
            bills: seed::bills(),
            lab_tests: seed::lab_tests(),
            medical_records: seed::medical_records(),
            rooms: seed::rooms(),
            ids: IdGenerator::new(),
            clock,
            toasts: Vec::new(),
        }
    }

    pub fn empty(clock: Arc<dyn Clock>) -> Self {
        Self {
            patients: Vec::new(),
            doctors: Vec::new(),
            appointments: Vec::new(),
            bills: Vec::new(),
            lab_tests: Vec::new(),
            medical_records: Vec::new(),
            rooms: Vec::new(),
            ids: IdGenerator::new(),
            clock,
            toasts: Vec::new(),
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn lab_tests(&self) -> &[LabTest] {
        &self.lab_tests
    }

    pub fn medical_records(&self) -> &[MedicalRecord] {
        &self.medical_records
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Hand queued toasts to the front end
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let now = self.clock.now_millis();
        self.ids.next(prefix, now)
    }

    // ========================================================================
    // Local mutations
    // ========================================================================

    /// Append an appointment with a fresh `a` id, fields stored as given.
    /// No overlap check; callers validate with `validate_new_appointment`.
    pub fn add_appointment(&mut self, new: NewAppointment) -> String {
        let id = self.next_id("a");
        self.appointments.push(new.into_record(id.clone()));
        log_mutation(AuditAction::AppointmentAdded, &id);
        id
    }

    /// Upcoming → Cancelled. `Ok(false)` for an unknown id.
    pub fn cancel_appointment(&mut self, id: &str) -> Result<bool, StoreError> {
        self.move_appointment(id, AppointmentStatus::Cancelled)
    }

    /// Upcoming → Completed. `Ok(false)` for an unknown id.
    pub fn complete_appointment(&mut self, id: &str) -> Result<bool, StoreError> {
        self.move_appointment(id, AppointmentStatus::Completed)
    }

    fn move_appointment(&mut self, id: &str, next: AppointmentStatus) -> Result<bool, StoreError> {
        let Some(appointment) = self.appointments.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        if appointment.status == next {
            return Ok(false);
        }
        if !appointment.status.can_transition_to(next) {
            return Err(StoreError::InvalidTransition {
                kind: "appointment",
                id: id.to_string(),
                from: appointment.status.to_string(),
                to: next.to_string(),
            });
        }
        appointment.status = next;
        log_mutation(AuditAction::AppointmentStatusChanged, id);
        Ok(true)
    }

    /// Prepend a bill dated today; status defaults to Pending
    pub fn generate_bill(&mut self, new: NewBill) -> Result<String, StoreError> {
        validate_new_bill(&new).into_result()?;
        let id = self.next_id("b");
        let bill = Bill {
            id: id.clone(),
            patient_name: new.patient_name,
            date: self.clock.today(),
            amount: new.amount,
            status: new.status.unwrap_or(BillStatus::Pending),
        };
        self.bills.insert(0, bill);
        log_mutation(AuditAction::BillGenerated, &id);
        self.push_toast(Toast::success("Bill Generated", "A new bill has been added."));
        Ok(id)
    }

    /// Post a local bill to the backend. Failures leave the local bill in
    /// place and queue an error toast.
    pub async fn push_bill(&mut self, id: &str, backend: &dyn Backend) -> bool {
        let Some(bill) = self.bills.iter().find(|b| b.id == id) else {
            return false;
        };
        let body = reconcile::bill_to_wire(bill);
        match backend.create(Resource::Billing, &body).await {
            Ok(_) => {
                info!(bill = id, backend = backend.name(), "bill saved to backend");
                true
            }
            Err(e) => {
                warn!(bill = id, error = %e, "saving bill failed");
                self.push_toast(Toast::error("Failed to save bill", e.user_message()));
                false
            }
        }
    }

    /// Mark a bill Paid. Returns whether anything changed; unknown ids and
    /// already paid bills are left alone.
    pub fn pay_bill(&mut self, id: &str) -> bool {
        let Some(bill) = self.bills.iter_mut().find(|b| b.id == id) else {
            return false;
        };
        if !bill.status.can_transition_to(BillStatus::Paid) {
            return false;
        }
        bill.status = BillStatus::Paid;
        log_mutation(AuditAction::BillPaid, id);
        self.push_toast(Toast::success(
            "Payment Successful",
            format!("Bill {} marked as Paid.", id.to_uppercase()),
        ));
        true
    }

    /// Prepend a Pending lab test dated today
    pub fn request_lab_test(&mut self, new: NewLabTest) -> Result<String, StoreError> {
        validate_new_lab_test(&new).into_result()?;
        let id = self.next_id("lt");
        let test = LabTest {
            id: id.clone(),
            patient_name: new.patient_name,
            test_name: new.test_name,
            date: self.clock.today(),
            status: LabTestStatus::Pending,
            result: None,
        };
        self.lab_tests.insert(0, test);
        log_mutation(AuditAction::LabTestRequested, &id);
        self.push_toast(Toast::success("Test Requested", "A new lab test has been requested."));
        Ok(id)
    }

    /// Pending → Completed with a result. `Ok(false)` for unknown or
    /// already completed tests.
    pub fn complete_lab_test(&mut self, id: &str, result: &str) -> Result<bool, StoreError> {
        let Some(test) = self.lab_tests.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if !test.status.can_transition_to(LabTestStatus::Completed) {
            return Ok(false);
        }
        validate_lab_result(result).into_result()?;
        test.status = LabTestStatus::Completed;
        test.result = Some(result.to_string());
        let description = format!("{} marked as completed.", test.test_name);
        log_mutation(AuditAction::LabTestCompleted, id);
        self.push_toast(Toast::success("Marked Completed", description));
        Ok(true)
    }

    /// Prepend a medical record; the date defaults to today
    pub fn add_medical_record(&mut self, new: NewMedicalRecord) -> Result<String, StoreError> {
        validate_new_medical_record(&new).into_result()?;
        let id = self.next_id("mr");
        let record = MedicalRecord {
            id: id.clone(),
            patient_id: new.patient_id,
            date: new.date.unwrap_or_else(|| self.clock.today()),
            diagnosis: new.diagnosis,
            notes: new.notes,
            doctor_name: new.doctor_name,
            prescription: new.prescription.filter(|p| !p.trim().is_empty()),
        };
        self.medical_records.insert(0, record);
        log_mutation(AuditAction::MedicalRecordAdded, &id);
        self.push_toast(Toast::success("Record Added", "New medical record has been saved."));
        Ok(id)
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    fn refresh_failed(&mut self, collection: &str, error: &BackendError) {
        warn!(collection, error = %error, "backend refresh failed");
        self.push_toast(Toast::error(
            format!("Failed to load {}", collection),
            error.user_message(),
        ));
    }

    fn replaced(collection: &str, count: usize) {
        info!(collection, count, "collection replaced from backend");
        log_mutation(AuditAction::CollectionReplaced, collection);
    }

    /// Replace appointments with the backend's; unchanged on failure.
    /// Returns whether the collection was replaced.
    pub async fn refresh_appointments(&mut self, backend: &dyn Backend) -> bool {
        match backend.list_appointments(&AppointmentFilter::default()).await {
            Ok(rows) => {
                self.appointments = rows
                    .iter()
                    .filter_map(reconcile::appointment_from_wire)
                    .collect();
                Self::replaced("appointments", self.appointments.len());
                true
            }
            Err(e) => {
                self.refresh_failed("appointments", &e);
                false
            }
        }
    }

    /// Replace doctors with the backend's; on failure fall back to the static list
    pub async fn refresh_doctors(&mut self, backend: &dyn Backend) -> bool {
        match backend.list_doctors(&DoctorFilter::default()).await {
            Ok(rows) => {
                self.doctors = rows.iter().map(reconcile::doctor_from_wire).collect();
                Self::replaced("doctors", self.doctors.len());
                true
            }
            Err(e) => {
                self.refresh_failed("doctors", &e);
                self.doctors = seed::doctors();
                false
            }
        }
    }

    pub async fn refresh_patients(&mut self, backend: &dyn Backend) -> bool {
        match backend.list_patients().await {
            Ok(rows) => {
                self.patients = rows.iter().filter_map(reconcile::patient_from_wire).collect();
                Self::replaced("patients", self.patients.len());
                true
            }
            Err(e) => {
                self.refresh_failed("patients", &e);
                false
            }
        }
    }

    pub async fn refresh_rooms(&mut self, backend: &dyn Backend) -> bool {
        match backend.list_rooms(&RoomFilter::default()).await {
            Ok(rows) => {
                self.rooms = rows.iter().map(reconcile::room_from_wire).collect();
                Self::replaced("rooms", self.rooms.len());
                true
            }
            Err(e) => {
                self.refresh_failed("rooms", &e);
                false
            }
        }
    }

    pub async fn refresh_bills(&mut self, backend: &dyn Backend) -> bool {
        match backend.list_bills().await {
            Ok(rows) => {
                self.bills = rows.iter().filter_map(reconcile::bill_from_wire).collect();
                Self::replaced("bills", self.bills.len());
                true
            }
            Err(e) => {
                self.refresh_failed("bills", &e);
                false
            }
        }
    }

    pub async fn refresh_lab_tests(&mut self, backend: &dyn Backend) -> bool {
        match backend.list_lab_tests().await {
            Ok(rows) => {
                self.lab_tests = rows.iter().filter_map(reconcile::lab_test_from_wire).collect();
                Self::replaced("lab tests", self.lab_tests.len());
                true
            }
            Err(e) => {
                self.refresh_failed("lab tests", &e);
                false
            }
        }
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("patients", &self.patients.len())
            .field("doctors", &self.doctors.len())
            .field("appointments", &self.appointments.len())
            .field("bills", &self.bills.len())
            .field("lab_tests", &self.lab_tests.len())
            .field("medical_records", &self.medical_records.len())
            .field("rooms", &self.rooms.len())
            .field("pending_toasts", &self.toasts.len())
            .finish()
    }
}
