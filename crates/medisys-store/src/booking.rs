//! Appointment booking against the backend
//!
//! A form is validated field by field, converted to the backend payload
//! (24-hour time), and submitted while a `submitting` flag is held. A second
//! submission while the flag is set is refused without touching the network.

use crate::backend::{Backend, BackendError};
use crate::reconcile::wire_time_from_display;
use crate::records::RecordStore;
use crate::wire::{BookingReceipt, BookingRequest};
use chrono::NaiveDate;
use medisys_records::Doctor;
use medisys_shared::validation::validate_required;
use medisys_shared::{
    log_mutation, AuditAction, Toast, ValidationErrorCode, ValidationFailed, ValidationResult,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Slots offered by the booking form
pub const TIME_SLOTS: [&str; 6] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "01:00 PM", "02:00 PM", "03:00 PM",
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingForm {
    pub specialty: String,
    pub doctor_id: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    /// Backend id of the patient being booked
    pub patient_id: String,
    pub admin_id: Option<i64>,
    pub notes: Option<String>,
}

impl BookingForm {
    pub fn validate(&self, doctors: &[Doctor], today: NaiveDate) -> ValidationResult {
        let mut result = validate_required(&self.specialty, "specialty", "Please select a specialty.");

        if self.doctor_id.trim().is_empty() {
            result.add_error("doctor_id", "Please select a doctor.", ValidationErrorCode::Required);
        } else {
            match doctors.iter().find(|d| d.id == self.doctor_id) {
                None => result.add_error(
                    "doctor_id",
                    "Selected doctor does not exist.",
                    ValidationErrorCode::InvalidReference,
                ),
                Some(doctor) if !self.specialty.is_empty() && doctor.specialty != self.specialty => {
                    result.add_error(
                        "doctor_id",
                        "Selected doctor does not practise this specialty.",
                        ValidationErrorCode::InvalidReference,
                    )
                }
                Some(_) if self.doctor_id.parse::<i64>().is_err() => result.add_error(
                    "doctor_id",
                    "Doctor must come from the backend directory.",
                    ValidationErrorCode::InvalidReference,
                ),
                Some(_) => {}
            }
        }

        match self.date {
            None => result.add_error("date", "A date is required.", ValidationErrorCode::Required),
            Some(date) if date < today => result.add_error(
                "date",
                "Date cannot be in the past.",
                ValidationErrorCode::OutOfRange,
            ),
            Some(_) => {}
        }

        if self.time.trim().is_empty() {
            result.add_error("time", "Please select a time.", ValidationErrorCode::Required);
        } else if !TIME_SLOTS.contains(&self.time.trim()) {
            result.add_error(
                "time",
                "Please select one of the offered times.",
                ValidationErrorCode::InvalidFormat,
            );
        }

        if self.patient_id.trim().parse::<i64>().is_err() {
            result.add_error(
                "patient_id",
                "Patient must be a backend record id.",
                ValidationErrorCode::InvalidReference,
            );
        }

        result
    }

    /// Build the backend payload; call after `validate`
    pub fn to_request(&self) -> Result<BookingRequest, ValidationFailed> {
        let mut result = ValidationResult::new();

        let doctor_id = self.doctor_id.trim().parse::<i64>().ok();
        let patient_id = self.patient_id.trim().parse::<i64>().ok();
        let time = wire_time_from_display(&self.time);

        if doctor_id.is_none() {
            result.add_error("doctor_id", "Doctor id must be numeric", ValidationErrorCode::InvalidFormat);
        }
        if patient_id.is_none() {
            result.add_error("patient_id", "Patient id must be numeric", ValidationErrorCode::InvalidFormat);
        }
        if self.date.is_none() {
            result.add_error("date", "A date is required.", ValidationErrorCode::Required);
        }
        if time.is_none() {
            result.add_error("time", "Please select a time.", ValidationErrorCode::InvalidFormat);
        }

        match (doctor_id, patient_id, self.date, time) {
            (Some(doctor_id), Some(patient_id), Some(date), Some(time)) => Ok(BookingRequest {
                doctor_id,
                patient_id,
                appointment_date: date.format("%Y-%m-%d").to_string(),
                appointment_time: time,
                admin_id: self.admin_id,
                notes: self.notes.clone().filter(|n| !n.trim().is_empty()),
            }),
            _ => Err(ValidationFailed(result.errors)),
        }
    }
}

/// Distinct specialties in directory order
pub fn specialties(doctors: &[Doctor]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for doctor in doctors {
        if !seen.contains(&doctor.specialty.as_str()) {
            seen.push(doctor.specialty.as_str());
        }
    }
    seen
}

pub fn doctors_for_specialty<'a>(doctors: &'a [Doctor], specialty: &str) -> Vec<&'a Doctor> {
    doctors.iter().filter(|d| d.specialty == specialty).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationFailed),
    #[error("A booking is already being submitted")]
    AlreadySubmitting,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Holds the `submitting` flag; clears it when dropped
#[derive(Debug)]
pub struct SubmittingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Booking state shared by every booking form
#[derive(Debug, Default)]
pub struct BookingDesk {
    submitting: AtomicBool,
}

impl BookingDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Take the flag, or `None` if a submission is already running
    pub fn begin(&self) -> Option<SubmittingGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmittingGuard {
                flag: &self.submitting,
            })
    }

    /// Validate, post the booking, then refresh appointments.
    ///
    /// Failures raise an error toast and are also returned for inline display.
    pub async fn submit(
        &self,
        form: &BookingForm,
        store: &mut RecordStore,
        backend: &dyn Backend,
    ) -> Result<BookingReceipt, BookingError> {
        let _guard = self.begin().ok_or(BookingError::AlreadySubmitting)?;

        form.validate(store.doctors(), store.today()).into_result()?;
        let request = form.to_request()?;

        match backend.book_appointment(&request).await {
            Ok(receipt) => {
                let doctor_name = store
                    .doctors()
                    .iter()
                    .find(|d| d.id == form.doctor_id)
                    .map(|d| d.name.clone())
                    .unwrap_or_else(|| "your doctor".to_string());
                let subject = receipt
                    .appointment_id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                info!(appointment_id = %subject, "appointment booked");
                log_mutation(AuditAction::AppointmentBooked, &subject);

                store.push_toast(Toast::success(
                    "Appointment Booked!",
                    format!(
                        "Your appointment with {} on {} at {} is confirmed.",
                        doctor_name,
                        request.appointment_date,
                        form.time.trim()
                    ),
                ));
                store.refresh_appointments(backend).await;
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "booking failed");
                store.push_toast(Toast::error("Booking Failed", e.user_message()));
                Err(e.into())
            }
        }
    }
}
