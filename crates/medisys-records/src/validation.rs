//! Validation of caller-supplied records before they reach the store

use crate::types::*;
use chrono::NaiveTime;
use medisys_shared::validation::{
    validate_amount, validate_required, ValidationErrorCode, ValidationResult,
};

/// Parse a display time such as `10:00 AM` or `2:30 PM`
pub fn parse_display_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%I:%M %p").ok()
}

pub fn validate_new_appointment(appointment: &NewAppointment) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.merge(validate_required(&appointment.patient_id, "patient_id", "Patient is required"));
    result.merge(validate_required(&appointment.patient_name, "patient_name", "Patient name is required"));
    result.merge(validate_required(&appointment.doctor_id, "doctor_id", "Please select a doctor."));
    result.merge(validate_required(&appointment.doctor_name, "doctor_name", "Doctor name is required"));
    result.merge(validate_required(&appointment.specialty, "specialty", "Please select a specialty."));

    if appointment.time.trim().is_empty() {
        result.add_error("time", "Please select a time.", ValidationErrorCode::Required);
    } else if parse_display_time(&appointment.time).is_none() {
        result.add_error(
            "time",
            "Time must look like 10:00 AM",
            ValidationErrorCode::InvalidFormat,
        );
    }

    result
}

pub fn validate_new_bill(bill: &NewBill) -> ValidationResult {
    let mut result = validate_required(&bill.patient_name, "patient_name", "Patient name is required");
    result.merge(validate_amount(bill.amount, "amount"));
    result
}

pub fn validate_new_lab_test(test: &NewLabTest) -> ValidationResult {
    let mut result = validate_required(&test.patient_name, "patient_name", "Patient name is required");
    result.merge(validate_required(&test.test_name, "test_name", "Test name is required"));
    result
}

pub fn validate_new_medical_record(record: &NewMedicalRecord) -> ValidationResult {
    let mut result = validate_required(&record.patient_id, "patient_id", "Patient is required");
    result.merge(validate_required(&record.diagnosis, "diagnosis", "Diagnosis is required"));
    result.merge(validate_required(&record.doctor_name, "doctor_name", "Doctor name is required"));
    result
}

pub fn validate_lab_result(result_text: &str) -> ValidationResult {
    validate_required(result_text, "result", "A result is required to complete the test")
}
