//! Backend JSON shapes
//!
//! Field names follow the backend's `Pascal_Snake` columns. Ids and money
//! columns arrive as either numbers or strings depending on the database
//! driver, so both are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{}", n),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for WireId {
    fn from(n: i64) -> Self {
        WireId::Number(n)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WireAmount {
    Number(f64),
    Text(String),
}

impl WireAmount {
    pub fn value(&self) -> Option<f64> {
        match self {
            WireAmount::Number(n) => Some(*n),
            WireAmount::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn unknown_patient() -> String {
    "Unknown Patient".to_string()
}

fn unknown_doctor() -> String {
    "Unknown Doctor".to_string()
}

fn general_specialization() -> String {
    "General".to_string()
}

/// Appointment row enriched with patient, doctor and specialization names
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WireAppointment {
    #[serde(rename = "Appointment_ID")]
    pub appointment_id: WireId,
    #[serde(rename = "Doctor_ID")]
    pub doctor_id: WireId,
    #[serde(rename = "Patient_ID")]
    pub patient_id: WireId,
    #[serde(rename = "Appointment_Date")]
    pub appointment_date: String,
    /// 24-hour `HH:MM:SS`
    #[serde(rename = "Appointment_Time")]
    pub appointment_time: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Admin_ID", default)]
    pub admin_id: Option<WireId>,
    #[serde(rename = "Notes", default)]
    pub notes: Option<String>,
    #[serde(rename = "Created_At", default)]
    pub created_at: Option<String>,
    #[serde(rename = "Updated_At", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "Patient_Name", default = "unknown_patient")]
    pub patient_name: String,
    #[serde(rename = "Doctor_Name", default = "unknown_doctor")]
    pub doctor_name: String,
    #[serde(rename = "Specialization_Name", default = "general_specialization")]
    pub specialization_name: String,
}

/// Row of the doctor details view
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WireDoctor {
    #[serde(rename = "Doctor_ID")]
    pub doctor_id: WireId,
    #[serde(rename = "Doctor_Name")]
    pub doctor_name: String,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Age", default)]
    pub age: Option<u32>,
    #[serde(rename = "Qualification", default)]
    pub qualification: Option<String>,
    #[serde(rename = "Experience_Years", default)]
    pub experience_years: Option<u32>,
    #[serde(rename = "Consultation_Charges", default)]
    pub consultation_charges: Option<WireAmount>,
    #[serde(rename = "Availability_Status", default)]
    pub availability_status: Option<String>,
    #[serde(rename = "Contact_Number", default)]
    pub contact_number: Option<String>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Specialization_Name", default)]
    pub specialization_name: Option<String>,
    #[serde(rename = "Department_Name", default)]
    pub department_name: Option<String>,
}

/// Row of the patient info view
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WirePatient {
    #[serde(rename = "Patient_ID")]
    pub patient_id: WireId,
    #[serde(rename = "Patient_Name")]
    pub patient_name: String,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "DOB", default)]
    pub dob: Option<String>,
    #[serde(rename = "Contact_Number", default)]
    pub contact_number: Option<String>,
    #[serde(rename = "Full_Address", default)]
    pub full_address: Option<String>,
    #[serde(rename = "Last_Visit", default)]
    pub last_visit: Option<String>,
    #[serde(rename = "Created_At", default)]
    pub created_at: Option<String>,
}

/// Nested `{First_Name, Last_Name}` join
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WirePersonName {
    #[serde(rename = "First_Name", default)]
    pub first_name: String,
    #[serde(rename = "Last_Name", default)]
    pub last_name: String,
}

impl WirePersonName {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WireBill {
    #[serde(rename = "Bill_ID")]
    pub bill_id: WireId,
    #[serde(rename = "Appointment_ID", default)]
    pub appointment_id: Option<WireId>,
    #[serde(rename = "Patient_ID", default)]
    pub patient_id: Option<WireId>,
    #[serde(rename = "Total_Amount")]
    pub total_amount: WireAmount,
    #[serde(rename = "Discount_Amount", default)]
    pub discount_amount: Option<WireAmount>,
    #[serde(rename = "Final_Amount", default)]
    pub final_amount: Option<WireAmount>,
    #[serde(rename = "Payment_Status")]
    pub payment_status: String,
    #[serde(rename = "Payment_Date", default)]
    pub payment_date: Option<String>,
    #[serde(rename = "Payment_Method", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "Created_At", default)]
    pub created_at: Option<String>,
    #[serde(rename = "Patient", default)]
    pub patient: Option<WirePersonName>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WireLabTest {
    #[serde(rename = "Test_ID")]
    pub test_id: WireId,
    #[serde(rename = "Patient_ID", default)]
    pub patient_id: Option<WireId>,
    #[serde(rename = "Doctor_ID", default)]
    pub doctor_id: Option<WireId>,
    #[serde(rename = "Test_Name")]
    pub test_name: String,
    #[serde(rename = "Test_Date")]
    pub test_date: String,
    #[serde(rename = "Result", default)]
    pub result: Option<String>,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Cost", default)]
    pub cost: Option<WireAmount>,
    #[serde(rename = "Patient", default)]
    pub patient: Option<WirePersonName>,
    #[serde(rename = "Doctor", default)]
    pub doctor: Option<WirePersonName>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WireRoom {
    #[serde(rename = "Room_ID")]
    pub room_id: WireId,
    #[serde(rename = "Room_Number")]
    pub room_number: WireId,
    #[serde(rename = "Type")]
    pub room_type: String,
    #[serde(rename = "Availability_Status")]
    pub availability_status: String,
    #[serde(rename = "Charges_Per_Day", default)]
    pub charges_per_day: Option<WireAmount>,
    #[serde(rename = "Created_At", default)]
    pub created_at: Option<String>,
    #[serde(rename = "Patient_Name", default)]
    pub patient_name: Option<String>,
}

/// Body of `POST /appointments`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    #[serde(rename = "Doctor_ID")]
    pub doctor_id: i64,
    #[serde(rename = "Patient_ID")]
    pub patient_id: i64,
    /// `YYYY-MM-DD`
    #[serde(rename = "Appointment_Date")]
    pub appointment_date: String,
    /// 24-hour `HH:MM`
    #[serde(rename = "Appointment_Time")]
    pub appointment_time: String,
    #[serde(rename = "Admin_ID", skip_serializing_if = "Option::is_none", default)]
    pub admin_id: Option<i64>,
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

/// Successful booking response
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BookingReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub appointment_id: Option<WireId>,
}

/// Counters from `GET /dashboard/stats`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackendStats {
    #[serde(default)]
    pub total_patients: u64,
    #[serde(default)]
    pub total_doctors: u64,
    #[serde(default)]
    pub upcoming_appointments: u64,
    #[serde(default)]
    pub pending_bills: u64,
}
