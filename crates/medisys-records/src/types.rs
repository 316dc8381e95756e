//! Domain record types
//!
//! Field names serialize in camelCase and status variants serialize to the
//! exact strings shown in the dashboard (`"General Ward"`, `"Upcoming"` ...).

use chrono::{NaiveDate, Weekday};
use medisys_shared::{CredentialDigest, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic user profile bound to a role
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub role: Role,
    /// Digest of the fixed per-role secret; never serialized
    #[serde(skip)]
    pub credential: Option<CredentialDigest>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub contact: String,
    pub address: String,
    pub last_visit: NaiveDate,
    pub avatar: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    /// Weekdays the doctor takes appointments (serialized as `Mon`, `Tue` ...)
    pub availability: Vec<Weekday>,
    pub avatar: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Upcoming may move to Completed or Cancelled; nothing moves back
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Upcoming, AppointmentStatus::Completed)
                | (AppointmentStatus::Upcoming, AppointmentStatus::Cancelled)
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    /// Display form, e.g. `10:00 AM`
    pub time: String,
    pub status: AppointmentStatus,
}

/// Appointment fields supplied by the caller; the store assigns the id
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    pub fn into_record(self, id: String) -> Appointment {
        Appointment {
            id,
            patient_id: self.patient_id,
            patient_name: self.patient_name,
            doctor_id: self.doctor_id,
            doctor_name: self.doctor_name,
            specialty: self.specialty,
            date: self.date,
            time: self.time,
            status: self.status,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BillStatus {
    Paid,
    Pending,
    Overdue,
}

impl BillStatus {
    pub fn can_transition_to(&self, next: BillStatus) -> bool {
        matches!(
            (self, next),
            (BillStatus::Pending, BillStatus::Paid) | (BillStatus::Overdue, BillStatus::Paid)
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub patient_name: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub status: BillStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub patient_name: String,
    pub amount: f64,
    /// Defaults to Pending
    pub status: Option<BillStatus>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LabTestStatus {
    Pending,
    Completed,
}

impl LabTestStatus {
    pub fn can_transition_to(&self, next: LabTestStatus) -> bool {
        matches!((self, next), (LabTestStatus::Pending, LabTestStatus::Completed))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    pub id: String,
    pub patient_name: String,
    pub test_name: String,
    pub date: NaiveDate,
    pub status: LabTestStatus,
    pub result: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLabTest {
    pub patient_name: String,
    pub test_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub notes: String,
    pub doctor_name: String,
    pub prescription: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalRecord {
    pub patient_id: String,
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub diagnosis: String,
    pub notes: String,
    pub doctor_name: String,
    pub prescription: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomType {
    #[serde(rename = "General Ward")]
    GeneralWard,
    Private,
    #[serde(rename = "ICU")]
    Icu,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomStatus {
    Available,
    Occupied,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub status: RoomStatus,
    pub patient_name: Option<String>,
}

macro_rules! display_as_label {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub fn label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.label())
            }
        }
    };
}

display_as_label!(Gender { Male => "Male", Female => "Female", Other => "Other" });
display_as_label!(AppointmentStatus {
    Upcoming => "Upcoming",
    Completed => "Completed",
    Cancelled => "Cancelled",
});
display_as_label!(BillStatus { Paid => "Paid", Pending => "Pending", Overdue => "Overdue" });
display_as_label!(LabTestStatus { Pending => "Pending", Completed => "Completed" });
display_as_label!(RoomType { GeneralWard => "General Ward", Private => "Private", Icu => "ICU" });
display_as_label!(RoomStatus { Available => "Available", Occupied => "Occupied" });
