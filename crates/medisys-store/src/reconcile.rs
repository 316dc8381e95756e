//! Mapping backend rows into domain records
//!
//! Each status vocabulary goes through one named table in both directions.
//! Rows whose dates cannot be read are skipped with a warning; every other
//! field falls back to a display default.

use crate::wire::*;
use chrono::{NaiveDate, NaiveTime, Weekday};
use medisys_records::*;
use tracing::{debug, warn};

/// Two-way mapping between backend status strings and a domain status
pub struct StatusTable<S: 'static> {
    pub name: &'static str,
    entries: &'static [(&'static str, S)],
    fallback: S,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {table} '{value}'")]
pub struct UnknownValue {
    pub table: &'static str,
    pub value: String,
}

impl<S: Copy + PartialEq> StatusTable<S> {
    /// Case-insensitive lookup without the fallback
    pub fn lookup(&self, raw: &str) -> Result<S, UnknownValue> {
        let raw = raw.trim();
        self.entries
            .iter()
            .find(|(wire, _)| wire.eq_ignore_ascii_case(raw))
            .map(|(_, status)| *status)
            .ok_or_else(|| UnknownValue {
                table: self.name,
                value: raw.to_string(),
            })
    }

    /// Unknown strings map to the table's fallback
    pub fn from_wire(&self, raw: &str) -> S {
        self.lookup(raw).unwrap_or_else(|e| {
            debug!(error = %e, "using fallback");
            self.fallback
        })
    }

    /// First backend string listed for a status
    pub fn to_wire(&self, status: S) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, s)| *s == status)
            .map(|(wire, _)| *wire)
    }
}

pub const APPOINTMENT_STATUS: StatusTable<AppointmentStatus> = StatusTable {
    name: "appointment status",
    entries: &[
        ("Scheduled", AppointmentStatus::Upcoming),
        ("Completed", AppointmentStatus::Completed),
        ("Cancelled", AppointmentStatus::Cancelled),
    ],
    fallback: AppointmentStatus::Upcoming,
};

pub const BILL_STATUS: StatusTable<BillStatus> = StatusTable {
    name: "payment status",
    entries: &[
        ("Paid", BillStatus::Paid),
        ("Pending", BillStatus::Pending),
        ("Overdue", BillStatus::Overdue),
    ],
    fallback: BillStatus::Pending,
};

pub const LAB_TEST_STATUS: StatusTable<LabTestStatus> = StatusTable {
    name: "lab test status",
    entries: &[
        ("Pending", LabTestStatus::Pending),
        ("Completed", LabTestStatus::Completed),
    ],
    fallback: LabTestStatus::Pending,
};

pub const ROOM_STATUS: StatusTable<RoomStatus> = StatusTable {
    name: "room availability",
    entries: &[
        ("Available", RoomStatus::Available),
        ("Occupied", RoomStatus::Occupied),
    ],
    fallback: RoomStatus::Occupied,
};

pub const ROOM_TYPE: StatusTable<RoomType> = StatusTable {
    name: "room type",
    entries: &[
        ("General Ward", RoomType::GeneralWard),
        ("General", RoomType::GeneralWard),
        ("Private", RoomType::Private),
        ("ICU", RoomType::Icu),
    ],
    fallback: RoomType::GeneralWard,
};

pub const GENDER: StatusTable<Gender> = StatusTable {
    name: "gender",
    entries: &[
        ("Male", Gender::Male),
        ("Female", Gender::Female),
        ("Other", Gender::Other),
        ("M", Gender::Male),
        ("F", Gender::Female),
    ],
    fallback: Gender::Other,
};

/// `14:30:00` (or `14:30`) becomes `2:30 PM`; unreadable input is kept as is
pub fn display_time_from_wire(raw: &str) -> String {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// `2:30 PM` becomes `14:30`
pub fn wire_time_from_display(display: &str) -> Option<String> {
    parse_display_time(display).map(|t| t.format("%H:%M").to_string())
}

/// Reads the leading `YYYY-MM-DD` of a date or timestamp column
pub fn date_from_wire(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn skip_row(kind: &str, id: &WireId, raw_date: &str) {
    warn!(kind, id = %id, date = raw_date, "skipping backend row with unreadable date");
}

pub fn appointment_from_wire(row: &WireAppointment) -> Option<Appointment> {
    let Some(date) = date_from_wire(&row.appointment_date) else {
        skip_row("appointment", &row.appointment_id, &row.appointment_date);
        return None;
    };

    Some(Appointment {
        id: row.appointment_id.to_string(),
        patient_id: row.patient_id.to_string(),
        patient_name: row.patient_name.clone(),
        doctor_id: row.doctor_id.to_string(),
        doctor_name: row.doctor_name.clone(),
        specialty: row.specialization_name.clone(),
        date,
        time: display_time_from_wire(&row.appointment_time),
        status: APPOINTMENT_STATUS.from_wire(&row.status),
    })
}

/// Weekday availability is not a backend column; an `Available` doctor is
/// taken to work Monday to Friday, anyone else has no open days.
pub fn doctor_from_wire(row: &WireDoctor) -> Doctor {
    let available = row
        .availability_status
        .as_deref()
        .map(|s| s.trim().eq_ignore_ascii_case("Available"))
        .unwrap_or(false);

    Doctor {
        id: row.doctor_id.to_string(),
        name: row.doctor_name.clone(),
        specialty: row
            .specialization_name
            .clone()
            .unwrap_or_else(|| "General".to_string()),
        availability: if available {
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ]
        } else {
            Vec::new()
        },
        avatar: format!("https://picsum.photos/seed/doctor{}/200/200", row.doctor_id),
    }
}

pub fn patient_from_wire(row: &WirePatient) -> Option<Patient> {
    let raw_dob = row.dob.as_deref().unwrap_or("");
    let Some(date_of_birth) = date_from_wire(raw_dob) else {
        skip_row("patient", &row.patient_id, raw_dob);
        return None;
    };
    let last_visit = row
        .last_visit
        .as_deref()
        .and_then(date_from_wire)
        .or_else(|| row.created_at.as_deref().and_then(date_from_wire))
        .unwrap_or(date_of_birth);

    Some(Patient {
        id: row.patient_id.to_string(),
        name: row.patient_name.clone(),
        date_of_birth,
        gender: GENDER.from_wire(row.gender.as_deref().unwrap_or("")),
        contact: row.contact_number.clone().unwrap_or_default(),
        address: row.full_address.clone().unwrap_or_default(),
        last_visit,
        avatar: format!("https://picsum.photos/seed/patient{}/200/200", row.patient_id),
    })
}

pub fn bill_from_wire(row: &WireBill) -> Option<Bill> {
    let raw_date = row
        .created_at
        .as_deref()
        .or(row.payment_date.as_deref())
        .unwrap_or("");
    let Some(date) = date_from_wire(raw_date) else {
        skip_row("bill", &row.bill_id, raw_date);
        return None;
    };
    let amount = row
        .final_amount
        .as_ref()
        .and_then(WireAmount::value)
        .or_else(|| row.total_amount.value())
        .unwrap_or(0.0);

    Some(Bill {
        id: row.bill_id.to_string(),
        patient_name: row
            .patient
            .as_ref()
            .map(WirePersonName::full_name)
            .unwrap_or_else(|| "Unknown Patient".to_string()),
        date,
        amount,
        status: BILL_STATUS.from_wire(&row.payment_status),
    })
}

/// `POST billing` body for a locally generated bill
pub fn bill_to_wire(bill: &Bill) -> serde_json::Value {
    let name = bill.patient_name.trim();
    let (first, last) = name.split_once(' ').unwrap_or((name, ""));
    serde_json::json!({
        "Total_Amount": bill.amount,
        "Payment_Status": BILL_STATUS.to_wire(bill.status).unwrap_or("Pending"),
        "Created_At": bill.date.format("%Y-%m-%d").to_string(),
        "Patient": { "First_Name": first, "Last_Name": last.trim() },
    })
}

pub fn lab_test_from_wire(row: &WireLabTest) -> Option<LabTest> {
    let Some(date) = date_from_wire(&row.test_date) else {
        skip_row("lab test", &row.test_id, &row.test_date);
        return None;
    };

    Some(LabTest {
        id: row.test_id.to_string(),
        patient_name: row
            .patient
            .as_ref()
            .map(WirePersonName::full_name)
            .unwrap_or_else(|| "Unknown Patient".to_string()),
        test_name: row.test_name.clone(),
        date,
        status: LAB_TEST_STATUS.from_wire(&row.status),
        result: row.result.clone().filter(|r| !r.trim().is_empty()),
    })
}

pub fn room_from_wire(row: &WireRoom) -> Room {
    Room {
        id: row.room_id.to_string(),
        room_number: row.room_number.to_string(),
        room_type: ROOM_TYPE.from_wire(&row.room_type),
        status: ROOM_STATUS.from_wire(&row.availability_status),
        patient_name: row.patient_name.clone(),
    }
}
