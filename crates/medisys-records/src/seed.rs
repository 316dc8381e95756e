//! Static fixtures the dashboard starts from, and the synthetic user directory

use crate::types::*;
use chrono::{NaiveDate, Weekday};
use medisys_shared::{CredentialDigest, Role};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn picsum(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/200/200", seed)
}

/// The three synthetic users, one per role
pub fn users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, seed: &str, role: Role| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar: picsum(seed),
        role,
        credential: Some(CredentialDigest::from_secret(role.as_str())),
    };

    vec![
        user("user-admin", "Rohan Sharma", "admin@medisys.in", "admin", Role::Admin),
        user("user-doctor", "Dr. Anjali Rao", "anjali.rao@medisys.in", "doctor", Role::Doctor),
        user("user-patient", "Priya Patel", "priya.patel@email.com", "patient", Role::Patient),
    ]
}

pub fn user_id_for_role(role: Role) -> &'static str {
    match role {
        Role::Admin => "user-admin",
        Role::Doctor => "user-doctor",
        Role::Patient => "user-patient",
    }
}

pub fn user_by_id(id: &str) -> Option<User> {
    users().into_iter().find(|u| u.id == id)
}

/// Synthetic user for a role; every role has exactly one
pub fn user_for_role(role: Role) -> User {
    users()
        .into_iter()
        .find(|u| u.role == role)
        .unwrap_or_else(|| User {
            id: user_id_for_role(role).to_string(),
            name: String::new(),
            email: String::new(),
            avatar: picsum(role.as_str()),
            role,
            credential: None,
        })
}

pub fn patients() -> Vec<Patient> {
    let patient = |id: &str,
                   name: &str,
                   dob: NaiveDate,
                   gender: Gender,
                   contact: &str,
                   address: &str,
                   last_visit: NaiveDate,
                   seed: &str| Patient {
        id: id.to_string(),
        name: name.to_string(),
        date_of_birth: dob,
        gender,
        contact: contact.to_string(),
        address: address.to_string(),
        last_visit,
        avatar: picsum(seed),
    };

    vec![
        patient("p001", "Priya Patel", ymd(1990, 5, 15), Gender::Female, "+91 9876543210", "12B, Linking Road, Mumbai", ymd(2024, 5, 15), "avatar1"),
        patient("p002", "Amit Kumar", ymd(1985, 8, 22), Gender::Male, "+91 9123456789", "45, MG Road, Bangalore", ymd(2024, 6, 1), "avatar2"),
        patient("p003", "Suresh Singh", ymd(1978, 11, 30), Gender::Male, "+91 8877665544", "78, Connaught Place, New Delhi", ymd(2024, 4, 20), "avatar3"),
        patient("p004", "Deepika Verma", ymd(2001, 7, 19), Gender::Female, "+91 7766554433", "101, Park Street, Kolkata", ymd(2024, 5, 28), "avatar4"),
    ]
}

pub fn doctors() -> Vec<Doctor> {
    use Weekday::*;
    let doctor = |id: &str, name: &str, specialty: &str, days: &[Weekday], seed: &str| Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        availability: days.to_vec(),
        avatar: picsum(seed),
    };

    vec![
        doctor("d001", "Dr. Anjali Rao", "Cardiology", &[Mon, Wed, Fri], "avatar5"),
        doctor("d002", "Dr. Vikram Gupta", "Dermatology", &[Tue, Thu], "avatar6"),
        doctor("d003", "Dr. Sneha Reddy", "Pediatrics", &[Mon, Tue, Wed, Thu, Fri], "avatar7"),
        doctor("d004", "Dr. Rahul Mehra", "Neurology", &[Mon, Fri], "avatar8"),
    ]
}

pub fn appointments() -> Vec<Appointment> {
    let appointment = |id: &str,
                       patient: (&str, &str),
                       doctor: (&str, &str),
                       specialty: &str,
                       date: NaiveDate,
                       time: &str,
                       status: AppointmentStatus| Appointment {
        id: id.to_string(),
        patient_id: patient.0.to_string(),
        patient_name: patient.1.to_string(),
        doctor_id: doctor.0.to_string(),
        doctor_name: doctor.1.to_string(),
        specialty: specialty.to_string(),
        date,
        time: time.to_string(),
        status,
    };

    vec![
        appointment("a001", ("p001", "Priya Patel"), ("d001", "Dr. Anjali Rao"), "Cardiology", ymd(2024, 7, 20), "10:00 AM", AppointmentStatus::Upcoming),
        appointment("a002", ("p002", "Amit Kumar"), ("d002", "Dr. Vikram Gupta"), "Dermatology", ymd(2024, 7, 22), "02:30 PM", AppointmentStatus::Upcoming),
        appointment("a003", ("p001", "Priya Patel"), ("d003", "Dr. Sneha Reddy"), "Pediatrics", ymd(2024, 6, 10), "09:00 AM", AppointmentStatus::Completed),
    ]
}

pub fn bills() -> Vec<Bill> {
    let bill = |id: &str, patient: &str, date: NaiveDate, amount: f64, status: BillStatus| Bill {
        id: id.to_string(),
        patient_name: patient.to_string(),
        date,
        amount,
        status,
    };

    vec![
        bill("b001", "Priya Patel", ymd(2024, 6, 11), 1200.00, BillStatus::Paid),
        bill("b002", "Amit Kumar", ymd(2024, 6, 2), 500.00, BillStatus::Pending),
        bill("b003", "Priya Patel", ymd(2024, 5, 16), 2000.00, BillStatus::Paid),
        bill("b004", "Suresh Singh", ymd(2024, 4, 21), 4500.00, BillStatus::Overdue),
    ]
}

pub fn medical_records() -> Vec<MedicalRecord> {
    let record = |id: &str, patient_id: &str, date: NaiveDate, diagnosis: &str, notes: &str, doctor: &str, rx: &str| MedicalRecord {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        date,
        diagnosis: diagnosis.to_string(),
        notes: notes.to_string(),
        doctor_name: doctor.to_string(),
        prescription: Some(rx.to_string()),
    };

    vec![
        record("mr001", "p001", ymd(2024, 5, 15), "Minor Arrhythmia", "Prescribed beta-blockers. Follow-up in 2 months.", "Dr. Anjali Rao", "Metoprolol 50mg"),
        record("mr002", "p001", ymd(2024, 1, 5), "Common Cold", "Advised rest and hydration.", "Dr. Sneha Reddy", "Paracetamol as needed"),
        record("mr003", "p002", ymd(2024, 6, 1), "Acne Vulgaris", "Prescribed topical retinoids.", "Dr. Vikram Gupta", "Tretinoin Cream 0.05%"),
    ]
}

pub fn rooms() -> Vec<Room> {
    let room = |id: &str, number: &str, room_type: RoomType, occupant: Option<&str>| Room {
        id: id.to_string(),
        room_number: number.to_string(),
        room_type,
        status: if occupant.is_some() {
            RoomStatus::Occupied
        } else {
            RoomStatus::Available
        },
        patient_name: occupant.map(str::to_string),
    };

    vec![
        room("r101", "101", RoomType::Private, None),
        room("r102", "102", RoomType::Private, Some("Amit Kumar")),
        room("r201", "201", RoomType::GeneralWard, None),
        room("r202", "202", RoomType::GeneralWard, None),
        room("icu01", "ICU-01", RoomType::Icu, Some("Suresh Singh")),
    ]
}

pub fn lab_tests() -> Vec<LabTest> {
    let test = |id: &str, patient: &str, name: &str, date: NaiveDate, result: Option<&str>| LabTest {
        id: id.to_string(),
        patient_name: patient.to_string(),
        test_name: name.to_string(),
        date,
        status: if result.is_some() {
            LabTestStatus::Completed
        } else {
            LabTestStatus::Pending
        },
        result: result.map(str::to_string),
    };

    vec![
        test("lt001", "Priya Patel", "Complete Blood Count (CBC)", ymd(2024, 7, 18), None),
        test("lt002", "Amit Kumar", "Lipid Panel", ymd(2024, 7, 17), Some("Total Cholesterol: 190 mg/dL")),
        test("lt003", "Suresh Singh", "Thyroid Panel", ymd(2024, 7, 19), None),
    ]
}
