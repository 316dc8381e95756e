//! Derived views over the record collections
//!
//! Pure functions from a collection and a query to an ordered list of
//! borrowed records. Search is a case-insensitive substring match over the
//! listed fields; an empty search or a `None` filter matches everything.
//! Sorting is stable, so filtering and sorting commute.

use chrono::NaiveDate;
use medisys_records::*;
use medisys_shared::Role;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

fn matches_search(search: &str, fields: &[&str]) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// ============================================================================
// Appointments
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppointmentSort {
    DateAsc,
    #[default]
    DateDesc,
    PatientName,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub search: String,
    pub status: Option<AppointmentStatus>,
    pub sort: AppointmentSort,
}

pub fn filter_appointments<'a>(
    items: impl IntoIterator<Item = &'a Appointment>,
    query: &AppointmentQuery,
) -> Vec<&'a Appointment> {
    items
        .into_iter()
        .filter(|a| {
            matches_search(&query.search, &[a.patient_name.as_str(), a.doctor_name.as_str(), a.specialty.as_str()])
                && query.status.map_or(true, |s| a.status == s)
        })
        .collect()
}

pub fn sort_appointments(items: &mut [&Appointment], sort: AppointmentSort) {
    match sort {
        AppointmentSort::DateAsc => items.sort_by(|a, b| a.date.cmp(&b.date)),
        AppointmentSort::DateDesc => items.sort_by(|a, b| b.date.cmp(&a.date)),
        AppointmentSort::PatientName => items.sort_by(|a, b| by_name(&a.patient_name, &b.patient_name)),
    }
}

pub fn appointments<'a>(items: &'a [Appointment], query: &AppointmentQuery) -> Vec<&'a Appointment> {
    let mut out = filter_appointments(items, query);
    sort_appointments(&mut out, query.sort);
    out
}

// ============================================================================
// Doctors
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DoctorSort {
    #[default]
    Name,
    /// Most available days first
    Availability,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DoctorQuery {
    pub search: String,
    pub specialty: Option<String>,
    pub sort: DoctorSort,
}

pub fn filter_doctors<'a>(
    items: impl IntoIterator<Item = &'a Doctor>,
    query: &DoctorQuery,
) -> Vec<&'a Doctor> {
    items
        .into_iter()
        .filter(|d| {
            matches_search(&query.search, &[d.name.as_str(), d.specialty.as_str()])
                && query.specialty.as_deref().map_or(true, |s| d.specialty == s)
        })
        .collect()
}

pub fn sort_doctors(items: &mut [&Doctor], sort: DoctorSort) {
    match sort {
        DoctorSort::Name => items.sort_by(|a, b| by_name(&a.name, &b.name)),
        DoctorSort::Availability => {
            items.sort_by(|a, b| b.availability.len().cmp(&a.availability.len()))
        }
    }
}

pub fn doctors<'a>(items: &'a [Doctor], query: &DoctorQuery) -> Vec<&'a Doctor> {
    let mut out = filter_doctors(items, query);
    sort_doctors(&mut out, query.sort);
    out
}

// ============================================================================
// Patients
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatientSort {
    #[default]
    Name,
    /// Youngest first
    DateOfBirth,
    /// Most recent first
    LastVisit,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientQuery {
    pub search: String,
    pub gender: Option<Gender>,
    pub sort: PatientSort,
}

pub fn filter_patients<'a>(
    items: impl IntoIterator<Item = &'a Patient>,
    query: &PatientQuery,
) -> Vec<&'a Patient> {
    items
        .into_iter()
        .filter(|p| {
            matches_search(&query.search, &[p.name.as_str(), p.contact.as_str(), p.address.as_str()])
                && query.gender.map_or(true, |g| p.gender == g)
        })
        .collect()
}

pub fn sort_patients(items: &mut [&Patient], sort: PatientSort) {
    match sort {
        PatientSort::Name => items.sort_by(|a, b| by_name(&a.name, &b.name)),
        PatientSort::DateOfBirth => items.sort_by(|a, b| b.date_of_birth.cmp(&a.date_of_birth)),
        PatientSort::LastVisit => items.sort_by(|a, b| b.last_visit.cmp(&a.last_visit)),
    }
}

pub fn patients<'a>(items: &'a [Patient], query: &PatientQuery) -> Vec<&'a Patient> {
    let mut out = filter_patients(items, query);
    sort_patients(&mut out, query.sort);
    out
}

// ============================================================================
// Rooms
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoomSort {
    #[default]
    RoomNumber,
    Type,
    Status,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomQuery {
    pub search: String,
    pub status: Option<RoomStatus>,
    pub room_type: Option<RoomType>,
    pub sort: RoomSort,
}

pub fn filter_rooms<'a>(items: impl IntoIterator<Item = &'a Room>, query: &RoomQuery) -> Vec<&'a Room> {
    items
        .into_iter()
        .filter(|r| {
            let occupant = r.patient_name.as_deref().unwrap_or("");
            matches_search(&query.search, &[r.room_number.as_str(), occupant])
                && query.status.map_or(true, |s| r.status == s)
                && query.room_type.map_or(true, |t| r.room_type == t)
        })
        .collect()
}

pub fn sort_rooms(items: &mut [&Room], sort: RoomSort) {
    match sort {
        RoomSort::RoomNumber => items.sort_by(|a, b| by_name(&a.room_number, &b.room_number)),
        RoomSort::Type => items.sort_by(|a, b| a.room_type.label().cmp(b.room_type.label())),
        RoomSort::Status => items.sort_by(|a, b| a.status.label().cmp(b.status.label())),
    }
}

pub fn rooms<'a>(items: &'a [Room], query: &RoomQuery) -> Vec<&'a Room> {
    let mut out = filter_rooms(items, query);
    sort_rooms(&mut out, query.sort);
    out
}

// ============================================================================
// Role-scoped lists
// ============================================================================

/// Admin sees everything, a doctor their own schedule, a patient their own
/// bookings; newest first, optionally capped
pub fn appointments_for<'a>(
    items: &'a [Appointment],
    role: Role,
    user: &User,
    limit: Option<usize>,
) -> Vec<&'a Appointment> {
    let mut out: Vec<&Appointment> = items
        .iter()
        .filter(|a| match role {
            Role::Admin => true,
            Role::Doctor => a.doctor_name == user.name,
            Role::Patient => a.patient_name == user.name,
        })
        .collect();
    sort_appointments(&mut out, AppointmentSort::DateDesc);
    if let Some(limit) = limit {
        out.truncate(limit);
    }
    out
}

pub fn bills_for<'a>(items: &'a [Bill], role: Role, user: &User) -> Vec<&'a Bill> {
    let mut out: Vec<&Bill> = items
        .iter()
        .filter(|b| role == Role::Admin || b.patient_name == user.name)
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

pub fn lab_tests_for<'a>(items: &'a [LabTest], role: Role, user: &User) -> Vec<&'a LabTest> {
    let mut out: Vec<&LabTest> = items
        .iter()
        .filter(|t| role != Role::Patient || t.patient_name == user.name)
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// One patient's records, newest first
pub fn medical_history<'a>(items: &'a [MedicalRecord], patient_id: &str) -> Vec<&'a MedicalRecord> {
    let mut out: Vec<&MedicalRecord> = items.iter().filter(|r| r.patient_id == patient_id).collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

// ============================================================================
// Dashboard statistics
// ============================================================================

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardStats {
    Admin {
        total_patients: usize,
        total_doctors: usize,
        appointments: usize,
        revenue: f64,
    },
    Doctor {
        patients_seen: usize,
        todays_appointments: usize,
        upcoming: usize,
        completed: usize,
    },
    Patient {
        upcoming: usize,
        completed: usize,
        pending_bills: usize,
        total_spent: f64,
    },
}

pub struct StatsInput<'a> {
    pub patients: &'a [Patient],
    pub doctors: &'a [Doctor],
    pub appointments: &'a [Appointment],
    pub bills: &'a [Bill],
}

fn paid_total<'a>(bills: impl Iterator<Item = &'a Bill>) -> f64 {
    bills
        .filter(|b| b.status == BillStatus::Paid)
        .fold(0.0, |acc, b| acc + b.amount)
}

pub fn dashboard_stats(input: &StatsInput<'_>, role: Role, user: &User, today: NaiveDate) -> DashboardStats {
    let own = appointments_for(input.appointments, role, user, None);
    let count = |status: AppointmentStatus| own.iter().filter(|a| a.status == status).count();

    match role {
        Role::Admin => DashboardStats::Admin {
            total_patients: input.patients.len(),
            total_doctors: input.doctors.len(),
            appointments: input.appointments.len(),
            revenue: paid_total(input.bills.iter()),
        },
        Role::Doctor => {
            let patients: HashSet<&str> = own.iter().map(|a| a.patient_id.as_str()).collect();
            DashboardStats::Doctor {
                patients_seen: patients.len(),
                todays_appointments: own
                    .iter()
                    .filter(|a| a.date == today && a.status == AppointmentStatus::Upcoming)
                    .count(),
                upcoming: count(AppointmentStatus::Upcoming),
                completed: count(AppointmentStatus::Completed),
            }
        }
        Role::Patient => {
            let bills = bills_for(input.bills, role, user);
            DashboardStats::Patient {
                upcoming: count(AppointmentStatus::Upcoming),
                completed: count(AppointmentStatus::Completed),
                pending_bills: bills.iter().filter(|b| b.status == BillStatus::Pending).count(),
                total_spent: paid_total(bills.into_iter()),
            }
        }
    }
}
