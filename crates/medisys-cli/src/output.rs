//! Terminal rendering

use colored::*;
use medisys_records::{
    Appointment, AppointmentStatus, Bill, BillStatus, Doctor, LabTest, LabTestStatus, MedicalRecord,
    Patient, Room, RoomStatus,
};
use medisys_shared::{Toast, ToastLevel};
use medisys_store::views::DashboardStats;
use medisys_store::wire::BackendStats;
use medisys_store::SessionStore;
use serde::Serialize;
use serde_json::Value;

fn rule() {
    println!("{}", "─".repeat(60));
}

fn heading(title: &str) {
    rule();
    println!("{}", title.green().bold());
    rule();
}

fn emit_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} Failed to serialize output: {}", "Error:".red().bold(), e),
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn availability_summary(doctor: &Doctor) -> String {
    if doctor.availability.is_empty() {
        return "-".to_string();
    }
    doctor
        .availability
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn appointment_status(status: AppointmentStatus) -> ColoredString {
    match status {
        AppointmentStatus::Upcoming => status.label().cyan(),
        AppointmentStatus::Completed => status.label().green(),
        AppointmentStatus::Cancelled => status.label().red(),
    }
}

fn bill_status(status: BillStatus) -> ColoredString {
    match status {
        BillStatus::Paid => status.label().green(),
        BillStatus::Pending => status.label().yellow(),
        BillStatus::Overdue => status.label().red().bold(),
    }
}

pub fn print_session(session: &SessionStore, json: bool) {
    let user = session.user();
    if json {
        emit_json(&serde_json::json!({
            "role": session.role(),
            "user": user,
            "isAuthenticated": session.is_authenticated(),
        }));
        return;
    }
    heading("SESSION");
    println!("  User:  {} <{}>", user.name.cyan(), user.email);
    println!("  Role:  {}", session.role());
    let state = if session.is_authenticated() {
        "logged in".green()
    } else {
        "logged out".yellow()
    };
    println!("  State: {}", state);
    println!("  Menu:");
    for section in session.role().sections() {
        println!("    {:<16} {}", section.label(session.role()), section.path(session.role()).dimmed());
    }
}

pub fn print_change(changed: bool, message: &str) {
    if changed {
        println!("{} {}", "✓".green().bold(), message);
    } else {
        println!("No change.");
    }
}

pub fn print_appointments(items: &[&Appointment], json: bool) {
    if json {
        return emit_json(items);
    }
    heading("APPOINTMENTS");
    if items.is_empty() {
        println!("  No appointments.");
    }
    for a in items {
        println!(
            "  {:<16} {} {:>8}  {:<20} {:<20} {:<14} {}",
            a.id,
            a.date,
            a.time,
            a.patient_name,
            a.doctor_name,
            a.specialty,
            appointment_status(a.status)
        );
    }
}

pub fn print_doctors(items: &[&Doctor], json: bool) {
    if json {
        return emit_json(items);
    }
    heading("DOCTORS");
    for d in items {
        println!("  {:<8} {:<24} {:<16} {}", d.id, d.name, d.specialty, availability_summary(d));
    }
}

pub fn print_patients(items: &[&Patient], json: bool) {
    if json {
        return emit_json(items);
    }
    heading("PATIENTS");
    for p in items {
        println!(
            "  {:<8} {:<20} {:<7} born {}  last visit {}  {}",
            p.id,
            p.name,
            p.gender,
            p.date_of_birth,
            p.last_visit,
            p.contact.dimmed()
        );
    }
}

pub fn print_rooms(items: &[&Room], json: bool) {
    if json {
        return emit_json(items);
    }
    heading("ROOMS");
    for r in items {
        let status = match r.status {
            RoomStatus::Available => r.status.label().green(),
            RoomStatus::Occupied => r.status.label().yellow(),
        };
        println!(
            "  {:<8} {:<14} {:<10} {}",
            r.room_number,
            r.room_type,
            status,
            r.patient_name.as_deref().unwrap_or("")
        );
    }
}

pub fn print_bills(items: &[&Bill], json: bool) {
    if json {
        return emit_json(items);
    }
    heading("BILLING");
    for b in items {
        println!(
            "  {:<16} {} {:<20} {:>12}  {}",
            b.id,
            b.date,
            b.patient_name,
            format_amount(b.amount),
            bill_status(b.status)
        );
    }
}

pub fn print_lab_tests(items: &[&LabTest], json: bool) {
    if json {
        return emit_json(items);
    }
    heading("LAB TESTS");
    for t in items {
        let status = match t.status {
            LabTestStatus::Pending => t.status.label().yellow(),
            LabTestStatus::Completed => t.status.label().green(),
        };
        println!("  {:<16} {} {:<20} {:<28} {}", t.id, t.date, t.patient_name, t.test_name, status);
        if let Some(result) = &t.result {
            println!("      {}", result.dimmed());
        }
    }
}

pub fn print_history(items: &[&MedicalRecord], json: bool) {
    if json {
        return emit_json(items);
    }
    heading("MEDICAL HISTORY");
    if items.is_empty() {
        println!("  No records.");
    }
    for r in items {
        println!("  {} {} ({})", r.date, r.diagnosis.bold(), r.doctor_name);
        if !r.notes.is_empty() {
            println!("      {}", r.notes);
        }
        if let Some(rx) = &r.prescription {
            println!("      Rx: {}", rx.cyan());
        }
    }
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    #[serde(flatten)]
    local: &'a DashboardStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    backend: Option<&'a BackendStats>,
}

/// Local role counters, plus the backend's under `backend` when fetched
pub fn stats_json(stats: &DashboardStats, backend: Option<&BackendStats>) -> Value {
    serde_json::to_value(StatsOutput { local: stats, backend }).unwrap_or(Value::Null)
}

pub fn print_stats(stats: &DashboardStats, backend: Option<&BackendStats>, json: bool) {
    if json {
        return emit_json(&stats_json(stats, backend));
    }
    heading("DASHBOARD");
    match stats {
        DashboardStats::Admin {
            total_patients,
            total_doctors,
            appointments,
            revenue,
        } => {
            println!("  Total Patients:  {}", total_patients.to_string().cyan());
            println!("  Total Doctors:   {}", total_doctors.to_string().cyan());
            println!("  Appointments:    {}", appointments.to_string().cyan());
            println!("  Revenue:         {}", format_amount(*revenue).green());
        }
        DashboardStats::Doctor {
            patients_seen,
            todays_appointments,
            upcoming,
            completed,
        } => {
            println!("  My Patients:             {}", patients_seen.to_string().cyan());
            println!("  Today's Appointments:    {}", todays_appointments.to_string().cyan());
            println!("  Upcoming Appointments:   {}", upcoming.to_string().cyan());
            println!("  Completed Consultations: {}", completed.to_string().cyan());
        }
        DashboardStats::Patient {
            upcoming,
            completed,
            pending_bills,
            total_spent,
        } => {
            println!("  Upcoming Appointments: {}", upcoming.to_string().cyan());
            println!("  Past Consultations:    {}", completed.to_string().cyan());
            println!("  Pending Bills:         {}", pending_bills.to_string().yellow());
            println!("  Total Spent:           {}", format_amount(*total_spent).green());
        }
    }
    if let Some(remote) = backend {
        println!();
        println!("  {}", "Backend".bold());
        println!("  Total Patients:        {}", remote.total_patients.to_string().cyan());
        println!("  Total Doctors:         {}", remote.total_doctors.to_string().cyan());
        println!("  Upcoming Appointments: {}", remote.upcoming_appointments.to_string().cyan());
        println!("  Pending Bills:         {}", remote.pending_bills.to_string().yellow());
    }
}

pub fn print_json(value: &Value) {
    emit_json(value);
}

pub fn print_symptom_answer(causes: &str) {
    heading("POSSIBLE CAUSES");
    println!("{}", causes);
    println!();
    println!(
        "{}",
        "This is not medical advice. Please consult a doctor.".dimmed()
    );
}

pub fn print_toasts(toasts: &[Toast]) {
    for toast in toasts {
        match toast.level {
            ToastLevel::Success => println!("{} {}", toast.title.green().bold(), toast.description),
            ToastLevel::Error => eprintln!("{} {}", toast.title.red().bold(), toast.description),
        }
    }
}
