//! Command handlers

use crate::output;
use crate::{
    AppointmentSortArg, Commands, DoctorSortArg, GenderArg, PatientSortArg, RoomSortArg, RoomTypeArg,
    StatusArg,
};
use anyhow::{bail, Result};
use colored::*;
use medisys_backend::{check_symptoms, GeminiSymptomChecker, HttpBackend};
use medisys_records::{
    AppointmentStatus, Gender, NewBill, NewLabTest, NewMedicalRecord, RoomStatus, RoomType,
};
use medisys_shared::{require_permission, Action, MedisysConfig};
use medisys_store::views::{
    self, AppointmentQuery, AppointmentSort, DoctorQuery, DoctorSort, PatientQuery, PatientSort,
    RoomQuery, RoomSort,
};
use medisys_store::{Backend, BookingError, BookingForm, Dashboard, StoreError};
use tracing::warn;

pub struct RunContext<'a> {
    pub config: &'a MedisysConfig,
    pub json: bool,
    pub remote: bool,
}

impl RunContext<'_> {
    fn backend(&self) -> Result<HttpBackend> {
        Ok(HttpBackend::new(&self.config.backend)?)
    }
}

impl From<StatusArg> for AppointmentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Upcoming => AppointmentStatus::Upcoming,
            StatusArg::Completed => AppointmentStatus::Completed,
            StatusArg::Cancelled => AppointmentStatus::Cancelled,
        }
    }
}

impl From<AppointmentSortArg> for AppointmentSort {
    fn from(arg: AppointmentSortArg) -> Self {
        match arg {
            AppointmentSortArg::DateAsc => AppointmentSort::DateAsc,
            AppointmentSortArg::DateDesc => AppointmentSort::DateDesc,
            AppointmentSortArg::Patient => AppointmentSort::PatientName,
        }
    }
}

impl From<DoctorSortArg> for DoctorSort {
    fn from(arg: DoctorSortArg) -> Self {
        match arg {
            DoctorSortArg::Name => DoctorSort::Name,
            DoctorSortArg::Availability => DoctorSort::Availability,
        }
    }
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
        }
    }
}

impl From<PatientSortArg> for PatientSort {
    fn from(arg: PatientSortArg) -> Self {
        match arg {
            PatientSortArg::Name => PatientSort::Name,
            PatientSortArg::Dob => PatientSort::DateOfBirth,
            PatientSortArg::LastVisit => PatientSort::LastVisit,
        }
    }
}

impl From<RoomTypeArg> for RoomType {
    fn from(arg: RoomTypeArg) -> Self {
        match arg {
            RoomTypeArg::General => RoomType::GeneralWard,
            RoomTypeArg::Private => RoomType::Private,
            RoomTypeArg::Icu => RoomType::Icu,
        }
    }
}

impl From<RoomSortArg> for RoomSort {
    fn from(arg: RoomSortArg) -> Self {
        match arg {
            RoomSortArg::Number => RoomSort::RoomNumber,
            RoomSortArg::Type => RoomSort::Type,
            RoomSortArg::Status => RoomSort::Status,
        }
    }
}

fn ensure_logged_in(dashboard: &Dashboard) -> Result<()> {
    if !dashboard.session.is_authenticated() {
        bail!("not logged in; run `medisys login <role> --password <password>` first");
    }
    Ok(())
}

/// Store errors carry field messages the user should see verbatim
fn report_store_error(err: StoreError) -> anyhow::Error {
    match err {
        StoreError::Validation(failed) => {
            for e in &failed.0 {
                eprintln!("  {} {}", format!("{}:", e.field).yellow(), e.message);
            }
            anyhow::anyhow!("validation failed")
        }
        other => other.into(),
    }
}

pub async fn run(command: Commands, dashboard: &mut Dashboard, ctx: &RunContext<'_>) -> Result<()> {
    match command {
        Commands::Login { role, password } => {
            if dashboard.session.login(role, &password) {
                println!(
                    "{} Logged in as {} ({})",
                    "✓".green().bold(),
                    dashboard.session.user().name.cyan(),
                    role
                );
                Ok(())
            } else {
                bail!("Invalid password for role '{}'", role)
            }
        }
        Commands::Logout => {
            dashboard.session.logout();
            println!("Logged out.");
            Ok(())
        }
        Commands::Whoami => {
            output::print_session(&dashboard.session, ctx.json);
            Ok(())
        }
        Commands::SwitchRole { role } => {
            ensure_logged_in(dashboard)?;
            dashboard.session.set_role(role);
            output::print_session(&dashboard.session, ctx.json);
            Ok(())
        }
        command => {
            ensure_logged_in(dashboard)?;
            if ctx.remote {
                let backend = ctx.backend()?;
                dashboard.sync(&backend).await;
            }
            run_authenticated(command, dashboard, ctx).await
        }
    }
}

async fn run_authenticated(command: Commands, dashboard: &mut Dashboard, ctx: &RunContext<'_>) -> Result<()> {
    let role = dashboard.session.role();

    match command {
        Commands::Appointments {
            search,
            status,
            sort,
            limit,
        } => {
            let query = AppointmentQuery {
                search,
                status: status.map(Into::into),
                sort: sort.into(),
            };
            let visible = dashboard.visible_appointments(None);
            let mut items = views::filter_appointments(visible, &query);
            views::sort_appointments(&mut items, query.sort);
            if let Some(limit) = limit {
                items.truncate(limit);
            }
            output::print_appointments(&items, ctx.json);
        }
        Commands::Cancel { id } => {
            require_permission(role, Action::CancelAppointment)?;
            let changed = dashboard.records.cancel_appointment(&id).map_err(report_store_error)?;
            output::print_change(changed, &format!("Appointment {} cancelled", id));
        }
        Commands::Complete { id } => {
            require_permission(role, Action::CompleteAppointment)?;
            let changed = dashboard.records.complete_appointment(&id).map_err(report_store_error)?;
            output::print_change(changed, &format!("Appointment {} completed", id));
        }
        Commands::Doctors {
            search,
            specialty,
            sort,
        } => {
            let query = DoctorQuery {
                search,
                specialty,
                sort: sort.into(),
            };
            output::print_doctors(&views::doctors(dashboard.records.doctors(), &query), ctx.json);
        }
        Commands::Patients { search, gender, sort } => {
            let query = PatientQuery {
                search,
                gender: gender.map(Into::into),
                sort: sort.into(),
            };
            output::print_patients(&views::patients(dashboard.records.patients(), &query), ctx.json);
        }
        Commands::Rooms {
            search,
            available,
            room_type,
            sort,
        } => {
            let query = RoomQuery {
                search,
                status: available.then_some(RoomStatus::Available),
                room_type: room_type.map(Into::into),
                sort: sort.into(),
            };
            output::print_rooms(&views::rooms(dashboard.records.rooms(), &query), ctx.json);
        }
        Commands::Bills => output::print_bills(&dashboard.visible_bills(), ctx.json),
        Commands::GenerateBill { patient_name, amount } => {
            require_permission(role, Action::GenerateBill)?;
            let id = dashboard
                .records
                .generate_bill(NewBill {
                    patient_name,
                    amount,
                    status: None,
                })
                .map_err(report_store_error)?;
            if ctx.remote {
                let backend = ctx.backend()?;
                dashboard.records.push_bill(&id, &backend).await;
            }
        }
        Commands::Pay { id } => {
            require_permission(role, Action::PayBill)?;
            if !dashboard.records.pay_bill(&id) {
                println!("Nothing to pay for bill {}", id);
            }
        }
        Commands::LabTests => output::print_lab_tests(&dashboard.visible_lab_tests(), ctx.json),
        Commands::RequestTest { test_name } => {
            require_permission(role, Action::RequestLabTest)?;
            let patient_name = dashboard.session.user().name.clone();
            dashboard
                .records
                .request_lab_test(NewLabTest {
                    patient_name,
                    test_name,
                })
                .map_err(report_store_error)?;
        }
        Commands::CompleteTest { id, result } => {
            require_permission(role, Action::CompleteLabTest)?;
            let changed = dashboard
                .records
                .complete_lab_test(&id, &result)
                .map_err(report_store_error)?;
            if !changed {
                println!("No pending lab test {}", id);
            }
        }
        Commands::History { patient_id } => {
            let history = views::medical_history(dashboard.records.medical_records(), &patient_id);
            output::print_history(&history, ctx.json);
        }
        Commands::AddRecord {
            patient_id,
            diagnosis,
            notes,
            prescription,
            date,
        } => {
            require_permission(role, Action::AddMedicalRecord)?;
            let doctor_name = dashboard.session.user().name.clone();
            dashboard
                .records
                .add_medical_record(NewMedicalRecord {
                    patient_id,
                    date,
                    diagnosis,
                    notes,
                    doctor_name,
                    prescription,
                })
                .map_err(report_store_error)?;
        }
        Commands::Stats => {
            let remote = if ctx.remote {
                match ctx.backend()?.dashboard_stats().await {
                    Ok(stats) => Some(stats),
                    Err(e) => {
                        warn!(error = %e, "backend stats unavailable");
                        None
                    }
                }
            } else {
                None
            };
            output::print_stats(&dashboard.stats(), remote.as_ref(), ctx.json);
        }
        Commands::Book {
            specialty,
            doctor,
            date,
            time,
            patient,
            notes,
        } => {
            require_permission(role, Action::BookAppointment)?;
            let backend = ctx.backend()?;
            if !ctx.remote {
                // Booking needs backend doctor ids
                dashboard.records.refresh_doctors(&backend).await;
            }
            let form = BookingForm {
                specialty,
                doctor_id: doctor,
                date: Some(date),
                time,
                patient_id: patient,
                admin_id: None,
                notes,
            };
            match dashboard.book(&form, &backend).await {
                Ok(receipt) => {
                    if !receipt.message.is_empty() {
                        println!("{}", receipt.message);
                    }
                }
                Err(BookingError::Validation(failed)) => {
                    for e in &failed.0 {
                        eprintln!("  {} {}", format!("{}:", e.field).yellow(), e.message);
                    }
                    bail!("booking form is incomplete");
                }
                Err(e) => bail!("{}", e),
            }
        }
        Commands::Report { kind } => {
            require_permission(role, Action::ViewReports)?;
            let backend = ctx.backend()?;
            match backend.report(kind).await {
                Ok(report) => output::print_json(&report),
                Err(e) => bail!("Failed to load {} report: {}", kind, e.user_message()),
            }
        }
        Commands::Symptoms { description } => {
            require_permission(role, Action::CheckSymptoms)?;
            let checker = GeminiSymptomChecker::from_config(&ctx.config.symptom_checker);
            let answer = match checker {
                Ok(checker) => check_symptoms(&checker, &description).await,
                Err(e) => Err(e),
            };
            match answer {
                Ok(causes) => output::print_symptom_answer(&causes),
                Err(e) => bail!("{}", e.user_message()),
            }
        }
        Commands::Sync => {
            let backend = ctx.backend()?;
            let ok = dashboard.sync(&backend).await;
            println!("Refreshed {}/6 collections from {}", ok, backend.base_url());
        }
        // handled in `run`
        Commands::Login { .. } | Commands::Logout | Commands::Whoami | Commands::SwitchRole { .. } => {}
    }
    Ok(())
}
