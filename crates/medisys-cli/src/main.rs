//! MediSys command-line dashboard
//!
//! Session state persists between runs; the record collections start from the
//! seed fixtures on every run and can be pulled from the backend with
//! `--remote` or `sync`.

mod commands;
mod output;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use medisys_shared::telemetry::init_logging;
use medisys_shared::{MedisysConfig, Role, SystemClock};
use medisys_store::{Dashboard, FileStorage, ReportKind};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "medisys")]
#[command(about = "Role-based hospital dashboard")]
struct Cli {
    /// Configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pull every collection from the backend before running the command
    #[arg(long, global = true)]
    remote: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in as a role
    Login {
        role: Role,
        /// The role's password
        #[arg(short, long)]
        password: String,
    },

    /// Log out and clear the saved session
    Logout,

    /// Show the active role, user and menu
    Whoami,

    /// Act as another role for this invocation only, without a password check.
    /// The saved login is not changed.
    SwitchRole { role: Role },

    /// List appointments visible to the active role
    Appointments {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long, value_enum, default_value = "date-desc")]
        sort: AppointmentSortArg,
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Cancel an upcoming appointment
    Cancel { id: String },

    /// Mark an upcoming appointment completed
    Complete { id: String },

    /// List doctors
    Doctors {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long, value_enum, default_value = "name")]
        sort: DoctorSortArg,
    },

    /// List patients
    Patients {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long, value_enum)]
        gender: Option<GenderArg>,
        #[arg(long, value_enum, default_value = "name")]
        sort: PatientSortArg,
    },

    /// List rooms
    Rooms {
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only rooms without an occupant
        #[arg(long)]
        available: bool,
        #[arg(long, value_enum)]
        room_type: Option<RoomTypeArg>,
        #[arg(long, value_enum, default_value = "number")]
        sort: RoomSortArg,
    },

    /// List bills visible to the active role
    Bills,

    /// Generate a bill for a patient; with --remote, also post it to the backend
    GenerateBill {
        patient_name: String,
        amount: f64,
    },

    /// Pay a pending or overdue bill
    Pay { id: String },

    /// List lab tests visible to the active role
    LabTests,

    /// Request a lab test for the current patient
    RequestTest { test_name: String },

    /// Record the result of a pending lab test
    CompleteTest {
        id: String,
        #[arg(short, long)]
        result: String,
    },

    /// Medical history of a patient, most recent first
    History { patient_id: String },

    /// Add a medical record for a patient
    AddRecord {
        patient_id: String,
        #[arg(short, long)]
        diagnosis: String,
        #[arg(short, long, default_value = "")]
        notes: String,
        #[arg(long)]
        prescription: Option<String>,
        /// Visit date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Dashboard statistics for the active role; with --remote, the backend counters too
    Stats,

    /// Book an appointment through the backend
    Book {
        #[arg(long)]
        specialty: String,
        #[arg(long)]
        doctor: String,
        #[arg(long)]
        date: NaiveDate,
        /// One of the offered slots, e.g. "10:00 AM"
        #[arg(long)]
        time: String,
        /// Backend patient id
        #[arg(long)]
        patient: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Fetch a backend report
    Report { kind: ReportKind },

    /// Ask the symptom checker about a list of symptoms
    Symptoms { description: String },

    /// Refresh every collection from the backend
    Sync,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Upcoming,
    Completed,
    Cancelled,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AppointmentSortArg {
    DateAsc,
    DateDesc,
    Patient,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DoctorSortArg {
    Name,
    Availability,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PatientSortArg {
    Name,
    Dob,
    LastVisit,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoomTypeArg {
    General,
    Private,
    Icu,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RoomSortArg {
    Number,
    Type,
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = MedisysConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Err(problems) = config.validate() {
        bail!("invalid configuration: {}", problems.join("; "));
    }
    init_logging(&config.logging)?;

    let storage = FileStorage::new(&config.session.storage_dir);
    let mut dashboard = Dashboard::open(Box::new(storage), &config.session.key, Arc::new(SystemClock));

    let ctx = commands::RunContext {
        config: &config,
        json: cli.json,
        remote: cli.remote,
    };
    let outcome = commands::run(cli.command, &mut dashboard, &ctx).await;

    output::print_toasts(&dashboard.records.take_toasts());
    outcome
}
