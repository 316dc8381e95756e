//! Backend JSON API seam
//!
//! The store talks to the backend only through this trait. The HTTP client
//! lives in `medisys-backend`; tests use in-memory fakes.

use crate::wire::*;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

/// Every backend failure reduced to one human-readable message
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Transport failure or non-success status without an error payload
    #[error("HTTP error: {message}")]
    Http {
        status: Option<u16>,
        message: String,
    },
    /// The backend answered with `{ "error": "..." }`
    #[error("{0}")]
    Remote(String),
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Message suitable for a toast or inline form error
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Remote(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Collections that accept `POST` with a raw JSON body
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Patients,
    Doctors,
    Billing,
    LabTests,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Patients => "patients",
            Resource::Doctors => "doctors",
            Resource::Billing => "billing",
            Resource::LabTests => "lab-tests",
        }
    }
}

/// Canned backend reports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    DoctorPerformance,
    PatientSummary,
    DepartmentStats,
    Revenue,
    RoomOccupancy,
    DiseasePrevalence,
}

impl ReportKind {
    pub const ALL: [ReportKind; 6] = [
        ReportKind::DoctorPerformance,
        ReportKind::PatientSummary,
        ReportKind::DepartmentStats,
        ReportKind::Revenue,
        ReportKind::RoomOccupancy,
        ReportKind::DiseasePrevalence,
    ];

    /// Value of the `type` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            ReportKind::DoctorPerformance => "doctor-performance",
            ReportKind::PatientSummary => "patient-summary",
            ReportKind::DepartmentStats => "department-stats",
            ReportKind::Revenue => "revenue",
            ReportKind::RoomOccupancy => "room-occupancy",
            ReportKind::DiseasePrevalence => "disease-prevalence",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown report type '{0}'")]
pub struct UnknownReport(pub String);

impl FromStr for ReportKind {
    type Err = UnknownReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportKind::ALL
            .into_iter()
            .find(|k| k.as_query() == s.trim())
            .ok_or_else(|| UnknownReport(s.to_string()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub available_only: bool,
    pub specialization: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub room_type: Option<String>,
    pub available_only: bool,
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<WireAppointment>, BackendError>;

    async fn book_appointment(&self, request: &BookingRequest) -> Result<BookingReceipt, BackendError>;

    async fn list_doctors(&self, filter: &DoctorFilter) -> Result<Vec<WireDoctor>, BackendError>;

    async fn list_patients(&self) -> Result<Vec<WirePatient>, BackendError>;

    async fn list_bills(&self) -> Result<Vec<WireBill>, BackendError>;

    async fn list_lab_tests(&self) -> Result<Vec<WireLabTest>, BackendError>;

    async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<WireRoom>, BackendError>;

    /// Create a record from a raw JSON body; returns the created row
    async fn create(
        &self,
        resource: Resource,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, BackendError>;

    async fn report(&self, kind: ReportKind) -> Result<serde_json::Value, BackendError>;

    async fn dashboard_stats(&self) -> Result<BackendStats, BackendError>;

    fn name(&self) -> &str;
}
