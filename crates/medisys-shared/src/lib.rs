//! MediSys Shared Utilities
//!
//! This crate provides common functionality for all MediSys crates:
//! - Role-based access control and navigation sections
//! - Audit logging of store mutations
//! - Toast notifications
//! - Field validation with per-field error codes
//! - Credential digests
//! - Clock, id generation, configuration and telemetry

use serde::{Deserialize, Serialize};

// Re-export commonly used items
pub use access_control::*;
pub use audit::*;
pub use credentials::*;
pub use types::*;
pub use validation::*;

pub mod clock;
pub mod config;
pub mod telemetry;

pub use clock::{Clock, FixedClock, IdGenerator, SystemClock};
pub use config::MedisysConfig;

/// Access control module - which sections and actions each role may use
pub mod access_control {
    use super::*;
    use std::fmt;
    use std::str::FromStr;

    /// The three dashboard roles
    #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
    #[serde(rename_all = "lowercase")]
    pub enum Role {
        Admin,
        Doctor,
        Patient,
    }

    impl Role {
        pub const ALL: [Role; 3] = [Role::Admin, Role::Doctor, Role::Patient];

        pub fn as_str(&self) -> &'static str {
            match self {
                Role::Admin => "admin",
                Role::Doctor => "doctor",
                Role::Patient => "patient",
            }
        }

        /// Navigation sections shown to this role, in menu order
        pub fn sections(&self) -> &'static [Section] {
            match self {
                Role::Admin => &[
                    Section::Dashboard,
                    Section::Appointments,
                    Section::Billing,
                    Section::Rooms,
                    Section::LabTests,
                    Section::Reports,
                ],
                Role::Doctor => &[
                    Section::Dashboard,
                    Section::Appointments,
                    Section::Patients,
                    Section::LabTests,
                ],
                Role::Patient => &[
                    Section::Dashboard,
                    Section::SymptomChecker,
                    Section::Appointments,
                    Section::Billing,
                    Section::LabTests,
                ],
            }
        }

        /// Whether this role may perform the given action
        pub fn can(&self, action: Action) -> bool {
            action.allowed_roles().contains(self)
        }
    }

    impl fmt::Display for Role {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Error returned when parsing an unknown role tag
    #[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
    #[error("Unknown role '{0}' (expected admin, doctor or patient)")]
    pub struct UnknownRole(pub String);

    impl FromStr for Role {
        type Err = UnknownRole;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_ascii_lowercase().as_str() {
                "admin" => Ok(Role::Admin),
                "doctor" => Ok(Role::Doctor),
                "patient" => Ok(Role::Patient),
                _ => Err(UnknownRole(s.to_string())),
            }
        }
    }

    /// Dashboard navigation sections
    #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
    pub enum Section {
        Dashboard,
        Appointments,
        Patients,
        Billing,
        Rooms,
        LabTests,
        Reports,
        SymptomChecker,
    }

    impl Section {
        /// Menu label; a few sections are worded per role
        pub fn label(&self, role: Role) -> &'static str {
            match (self, role) {
                (Section::Dashboard, _) => "Dashboard",
                (Section::Appointments, _) => "Appointments",
                (Section::Patients, Role::Doctor) => "My Patients",
                (Section::Patients, _) => "Patients",
                (Section::Billing, _) => "Billing",
                (Section::Rooms, _) => "Rooms",
                (Section::LabTests, Role::Doctor) => "Lab Results",
                (Section::LabTests, Role::Patient) => "My Lab Tests",
                (Section::LabTests, Role::Admin) => "Lab Tests",
                (Section::Reports, _) => "Reports",
                (Section::SymptomChecker, _) => "Symptom Checker",
            }
        }

        pub fn path(&self, role: Role) -> String {
            match self {
                Section::Dashboard => format!("/{}", role.as_str()),
                Section::Appointments => "/appointments".to_string(),
                Section::Patients => "/patients".to_string(),
                Section::Billing => "/billing".to_string(),
                Section::Rooms => "/rooms".to_string(),
                Section::LabTests => "/lab-tests".to_string(),
                Section::Reports => "/reports".to_string(),
                Section::SymptomChecker => "/symptom-checker".to_string(),
            }
        }
    }

    /// Actions that change or reveal dashboard data
    #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
    pub enum Action {
        BookAppointment,
        CancelAppointment,
        CompleteAppointment,
        GenerateBill,
        PayBill,
        RequestLabTest,
        CompleteLabTest,
        AddMedicalRecord,
        ViewReports,
        CheckSymptoms,
    }

    impl Action {
        pub fn allowed_roles(&self) -> &'static [Role] {
            match self {
                Action::BookAppointment => &[Role::Patient, Role::Admin],
                Action::CancelAppointment => &[Role::Patient, Role::Doctor, Role::Admin],
                Action::CompleteAppointment => &[Role::Doctor, Role::Admin],
                Action::GenerateBill => &[Role::Admin],
                Action::PayBill => &[Role::Patient, Role::Admin],
                Action::RequestLabTest => &[Role::Patient],
                Action::CompleteLabTest => &[Role::Doctor, Role::Admin],
                Action::AddMedicalRecord => &[Role::Doctor, Role::Admin],
                Action::ViewReports => &[Role::Admin],
                Action::CheckSymptoms => &[Role::Patient],
            }
        }
    }

    /// Error returned when a role attempts an action it does not hold
    #[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
    #[error("Access denied: role '{role}' cannot perform {action:?}")]
    pub struct AccessDenied {
        pub role: Role,
        pub action: Action,
    }

    /// Check a role against an action before invoking a store mutation.
    ///
    /// The stores themselves never check roles; front ends call this first.
    pub fn require_permission(role: Role, action: Action) -> Result<(), AccessDenied> {
        if role.can(action) {
            Ok(())
        } else {
            tracing::warn!(target: audit::AUDIT_TARGET, role = %role, ?action, "access denied");
            Err(AccessDenied { role, action })
        }
    }
}

/// Audit logging module - records every session and store mutation
pub mod audit {
    use super::*;
    use std::fmt;

    /// Tracing target used for audit events
    pub const AUDIT_TARGET: &str = "medisys::audit";

    /// Kinds of audited mutations
    #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
    pub enum AuditAction {
        Login,
        LoginRejected,
        Logout,
        RoleSwitched,
        SessionRestored,
        AppointmentAdded,
        AppointmentBooked,
        AppointmentStatusChanged,
        BillGenerated,
        BillPaid,
        LabTestRequested,
        LabTestCompleted,
        MedicalRecordAdded,
        CollectionReplaced,
    }

    impl fmt::Display for AuditAction {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let name = match self {
                AuditAction::Login => "login",
                AuditAction::LoginRejected => "login_rejected",
                AuditAction::Logout => "logout",
                AuditAction::RoleSwitched => "role_switched",
                AuditAction::SessionRestored => "session_restored",
                AuditAction::AppointmentAdded => "appointment_added",
                AuditAction::AppointmentBooked => "appointment_booked",
                AuditAction::AppointmentStatusChanged => "appointment_status_changed",
                AuditAction::BillGenerated => "bill_generated",
                AuditAction::BillPaid => "bill_paid",
                AuditAction::LabTestRequested => "lab_test_requested",
                AuditAction::LabTestCompleted => "lab_test_completed",
                AuditAction::MedicalRecordAdded => "medical_record_added",
                AuditAction::CollectionReplaced => "collection_replaced",
            };
            f.write_str(name)
        }
    }

    /// Emit an audit event for a mutation of `subject` (a record id, role or collection name)
    pub fn log_mutation(action: AuditAction, subject: &str) {
        tracing::info!(target: AUDIT_TARGET, %action, subject, "audit");
    }
}

/// Common types used across crates
pub mod types {
    use super::*;

    /// Severity of a transient notification
    #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
    pub enum ToastLevel {
        Success,
        Error,
    }

    /// Transient user-visible notification raised by a store operation
    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
    pub struct Toast {
        pub level: ToastLevel,
        pub title: String,
        pub description: String,
    }

    impl Toast {
        pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
            Self {
                level: ToastLevel::Success,
                title: title.into(),
                description: description.into(),
            }
        }

        pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
            Self {
                level: ToastLevel::Error,
                title: title.into(),
                description: description.into(),
            }
        }
    }
}

/// Credential digests for the fixed per-role secrets
pub mod credentials {
    use sha2::{Digest, Sha256};
    use std::fmt;

    /// SHA-256 of arbitrary bytes
    pub fn sha256_hash(input: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(input);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    /// Constant-time comparison to prevent timing attacks
    pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
        if a.len() != b.len() {
            return false;
        }

        let mut result = 0u8;
        for (x, y) in a.iter().zip(b.iter()) {
            result |= x ^ y;
        }
        result == 0
    }

    /// Stored digest of a secret; the plaintext is never kept
    #[derive(Clone, PartialEq, Eq)]
    pub struct CredentialDigest([u8; 32]);

    impl CredentialDigest {
        pub fn from_secret(secret: &str) -> Self {
            CredentialDigest(sha256_hash(secret.as_bytes()))
        }

        pub fn verify(&self, supplied: &str) -> bool {
            constant_time_compare(&self.0, &sha256_hash(supplied.as_bytes()))
        }
    }

    impl fmt::Debug for CredentialDigest {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("CredentialDigest(<redacted>)")
        }
    }
}

/// Field validation with error codes, collected before any mutation
pub mod validation {
    use super::*;

    /// Validation error with detailed context
    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
    pub struct ValidationError {
        pub field: String,
        pub message: String,
        pub code: ValidationErrorCode,
    }

    /// Specific validation error codes for programmatic handling
    #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
    pub enum ValidationErrorCode {
        Required,
        InvalidFormat,
        OutOfRange,
        TooShort,
        InvalidReference,
    }

    impl std::fmt::Display for ValidationError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}: {} ({:?})", self.field, self.message, self.code)
        }
    }

    /// All field errors of a failed validation
    #[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
    #[error("Validation failed: {}", join_errors(.0))]
    pub struct ValidationFailed(pub Vec<ValidationError>);

    impl ValidationFailed {
        /// First message recorded for a field, for inline display
        pub fn message_for(&self, field: &str) -> Option<&str> {
            self.0
                .iter()
                .find(|e| e.field == field)
                .map(|e| e.message.as_str())
        }
    }

    fn join_errors(errors: &[ValidationError]) -> String {
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Validation result that can accumulate multiple errors
    #[derive(Clone, Debug, Default)]
    pub struct ValidationResult {
        pub errors: Vec<ValidationError>,
    }

    impl ValidationResult {
        pub fn new() -> Self {
            Self { errors: Vec::new() }
        }

        pub fn add_error(&mut self, field: &str, message: &str, code: ValidationErrorCode) {
            self.errors.push(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code,
            });
        }

        pub fn is_valid(&self) -> bool {
            self.errors.is_empty()
        }

        pub fn has_error(&self, field: &str) -> bool {
            self.errors.iter().any(|e| e.field == field)
        }

        pub fn into_result(self) -> Result<(), ValidationFailed> {
            if self.is_valid() {
                Ok(())
            } else {
                Err(ValidationFailed(self.errors))
            }
        }

        pub fn merge(&mut self, other: ValidationResult) {
            self.errors.extend(other.errors);
        }
    }

    /// Require a non-blank value
    pub fn validate_required(value: &str, field: &str, message: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        if value.trim().is_empty() {
            result.add_error(field, message, ValidationErrorCode::Required);
        }
        result
    }

    /// Require at least `min` characters after trimming
    pub fn validate_min_length(value: &str, min: usize, field: &str, message: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        if value.trim().chars().count() < min {
            result.add_error(field, message, ValidationErrorCode::TooShort);
        }
        result
    }

    /// Validate a monetary amount (finite, not negative)
    pub fn validate_amount(amount: f64, field: &str) -> ValidationResult {
        let mut result = ValidationResult::new();
        if !amount.is_finite() {
            result.add_error(field, "Amount must be a number", ValidationErrorCode::InvalidFormat);
        } else if amount < 0.0 {
            result.add_error(field, "Amount cannot be negative", ValidationErrorCode::OutOfRange);
        }
        result
    }
}
