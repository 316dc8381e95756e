//! MediSys Test Suite
//!
//! Scenario tests across the workspace crates:
//! - Login, role switching and session restore
//! - Local record mutations with toasts and audit
//! - Reconciliation of backend JSON into domain records
//! - The appointment booking flow end to end
//! - Role-scoped views and filter/sort properties

pub mod support;

pub mod session_flows;
pub mod record_flows;
pub mod reconciliation;
pub mod booking_flows;
pub mod view_properties;
