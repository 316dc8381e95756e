//! MediSys Domain Records
//!
//! Plain record types for patients, doctors, appointments, bills, lab tests,
//! medical records and rooms, plus the validation applied before a record
//! reaches the store and the static fixtures the dashboard starts from.

pub mod seed;
pub mod types;
pub mod validation;

pub use types::*;
pub use validation::*;
