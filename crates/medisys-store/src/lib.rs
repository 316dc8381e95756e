//! MediSys Dashboard Store
//!
//! Client-side state for the hospital dashboard:
//! - `session`: active role, synthetic user and persisted login
//! - `records`: the domain collections with local mutations and backend refreshes
//! - `views`: filter/sort helpers and role-scoped lists
//! - `booking`: the guarded appointment booking flow
//! - `backend` / `wire`: the backend JSON API seam and its row shapes

pub mod backend;
pub mod booking;
pub mod dashboard;
pub mod reconcile;
pub mod records;
pub mod session;
pub mod storage;
pub mod views;
pub mod wire;

#[cfg(test)]
mod testing;

pub use backend::{Backend, BackendError, ReportKind, Resource};
pub use booking::{BookingDesk, BookingError, BookingForm, TIME_SLOTS};
pub use dashboard::Dashboard;
pub use records::{RecordStore, StoreError};
pub use session::{SessionStore, DEFAULT_SESSION_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
