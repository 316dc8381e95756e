//! Application root holding both stores

use crate::backend::Backend;
use crate::booking::{BookingDesk, BookingError, BookingForm};
use crate::records::RecordStore;
use crate::session::SessionStore;
use crate::storage::KeyValueStorage;
use crate::views::{self, DashboardStats, StatsInput};
use crate::wire::BookingReceipt;
use medisys_records::{Appointment, Bill, LabTest};
use medisys_shared::{Clock, Section};
use std::sync::Arc;

/// Owned by the front end and passed around by reference
#[derive(Debug)]
pub struct Dashboard {
    pub session: SessionStore,
    pub records: RecordStore,
    pub booking: BookingDesk,
}

impl Dashboard {
    /// Restore the session from storage and start from the seed fixtures
    pub fn open(storage: Box<dyn KeyValueStorage>, session_key: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            session: SessionStore::open_with_key(storage, session_key),
            records: RecordStore::seeded(clock),
            booking: BookingDesk::new(),
        }
    }

    pub fn sections(&self) -> &'static [Section] {
        self.session.role().sections()
    }

    pub fn visible_appointments(&self, limit: Option<usize>) -> Vec<&Appointment> {
        views::appointments_for(
            self.records.appointments(),
            self.session.role(),
            self.session.user(),
            limit,
        )
    }

    pub fn visible_bills(&self) -> Vec<&Bill> {
        views::bills_for(self.records.bills(), self.session.role(), self.session.user())
    }

    pub fn visible_lab_tests(&self) -> Vec<&LabTest> {
        views::lab_tests_for(self.records.lab_tests(), self.session.role(), self.session.user())
    }

    pub fn stats(&self) -> DashboardStats {
        let input = StatsInput {
            patients: self.records.patients(),
            doctors: self.records.doctors(),
            appointments: self.records.appointments(),
            bills: self.records.bills(),
        };
        views::dashboard_stats(&input, self.session.role(), self.session.user(), self.records.today())
    }

    pub async fn book(
        &mut self,
        form: &BookingForm,
        backend: &dyn Backend,
    ) -> Result<BookingReceipt, BookingError> {
        self.booking.submit(form, &mut self.records, backend).await
    }

    /// Refresh every backend-backed collection; returns how many succeeded
    pub async fn sync(&mut self, backend: &dyn Backend) -> usize {
        let results = [
            self.records.refresh_doctors(backend).await,
            self.records.refresh_patients(backend).await,
            self.records.refresh_appointments(backend).await,
            self.records.refresh_bills(backend).await,
            self.records.refresh_lab_tests(backend).await,
            self.records.refresh_rooms(backend).await,
        ];
        results.iter().filter(|ok| **ok).count()
    }
}
