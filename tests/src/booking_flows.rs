//! Booking Flow Tests
//!
//! The appointment booking form from directory lookup to the refreshed
//! appointment list.

#[cfg(test)]
mod tests {
    use crate::support::{backend_doctors, fixed_clock, JsonBackend};
    use chrono::NaiveDate;
    use medisys_shared::{Role, ToastLevel};
    use medisys_store::booking::{doctors_for_specialty, specialties};
    use medisys_store::{BookingError, BookingForm, Dashboard, MemoryStorage};
    use serde_json::json;

    async fn patient_dashboard(backend: &JsonBackend) -> Dashboard {
        let mut dashboard = Dashboard::open(Box::new(MemoryStorage::new()), "medisys_auth", fixed_clock());
        assert!(dashboard.session.login(Role::Patient, "patient"));
        assert!(dashboard.records.refresh_doctors(backend).await);
        dashboard
    }

    fn form(date: NaiveDate) -> BookingForm {
        BookingForm {
            specialty: "Cardiology".to_string(),
            doctor_id: "7".to_string(),
            date: Some(date),
            time: "02:00 PM".to_string(),
            patient_id: "3".to_string(),
            admin_id: None,
            notes: Some("Chest pain on exertion".to_string()),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========== DIRECTORY TESTS ==========

    #[tokio::test]
    async fn test_specialty_menu_from_backend_directory() {
        let backend = JsonBackend::new().respond("doctors", backend_doctors());
        let dashboard = patient_dashboard(&backend).await;

        assert_eq!(specialties(dashboard.records.doctors()), vec!["Cardiology", "Dermatology"]);
        let cardiologists = doctors_for_specialty(dashboard.records.doctors(), "Cardiology");
        assert_eq!(cardiologists.len(), 1);
        assert_eq!(cardiologists[0].name, "Dr. Meera Iyer");
    }

    // ========== SUBMISSION TESTS ==========

    #[tokio::test]
    async fn test_booking_end_to_end() {
        let backend = JsonBackend::new()
            .respond("doctors", backend_doctors())
            .respond(
                "book",
                json!({ "success": true, "message": "Appointment booked successfully", "appointment_id": 500 }),
            );
        let mut dashboard = patient_dashboard(&backend).await;

        let receipt = dashboard.book(&form(ymd(2024, 7, 25)), &backend).await.unwrap();
        assert!(receipt.success);
        assert!(!dashboard.booking.is_submitting());

        let sent = backend.bookings();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].doctor_id, 7);
        assert_eq!(sent[0].appointment_date, "2024-07-25");
        assert_eq!(sent[0].appointment_time, "14:00");

        let mine = dashboard.visible_appointments(None);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].time, "2:00 PM");
        assert_eq!(mine[0].id, "500");

        let toasts = dashboard.records.take_toasts();
        assert_eq!(toasts[0].title, "Appointment Booked!");
        assert!(toasts[0].description.contains("Dr. Meera Iyer"));
    }

    #[tokio::test]
    async fn test_past_date_never_reaches_backend() {
        let backend = JsonBackend::new().respond("doctors", backend_doctors());
        let mut dashboard = patient_dashboard(&backend).await;

        let err = dashboard.book(&form(ymd(2024, 7, 19)), &backend).await.unwrap_err();
        match err {
            BookingError::Validation(failed) => {
                assert_eq!(failed.message_for("date"), Some("Date cannot be in the past."));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(backend.bookings().is_empty());
    }

    #[tokio::test]
    async fn test_seed_doctor_cannot_be_booked() {
        let backend = JsonBackend::new();
        let mut dashboard = Dashboard::open(Box::new(MemoryStorage::new()), "medisys_auth", fixed_clock());

        let mut seeded = form(ymd(2024, 7, 25));
        seeded.doctor_id = "d001".to_string();
        let err = dashboard.book(&seeded, &backend).await.unwrap_err();
        assert!(matches!(err, BookingError::Validation(_)));
    }

    #[tokio::test]
    async fn test_backend_rejection_toasts_and_returns() {
        let backend = JsonBackend::new()
            .respond("doctors", backend_doctors())
            .fail("book", "Doctor is not available at this time");
        let mut dashboard = patient_dashboard(&backend).await;
        let appointments_before = dashboard.records.appointments().len();

        let err = dashboard.book(&form(ymd(2024, 7, 25)), &backend).await.unwrap_err();
        assert_eq!(err.to_string(), "Doctor is not available at this time");
        assert_eq!(dashboard.records.appointments().len(), appointments_before);

        let toasts = dashboard.records.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].title, "Booking Failed");
        assert!(!dashboard.booking.is_submitting());
    }
}
