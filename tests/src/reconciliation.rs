//! Reconciliation Tests
//!
//! Backend JSON rows decoded and mapped into the record store:
//! replace-not-merge on success, untouched collections on failure.

#[cfg(test)]
mod tests {
    use crate::support::{backend_doctors, fixed_clock, JsonBackend};
    use chrono::{NaiveDate, Weekday};
    use medisys_records::*;
    use medisys_shared::ToastLevel;
    use medisys_store::{Backend, RecordStore};
    use serde_json::json;

    fn store() -> RecordStore {
        RecordStore::seeded(fixed_clock())
    }

    // ========== APPOINTMENT TESTS ==========

    #[tokio::test]
    async fn test_appointments_replaced_with_display_values() {
        let backend = JsonBackend::new().respond(
            "appointments",
            json!([
                {
                    "Appointment_ID": 41,
                    "Doctor_ID": 7,
                    "Patient_ID": 3,
                    "Appointment_Date": "2024-07-22T00:00:00.000Z",
                    "Appointment_Time": "14:30:00",
                    "Status": "Scheduled",
                    "Patient_Name": "Priya Patel",
                    "Doctor_Name": "Dr. Meera Iyer",
                    "Specialization_Name": "Cardiology"
                },
                {
                    "Appointment_ID": 42,
                    "Doctor_ID": 7,
                    "Patient_ID": 4,
                    "Appointment_Date": "2024-07-01",
                    "Appointment_Time": "09:00:00",
                    "Status": "Completed"
                }
            ]),
        );

        let mut store = store();
        assert!(store.refresh_appointments(&backend).await);

        let appointments = store.appointments();
        assert_eq!(appointments.len(), 2);
        assert_eq!(appointments[0].id, "41");
        assert_eq!(appointments[0].time, "2:30 PM");
        assert_eq!(appointments[0].status, AppointmentStatus::Upcoming);
        assert_eq!(appointments[0].date, NaiveDate::from_ymd_opt(2024, 7, 22).unwrap());
        assert_eq!(appointments[1].patient_name, "Unknown Patient");
        assert_eq!(appointments[1].status, AppointmentStatus::Completed);
        assert!(appointments.iter().all(|a| !a.id.starts_with('a')));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_seed_and_toasts() {
        let backend = JsonBackend::new().fail("appointments", "Failed to fetch appointments");

        let mut store = store();
        let before = store.appointments().to_vec();
        assert!(!store.refresh_appointments(&backend).await);
        assert_eq!(store.appointments(), before.as_slice());

        let toasts = store.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].description, "Failed to fetch appointments");
    }

    // ========== DIRECTORY TESTS ==========

    #[tokio::test]
    async fn test_doctors_from_backend() {
        let backend = JsonBackend::new().respond("doctors", backend_doctors());

        let mut store = store();
        assert!(store.refresh_doctors(&backend).await);

        let doctors = store.doctors();
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].id, "7");
        assert_eq!(doctors[0].availability.first(), Some(&Weekday::Mon));
        assert_eq!(doctors[0].availability.len(), 5);
        assert_eq!(doctors[1].id, "8");
        assert!(doctors[1].availability.is_empty());
    }

    #[tokio::test]
    async fn test_doctor_failure_falls_back_to_seed() {
        let backend = JsonBackend::new().respond("doctors", backend_doctors());
        let mut store = store();
        assert!(store.refresh_doctors(&backend).await);

        let broken = JsonBackend::new().fail("doctors", "Failed to fetch doctors");
        assert!(!store.refresh_doctors(&broken).await);
        assert_eq!(store.doctors(), medisys_records::seed::doctors().as_slice());
    }

    #[tokio::test]
    async fn test_patients_last_visit_fallbacks() {
        let backend = JsonBackend::new().respond(
            "patients",
            json!([
                {
                    "Patient_ID": 3,
                    "Patient_Name": "Ravi Shankar",
                    "Gender": "M",
                    "DOB": "1970-02-01",
                    "Created_At": "2024-03-05T10:00:00Z"
                }
            ]),
        );

        let mut store = store();
        assert!(store.refresh_patients(&backend).await);
        let patient = &store.patients()[0];
        assert_eq!(patient.gender, Gender::Male);
        assert_eq!(patient.last_visit, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    // ========== STATUS TABLE TESTS ==========

    #[tokio::test]
    async fn test_bills_rooms_and_lab_tests() {
        let backend = JsonBackend::new()
            .respond(
                "billing",
                json!([
                    {
                        "Bill_ID": 9,
                        "Total_Amount": "1500.00",
                        "Final_Amount": 1350,
                        "Payment_Status": "Overdue",
                        "Created_At": "2024-07-02",
                        "Patient": { "First_Name": "Amit", "Last_Name": "Kumar" }
                    },
                    {
                        "Bill_ID": 10,
                        "Total_Amount": 200,
                        "Payment_Status": "Paid"
                    }
                ]),
            )
            .respond(
                "rooms",
                json!([
                    { "Room_ID": 1, "Room_Number": 305, "Type": "ICU", "Availability_Status": "Available" },
                    { "Room_ID": 2, "Room_Number": "G-2", "Type": "General", "Availability_Status": "Maintenance" }
                ]),
            )
            .respond(
                "lab-tests",
                json!([
                    {
                        "Test_ID": 5,
                        "Test_Name": "Lipid Panel",
                        "Test_Date": "2024-07-03",
                        "Status": "Completed",
                        "Result": "LDL 120 mg/dL",
                        "Patient": { "First_Name": "Priya", "Last_Name": "Patel" }
                    }
                ]),
            );

        let mut store = store();
        assert!(store.refresh_bills(&backend).await);
        assert!(store.refresh_rooms(&backend).await);
        assert!(store.refresh_lab_tests(&backend).await);

        // the dateless bill is skipped
        assert_eq!(store.bills().len(), 1);
        assert_eq!(store.bills()[0].amount, 1350.0);
        assert_eq!(store.bills()[0].patient_name, "Amit Kumar");
        assert_eq!(store.bills()[0].status, BillStatus::Overdue);

        assert_eq!(store.rooms()[0].room_number, "305");
        assert_eq!(store.rooms()[0].room_type, RoomType::Icu);
        assert_eq!(store.rooms()[0].status, RoomStatus::Available);
        assert_eq!(store.rooms()[1].room_type, RoomType::GeneralWard);
        assert_eq!(store.rooms()[1].status, RoomStatus::Occupied);

        assert_eq!(store.lab_tests()[0].status, LabTestStatus::Completed);
        assert_eq!(store.lab_tests()[0].patient_name, "Priya Patel");
    }

    // ========== REMOTE SURFACE TESTS ==========

    #[tokio::test]
    async fn test_reports_and_counters() {
        let backend = JsonBackend::new()
            .respond("revenue", json!([{ "Month": "2024-07", "Revenue": 125000 }]))
            .respond(
                "dashboard/stats",
                json!({ "totalPatients": 120, "totalDoctors": 14, "upcomingAppointments": 9, "pendingBills": 3 }),
            );

        let report = backend.report(medisys_store::ReportKind::Revenue).await.unwrap();
        assert_eq!(report[0]["Revenue"], 125000);

        let stats = backend.dashboard_stats().await.unwrap();
        assert_eq!(stats.pending_bills, 3);
    }
}
