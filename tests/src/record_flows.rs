//! Record Flow Tests
//!
//! Local mutations on the seeded record store, checked through the
//! role-scoped views a dashboard would render afterwards.

#[cfg(test)]
mod tests {
    use crate::support::fixed_clock;
    use medisys_records::*;
    use medisys_shared::{Role, ToastLevel};
    use medisys_store::views::{self, DashboardStats};
    use medisys_store::{Dashboard, MemoryStorage, StoreError};

    fn dashboard_as(role: Role) -> Dashboard {
        let mut dashboard = Dashboard::open(Box::new(MemoryStorage::new()), "medisys_auth", fixed_clock());
        assert!(dashboard.session.login(role, role.as_str()));
        dashboard
    }

    // ========== BILLING TESTS ==========

    #[test]
    fn test_generated_bill_reaches_patient_view() {
        let mut admin = dashboard_as(Role::Admin);
        let id = admin
            .records
            .generate_bill(NewBill {
                patient_name: "Priya Patel".to_string(),
                amount: 750.0,
                status: None,
            })
            .unwrap();

        admin.session.set_role(Role::Patient);
        let bills = admin.visible_bills();
        assert_eq!(bills.len(), 3);
        assert_eq!(bills[0].id, id);
        assert_eq!(bills[0].status, BillStatus::Pending);

        match admin.stats() {
            DashboardStats::Patient {
                pending_bills,
                total_spent,
                ..
            } => {
                assert_eq!(pending_bills, 1);
                assert_eq!(total_spent, 3200.0);
            }
            other => panic!("unexpected stats {:?}", other),
        }
    }

    #[test]
    fn test_paying_bill_moves_revenue() {
        let mut admin = dashboard_as(Role::Admin);
        let revenue = |d: &Dashboard| match d.stats() {
            DashboardStats::Admin { revenue, .. } => revenue,
            _ => f64::NAN,
        };
        assert_eq!(revenue(&admin), 3200.0);

        assert!(admin.records.pay_bill("b004"));
        assert_eq!(revenue(&admin), 7700.0);
        assert!(!admin.records.pay_bill("b004"));

        let toasts = admin.records.take_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].description, "Bill B004 marked as Paid.");
    }

    // ========== LAB TEST TESTS ==========

    #[test]
    fn test_lab_request_and_completion() {
        let mut dashboard = dashboard_as(Role::Patient);
        let name = dashboard.session.user().name.clone();
        let id = dashboard
            .records
            .request_lab_test(NewLabTest {
                patient_name: name,
                test_name: "HbA1c".to_string(),
            })
            .unwrap();
        assert_eq!(dashboard.visible_lab_tests().len(), 2);

        dashboard.session.set_role(Role::Doctor);
        assert_eq!(dashboard.visible_lab_tests().len(), 4);
        assert!(dashboard.records.complete_lab_test(&id, "5.4%").unwrap());

        let test = dashboard.records.lab_tests().iter().find(|t| t.id == id).unwrap();
        assert_eq!(test.status, LabTestStatus::Completed);
        assert_eq!(test.result.as_deref(), Some("5.4%"));
    }

    #[test]
    fn test_blank_lab_result_rejected() {
        let mut dashboard = dashboard_as(Role::Doctor);
        let err = dashboard.records.complete_lab_test("lt001", "   ").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(dashboard.records.lab_tests()[0].status, LabTestStatus::Pending);
    }

    // ========== MEDICAL HISTORY TESTS ==========

    #[test]
    fn test_two_records_same_patient_newest_first() {
        let mut dashboard = dashboard_as(Role::Doctor);
        let doctor = dashboard.session.user().name.clone();
        let record = |diagnosis: &str| NewMedicalRecord {
            patient_id: "p003".to_string(),
            date: None,
            diagnosis: diagnosis.to_string(),
            notes: String::new(),
            doctor_name: doctor.clone(),
            prescription: None,
        };

        let first = dashboard.records.add_medical_record(record("Hypertension")).unwrap();
        let second = dashboard.records.add_medical_record(record("Follow-up")).unwrap();
        assert_ne!(first, second);

        let history = views::medical_history(dashboard.records.medical_records(), "p003");
        let ids: Vec<&str> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);

        let toasts = dashboard.records.take_toasts();
        assert!(toasts.iter().all(|t| t.level == ToastLevel::Success && t.title == "Record Added"));
    }

    // ========== APPOINTMENT TESTS ==========

    #[test]
    fn test_doctor_completes_own_appointment() {
        let mut dashboard = dashboard_as(Role::Doctor);
        let before = dashboard.visible_appointments(None).len();
        assert!(dashboard.records.complete_appointment("a001").unwrap());
        assert_eq!(dashboard.visible_appointments(None).len(), before);

        let err = dashboard.records.cancel_appointment("a001").unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
    }
}
