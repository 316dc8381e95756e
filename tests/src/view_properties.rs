//! View Property Tests
//!
//! Filter/sort views over the seed fixtures and generated collections.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use medisys_records::seed;
    use medisys_records::*;
    use medisys_shared::Role;
    use medisys_store::views::{self, *};
    use proptest::prelude::*;

    // ========== SEED VIEW TESTS ==========

    #[test]
    fn test_dermatology_search_gupta() {
        let doctors = seed::doctors();
        let query = DoctorQuery {
            search: "Gupta".to_string(),
            specialty: Some("Dermatology".to_string()),
            sort: DoctorSort::Name,
        };
        let found = views::doctors(&doctors, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Dr. Vikram Gupta");
    }

    #[test]
    fn test_available_rooms_by_type() {
        let rooms = seed::rooms();
        let query = RoomQuery {
            status: Some(RoomStatus::Available),
            sort: RoomSort::Type,
            ..RoomQuery::default()
        };
        let numbers: Vec<&str> = views::rooms(&rooms, &query)
            .iter()
            .map(|r| r.room_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["201", "202", "101"]);
    }

    #[test]
    fn test_role_scoped_appointments() {
        let appointments = seed::appointments();
        let doctor = seed::user_for_role(Role::Doctor);
        let patient = seed::user_for_role(Role::Patient);

        let for_doctor = appointments_for(&appointments, Role::Doctor, &doctor, None);
        assert_eq!(for_doctor.len(), 1);
        assert_eq!(for_doctor[0].id, "a001");

        let for_patient = appointments_for(&appointments, Role::Patient, &patient, None);
        let ids: Vec<&str> = for_patient.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a001", "a003"]);

        let admin = seed::user_for_role(Role::Admin);
        assert_eq!(appointments_for(&appointments, Role::Admin, &admin, Some(2)).len(), 2);
    }

    // ========== PROPERTY TESTS ==========

    fn arb_patient() -> impl Strategy<Value = Patient> {
        (
            "[A-Z][a-z]{2,8} [A-Z][a-z]{2,8}",
            0i64..20_000,
            0i64..400,
            prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Other)],
        )
            .prop_map(|(name, dob_days, visit_days, gender)| {
                let epoch = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
                let recent = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
                Patient {
                    id: format!("p{}", dob_days),
                    name,
                    date_of_birth: epoch + chrono::Duration::days(dob_days),
                    gender,
                    contact: String::new(),
                    address: String::new(),
                    last_visit: recent + chrono::Duration::days(visit_days),
                    avatar: String::new(),
                }
            })
    }

    fn ids(items: &[&Patient]) -> Vec<String> {
        let mut out: Vec<String> = items.iter().map(|p| format!("{}|{}", p.id, p.name)).collect();
        out.sort();
        out
    }

    proptest! {
        #[test]
        fn prop_patient_filter_sort_commute(
            patients in prop::collection::vec(arb_patient(), 0..30),
            search in "[a-z]{0,2}",
        ) {
            let query = PatientQuery {
                search,
                gender: Some(Gender::Female),
                sort: PatientSort::LastVisit,
            };

            let mut filtered_first = filter_patients(&patients, &query);
            sort_patients(&mut filtered_first, query.sort);

            let mut all: Vec<&Patient> = patients.iter().collect();
            sort_patients(&mut all, query.sort);
            let sorted_first = filter_patients(all, &query);

            prop_assert_eq!(ids(&filtered_first), ids(&sorted_first));
            prop_assert!(filtered_first.windows(2).all(|w| w[0].last_visit >= w[1].last_visit));
        }

        #[test]
        fn prop_patient_view_is_subset(patients in prop::collection::vec(arb_patient(), 0..30)) {
            let view = patients_view(&patients);
            prop_assert!(view.len() <= patients.len());
            prop_assert!(view.iter().all(|p| p.gender == Gender::Male));
        }
    }

    fn patients_view(items: &[Patient]) -> Vec<&Patient> {
        views::patients(
            items,
            &PatientQuery {
                gender: Some(Gender::Male),
                ..PatientQuery::default()
            },
        )
    }
}
