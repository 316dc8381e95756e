//! Session Flow Tests
//!
//! Login, logout and role switching as a front end drives them, with the
//! session persisted to files between "runs".

#[cfg(test)]
mod tests {
    use crate::support::{fixed_clock, TempDir};
    use medisys_shared::{require_permission, Action, Role, Section};
    use medisys_store::{Dashboard, FileStorage, KeyValueStorage, SessionStore};

    fn open(dir: &TempDir) -> Dashboard {
        Dashboard::open(
            Box::new(FileStorage::new(dir.path().clone())),
            "medisys_auth",
            fixed_clock(),
        )
    }

    // ========== PERSISTENCE TESTS ==========

    #[test]
    fn test_login_survives_restart() {
        let dir = TempDir::new("login-restart");

        let mut first = open(&dir);
        assert!(!first.session.is_authenticated());
        assert!(first.session.login(Role::Doctor, "doctor"));
        drop(first);

        let second = open(&dir);
        assert!(second.session.is_authenticated());
        assert_eq!(second.session.role(), Role::Doctor);
        assert_eq!(second.session.user().name, "Dr. Anjali Rao");
    }

    #[test]
    fn test_logout_clears_file() {
        let dir = TempDir::new("logout");

        let mut dashboard = open(&dir);
        assert!(dashboard.session.login(Role::Admin, "admin"));
        assert!(dir.path().join("medisys_auth.json").exists());

        dashboard.session.logout();
        assert!(!dir.path().join("medisys_auth.json").exists());
        assert!(!open(&dir).session.is_authenticated());
    }

    #[test]
    fn test_wrong_password_keeps_previous_login() {
        let dir = TempDir::new("wrong-password");

        let mut dashboard = open(&dir);
        assert!(dashboard.session.login(Role::Patient, "patient"));
        assert!(!dashboard.session.login(Role::Admin, "patient"));
        assert_eq!(dashboard.session.role(), Role::Patient);

        let restored = open(&dir);
        assert_eq!(restored.session.role(), Role::Patient);
    }

    #[test]
    fn test_role_switch_is_not_persisted() {
        let dir = TempDir::new("switch");

        let mut dashboard = open(&dir);
        assert!(dashboard.session.login(Role::Patient, "patient"));
        dashboard.session.set_role(Role::Admin);
        assert_eq!(dashboard.session.user().name, "Rohan Sharma");

        let restored = open(&dir);
        assert_eq!(restored.session.role(), Role::Patient);
    }

    #[test]
    fn test_garbage_session_file_is_ignored() {
        let dir = TempDir::new("garbage");
        let mut storage = FileStorage::new(dir.path().clone());
        storage.set("medisys_auth", "{not json").unwrap();

        let session = SessionStore::open(Box::new(storage));
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), Role::Patient);
    }

    // ========== NAVIGATION TESTS ==========

    #[test]
    fn test_menu_follows_role() {
        let dir = TempDir::new("menu");
        let mut dashboard = open(&dir);

        dashboard.session.set_role(Role::Doctor);
        let labels: Vec<&str> = dashboard
            .sections()
            .iter()
            .map(|s| s.label(Role::Doctor))
            .collect();
        assert_eq!(labels, vec!["Dashboard", "Appointments", "My Patients", "Lab Results"]);

        dashboard.session.set_role(Role::Patient);
        assert!(dashboard.sections().contains(&Section::SymptomChecker));
        assert!(!dashboard.sections().contains(&Section::Reports));
    }

    #[test]
    fn test_permissions_gate_actions() {
        assert!(require_permission(Role::Admin, Action::GenerateBill).is_ok());
        assert!(require_permission(Role::Patient, Action::GenerateBill).is_err());
        assert!(require_permission(Role::Patient, Action::PayBill).is_ok());
        assert!(require_permission(Role::Doctor, Action::AddMedicalRecord).is_ok());
        assert!(require_permission(Role::Doctor, Action::ViewReports).is_err());
    }
}
