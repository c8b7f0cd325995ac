use crate::core::error::PortalError;
use crate::models::registration::RegistrationForm;
use crate::models::role::Role;
use crate::models::session::Session;
use crate::portal::dashboard::Dashboard;
use crate::stores::roster::Roster;
use crate::validation::email::is_institutional_email;
use crate::validation::registration::validate_registration;
use serde::Serialize;
use std::sync::Arc;

/// Login state of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Landing page, optionally showing why the last login was refused
    Anonymous { error: Option<PortalError> },
    Authenticated(Session),
}

impl Default for AuthState {
    fn default() -> Self {
        AuthState::Anonymous { error: None }
    }
}

/// Flow the caller should present after a successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NextFlow {
    Login,
}

/// Session and role router for a single page.
///
/// Owns the page's login state and borrows the process-wide roster. All
/// operations are synchronous and leave the state untouched on error.
pub struct Portal {
    roster: Arc<Roster>,
    state: AuthState,
}

impl Portal {
    pub fn new(roster: Arc<Roster>) -> Self {
        Self {
            roster,
            state: AuthState::default(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Anonymous { .. } => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Error left by the last refused login, if the page is still anonymous
    pub fn last_error(&self) -> Option<&PortalError> {
        match &self.state {
            AuthState::Anonymous { error } => error.as_ref(),
            AuthState::Authenticated(_) => None,
        }
    }

    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    /// Sign in as `role`.
    ///
    /// The password is only checked for presence. The display name comes
    /// from the matching roster entry when there is one, otherwise from the
    /// local part of the email.
    pub fn login(&mut self, role: Role, email: &str, password: &str) -> Result<Session, PortalError> {
        if let AuthState::Authenticated(session) = &self.state {
            return Err(PortalError::AlreadyAuthenticated(session.role));
        }

        let checked = if email.is_empty() || password.is_empty() {
            Err(PortalError::MissingCredentials)
        } else if !is_institutional_email(email) {
            Err(PortalError::InvalidEmail)
        } else {
            Ok(())
        };

        if let Err(e) = checked {
            self.state = AuthState::Anonymous {
                error: Some(e.clone()),
            };
            return Err(e);
        }

        let profile = self.roster.find(email, role).map(|record| (*record).clone());
        let session = Session::new(role, email.to_string(), profile);
        self.state = AuthState::Authenticated(session.clone());

        Ok(session)
    }

    /// Validate a registration and append it to the roster.
    ///
    /// Does not sign the user in.
    pub fn register(&mut self, form: RegistrationForm) -> Result<NextFlow, PortalError> {
        let record = validate_registration(form)?;
        self.roster
            .append(record)
            .ok_or(PortalError::RegistrationClosed)?;
        Ok(NextFlow::Login)
    }

    /// Drop the session. Always succeeds, also when already anonymous.
    pub fn logout(&mut self) {
        self.state = AuthState::default();
    }

    /// Shell for the signed-in role, or `None` on the landing page
    pub fn dashboard(&self) -> Option<Dashboard> {
        self.session().map(Dashboard::for_session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::registration::tests::{alumni_form, faculty_form, student_form};

    const EMAIL: &str = "23pa1a12e7@vishnu.edu.in";

    fn portal() -> Portal {
        Portal::new(Arc::new(Roster::new()))
    }

    #[test]
    fn test_initial_state_is_anonymous() {
        let portal = portal();
        assert_eq!(*portal.state(), AuthState::Anonymous { error: None });
        assert!(!portal.is_authenticated());
        assert!(portal.dashboard().is_none());
    }

    #[test]
    fn test_login_without_registration_uses_local_part() {
        let mut portal = portal();
        let session = portal.login(Role::Student, EMAIL, "pw").unwrap();

        assert_eq!(session.role, Role::Student);
        assert_eq!(session.email, EMAIL);
        assert_eq!(session.display_name, "23pa1a12e7");
        assert!(session.profile.is_none());
        assert_eq!(portal.session(), Some(&session));
    }

    #[test]
    fn test_login_with_registration_uses_full_name() {
        let mut portal = portal();
        portal.register(alumni_form()).unwrap();

        let session = portal
            .login(Role::Alumni, "16pa1a05e7@vishnu.edu.in", "whatever")
            .unwrap();
        assert_eq!(session.display_name, "Sarah Johnson");
    }

    #[test]
    fn test_login_with_other_role_ignores_registration() {
        let mut portal = portal();
        portal.register(alumni_form()).unwrap();

        let session = portal
            .login(Role::Faculty, "16pa1a05e7@vishnu.edu.in", "whatever")
            .unwrap();
        assert_eq!(session.display_name, "16pa1a05e7");
        assert!(session.profile.is_none());
    }

    #[test]
    fn test_login_missing_fields() {
        let mut portal = portal();

        assert_eq!(
            portal.login(Role::Student, "", "pw"),
            Err(PortalError::MissingCredentials)
        );
        assert_eq!(
            portal.login(Role::Student, EMAIL, ""),
            Err(PortalError::MissingCredentials)
        );
        assert_eq!(portal.last_error(), Some(&PortalError::MissingCredentials));
        assert!(!portal.is_authenticated());
    }

    #[test]
    fn test_login_invalid_email_attaches_error() {
        let mut portal = portal();

        let result = portal.login(Role::Faculty, "23xx1a12e7@vishnu.edu.in", "pw");
        assert_eq!(result, Err(PortalError::InvalidEmail));
        assert_eq!(
            *portal.state(),
            AuthState::Anonymous {
                error: Some(PortalError::InvalidEmail)
            }
        );
    }

    #[test]
    fn test_successful_login_clears_previous_error() {
        let mut portal = portal();
        let _ = portal.login(Role::Student, "bad", "pw");
        assert!(portal.last_error().is_some());

        portal.login(Role::Student, EMAIL, "pw").unwrap();
        assert!(portal.last_error().is_none());
        assert!(portal.is_authenticated());
    }

    #[test]
    fn test_login_while_authenticated_is_rejected() {
        let mut portal = portal();
        let first = portal.login(Role::Student, EMAIL, "pw").unwrap();

        let result = portal.login(Role::Alumni, "16pa1a05e7@vishnu.edu.in", "pw");
        assert_eq!(result, Err(PortalError::AlreadyAuthenticated(Role::Student)));
        assert_eq!(portal.session(), Some(&first));
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut portal = portal();
        portal.login(Role::Faculty, EMAIL, "pw").unwrap();

        portal.logout();
        assert_eq!(*portal.state(), AuthState::Anonymous { error: None });

        portal.logout();
        assert_eq!(*portal.state(), AuthState::Anonymous { error: None });
    }

    #[test]
    fn test_logout_clears_login_error() {
        let mut portal = portal();
        let _ = portal.login(Role::Faculty, "", "");
        portal.logout();
        assert!(portal.last_error().is_none());
    }

    #[test]
    fn test_register_appends_exactly_one() {
        let mut portal = portal();
        assert_eq!(portal.register(student_form()), Ok(NextFlow::Login));
        assert_eq!(portal.roster().len(), 1);

        let stored = portal.roster().find(EMAIL, Role::Student).unwrap();
        assert_eq!(*stored, validate_registration(student_form()).unwrap());
    }

    #[test]
    fn test_register_does_not_log_in() {
        let mut portal = portal();
        portal.register(student_form()).unwrap();
        assert!(!portal.is_authenticated());
    }

    #[test]
    fn test_rejected_registration_leaves_roster_unchanged() {
        let mut portal = portal();

        let mut form = faculty_form();
        form.phone_number.clear();
        assert_eq!(portal.register(form), Err(PortalError::MissingRequiredFields));

        let mut form = student_form();
        form.password = "abc".to_string();
        form.confirm_password = "abc".to_string();
        assert_eq!(portal.register(form), Err(PortalError::PasswordTooShort));

        assert!(portal.roster().is_empty());
    }

    #[test]
    fn test_register_rejected_when_roster_full() {
        let mut portal = Portal::new(Arc::new(Roster::with_limit(1, 1)));
        assert_eq!(portal.register(faculty_form()), Ok(NextFlow::Login));
        assert_eq!(
            portal.register(student_form()),
            Err(PortalError::RegistrationClosed)
        );
        assert_eq!(portal.roster().len(), 1);
        assert!(!portal.is_authenticated());
    }

    #[test]
    fn test_register_then_login_round_trip() {
        let mut portal = portal();
        let form = student_form();
        let expected = validate_registration(form.clone()).unwrap();

        portal.register(form.clone()).unwrap();
        let session = portal
            .login(Role::Student, &form.email, &form.password)
            .unwrap();

        assert_eq!(session.profile, Some(expected));
        assert_eq!(session.display_name, form.full_name);
    }

    #[test]
    fn test_roster_shared_between_pages() {
        let roster = Arc::new(Roster::new());
        let mut first = Portal::new(Arc::clone(&roster));
        let mut second = Portal::new(Arc::clone(&roster));

        first.register(faculty_form()).unwrap();
        let session = second
            .login(Role::Faculty, "12pa1a05b1@vishnu.edu.in", "pw")
            .unwrap();
        assert_eq!(session.display_name, "Lakshmi Rao");
        assert!(!first.is_authenticated());
    }

    #[test]
    fn test_dashboard_follows_session_role() {
        let mut portal = portal();
        portal.login(Role::Faculty, EMAIL, "pw").unwrap();

        let dashboard = portal.dashboard().unwrap();
        assert!(matches!(dashboard, Dashboard::Faculty(_)));

        portal.logout();
        assert!(portal.dashboard().is_none());
    }
}
