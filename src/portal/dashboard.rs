use crate::models::registration::RegistrationRecord;
use crate::models::role::Role;
use crate::models::session::Session;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
}

const fn nav(id: &'static str, label: &'static str) -> NavItem {
    NavItem { id, label }
}

const ALUMNI_NAV: &[NavItem] = &[
    nav("dashboard", "Dashboard"),
    nav("profile", "Profile"),
    nav("career-updates", "Career Updates"),
    nav("sessions", "Sessions & Invitations"),
    nav("networking", "Networking"),
    nav("referrals", "Referrals"),
];

const FACULTY_NAV: &[NavItem] = &[
    nav("dashboard", "Dashboard"),
    nav("alumni-directory", "Alumni Directory"),
    nav("send-invitations", "Send Invitations"),
    nav("create-session", "Create Session"),
    nav("student-interaction", "Student Interaction"),
    nav("reports", "Reports/Analytics"),
];

const STUDENT_NAV: &[NavItem] = &[
    nav("dashboard", "Dashboard"),
    nav("profile", "Profile"),
    nav("alumni-connect", "Alumni Connect"),
    nav("opportunities", "Opportunities/Referrals"),
    nav("events", "Events & Sessions"),
];

/// Signed-in user as shown in the shell header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellUser {
    pub email: String,
    pub display_name: String,
    pub profile: Option<RegistrationRecord>,
}

impl From<&Session> for ShellUser {
    fn from(session: &Session) -> Self {
        Self {
            email: session.email.clone(),
            display_name: session.display_name.clone(),
            profile: session.profile.clone(),
        }
    }
}

/// Everything a dashboard shell needs to render its chrome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shell {
    pub title: &'static str,
    pub user: ShellUser,
    pub navigation: &'static [NavItem],
    /// Currently selected sidebar entry
    pub active: &'static str,
}

/// The dashboard a signed-in page shows, one per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Alumni(Shell),
    Faculty(Shell),
    Student(Shell),
}

impl Dashboard {
    /// Select the shell for the session's role, opened on its first section
    pub fn for_session(session: &Session) -> Self {
        let navigation = navigation_for(session.role);
        let shell = Shell {
            title: title_for(session.role),
            user: ShellUser::from(session),
            navigation,
            active: navigation[0].id,
        };

        match session.role {
            Role::Alumni => Dashboard::Alumni(shell),
            Role::Faculty => Dashboard::Faculty(shell),
            Role::Student => Dashboard::Student(shell),
        }
    }

    /// Switch to `section`; unknown sections fall back to the overview
    pub fn select(mut self, section: &str) -> Self {
        let shell = self.shell_mut();
        shell.active = shell
            .navigation
            .iter()
            .find(|item| item.id == section)
            .map(|item| item.id)
            .unwrap_or(shell.navigation[0].id);
        self
    }

    pub fn role(&self) -> Role {
        match self {
            Dashboard::Alumni(_) => Role::Alumni,
            Dashboard::Faculty(_) => Role::Faculty,
            Dashboard::Student(_) => Role::Student,
        }
    }

    pub fn shell(&self) -> &Shell {
        match self {
            Dashboard::Alumni(shell) | Dashboard::Faculty(shell) | Dashboard::Student(shell) => shell,
        }
    }

    fn shell_mut(&mut self) -> &mut Shell {
        match self {
            Dashboard::Alumni(shell) | Dashboard::Faculty(shell) | Dashboard::Student(shell) => shell,
        }
    }
}

pub fn navigation_for(role: Role) -> &'static [NavItem] {
    match role {
        Role::Alumni => ALUMNI_NAV,
        Role::Faculty => FACULTY_NAV,
        Role::Student => STUDENT_NAV,
    }
}

fn title_for(role: Role) -> &'static str {
    match role {
        Role::Alumni => "Alumni Portal",
        Role::Faculty => "Faculty Portal",
        Role::Student => "Student Portal",
    }
}
