use crate::models::registration::RegistrationRecord;
use crate::models::role::Role;
use serde::Serialize;

/// The signed-in user of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: Role,
    pub email: String,
    pub display_name: String,
    /// Registration data, when the user registered during this process lifetime
    pub profile: Option<RegistrationRecord>,
}

impl Session {
    pub fn new(role: Role, email: String, profile: Option<RegistrationRecord>) -> Self {
        let display_name = match &profile {
            Some(record) if !record.full_name.is_empty() => record.full_name.clone(),
            _ => local_part(&email).to_string(),
        };

        Self {
            role,
            email,
            display_name,
            profile,
        }
    }
}

/// Text before the first `@`, or the whole address when there is none
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
