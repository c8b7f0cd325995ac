use crate::models::role::Role;
use serde::{Deserialize, Serialize};

/// Raw registration form as submitted by the register dialog.
///
/// Every field is free text and may be missing; nothing here is trusted
/// until it has been through `validation::registration::validate_registration`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub user_type: String,
    pub btech_start_year: String,
    pub btech_end_year: String,
    pub phone_number: String,

    // Student
    pub current_sem: String,
    pub cgpa: String,
    pub branch: String,

    // Alumni
    pub current_occupation: String,
    pub location: String,
    pub graduated_year: String,
    pub skills: String,
    pub bio: String,

    // Faculty
    pub department: String,
}

/// Optional programme years shared by every role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramYears {
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

/// Role-specific part of a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    #[serde(rename_all = "camelCase")]
    Student {
        current_semester: String,
        cgpa: String,
        branch: String,
    },
    #[serde(rename_all = "camelCase")]
    Alumni {
        current_occupation: String,
        location: String,
        graduated_year: String,
        skills: String,
        bio: String,
    },
    #[serde(rename_all = "camelCase")]
    Faculty { department: String },
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Student { .. } => Role::Student,
            RoleProfile::Alumni { .. } => Role::Alumni,
            RoleProfile::Faculty { .. } => Role::Faculty,
        }
    }
}

/// An accepted registration, as held in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub full_name: String,
    pub email: String,
    /// Kept only so the record mirrors what was submitted; never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub phone_number: String,
    pub program: ProgramYears,
    pub profile: RoleProfile,
}

impl RegistrationRecord {
    pub fn role(&self) -> Role {
        self.profile.role()
    }
}
