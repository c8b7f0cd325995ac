use serde::{Deserialize, Serialize};
use std::fmt;

/// Portal audience. Every session, registration and dashboard belongs to
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Alumni,
    Faculty,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Alumni, Role::Faculty, Role::Student];

    /// Parse a form value. Empty or unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alumni" => Some(Role::Alumni),
            "faculty" => Some(Role::Faculty),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Alumni => "alumni",
            Role::Faculty => "faculty",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("alumni"), Some(Role::Alumni));
        assert_eq!(Role::parse("Faculty"), Some(Role::Faculty));
        assert_eq!(Role::parse(" student "), Some(Role::Student));
    }

    #[test]
    fn test_parse_unknown_role() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Role::Faculty).unwrap();
        assert_eq!(json, "\"faculty\"");

        let role: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, Role::Student);
    }

    #[test]
    fn test_display_matches_as_str() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
        }
    }
}
