use regex::Regex;
use std::sync::LazyLock;

/// Institutional mail domain every portal account lives under
pub const INSTITUTION_DOMAIN: &str = "vishnu.edu.in";

/// Shape of an address as shown to users in error messages
pub const EMAIL_FORMAT_HINT: &str = "XXpaXXXXXX@vishnu.edu.in";

// Roll-number style local part: 2 digits, "pa", 1 digit, 1 letter, 2 digits,
// 1 letter, 1+ digits. ASCII only, case-insensitive.
static INSTITUTIONAL_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i-u)^[0-9]{{2}}pa[0-9][a-z][0-9]{{2}}[a-z][0-9]+@{}$",
        regex::escape(INSTITUTION_DOMAIN)
    );
    Regex::new(&pattern).expect("institutional email pattern is valid")
});

/// Check that `email` is an institutional login identifier.
///
/// Never fails; anything that does not match (including the empty string)
/// is simply `false`.
pub fn is_institutional_email(email: &str) -> bool {
    INSTITUTIONAL_EMAIL.is_match(email)
}
