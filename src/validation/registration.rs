use crate::core::error::PortalError;
use crate::models::registration::{ProgramYears, RegistrationForm, RegistrationRecord, RoleProfile};
use crate::models::role::Role;
use crate::validation::email::is_institutional_email;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Turn a submitted form into a roster record.
///
/// Checks run in a fixed order and the first failure is returned:
/// shared required fields, role-specific fields, email format, password
/// confirmation, password length.
pub fn validate_registration(form: RegistrationForm) -> Result<RegistrationRecord, PortalError> {
    let shared_complete = all_present(&[
        form.full_name.as_str(),
        form.email.as_str(),
        form.password.as_str(),
        form.confirm_password.as_str(),
        form.user_type.as_str(),
        form.phone_number.as_str(),
    ]);
    if !shared_complete {
        return Err(PortalError::MissingRequiredFields);
    }

    let role = Role::parse(&form.user_type).ok_or(PortalError::MissingRequiredFields)?;

    let role_complete = match role {
        Role::Student => all_present(&[
            form.current_sem.as_str(),
            form.cgpa.as_str(),
            form.branch.as_str(),
        ]),
        Role::Alumni => all_present(&[
            form.current_occupation.as_str(),
            form.location.as_str(),
            form.graduated_year.as_str(),
            form.skills.as_str(),
            form.bio.as_str(),
        ]),
        Role::Faculty => all_present(&[form.department.as_str()]),
    };
    if !role_complete {
        return Err(PortalError::MissingRoleFields(role));
    }

    if !is_institutional_email(&form.email) {
        return Err(PortalError::InvalidEmail);
    }

    if form.password != form.confirm_password {
        return Err(PortalError::PasswordMismatch);
    }

    // UTF-16 code units, the unit the register dialog counts in
    if form.password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(PortalError::PasswordTooShort);
    }

    let profile = match role {
        Role::Student => RoleProfile::Student {
            current_semester: form.current_sem,
            cgpa: form.cgpa,
            branch: form.branch,
        },
        Role::Alumni => RoleProfile::Alumni {
            current_occupation: form.current_occupation,
            location: form.location,
            graduated_year: form.graduated_year,
            skills: form.skills,
            bio: form.bio,
        },
        Role::Faculty => RoleProfile::Faculty {
            department: form.department,
        },
    };

    Ok(RegistrationRecord {
        full_name: form.full_name,
        email: form.email,
        password: form.password,
        phone_number: form.phone_number,
        program: ProgramYears {
            start_year: non_empty(form.btech_start_year),
            end_year: non_empty(form.btech_end_year),
        },
        profile,
    })
}

fn all_present(fields: &[&str]) -> bool {
    fields.iter().all(|field| !field.is_empty())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
