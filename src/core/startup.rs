use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::core::config::DirectoryConfig;
use crate::models::alumni::AlumniRecord;

#[derive(Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    alumni: Vec<AlumniRecord>,
}

// this runs at boot time
pub fn load_directory(config: &DirectoryConfig) -> Result<Vec<AlumniRecord>> {
    let Some(path) = &config.path else {
        let alumni = builtin_directory();
        info!(alumni = alumni.len(), "Using built-in alumni directory");
        return Ok(alumni);
    };

    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read directory file: {}", path.display()))?;

    let file: DirectoryFile = toml::from_str(&content)
        .context(format!("Failed to parse directory file: {}", path.display()))?;

    let mut seen = HashSet::new();
    let mut alumni = Vec::with_capacity(file.alumni.len());
    for record in file.alumni {
        if record.engagement > 100 {
            bail!(
                "Alumni {} has engagement {} (must be 0-100)",
                record.id,
                record.engagement
            );
        }

        if !seen.insert(record.id) {
            warn!(
                alumni_id = record.id,
                name = %record.name,
                "Duplicate alumni id, skipping entry"
            );
            continue;
        }

        alumni.push(record);
    }

    info!(
        path = %path.display(),
        alumni = alumni.len(),
        "Alumni directory loaded"
    );

    Ok(alumni)
}

#[allow(clippy::too_many_arguments)]
fn alumni(
    id: u32,
    name: &str,
    email: &str,
    graduation_year: &str,
    branch: &str,
    position: &str,
    company: &str,
    location: &str,
    phone: &str,
    skills: &[&str],
    experience: &str,
    engagement: u8,
    last_active: &str,
    linkedin: &str,
) -> AlumniRecord {
    AlumniRecord {
        id,
        name: name.to_string(),
        email: email.to_string(),
        graduation_year: graduation_year.to_string(),
        branch: branch.to_string(),
        position: position.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        phone: phone.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        experience: experience.to_string(),
        engagement,
        last_active: last_active.to_string(),
        linkedin: linkedin.to_string(),
    }
}

/// Demo directory used when no directory file is configured
pub fn builtin_directory() -> Vec<AlumniRecord> {
    vec![
        alumni(
            1,
            "Sarah Johnson",
            "16pa1a05e7@vishnu.edu.in",
            "2020",
            "Computer Science Engineering",
            "Senior Product Manager",
            "Microsoft",
            "Seattle, USA",
            "+1-555-0123",
            &["Product Management", "Strategy", "Leadership", "Agile"],
            "4 years",
            95,
            "2024-01-20",
            "linkedin.com/in/sarahjohnson",
        ),
        alumni(
            2,
            "Raj Patel",
            "15pa1a12a7@vishnu.edu.in",
            "2019",
            "Computer Science Engineering",
            "Data Scientist",
            "Google",
            "Bangalore, India",
            "+91-9876543210",
            &["Machine Learning", "Python", "TensorFlow", "Data Analysis"],
            "5 years",
            88,
            "2024-01-18",
            "linkedin.com/in/rajpatel",
        ),
        alumni(
            3,
            "Emily Chen",
            "17pa1a08b3@vishnu.edu.in",
            "2021",
            "Electronics Engineering",
            "Software Engineer",
            "Apple",
            "Cupertino, USA",
            "+1-555-0456",
            &["iOS Development", "Swift", "Mobile Apps", "UI/UX"],
            "3 years",
            82,
            "2024-01-15",
            "linkedin.com/in/emilychen",
        ),
        alumni(
            4,
            "Arjun Reddy",
            "18pa1a04c9@vishnu.edu.in",
            "2022",
            "Mechanical Engineering",
            "Design Engineer",
            "Tesla",
            "Fremont, USA",
            "+1-555-0789",
            &["CAD Design", "SolidWorks", "Product Design", "Manufacturing"],
            "2 years",
            76,
            "2024-01-22",
            "linkedin.com/in/arjunreddy",
        ),
    ]
}
