use crate::models::alumni::AlumniRecord;
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    /// Most recent graduates first
    GraduationYear,
    /// Most engaged first
    Engagement,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "name" => Some(SortKey::Name),
            "graduationYear" | "graduation-year" | "year" => Some(SortKey::GraduationYear),
            "engagement" => Some(SortKey::Engagement),
            _ => None,
        }
    }
}

/// Directory query after parsing. Empty filters match everything.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    pub search: Option<String>,
    pub branch: Option<String>,
    pub graduation_year: Option<String>,
    pub company: Option<String>,
    pub sort: SortKey,
}

impl DirectoryFilter {
    /// Normalize a select value: blank and "All ..." placeholders mean no filter
    pub fn select(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty() && !v.starts_with("All ") && v != "all")
    }

    fn matches(&self, alumni: &AlumniRecord) -> bool {
        if let Some(query) = &self.search {
            let query = query.to_lowercase();
            let hit = alumni.name.to_lowercase().contains(&query)
                || alumni.company.to_lowercase().contains(&query)
                || alumni
                    .skills
                    .iter()
                    .any(|skill| skill.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        self.branch.as_ref().map_or(true, |b| &alumni.branch == b)
            && self
                .graduation_year
                .as_ref()
                .map_or(true, |y| &alumni.graduation_year == y)
            && self.company.as_ref().map_or(true, |c| &alumni.company == c)
    }
}

/// Read-only alumni directory loaded at startup
pub struct Directory {
    alumni: Vec<AlumniRecord>,
}

impl Directory {
    pub fn new(alumni: Vec<AlumniRecord>) -> Self {
        Self { alumni }
    }

    pub fn search(&self, filter: &DirectoryFilter) -> Vec<&AlumniRecord> {
        let mut results: Vec<&AlumniRecord> = self
            .alumni
            .iter()
            .filter(|alumni| filter.matches(alumni))
            .collect();

        match filter.sort {
            SortKey::Name => results.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::GraduationYear => {
                results.sort_by(|a, b| b.graduation_year.cmp(&a.graduation_year))
            }
            SortKey::Engagement => results.sort_by_key(|a| Reverse(a.engagement)),
        }

        results
    }

    pub fn len(&self) -> usize {
        self.alumni.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alumni.is_empty()
    }
}
