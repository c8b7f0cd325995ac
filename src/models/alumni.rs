use serde::{Deserialize, Serialize};

/// One entry of the alumni directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub graduation_year: String,
    pub branch: String,
    pub position: String,
    pub company: String,
    pub location: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: String,
    /// Engagement score, 0-100
    pub engagement: u8,
    pub last_active: String,
    #[serde(default)]
    pub linkedin: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementTier {
    High,
    Medium,
    Low,
}

impl EngagementTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            EngagementTier::High
        } else if score >= 70 {
            EngagementTier::Medium
        } else {
            EngagementTier::Low
        }
    }
}

impl AlumniRecord {
    pub fn engagement_tier(&self) -> EngagementTier {
        EngagementTier::from_score(self.engagement)
    }
}
