use crate::models::alumni::{AlumniRecord, EngagementTier};
use crate::models::role::Role;
use crate::models::session::Session;
use crate::portal::controller::NextFlow;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ApiKeyQuery {
    pub api_key: String,
}

/// Body of `POST /login`
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct PageOpenedResponse {
    pub success: bool,
    pub page: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub success: bool,
    pub session: Session,
}

/// What the page currently shows: either the landing page (with the last
/// login error, if any) or the signed-in session.
#[derive(Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PageStateResponse {
    Anonymous { error: Option<String> },
    Authenticated { session: Session },
}

#[derive(Serialize)]
pub struct RegisteredResponse {
    pub success: bool,
    pub message: String,
    /// Flow the client should present next
    pub next: NextFlow,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryQuery {
    pub search: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub company: Option<String>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry<'a> {
    #[serde(flatten)]
    pub alumni: &'a AlumniRecord,
    pub engagement_tier: EngagementTier,
}

#[derive(Serialize)]
pub struct DirectoryResponse<'a> {
    pub success: bool,
    pub total: usize,
    pub alumni: Vec<DirectoryEntry<'a>>,
}
