use serde::{Deserialize, Serialize};

use crate::models::{Criterion, PreferenceProfile, Ranking};

/// Snapshot of a quiz session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub complete: bool,
    /// Index of the current criterion, absent once complete
    pub pointer: Option<usize>,
    pub total_criteria: usize,
    pub current_criterion: Option<Criterion>,
    pub answers: PreferenceProfile,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

/// Ranking response, echoing the profile that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    pub profile: PreferenceProfile,
    #[serde(flatten)]
    pub ranking: Ranking,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "activeSessions")]
    pub active_sessions: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
