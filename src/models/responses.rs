use serde::{Deserialize, Serialize};
use crate::models::domain::{OutfitCandidate, VibeOption};

/// Response for the pick endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickOutfitResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub outfit: OutfitCandidate,
    /// Number of generator calls the retrieval loop made before accepting.
    pub attempts: u32,
    /// True when the accepted outfit started a fresh display cycle (the
    /// generator reported the catalog exhausted on the same response).
    pub cycled: bool,
}

/// Response for the session reset endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetSessionResponse {
    pub success: bool,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Response for the vibe catalog endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibeCatalogResponse {
    pub vibes: Vec<VibeOption>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Live sessions in the store (approximate).
    pub sessions: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
