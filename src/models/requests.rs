use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to pick one fresh outfit for a vibe
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PickOutfitRequest {
    /// Omitted on the first interaction; the service mints a session id.
    #[serde(default)]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: Option<String>,
    #[validate(length(min = 1))]
    pub vibe: String,
}

/// Request to reset a session back to its selection state ("retake")
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetSessionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
}
