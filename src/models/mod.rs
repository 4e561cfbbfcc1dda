// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{vibe_catalog, CandidateBatch, OutfitCandidate, Vibe, VibeGroup, VibeOption};
pub use requests::{PickOutfitRequest, ResetSessionRequest};
pub use responses::{
    ErrorResponse, HealthResponse, PickOutfitResponse, ResetSessionResponse, VibeCatalogResponse,
};
