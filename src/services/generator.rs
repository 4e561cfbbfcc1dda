use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::picker::OutfitSource;
use crate::models::{CandidateBatch, OutfitCandidate, Vibe};

/// Errors that can occur when calling the outfit generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("generator returned error: {0}")]
    ApiError(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the remote outfit generator endpoint.
///
/// The generator accepts a vibe tag, a desired candidate count and an
/// exclusion list, and answers with zero or more candidates plus a flag
/// marking the catalog for that vibe as fully cycled. Any non-success status
/// is a hard failure; the retrieval loop does not retry it.
pub struct GeneratorClient {
    base_url: String,
    client: Client,
}

impl GeneratorClient {
    /// Create a new generator client
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    fn instant_outfits_url(&self) -> String {
        format!(
            "{}/api/instant_outfits/",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Request up to `image_count` candidates for `vibe`, excluding the given
    /// outfit names.
    pub async fn instant_outfits(
        &self,
        vibe: Vibe,
        image_count: u32,
        exclude_names: &[String],
    ) -> Result<CandidateBatch, GeneratorError> {
        let url = self.instant_outfits_url();
        let payload = serde_json::json!({
            "vibe": vibe.as_str(),
            "image_count": image_count,
            "exclude_names": exclude_names,
        });

        tracing::debug!(
            "Requesting {} outfit(s) for vibe {} ({} excluded)",
            image_count,
            vibe,
            exclude_names.len()
        );

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(GeneratorError::ApiError(format!(
                "Request failed with status {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(format!("Failed to parse body: {}", e)))?;

        // A missing outfits array is an empty batch; null or malformed
        // entries are dropped rather than failing the whole response.
        let outfits: Vec<OutfitCandidate> = json
            .get("outfits")
            .and_then(|o| o.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        let exhausted = json
            .get("uniqueExhausted")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        tracing::debug!(
            "Generator returned {} candidate(s) for vibe {} (exhausted: {})",
            outfits.len(),
            vibe,
            exhausted
        );

        Ok(CandidateBatch { outfits, exhausted })
    }
}

#[async_trait]
impl OutfitSource for GeneratorClient {
    async fn fetch_batch(
        &self,
        vibe: Vibe,
        desired_count: u32,
        exclude: &[String],
    ) -> Result<CandidateBatch, GeneratorError> {
        self.instant_outfits(vibe, desired_count, exclude).await
    }
}
