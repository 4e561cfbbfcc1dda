use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::PickerSettings;
use crate::core::exclusions::ExclusionSet;
use crate::models::{CandidateBatch, OutfitCandidate, Vibe};
use crate::services::GeneratorError;

/// Anything that can produce outfit candidates for a vibe.
///
/// The production implementation is the generator client; tests use scripted
/// stubs so the loop can be exercised without a network.
#[async_trait]
pub trait OutfitSource: Send + Sync {
    async fn fetch_batch(
        &self,
        vibe: Vibe,
        desired_count: u32,
        exclude: &[String],
    ) -> Result<CandidateBatch, GeneratorError>;
}

/// Terminal states of the retrieval loop, distinguishable so the UI can show
/// different guidance text for each.
#[derive(Debug, Error)]
pub enum PickError {
    /// Transport/HTTP failure against the generator. Not retried.
    #[error("generator request failed: {0}")]
    Upstream(#[from] GeneratorError),

    /// The retry budget ran out while the generator kept reporting the
    /// catalog exhausted.
    #[error("catalog exhausted after {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// The retry budget ran out without any qualifying candidate and without
    /// an exhaustion signal.
    #[error("no unseen outfit after {attempts} attempts")]
    NoMatch { attempts: u32 },
}

/// An accepted outfit together with how the loop got there
#[derive(Debug, Clone)]
pub struct Pick {
    pub outfit: OutfitCandidate,
    /// Generator calls made before acceptance.
    pub attempts: u32,
    /// The accepted outfit started a fresh display cycle (the generator
    /// reported exhaustion on the same response).
    pub cycled: bool,
}

/// Deduplicating fetch-and-select loop.
///
/// Given a vibe and the session's exclusion set, retrieves one outfit the
/// session has not already seen, tolerating transient empty responses and the
/// server-declared exhaustion event. The attempt ceiling bounds worst-case
/// latency against a generator that never returns a fresh item.
#[derive(Debug, Clone, Copy)]
pub struct Picker {
    max_attempts: u32,
    desired_count: u32,
}

impl Picker {
    pub fn new(max_attempts: u32, desired_count: u32) -> Self {
        Self {
            // A zero ceiling would make every pick a silent no-match.
            max_attempts: max_attempts.max(1),
            desired_count: desired_count.max(1),
        }
    }

    pub fn from_settings(settings: &PickerSettings) -> Self {
        Self::new(settings.max_attempts, settings.desired_count)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run the retrieval loop against `source`.
    ///
    /// The exclusion set is mutated as the loop progresses: an accepted
    /// outfit is recorded (or restarts the set when the catalog has cycled),
    /// and an exhaustion signal without a candidate clears it so the next
    /// cycle can begin. Callers that guard against stale loops should pass a
    /// clone and commit it back on success.
    pub async fn pick<S>(
        &self,
        source: &S,
        vibe: Vibe,
        exclusions: &mut ExclusionSet,
    ) -> Result<Pick, PickError>
    where
        S: OutfitSource + ?Sized,
    {
        let mut attempts = 0;
        let mut saw_exhausted = false;

        while attempts < self.max_attempts {
            attempts += 1;

            let batch = source
                .fetch_batch(vibe, self.desired_count, exclusions.names())
                .await?;

            if batch.exhausted {
                saw_exhausted = true;
            }

            // Prefer the first candidate the session has not seen. Only once
            // the retry budget is on its final attempt does an already-shown
            // candidate qualify, which tolerates a generator that ignores the
            // exclusion list entirely.
            let last_attempt = attempts == self.max_attempts;
            let selected = batch
                .outfits
                .iter()
                .find(|outfit| !exclusions.contains(&outfit.name))
                .or_else(|| {
                    if last_attempt {
                        batch.outfits.first()
                    } else {
                        None
                    }
                });

            if let Some(outfit) = selected {
                if batch.exhausted {
                    exclusions.restart_with(&outfit.name);
                } else {
                    exclusions.record(&outfit.name);
                }
                debug!(
                    "Accepted outfit '{}' for vibe {} on attempt {} (cycled: {})",
                    outfit.name, vibe, attempts, batch.exhausted
                );
                return Ok(Pick {
                    outfit: outfit.clone(),
                    attempts,
                    cycled: batch.exhausted,
                });
            }

            if batch.exhausted {
                // The catalog cycled with nothing left to show; void the
                // exclusions so the generator can serve a fresh cycle on the
                // next attempt.
                debug!(
                    "Catalog exhausted for vibe {} on attempt {}, clearing {} exclusions",
                    vibe,
                    attempts,
                    exclusions.len()
                );
                exclusions.clear();
            } else {
                debug!(
                    "No qualifying candidate for vibe {} on attempt {}",
                    vibe, attempts
                );
            }
        }

        if saw_exhausted {
            Err(PickError::Exhausted { attempts })
        } else {
            Err(PickError::NoMatch { attempts })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Source that replays a fixed script of responses
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<CandidateBatch, GeneratorError>>>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<CandidateBatch, GeneratorError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OutfitSource for ScriptedSource {
        async fn fetch_batch(
            &self,
            _vibe: Vibe,
            _desired_count: u32,
            _exclude: &[String],
        ) -> Result<CandidateBatch, GeneratorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted source ran out of responses")
        }
    }

    fn outfit(name: &str) -> OutfitCandidate {
        OutfitCandidate {
            name: name.to_string(),
            image: format!("https://cdn.test/{}.jpg", name.to_lowercase()),
            tags: vec![],
            source_url: None,
            vibe: None,
        }
    }

    fn batch(names: &[&str], exhausted: bool) -> Result<CandidateBatch, GeneratorError> {
        Ok(CandidateBatch {
            outfits: names.iter().map(|n| outfit(n)).collect(),
            exhausted,
        })
    }

    #[tokio::test]
    async fn test_accepts_fresh_candidate_on_first_attempt() {
        let source = ScriptedSource::new(vec![batch(&["A"], false)]);
        let picker = Picker::new(5, 1);
        let mut exclusions = ExclusionSet::new();

        let pick = picker
            .pick(&source, Vibe::Sunny, &mut exclusions)
            .await
            .unwrap();

        assert_eq!(pick.outfit.name, "A");
        assert_eq!(pick.attempts, 1);
        assert!(!pick.cycled);
        assert_eq!(exclusions.names(), &["A"]);
    }

    #[tokio::test]
    async fn test_skips_excluded_candidates_until_fresh_one_appears() {
        // Attempt 1 only offers an already-shown outfit; attempt 2 offers a
        // fresh one.
        let source = ScriptedSource::new(vec![batch(&["A"], false), batch(&["C"], false)]);
        let picker = Picker::new(5, 1);
        let mut exclusions = ExclusionSet::from_names(["A", "B"]);

        let pick = picker
            .pick(&source, Vibe::Sunny, &mut exclusions)
            .await
            .unwrap();

        assert_eq!(pick.outfit.name, "C");
        assert_eq!(pick.attempts, 2);
        assert_eq!(exclusions.names(), &["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_exhaustion_restarts_the_exclusion_cycle() {
        let source = ScriptedSource::new(vec![batch(&["Z"], true)]);
        let picker = Picker::new(5, 1);
        let mut exclusions = ExclusionSet::from_names(["X", "Y"]);

        let pick = picker
            .pick(&source, Vibe::Cold, &mut exclusions)
            .await
            .unwrap();

        assert_eq!(pick.outfit.name, "Z");
        assert!(pick.cycled);
        // Prior exclusions are void once the catalog cycles.
        assert_eq!(exclusions.names(), &["Z"]);
    }

    #[tokio::test]
    async fn test_empty_batches_exhaust_the_retry_budget() {
        let source = ScriptedSource::new(vec![
            batch(&[], false),
            batch(&[], false),
            batch(&[], false),
            batch(&[], false),
            batch(&[], false),
        ]);
        let picker = Picker::new(5, 1);
        let mut exclusions = ExclusionSet::from_names(["A"]);

        let err = picker
            .pick(&source, Vibe::Work, &mut exclusions)
            .await
            .unwrap_err();

        match err {
            PickError::NoMatch { attempts } => assert_eq!(attempts, 5),
            other => panic!("expected NoMatch, got {:?}", other),
        }
        assert_eq!(source.calls(), 5);
        assert_eq!(exclusions.names(), &["A"]);
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_on_first_attempt() {
        let source = ScriptedSource::new(vec![
            Err(GeneratorError::ApiError("status 500".to_string())),
            batch(&["A"], false),
        ]);
        let picker = Picker::new(5, 1);
        let mut exclusions = ExclusionSet::new();

        let err = picker
            .pick(&source, Vibe::Casual, &mut exclusions)
            .await
            .unwrap_err();

        assert!(matches!(err, PickError::Upstream(_)));
        assert_eq!(source.calls(), 1);
        assert!(exclusions.is_empty());
    }

    #[tokio::test]
    async fn test_persistent_exhaustion_clears_exclusions_and_reports() {
        let source = ScriptedSource::new(vec![
            batch(&[], true),
            batch(&[], true),
            batch(&[], true),
            batch(&[], true),
            batch(&[], true),
        ]);
        let picker = Picker::new(5, 1);
        let mut exclusions = ExclusionSet::from_names(["A", "B"]);

        let err = picker
            .pick(&source, Vibe::Date, &mut exclusions)
            .await
            .unwrap_err();

        match err {
            PickError::Exhausted { attempts } => assert_eq!(attempts, 5),
            other => panic!("expected Exhausted, got {:?}", other),
        }
        // The set was cleared so the next accepted outfit starts a new cycle.
        assert!(exclusions.is_empty());
    }

    #[tokio::test]
    async fn test_exhaustion_signal_is_latched_across_attempts() {
        let source = ScriptedSource::new(vec![
            batch(&[], true),
            batch(&[], false),
            batch(&[], false),
        ]);
        let picker = Picker::new(3, 1);
        let mut exclusions = ExclusionSet::new();

        let err = picker
            .pick(&source, Vibe::Sunny, &mut exclusions)
            .await
            .unwrap_err();

        assert!(matches!(err, PickError::Exhausted { attempts: 3 }));
    }

    #[tokio::test]
    async fn test_final_attempt_falls_back_to_a_repeat() {
        // A generator that ignores the exclusion list entirely: the loop
        // holds out for a fresh candidate until the last attempt, then shows
        // a repeat rather than nothing.
        let source = ScriptedSource::new(vec![
            batch(&["A"], false),
            batch(&["A"], false),
            batch(&["A"], false),
        ]);
        let picker = Picker::new(3, 1);
        let mut exclusions = ExclusionSet::from_names(["A"]);

        let pick = picker
            .pick(&source, Vibe::Cloudy, &mut exclusions)
            .await
            .unwrap();

        assert_eq!(pick.outfit.name, "A");
        assert_eq!(pick.attempts, 3);
        assert_eq!(exclusions.names(), &["A"]);
    }

    #[tokio::test]
    async fn test_picker_clamps_zero_attempt_ceiling() {
        let picker = Picker::new(0, 0);
        assert_eq!(picker.max_attempts(), 1);
    }
}
