// Unit tests for Dressi Instant

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use dressi_instant::core::{ExclusionSet, OutfitSource, PickError, Picker, SessionState};
use dressi_instant::models::{CandidateBatch, OutfitCandidate, Vibe};
use dressi_instant::services::GeneratorError;

fn outfit(name: &str) -> OutfitCandidate {
    OutfitCandidate {
        name: name.to_string(),
        image: format!("https://cdn.test/{}.jpg", name.to_lowercase()),
        tags: vec!["test".to_string()],
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

/// Outfit source replaying a fixed script of generator responses
struct ScriptedSource {
    script: Mutex<VecDeque<Result<CandidateBatch, GeneratorError>>>,
}

impl ScriptedSource {
    fn new(script: Vec<Result<CandidateBatch, GeneratorError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
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
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted source ran out of responses")
    }
}

#[test]
fn test_exclusion_set_keeps_insertion_order() {
    let mut set = ExclusionSet::new();
    set.record("Boardroom Blazer");
    set.record("Linen Set");
    set.record("Boardroom Blazer");
    assert_eq!(set.names(), &["Boardroom Blazer", "Linen Set"]);
}

#[test]
fn test_exclusion_set_restart_discards_history() {
    let mut set = ExclusionSet::from_names(["A", "B", "C"]);
    set.restart_with("D");
    assert_eq!(set.names(), &["D"]);
    assert!(!set.contains("A"));
}

#[tokio::test]
async fn test_picker_returns_a_fresh_outfit_within_budget() {
    let source = ScriptedSource::new(vec![
        batch(&["A"], false),
        batch(&["B"], false),
        batch(&["C"], false),
    ]);
    let picker = Picker::new(5, 1);
    let mut exclusions = ExclusionSet::from_names(["A", "B"]);

    let pick = picker
        .pick(&source, Vibe::Sunny, &mut exclusions)
        .await
        .unwrap();

    assert!(pick.attempts <= 5);
    assert_eq!(pick.outfit.name, "C");
    // The accepted outfit was not in the prior exclusion set.
    assert_eq!(exclusions.names(), &["A", "B", "C"]);
}

#[tokio::test]
async fn test_picker_exhaustion_leaves_a_singleton_set() {
    let source = ScriptedSource::new(vec![batch(&["Repeat"], true)]);
    let picker = Picker::new(5, 1);
    let mut exclusions = ExclusionSet::from_names(["Old 1", "Old 2", "Old 3"]);

    let pick = picker
        .pick(&source, Vibe::Cold, &mut exclusions)
        .await
        .unwrap();

    assert!(pick.cycled);
    assert_eq!(exclusions.names(), &["Repeat"]);
}

#[tokio::test]
async fn test_picker_transport_error_is_not_a_no_match() {
    let source = ScriptedSource::new(vec![Err(GeneratorError::ApiError(
        "Request failed with status 502".to_string(),
    ))]);
    let picker = Picker::new(5, 1);
    let mut exclusions = ExclusionSet::new();

    let err = picker
        .pick(&source, Vibe::Work, &mut exclusions)
        .await
        .unwrap_err();

    assert!(matches!(err, PickError::Upstream(_)));
}

#[tokio::test]
async fn test_picker_empty_responses_burn_the_full_budget() {
    let source = ScriptedSource::new(vec![
        batch(&[], false),
        batch(&[], false),
        batch(&[], false),
        batch(&[], false),
        batch(&[], false),
    ]);
    let picker = Picker::new(5, 1);
    let mut exclusions = ExclusionSet::new();

    let err = picker
        .pick(&source, Vibe::Casual, &mut exclusions)
        .await
        .unwrap_err();

    assert!(matches!(err, PickError::NoMatch { attempts: 5 }));
}

#[test]
fn test_session_retake_keeps_seen_outfits() {
    let mut session = SessionState::new();
    let generation = session.begin_pick(Vibe::Date);
    assert!(session.commit_pick(
        generation,
        outfit("Date Night Dream"),
        ExclusionSet::from_names(["Date Night Dream"]),
    ));

    session.reset();

    assert!(session.vibe().is_none());
    assert!(session.current().is_none());
    assert!(session.exclusions().contains("Date Night Dream"));
}

#[test]
fn test_session_generation_guard_rejects_stale_loops() {
    let mut session = SessionState::new();
    let stale = session.begin_pick(Vibe::Sunny);
    let _fresh = session.begin_pick(Vibe::Cloudy);

    assert!(!session.commit_pick(stale, outfit("A"), ExclusionSet::from_names(["A"])));
    assert!(session.current().is_none());
}
