use chrono::{DateTime, Utc};

use crate::core::exclusions::ExclusionSet;
use crate::models::{OutfitCandidate, Vibe};

/// State container for one interactive instant-outfit session.
///
/// Owns the selected vibe, the currently displayed candidate and the
/// exclusion set. The retrieval loop never reads this state directly: the
/// route layer snapshots the exclusions, runs the loop on the copy, and
/// commits the result back under the generation guard.
///
/// The generation counter is how overlapping loops are handled. In-flight
/// generator requests are never cancelled; instead, every `begin_pick` and
/// `reset` bumps the generation, and a loop that finishes under an older
/// generation is stale and must not commit.
#[derive(Debug, Clone)]
pub struct SessionState {
    vibe: Option<Vibe>,
    current: Option<OutfitCandidate>,
    exclusions: ExclusionSet,
    generation: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            vibe: None,
            current: None,
            exclusions: ExclusionSet::new(),
            generation: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn vibe(&self) -> Option<Vibe> {
        self.vibe
    }

    pub fn current(&self) -> Option<&OutfitCandidate> {
        self.current.as_ref()
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Start a pick for `vibe`: record the selection, clear the displayed
    /// candidate and return the generation the new loop runs under.
    pub fn begin_pick(&mut self, vibe: Vibe) -> u64 {
        self.vibe = Some(vibe);
        self.current = None;
        self.generation += 1;
        self.updated_at = Utc::now();
        self.generation
    }

    /// Apply a finished loop's result. Returns false (and changes nothing)
    /// when a newer pick or reset has superseded `generation`.
    pub fn commit_pick(
        &mut self,
        generation: u64,
        outfit: OutfitCandidate,
        exclusions: ExclusionSet,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.current = Some(outfit);
        self.exclusions = exclusions;
        self.updated_at = Utc::now();
        true
    }

    /// Apply exclusion-set changes from a loop that terminated without a
    /// candidate (an exhaustion signal clears the set mid-loop). Same
    /// staleness guard as `commit_pick`.
    pub fn sync_exclusions(&mut self, generation: u64, exclusions: ExclusionSet) -> bool {
        if generation != self.generation {
            return false;
        }
        self.exclusions = exclusions;
        self.updated_at = Utc::now();
        true
    }

    /// Return to the selection state ("retake"): clears the vibe and the
    /// displayed candidate but keeps the exclusion set, so outfits already
    /// shown stay excluded until the generator reports exhaustion. Bumps the
    /// generation so any in-flight loop is invalidated.
    pub fn reset(&mut self) {
        self.vibe = None;
        self.current = None;
        self.generation += 1;
        self.updated_at = Utc::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
