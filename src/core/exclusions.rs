use serde::{Deserialize, Serialize};

/// Ordered set of outfit names already shown in one session.
///
/// The list is sent verbatim to the generator as `exclude_names`, so insertion
/// order is preserved. Scoped to one interactive session and never persisted;
/// it is cleared when the generator reports that the catalog has cycled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet {
    names: Vec<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a list of names, dropping duplicates but keeping
    /// first-seen order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.record(&name.into());
        }
        set
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Append a name if it is not already present. Returns true if the set
    /// grew.
    pub fn record(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Replace the whole set with a single name. Used when the generator
    /// reports exhaustion while still producing a candidate: the catalog has
    /// cycled, so prior exclusions are void and a new cycle starts with the
    /// outfit just shown.
    pub fn restart_with(&mut self, name: &str) {
        self.names.clear();
        self.names.push(name.to_string());
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
