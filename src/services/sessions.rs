use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::session::SessionState;

/// In-memory registry of interactive sessions.
///
/// Entries are evicted after a period of inactivity or when the store is at
/// capacity. An evicted session simply starts over with an empty exclusion
/// set on its next request; exclusion state is never persisted.
pub struct SessionStore {
    sessions: Cache<String, Arc<Mutex<SessionState>>>,
}

impl SessionStore {
    /// Create a new session store
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let sessions = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(Duration::from_secs(ttl_secs))
            .build();

        Self { sessions }
    }

    /// Resolve a session by id, creating a fresh one when the id is missing,
    /// empty or unknown. Returns the effective id together with the entry.
    pub async fn get_or_create(&self, id: Option<&str>) -> (String, Arc<Mutex<SessionState>>) {
        let id = match id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        let entry = self
            .sessions
            .get_with(id.clone(), async { Arc::new(Mutex::new(SessionState::new())) })
            .await;

        (id, entry)
    }

    /// Look up an existing session without creating one
    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<SessionState>>> {
        self.sessions.get(id).await
    }

    /// Number of live sessions (approximate, per moka semantics)
    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
