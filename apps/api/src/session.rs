//! In-memory session store. Holds the latest analysis per session so it can
//! be exported later; nothing is persisted.
//!
//! The store is bounded: once `capacity` sessions are held, storing a new
//! session evicts the one analysed longest ago.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::analysis::AnalysisResult;

pub const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub analysis: AnalysisResult,
    pub raw_text: String,
    pub analyzed_at: DateTime<Utc>,
    /// Insertion counter; breaks `analyzed_at` ties when picking an eviction victim.
    seq: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<Uuid, SessionEntry>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Sessions>>,
    capacity: usize,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }

    /// A store holding at most `capacity` sessions (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Sessions::default())),
            capacity: capacity.max(1),
        }
    }

    /// Stores a new analysis for `session_id`, replacing any previous one.
    /// Returns true if an earlier analysis was overwritten.
    pub fn put(&self, session_id: Uuid, analysis: AnalysisResult, raw_text: String) -> bool {
        let mut sessions = self.inner.write().unwrap_or_else(|e| e.into_inner());

        let replacing = sessions.entries.contains_key(&session_id);
        if !replacing {
            while sessions.entries.len() >= self.capacity {
                let Some(oldest) = sessions
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| (entry.analyzed_at, entry.seq))
                    .map(|(id, _)| *id)
                else {
                    break;
                };
                sessions.entries.remove(&oldest);
                debug!(session_id = %oldest, "Evicted oldest session");
            }
        }

        let seq = sessions.next_seq;
        sessions.next_seq += 1;
        let entry = SessionEntry {
            analysis,
            raw_text,
            analyzed_at: Utc::now(),
            seq,
        };
        sessions.entries.insert(session_id, entry);
        replacing
    }

    pub fn get(&self, session_id: Uuid) -> Option<SessionEntry> {
        let sessions = self.inner.read().unwrap_or_else(|e| e.into_inner());
        sessions.entries.get(&session_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
