//! Session-scoped conversational memory with bounded histories and
//! time-based expiry.
//!
//! The store is an explicit object owned by the orchestration layer, with
//! its window and TTL supplied at construction. One mutex guards the table;
//! callers receive cloned history snapshots so prompt rendering happens
//! outside the critical section.

use crate::models::ChatMessage;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

struct SessionEntry {
    messages: Vec<ChatMessage>,
    last_access: Instant,
}

/// Thread-safe, expiring, bounded conversational context keyed by session id.
///
/// Invariants: at most `2 * window` messages per session at rest, always an
/// even count (turns are appended as user/assistant pairs and evicted the
/// same way, oldest first). A missing or unknown session id means "empty
/// history", never an error.
pub struct SessionMemory {
    window: usize,
    ttl: Duration,
    table: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionMemory {
    /// Create a store retaining up to `window` turns per session; sessions
    /// untouched for longer than `ttl` are removed by the next sweep.
    pub fn new(window: usize, ttl: Duration) -> Self {
        Self {
            window,
            ttl,
            table: Mutex::new(HashMap::new()),
        }
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
        // History entries are plain data; a panic mid-mutation cannot leave
        // them in a state worth discarding the whole table over.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the session's history, oldest message first. Creates an
    /// empty session on first access and refreshes its last-access time.
    pub fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        let mut table = self.table();
        let entry = table
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry {
                messages: Vec::new(),
                last_access: Instant::now(),
            });
        entry.last_access = Instant::now();
        entry.messages.clone()
    }

    /// Append one user/assistant turn, evicting the oldest turns when the
    /// window is exceeded. Creates the session if absent.
    pub fn append_turn(&self, session_id: &str, user_text: &str, assistant_text: &str) {
        let mut table = self.table();
        let entry = table
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry {
                messages: Vec::new(),
                last_access: Instant::now(),
            });

        entry.messages.push(ChatMessage::user(user_text));
        entry.messages.push(ChatMessage::assistant(assistant_text));

        // Two messages per turn; drop whole turns from the front.
        let max_messages = self.window * 2;
        if entry.messages.len() > max_messages {
            let excess = entry.messages.len() - max_messages;
            entry.messages.drain(..excess);
        }

        entry.last_access = Instant::now();
    }

    /// Remove every session whose last access is older than the TTL. Invoked
    /// opportunistically before memory-enabled requests, not on a timer, so
    /// staleness is only as fresh as request traffic makes it.
    pub fn sweep_expired(&self) {
        self.sweep_at(Instant::now());
    }

    fn sweep_at(&self, now: Instant) {
        let mut table = self.table();
        let before = table.len();
        table.retain(|_, entry| now.duration_since(entry.last_access) <= self.ttl);
        let removed = before - table.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = table.len(), "Swept expired sessions");
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.table().len()
    }
}
