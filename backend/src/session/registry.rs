//! Per-client admin sessions, keyed by the id stored in the client's session
//! cookie.
//!
//! `SessionRegistry` is clonable and shared across the Actix application as
//! part of `AppState`. Entries live in memory only: failure counters, lockouts
//! and tokens are forgotten when the process restarts.
//!
//! Only sessions holding a live token or a recent failed attempt are stored.
//! Anything else is indistinguishable from a fresh session and is dropped, so
//! clients that never log in leave no trace.

use crate::session::AdminSession;
use std::time::Instant;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    /// Client session id to its admin session context.
    sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
}

impl SessionRegistry {
    /// A new, unused client session id.
    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Runs `f` on the session of `session_id`, or on a fresh one when none is
    /// stored. The result is kept only if it is not stale at `now`, and stale
    /// sessions of other clients are swept on the way. The registry stays
    /// write-locked while `f` runs.
    pub async fn with_session<R>(
        &self,
        session_id: &str,
        now: Instant,
        f: impl FnOnce(&mut AdminSession) -> R,
    ) -> R {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_stale(now));

        let mut session = sessions.remove(session_id).unwrap_or_default();
        let result = f(&mut session);
        if !session.is_stale(now) {
            sessions.insert(session_id.to_string(), session);
        }
        result
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
