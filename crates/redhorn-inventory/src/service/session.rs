//! # Session Registry
//!
//! Tracks which containers each client session currently has open. The
//! open state is a two-state machine per session (closed -> open -> closed)
//! that exists only in memory; it is never persisted.

use crate::domain::container::{ContainerKey, SessionId};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

pub(crate) struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Vec<ContainerKey>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Open (or re-open) a session over the given container scope.
    pub fn open(&self, session: SessionId, keys: Vec<ContainerKey>) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(session, keys);
    }

    /// Close a session. Returns whether it was open.
    pub fn close(&self, session: SessionId) -> bool {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(&session).is_some()
    }

    /// Whether every requested key is inside the session's open scope.
    pub fn covers(&self, session: SessionId, keys: &[&ContainerKey]) -> bool {
        let sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(&session) {
            Some(scope) => keys.iter().all(|key| scope.contains(key)),
            None => false,
        }
    }
}
