//! # Session Store
//!
//! Holds interview sessions keyed by an opaque session id. Handlers only see
//! the `SessionStore` trait, so the in-memory map can be swapped for an
//! external store without touching request code.
//!
//! ## Expiry:
//! Each entry carries its own deadline (`ttl` after the last `set`/`touch`).
//! Expired entries are dropped when they are next accessed; there is no
//! background sweeper. An abandoned session is never accessed again, so the
//! in-memory map is unbounded and `count` only reflects entries still live.

use super::clock::Clock;
use super::session::InterviewSession;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Mutation applied in place by `SessionStore::update`.
pub type SessionUpdate = Box<dyn FnOnce(&mut InterviewSession) + Send>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Live session for `id`, if any.
    async fn get(&self, id: &str) -> Result<Option<InterviewSession>>;

    /// Insert or replace the session under its own id and refresh its expiry.
    async fn set(&self, session: InterviewSession) -> Result<()>;

    /// Apply `update` to the stored session. Returns `false` when the session
    /// is gone. Does not refresh expiry.
    async fn update(&self, id: &str, update: SessionUpdate) -> Result<bool> {
        match self.get(id).await? {
            Some(mut session) => {
                update(&mut session);
                self.set(session).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Refresh the expiry of a live session.
    async fn touch(&self, id: &str) -> Result<bool>;

    /// Remove the session immediately.
    async fn expire(&self, id: &str) -> Result<bool>;

    /// Number of live sessions.
    async fn count(&self) -> Result<usize>;
}

struct StoredSession {
    session: InterviewSession,
    expires_at: DateTime<Utc>,
}

/// Process-local session store.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    pub fn new(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs as i64),
            clock,
        }
    }

    fn lock_error() -> anyhow::Error {
        anyhow::anyhow!("session store lock poisoned")
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<InterviewSession>> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().map_err(|_| Self::lock_error())?;
        match sessions.get(id) {
            Some(stored) if stored.expires_at > now => Ok(Some(stored.session.clone())),
            Some(_) => {
                sessions.remove(id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, session: InterviewSession) -> Result<()> {
        let expires_at = self.clock.now() + self.ttl;
        let mut sessions = self.sessions.write().map_err(|_| Self::lock_error())?;
        sessions.insert(
            session.id.clone(),
            StoredSession {
                session,
                expires_at,
            },
        );
        Ok(())
    }

    async fn update(&self, id: &str, update: SessionUpdate) -> Result<bool> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().map_err(|_| Self::lock_error())?;
        match sessions.get_mut(id) {
            Some(stored) if stored.expires_at > now => {
                update(&mut stored.session);
                Ok(true)
            }
            Some(_) => {
                sessions.remove(id);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn touch(&self, id: &str) -> Result<bool> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().map_err(|_| Self::lock_error())?;
        match sessions.get_mut(id) {
            Some(stored) if stored.expires_at > now => {
                stored.expires_at = now + self.ttl;
                Ok(true)
            }
            Some(_) => {
                sessions.remove(id);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn expire(&self, id: &str) -> Result<bool> {
        let mut sessions = self.sessions.write().map_err(|_| Self::lock_error())?;
        Ok(sessions.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize> {
        let now = self.clock.now();
        let sessions = self.sessions.read().map_err(|_| Self::lock_error())?;
        Ok(sessions.values().filter(|s| s.expires_at > now).count())
    }
}
