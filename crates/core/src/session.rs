//! Active game sessions keyed by an opaque session key.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::roster::Player;

/// One in-flight game for a single session key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// The player to be guessed; fixed for the session's lifetime.
    pub target: Player,
    /// Resolved guesses so far, `0..=max_attempts`.
    pub attempts_used: u32,
    /// Attempt budget fixed at creation.
    pub max_attempts: u32,
    /// When the session was created.
    pub started_at: DateTime<Utc>,
}

impl GameSession {
    /// Attempts still available.
    pub fn attempts_left(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_used)
    }
}

/// Store of active sessions, at most one per key.
///
/// All mutation goes through the engine's operations. A single mutex
/// guards the map; [`SessionStore::resolve`] runs an entire guess
/// resolution inside one critical section so two concurrent guesses on
/// the same key can never increment from the same stale count.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, GameSession>>,
}

impl SessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `key`, silently replacing any existing one.
    pub fn create(&self, key: &str, target: Player, max_attempts: u32) {
        let session = GameSession {
            target,
            attempts_used: 0,
            max_attempts,
            started_at: Utc::now(),
        };
        self.inner.lock().insert(key.to_string(), session);
    }

    /// Snapshot of the session for `key`, if any.
    pub fn get(&self, key: &str) -> Option<GameSession> {
        self.inner.lock().get(key).cloned()
    }

    /// Remove and return the session for `key`.
    pub fn remove(&self, key: &str) -> Option<GameSession> {
        self.inner.lock().remove(key)
    }

    /// Drop every session. Safe to call when none are active.
    pub fn clear_all(&self) {
        self.inner.lock().clear();
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True when no sessions are active.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` against the live session for `key` inside the store's
    /// critical section. `f` returns its result plus whether the session
    /// is finished; finished sessions are removed before the lock is
    /// released. Returns `None` when no session exists for `key`.
    pub fn resolve<T>(
        &self,
        key: &str,
        f: impl FnOnce(&mut GameSession) -> (T, bool),
    ) -> Option<T> {
        let mut sessions = self.inner.lock();
        let session = sessions.get_mut(key)?;
        let (result, finished) = f(session);
        if finished {
            sessions.remove(key);
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> Player {
        Player {
            name: name.to_string(),
            team: "T".to_string(),
            nationality: "N".to_string(),
            birthdate: "1999-01-01".to_string(),
            major_appearances: "4".to_string(),
        }
    }

    #[test]
    fn create_replaces_existing_session() {
        let store = SessionStore::new();
        store.create("k", player("old"), 6);
        store.resolve("k", |session| {
            session.attempts_used += 1;
            ((), false)
        });

        store.create("k", player("new"), 6);
        let session = store.get("k").expect("expected a session");
        assert_eq!(session.target.name, "new");
        assert_eq!(session.attempts_used, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn resolve_removes_finished_sessions() {
        let store = SessionStore::new();
        store.create("k", player("t"), 2);

        let left = store.resolve("k", |session| {
            session.attempts_used += 1;
            (session.attempts_left(), false)
        });
        assert_eq!(left, Some(1));
        assert!(store.get("k").is_some());

        let left = store.resolve("k", |session| {
            session.attempts_used += 1;
            (session.attempts_left(), true)
        });
        assert_eq!(left, Some(0));
        assert!(store.get("k").is_none());

        assert_eq!(store.resolve("k", |_| ((), false)), None);
    }

    #[test]
    fn keys_are_independent() {
        let store = SessionStore::new();
        store.create("a", player("x"), 6);
        store.create("b", player("y"), 6);
        store.remove("a");
        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
    }

    #[test]
    fn clear_all_is_safe_when_empty() {
        let store = SessionStore::new();
        store.clear_all();
        assert!(store.is_empty());

        store.create("k", player("t"), 6);
        store.clear_all();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn concurrent_attempts_never_lose_updates() {
        use std::sync::Arc;

        let store = Arc::new(SessionStore::new());
        store.create("k", player("t"), 1_000);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        store.resolve("k", |session| {
                            session.attempts_used += 1;
                            ((), false)
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker panicked");
        }

        let session = store.get("k").expect("expected a session");
        assert_eq!(session.attempts_used, 400);
    }
}
