//! Game engine: session lifecycle and turn resolution.
//!
//! State machine per session key:
//! `NoSession -> Active -> {Won, Exhausted, Quit}`, where every terminal
//! state collapses back to `NoSession` by removing the session.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::compare;
use crate::feedback::{GameState, GuessFeedback, GuessOutcome};
use crate::roster::{Player, Roster};
use crate::session::SessionStore;

/// Attempt budget used when configuration does not override it.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;

/// Per-call failures surfaced to the command dispatcher. None are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The roster is empty; no game can start until data is reloaded.
    #[error("player roster is empty, cannot start a game")]
    EmptyRoster,
    /// The key has no active game; `start` recovers.
    #[error("no active game for this session")]
    NoActiveSession,
    /// A blank guess; does not consume an attempt.
    #[error("guess must not be empty")]
    EmptyGuess,
}

/// Reply to a successful `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStarted {
    /// Attempt budget for the new game, for display.
    pub max_attempts: u32,
}

/// Orchestrates the roster, the session store, and the comparator.
///
/// The engine is `Sync`; all shared state sits behind its own lock, so a
/// dispatcher may call into one instance from many tasks at once.
pub struct GameEngine {
    roster: Roster,
    sessions: SessionStore,
    max_attempts: u32,
    rng: Mutex<StdRng>,
}

impl GameEngine {
    /// Engine with an entropy-seeded target picker.
    pub fn new(roster: Roster, max_attempts: u32) -> Self {
        Self::with_rng(roster, max_attempts, StdRng::from_entropy())
    }

    /// Engine with a caller-supplied RNG, for deterministic tests.
    pub fn with_rng(roster: Roster, max_attempts: u32, rng: StdRng) -> Self {
        Self {
            roster,
            sessions: SessionStore::new(),
            max_attempts: max_attempts.max(1),
            rng: Mutex::new(rng),
        }
    }

    /// The loaded roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Number of games currently in flight.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Start a new game for `key`, silently replacing any game already in
    /// flight for that key.
    pub fn start(&self, key: &str) -> Result<GameStarted, GameError> {
        let target = {
            let mut rng = self.rng.lock();
            self.roster
                .choose(&mut *rng)
                .cloned()
                .ok_or(GameError::EmptyRoster)?
        };
        Ok(self.create_session(key, target))
    }

    fn create_session(&self, key: &str, target: Player) -> GameStarted {
        info!(key, "starting new game");
        debug!(key, target = %target.name, "target selected");
        self.sessions.create(key, target, self.max_attempts);
        GameStarted {
            max_attempts: self.max_attempts,
        }
    }

    /// Resolve one guess for `key`.
    ///
    /// A blank name is rejected before the attempt budget is touched;
    /// every other path consumes exactly one attempt. An unknown name is
    /// a valid turn outcome, not an error. A correct name wins regardless
    /// of remaining attempts; a non-winning final attempt exhausts the
    /// game. Terminal guesses remove the session and reveal the target.
    pub fn guess(&self, key: &str, raw_name: &str) -> Result<GuessFeedback, GameError> {
        if self.sessions.get(key).is_none() {
            return Err(GameError::NoActiveSession);
        }

        let name = raw_name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyGuess);
        }

        let guessed = self.roster.lookup(name).cloned();

        let feedback = self
            .sessions
            .resolve(key, |session| {
                session.attempts_used += 1;
                let attempts_used = session.attempts_used;
                let attempts_left = session.attempts_left();
                let last_attempt = attempts_left == 0;
                let target_name = session.target.name.clone();

                match guessed {
                    Some(player)
                        if player.name.to_lowercase() == target_name.to_lowercase() =>
                    {
                        let feedback = GuessFeedback {
                            guessed_name: player.name,
                            attempts_used,
                            attempts_left,
                            max_attempts: session.max_attempts,
                            outcome: GuessOutcome::Hit,
                            state: GameState::Won,
                            revealed_target: Some(target_name),
                        };
                        (feedback, true)
                    }
                    Some(player) => {
                        let comparison = compare::compare_players(&player, &session.target);
                        let feedback = GuessFeedback {
                            guessed_name: player.name,
                            attempts_used,
                            attempts_left,
                            max_attempts: session.max_attempts,
                            outcome: GuessOutcome::Miss { comparison },
                            state: if last_attempt {
                                GameState::Exhausted
                            } else {
                                GameState::Ongoing
                            },
                            revealed_target: last_attempt.then_some(target_name),
                        };
                        (feedback, last_attempt)
                    }
                    None => {
                        let feedback = GuessFeedback {
                            guessed_name: name.to_string(),
                            attempts_used,
                            attempts_left,
                            max_attempts: session.max_attempts,
                            outcome: GuessOutcome::NotFound,
                            state: if last_attempt {
                                GameState::Exhausted
                            } else {
                                GameState::Ongoing
                            },
                            revealed_target: last_attempt.then_some(target_name),
                        };
                        (feedback, last_attempt)
                    }
                }
            })
            .ok_or(GameError::NoActiveSession)?;

        if feedback.is_terminal() {
            info!(key, state = ?feedback.state, "game over");
        }
        Ok(feedback)
    }

    /// Abandon the game for `key`.
    pub fn quit(&self, key: &str) -> Result<(), GameError> {
        self.sessions
            .remove(key)
            .ok_or(GameError::NoActiveSession)?;
        info!(key, "game abandoned");
        Ok(())
    }

    /// Drop every active session. Called on shutdown and by periodic
    /// sweeps that bound memory growth from abandoned games.
    pub fn terminate(&self) {
        let cleared = self.sessions.len();
        self.sessions.clear_all();
        info!(cleared, "session store cleared");
    }
}
