#![warn(clippy::all, missing_docs)]

//! Core game logic for Strikle, a session-based "guess the player" game.
//!
//! This crate hosts the player roster, the pure comparison functions,
//! the session store, and the game engine tying them together. Frontends
//! (chat dispatchers, CLIs) map user commands onto [`GameEngine`]'s
//! `start`/`guess`/`quit` operations and render the structured
//! [`GuessFeedback`] it returns; the core knows nothing about rendering.

pub mod compare;
pub mod config;
pub mod engine;
pub mod feedback;
pub mod roster;
pub mod session;

pub use config::AppConfig;
pub use engine::{GameEngine, GameError, GameStarted, DEFAULT_MAX_ATTEMPTS};
pub use feedback::{
    CategoricalField, FieldComparison, GameState, GuessFeedback, GuessOutcome, OrderedField,
};
pub use roster::{Player, Roster};
pub use session::{GameSession, SessionStore};
