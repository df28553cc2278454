#![allow(missing_docs)]

//! Structured guess feedback, decoupled from any rendering.
//!
//! Frontends turn these value objects into chat text, JSON, or images;
//! the engine never knows how they are displayed.

use serde::{Deserialize, Serialize};

use crate::compare::Hint;

/// Lifecycle state of the game after a guess resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Ongoing,
    Won,
    Exhausted,
}

/// A categorical field (team, nationality) with its match flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalField {
    pub value: String,
    pub matches: bool,
}

/// A numeric field derived from raw text, with its ordering hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedField {
    pub value: i64,
    /// True when `value` is the parse fallback, not genuine data.
    pub fallback: bool,
    pub hint: Hint,
}

/// Per-field comparison of a guessed player against the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldComparison {
    pub team: CategoricalField,
    pub nationality: CategoricalField,
    pub age: OrderedField,
    pub major_appearances: OrderedField,
}

/// How a single guess resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuessOutcome {
    /// The guessed name matched the target.
    Hit,
    /// The guessed name is not in the roster. Still consumes an attempt.
    NotFound,
    /// A valid player that is not the target.
    Miss { comparison: FieldComparison },
}

/// Outcome of one resolved guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessFeedback {
    /// The name as resolved (roster spelling when found, raw input
    /// otherwise).
    pub guessed_name: String,
    pub attempts_used: u32,
    pub attempts_left: u32,
    pub max_attempts: u32,
    pub outcome: GuessOutcome,
    pub state: GameState,
    /// Target name, present exactly when the game ended.
    pub revealed_target: Option<String>,
}

impl GuessFeedback {
    /// True when this guess ended the game.
    pub fn is_terminal(&self) -> bool {
        self.state != GameState::Ongoing
    }
}
