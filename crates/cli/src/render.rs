//! Plain-text rendering of engine results.
//!
//! The engine only emits structured values; everything user-facing about
//! them lives here.

use std::fmt::Write;

use anyhow::Result;
use strikle_core::compare::Hint;
use strikle_core::{GameStarted, GameState, GuessFeedback, GuessOutcome, OrderedField};

pub fn started(started: &GameStarted) -> String {
    format!(
        "New game started, you have {} guesses!\n\
         Use 'guess <NAME>' to guess, or 'quit' to give up.",
        started.max_attempts
    )
}

pub fn help() -> String {
    "Commands:\n\
     \x20 start         begin a new game\n\
     \x20 guess <NAME>  guess a player\n\
     \x20 quit          abandon the current game\n\
     \x20 exit          leave"
        .to_string()
}

/// Render one guess outcome, either as text or as its JSON form.
pub fn feedback(feedback: &GuessFeedback, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(feedback)?);
    }

    let mut out = String::new();
    match &feedback.outcome {
        GuessOutcome::Hit => {
            let name = feedback
                .revealed_target
                .as_deref()
                .unwrap_or(&feedback.guessed_name);
            writeln!(out, "Congratulations! You guessed the correct player: {name}")?;
            write!(out, "Game over ~")?;
        }
        GuessOutcome::NotFound => {
            writeln!(
                out,
                "Player [{}] not found, please check the spelling.",
                feedback.guessed_name
            )?;
            write!(
                out,
                "Used {}/{} attempts, {} left.",
                feedback.attempts_used, feedback.max_attempts, feedback.attempts_left
            )?;
            append_reveal(&mut out, feedback)?;
        }
        GuessOutcome::Miss { comparison } => {
            writeln!(
                out,
                "Attempt #{} / {} — {}",
                feedback.attempts_used, feedback.max_attempts, feedback.guessed_name
            )?;
            writeln!(
                out,
                "  Team: {} {}",
                comparison.team.value,
                verdict(comparison.team.matches)
            )?;
            writeln!(
                out,
                "  Nationality: {} {}",
                comparison.nationality.value,
                verdict(comparison.nationality.matches)
            )?;
            writeln!(out, "  Age: {}", ordered(&comparison.age))?;
            writeln!(
                out,
                "  Major appearances: {}",
                ordered(&comparison.major_appearances)
            )?;
            write!(out, "Attempts left: {}", feedback.attempts_left)?;
            append_reveal(&mut out, feedback)?;
        }
    }
    Ok(out)
}

fn append_reveal(out: &mut String, feedback: &GuessFeedback) -> Result<()> {
    if feedback.state == GameState::Exhausted {
        if let Some(target) = &feedback.revealed_target {
            write!(out, "\nOut of attempts! The answer was [{target}].")?;
        }
    }
    Ok(())
}

fn verdict(matches: bool) -> &'static str {
    if matches {
        "(Correct)"
    } else {
        "(Wrong)"
    }
}

fn ordered(field: &OrderedField) -> String {
    let word = match field.hint {
        Hint::Same => "Same",
        Hint::Higher => "Higher",
        Hint::Lower => "Lower",
    };
    if field.fallback {
        format!("{} ({word}, unverified)", field.value)
    } else {
        format!("{} ({word})", field.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strikle_core::{CategoricalField, FieldComparison};

    fn miss_feedback() -> GuessFeedback {
        GuessFeedback {
            guessed_name: "Alpha".to_string(),
            attempts_used: 1,
            attempts_left: 1,
            max_attempts: 2,
            outcome: GuessOutcome::Miss {
                comparison: FieldComparison {
                    team: CategoricalField {
                        value: "A".to_string(),
                        matches: false,
                    },
                    nationality: CategoricalField {
                        value: "US".to_string(),
                        matches: true,
                    },
                    age: OrderedField {
                        value: 25,
                        fallback: false,
                        hint: Hint::Lower,
                    },
                    major_appearances: OrderedField {
                        value: 3,
                        fallback: false,
                        hint: Hint::Higher,
                    },
                },
            },
            state: GameState::Ongoing,
            revealed_target: None,
        }
    }

    #[test]
    fn miss_renders_every_field() -> Result<()> {
        let text = feedback(&miss_feedback(), false)?;
        assert!(text.contains("Attempt #1 / 2"));
        assert!(text.contains("Team: A (Wrong)"));
        assert!(text.contains("Nationality: US (Correct)"));
        assert!(text.contains("Age: 25 (Lower)"));
        assert!(text.contains("Major appearances: 3 (Higher)"));
        assert!(text.contains("Attempts left: 1"));
        assert!(!text.contains("The answer was"));
        Ok(())
    }

    #[test]
    fn exhausted_feedback_reveals_the_target() -> Result<()> {
        let mut exhausted = miss_feedback();
        exhausted.attempts_used = 2;
        exhausted.attempts_left = 0;
        exhausted.state = GameState::Exhausted;
        exhausted.revealed_target = Some("Beta".to_string());

        let text = feedback(&exhausted, false)?;
        assert!(text.contains("The answer was [Beta]."));
        Ok(())
    }

    #[test]
    fn json_mode_emits_the_structured_form() -> Result<()> {
        let text = feedback(&miss_feedback(), true)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(value["outcome"]["kind"], "miss");
        assert_eq!(value["outcome"]["comparison"]["age"]["hint"], "lower");
        Ok(())
    }
}
