//! Pure comparison logic behind guess feedback.
//!
//! Every derivation here is total over arbitrary roster input: a field
//! that fails to parse degrades to `0` with its `fallback` flag set, so
//! one malformed record can never abort a turn.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::feedback::{CategoricalField, FieldComparison, OrderedField};
use crate::roster::Player;

/// Fixed reference year for age derivation.
///
/// Deliberately a constant rather than the wall-clock year so feedback
/// for a given roster stays reproducible.
pub const REFERENCE_YEAR: i64 = 2025;

/// Three-way ordering of a guessed value relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hint {
    /// Guess equals the target value.
    Same,
    /// Guess exceeds the target value.
    Higher,
    /// Guess is below the target value.
    Lower,
}

impl Hint {
    /// Compare a guessed value against the target value.
    pub fn of(guess: i64, target: i64) -> Self {
        if guess == target {
            Hint::Same
        } else if guess > target {
            Hint::Higher
        } else {
            Hint::Lower
        }
    }
}

/// A numeric value derived from a raw roster field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derived {
    /// The derived number, `0` when the raw text was unparseable.
    pub value: i64,
    /// True when `value` is the fallback rather than a genuine parse.
    pub fallback: bool,
}

impl Derived {
    fn parsed(value: i64) -> Self {
        Self {
            value,
            fallback: false,
        }
    }

    fn unparsed() -> Self {
        Self {
            value: 0,
            fallback: true,
        }
    }
}

static LEADING_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)").expect("invalid leading-year regex"));

/// Age as of [`REFERENCE_YEAR`], derived from the leading year of a
/// birthdate string such as `1997-05-20`.
pub fn age(birthdate: &str) -> Derived {
    LEADING_YEAR_RE
        .captures(birthdate)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map(|year| Derived::parsed(REFERENCE_YEAR - year))
        .unwrap_or_else(Derived::unparsed)
}

/// Major-appearance count parsed from its raw text field.
pub fn appearance_count(raw: &str) -> Derived {
    raw.trim()
        .parse::<i64>()
        .map(Derived::parsed)
        .unwrap_or_else(|_| Derived::unparsed())
}

/// Equality check for categorical fields (team, nationality).
pub fn matches(guess: &str, target: &str) -> bool {
    guess == target
}

/// Full per-field comparison of a guessed player against the target.
pub fn compare_players(guess: &Player, target: &Player) -> FieldComparison {
    let guessed_age = age(&guess.birthdate);
    let target_age = age(&target.birthdate);
    let guessed_majors = appearance_count(&guess.major_appearances);
    let target_majors = appearance_count(&target.major_appearances);

    FieldComparison {
        team: CategoricalField {
            value: guess.team.clone(),
            matches: matches(&guess.team, &target.team),
        },
        nationality: CategoricalField {
            value: guess.nationality.clone(),
            matches: matches(&guess.nationality, &target.nationality),
        },
        age: OrderedField {
            value: guessed_age.value,
            fallback: guessed_age.fallback,
            hint: Hint::of(guessed_age.value, target_age.value),
        },
        major_appearances: OrderedField {
            value: guessed_majors.value,
            fallback: guessed_majors.fallback,
            hint: Hint::of(guessed_majors.value, target_majors.value),
        },
    }
}
