//! Player roster loading and lookup.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One player from the reference roster. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name, unique within the roster (first match wins on
    /// collisions) and matched case-insensitively on lookup.
    pub name: String,
    /// Current team.
    pub team: String,
    /// Nationality.
    pub nationality: String,
    /// Raw birthdate text (e.g. `1997-05-20`); only the leading year is
    /// used, see [`crate::compare::age`].
    pub birthdate: String,
    /// Raw major-appearance count text.
    pub major_appearances: String,
}

/// Row shape of the roster CSV, mapped to the reference column names.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "NAME", default)]
    name: String,
    #[serde(rename = "TEAM", default)]
    team: String,
    #[serde(rename = "NATIONALITY", default)]
    nationality: String,
    #[serde(rename = "AGE", default)]
    birthdate: String,
    #[serde(rename = "MAJOR APPEARANCES", default)]
    major_appearances: String,
}

impl From<RawRow> for Player {
    fn from(raw: RawRow) -> Self {
        Self {
            name: raw.name.trim().to_string(),
            team: raw.team.trim().to_string(),
            nationality: raw.nationality.trim().to_string(),
            birthdate: raw.birthdate.trim().to_string(),
            major_appearances: raw.major_appearances.trim().to_string(),
        }
    }
}

/// Immutable, in-memory player roster.
///
/// An empty roster is valid but degraded: lookups miss and no game can
/// start until data is reloaded.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Build a roster from pre-parsed players.
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Best-effort load from a headered CSV file.
    ///
    /// A missing file yields an empty roster, and rows that fail to
    /// decode or carry a blank name are skipped; both are logged rather
    /// than treated as fatal. Only a structurally unreadable file is an
    /// error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !fs::metadata(path).map(|m| m.is_file()).unwrap_or(false) {
            warn!("roster file not found: {}", path.display());
            return Ok(Self::default());
        }

        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open roster {}", path.display()))?;

        let mut players = Vec::new();
        for (index, row) in reader.deserialize::<RawRow>().enumerate() {
            // Header occupies line 1.
            let line = index + 2;
            match row {
                Ok(raw) if raw.name.trim().is_empty() => {
                    warn!("skipping roster line {line}: blank NAME");
                }
                Ok(raw) => players.push(Player::from(raw)),
                Err(err) => {
                    warn!("skipping roster line {line}: {err}");
                }
            }
        }

        info!(
            "roster loaded from {}, total = {} players",
            path.display(),
            players.len()
        );
        Ok(Self { players })
    }

    /// Number of players in the roster.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when no players are loaded.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All players, in load order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Case-insensitive exact-name lookup; first match wins.
    pub fn lookup(&self, name: &str) -> Option<&Player> {
        let needle = name.to_lowercase();
        self.players
            .iter()
            .find(|player| player.name.to_lowercase() == needle)
    }

    /// Uniformly random player, or `None` when the roster is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Player> {
        self.players.choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use tempfile::tempdir;

    const SAMPLE_CSV: &str = "\
NAME,TEAM,NATIONALITY,AGE,MAJOR APPEARANCES
s1mple,Natus Vincere,Ukraine,1997-10-02,14
ZywOo,Vitality,France,2000-11-09,10
,Ghost Team,Nowhere,1990-01-01,2
device,Astralis,Denmark,1995-09-08,18
";

    fn sample_roster(dir: &Path, contents: &str) -> Result<Roster> {
        let path = dir.join("players.csv");
        fs::write(&path, contents)?;
        Roster::load(&path)
    }

    #[test]
    fn loads_rows_and_skips_blank_names() -> Result<()> {
        let temp = tempdir()?;
        let roster = sample_roster(temp.path(), SAMPLE_CSV)?;
        assert_eq!(roster.len(), 3);
        assert!(roster.lookup("Ghost Team").is_none());
        Ok(())
    }

    #[test]
    fn missing_file_degrades_to_empty_roster() -> Result<()> {
        let roster = Roster::load("definitely/not/here.csv")?;
        assert!(roster.is_empty());
        assert!(roster.lookup("s1mple").is_none());
        Ok(())
    }

    #[test]
    fn lookup_is_case_insensitive() -> Result<()> {
        let temp = tempdir()?;
        let roster = sample_roster(temp.path(), SAMPLE_CSV)?;
        let player = roster.lookup("ZYWOO").expect("expected a match");
        assert_eq!(player.name, "ZywOo");
        assert_eq!(player.team, "Vitality");
        Ok(())
    }

    #[test]
    fn lookup_returns_first_match_on_collisions() {
        let roster = Roster::new(vec![
            Player {
                name: "Dup".to_string(),
                team: "First".to_string(),
                nationality: "SE".to_string(),
                birthdate: "1999".to_string(),
                major_appearances: "1".to_string(),
            },
            Player {
                name: "dup".to_string(),
                team: "Second".to_string(),
                nationality: "DK".to_string(),
                birthdate: "1998".to_string(),
                major_appearances: "2".to_string(),
            },
        ]);
        assert_eq!(roster.lookup("DUP").map(|p| p.team.as_str()), Some("First"));
    }

    #[test]
    fn choose_is_none_only_when_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(Roster::default().choose(&mut rng).is_none());

        let roster = Roster::new(vec![Player {
            name: "Only".to_string(),
            team: "T".to_string(),
            nationality: "N".to_string(),
            birthdate: "2001".to_string(),
            major_appearances: "0".to_string(),
        }]);
        assert_eq!(roster.choose(&mut rng).map(|p| p.name.as_str()), Some("Only"));
    }

    #[test]
    fn choose_reaches_every_player() {
        let players: Vec<Player> = (0..4)
            .map(|i| Player {
                name: format!("p{i}"),
                team: String::new(),
                nationality: String::new(),
                birthdate: String::new(),
                major_appearances: String::new(),
            })
            .collect();
        let roster = Roster::new(players);

        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            if let Some(player) = roster.choose(&mut rng) {
                seen.insert(player.name.clone());
            }
        }
        assert_eq!(seen.len(), 4);
    }
}
