// Per-game box score lines and the stat selectors the analyzer understands.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Box score lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PassingLine {
    pub completions: u32,
    pub attempts: u32,
    pub yards: i32,
    pub touchdowns: u32,
    pub interceptions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RushingLine {
    pub attempts: u32,
    pub yards: i32,
    pub touchdowns: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReceivingLine {
    pub receptions: u32,
    pub yards: i32,
    pub touchdowns: u32,
    /// Not every source tracks targets.
    pub targets: Option<u32>,
}

impl fmt::Display for PassingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}, {} yds, {} TD, {} INT",
            self.completions, self.attempts, self.yards, self.touchdowns, self.interceptions
        )
    }
}

impl fmt::Display for RushingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} att, {} yds, {} TD",
            self.attempts, self.yards, self.touchdowns
        )
    }
}

impl fmt::Display for ReceivingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rec, {} yds, {} TD",
            self.receptions, self.yards, self.touchdowns
        )?;
        if let Some(targets) = self.targets {
            write!(f, " ({targets} tgt)")?;
        }
        Ok(())
    }
}

/// One player's line for one game. A category is `None` when the player
/// recorded nothing in it, which is different from a zero line.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlayerGameRecord {
    /// Week number or playoff round (`WC`, `DIV`, `CONF`).
    pub week: String,
    pub opponent: String,
    pub passing: Option<PassingLine>,
    pub rushing: Option<RushingLine>,
    pub receiving: Option<ReceivingLine>,
}

// ---------------------------------------------------------------------------
// Stat selectors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StatKind {
    PassYards,
    PassTouchdowns,
    Completions,
    PassAttempts,
    Interceptions,
    RushYards,
    RushAttempts,
    Receptions,
    ReceivingYards,
    Targets,
}

impl StatKind {
    pub const ALL: [StatKind; 10] = [
        StatKind::PassYards,
        StatKind::PassTouchdowns,
        StatKind::Completions,
        StatKind::PassAttempts,
        StatKind::Interceptions,
        StatKind::RushYards,
        StatKind::RushAttempts,
        StatKind::Receptions,
        StatKind::ReceivingYards,
        StatKind::Targets,
    ];

    /// Wire key used in tool arguments and config.
    pub fn key(self) -> &'static str {
        match self {
            StatKind::PassYards => "pass_yds",
            StatKind::PassTouchdowns => "pass_tds",
            StatKind::Completions => "completions",
            StatKind::PassAttempts => "pass_attempts",
            StatKind::Interceptions => "interceptions",
            StatKind::RushYards => "rush_yds",
            StatKind::RushAttempts => "rush_att",
            StatKind::Receptions => "receptions",
            StatKind::ReceivingYards => "rec_yds",
            StatKind::Targets => "targets",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKind::PassYards => "Pass Yds",
            StatKind::PassTouchdowns => "Pass TDs",
            StatKind::Completions => "Completions",
            StatKind::PassAttempts => "Pass Attempts",
            StatKind::Interceptions => "Interceptions",
            StatKind::RushYards => "Rush Yds",
            StatKind::RushAttempts => "Rush Att",
            StatKind::Receptions => "Receptions",
            StatKind::ReceivingYards => "Rec Yds",
            StatKind::Targets => "Targets",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// Comma-separated list of every key, for error messages.
    pub fn all_keys() -> String {
        Self::ALL
            .iter()
            .map(|s| s.key())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Pull this stat out of a game record, or `None` when the game has no
    /// line in the stat's category.
    pub fn extract(self, record: &PlayerGameRecord) -> Option<f64> {
        let value = match self {
            StatKind::PassYards => f64::from(record.passing?.yards),
            StatKind::PassTouchdowns => f64::from(record.passing?.touchdowns),
            StatKind::Completions => f64::from(record.passing?.completions),
            StatKind::PassAttempts => f64::from(record.passing?.attempts),
            StatKind::Interceptions => f64::from(record.passing?.interceptions),
            StatKind::RushYards => f64::from(record.rushing?.yards),
            StatKind::RushAttempts => f64::from(record.rushing?.attempts),
            StatKind::Receptions => f64::from(record.receiving?.receptions),
            StatKind::ReceivingYards => f64::from(record.receiving?.yards),
            StatKind::Targets => f64::from(record.receiving?.targets?),
        };
        Some(value)
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn receiving_game(receptions: u32, yards: i32, targets: Option<u32>) -> PlayerGameRecord {
        PlayerGameRecord {
            week: "1".into(),
            opponent: "Arizona Cardinals".into(),
            passing: None,
            rushing: None,
            receiving: Some(ReceivingLine {
                receptions,
                yards,
                touchdowns: 0,
                targets,
            }),
        }
    }

    #[test]
    fn keys_round_trip() {
        for stat in StatKind::ALL {
            assert_eq!(StatKind::from_key(stat.key()), Some(stat));
        }
        assert_eq!(StatKind::from_key(" REC_YDS "), Some(StatKind::ReceivingYards));
        assert_eq!(StatKind::from_key("longest"), None);
    }

    #[test]
    fn extract_skips_missing_category() {
        let game = receiving_game(6, 88, Some(9));
        assert_eq!(StatKind::Receptions.extract(&game), Some(6.0));
        assert_eq!(StatKind::ReceivingYards.extract(&game), Some(88.0));
        assert_eq!(StatKind::Targets.extract(&game), Some(9.0));
        assert_eq!(StatKind::RushYards.extract(&game), None);
        assert_eq!(StatKind::PassYards.extract(&game), None);
    }

    #[test]
    fn missing_targets_is_absent_not_zero() {
        let game = receiving_game(2, 14, None);
        assert_eq!(StatKind::Targets.extract(&game), None);
        assert_eq!(StatKind::Receptions.extract(&game), Some(2.0));
    }

    #[test]
    fn negative_yards_survive_extraction() {
        let game = PlayerGameRecord {
            rushing: Some(RushingLine {
                attempts: 3,
                yards: -4,
                touchdowns: 0,
            }),
            ..Default::default()
        };
        assert_eq!(StatKind::RushYards.extract(&game), Some(-4.0));
    }

    #[test]
    fn lines_display_like_a_box_score() {
        let pass = PassingLine {
            completions: 16,
            attempts: 23,
            yards: 150,
            touchdowns: 0,
            interceptions: 0,
        };
        assert_eq!(pass.to_string(), "16/23, 150 yds, 0 TD, 0 INT");

        let rush = RushingLine {
            attempts: 2,
            yards: 14,
            touchdowns: 0,
        };
        assert_eq!(rush.to_string(), "2 att, 14 yds, 0 TD");

        let rec = ReceivingLine {
            receptions: 3,
            yards: 4,
            touchdowns: 0,
            targets: Some(3),
        };
        assert_eq!(rec.to_string(), "3 rec, 4 yds, 0 TD (3 tgt)");
    }
}
