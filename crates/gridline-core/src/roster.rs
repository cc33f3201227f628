// Player profiles (season totals, per-game averages) and per-game logs.
//
// Profiles come from players.toml; game logs come from a CSV with one row per
// player per game, where each stat category's columns are left blank when the
// player had no line in that category.

use crate::stats::{PassingLine, PlayerGameRecord, ReceivingLine, RushingLine};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Season counting stats. Which fields are present depends on position.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeasonTotals {
    pub pass_yds: Option<i32>,
    pub pass_td: Option<u32>,
    pub pass_int: Option<u32>,
    pub comp_pct: Option<f64>,
    pub rush_yds: Option<i32>,
    pub rush_td: Option<u32>,
    pub receptions: Option<u32>,
    pub rec_yds: Option<i32>,
    pub rec_td: Option<u32>,
    pub first_tds: Option<u32>,
    pub red_zone_targets: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    /// Team key, matching `TeamProfile::key`.
    pub team: String,
    pub position: String,
    /// Lowercase nicknames recognised in queries (e.g. `jsn`).
    #[serde(default)]
    pub aliases: Vec<String>,
    pub games: u32,
    #[serde(flatten)]
    pub season: SeasonTotals,
    /// Per-game averages keyed by stat key (`pass_yds`, `receptions`, ...).
    #[serde(default)]
    pub averages: BTreeMap<String, f64>,
    /// Chronological game log, postseason included. Filled from the CSV.
    #[serde(skip)]
    pub game_log: Vec<PlayerGameRecord>,
}

impl PlayerProfile {
    pub fn average(&self, key: &str) -> Option<f64> {
        self.averages.get(key).copied()
    }

    /// Whether a lowercase query refers to this player: either name contains
    /// the other, or the query mentions one of the nicknames.
    fn matches(&self, query: &str) -> bool {
        let name = self.name.to_lowercase();
        name.contains(query)
            || query.contains(&name)
            || self
                .aliases
                .iter()
                .any(|a| !a.is_empty() && query.contains(&a.to_lowercase()))
    }
}

/// Every known player in file order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<PlayerProfile>,
}

impl Roster {
    pub fn new(players: Vec<PlayerProfile>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// First player the query refers to.
    pub fn find(&self, query: &str) -> Option<&PlayerProfile> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.players.iter().find(|p| p.matches(&query))
    }

    /// Like `find`, restricted to players with a game log.
    pub fn find_with_log(&self, query: &str) -> Option<&PlayerProfile> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.with_game_logs().find(|p| p.matches(&query))
    }

    pub fn with_game_logs(&self) -> impl Iterator<Item = &PlayerProfile> {
        self.players.iter().filter(|p| !p.game_log.is_empty())
    }

    pub fn on_team<'a>(&'a self, team_key: &'a str) -> impl Iterator<Item = &'a PlayerProfile> {
        self.players.iter().filter(move |p| p.team == team_key)
    }

    /// Names of players that have a game log, for "not found" hints.
    pub fn logged_names(&self) -> Vec<&str> {
        self.with_game_logs().map(|p| p.name.as_str()).collect()
    }

    /// Attach game-log rows to their profiles. Rows for unknown players are
    /// skipped with a warning. Returns the number of rows attached.
    pub fn attach_game_logs(&mut self, rows: Vec<(String, PlayerGameRecord)>) -> usize {
        let mut attached = 0;
        for (name, record) in rows {
            match self.players.iter_mut().find(|p| p.name == name) {
                Some(player) => {
                    player.game_log.push(record);
                    attached += 1;
                }
                None => warn!("game log row for unknown player '{}' skipped", name),
            }
        }
        attached
    }
}

// ---------------------------------------------------------------------------
// players.toml
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PlayersFile {
    #[serde(default)]
    players: Vec<PlayerProfile>,
}

pub(crate) fn parse_players(text: &str) -> Result<Vec<PlayerProfile>, toml::de::Error> {
    let file: PlayersFile = toml::from_str(text)?;
    Ok(file.players)
}

// ---------------------------------------------------------------------------
// player_game_logs.csv
// ---------------------------------------------------------------------------

/// One CSV row. A category counts as played when its yards column is filled;
/// the other columns of that category default to zero.
#[derive(Debug, Deserialize)]
struct RawGameRow {
    player: String,
    week: String,
    #[serde(default)]
    opponent: String,
    pass_cmp: Option<u32>,
    pass_att: Option<u32>,
    pass_yds: Option<i32>,
    pass_td: Option<u32>,
    pass_int: Option<u32>,
    rush_att: Option<u32>,
    rush_yds: Option<i32>,
    rush_td: Option<u32>,
    receptions: Option<u32>,
    rec_yds: Option<i32>,
    rec_td: Option<u32>,
    targets: Option<u32>,
}

impl RawGameRow {
    fn into_record(self) -> (String, PlayerGameRecord) {
        let passing = self.pass_yds.map(|yards| PassingLine {
            completions: self.pass_cmp.unwrap_or(0),
            attempts: self.pass_att.unwrap_or(0),
            yards,
            touchdowns: self.pass_td.unwrap_or(0),
            interceptions: self.pass_int.unwrap_or(0),
        });
        let rushing = self.rush_yds.map(|yards| RushingLine {
            attempts: self.rush_att.unwrap_or(0),
            yards,
            touchdowns: self.rush_td.unwrap_or(0),
        });
        let receiving = self.rec_yds.map(|yards| ReceivingLine {
            receptions: self.receptions.unwrap_or(0),
            yards,
            touchdowns: self.rec_td.unwrap_or(0),
            targets: self.targets,
        });
        (
            self.player.trim().to_string(),
            PlayerGameRecord {
                week: self.week.trim().to_string(),
                opponent: self.opponent.trim().to_string(),
                passing,
                rushing,
                receiving,
            },
        )
    }
}

pub(crate) fn load_game_logs_from_reader<R: Read>(
    rdr: R,
) -> Result<Vec<(String, PlayerGameRecord)>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawGameRow>() {
        match result {
            Ok(raw) => {
                if raw.player.trim().is_empty() {
                    warn!("skipping game log row with empty player name");
                    continue;
                }
                rows.push(raw.into_record());
            }
            Err(e) => {
                warn!("skipping malformed game log row: {}", e);
            }
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
