// Reference data loading: every static table the tools read, plus the injury
// list, assembled once at startup.

use crate::config::{Config, DataPaths};
use crate::injury::InjuryList;
use crate::roster::{self, Roster};
use crate::teams::{self, League, TeamTendencies, TrendBook};
use std::path::Path;
use tracing::info;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("TOML error in {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Everything the tool dispatcher reads besides live odds. Immutable after
/// loading.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub roster: Roster,
    pub league: League,
    pub tendencies: Vec<TeamTendencies>,
    pub trends: TrendBook,
    pub injuries: InjuryList,
}

impl ReferenceData {
    /// Load every table using the paths from the config, resolved against the
    /// current working directory.
    pub fn load(config: &Config) -> Result<Self, DataError> {
        Self::load_from(Path::new("."), &config.data_paths)
    }

    /// Load every table from `paths`, each resolved against `base`.
    pub fn load_from(base: &Path, paths: &DataPaths) -> Result<Self, DataError> {
        let players = {
            let path = base.join(&paths.players);
            let text = read_text(&path)?;
            roster::parse_players(&text).map_err(|e| toml_error(&path, e))?
        };
        let mut roster = Roster::new(players);

        let game_rows = {
            let path = base.join(&paths.player_game_logs);
            let file = open(&path)?;
            roster::load_game_logs_from_reader(file).map_err(|e| csv_error(&path, e))?
        };
        let attached = roster.attach_game_logs(game_rows);

        let team_list = {
            let path = base.join(&paths.teams);
            let text = read_text(&path)?;
            teams::parse_teams(&text).map_err(|e| toml_error(&path, e))?
        };
        let mut league = League::new(team_list);

        let results = {
            let path = base.join(&paths.team_results);
            let file = open(&path)?;
            teams::load_results_from_reader(file).map_err(|e| csv_error(&path, e))?
        };
        league.attach_results(results);

        let quarters = {
            let path = base.join(&paths.quarter_scores);
            let file = open(&path)?;
            teams::load_quarters_from_reader(file).map_err(|e| csv_error(&path, e))?
        };
        league.attach_quarters(quarters);

        let tendencies = {
            let path = base.join(&paths.tendencies);
            let text = read_text(&path)?;
            teams::parse_tendencies(&text).map_err(|e| toml_error(&path, e))?
        };

        let trends = {
            let path = base.join(&paths.trends);
            let text = read_text(&path)?;
            teams::parse_trends(&text).map_err(|e| toml_error(&path, e))?
        };

        let injuries: InjuryList = {
            let path = base.join(&paths.injuries);
            let text = read_text(&path)?;
            toml::from_str(&text).map_err(|e| toml_error(&path, e))?
        };

        if roster.is_empty() {
            return Err(DataError::Validation(
                "players file produced zero players".into(),
            ));
        }
        if league.is_empty() {
            return Err(DataError::Validation("teams file produced zero teams".into()));
        }

        info!(
            "Loaded reference data: {} players ({} game-log rows), {} teams, {} injuries",
            roster.len(),
            attached,
            league.teams().len(),
            injuries.entries().len()
        );

        Ok(Self {
            roster,
            league,
            tendencies,
            trends,
            injuries,
        })
    }

    pub fn tendencies_for(&self, team_key: &str) -> Option<&TeamTendencies> {
        self.tendencies.iter().find(|t| t.team == team_key)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_text(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn open(path: &Path) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn toml_error(path: &Path, source: toml::de::Error) -> DataError {
    DataError::Toml {
        path: path.display().to_string(),
        source,
    }
}

fn csv_error(path: &Path, source: csv::Error) -> DataError {
    DataError::Csv {
        path: path.display().to_string(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
