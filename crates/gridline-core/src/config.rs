// Configuration loading and parsing (assistant.toml, credentials.toml).

use crate::stats::StatKind;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder value shipped in templates; treated as "no key".
const PLACEHOLDER_ODDS_KEY: &str = "YOUR_ODDS_API_KEY";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub odds_api: OddsApiConfig,
    pub event: EventConfig,
    pub llm: LlmConfig,
    pub analysis: AnalysisConfig,
    pub server: ServerConfig,
    pub data_paths: DataPaths,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// assistant.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire assistant.toml file.
#[derive(Debug, Clone, Deserialize)]
struct AssistantFile {
    odds_api: OddsApiConfig,
    event: EventConfig,
    llm: LlmConfig,
    analysis: AnalysisConfig,
    server: ServerConfig,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OddsApiConfig {
    pub base_url: String,
    pub sport: String,
    pub regions: String,
    pub odds_format: String,
    pub timeout_secs: u64,
}

/// The game the assistant covers, used when the live event list has no
/// matching entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
    /// Keyword groups; a listed event matches when its team names contain a
    /// keyword from every group.
    pub match_terms: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub max_tokens: u32,
    /// Tool-execution rounds allowed before a request is abandoned.
    pub max_tool_rounds: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Reference price when the caller supplies none.
    pub default_book_odds: i32,
    /// Edge (percentage points) above which a side is flagged as value.
    pub value_threshold: f64,
    /// Edge below which a side is flagged as bad. Negative.
    pub bad_threshold: f64,
    pub scan_min_edge: f64,
    pub scan_min_games: usize,
    pub scan_max_results: usize,
    pub recent_games: usize,
    /// Stat key -> lines to test in a value scan.
    #[serde(default)]
    pub scan_lines: BTreeMap<String, Vec<f64>>,
}

impl AnalysisConfig {
    /// Scan lines keyed by stat, in `StatKind` order. Unknown keys are
    /// rejected at validation, so none are dropped here in practice.
    pub fn typed_scan_lines(&self) -> Vec<(StatKind, Vec<f64>)> {
        let mut lines: Vec<(StatKind, Vec<f64>)> = self
            .scan_lines
            .iter()
            .filter_map(|(key, values)| StatKind::from_key(key).map(|s| (s, values.clone())))
            .collect();
        lines.sort_by_key(|(stat, _)| *stat);
        lines
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
    pub player_game_logs: String,
    pub teams: String,
    pub team_results: String,
    pub quarter_scores: String,
    pub tendencies: String,
    pub trends: String,
    pub injuries: String,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub anthropic_api_key: Option<String>,
    pub odds_api_key: Option<String>,
}

impl CredentialsConfig {
    /// The odds key, unless missing, blank, or still the template placeholder.
    pub fn odds_key(&self) -> Option<&str> {
        self.odds_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_ODDS_KEY)
    }

    pub fn anthropic_key(&self) -> Option<&str> {
        self.anthropic_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Replace file values with non-empty environment values.
    pub(crate) fn apply_overrides(&mut self, anthropic: Option<String>, odds: Option<String>) {
        if let Some(key) = anthropic.filter(|k| !k.trim().is_empty()) {
            self.anthropic_api_key = Some(key);
        }
        if let Some(key) = odds.filter(|k| !k.trim().is_empty()) {
            self.odds_api_key = Some(key);
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/assistant.toml` and
/// (optionally) `config/credentials.toml`, relative to `base_dir`.
///
/// Does not copy defaults or read the environment; `load_config()` does both.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- assistant.toml (required) ---
    let assistant_path = config_dir.join("assistant.toml");
    let assistant_text = read_file(&assistant_path)?;
    let assistant: AssistantFile =
        toml::from_str(&assistant_text).map_err(|e| ConfigError::ParseError {
            path: assistant_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        odds_api: assistant.odds_api,
        event: assistant.event,
        llm: assistant.llm,
        analysis: assistant.analysis,
        server: assistant.server,
        data_paths: assistant.data_paths,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Loads config relative to the current working directory, seeding missing
/// files from `defaults/`, then applies `ANTHROPIC_API_KEY` / `ODDS_API_KEY`
/// from the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    let mut config = load_config_from(&cwd)?;
    config.credentials.apply_overrides(
        std::env::var("ANTHROPIC_API_KEY").ok(),
        std::env::var("ODDS_API_KEY").ok(),
    );
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.odds_api.timeout_secs == 0 {
        return Err(invalid("odds_api.timeout_secs", "must be greater than 0"));
    }
    if config.odds_api.base_url.trim().is_empty() {
        return Err(invalid("odds_api.base_url", "must not be empty"));
    }

    if config.event.match_terms.iter().any(|group| group.is_empty()) {
        return Err(invalid(
            "event.match_terms",
            "every keyword group needs at least one keyword",
        ));
    }

    let llm = &config.llm;
    if llm.max_tokens == 0 {
        return Err(invalid("llm.max_tokens", "must be greater than 0"));
    }
    if llm.max_tool_rounds == 0 {
        return Err(invalid("llm.max_tool_rounds", "must be greater than 0"));
    }
    if llm.timeout_secs == 0 {
        return Err(invalid("llm.timeout_secs", "must be greater than 0"));
    }

    let analysis = &config.analysis;
    if analysis.default_book_odds == 0 {
        return Err(invalid(
            "analysis.default_book_odds",
            "0 is not a valid American price",
        ));
    }
    if !analysis.value_threshold.is_finite() || analysis.value_threshold < 0.0 {
        return Err(invalid(
            "analysis.value_threshold",
            format!("must be >= 0, got {}", analysis.value_threshold),
        ));
    }
    if !analysis.bad_threshold.is_finite() || analysis.bad_threshold > 0.0 {
        return Err(invalid(
            "analysis.bad_threshold",
            format!("must be <= 0, got {}", analysis.bad_threshold),
        ));
    }
    if !analysis.scan_min_edge.is_finite() {
        return Err(invalid("analysis.scan_min_edge", "must be finite"));
    }
    if analysis.scan_max_results == 0 {
        return Err(invalid("analysis.scan_max_results", "must be greater than 0"));
    }
    if analysis.recent_games == 0 {
        return Err(invalid("analysis.recent_games", "must be greater than 0"));
    }
    for (key, lines) in &analysis.scan_lines {
        if StatKind::from_key(key).is_none() {
            return Err(invalid(
                &format!("analysis.scan_lines.{key}"),
                format!("unknown stat; expected one of {}", StatKind::all_keys()),
            ));
        }
        if let Some(bad) = lines.iter().find(|l| !l.is_finite()) {
            return Err(invalid(
                &format!("analysis.scan_lines.{key}"),
                format!("line must be finite, got {bad}"),
            ));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
