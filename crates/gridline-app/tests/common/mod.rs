// Shared fixtures for gridline-app integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use gridline_app::odds::{OddsApiError, OddsSource};
use gridline_core::config::{
    AnalysisConfig, Config, CredentialsConfig, DataPaths, EventConfig, LlmConfig, OddsApiConfig,
    ServerConfig,
};
use gridline_core::market::{Event, OddsQuote};
use gridline_core::reference::ReferenceData;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

pub fn data_paths() -> DataPaths {
    DataPaths {
        players: "data/players.toml".into(),
        player_game_logs: "data/player_game_logs.csv".into(),
        teams: "data/teams.toml".into(),
        team_results: "data/team_results.csv".into(),
        quarter_scores: "data/quarter_scores.csv".into(),
        tendencies: "data/tendencies.toml".into(),
        trends: "data/trends.toml".into(),
        injuries: "data/injuries.toml".into(),
    }
}

pub fn make_test_config(odds_base_url: &str, odds_key: Option<&str>) -> Config {
    Config {
        odds_api: OddsApiConfig {
            base_url: odds_base_url.to_string(),
            sport: "americanfootball_nfl".into(),
            regions: "us,us2".into(),
            odds_format: "american".into(),
            timeout_secs: 5,
        },
        event: EventConfig {
            id: "fallback-event".into(),
            home_team: "New England Patriots".into(),
            away_team: "Seattle Seahawks".into(),
            commence_time: "2026-02-08T23:30:00Z".parse().unwrap(),
            match_terms: vec![
                vec!["seattle".into(), "seahawk".into()],
                vec!["new england".into(), "patriot".into()],
            ],
        },
        llm: LlmConfig {
            model: "test-model".into(),
            max_tokens: 1024,
            max_tool_rounds: 4,
            timeout_secs: 5,
        },
        analysis: AnalysisConfig {
            default_book_odds: -110,
            value_threshold: 5.0,
            bad_threshold: -5.0,
            scan_min_edge: 10.0,
            scan_min_games: 5,
            scan_max_results: 15,
            recent_games: 5,
            scan_lines: BTreeMap::from([
                ("rush_yds".to_string(), vec![39.5, 49.5, 59.5, 69.5, 79.5]),
                ("receptions".to_string(), vec![3.5, 4.5, 5.5, 6.5, 7.5]),
                ("rec_yds".to_string(), vec![49.5, 59.5, 69.5, 79.5, 99.5]),
            ]),
        },
        server: ServerConfig {
            bind: "127.0.0.1".into(),
            port: 0,
        },
        data_paths: data_paths(),
        credentials: CredentialsConfig {
            anthropic_api_key: None,
            odds_api_key: odds_key.map(str::to_string),
        },
    }
}

pub fn reference_data() -> Arc<ReferenceData> {
    Arc::new(
        ReferenceData::load_from(&project_root(), &data_paths())
            .expect("shipped reference data should load"),
    )
}

pub fn live_event() -> Event {
    Event {
        id: "live-event".into(),
        home_team: "New England Patriots".into(),
        away_team: "Seattle Seahawks".into(),
        commence_time: "2026-02-08T23:30:00Z".parse().unwrap(),
    }
}

pub fn quote(
    book: &str,
    market: &str,
    outcome: &str,
    player: Option<&str>,
    line: Option<f64>,
    price: i32,
) -> OddsQuote {
    OddsQuote::new(book, market, outcome, player.map(str::to_string), line, price).unwrap()
}

/// In-memory odds source: a fixed event listing plus canned quotes, filtered
/// by requested market. Records every `event_odds` call.
pub struct StubOdds {
    pub events: Result<Vec<Event>, OddsApiError>,
    pub quotes: Result<Vec<OddsQuote>, OddsApiError>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl StubOdds {
    pub fn with_quotes(quotes: Vec<OddsQuote>) -> Self {
        Self {
            events: Ok(vec![live_event()]),
            quotes: Ok(quotes),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: OddsApiError) -> Self {
        Self {
            events: Err(error.clone()),
            quotes: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OddsSource for StubOdds {
    async fn list_events(&self) -> Result<Vec<Event>, OddsApiError> {
        self.events.clone()
    }

    async fn event_odds(
        &self,
        event_id: &str,
        markets: &[&str],
    ) -> Result<Vec<OddsQuote>, OddsApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((event_id.to_string(), markets.join(",")));
        let quotes = self.quotes.clone()?;
        Ok(quotes
            .into_iter()
            .filter(|q| markets.contains(&q.market.as_str()))
            .collect())
    }
}

/// Game lines and a few props, including quotes for the injured player.
pub fn sample_quotes() -> Vec<OddsQuote> {
    vec![
        quote("DraftKings", "spreads", "Seattle Seahawks", None, Some(-4.5), -110),
        quote("DraftKings", "spreads", "New England Patriots", None, Some(4.5), -110),
        quote("FanDuel", "spreads", "Seattle Seahawks", None, Some(-4.5), -105),
        quote("FanDuel", "totals", "Over", None, Some(45.5), -108),
        quote("FanDuel", "totals", "Under", None, Some(45.5), -112),
        quote("BetMGM", "h2h", "Seattle Seahawks", None, None, -205),
        quote("BetMGM", "h2h", "New England Patriots", None, None, 170),
        quote(
            "DraftKings",
            "player_rush_yds",
            "Over",
            Some("Kenneth Walker III"),
            Some(72.5),
            -115,
        ),
        quote(
            "FanDuel",
            "player_rush_yds",
            "Under",
            Some("Kenneth Walker III"),
            Some(71.5),
            -105,
        ),
        quote(
            "BetMGM",
            "player_rush_yds",
            "Over",
            Some("Zach Charbonnet"),
            Some(30.5),
            -110,
        ),
        quote(
            "DraftKings",
            "player_anytime_td",
            "Yes",
            Some("Kenneth Walker III"),
            None,
            -130,
        ),
    ]
}
