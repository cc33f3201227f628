// Tool dispatch: validate a tool call, run it against the odds source and
// the reference data, and hand back a structured outcome.

use super::args::{optional_f64, optional_i64, optional_str, required_f64, required_str, ArgError};
use super::catalog::ToolName;
use super::outcome::{injury_for, TeamQuarters, TendencyFocus, ToolOutcome};
use super::render::render;
use crate::odds::{fetch_game_odds, fetch_player_props, resolve_event, OddsApiError, OddsSource};
use async_trait::async_trait;
use gridline_core::config::{AnalysisConfig, Config, EventConfig};
use gridline_core::market::{game_market_key, resolve_prop_markets, MarketSnapshot};
use gridline_core::reference::ReferenceData;
use gridline_core::stats::StatKind;
use gridline_core::teams::summarize_quarters;
use gridline_props::shopping::{best_game_lines, compare_across_books, exclude_injured};
use gridline_props::{compute_hit_rate, evaluate, scan_value_props, EdgeThresholds, ScanRequest};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs a named tool and returns display text. The orchestrator only sees
/// this trait.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, name: &str, input: &Value) -> String;
}

/// Shared, read-only state every tool runs against.
pub struct Dispatcher {
    odds: Arc<dyn OddsSource>,
    data: Arc<ReferenceData>,
    event: EventConfig,
    analysis: AnalysisConfig,
    thresholds: EdgeThresholds,
}

impl Dispatcher {
    pub fn new(odds: Arc<dyn OddsSource>, data: Arc<ReferenceData>, config: &Config) -> Self {
        Self {
            odds,
            data,
            event: config.event.clone(),
            thresholds: EdgeThresholds {
                value: config.analysis.value_threshold,
                bad: config.analysis.bad_threshold,
            },
            analysis: config.analysis.clone(),
        }
    }

    /// Run one tool call. Never fails: every problem becomes an outcome.
    pub async fn dispatch(&self, name: &str, input: &Value) -> ToolOutcome {
        let Some(tool) = ToolName::from_name(name) else {
            debug!(tool = name, "unknown tool requested");
            return ToolOutcome::UnknownTool(name.to_string());
        };

        let started = Instant::now();
        let result = match tool {
            ToolName::LiveGameOdds => Ok(self.live_game_odds().await),
            ToolName::PlayerProps => self.player_props(input).await,
            ToolName::CompareLines => self.compare_lines(input).await,
            ToolName::BestBets => self.best_bets(input).await,
            ToolName::TeamStats => self.team_stats(input),
            ToolName::PlayerStats => self.player_stats(input),
            ToolName::BettingTrends => Ok(ToolOutcome::BettingTrends(self.data.trends.clone())),
            ToolName::PlayerGameLog => self.player_game_log(input),
            ToolName::PlayTendencies => self.play_tendencies(input),
            ToolName::QuarterScoring => self.quarter_scoring(input),
            ToolName::PropValue => self.prop_value(input),
            ToolName::FindValueProps => self.find_value_props(input),
        };
        let outcome = result.unwrap_or_else(|e| ToolOutcome::InvalidInput {
            tool: tool.as_str().to_string(),
            message: e.to_string(),
        });

        info!(
            tool = tool.as_str(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tool executed"
        );
        outcome
    }

    // -----------------------------------------------------------------------
    // Odds-backed tools
    // -----------------------------------------------------------------------

    async fn live_game_odds(&self) -> ToolOutcome {
        let event = resolve_event(self.odds.as_ref(), &self.event).await;
        match fetch_game_odds(self.odds.as_ref(), &event.id).await {
            Ok(quotes) => ToolOutcome::GameOdds { event, quotes },
            Err(e) => ToolOutcome::FetchError(e),
        }
    }

    async fn player_props(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let prop_type = optional_str(input, "prop_type").unwrap_or("all");
        let player = optional_str(input, "player_name");
        Ok(self.props_summary(prop_type, player).await)
    }

    async fn props_summary(&self, prop_type: &str, player: Option<&str>) -> ToolOutcome {
        if let Some(entry) = player.and_then(|p| self.data.injuries.matching(p)) {
            return ToolOutcome::InjuredPlayer(entry.clone());
        }

        let markets = resolve_prop_markets(prop_type);
        let event = resolve_event(self.odds.as_ref(), &self.event).await;
        let fetch = fetch_player_props(self.odds.as_ref(), &event.id, &markets).await;

        let snapshots = exclude_injured(fetch.snapshots, &self.data.injuries);
        let snapshots: Vec<MarketSnapshot> = match player {
            Some(p) => {
                let needle = p.to_lowercase();
                snapshots
                    .into_iter()
                    .filter_map(|mut snap| {
                        snap.quotes.retain(|q| {
                            q.participant
                                .as_deref()
                                .is_some_and(|name| name.to_lowercase().contains(&needle))
                        });
                        (!snap.is_empty()).then_some(snap)
                    })
                    .collect()
            }
            None => snapshots,
        };

        if snapshots.is_empty() && fetch.errors.is_empty() {
            return ToolOutcome::NoProps {
                prop_type: prop_type.to_string(),
                player: player.map(str::to_string),
            };
        }

        ToolOutcome::PlayerProps {
            prop_type: prop_type.to_string(),
            player_filter: player.map(str::to_string),
            snapshots,
            injured: self.data.injuries.entries().to_vec(),
            errors: fetch.errors,
        }
    }

    async fn compare_lines(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let player = required_str(input, "player_name")?;
        let prop = required_str(input, "prop_type")?.to_lowercase();

        if let Some(entry) = self.data.injuries.matching(player) {
            return Ok(ToolOutcome::InjuredPlayer(entry.clone()));
        }

        let market = if prop.starts_with("player_") {
            prop
        } else {
            format!("player_{prop}")
        };
        let event = resolve_event(self.odds.as_ref(), &self.event).await;
        let quotes = match self.odds.event_odds(&event.id, &[market.as_str()]).await {
            Ok(quotes) => quotes,
            Err(OddsApiError::NotFound { .. }) => Vec::new(),
            Err(e) => return Ok(ToolOutcome::FetchError(e)),
        };

        let snapshot = MarketSnapshot::new(market.clone(), quotes);
        let lines: Vec<_> = compare_across_books(&snapshot, player)
            .into_iter()
            .cloned()
            .collect();
        if lines.is_empty() {
            return Ok(ToolOutcome::NoLines {
                player: player.to_string(),
                market,
            });
        }
        Ok(ToolOutcome::LineComparison {
            player: player.to_string(),
            market,
            quotes: lines,
        })
    }

    async fn best_bets(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let market_type = optional_str(input, "market_type").unwrap_or("spread");
        let Some(market) = game_market_key(market_type) else {
            // Anything else is a player prop market.
            return Ok(self.props_summary(market_type, None).await);
        };

        let event = resolve_event(self.odds.as_ref(), &self.event).await;
        let quotes = match fetch_game_odds(self.odds.as_ref(), &event.id).await {
            Ok(quotes) => quotes,
            Err(e) => return Ok(ToolOutcome::FetchError(e)),
        };
        let lines = best_game_lines(&quotes, market).into_iter().cloned().collect();
        Ok(ToolOutcome::BestGameLines {
            market: market.to_string(),
            lines,
        })
    }

    // -----------------------------------------------------------------------
    // Reference-data tools
    // -----------------------------------------------------------------------

    fn team_stats(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let query = required_str(input, "team")?;
        Ok(match self.data.league.find(query) {
            Some(team) => ToolOutcome::TeamStats(Box::new(team.clone())),
            None => self.team_not_found(query),
        })
    }

    fn player_stats(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let query = required_str(input, "player_name")?;
        let Some(player) = self.data.roster.find(query) else {
            return Ok(ToolOutcome::NotFound(format!(
                "Player '{query}' not found in database."
            )));
        };
        let team_name = self
            .data
            .league
            .get(&player.team)
            .map_or_else(|| player.team.clone(), |t| t.name.clone());
        Ok(ToolOutcome::PlayerStats {
            injury: injury_for(&self.data.injuries, player),
            player: Box::new(player.clone()),
            team_name,
        })
    }

    fn player_game_log(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let query = required_str(input, "player_name")?;
        let Some(player) = self.data.roster.find_with_log(query) else {
            if let Some(entry) = self.data.injuries.matching(query) {
                return Ok(ToolOutcome::InjuredPlayer(entry.clone()));
            }
            return Ok(ToolOutcome::NotFound(format!(
                "Player '{query}' not found. Available players with game logs: {}",
                self.data.roster.logged_names().join(", ")
            )));
        };
        Ok(ToolOutcome::GameLog {
            injury: injury_for(&self.data.injuries, player),
            player: Box::new(player.clone()),
        })
    }

    fn play_tendencies(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let query = required_str(input, "team")?;
        let focus = match optional_str(input, "situation") {
            None => TendencyFocus::All,
            Some(s) => TendencyFocus::from_key(s).ok_or(ArgError::WrongType {
                name: "situation",
                expected: "one of red_zone, goal_line, by_down, trailing, leading, close_game, target_share",
            })?,
        };

        let Some(team) = self.data.league.find(query) else {
            return Ok(self.team_not_found(query));
        };
        Ok(match self.data.tendencies_for(&team.key) {
            Some(t) => ToolOutcome::Tendencies {
                team_name: team.name.clone(),
                tendencies: Box::new(t.clone()),
                focus,
            },
            None => ToolOutcome::NoData(format!("No play-by-play data for {}", team.name)),
        })
    }

    fn quarter_scoring(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let query = required_str(input, "team")?;
        let wants_all = matches!(query.to_lowercase().as_str(), "both" | "compare" | "all");

        if wants_all {
            let teams: Vec<TeamQuarters> = self
                .data
                .league
                .teams()
                .iter()
                .filter_map(|team| {
                    summarize_quarters(&team.quarters).map(|summary| TeamQuarters {
                        team: team.name.clone(),
                        summary,
                        games: team.quarters.clone(),
                    })
                })
                .collect();
            if teams.is_empty() {
                return Ok(ToolOutcome::NoData("No quarter scoring data available.".into()));
            }
            return Ok(ToolOutcome::QuarterComparison(teams));
        }

        let Some(team) = self.data.league.find(query) else {
            return Ok(self.team_not_found(query));
        };
        Ok(match summarize_quarters(&team.quarters) {
            Some(summary) => ToolOutcome::QuarterScoring(TeamQuarters {
                team: team.name.clone(),
                summary,
                games: team.quarters.clone(),
            }),
            None => ToolOutcome::NoData(format!("No quarter scoring data for {}", team.name)),
        })
    }

    fn team_not_found(&self, query: &str) -> ToolOutcome {
        ToolOutcome::NotFound(format!(
            "Team '{query}' not found. Available teams: {}",
            self.data.league.key_list()
        ))
    }

    // -----------------------------------------------------------------------
    // Analyzer tools
    // -----------------------------------------------------------------------

    fn prop_value(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let query = required_str(input, "player_name")?;
        let stat_key = required_str(input, "stat_type")?;
        let line = required_f64(input, "line")?;
        let book_odds = match optional_i64(input, "book_odds")? {
            None => self.analysis.default_book_odds,
            Some(odds) => match i32::try_from(odds) {
                Ok(o) if o != 0 => o,
                _ => {
                    return Err(ArgError::WrongType {
                        name: "book_odds",
                        expected: "a non-zero American price",
                    })
                }
            },
        };

        let Some(stat) = StatKind::from_key(stat_key) else {
            return Ok(ToolOutcome::NotFound(format!(
                "Unknown stat type: {stat_key}. Available: {}",
                StatKind::all_keys()
            )));
        };
        let Some(player) = self.data.roster.find(query) else {
            return Ok(ToolOutcome::NotFound(format!(
                "Player '{query}' not found. Available players: {}",
                self.data.roster.logged_names().join(", ")
            )));
        };
        let Some(hit_rate) = compute_hit_rate(&player.game_log, stat, line) else {
            // Without a sample there is no valuation to carry the warning.
            if let Some(entry) = injury_for(&self.data.injuries, player) {
                return Ok(ToolOutcome::InjuredPlayer(entry));
            }
            return Ok(ToolOutcome::NoData(format!(
                "No {} data found for {}",
                stat.key(),
                player.name
            )));
        };

        let valuation = evaluate(
            &player.name,
            hit_rate,
            book_odds,
            &self.thresholds,
            &self.data.injuries,
        );
        Ok(ToolOutcome::PropValue {
            valuation: Box::new(valuation),
            recent_games: self.analysis.recent_games,
        })
    }

    fn find_value_props(&self, input: &Value) -> Result<ToolOutcome, ArgError> {
        let stat_filter = optional_str(input, "stat_type").unwrap_or("all");
        let min_edge = optional_f64(input, "min_edge")?.unwrap_or(self.analysis.scan_min_edge);

        let mut lines = self.analysis.typed_scan_lines();
        if !stat_filter.eq_ignore_ascii_case("all") {
            let wanted = StatKind::from_key(stat_filter);
            lines.retain(|(stat, _)| Some(*stat) == wanted);
            if lines.is_empty() {
                let available: Vec<&str> = self
                    .analysis
                    .typed_scan_lines()
                    .iter()
                    .map(|(stat, _)| stat.key())
                    .collect();
                return Ok(ToolOutcome::NotFound(format!(
                    "Unknown stat type: {stat_filter}. Available: all, {}",
                    available.join(", ")
                )));
            }
        }

        let book_odds = self.analysis.default_book_odds;
        let request = ScanRequest {
            lines: &lines,
            min_edge,
            min_games: self.analysis.scan_min_games,
            max_results: self.analysis.scan_max_results,
            book_odds,
        };
        let scan = scan_value_props(&self.data.roster, &self.data.injuries, &request);
        Ok(ToolOutcome::ValueScan {
            min_edge,
            book_odds,
            scan,
        })
    }
}

#[async_trait]
impl ToolExecutor for Dispatcher {
    async fn execute(&self, name: &str, input: &Value) -> String {
        render(&self.dispatch(name, input).await)
    }
}
