// The fixed tool catalog advertised to the model.

use gridline_llm::ToolDefinition;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    LiveGameOdds,
    PlayerProps,
    CompareLines,
    BestBets,
    TeamStats,
    PlayerStats,
    BettingTrends,
    PlayerGameLog,
    PlayTendencies,
    QuarterScoring,
    PropValue,
    FindValueProps,
}

impl ToolName {
    pub const ALL: [ToolName; 12] = [
        ToolName::LiveGameOdds,
        ToolName::PlayerProps,
        ToolName::CompareLines,
        ToolName::BestBets,
        ToolName::TeamStats,
        ToolName::PlayerStats,
        ToolName::BettingTrends,
        ToolName::PlayerGameLog,
        ToolName::PlayTendencies,
        ToolName::QuarterScoring,
        ToolName::PropValue,
        ToolName::FindValueProps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::LiveGameOdds => "get_live_game_odds",
            ToolName::PlayerProps => "get_player_props",
            ToolName::CompareLines => "compare_lines",
            ToolName::BestBets => "get_best_bets",
            ToolName::TeamStats => "get_team_stats",
            ToolName::PlayerStats => "get_player_stats",
            ToolName::BettingTrends => "get_betting_trends",
            ToolName::PlayerGameLog => "get_player_game_log",
            ToolName::PlayTendencies => "get_play_tendencies",
            ToolName::QuarterScoring => "get_quarter_scoring",
            ToolName::PropValue => "calculate_prop_value",
            ToolName::FindValueProps => "find_value_props",
        }
    }

    /// Exact, case-sensitive lookup; the model is given these names verbatim.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

// ---------------------------------------------------------------------------
// Parameter and tool specs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    Integer,
}

impl ParamKind {
    fn json_type(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
            ParamKind::Integer => "integer",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
    /// Allowed values, when the parameter is an enumeration.
    pub options: &'static [&'static str],
    pub default: Option<&'static str>,
}

impl ParamSpec {
    const fn new(
        name: &'static str,
        kind: ParamKind,
        required: bool,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required,
            description,
            options: &[],
            default: None,
        }
    }

    const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: ToolName,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

impl ToolSpec {
    /// JSON Schema object for the tool input.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for p in self.params {
            let mut prop = Map::new();
            prop.insert("type".into(), json!(p.kind.json_type()));
            prop.insert("description".into(), json!(p.description));
            if !p.options.is_empty() {
                prop.insert("enum".into(), json!(p.options));
            }
            if let Some(default) = p.default {
                prop.insert("default".into(), json!(default));
            }
            properties.insert(p.name.into(), Value::Object(prop));
            if p.required {
                required.push(p.name);
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.as_str().to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema(),
        }
    }
}

// ---------------------------------------------------------------------------
// The catalog
// ---------------------------------------------------------------------------

const STAT_KEYS: [&str; 10] = [
    "pass_yds",
    "pass_tds",
    "completions",
    "pass_attempts",
    "interceptions",
    "rush_yds",
    "rush_att",
    "receptions",
    "rec_yds",
    "targets",
];

pub const SITUATIONS: [&str; 7] = [
    "red_zone",
    "goal_line",
    "by_down",
    "trailing",
    "leading",
    "close_game",
    "target_share",
];

static CATALOG: [ToolSpec; 12] = [
    ToolSpec {
        name: ToolName::LiveGameOdds,
        description: "Get current spread, total (over/under), and moneyline odds from every US \
                      sportsbook for the game. Use for any question about game odds.",
        params: &[],
    },
    ToolSpec {
        name: ToolName::PlayerProps,
        description: "Get live player prop odds from every sportsbook. prop_type may be 'all', \
                      a category ('passing', 'rushing', 'receiving', 'touchdowns', 'combo', \
                      'defense'), or a market key such as 'player_pass_yds'. Injured players \
                      are excluded.",
        params: &[
            ParamSpec::new(
                "prop_type",
                ParamKind::String,
                false,
                "'all', a category name, or a specific player_* market key",
            )
            .default_value("all"),
            ParamSpec::new(
                "player_name",
                ParamKind::String,
                false,
                "Only show lines for this player",
            ),
        ],
    },
    ToolSpec {
        name: ToolName::CompareLines,
        description: "Compare one player's prop line across every sportsbook and show the best \
                      over and under prices. Use for line shopping.",
        params: &[
            ParamSpec::new("player_name", ParamKind::String, true, "Player to look up"),
            ParamSpec::new(
                "prop_type",
                ParamKind::String,
                true,
                "Prop market key, e.g. 'player_pass_yds', 'player_rush_yds', 'player_anytime_td'",
            ),
        ],
    },
    ToolSpec {
        name: ToolName::BestBets,
        description: "Best available price for each side of a market across all sportsbooks. \
                      market_type is 'spread', 'total', 'moneyline', or a player prop market key.",
        params: &[ParamSpec::new(
            "market_type",
            ParamKind::String,
            false,
            "spread/spreads, total/totals, moneyline/h2h, or a player_* market key",
        )
        .default_value("spread")],
    },
    ToolSpec {
        name: ToolName::TeamStats,
        description: "Season statistics and betting record for a team: ATS, over/under, home \
                      and road splits, scoring by quarter, and recent results.",
        params: &[ParamSpec::new(
            "team",
            ParamKind::String,
            true,
            "Team name, nickname, or abbreviation",
        )],
    },
    ToolSpec {
        name: ToolName::PlayerStats,
        description: "Season totals and per-game averages for a player.",
        params: &[ParamSpec::new(
            "player_name",
            ParamKind::String,
            true,
            "Player name or nickname",
        )],
    },
    ToolSpec {
        name: ToolName::BettingTrends,
        description: "Historical betting trends for this matchup type: underdog ATS, totals, \
                      first touchdown scorers, and officiating notes.",
        params: &[],
    },
    ToolSpec {
        name: ToolName::PlayerGameLog,
        description: "Game-by-game box score lines for a player this season, postseason \
                      included. Use to check consistency and recent form.",
        params: &[ParamSpec::new(
            "player_name",
            ParamKind::String,
            true,
            "Player name or nickname",
        )],
    },
    ToolSpec {
        name: ToolName::PlayTendencies,
        description: "Play-calling tendencies for a team: run/pass split by down, red zone and \
                      goal line, situational splits, pass depth, run direction, target share, \
                      and explosive plays.",
        params: &[
            ParamSpec::new("team", ParamKind::String, true, "Team name or nickname"),
            ParamSpec::new(
                "situation",
                ParamKind::String,
                false,
                "Limit the report to one situation",
            )
            .options(&SITUATIONS),
        ],
    },
    ToolSpec {
        name: ToolName::QuarterScoring,
        description: "Quarter-by-quarter scoring: scoreless quarters, average points per quarter \
                      and half, and a game-by-game breakdown. Use 'both' to compare teams.",
        params: &[ParamSpec::new(
            "team",
            ParamKind::String,
            true,
            "Team name, or 'both' to compare every team",
        )],
    },
    ToolSpec {
        name: ToolName::PropValue,
        description: "Historical hit rate of a player prop against a line, the fair odds that \
                      implies, and the edge against a sportsbook price. Use to judge whether a \
                      prop bet is good value.",
        params: &[
            ParamSpec::new("player_name", ParamKind::String, true, "Player name or nickname"),
            ParamSpec::new("stat_type", ParamKind::String, true, "Stat to test")
                .options(&STAT_KEYS),
            ParamSpec::new(
                "line",
                ParamKind::Number,
                true,
                "The prop line, e.g. 249.5",
            ),
            ParamSpec::new(
                "book_odds",
                ParamKind::Integer,
                false,
                "Sportsbook American odds to compare against (defaults to -110)",
            ),
        ],
    },
    ToolSpec {
        name: ToolName::FindValueProps,
        description: "Scan every healthy player with a game log for props whose historical hit \
                      rate beats -110 by at least min_edge percentage points.",
        params: &[
            ParamSpec::new(
                "stat_type",
                ParamKind::String,
                false,
                "'all' or one stat key to scan",
            )
            .default_value("all"),
            ParamSpec::new(
                "min_edge",
                ParamKind::Number,
                false,
                "Minimum edge in percentage points (defaults to 10)",
            ),
        ],
    },
];

/// Every tool, in catalog order.
pub fn catalog() -> &'static [ToolSpec] {
    &CATALOG
}

/// Definitions in the shape the model API expects.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    CATALOG.iter().map(ToolSpec::definition).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_core::stats::StatKind;
    use std::collections::HashSet;

    fn spec(name: ToolName) -> Option<&'static ToolSpec> {
        CATALOG.iter().find(|s| s.name == name)
    }

    #[test]
    fn catalog_has_twelve_unique_tools() {
        let names: HashSet<&str> = catalog().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), 12);
        for tool in ToolName::ALL {
            assert!(spec(tool).is_some(), "{} missing from catalog", tool.as_str());
        }
    }

    #[test]
    fn names_round_trip() {
        for tool in ToolName::ALL {
            assert_eq!(ToolName::from_name(tool.as_str()), Some(tool));
        }
        assert_eq!(ToolName::from_name("place_bet"), None);
        assert_eq!(ToolName::from_name("GET_LIVE_GAME_ODDS"), None);
    }

    #[test]
    fn stat_enum_matches_stat_kinds() {
        let kinds: Vec<&str> = StatKind::ALL.iter().map(|s| s.key()).collect();
        assert_eq!(STAT_KEYS.to_vec(), kinds);
    }

    #[test]
    fn prop_value_schema_lists_required_params() {
        let schema = spec(ToolName::PropValue).unwrap().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(
            schema["required"],
            json!(["player_name", "stat_type", "line"])
        );
        assert_eq!(schema["properties"]["line"]["type"], "number");
        assert_eq!(schema["properties"]["book_odds"]["type"], "integer");
        assert_eq!(schema["properties"]["stat_type"]["enum"][0], "pass_yds");
    }

    #[test]
    fn parameterless_tools_have_empty_schema() {
        let def = spec(ToolName::LiveGameOdds).unwrap().definition();
        assert_eq!(def.name, "get_live_game_odds");
        assert_eq!(def.input_schema["properties"], json!({}));
        assert_eq!(def.input_schema["required"], json!([]));
    }

    #[test]
    fn defaults_are_advertised() {
        let schema = spec(ToolName::BestBets).unwrap().input_schema();
        assert_eq!(schema["properties"]["market_type"]["default"], "spread");
        let schema = spec(ToolName::PlayTendencies).unwrap().input_schema();
        assert_eq!(schema["properties"]["situation"]["enum"].as_array().unwrap().len(), 7);
    }
}
