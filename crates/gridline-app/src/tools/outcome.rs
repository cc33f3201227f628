// Structured tool results. The dispatcher produces these; `render` turns them
// into the text the model reads.

use crate::odds::OddsApiError;
use gridline_core::injury::{InjuryEntry, InjuryList};
use gridline_core::market::{Event, MarketSnapshot, OddsQuote};
use gridline_core::roster::PlayerProfile;
use gridline_core::teams::{QuarterLine, QuarterSummary, TeamProfile, TeamTendencies, TrendBook};
use gridline_props::{PropValuation, ValueScan};

/// Quarter scoring for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamQuarters {
    pub team: String,
    pub summary: QuarterSummary,
    pub games: Vec<QuarterLine>,
}

/// Report sections for a play-tendencies request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TendencyFocus {
    All,
    ByDown,
    RedZone,
    GoalLine,
    /// One row of the situational table (`trailing`, `leading`, `close_game`).
    Situation(&'static str),
    TargetShare,
}

impl TendencyFocus {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "by_down" => Some(Self::ByDown),
            "red_zone" => Some(Self::RedZone),
            "goal_line" => Some(Self::GoalLine),
            "trailing" => Some(Self::Situation("trailing")),
            "leading" => Some(Self::Situation("leading")),
            "close_game" => Some(Self::Situation("close_game")),
            "target_share" => Some(Self::TargetShare),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    GameOdds {
        event: Event,
        quotes: Vec<OddsQuote>,
    },
    PlayerProps {
        prop_type: String,
        player_filter: Option<String>,
        /// Injury-filtered snapshots.
        snapshots: Vec<MarketSnapshot>,
        /// The whole exclusion list, shown as a banner.
        injured: Vec<InjuryEntry>,
        /// Per-market failures that did not stop the rest.
        errors: Vec<String>,
    },
    NoProps {
        prop_type: String,
        player: Option<String>,
    },
    LineComparison {
        player: String,
        market: String,
        /// Best price first.
        quotes: Vec<OddsQuote>,
    },
    NoLines {
        player: String,
        market: String,
    },
    InjuredPlayer(InjuryEntry),
    BestGameLines {
        market: String,
        lines: Vec<OddsQuote>,
    },
    TeamStats(Box<TeamProfile>),
    PlayerStats {
        player: Box<PlayerProfile>,
        team_name: String,
        injury: Option<InjuryEntry>,
    },
    BettingTrends(TrendBook),
    GameLog {
        player: Box<PlayerProfile>,
        injury: Option<InjuryEntry>,
    },
    Tendencies {
        team_name: String,
        tendencies: Box<TeamTendencies>,
        focus: TendencyFocus,
    },
    QuarterScoring(TeamQuarters),
    QuarterComparison(Vec<TeamQuarters>),
    PropValue {
        valuation: Box<PropValuation>,
        recent_games: usize,
    },
    ValueScan {
        min_edge: f64,
        book_odds: i32,
        scan: ValueScan,
    },
    /// An odds-service failure, recovered into text.
    FetchError(OddsApiError),
    NotFound(String),
    InvalidInput {
        tool: String,
        message: String,
    },
    NoData(String),
    UnknownTool(String),
}

impl ToolOutcome {
    /// Whether the outcome warns about an injured player.
    pub fn carries_injury_warning(&self) -> bool {
        match self {
            ToolOutcome::InjuredPlayer(_) => true,
            ToolOutcome::PlayerStats { injury, .. } | ToolOutcome::GameLog { injury, .. } => {
                injury.is_some()
            }
            ToolOutcome::PropValue { valuation, .. } => valuation.injury.is_some(),
            ToolOutcome::PlayerProps { injured, .. } => !injured.is_empty(),
            _ => false,
        }
    }
}

/// The injury entry for a player profile, matched on the canonical name.
pub(crate) fn injury_for(injuries: &InjuryList, player: &PlayerProfile) -> Option<InjuryEntry> {
    injuries.lookup(&player.name).cloned()
}
