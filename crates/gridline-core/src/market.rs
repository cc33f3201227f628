// Odds data model: events, per-book quotes, market snapshots, and the catalog
// of market keys the odds service understands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Game-level markets: moneyline, spread, total.
pub const GAME_MARKETS: [&str; 3] = ["h2h", "spreads", "totals"];

// ---------------------------------------------------------------------------
// Events and quotes
// ---------------------------------------------------------------------------

/// A scheduled game as listed by the odds service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub commence_time: DateTime<Utc>,
}

impl Event {
    /// `"Away @ Home"`.
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

/// One sportsbook's price for one outcome of one market.
///
/// `outcome` is the side (team name, "Over", "Under", "Yes"); for player
/// props `participant` carries the player the outcome is about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsQuote {
    pub bookmaker: String,
    pub market: String,
    pub outcome: String,
    pub participant: Option<String>,
    pub line: Option<f64>,
    pub price: i32,
}

impl OddsQuote {
    /// Build a quote, rejecting a zero price (not a valid American price).
    pub fn new(
        bookmaker: impl Into<String>,
        market: impl Into<String>,
        outcome: impl Into<String>,
        participant: Option<String>,
        line: Option<f64>,
        price: i32,
    ) -> Option<Self> {
        if price == 0 {
            return None;
        }
        Some(Self {
            bookmaker: bookmaker.into(),
            market: market.into(),
            outcome: outcome.into(),
            participant,
            line,
            price,
        })
    }

    /// The name a quote is about: the participant for props, otherwise the
    /// outcome label.
    pub fn subject(&self) -> &str {
        self.participant.as_deref().unwrap_or(&self.outcome)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.to_lowercase().contains("over")
    }

    pub fn is_under(&self) -> bool {
        self.outcome.to_lowercase().contains("under")
    }
}

/// All quotes for one market across the queried books, fetched fresh per
/// request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub market: String,
    pub quotes: Vec<OddsQuote>,
}

impl MarketSnapshot {
    pub fn new(market: impl Into<String>, quotes: Vec<OddsQuote>) -> Self {
        Self {
            market: market.into(),
            quotes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Player prop catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropCategory {
    Passing,
    Rushing,
    Receiving,
    Touchdowns,
    Combo,
    Defense,
}

impl PropCategory {
    pub const ALL: [PropCategory; 6] = [
        PropCategory::Passing,
        PropCategory::Rushing,
        PropCategory::Receiving,
        PropCategory::Touchdowns,
        PropCategory::Combo,
        PropCategory::Defense,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PropCategory::Passing => "passing",
            PropCategory::Rushing => "rushing",
            PropCategory::Receiving => "receiving",
            PropCategory::Touchdowns => "touchdowns",
            PropCategory::Combo => "combo",
            PropCategory::Defense => "defense",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn markets(self) -> &'static [&'static str] {
        match self {
            PropCategory::Passing => &[
                "player_pass_yds",
                "player_pass_tds",
                "player_pass_completions",
                "player_pass_attempts",
                "player_pass_interceptions",
                "player_pass_longest_completion",
            ],
            PropCategory::Rushing => &[
                "player_rush_yds",
                "player_rush_attempts",
                "player_rush_longest",
            ],
            PropCategory::Receiving => &[
                "player_receptions",
                "player_reception_yds",
                "player_reception_longest",
            ],
            PropCategory::Touchdowns => &[
                "player_anytime_td",
                "player_first_td",
                "player_last_td",
            ],
            PropCategory::Combo => &["player_pass_rush_yds", "player_rush_reception_yds"],
            PropCategory::Defense => &[
                "player_tackles_assists",
                "player_kicking_points",
                "player_field_goals_made",
            ],
        }
    }
}

/// Every player prop market, in category order.
pub fn all_prop_markets() -> Vec<&'static str> {
    PropCategory::ALL
        .iter()
        .flat_map(|c| c.markets().iter().copied())
        .collect()
}

/// Map a free-form prop type to the market keys to fetch.
///
/// Accepts `all`, a category name, a raw `player_*` market key, and a few
/// short aliases. Anything unrecognised falls back to every market.
pub fn resolve_prop_markets(prop_type: &str) -> Vec<String> {
    let normalized = prop_type.trim().to_lowercase();
    let markets: Vec<&str> = if normalized == "all" {
        all_prop_markets()
    } else if let Some(category) = PropCategory::from_key(&normalized) {
        category.markets().to_vec()
    } else if normalized.starts_with("player_") {
        return vec![normalized];
    } else {
        match normalized.as_str() {
            "pass" => PropCategory::Passing.markets().to_vec(),
            "rush" => PropCategory::Rushing.markets().to_vec(),
            "rec" => PropCategory::Receiving.markets().to_vec(),
            "td" => PropCategory::Touchdowns.markets().to_vec(),
            "anytime" => vec!["player_anytime_td"],
            "first" => vec!["player_first_td"],
            _ => all_prop_markets(),
        }
    };
    markets.into_iter().map(String::from).collect()
}

/// Normalize a game market name to its service key (`spread` -> `spreads`,
/// `moneyline` -> `h2h`). Returns `None` for non-game markets.
pub fn game_market_key(market_type: &str) -> Option<&'static str> {
    match market_type.trim().to_lowercase().as_str() {
        "spread" | "spreads" => Some("spreads"),
        "total" | "totals" => Some("totals"),
        "moneyline" | "h2h" => Some("h2h"),
        _ => None,
    }
}

/// Human label for a market key: `player_pass_yds` -> `Pass Yds`.
pub fn market_label(key: &str) -> String {
    key.trim_start_matches("player_")
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_price_is_rejected() {
        assert!(OddsQuote::new("dk", "h2h", "Seattle Seahawks", None, None, 0).is_none());
        let q = OddsQuote::new("dk", "h2h", "Seattle Seahawks", None, None, -185).unwrap();
        assert_eq!(q.price, -185);
        assert!(q.line.is_none());
    }

    #[test]
    fn subject_prefers_participant() {
        let prop = OddsQuote::new(
            "FanDuel",
            "player_pass_yds",
            "Over",
            Some("Sam Darnold".into()),
            Some(235.5),
            -115,
        )
        .unwrap();
        assert_eq!(prop.subject(), "Sam Darnold");
        assert!(prop.is_over());
        assert!(!prop.is_under());

        let side = OddsQuote::new("FanDuel", "spreads", "Seattle Seahawks", None, Some(-3.5), -110)
            .unwrap();
        assert_eq!(side.subject(), "Seattle Seahawks");
    }

    #[test]
    fn all_markets_cover_every_category() {
        let all = all_prop_markets();
        assert_eq!(all.len(), 20);
        assert_eq!(all[0], "player_pass_yds");
        assert!(all.contains(&"player_field_goals_made"));
    }

    #[test]
    fn resolve_category_and_aliases() {
        assert_eq!(resolve_prop_markets("rushing").len(), 3);
        assert_eq!(resolve_prop_markets("RUSH"), resolve_prop_markets("rushing"));
        assert_eq!(resolve_prop_markets("td"), resolve_prop_markets("touchdowns"));
        assert_eq!(resolve_prop_markets("anytime"), vec!["player_anytime_td"]);
        assert_eq!(resolve_prop_markets("first"), vec!["player_first_td"]);
    }

    #[test]
    fn resolve_raw_market_key() {
        assert_eq!(
            resolve_prop_markets("player_reception_yds"),
            vec!["player_reception_yds"]
        );
    }

    #[test]
    fn resolve_unknown_falls_back_to_everything() {
        assert_eq!(resolve_prop_markets("all").len(), 20);
        assert_eq!(resolve_prop_markets("whatever").len(), 20);
    }

    #[test]
    fn game_market_aliases() {
        assert_eq!(game_market_key("spread"), Some("spreads"));
        assert_eq!(game_market_key("Totals"), Some("totals"));
        assert_eq!(game_market_key("moneyline"), Some("h2h"));
        assert_eq!(game_market_key("player_pass_yds"), None);
    }

    #[test]
    fn market_labels() {
        assert_eq!(market_label("player_pass_yds"), "Pass Yds");
        assert_eq!(market_label("player_anytime_td"), "Anytime Td");
        assert_eq!(market_label("spreads"), "Spreads");
    }

    #[test]
    fn matchup_is_away_at_home() {
        let event = Event {
            id: "e1".into(),
            home_team: "New England Patriots".into(),
            away_team: "Seattle Seahawks".into(),
            commence_time: "2026-02-08T23:30:00Z".parse().unwrap(),
        };
        assert_eq!(event.matchup(), "Seattle Seahawks @ New England Patriots");
    }
}
