// Edge of a historical hit rate over a sportsbook's implied probability, and
// the three-way value/fair/bad call.

use crate::hit_rate::HitRate;
use gridline_core::injury::{InjuryEntry, InjuryList};
use gridline_core::odds::american_to_probability;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Over,
    Under,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Over => "OVER",
            Side::Under => "UNDER",
        })
    }
}

/// Edge cutoffs in percentage points. `value` is positive, `bad` negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeThresholds {
    pub value: f64,
    pub bad: f64,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            value: 5.0,
            bad: -5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Value,
    Fair,
    Bad,
}

impl EdgeThresholds {
    pub fn classify(&self, edge: f64) -> Verdict {
        if edge > self.value {
            Verdict::Value
        } else if edge < self.bad {
            Verdict::Bad
        } else {
            Verdict::Fair
        }
    }
}

/// Edge in percentage points: `side_pct - implied * 100`.
pub fn edge(side_pct: f64, book_odds: i32) -> f64 {
    side_pct - american_to_probability(book_odds) * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideEdge {
    pub side: Side,
    pub hit_pct: f64,
    pub edge: f64,
    pub fair_odds: Option<i32>,
    pub verdict: Verdict,
}

/// A hit rate priced against one book price for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropValuation {
    pub player: String,
    pub hit_rate: HitRate,
    pub book_odds: i32,
    pub book_implied_pct: f64,
    pub over: SideEdge,
    pub under: SideEdge,
    /// Set when the player is on the injury list; overrides any edge.
    pub injury: Option<InjuryEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    /// Player is ruled out.
    DoNotBet,
    Bet(Side),
    NoEdge,
}

impl PropValuation {
    pub fn sides(&self) -> [&SideEdge; 2] {
        [&self.over, &self.under]
    }

    pub fn recommendation(&self) -> Recommendation {
        if self.injury.is_some() {
            return Recommendation::DoNotBet;
        }
        self.sides()
            .into_iter()
            .filter(|s| s.verdict == Verdict::Value)
            .max_by(|a, b| a.edge.total_cmp(&b.edge))
            .map(|s| Recommendation::Bet(s.side))
            .unwrap_or(Recommendation::NoEdge)
    }
}

/// Price both sides of `hit_rate` against `book_odds`.
pub fn evaluate(
    player: &str,
    hit_rate: HitRate,
    book_odds: i32,
    thresholds: &EdgeThresholds,
    injuries: &InjuryList,
) -> PropValuation {
    let side_edge = |side, hit_pct: f64, fair_odds| {
        let e = edge(hit_pct, book_odds);
        SideEdge {
            side,
            hit_pct,
            edge: e,
            fair_odds,
            verdict: thresholds.classify(e),
        }
    };
    let over = side_edge(Side::Over, hit_rate.over_pct, hit_rate.over_fair_odds);
    let under = side_edge(Side::Under, hit_rate.under_pct, hit_rate.under_fair_odds);

    PropValuation {
        player: player.to_string(),
        book_implied_pct: american_to_probability(book_odds) * 100.0,
        book_odds,
        over,
        under,
        injury: injuries.lookup(player).cloned(),
        hit_rate,
    }
}
