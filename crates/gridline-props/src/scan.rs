// Value scan: test every logged player against a grid of lines and keep the
// sides whose historical edge over the reference price clears a minimum.

use crate::edge::{edge, Side};
use crate::hit_rate::compute_hit_rate;
use gridline_core::injury::InjuryList;
use gridline_core::roster::Roster;
use gridline_core::stats::StatKind;
use serde::Serialize;
use tracing::debug;

/// Scan parameters. `lines` pairs each stat with the lines to test.
#[derive(Debug, Clone)]
pub struct ScanRequest<'a> {
    pub lines: &'a [(StatKind, Vec<f64>)],
    pub min_edge: f64,
    pub min_games: usize,
    pub max_results: usize,
    pub book_odds: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueProp {
    pub player: String,
    pub stat: StatKind,
    pub line: f64,
    pub side: Side,
    pub hit_pct: f64,
    pub edge: f64,
    pub fair_odds: Option<i32>,
    pub average: f64,
    pub games: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueScan {
    /// Matches before truncation to `max_results`.
    pub found: usize,
    /// Best edges first.
    pub props: Vec<ValueProp>,
}

/// Run the scan. Injured players are skipped entirely, as are stat/line
/// combinations with fewer than `min_games` games.
pub fn scan_value_props(roster: &Roster, injuries: &InjuryList, req: &ScanRequest<'_>) -> ValueScan {
    let mut props = Vec::new();

    for player in roster.with_game_logs() {
        if injuries.is_out(&player.name) {
            debug!(player = %player.name, "value scan skipping injured player");
            continue;
        }
        for (stat, lines) in req.lines {
            for &line in lines {
                let Some(hr) = compute_hit_rate(&player.game_log, *stat, line) else {
                    continue;
                };
                if hr.games() < req.min_games {
                    continue;
                }
                let sides = [
                    (Side::Over, hr.over_pct, hr.over_fair_odds),
                    (Side::Under, hr.under_pct, hr.under_fair_odds),
                ];
                for (side, hit_pct, fair_odds) in sides {
                    let e = edge(hit_pct, req.book_odds);
                    if e >= req.min_edge {
                        props.push(ValueProp {
                            player: player.name.clone(),
                            stat: *stat,
                            line,
                            side,
                            hit_pct,
                            edge: e,
                            fair_odds,
                            average: hr.average,
                            games: hr.games(),
                        });
                    }
                }
            }
        }
    }

    props.sort_by(|a, b| b.edge.total_cmp(&a.edge));
    let found = props.len();
    props.truncate(req.max_results);
    debug!(found, kept = props.len(), "value scan complete");

    ValueScan { found, props }
}
