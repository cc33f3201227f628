// How often a player's stat cleared a line over their game log.

use gridline_core::odds::probability_to_american;
use gridline_core::stats::{PlayerGameRecord, StatKind};
use serde::Serialize;

/// Hit-rate summary for one stat and line. Percentages and the average are
/// rounded to one decimal; fair odds come from the unrounded frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitRate {
    pub stat: StatKind,
    pub line: f64,
    /// Extracted values in game order, skipped games excluded.
    pub values: Vec<f64>,
    pub average: f64,
    pub over_count: usize,
    pub under_count: usize,
    pub over_pct: f64,
    pub under_pct: f64,
    pub over_fair_odds: Option<i32>,
    pub under_fair_odds: Option<i32>,
}

impl HitRate {
    pub fn games(&self) -> usize {
        self.values.len()
    }

    /// The last `n` values (all of them when fewer were played).
    pub fn recent(&self, n: usize) -> &[f64] {
        let start = self.values.len().saturating_sub(n);
        &self.values[start..]
    }

    /// How many of the last `n` values went over the line.
    pub fn recent_overs(&self, n: usize) -> usize {
        self.recent(n).iter().filter(|v| **v > self.line).count()
    }
}

/// Compute the hit rate of `stat` against `line`.
///
/// Games without the stat's category are skipped. Returns `None` when no game
/// has it, which is "no data" rather than a 0% rate. Over means strictly
/// greater than the line.
pub fn compute_hit_rate(games: &[PlayerGameRecord], stat: StatKind, line: f64) -> Option<HitRate> {
    let values: Vec<f64> = games.iter().filter_map(|g| stat.extract(g)).collect();
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let over_count = values.iter().filter(|v| **v > line).count();
    let under_count = values.len() - over_count;
    let over_p = over_count as f64 / n;
    let under_p = under_count as f64 / n;
    let average = values.iter().sum::<f64>() / n;

    Some(HitRate {
        stat,
        line,
        average: round1(average),
        over_count,
        under_count,
        over_pct: round1(over_p * 100.0),
        under_pct: round1(under_p * 100.0),
        over_fair_odds: probability_to_american(over_p),
        under_fair_odds: probability_to_american(under_p),
        values,
    })
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_core::stats::{PassingLine, ReceivingLine};

    fn passing_games(yards: &[i32]) -> Vec<PlayerGameRecord> {
        yards
            .iter()
            .enumerate()
            .map(|(i, y)| PlayerGameRecord {
                week: (i + 1).to_string(),
                opponent: "Opp".into(),
                passing: Some(PassingLine {
                    completions: 20,
                    attempts: 30,
                    yards: *y,
                    touchdowns: 1,
                    interceptions: 0,
                }),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn counts_overs_strictly_above_line() {
        let games = passing_games(&[200, 250, 300, 180, 400]);
        let hr = compute_hit_rate(&games, StatKind::PassYards, 249.5).unwrap();
        assert_eq!(hr.games(), 5);
        // 250, 300 and 400 clear 249.5.
        assert_eq!(hr.over_count, 3);
        assert_eq!(hr.under_count, 2);
        assert_eq!(hr.average, 266.0);
        assert_eq!(hr.over_pct, 60.0);
        assert_eq!(hr.under_pct, 40.0);
        assert_eq!(hr.over_fair_odds, Some(-150));
        assert_eq!(hr.under_fair_odds, Some(150));
    }

    #[test]
    fn value_equal_to_line_is_under() {
        let games = passing_games(&[250, 251]);
        let hr = compute_hit_rate(&games, StatKind::PassYards, 250.0).unwrap();
        assert_eq!(hr.over_count, 1);
        assert_eq!(hr.under_count, 1);
    }

    #[test]
    fn games_without_category_are_skipped() {
        let mut games = passing_games(&[1, 2, 3, 4, 5]);
        for (i, g) in games.iter_mut().enumerate() {
            if i != 1 && i != 3 {
                g.receiving = Some(ReceivingLine {
                    receptions: 4 + i as u32,
                    yards: 40,
                    touchdowns: 0,
                    targets: None,
                });
            }
        }
        let hr = compute_hit_rate(&games, StatKind::Receptions, 4.5).unwrap();
        assert_eq!(hr.games(), 3);
        assert_eq!(hr.values, vec![4.0, 6.0, 8.0]);
        assert_eq!(hr.over_count, 2);
    }

    #[test]
    fn no_matching_games_is_no_data() {
        let games = passing_games(&[250, 260]);
        assert!(compute_hit_rate(&games, StatKind::Receptions, 3.5).is_none());
        assert!(compute_hit_rate(&[], StatKind::PassYards, 3.5).is_none());
    }

    #[test]
    fn unanimous_results_have_no_fair_price() {
        let games = passing_games(&[300, 310, 320]);
        let hr = compute_hit_rate(&games, StatKind::PassYards, 199.5).unwrap();
        assert_eq!(hr.over_pct, 100.0);
        assert_eq!(hr.over_fair_odds, None);
        assert_eq!(hr.under_fair_odds, None);
    }

    #[test]
    fn fair_odds_use_unrounded_frequency() {
        // 1 of 3: 33.3% rounded, but the price comes from 1/3 exactly.
        let games = passing_games(&[300, 100, 100]);
        let hr = compute_hit_rate(&games, StatKind::PassYards, 200.5).unwrap();
        assert_eq!(hr.over_pct, 33.3);
        assert_eq!(hr.over_fair_odds, Some(200));
        assert_eq!(hr.under_fair_odds, Some(-200));
    }

    #[test]
    fn recent_window() {
        let games = passing_games(&[100, 200, 300, 400, 500, 600, 700]);
        let hr = compute_hit_rate(&games, StatKind::PassYards, 450.0).unwrap();
        assert_eq!(hr.recent(5), &[300.0, 400.0, 500.0, 600.0, 700.0]);
        assert_eq!(hr.recent_overs(5), 3);
        assert_eq!(hr.recent(20).len(), 7);
    }
}
