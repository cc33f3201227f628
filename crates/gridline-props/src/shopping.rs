// Line shopping: find the best price for a side across books, compare one
// player's prop everywhere it is offered, and strip injured players from
// fetched props.

use crate::edge::Side;
use gridline_core::injury::InjuryList;
use gridline_core::market::{MarketSnapshot, OddsQuote};
use std::collections::BTreeMap;

/// Every quote in `snapshot` about `player` (case-insensitive substring of
/// the participant), best price first.
pub fn compare_across_books<'a>(snapshot: &'a MarketSnapshot, player: &str) -> Vec<&'a OddsQuote> {
    let needle = player.trim().to_lowercase();
    let mut quotes: Vec<&OddsQuote> = snapshot
        .quotes
        .iter()
        .filter(|q| {
            q.participant
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&needle))
        })
        .collect();
    quotes.sort_by(|a, b| b.price.cmp(&a.price));
    quotes
}

/// Highest-priced quote on the given side. Ties keep the first seen.
pub fn best_price<'a, I>(quotes: I, side: Side) -> Option<&'a OddsQuote>
where
    I: IntoIterator<Item = &'a OddsQuote>,
{
    let mut best: Option<&OddsQuote> = None;
    for q in quotes {
        let on_side = match side {
            Side::Over => q.is_over(),
            Side::Under => q.is_under(),
        };
        if on_side && best.map_or(true, |b| q.price > b.price) {
            best = Some(q);
        }
    }
    best
}

/// Best price per (outcome, line) for one game market, in first-seen order.
pub fn best_game_lines<'a>(quotes: &'a [OddsQuote], market_key: &str) -> Vec<&'a OddsQuote> {
    let mut best: Vec<&OddsQuote> = Vec::new();
    for q in quotes.iter().filter(|q| q.market == market_key) {
        match best
            .iter_mut()
            .find(|b| b.outcome == q.outcome && b.line == q.line)
        {
            Some(slot) => {
                if q.price > slot.price {
                    *slot = q;
                }
            }
            None => best.push(q),
        }
    }
    best
}

/// Drop quotes about injured players. Snapshots left empty are dropped too.
pub fn exclude_injured(snapshots: Vec<MarketSnapshot>, injuries: &InjuryList) -> Vec<MarketSnapshot> {
    snapshots
        .into_iter()
        .map(|mut snap| {
            snap.quotes.retain(|q| !injuries.is_out(q.subject()));
            snap
        })
        .filter(|snap| !snap.is_empty())
        .collect()
}

/// One player's quotes within a market.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerLines<'a> {
    pub player: &'a str,
    pub quotes: Vec<&'a OddsQuote>,
}

/// Group a prop snapshot by player (sorted by name), keeping at most
/// `max_books` quotes per player in fetched order. `filter` keeps only
/// players whose name contains it.
pub fn group_by_player<'a>(
    snapshot: &'a MarketSnapshot,
    filter: Option<&str>,
    max_books: usize,
) -> Vec<PlayerLines<'a>> {
    let filter = filter
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty());
    let mut grouped: BTreeMap<&str, Vec<&OddsQuote>> = BTreeMap::new();
    for q in &snapshot.quotes {
        let player = q.participant.as_deref().unwrap_or("Unknown");
        if let Some(f) = &filter {
            if !player.to_lowercase().contains(f.as_str()) {
                continue;
            }
        }
        grouped.entry(player).or_default().push(q);
    }
    grouped
        .into_iter()
        .map(|(player, mut quotes)| {
            quotes.truncate(max_books);
            PlayerLines { player, quotes }
        })
        .collect()
}
