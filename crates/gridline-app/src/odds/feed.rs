// Odds accessors built on an `OddsSource`: locating the covered game, game
// lines, and per-market player props.

use super::client::{OddsApiError, OddsSource};
use gridline_core::config::EventConfig;
use gridline_core::market::{Event, MarketSnapshot, OddsQuote, GAME_MARKETS};
use tracing::{debug, info, warn};

/// The configured event, used when the live listing has no match.
pub fn fallback_event(config: &EventConfig) -> Event {
    Event {
        id: config.id.clone(),
        home_team: config.home_team.clone(),
        away_team: config.away_team.clone(),
        commence_time: config.commence_time,
    }
}

/// Whether the event's team names contain a keyword from every group.
pub fn event_matches(event: &Event, match_terms: &[Vec<String>]) -> bool {
    let teams = format!("{} {}", event.home_team, event.away_team).to_lowercase();
    match_terms
        .iter()
        .all(|group| group.iter().any(|kw| teams.contains(&kw.to_lowercase())))
}

/// First listed event matching the configured teams, else the configured
/// fallback. Listing failures also fall back.
pub async fn resolve_event(source: &dyn OddsSource, config: &EventConfig) -> Event {
    match source.list_events().await {
        Ok(events) => {
            if let Some(event) = events
                .into_iter()
                .find(|e| event_matches(e, &config.match_terms))
            {
                debug!(event_id = %event.id, "resolved event from listing");
                return event;
            }
            debug!("no listed event matched; using configured event id");
        }
        Err(e) => debug!(error = %e, "event listing failed; using configured event id"),
    }
    fallback_event(config)
}

/// Spreads, totals, and moneylines in one call.
pub async fn fetch_game_odds(
    source: &dyn OddsSource,
    event_id: &str,
) -> Result<Vec<OddsQuote>, OddsApiError> {
    source.event_odds(event_id, &GAME_MARKETS).await
}

/// Result of a multi-market prop fetch. Failures on individual markets do
/// not abort the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropFetch {
    /// Markets that returned at least one quote, in request order.
    pub snapshots: Vec<MarketSnapshot>,
    /// `"<market>: <message>"` per failed market.
    pub errors: Vec<String>,
}

/// Fetch each market with its own call, one after another. A 404 means the
/// book has nothing for that market and is skipped silently.
pub async fn fetch_player_props(
    source: &dyn OddsSource,
    event_id: &str,
    markets: &[String],
) -> PropFetch {
    let mut fetch = PropFetch::default();

    for market in markets {
        match source.event_odds(event_id, &[market.as_str()]).await {
            Ok(quotes) => {
                let quotes: Vec<OddsQuote> =
                    quotes.into_iter().filter(|q| &q.market == market).collect();
                if quotes.is_empty() {
                    continue;
                }
                debug!(%market, quotes = quotes.len(), "prop market fetched");
                fetch.snapshots.push(MarketSnapshot::new(market.clone(), quotes));
            }
            Err(OddsApiError::NotFound { .. }) => {
                debug!(%market, "prop market not offered");
            }
            Err(e) => {
                fetch.errors.push(format!("{market}: {e}"));
            }
        }
    }

    if !fetch.errors.is_empty() {
        if fetch.snapshots.is_empty() {
            warn!(errors = ?fetch.errors, "every prop market failed");
        } else {
            info!(failed = fetch.errors.len(), "some prop markets failed");
        }
    }
    fetch
}
