// Odds service access.

pub mod client;
pub mod feed;

pub use client::{OddsApiClient, OddsApiError, OddsSource};
pub use feed::{
    event_matches, fallback_event, fetch_game_odds, fetch_player_props, resolve_event, PropFetch,
};
