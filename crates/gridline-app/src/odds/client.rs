// HTTP client for the odds service: event listing and per-event odds.
//
// Every failure is mapped to an `OddsApiError` whose Display text is the
// message shown to the user; callers never see a raw transport error.

use async_trait::async_trait;
use gridline_core::config::Config;
use gridline_core::market::{Event, OddsQuote};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// How much of an unexpected response body is quoted back.
const ERROR_BODY_LIMIT: usize = 200;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OddsApiError {
    #[error("Invalid API key. Check ODDS_API_KEY environment variable.")]
    Unauthorized,

    #[error("API rate limit exceeded. Try again later.")]
    RateLimited,

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Connection timed out. The Odds API may be slow or unavailable.")]
    Timeout,

    #[error("Connection error: {0}. Check your network connection.")]
    Connection(String),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response from the odds API: {0}")]
    Decode(String),
}

impl OddsApiError {
    /// The text shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            OddsApiError::Timeout
        } else if e.is_decode() {
            OddsApiError::Decode(e.to_string())
        } else {
            OddsApiError::Connection(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// OddsSource trait
// ---------------------------------------------------------------------------

/// Read access to the odds service. Implemented over HTTP by
/// `OddsApiClient`; tests substitute canned sources.
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Upcoming events for the configured sport.
    async fn list_events(&self) -> Result<Vec<Event>, OddsApiError>;

    /// All quotes for `markets` on one event, across every book returned.
    async fn event_odds(&self, event_id: &str, markets: &[&str])
        -> Result<Vec<OddsQuote>, OddsApiError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WireEventOdds {
    #[serde(default)]
    bookmakers: Vec<WireBookmaker>,
}

#[derive(Debug, Deserialize)]
struct WireBookmaker {
    #[serde(default)]
    key: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    markets: Vec<WireMarket>,
}

#[derive(Debug, Deserialize)]
struct WireMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<WireOutcome>,
}

#[derive(Debug, Deserialize)]
struct WireOutcome {
    name: String,
    /// Player name on prop markets.
    #[serde(default)]
    description: Option<String>,
    price: f64,
    #[serde(default)]
    point: Option<f64>,
}

/// Flatten an event-odds payload into quotes. Zero prices are dropped.
pub(crate) fn parse_event_odds(body: &str) -> Result<Vec<OddsQuote>, OddsApiError> {
    let payload: WireEventOdds =
        serde_json::from_str(body).map_err(|e| OddsApiError::Decode(e.to_string()))?;

    let mut quotes = Vec::new();
    for book in payload.bookmakers {
        let book_name = if book.title.is_empty() {
            book.key
        } else {
            book.title
        };
        for market in book.markets {
            for outcome in market.outcomes {
                let price = outcome.price.round() as i32;
                match OddsQuote::new(
                    book_name.clone(),
                    market.key.clone(),
                    outcome.name,
                    outcome.description,
                    outcome.point,
                    price,
                ) {
                    Some(q) => quotes.push(q),
                    None => debug!(book = %book_name, market = %market.key, "dropping zero-priced outcome"),
                }
            }
        }
    }
    Ok(quotes)
}

pub(crate) fn parse_events(body: &str) -> Result<Vec<Event>, OddsApiError> {
    serde_json::from_str(body).map_err(|e| OddsApiError::Decode(e.to_string()))
}

// ---------------------------------------------------------------------------
// OddsApiClient
// ---------------------------------------------------------------------------

pub struct OddsApiClient {
    http: reqwest::Client,
    base_url: String,
    sport: String,
    regions: String,
    odds_format: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl OddsApiClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.odds_api.base_url.trim_end_matches('/').to_string(),
            sport: config.odds_api.sport.clone(),
            regions: config.odds_api.regions.clone(),
            odds_format: config.odds_api.odds_format.clone(),
            api_key: config.credentials.odds_key().map(str::to_string),
            timeout: Duration::from_secs(config.odds_api.timeout_secs),
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// GET `url` with the API key plus `params`. Returns the body of a 200
    /// response; other statuses are mapped, with `not_found` used for 404.
    async fn get(
        &self,
        url: &str,
        params: &[(&str, &str)],
        not_found: impl FnOnce() -> OddsApiError,
    ) -> Result<String, OddsApiError> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("odds API key not configured, skipping request");
            return Err(OddsApiError::Unauthorized);
        };

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .header("Accept", "application/json")
            .query(&[("apiKey", key)])
            .query(params)
            .send()
            .await
            .map_err(OddsApiError::from_reqwest)?;

        let status = response.status().as_u16();
        debug!(status, %url, "odds API responded");

        match status {
            200 => response.text().await.map_err(OddsApiError::from_reqwest),
            401 => Err(OddsApiError::Unauthorized),
            429 => Err(OddsApiError::RateLimited),
            404 => Err(not_found()),
            _ => {
                let text = response.text().await.unwrap_or_default();
                let body: String = text.chars().take(ERROR_BODY_LIMIT).collect();
                warn!(status, %body, "odds API error");
                Err(OddsApiError::Status { status, body })
            }
        }
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    async fn list_events(&self) -> Result<Vec<Event>, OddsApiError> {
        let url = format!("{}/sports/{}/events", self.base_url, self.sport);
        let body = self
            .get(&url, &[], || OddsApiError::Status {
                status: 404,
                body: String::new(),
            })
            .await?;
        parse_events(&body)
    }

    async fn event_odds(
        &self,
        event_id: &str,
        markets: &[&str],
    ) -> Result<Vec<OddsQuote>, OddsApiError> {
        let url = format!(
            "{}/sports/{}/events/{}/odds",
            self.base_url, self.sport, event_id
        );
        let markets = markets.join(",");
        let params = [
            ("regions", self.regions.as_str()),
            ("markets", markets.as_str()),
            ("oddsFormat", self.odds_format.as_str()),
        ];
        let body = self
            .get(&url, &params, || OddsApiError::NotFound {
                resource: format!("Event {event_id}"),
            })
            .await?;
        parse_event_odds(&body)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
