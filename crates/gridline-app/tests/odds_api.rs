// OddsApiClient against a local mock of the odds service.

mod common;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use common::make_test_config;
use gridline_app::odds::{
    fetch_player_props, resolve_event, OddsApiClient, OddsApiError, OddsSource,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;

const API_KEY: &str = "test-key";

fn authorized(params: &HashMap<String, String>) -> bool {
    params.get("apiKey").map(String::as_str) == Some(API_KEY)
}

async fn events(
    Path(_sport): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        {
            "id": "other-game",
            "sport_key": "americanfootball_nfl",
            "commence_time": "2026-02-01T18:00:00Z",
            "home_team": "Kansas City Chiefs",
            "away_team": "Buffalo Bills"
        },
        {
            "id": "sb-live",
            "sport_key": "americanfootball_nfl",
            "commence_time": "2026-02-08T23:30:00Z",
            "home_team": "New England Patriots",
            "away_team": "Seattle Seahawks"
        }
    ]))
    .into_response()
}

async fn event_odds(
    Path((_sport, event_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match event_id.as_str() {
        "missing" => return StatusCode::NOT_FOUND.into_response(),
        "limited" => return StatusCode::TOO_MANY_REQUESTS.into_response(),
        "broken" => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        _ => {}
    }

    let markets = params.get("markets").cloned().unwrap_or_default();
    match markets.as_str() {
        "player_rush_yds" => Json(json!({
            "id": event_id,
            "bookmakers": [{
                "key": "draftkings",
                "title": "DraftKings",
                "markets": [{
                    "key": "player_rush_yds",
                    "outcomes": [
                        { "name": "Over", "description": "Kenneth Walker III", "price": -115, "point": 72.5 },
                        { "name": "Under", "description": "Kenneth Walker III", "price": -105, "point": 72.5 }
                    ]
                }]
            }]
        }))
        .into_response(),
        "player_rush_attempts" => StatusCode::NOT_FOUND.into_response(),
        "player_rush_longest" => StatusCode::TOO_MANY_REQUESTS.into_response(),
        _ => Json(json!({
            "id": event_id,
            "regions": params.get("regions"),
            "bookmakers": [{
                "key": "fanduel",
                "title": "FanDuel",
                "markets": [
                    {
                        "key": "spreads",
                        "outcomes": [
                            { "name": "Seattle Seahawks", "price": -110, "point": -4.5 },
                            { "name": "New England Patriots", "price": -110, "point": 4.5 }
                        ]
                    },
                    {
                        "key": "h2h",
                        "outcomes": [
                            { "name": "Seattle Seahawks", "price": -205 },
                            { "name": "New England Patriots", "price": 170 }
                        ]
                    }
                ]
            }]
        }))
        .into_response(),
    }
}

async fn spawn_mock() -> SocketAddr {
    let app = Router::new()
        .route("/sports/:sport/events", get(events))
        .route("/sports/:sport/events/:event_id/odds", get(event_odds));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, key: Option<&str>) -> OddsApiClient {
    OddsApiClient::from_config(&make_test_config(&format!("http://{addr}/"), key))
}

#[tokio::test]
async fn lists_events_and_resolves_the_covered_game() {
    let addr = spawn_mock().await;
    let client = client(addr, Some(API_KEY));

    let events = client.list_events().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, "other-game");

    let config = make_test_config("unused", None);
    let event = resolve_event(&client, &config.event).await;
    assert_eq!(event.id, "sb-live");
    assert_eq!(event.matchup(), "Seattle Seahawks @ New England Patriots");
}

#[tokio::test]
async fn event_odds_are_flattened() {
    let addr = spawn_mock().await;
    let client = client(addr, Some(API_KEY));

    let quotes = client
        .event_odds("sb-live", &["h2h", "spreads"])
        .await
        .unwrap();
    assert_eq!(quotes.len(), 4);
    assert!(quotes.iter().all(|q| q.bookmaker == "FanDuel"));
    let ml = quotes
        .iter()
        .find(|q| q.market == "h2h" && q.outcome == "New England Patriots")
        .unwrap();
    assert_eq!(ml.price, 170);
    assert!(ml.line.is_none());
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    let addr = spawn_mock().await;
    let client = client(addr, Some(API_KEY));

    assert_eq!(
        client.event_odds("missing", &["h2h"]).await.unwrap_err(),
        OddsApiError::NotFound {
            resource: "Event missing".into()
        }
    );
    assert_eq!(
        client
            .event_odds("missing", &["h2h"])
            .await
            .unwrap_err()
            .user_message(),
        "Event missing not found"
    );
    assert_eq!(
        client.event_odds("limited", &["h2h"]).await.unwrap_err(),
        OddsApiError::RateLimited
    );
    assert_eq!(
        client.event_odds("broken", &["h2h"]).await.unwrap_err(),
        OddsApiError::Status {
            status: 500,
            body: "upstream exploded".into()
        }
    );
}

#[tokio::test]
async fn wrong_key_is_unauthorized() {
    let addr = spawn_mock().await;
    let client = client(addr, Some("not-the-key"));
    assert_eq!(
        client.list_events().await.unwrap_err(),
        OddsApiError::Unauthorized
    );
}

#[tokio::test]
async fn missing_key_never_calls_the_service() {
    // Nothing listens here; a request would surface as a connection error.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(addr, None);
    assert!(!client.has_key());
    assert_eq!(
        client.list_events().await.unwrap_err(),
        OddsApiError::Unauthorized
    );
}

#[tokio::test]
async fn unreachable_service_is_a_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(addr, Some(API_KEY));
    let err = client.list_events().await.unwrap_err();
    assert!(matches!(err, OddsApiError::Connection(_)), "got {err:?}");
    assert!(err.user_message().ends_with("Check your network connection."));
}

#[tokio::test]
async fn prop_fetch_skips_unoffered_markets_and_keeps_going() {
    let addr = spawn_mock().await;
    let client = client(addr, Some(API_KEY));

    let markets = vec![
        "player_rush_yds".to_string(),
        "player_rush_attempts".to_string(),
        "player_rush_longest".to_string(),
    ];
    let fetch = fetch_player_props(&client, "sb-live", &markets).await;

    assert_eq!(fetch.snapshots.len(), 1);
    assert_eq!(fetch.snapshots[0].market, "player_rush_yds");
    assert_eq!(fetch.snapshots[0].quotes.len(), 2);
    assert_eq!(
        fetch.errors,
        vec!["player_rush_longest: API rate limit exceeded. Try again later.".to_string()]
    );
}
