// `/api/chat`: POST runs one conversation turn, GET reports health, OPTIONS
// answers preflight checks.

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use gridline_app::{Assistant, OddsStatus};
use gridline_llm::Message;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/chat", post(chat).get(health).options(preflight))
        .with_state(state)
        .layer(cors)
}

// ---------------------------------------------------------------------------
// POST
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: String,
    #[serde(default)]
    pub history: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub success: bool,
    pub response: String,
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(body) = body?;
    if body.message.trim().is_empty() {
        return Err(ApiError::InvalidBody("message must not be empty".into()));
    }

    let answer = state.assistant.chat(body.history, &body.message).await?;
    info!(
        rounds = answer.tool_rounds,
        tools = ?answer.tools_called,
        "chat answered"
    );
    Ok(Json(ChatReply {
        success: true,
        response: answer.text,
    }))
}

// ---------------------------------------------------------------------------
// GET
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub odds_api_key_set: bool,
    pub timestamp: String,
    pub odds_api_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odds_api_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_found: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchup: Option<String>,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    let mut health = Health {
        status: "ok",
        message: "Betting assistant API is running",
        odds_api_key_set: state.assistant.odds_key_set(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        odds_api_status: "connected",
        odds_api_error: None,
        events_count: None,
        event_found: None,
        event_id: None,
        matchup: None,
    };

    match state.assistant.odds_status().await {
        OddsStatus::Connected {
            events_count,
            event,
        } => {
            health.events_count = Some(events_count);
            health.event_found = Some(event.is_some());
            if let Some(event) = event {
                health.matchup = Some(event.matchup());
                health.event_id = Some(event.id);
            }
        }
        OddsStatus::Error(message) => {
            health.odds_api_status = "error";
            health.odds_api_error = Some(message);
        }
    }
    Json(health)
}

// ---------------------------------------------------------------------------
// OPTIONS
// ---------------------------------------------------------------------------

async fn preflight() -> StatusCode {
    StatusCode::OK
}
