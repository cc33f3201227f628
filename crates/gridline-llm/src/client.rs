// Claude Messages API client (non-streaming, with tool use).
//
// One `complete` call sends the whole transcript plus the tool catalog and
// returns the parsed response envelope. Tool execution happens in the caller.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::message::{ChatRequest, ChatResponse, Message, ToolDefinition};
use gridline_core::config::Config;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// How much of an error body is kept in `LlmError::Status`.
const ERROR_BODY_LIMIT: usize = 200;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM not configured: set ANTHROPIC_API_KEY or add anthropic_api_key to config/credentials.toml")]
    NotConfigured,

    #[error("request to the model API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("model API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode model response: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// ChatModel trait
// ---------------------------------------------------------------------------

/// A chat-completion backend. The orchestrator only sees this trait, so tests
/// can script responses.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError>;
}

// ---------------------------------------------------------------------------
// ClaudeClient
// ---------------------------------------------------------------------------

/// Request body as sent on the wire.
#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tools: &'a [ToolDefinition],
    messages: &'a [Message],
}

pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl ClaudeClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            endpoint: ANTHROPIC_API_URL.to_string(),
            timeout,
        }
    }

    /// Point the client at a different Messages endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl ChatModel for ClaudeClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::NotConfigured);
        }

        let body = WireRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            tools: &request.tools,
            messages: &request.messages,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(LlmError::Transport)?;
        debug!(status = status.as_u16(), bytes = text.len(), "model API responded");

        if !status.is_success() {
            let message = parse_error_message(&text)
                .unwrap_or_else(|| text.chars().take(ERROR_BODY_LIMIT).collect());
            warn!(status = status.as_u16(), %message, "model API error");
            return Err(LlmError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))?;
        debug!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            stop_reason = parsed.stop_reason.as_deref().unwrap_or("-"),
            "model response decoded"
        );
        Ok(parsed)
    }
}

// ---------------------------------------------------------------------------
// LlmClient wrapper
// ---------------------------------------------------------------------------

/// Either an active Claude client or disabled for lack of a key.
pub enum LlmClient {
    Active(ClaudeClient),
    Disabled,
}

impl LlmClient {
    /// `Active` when an Anthropic key is configured, otherwise `Disabled`.
    pub fn from_config(config: &Config) -> Self {
        match config.credentials.anthropic_key() {
            Some(key) => LlmClient::Active(ClaudeClient::new(
                key.to_string(),
                config.llm.model.clone(),
                Duration::from_secs(config.llm.timeout_secs),
            )),
            None => LlmClient::Disabled,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LlmClient::Active(_))
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        match self {
            LlmClient::Active(client) => client.complete(request).await,
            LlmClient::Disabled => Err(LlmError::NotConfigured),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON parsing helpers
// ---------------------------------------------------------------------------

/// Extract `error.message` from an API error body.
///
/// Expected shape: `{ "type": "error", "error": { "type": "...", "message": "..." } }`
pub(crate) fn parse_error_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ContentBlock;
    use gridline_core::config::{
        AnalysisConfig, CredentialsConfig, DataPaths, EventConfig, LlmConfig, OddsApiConfig,
        ServerConfig,
    };
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn make_test_config(api_key: Option<String>) -> Config {
        Config {
            odds_api: OddsApiConfig {
                base_url: "http://127.0.0.1:1".into(),
                sport: "americanfootball_nfl".into(),
                regions: "us".into(),
                odds_format: "american".into(),
                timeout_secs: 5,
            },
            event: EventConfig {
                id: "evt".into(),
                home_team: "New England Patriots".into(),
                away_team: "Seattle Seahawks".into(),
                commence_time: "2026-02-08T23:30:00Z".parse().unwrap(),
                match_terms: vec![vec!["seattle".into()], vec!["patriot".into()]],
            },
            llm: LlmConfig {
                model: "claude-sonnet-4-20250514".into(),
                max_tokens: 1024,
                max_tool_rounds: 4,
                timeout_secs: 10,
            },
            analysis: AnalysisConfig {
                default_book_odds: -110,
                value_threshold: 5.0,
                bad_threshold: -5.0,
                scan_min_edge: 10.0,
                scan_min_games: 5,
                scan_max_results: 15,
                recent_games: 5,
                scan_lines: Default::default(),
            },
            server: ServerConfig {
                bind: "127.0.0.1".into(),
                port: 0,
            },
            data_paths: DataPaths {
                players: String::new(),
                player_game_logs: String::new(),
                teams: String::new(),
                team_results: String::new(),
                quarter_scores: String::new(),
                tendencies: String::new(),
                trends: String::new(),
                injuries: String::new(),
            },
            credentials: CredentialsConfig {
                anthropic_api_key: api_key,
                odds_api_key: None,
            },
        }
    }

    fn sample_request() -> ChatRequest {
        ChatRequest {
            system: "You are a betting assistant.".into(),
            tools: vec![ToolDefinition {
                name: "get_live_game_odds".into(),
                description: "Current spreads, totals, and moneylines".into(),
                input_schema: json!({ "type": "object", "properties": {} }),
            }],
            messages: vec![Message::user("What's the spread?")],
            max_tokens: 256,
        }
    }

    /// Read one HTTP request (headers plus Content-Length body).
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve one canned response and hand back the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            request
        });
        (format!("http://{addr}/v1/messages"), handle)
    }

    // -- JSON parsing --

    #[test]
    fn parse_error_message_reads_nested_message() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(parse_error_message(body), Some("Overloaded".to_string()));
    }

    #[test]
    fn parse_error_message_rejects_other_shapes() {
        assert_eq!(parse_error_message("not json"), None);
        assert_eq!(parse_error_message(r#"{"error":"flat"}"#), None);
    }

    // -- from_config --

    #[test]
    fn from_config_with_api_key_returns_active() {
        let client = LlmClient::from_config(&make_test_config(Some("sk-ant-test".into())));
        assert!(client.is_active());
        match client {
            LlmClient::Active(inner) => assert_eq!(inner.model, "claude-sonnet-4-20250514"),
            LlmClient::Disabled => unreachable!(),
        }
    }

    #[test]
    fn from_config_without_api_key_returns_disabled() {
        assert!(!LlmClient::from_config(&make_test_config(None)).is_active());
        assert!(!LlmClient::from_config(&make_test_config(Some("  ".into()))).is_active());
    }

    // -- Disabled and empty-key paths --

    #[tokio::test]
    async fn disabled_client_reports_not_configured() {
        let err = LlmClient::Disabled
            .complete(&sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }

    #[tokio::test]
    async fn empty_api_key_reports_not_configured() {
        let client = ClaudeClient::new(String::new(), "m".into(), Duration::from_secs(1));
        let err = client.complete(&sample_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }

    // -- Mock server --

    #[tokio::test]
    async fn mock_server_tool_use_round_trip() {
        let body = json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [
                { "type": "tool_use", "id": "toolu_01", "name": "get_live_game_odds", "input": {} }
            ],
            "stop_reason": "tool_use",
            "usage": { "input_tokens": 30, "output_tokens": 12 }
        })
        .to_string();
        let (url, server) = serve_once("200 OK", body).await;

        let client = ClaudeClient::new("sk-test".into(), "test-model".into(), Duration::from_secs(5))
            .with_endpoint(url);
        let resp = client.complete(&sample_request()).await.unwrap();

        assert_eq!(resp.tool_calls().len(), 1);
        assert_eq!(resp.usage.output_tokens, 12);

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(lower.starts_with("post /v1/messages"));
        assert!(lower.contains("x-api-key: sk-test"));
        assert!(lower.contains("anthropic-version: 2023-06-01"));

        let json_start = request.find('{').unwrap();
        let sent: Value = serde_json::from_str(&request[json_start..]).unwrap();
        assert_eq!(sent["model"], "test-model");
        assert_eq!(sent["max_tokens"], 256);
        assert_eq!(sent["system"], "You are a betting assistant.");
        assert_eq!(sent["tools"][0]["name"], "get_live_game_odds");
        assert_eq!(sent["messages"][0]["content"], "What's the spread?");
    }

    #[tokio::test]
    async fn mock_server_error_status_carries_api_message() {
        let body =
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#
                .to_string();
        let (url, server) = serve_once("529 Site Overloaded", body).await;

        let client = ClaudeClient::new("sk-test".into(), "m".into(), Duration::from_secs(5))
            .with_endpoint(url);
        let err = client.complete(&sample_request()).await.unwrap_err();
        match err {
            LlmError::Status { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "Overloaded");
            }
            other => panic!("expected Status, got: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn mock_server_garbage_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", "{\"content\": 7}".to_string()).await;

        let client = ClaudeClient::new("sk-test".into(), "m".into(), Duration::from_secs(5))
            .with_endpoint(url);
        let err = client.complete(&sample_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ClaudeClient::new("sk-test".into(), "m".into(), Duration::from_secs(2))
            .with_endpoint(format!("http://{addr}/v1/messages"));
        let err = client.complete(&sample_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
    }

    #[test]
    fn empty_tools_and_system_are_omitted_from_body() {
        let msgs = vec![Message::assistant_blocks(vec![ContentBlock::Text {
            text: "ok".into(),
        }])];
        let body = WireRequest {
            model: "m",
            max_tokens: 10,
            system: "",
            tools: &[],
            messages: &msgs,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert!(v.get("tools").is_none());
        assert!(v.get("system").is_none());
        assert_eq!(v["messages"][0]["role"], "assistant");
    }
}
