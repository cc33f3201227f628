// Wiring: one `Assistant` per process, shared by every request. Holds the
// dispatcher, the orchestrator, and the odds source used for health checks.

use crate::odds::{event_matches, OddsApiClient, OddsSource};
use crate::orchestrator::{Answer, Orchestrator, OrchestratorError};
use crate::prompt::system_prompt;
use crate::tools::Dispatcher;
use gridline_core::config::{Config, EventConfig};
use gridline_core::market::Event;
use gridline_core::reference::ReferenceData;
use gridline_llm::{ChatModel, LlmClient, Message};
use std::sync::Arc;
use tracing::info;

/// Odds-service reachability as reported by the health check.
#[derive(Debug, Clone, PartialEq)]
pub enum OddsStatus {
    Connected {
        events_count: usize,
        /// The covered game, when it is in the live listing.
        event: Option<Event>,
    },
    Error(String),
}

pub struct Assistant {
    orchestrator: Orchestrator,
    odds: Arc<dyn OddsSource>,
    event: EventConfig,
    odds_key_set: bool,
}

impl Assistant {
    /// Build from explicit collaborators. Tests pass stubs here.
    pub fn new(
        config: &Config,
        data: Arc<ReferenceData>,
        odds: Arc<dyn OddsSource>,
        model: Arc<dyn ChatModel>,
    ) -> Self {
        let prompt = system_prompt(&data, &config.event);
        let dispatcher = Arc::new(Dispatcher::new(odds.clone(), data, config));
        let orchestrator = Orchestrator::new(model, dispatcher, prompt, &config.llm);
        Self {
            orchestrator,
            odds,
            event: config.event.clone(),
            odds_key_set: config.credentials.odds_key().is_some(),
        }
    }

    /// Build with the real HTTP clients.
    pub fn from_config(config: &Config, data: Arc<ReferenceData>) -> Self {
        let odds = OddsApiClient::from_config(config);
        let model = LlmClient::from_config(config);
        info!(
            odds_key = odds.has_key(),
            model_active = model.is_active(),
            "assistant clients ready"
        );
        Self::new(config, data, Arc::new(odds), Arc::new(model))
    }

    pub fn odds_key_set(&self) -> bool {
        self.odds_key_set
    }

    pub async fn chat(
        &self,
        history: Vec<Message>,
        message: &str,
    ) -> Result<Answer, OrchestratorError> {
        self.orchestrator.run(history, message).await
    }

    /// List events once and look for the covered game.
    pub async fn odds_status(&self) -> OddsStatus {
        match self.odds.list_events().await {
            Ok(events) => {
                let events_count = events.len();
                let event = events
                    .into_iter()
                    .find(|e| event_matches(e, &self.event.match_terms));
                OddsStatus::Connected {
                    events_count,
                    event,
                }
            }
            Err(e) => OddsStatus::Error(e.user_message()),
        }
    }
}
