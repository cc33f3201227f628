// Conversation loop: ask the model, run any tools it requests, feed the
// results back, and stop when it answers without requesting tools.
//
// The number of tool rounds per request is capped; a model that keeps asking
// for tools past the cap gets an `IterationBudgetExceeded` error instead of
// an endless loop.

use crate::tools::{tool_definitions, ToolExecutor};
use gridline_core::config::LlmConfig;
use gridline_llm::{ChatModel, ChatRequest, LlmError, Message, ToolDefinition};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("could not complete the request within {limit} tool rounds")]
    IterationBudgetExceeded { limit: usize },
}

/// The final reply plus what it took to get there.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub tool_rounds: usize,
    /// Tool names in execution order.
    pub tools_called: Vec<String>,
}

pub struct Orchestrator {
    model: Arc<dyn ChatModel>,
    tools: Arc<dyn ToolExecutor>,
    system_prompt: String,
    definitions: Vec<ToolDefinition>,
    max_tokens: u32,
    max_tool_rounds: usize,
}

impl Orchestrator {
    /// Orchestrator advertising the full tool catalog.
    pub fn new(
        model: Arc<dyn ChatModel>,
        tools: Arc<dyn ToolExecutor>,
        system_prompt: String,
        llm: &LlmConfig,
    ) -> Self {
        Self {
            model,
            tools,
            system_prompt,
            definitions: tool_definitions(),
            max_tokens: llm.max_tokens,
            max_tool_rounds: llm.max_tool_rounds,
        }
    }

    /// Answer `user_message` given the prior `history`.
    ///
    /// Tool calls within one model turn run one after another, in the order
    /// the model listed them, and their results go back in a single turn.
    pub async fn run(
        &self,
        history: Vec<Message>,
        user_message: &str,
    ) -> Result<Answer, OrchestratorError> {
        let mut request = ChatRequest {
            system: self.system_prompt.clone(),
            tools: self.definitions.clone(),
            messages: history,
            max_tokens: self.max_tokens,
        };
        request.messages.push(Message::user(user_message));

        let mut rounds = 0;
        let mut tools_called = Vec::new();

        loop {
            debug!(round = rounds, messages = request.messages.len(), "querying model");
            let response = self.model.complete(&request).await?;
            let calls = response.tool_calls();

            if calls.is_empty() {
                info!(rounds, tools = tools_called.len(), "conversation complete");
                return Ok(Answer {
                    text: response.text(),
                    tool_rounds: rounds,
                    tools_called,
                });
            }

            if rounds >= self.max_tool_rounds {
                warn!(
                    limit = self.max_tool_rounds,
                    "model still requesting tools at the round limit"
                );
                return Err(OrchestratorError::IterationBudgetExceeded {
                    limit: self.max_tool_rounds,
                });
            }
            rounds += 1;
            info!(round = rounds, calls = calls.len(), "executing tool calls");

            request
                .messages
                .push(Message::assistant_blocks(response.content));

            let mut results = Vec::with_capacity(calls.len());
            for call in calls {
                let output = self.tools.execute(&call.name, &call.input).await;
                debug!(tool = %call.name, id = %call.id, bytes = output.len(), "tool result");
                tools_called.push(call.name);
                results.push((call.id, output));
            }
            request.messages.push(Message::tool_results(results));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
