// Anthropic Messages API client with tool use.

pub mod client;
pub mod message;

pub use client::{ChatModel, ClaudeClient, LlmClient, LlmError};
pub use message::{
    ChatRequest, ChatResponse, ContentBlock, Message, MessageContent, Role, ToolCall,
    ToolDefinition, Usage,
};
