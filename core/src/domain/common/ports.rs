use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// LLM client trait for calling hosted completion models
#[cfg_attr(test, mockall::automock)]
pub trait LlmClient: Send + Sync {
    /// Generate structured JSON output constrained by `response_schema`.
    fn generate_json(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Free-form chat completion over a system prompt plus prior turns.
    fn complete_chat(
        &self,
        system_prompt: String,
        turns: Vec<ChatTurn>,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
