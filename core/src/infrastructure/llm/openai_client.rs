use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    LlmConfig,
    entities::app_errors::CoreError,
    ports::{ChatTurn, LlmClient},
};

/// Chat-completions client. The API key is optional: a deployment without
/// one still runs, and every call reports the provider as unavailable so
/// callers can fall back.
#[derive(Debug, Clone)]
pub struct OpenAiLlmClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiLlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url,
            client: Client::new(),
        }
    }

    async fn call_chat_completions(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<String, CoreError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CoreError::LlmUnavailable);
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("LLM API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("LLM API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse LLM response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl LlmClient for OpenAiLlmClient {
    async fn generate_json(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        // json_object mode guarantees well-formed JSON; the schema itself is
        // spelled out in the system message.
        let system = format!(
            "You respond only with a JSON object matching this schema:\n{}",
            response_schema
        );

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: 4000,
            response_format: Some(ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        self.call_chat_completions(request).await
    }

    async fn complete_chat(
        &self,
        system_prompt: String,
        turns: Vec<ChatTurn>,
    ) -> Result<String, CoreError> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system_prompt,
        });
        messages.extend(turns.into_iter().map(|turn| ChatMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content,
        }));

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.7,
            max_tokens: 1000,
            response_format: None,
        };

        self.call_chat_completions(request).await
    }
}
