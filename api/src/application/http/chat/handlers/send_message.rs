use axum::extract::State;
use nutriplan_core::domain::chat::ports::ChatService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    auth::AuthUser,
    http::{
        chat::validators::SendMessageValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SendMessageResponse {
    pub success: bool,
    pub response: String,
    /// Empty when the exchange could not be persisted.
    #[serde(rename = "messageId")]
    pub message_id: String,
}

#[utoipa::path(
    post,
    path = "/message",
    tag = "chat",
    summary = "Send chat message",
    description = "Answers with the AI assistant, falling back to rule-based replies when the provider is unavailable.",
    request_body = SendMessageValidator,
    responses(
        (status = 200, body = SendMessageResponse),
        (status = 400, description = "Empty message"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    ValidateJson(payload): ValidateJson<SendMessageValidator>,
) -> Result<Response<SendMessageResponse>, ApiError> {
    let reply = state
        .service
        .process_message(user.user_id, payload.message, payload.language)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Raw(SendMessageResponse {
        success: true,
        response: reply.response,
        message_id: reply
            .message_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
    }))
}
