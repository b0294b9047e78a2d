use axum::extract::State;
use nutriplan_core::domain::chat::ports::ChatService;

use crate::application::{
    auth::AuthUser,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    delete,
    path = "/history",
    tag = "chat",
    summary = "Clear chat history",
    responses(
        (status = 200, description = "History cleared"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn clear_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response<()>, ApiError> {
    state
        .service
        .clear_history(user.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Message("Chat history cleared".to_string()))
}
