use axum::extract::{Query, State};
use nutriplan_core::domain::chat::{entities::ChatExchange, ports::ChatService};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::{
    auth::AuthUser,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetHistoryQuery {
    /// Maximum number of exchanges to return.
    pub limit: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/history",
    tag = "chat",
    summary = "Get chat history",
    description = "Returns the caller's exchanges in chronological order, oldest first.",
    params(GetHistoryQuery),
    responses(
        (status = 200, body = Vec<ChatExchange>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_history(
    Query(query): Query<GetHistoryQuery>,
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response<Vec<ChatExchange>>, ApiError> {
    let history = state
        .service
        .get_history(user.user_id, query.limit)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(history))
}
