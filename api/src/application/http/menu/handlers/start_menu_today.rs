use axum::extract::{Path, State};
use nutriplan_core::domain::menu::ports::MenuService;
use uuid::Uuid;

use crate::application::{
    auth::AuthUser,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/{menu_id}/start-today",
    tag = "menu",
    summary = "Start menu today",
    description = "Anchors the menu's day numbering to today's date.",
    params(
        ("menu_id" = Uuid, Path, description = "Menu id"),
    ),
    responses(
        (status = 200, description = "Menu started"),
        (status = 404, description = "Menu not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn start_menu_today(
    Path(menu_id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response<()>, ApiError> {
    state
        .service
        .start_menu_today(user.user_id, menu_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Message("Menu started today".to_string()))
}
