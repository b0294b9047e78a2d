use axum::extract::{Path, State};
use nutriplan_core::domain::menu::{entities::Menu, ports::MenuService};
use uuid::Uuid;

use crate::application::{
    auth::AuthUser,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{menu_id}",
    tag = "menu",
    summary = "Get recommended menu",
    params(
        ("menu_id" = Uuid, Path, description = "Menu id"),
    ),
    responses(
        (status = 200, body = Menu),
        (status = 404, description = "Menu not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_menu(
    Path(menu_id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response<Menu>, ApiError> {
    let menu = state
        .service
        .get_menu(user.user_id, menu_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(menu))
}
