use axum::extract::State;
use nutriplan_core::domain::menu::{entities::Menu, ports::MenuService};

use crate::application::{
    auth::AuthUser,
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "menu",
    summary = "List recommended menus",
    description = "Returns the caller's menus, newest first, with meals and ingredients.",
    responses(
        (status = 200, body = Vec<Menu>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_menus(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response<Vec<Menu>>, ApiError> {
    let menus = state
        .service
        .get_user_menus(user.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(menus))
}
