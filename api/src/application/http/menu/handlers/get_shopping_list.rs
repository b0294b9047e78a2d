use axum::extract::{Path, State};
use nutriplan_core::domain::menu::{ports::MenuService, value_objects::ShoppingList};
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
    path = "/{menu_id}/shopping-list",
    tag = "menu",
    summary = "Derive shopping list",
    description = "Aggregates the menu's ingredients by category, summing quantities and estimated costs.",
    params(
        ("menu_id" = Uuid, Path, description = "Menu id"),
    ),
    responses(
        (status = 200, body = ShoppingList),
        (status = 404, description = "Menu not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_shopping_list(
    Path(menu_id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response<ShoppingList>, ApiError> {
    let shopping_list = state
        .service
        .shopping_list(user.user_id, menu_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(shopping_list))
}
