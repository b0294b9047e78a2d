use axum::extract::{Path, State};
use nutriplan_core::domain::menu::ports::MenuService;
use uuid::Uuid;

use crate::application::{
    auth::AuthUser,
    http::{
        menu::validators::FavoriteMealValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/{menu_id}/favorite-meal",
    tag = "menu",
    summary = "Set meal favorite flag",
    description = "Idempotently marks or unmarks a meal as favorite.",
    params(
        ("menu_id" = Uuid, Path, description = "Menu id"),
    ),
    request_body = FavoriteMealValidator,
    responses(
        (status = 200, description = "Favorite flag applied"),
        (status = 404, description = "Menu or meal not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn favorite_meal(
    Path(menu_id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
    ValidateJson(payload): ValidateJson<FavoriteMealValidator>,
) -> Result<Response<()>, ApiError> {
    let is_favorite = state
        .service
        .favorite_meal(user.user_id, menu_id, payload.meal_id, payload.is_favorite)
        .await
        .map_err(ApiError::from)?;

    let message = if is_favorite {
        "Meal marked as favorite"
    } else {
        "Meal removed from favorites"
    };

    Ok(Response::Message(message.to_string()))
}
