use axum::extract::{Path, State};
use nutriplan_core::domain::menu::{
    entities::Meal,
    ports::MenuService,
    value_objects::ReplaceMealInput,
};
use uuid::Uuid;

use crate::application::{
    auth::AuthUser,
    http::{
        menu::validators::ReplaceMealValidator,
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
    path = "/{menu_id}/replace-meal",
    tag = "menu",
    summary = "Replace a meal",
    description = "Regenerates a single meal in place. The slot, schedule and favorite flag are kept; menu totals are recomputed.",
    params(
        ("menu_id" = Uuid, Path, description = "Menu id"),
    ),
    request_body = ReplaceMealValidator,
    responses(
        (status = 200, body = Meal, description = "Replacement meal"),
        (status = 404, description = "Menu or meal not found"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Replacement failed")
    )
)]
pub async fn replace_meal(
    Path(menu_id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
    ValidateJson(payload): ValidateJson<ReplaceMealValidator>,
) -> Result<Response<Meal>, ApiError> {
    let meal = state
        .service
        .replace_meal(ReplaceMealInput {
            user_id: user.user_id,
            menu_id,
            meal_id: payload.meal_id,
            preferences: payload.preferences,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(meal))
}
