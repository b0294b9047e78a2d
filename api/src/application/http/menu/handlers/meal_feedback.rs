use axum::extract::{Path, State};
use nutriplan_core::domain::menu::ports::MenuService;
use uuid::Uuid;

use crate::application::{
    auth::AuthUser,
    http::{
        menu::validators::MealFeedbackValidator,
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
    path = "/{menu_id}/meal-feedback",
    tag = "menu",
    summary = "Record meal feedback",
    description = "Appends a liked/disliked signal for a meal. Later generations can weigh it.",
    params(
        ("menu_id" = Uuid, Path, description = "Menu id"),
    ),
    request_body = MealFeedbackValidator,
    responses(
        (status = 200, description = "Feedback recorded"),
        (status = 404, description = "Menu or meal not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn meal_feedback(
    Path(menu_id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
    ValidateJson(payload): ValidateJson<MealFeedbackValidator>,
) -> Result<Response<()>, ApiError> {
    state
        .service
        .record_meal_feedback(user.user_id, menu_id, payload.meal_id, payload.liked)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Message("Feedback recorded".to_string()))
}
