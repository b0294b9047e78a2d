use axum::extract::State;
use nutriplan_core::domain::menu::{
    entities::Menu,
    ports::MenuService,
    value_objects::GenerateMenuInput,
};

use crate::application::{
    auth::AuthUser,
    http::{
        menu::validators::GenerateMenuValidator,
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
    path = "/generate",
    tag = "menu",
    summary = "Generate recommended menu",
    description = "Plans meal slots from the requested pattern and fills them with AI-generated meals.",
    request_body = GenerateMenuValidator,
    responses(
        (status = 201, body = Menu, description = "Menu generated"),
        (status = 400, description = "Invalid input or incomplete questionnaire"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Generation failed")
    )
)]
pub async fn generate_menu(
    State(state): State<AppState>,
    user: AuthUser,
    ValidateJson(payload): ValidateJson<GenerateMenuValidator>,
) -> Result<Response<Menu>, ApiError> {
    let menu = state
        .service
        .generate_menu(GenerateMenuInput {
            user_id: user.user_id,
            days: payload.days,
            meals_per_day: payload.meals_per_day,
            meal_change_frequency: payload.meal_change_frequency,
            include_leftovers: payload.include_leftovers,
            same_meal_times: payload.same_meal_times,
            target_calories: payload.target_calories,
            dietary_preferences: payload.dietary_preferences,
            excluded_ingredients: payload.excluded_ingredients,
            budget: payload.budget,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(menu))
}
