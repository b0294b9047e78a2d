use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    favorite_meal::{__path_favorite_meal, favorite_meal},
    generate_menu::{__path_generate_menu, generate_menu},
    get_menu::{__path_get_menu, get_menu},
    get_menus::{__path_get_menus, get_menus},
    get_shopping_list::{__path_get_shopping_list, get_shopping_list},
    meal_feedback::{__path_meal_feedback, meal_feedback},
    replace_meal::{__path_replace_meal, replace_meal},
    start_menu_today::{__path_start_menu_today, start_menu_today},
};
use crate::application::{
    auth::auth,
    http::{inflight::coalesce, server::app_state::AppState},
};

#[derive(OpenApi)]
#[openapi(paths(
    get_menus,
    generate_menu,
    get_menu,
    replace_meal,
    favorite_meal,
    meal_feedback,
    get_shopping_list,
    start_menu_today
))]
pub struct MenuApiDoc;

pub fn menu_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{}/recommended-menus", root_path),
            get(get_menus),
        )
        .route(
            &format!("{}/recommended-menus/generate", root_path),
            post(generate_menu),
        )
        .route(
            &format!("{}/recommended-menus/{{menu_id}}", root_path),
            get(get_menu),
        )
        .route(
            &format!("{}/recommended-menus/{{menu_id}}/replace-meal", root_path),
            post(replace_meal),
        )
        .route(
            &format!("{}/recommended-menus/{{menu_id}}/favorite-meal", root_path),
            post(favorite_meal),
        )
        .route(
            &format!("{}/recommended-menus/{{menu_id}}/meal-feedback", root_path),
            post(meal_feedback),
        )
        .route(
            &format!("{}/recommended-menus/{{menu_id}}/shopping-list", root_path),
            get(get_shopping_list),
        )
        .route(
            &format!("{}/recommended-menus/{{menu_id}}/start-today", root_path),
            post(start_menu_today),
        )
        // coalesce must see AuthUser, so auth is the outer layer
        .layer(middleware::from_fn_with_state(state.clone(), coalesce))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
