use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    clear_history::{__path_clear_history, clear_history},
    get_history::{__path_get_history, get_history},
    send_message::{__path_send_message, send_message},
};
use crate::application::{
    auth::auth,
    http::{inflight::coalesce, server::app_state::AppState},
};

#[derive(OpenApi)]
#[openapi(paths(send_message, get_history, clear_history))]
pub struct ChatApiDoc;

pub fn chat_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{}/chat/message", root_path), post(send_message))
        .route(
            &format!("{}/chat/history", root_path),
            get(get_history).delete(clear_history),
        )
        .layer(middleware::from_fn_with_state(state.clone(), coalesce))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
