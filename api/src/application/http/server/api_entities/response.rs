use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use serde::Serialize;
use serde_json::json;

/// Success envelope. `OK`/`Created` wrap the payload under `data`,
/// `Message` carries a human-readable confirmation, and `Raw` emits the
/// payload as the whole body for endpoints with a bespoke shape.
pub enum Response<T: Serialize> {
    OK(T),
    Created(T),
    Message(String),
    Raw(T),
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        match self {
            Response::OK(payload) => (
                StatusCode::OK,
                Json(json!({ "success": true, "data": payload })),
            )
                .into_response(),
            Response::Created(payload) => (
                StatusCode::CREATED,
                Json(json!({ "success": true, "data": payload })),
            )
                .into_response(),
            Response::Message(message) => (
                StatusCode::OK,
                Json(json!({ "success": true, "message": message })),
            )
                .into_response(),
            Response::Raw(payload) => (StatusCode::OK, Json(payload)).into_response(),
        }
    }
}
