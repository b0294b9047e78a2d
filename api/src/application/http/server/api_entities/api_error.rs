use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nutriplan_core::domain::common::entities::app_errors::CoreError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("validation failed")]
    Validation(ValidationErrors),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message, None),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
            ApiError::Validation(errors) => {
                let details = json!(
                    errors
                        .field_errors()
                        .iter()
                        .map(|(field, errs)| {
                            let messages: Vec<String> = errs
                                .iter()
                                .map(|e| {
                                    e.message
                                        .as_ref()
                                        .map(|m| m.to_string())
                                        .unwrap_or_else(|| e.code.to_string())
                                })
                                .collect();
                            (field.to_string(), json!(messages))
                        })
                        .collect::<serde_json::Map<String, serde_json::Value>>()
                );
                (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(details),
                )
            }
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error,
                details,
            }),
        )
            .into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            CoreError::Validation(message) => ApiError::BadRequest(message),
            CoreError::QuestionnaireMissing => ApiError::BadRequest(
                "Please complete your questionnaire first before generating a menu".to_string(),
            ),
            CoreError::BudgetMissing => ApiError::BadRequest(
                "Please set a daily food budget in your questionnaire".to_string(),
            ),
            CoreError::Forbidden(message) => ApiError::Unauthorized(message),
            CoreError::LlmUnavailable | CoreError::ExternalServiceError(_) => {
                ApiError::InternalServerError(error.to_string())
            }
            CoreError::InternalServerError => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

/// Json extractor that also runs the `validator` rules of the payload.
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value.validate().map_err(ApiError::Validation)?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questionnaire_missing_maps_to_bad_request_with_guidance() {
        let error = ApiError::from(CoreError::QuestionnaireMissing);
        match error {
            ApiError::BadRequest(message) => {
                assert_eq!(
                    message,
                    "Please complete your questionnaire first before generating a menu"
                );
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn budget_missing_maps_to_bad_request() {
        let error = ApiError::from(CoreError::BudgetMissing);
        match error {
            ApiError::BadRequest(message) => {
                assert_eq!(
                    message,
                    "Please set a daily food budget in your questionnaire"
                );
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn not_found_and_forbidden_statuses() {
        assert!(matches!(
            ApiError::from(CoreError::NotFound),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::Forbidden("invalid token".to_string())),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::ExternalServiceError("boom".to_string())),
            ApiError::InternalServerError(_)
        ));
    }
}
