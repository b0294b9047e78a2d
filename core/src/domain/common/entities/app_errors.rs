use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("resource not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("questionnaire not found")]
    QuestionnaireMissing,

    #[error("daily food budget is not set")]
    BudgetMissing,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("LLM provider is not configured")]
    LlmUnavailable,

    #[error("external service error: {0}")]
    ExternalServiceError(String),

    #[error("internal server error")]
    InternalServerError,
}
