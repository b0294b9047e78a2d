use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaim {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Verify an HS256 bearer token and return its claims.
pub fn decode_token(token: &str, secret: &str) -> Result<JwtClaim, CoreError> {
    let validation = Validation::new(Algorithm::HS256);

    let data = decode::<JwtClaim>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("Failed to decode JWT: {}", e);
        CoreError::Forbidden("invalid token".to_string())
    })?;

    Ok(data.claims)
}
