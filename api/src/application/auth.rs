use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_cookie::CookieManager;
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use nutriplan_core::domain::auth::decode_token;
use uuid::Uuid;

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const AUTH_COOKIE: &str = "auth_token";

/// Authenticated caller, inserted by the [`auth`] middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Verifies the bearer token, falling back to the `auth_token` cookie for
/// browser clients, and stores the caller on the request.
pub async fn auth(
    State(state): State<AppState>,
    cookie: CookieManager,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
        .or_else(|| cookie.get(AUTH_COOKIE).map(|c| c.value().to_string()))
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    let claims = decode_token(&token, &state.args.auth.jwt_secret)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    req.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
