use std::{collections::HashMap, sync::Arc};

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};
use tokio::sync::{Mutex, OnceCell};
use uuid::Uuid;

use crate::application::{auth::AuthUser, http::server::api_entities::api_error::ApiError};

use super::server::app_state::AppState;

const BODY_LIMIT: usize = 1024 * 1024;

/// Buffered response shared between coalesced callers.
#[derive(Debug, Clone)]
pub struct CoalescedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for CoalescedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Single-flight table for identical in-flight requests. The first caller
/// executes, everyone arriving with the same signature while it runs awaits
/// the same response. The entry is dropped once the execution finishes, so a
/// later identical request runs again.
#[derive(Debug, Clone, Default)]
pub struct InflightRegistry {
    cells: Arc<Mutex<HashMap<String, Arc<OnceCell<CoalescedResponse>>>>>,
}

impl InflightRegistry {
    pub async fn run<F>(&self, key: &str, fut: F) -> CoalescedResponse
    where
        F: Future<Output = CoalescedResponse>,
    {
        let cell = {
            let mut cells = self.cells.lock().await;
            cells
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let response = cell.get_or_init(|| fut).await.clone();

        // Remove our entry only; a concurrent request may already have
        // installed a fresh cell under the same key.
        let mut cells = self.cells.lock().await;
        if let Some(current) = cells.get(key)
            && Arc::ptr_eq(current, &cell)
        {
            cells.remove(key);
        }

        response
    }
}

/// Identity of a request for coalescing purposes. Query parameter order is
/// irrelevant, the body is hashed, and the caller is part of the key so
/// different users never share a response.
pub fn request_signature(
    method: &Method,
    uri: &Uri,
    user_id: Option<Uuid>,
    body: &[u8],
) -> String {
    let mut pairs: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .collect();
    pairs.sort_unstable();

    let digest = Sha256::digest(body);
    let body_hash: String = digest.iter().map(|b| format!("{:02x}", b)).collect();

    format!(
        "{}:{}:{}:{}:{}",
        method,
        uri.path(),
        pairs.join("&"),
        user_id.map(|id| id.to_string()).unwrap_or_default(),
        body_hash
    )
}

/// Only reads coalesce. Repeated identical writes are legitimate (the same
/// chat message sent twice, two identical feedback posts) and must each
/// reach the handler.
fn coalescable(method: &Method) -> bool {
    *method == Method::GET
}

/// Middleware that coalesces identical concurrent requests onto one
/// execution. Must sit inside the auth layer so the caller is known.
pub async fn coalesce(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !coalescable(req.method()) {
        return Ok(next.run(req).await);
    }

    let (parts, body) = req.into_parts();

    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|_| ApiError::BadRequest("Request body too large".to_string()))?;

    let user_id = parts.extensions.get::<AuthUser>().map(|u| u.user_id);
    let key = request_signature(&parts.method, &parts.uri, user_id, &bytes);

    let req = Request::from_parts(parts, Body::from(bytes));

    let response = state
        .inflight
        .run(&key, async move {
            let response = next.run(req).await;
            let (parts, body) = response.into_parts();
            let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
            CoalescedResponse {
                status: parts.status,
                headers: parts.headers,
                body,
            }
        })
        .await;

    Ok(response.into_response())
}
