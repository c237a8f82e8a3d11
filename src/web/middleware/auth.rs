use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::database::current_user_repo;
use crate::swipe::Actor;

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
    /// Raw `access_token` cookie, forwarded when swipes go to a remote api.
    pub access_token: Option<String>,
}

impl AuthenticatedUser {
    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id.clone(),
            access_token: self.access_token.clone(),
        }
    }
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
}

pub fn access_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .map(str::trim)
                .find_map(|c| c.strip_prefix("access_token="))
        })
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

/// Reads the subject claim without verifying the signature; the identity provider owns that.
pub fn subject_from_token(token: &str) -> Option<String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload = serde_json::from_slice::<JwtPayload>(&payload_bytes).ok()?;
    Some(payload.sub).filter(|s| !s.is_empty())
}

pub async fn require_auth(
    State(pool): State<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = access_token(request.headers());

    if let Some(id) = token.as_deref().and_then(subject_from_token) {
        request
            .extensions_mut()
            .insert(AuthenticatedUser { id, access_token: token });
        return next.run(request).await;
    }

    // Fallback for offline/local usage: use the current_user table
    match current_user_repo::load_current_user_id(&pool).await {
        Ok(Some(user_id)) => {
            request.extensions_mut().insert(AuthenticatedUser {
                id: user_id,
                access_token: None,
            });
            return next.run(request).await;
        }
        Ok(None) => {}
        Err(e) => debug!(error = %e, "current_user lookup failed"),
    }

    (StatusCode::UNAUTHORIZED, "Unauthorized - Please login").into_response()
}
