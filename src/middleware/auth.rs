// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Session-cookie authentication middleware.
//!
//! The cookie carries the raw session id and is the only credential.

use crate::error::AppError;
use crate::models::{Session, User};
use crate::time_utils::to_offset_datetime;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "vibrantly_session";

/// Authenticated user, inserted into request extensions by the gate.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Session id carried by the request, if it is well-formed.
pub fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Resolve the request's cookie to a user. `Ok(None)` covers every
/// "not logged in" case: no cookie, unknown or expired session, or a
/// session whose user no longer exists.
pub async fn resolve_session(state: &AppState, jar: &CookieJar) -> Result<Option<User>, AppError> {
    let Some(id) = session_id(jar) else {
        return Ok(None);
    };
    let Some(session) = state.sessions.get(id).await? else {
        return Ok(None);
    };

    let user = state.users.get_by_id(session.user_id).await?;
    if user.is_none() {
        tracing::warn!(user_id = %session.user_id, "Session references a missing user");
    }
    Ok(user)
}

pub async fn require_authenticated(state: &AppState, jar: &CookieJar) -> Result<User, AppError> {
    resolve_session(state, jar)
        .await?
        .ok_or(AppError::Unauthorized)
}

pub async fn require_administrator(state: &AppState, jar: &CookieJar) -> Result<User, AppError> {
    let user = require_authenticated(state, jar).await?;
    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, "Non-admin attempted an admin operation");
        return Err(AppError::Forbidden);
    }
    Ok(user)
}

/// Middleware that requires a valid session.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = require_authenticated(&state, &jar).await?;
    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

/// Middleware that requires a valid session belonging to an administrator.
///
/// Admin routes answer 401 to signed-in non-admins as well, so the gate's
/// `Forbidden` is folded into `Unauthorized` here.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = require_administrator(&state, &jar)
        .await
        .map_err(|e| match e {
            AppError::Forbidden => AppError::Unauthorized,
            other => other,
        })?;
    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

/// Cookie delivering `session` to the browser. Expires with the session.
pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.id.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .expires(to_offset_datetime(session.expires_at))
        .build()
}

/// Expired, empty session cookie; attributes must match creation.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(time::Duration::ZERO)
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .build()
}
