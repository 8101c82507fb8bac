//! Auth Middleware
//!
//! Session and role guards for protected routes.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::clock::Clock;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::UserId;
use crate::error::AuthError;

/// Set on every 401 from a guarded route; the front end redirects to login
pub const AUTH_REQUIRED_HEADER: HeaderName = HeaderName::from_static("x-auth-required");

/// Middleware state
pub struct SessionGuard<S> {
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<S> Clone for SessionGuard<S> {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

/// The validated session of the caller
///
/// Inserted into request extensions by [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Session);

impl CurrentUser {
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.0.display_name
    }

    pub fn is_admin(&self) -> bool {
        self.0.user_role.is_admin()
    }

    pub fn session(&self) -> &Session {
        &self.0
    }
}

impl<St> FromRequestParts<St> for CurrentUser
where
    St: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::SessionNotFound)
    }
}

/// Middleware that requires a valid session
pub async fn require_session<S>(
    State(guard): State<SessionGuard<S>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    S: SessionStore + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &guard.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(guard.sessions.clone(), guard.clock.clone());

    match use_case.execute(token.as_deref()).await {
        Ok(session) => {
            req.extensions_mut().insert(CurrentUser(session));
            Ok(next.run(req).await)
        }
        Err(e) if e.is_unauthenticated() => Err(unauthenticated_response(e, &guard.config)),
        Err(e) => Err(e.into_response()),
    }
}

/// Middleware that requires an admin session
///
/// Must run inside [`require_session`].
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, AuthError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AuthError::SessionNotFound)?;

    if !user.is_admin() {
        tracing::warn!(user_id = %user.user_id(), "Non-admin session on admin route");
        return Err(AuthError::Forbidden);
    }

    Ok(next.run(req).await)
}

/// 401 with the login-redirect marker; an expired cookie is also cleared
pub fn unauthenticated_response(err: AuthError, config: &AuthConfig) -> Response {
    let expired = matches!(err, AuthError::SessionExpired);

    let mut response = err.into_response();
    let headers = response.headers_mut();
    headers.insert(AUTH_REQUIRED_HEADER, HeaderValue::from_static("true"));

    if expired && let Some(cookie) = delete_cookie_header(config) {
        headers.append(header::SET_COOKIE, cookie);
    }

    response
}

/// Deletion cookie for the session; logged and skipped if it cannot be a header
pub(crate) fn delete_cookie_header(config: &AuthConfig) -> Option<HeaderValue> {
    match platform::cookie::to_header_value(&config.cookie().build_delete_cookie()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                cookie_name = %config.session_cookie_name.escape_debug(),
                "Session deletion cookie is not a valid header value"
            );
            None
        }
    }
}
