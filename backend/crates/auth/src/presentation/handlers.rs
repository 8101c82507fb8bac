//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use kernel::clock::Clock;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    AdminUseCase, ChangePasswordInput, ChangePasswordUseCase, CheckSessionUseCase, SignInInput,
    SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::entity::session::Session;
use crate::domain::repository::{
    AccountProvisioner, CredentialRepository, SessionStore, UserRepository,
};
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, ChangePasswordResponse, RevokeSessionsResponse, SessionResponse,
    SessionStatusResponse, SignInRequest, SignUpRequest, UserSummary,
};
use crate::presentation::middleware::{CurrentUser, SessionGuard, delete_cookie_header};

/// Shared state for auth handlers
pub struct AuthAppState<R, S, P> {
    pub repo: Arc<R>,
    pub sessions: Arc<S>,
    pub provisioner: Arc<P>,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<R, S, P> Clone for AuthAppState<R, S, P> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            sessions: self.sessions.clone(),
            provisioner: self.provisioner.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R, S, P> AuthAppState<R, S, P> {
    /// Guard state sharing this state's session table
    pub fn session_guard(&self) -> SessionGuard<S> {
        SessionGuard {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }

    fn session_cookie(&self, session: &Session) -> AuthResult<HeaderValue> {
        let cookie = self.config.cookie().build_set_cookie(
            session.token.as_str(),
            session.expires_at,
            self.clock.now(),
        );
        platform::cookie::to_header_value(&cookie)
            .map_err(|e| AuthError::Internal(format!("Session cookie is not a valid header: {e}")))
    }

    fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        platform::cookie::extract_cookie(headers, &self.config.session_cookie_name)
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.provisioner.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let input = SignUpInput {
        user_name: req.user_name,
        email: req.email,
        password: req.password,
        password_confirmation: req.password_confirmation,
    };

    let output = use_case.execute(input).await?;
    let cookie = state.session_cookie(&output.session)?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse::from(&output.session)),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let input = SignInInput {
        identifier: req.identifier,
        password: req.password,
    };

    let output = use_case.execute(input).await?;
    let cookie = state.session_cookie(&output.session)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse::from(&output.session)),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let token = state.session_token(&headers);

    let use_case = SignOutUseCase::new(state.sessions.clone());
    // The cookie is cleared either way
    if let Err(e) = use_case.execute(token.as_deref()).await {
        tracing::warn!(error = %e, "Failed to remove session on sign out");
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Some(cookie) = delete_cookie_header(&state.config) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let token = state.session_token(&headers);

    let use_case = CheckSessionUseCase::new(state.sessions.clone(), state.clock.clone());

    match use_case.execute(token.as_deref()).await {
        Ok(session) => Ok(Json(SessionStatusResponse::from(&session))),
        Err(e) if e.is_unauthenticated() => Ok(Json(SessionStatusResponse::anonymous())),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Password Change (requires session)
// ============================================================================

/// POST /api/auth/password
pub async fn change_password<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    current: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<ChangePasswordResponse>>
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let input = ChangePasswordInput {
        current_password: req.current_password,
        new_password: req.new_password,
        new_password_confirmation: req.new_password_confirmation,
    };

    let sessions_revoked = use_case.execute(current.session(), input).await?;

    Ok(Json(ChangePasswordResponse { sessions_revoked }))
}

// ============================================================================
// Admin (requires admin session)
// ============================================================================

/// GET /api/admin/users
pub async fn list_users<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
) -> AuthResult<Json<Vec<UserSummary>>>
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let use_case = AdminUseCase::new(state.repo.clone(), state.sessions.clone());

    let users = use_case.list_users().await?;

    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// DELETE /api/admin/users/{id}/sessions
pub async fn revoke_sessions<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    Path(user_id): Path<Uuid>,
) -> AuthResult<Json<RevokeSessionsResponse>>
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let use_case = AdminUseCase::new(state.repo.clone(), state.sessions.clone());

    let sessions_revoked = use_case
        .revoke_sessions(&UserId::from_uuid(user_id))
        .await?;

    Ok(Json(RevokeSessionsResponse { sessions_revoked }))
}
