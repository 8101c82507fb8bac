//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::domain::repository::{
    AccountProvisioner, CredentialRepository, SessionStore, UserRepository,
};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_session};

/// Routes mounted under `/api/auth`
pub fn auth_router<R, S, P>(state: AuthAppState<R, S, P>) -> Router
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let guard = state.session_guard();

    Router::new()
        .route("/password", post(handlers::change_password::<R, S, P>))
        .route_layer(middleware::from_fn_with_state(guard, require_session::<S>))
        .route("/signup", post(handlers::sign_up::<R, S, P>))
        .route("/signin", post(handlers::sign_in::<R, S, P>))
        .route("/signout", post(handlers::sign_out::<R, S, P>))
        .route("/status", get(handlers::session_status::<R, S, P>))
        .with_state(state)
}

/// Routes mounted under `/api/admin`
pub fn admin_router<R, S, P>(state: AuthAppState<R, S, P>) -> Router
where
    R: UserRepository + CredentialRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: AccountProvisioner + Send + Sync + 'static,
{
    let guard = state.session_guard();

    Router::new()
        .route("/users", get(handlers::list_users::<R, S, P>))
        .route(
            "/users/{id}/sessions",
            delete(handlers::revoke_sessions::<R, S, P>),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(guard, require_session::<S>))
        .with_state(state)
}
