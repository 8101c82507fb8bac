//! Habit Router

use auth::SessionGuard;
use auth::domain::repository::SessionStore;
use auth::middleware::require_session;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::domain::repository::{BadgeRepository, CheckinRepository, HabitRepository};
use crate::presentation::handlers::{self, HabitAppState};

/// Routes mounted under `/api`; every route requires a session
pub fn habit_router<R, S>(state: HabitAppState<R>, guard: SessionGuard<S>) -> Router
where
    R: HabitRepository + CheckinRepository + BadgeRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/habits",
            get(handlers::list_habits::<R>).post(handlers::create_habit::<R>),
        )
        .route("/habits/{id}", delete(handlers::delete_habit::<R>))
        .route("/habits/{id}/checkin", post(handlers::check_in::<R>))
        .route("/badges", get(handlers::list_badges::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_session::<S>))
        .with_state(state)
}
