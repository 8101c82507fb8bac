//! HTTP Handlers

use std::sync::Arc;

use auth::CurrentUser;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::clock::Clock;
use kernel::id::{HabitId, UserId};
use uuid::Uuid;

use crate::application::{
    CheckinLocks, CreateHabitInput, CreateHabitUseCase, DeleteHabitUseCase, HabitConfig,
    ListBadgesUseCase, ListHabitsUseCase, RecordCheckinUseCase,
};
use crate::domain::repository::{BadgeRepository, CheckinRepository, HabitRepository};
use crate::error::{HabitError, HabitResult};
use crate::presentation::dto::{
    BadgeResponse, CheckinResponse, CreateHabitRequest, HabitListResponse, HabitResponse,
};

/// Shared state for habit handlers
pub struct HabitAppState<R> {
    pub repo: Arc<R>,
    pub locks: Arc<CheckinLocks>,
    pub config: Arc<HabitConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<R> Clone for HabitAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            locks: self.locks.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<R> HabitAppState<R> {
    pub fn new(repo: Arc<R>, config: HabitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            locks: Arc::new(CheckinLocks::new()),
            config: Arc::new(config),
            clock,
        }
    }
}

/// Habit data belongs to stored users; the administrator has none
fn owner_of(current: &CurrentUser) -> HabitResult<UserId> {
    if current.is_admin() {
        return Err(HabitError::Forbidden);
    }
    Ok(current.user_id())
}

// ============================================================================
// Habits
// ============================================================================

/// GET /api/habits
pub async fn list_habits<R>(
    State(state): State<HabitAppState<R>>,
    current: CurrentUser,
) -> HabitResult<Json<HabitListResponse>>
where
    R: HabitRepository + CheckinRepository + BadgeRepository + Send + Sync + 'static,
{
    let owner_id = owner_of(&current)?;

    let use_case = ListHabitsUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let overview = use_case.execute(&owner_id).await?;

    Ok(Json(overview.into()))
}

/// POST /api/habits
pub async fn create_habit<R>(
    State(state): State<HabitAppState<R>>,
    current: CurrentUser,
    Json(req): Json<CreateHabitRequest>,
) -> HabitResult<(StatusCode, Json<HabitResponse>)>
where
    R: HabitRepository + CheckinRepository + BadgeRepository + Send + Sync + 'static,
{
    let owner_id = owner_of(&current)?;

    let use_case = CreateHabitUseCase::new(state.repo.clone(), state.clock.clone());

    let input = CreateHabitInput {
        name: req.name,
        description: req.description,
        frequency: req.frequency,
    };

    let habit = use_case.execute(&owner_id, input).await?;

    Ok((StatusCode::CREATED, Json(HabitResponse::new(habit, false))))
}

/// DELETE /api/habits/{id}
pub async fn delete_habit<R>(
    State(state): State<HabitAppState<R>>,
    current: CurrentUser,
    Path(habit_id): Path<Uuid>,
) -> HabitResult<StatusCode>
where
    R: HabitRepository + CheckinRepository + BadgeRepository + Send + Sync + 'static,
{
    let owner_id = owner_of(&current)?;

    let use_case = DeleteHabitUseCase::new(state.repo.clone(), state.locks.clone());

    use_case
        .execute(&HabitId::from_uuid(habit_id), &owner_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/habits/{id}/checkin
///
/// A repeated check-in on the same day answers 200 with
/// `alreadyCheckedIn: true`.
pub async fn check_in<R>(
    State(state): State<HabitAppState<R>>,
    current: CurrentUser,
    Path(habit_id): Path<Uuid>,
) -> HabitResult<Json<CheckinResponse>>
where
    R: HabitRepository + CheckinRepository + BadgeRepository + Send + Sync + 'static,
{
    let owner_id = owner_of(&current)?;

    let use_case = RecordCheckinUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.locks.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let outcome = use_case
        .execute(&HabitId::from_uuid(habit_id), &owner_id)
        .await?;

    Ok(Json(outcome.into()))
}

// ============================================================================
// Badges
// ============================================================================

/// GET /api/badges
pub async fn list_badges<R>(
    State(state): State<HabitAppState<R>>,
    current: CurrentUser,
) -> HabitResult<Json<Vec<BadgeResponse>>>
where
    R: HabitRepository + CheckinRepository + BadgeRepository + Send + Sync + 'static,
{
    let owner_id = owner_of(&current)?;

    let badges = ListBadgesUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&owner_id)
        .await?;

    Ok(Json(badges.into_iter().map(BadgeResponse::from).collect()))
}
