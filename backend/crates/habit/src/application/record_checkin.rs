//! Record Check-in Use Case
//!
//! ## Flow
//! 1. Load the habit (owner-scoped)
//! 2. Reject a second check-in on the same local calendar day
//! 3. Continue the streak if yesterday has a check-in, otherwise restart it
//! 4. Store the check-in together with the new streak and total
//! 5. Evaluate badges

use std::sync::Arc;

use kernel::clock::Clock;
use kernel::id::{HabitId, UserId};

use crate::application::checkin_locks::CheckinLocks;
use crate::application::config::HabitConfig;
use crate::application::evaluate_badges::EvaluateBadgesUseCase;
use crate::domain::entity::{Badge, Checkin};
use crate::domain::repository::{BadgeRepository, CheckinRepository, HabitRepository};
use crate::domain::services::Progress;
use crate::error::{HabitError, HabitResult};

/// Result of a check-in attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// A new check-in was stored
    Recorded {
        progress: Progress,
        unlocked: Vec<Badge>,
    },
    /// Today already had a check-in; nothing changed
    AlreadyCheckedIn { progress: Progress },
}

impl CheckinOutcome {
    pub fn progress(&self) -> Progress {
        match self {
            CheckinOutcome::Recorded { progress, .. }
            | CheckinOutcome::AlreadyCheckedIn { progress } => *progress,
        }
    }

    pub fn is_already_checked_in(&self) -> bool {
        matches!(self, CheckinOutcome::AlreadyCheckedIn { .. })
    }
}

/// Record check-in use case
pub struct RecordCheckinUseCase<H, C, B>
where
    H: HabitRepository,
    C: CheckinRepository,
    B: BadgeRepository,
{
    habit_repo: Arc<H>,
    checkin_repo: Arc<C>,
    badge_repo: Arc<B>,
    locks: Arc<CheckinLocks>,
    config: Arc<HabitConfig>,
    clock: Arc<dyn Clock>,
}

impl<H, C, B> RecordCheckinUseCase<H, C, B>
where
    H: HabitRepository,
    C: CheckinRepository,
    B: BadgeRepository,
{
    pub fn new(
        habit_repo: Arc<H>,
        checkin_repo: Arc<C>,
        badge_repo: Arc<B>,
        locks: Arc<CheckinLocks>,
        config: Arc<HabitConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            habit_repo,
            checkin_repo,
            badge_repo,
            locks,
            config,
            clock,
        }
    }

    pub async fn execute(&self, habit_id: &HabitId, owner_id: &UserId) -> HabitResult<CheckinOutcome> {
        self.locks
            .run(*habit_id, self.record(habit_id, owner_id))
            .await
    }

    async fn record(&self, habit_id: &HabitId, owner_id: &UserId) -> HabitResult<CheckinOutcome> {
        let habit = self
            .habit_repo
            .find_owned(habit_id, owner_id)
            .await?
            .ok_or(HabitError::HabitNotFound)?;

        let now = self.clock.now();
        let window = self.config.calendar.window(now);
        let current = Progress::new(habit.streak, habit.total_days);

        if self
            .checkin_repo
            .exists_since(habit_id, window.start_of_today)
            .await?
        {
            return Ok(CheckinOutcome::AlreadyCheckedIn { progress: current });
        }

        let yesterday = self
            .checkin_repo
            .count_between(habit_id, window.start_of_yesterday, window.start_of_today)
            .await?;
        let progress = current.after_checkin(yesterday > 0);

        match self
            .checkin_repo
            .record(&Checkin::new(*habit_id, now, window.today), progress)
            .await
        {
            Ok(()) => {}
            // Another process got there first
            Err(HabitError::AlreadyCheckedIn) => {
                return Ok(CheckinOutcome::AlreadyCheckedIn { progress: current });
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            habit_id = %habit_id,
            user_id = %owner_id,
            day = %window.today,
            streak = progress.streak,
            total_days = progress.total_days,
            "Habit checked in"
        );

        let unlocked = EvaluateBadgesUseCase::new(
            self.badge_repo.clone(),
            self.config.clone(),
            self.clock.clone(),
        )
        .execute(owner_id, progress)
        .await?;

        Ok(CheckinOutcome::Recorded { progress, unlocked })
    }
}
