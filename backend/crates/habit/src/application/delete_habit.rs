//! Delete Habit Use Case

use std::sync::Arc;

use kernel::id::{HabitId, UserId};

use crate::application::checkin_locks::CheckinLocks;
use crate::domain::repository::HabitRepository;
use crate::error::{HabitError, HabitResult};

/// Delete a habit together with its check-ins
pub struct DeleteHabitUseCase<H>
where
    H: HabitRepository,
{
    habit_repo: Arc<H>,
    locks: Arc<CheckinLocks>,
}

impl<H> DeleteHabitUseCase<H>
where
    H: HabitRepository,
{
    pub fn new(habit_repo: Arc<H>, locks: Arc<CheckinLocks>) -> Self {
        Self { habit_repo, locks }
    }

    pub async fn execute(&self, habit_id: &HabitId, owner_id: &UserId) -> HabitResult<()> {
        let deleted = self
            .locks
            .run(*habit_id, self.habit_repo.delete_owned(habit_id, owner_id))
            .await?;

        if !deleted {
            return Err(HabitError::HabitNotFound);
        }

        tracing::info!(habit_id = %habit_id, user_id = %owner_id, "Habit deleted");

        Ok(())
    }
}
