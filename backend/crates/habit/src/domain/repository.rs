//! Repository Traits
//!
//! Every query on habit data is scoped by owner.

use chrono::{DateTime, Utc};
use kernel::id::{BadgeId, HabitId, UserId};

use crate::domain::entity::{Badge, Checkin, Habit};
use crate::domain::services::Progress;
use crate::error::HabitResult;

#[trait_variant::make(HabitRepository: Send)]
pub trait LocalHabitRepository {
    async fn create(&self, habit: &Habit) -> HabitResult<()>;

    /// The habit if it exists and belongs to `owner_id`
    async fn find_owned(&self, habit_id: &HabitId, owner_id: &UserId)
    -> HabitResult<Option<Habit>>;

    /// Habits of a user, oldest first
    async fn list_by_owner(&self, owner_id: &UserId) -> HabitResult<Vec<Habit>>;

    /// Delete a habit and its check-ins. Returns whether it existed.
    async fn delete_owned(&self, habit_id: &HabitId, owner_id: &UserId) -> HabitResult<bool>;
}

#[trait_variant::make(CheckinRepository: Send)]
pub trait LocalCheckinRepository {
    /// Store a check-in and the habit's new counters as one write
    ///
    /// Fails with `AlreadyCheckedIn` if the habit already has one on the
    /// same calendar day and with `HabitNotFound` if the habit is gone. On
    /// failure neither the check-in nor the counters change.
    async fn record(&self, checkin: &Checkin, progress: Progress) -> HabitResult<()>;

    /// Whether any check-in exists at or after `since`
    async fn exists_since(&self, habit_id: &HabitId, since: DateTime<Utc>) -> HabitResult<bool>;

    /// Number of check-ins in `[from, until)`
    async fn count_between(
        &self,
        habit_id: &HabitId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> HabitResult<u64>;
}

#[trait_variant::make(BadgeRepository: Send)]
pub trait LocalBadgeRepository {
    /// Store badges, skipping any the owner already has under the same name
    async fn insert_all(&self, badges: &[Badge]) -> HabitResult<()>;

    async fn count_by_owner(&self, owner_id: &UserId) -> HabitResult<u64>;

    /// Badges of a user in threshold order
    async fn list_badges(&self, owner_id: &UserId) -> HabitResult<Vec<Badge>>;

    /// Mark a badge unlocked
    ///
    /// Returns `false` when it was already unlocked; an unlocked badge is
    /// never touched again.
    async fn unlock(
        &self,
        badge_id: &BadgeId,
        owner_id: &UserId,
        now: DateTime<Utc>,
    ) -> HabitResult<bool>;
}
