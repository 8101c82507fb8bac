//! Badge Evaluation Use Case
//!
//! An account whose badge set is missing (registration-time seeding failed)
//! gets it here before evaluation.

use std::sync::Arc;

use kernel::clock::Clock;
use kernel::id::UserId;

use crate::application::config::HabitConfig;
use crate::application::seed_badges::SeedBadgesUseCase;
use crate::domain::entity::Badge;
use crate::domain::repository::BadgeRepository;
use crate::domain::services::{Progress, badges_to_unlock};
use crate::error::HabitResult;

/// Unlock every locked badge the owner's new counters have earned
pub struct EvaluateBadgesUseCase<B>
where
    B: BadgeRepository,
{
    badge_repo: Arc<B>,
    config: Arc<HabitConfig>,
    clock: Arc<dyn Clock>,
}

impl<B> EvaluateBadgesUseCase<B>
where
    B: BadgeRepository,
{
    pub fn new(badge_repo: Arc<B>, config: Arc<HabitConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            badge_repo,
            config,
            clock,
        }
    }

    /// Returns the badges unlocked by this call
    pub async fn execute(&self, owner_id: &UserId, progress: Progress) -> HabitResult<Vec<Badge>> {
        SeedBadgesUseCase::new(self.badge_repo.clone(), self.config.clone())
            .execute(owner_id)
            .await?;

        let badges = self.badge_repo.list_badges(owner_id).await?;
        let now = self.clock.now();

        let mut unlocked = Vec::new();
        for badge in badges_to_unlock(&badges, progress.total_days, progress.streak) {
            // A concurrent evaluation may have won; only report our own unlocks
            if self
                .badge_repo
                .unlock(&badge.badge_id, owner_id, now)
                .await?
            {
                tracing::info!(
                    user_id = %owner_id,
                    badge = %badge.name,
                    condition_days = badge.condition_days,
                    "Badge unlocked"
                );

                let mut badge = badge.clone();
                badge.unlocked = true;
                badge.unlocked_at = Some(now);
                unlocked.push(badge);
            }
        }

        Ok(unlocked)
    }
}
