//! Badge Seeding
//!
//! Every account gets the configured badge set, all locked, when it is
//! registered. Seeding an account that already has badges does nothing.

use std::sync::Arc;

use auth::domain::repository::AccountProvisioner;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::UserId;

use crate::application::config::HabitConfig;
use crate::domain::entity::Badge;
use crate::domain::repository::BadgeRepository;
use crate::error::HabitResult;

pub struct SeedBadgesUseCase<B>
where
    B: BadgeRepository,
{
    badge_repo: Arc<B>,
    config: Arc<HabitConfig>,
}

impl<B> SeedBadgesUseCase<B>
where
    B: BadgeRepository,
{
    pub fn new(badge_repo: Arc<B>, config: Arc<HabitConfig>) -> Self {
        Self { badge_repo, config }
    }

    /// Returns the number of badges created
    pub async fn execute(&self, owner_id: &UserId) -> HabitResult<usize> {
        if self.badge_repo.count_by_owner(owner_id).await? > 0 {
            tracing::debug!(user_id = %owner_id, "Badges already seeded");
            return Ok(0);
        }

        let badges: Vec<Badge> = self
            .config
            .badges
            .iter()
            .map(|definition| Badge::from_definition(*owner_id, definition))
            .collect();

        self.badge_repo.insert_all(&badges).await?;

        tracing::info!(user_id = %owner_id, badges = badges.len(), "Badges seeded");

        Ok(badges.len())
    }
}

/// Registration hook that seeds the badge set
pub struct BadgeProvisioner<B> {
    badge_repo: Arc<B>,
    config: Arc<HabitConfig>,
}

impl<B> BadgeProvisioner<B> {
    pub fn new(badge_repo: Arc<B>, config: Arc<HabitConfig>) -> Self {
        Self { badge_repo, config }
    }
}

impl<B> AccountProvisioner for BadgeProvisioner<B>
where
    B: BadgeRepository + Send + Sync + 'static,
{
    async fn provision(&self, user_id: &UserId) -> AppResult<()> {
        SeedBadgesUseCase::new(self.badge_repo.clone(), self.config.clone())
            .execute(user_id)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }
}
