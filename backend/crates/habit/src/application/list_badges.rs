//! List Badges Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::HabitConfig;
use crate::application::seed_badges::SeedBadgesUseCase;
use crate::domain::entity::Badge;
use crate::domain::repository::BadgeRepository;
use crate::error::HabitResult;

pub struct ListBadgesUseCase<B>
where
    B: BadgeRepository,
{
    badge_repo: Arc<B>,
    config: Arc<HabitConfig>,
}

impl<B> ListBadgesUseCase<B>
where
    B: BadgeRepository,
{
    pub fn new(badge_repo: Arc<B>, config: Arc<HabitConfig>) -> Self {
        Self { badge_repo, config }
    }

    /// Seeds a missing badge set first
    pub async fn execute(&self, owner_id: &UserId) -> HabitResult<Vec<Badge>> {
        SeedBadgesUseCase::new(self.badge_repo.clone(), self.config.clone())
            .execute(owner_id)
            .await?;

        self.badge_repo.list_badges(owner_id).await
    }
}
