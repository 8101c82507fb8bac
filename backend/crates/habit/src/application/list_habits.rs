//! List Habits Use Case
//!
//! The habit page: each habit with its "done today" flag, the user's
//! badges, and summary counters.

use std::sync::Arc;

use kernel::clock::Clock;
use kernel::id::UserId;

use crate::application::config::HabitConfig;
use crate::application::list_badges::ListBadgesUseCase;
use crate::domain::entity::{Badge, Habit};
use crate::domain::repository::{BadgeRepository, CheckinRepository, HabitRepository};
use crate::error::HabitResult;

#[derive(Debug, Clone)]
pub struct HabitStatus {
    pub habit: Habit,
    pub today_checked: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HabitStats {
    pub total_habits: usize,
    pub done_today: usize,
    pub max_streak: u32,
    pub unlocked_badges: usize,
    pub total_badges: usize,
}

impl HabitStats {
    fn collect(habits: &[HabitStatus], badges: &[Badge]) -> Self {
        Self {
            total_habits: habits.len(),
            done_today: habits.iter().filter(|h| h.today_checked).count(),
            max_streak: habits.iter().map(|h| h.habit.streak).max().unwrap_or(0),
            unlocked_badges: badges.iter().filter(|b| b.unlocked).count(),
            total_badges: badges.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HabitOverview {
    pub habits: Vec<HabitStatus>,
    pub badges: Vec<Badge>,
    pub stats: HabitStats,
}

pub struct ListHabitsUseCase<H, C, B>
where
    H: HabitRepository,
    C: CheckinRepository,
    B: BadgeRepository,
{
    habit_repo: Arc<H>,
    checkin_repo: Arc<C>,
    badge_repo: Arc<B>,
    config: Arc<HabitConfig>,
    clock: Arc<dyn Clock>,
}

impl<H, C, B> ListHabitsUseCase<H, C, B>
where
    H: HabitRepository,
    C: CheckinRepository,
    B: BadgeRepository,
{
    pub fn new(
        habit_repo: Arc<H>,
        checkin_repo: Arc<C>,
        badge_repo: Arc<B>,
        config: Arc<HabitConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            habit_repo,
            checkin_repo,
            badge_repo,
            config,
            clock,
        }
    }

    pub async fn execute(&self, owner_id: &UserId) -> HabitResult<HabitOverview> {
        let start_of_today = self.config.calendar.window(self.clock.now()).start_of_today;

        let mut habits = Vec::new();
        for habit in self.habit_repo.list_by_owner(owner_id).await? {
            let today_checked = self
                .checkin_repo
                .exists_since(&habit.habit_id, start_of_today)
                .await?;
            habits.push(HabitStatus {
                habit,
                today_checked,
            });
        }

        let badges = ListBadgesUseCase::new(self.badge_repo.clone(), self.config.clone())
            .execute(owner_id)
            .await?;
        let stats = HabitStats::collect(&habits, &badges);

        Ok(HabitOverview {
            habits,
            badges,
            stats,
        })
    }
}
