//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{CheckinOutcome, HabitOverview, HabitStats, HabitStatus};
use crate::domain::entity::{Badge, Frequency, Habit};

// ============================================================================
// Habits
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub streak: u32,
    pub total_days: u32,
    pub today_checked: bool,
    pub created_at: DateTime<Utc>,
}

impl HabitResponse {
    pub fn new(habit: Habit, today_checked: bool) -> Self {
        Self {
            id: habit.habit_id.into_uuid(),
            name: habit.name,
            description: habit.description,
            frequency: habit.frequency,
            streak: habit.streak,
            total_days: habit.total_days,
            today_checked,
            created_at: habit.created_at,
        }
    }
}

impl From<HabitStatus> for HabitResponse {
    fn from(status: HabitStatus) -> Self {
        Self::new(status.habit, status.today_checked)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStatsResponse {
    pub total_habits: usize,
    pub done_today: usize,
    pub max_streak: u32,
    pub unlocked_badges: usize,
    pub total_badges: usize,
}

impl From<HabitStats> for HabitStatsResponse {
    fn from(stats: HabitStats) -> Self {
        Self {
            total_habits: stats.total_habits,
            done_today: stats.done_today,
            max_streak: stats.max_streak,
            unlocked_badges: stats.unlocked_badges,
            total_badges: stats.total_badges,
        }
    }
}

/// GET /api/habits
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitListResponse {
    pub habits: Vec<HabitResponse>,
    pub badges: Vec<BadgeResponse>,
    pub stats: HabitStatsResponse,
}

impl From<HabitOverview> for HabitListResponse {
    fn from(overview: HabitOverview) -> Self {
        Self {
            habits: overview.habits.into_iter().map(HabitResponse::from).collect(),
            badges: overview.badges.into_iter().map(BadgeResponse::from).collect(),
            stats: overview.stats.into(),
        }
    }
}

// ============================================================================
// Check-in
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    pub already_checked_in: bool,
    pub streak: u32,
    pub total_days: u32,
    /// Badges unlocked by this check-in
    pub unlocked_badges: Vec<BadgeResponse>,
}

impl From<CheckinOutcome> for CheckinResponse {
    fn from(outcome: CheckinOutcome) -> Self {
        let progress = outcome.progress();
        let already_checked_in = outcome.is_already_checked_in();
        let unlocked = match outcome {
            CheckinOutcome::Recorded { unlocked, .. } => unlocked,
            CheckinOutcome::AlreadyCheckedIn { .. } => Vec::new(),
        };

        Self {
            already_checked_in,
            streak: progress.streak,
            total_days: progress.total_days,
            unlocked_badges: unlocked.into_iter().map(BadgeResponse::from).collect(),
        }
    }
}

// ============================================================================
// Badges
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub condition_days: u32,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl From<Badge> for BadgeResponse {
    fn from(badge: Badge) -> Self {
        Self {
            id: badge.badge_id.into_uuid(),
            name: badge.name,
            description: badge.description,
            icon: badge.icon,
            condition_days: badge.condition_days,
            unlocked: badge.unlocked,
            unlocked_at: badge.unlocked_at,
        }
    }
}
