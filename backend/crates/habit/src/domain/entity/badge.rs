//! Badge Entity

use chrono::{DateTime, Utc};
use kernel::id::{BadgeId, UserId};
use serde::{Deserialize, Serialize};

/// Catalogue entry a per-user badge is created from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Day-count threshold
    pub condition_days: u32,
}

impl BadgeDefinition {
    pub fn new(name: &str, description: &str, icon: &str, condition_days: u32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            condition_days,
        }
    }
}

/// Achievement owned by a user
///
/// The only transition is locked → unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub badge_id: BadgeId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub condition_days: u32,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Badge {
    /// A locked badge for `owner_id`
    pub fn from_definition(owner_id: UserId, definition: &BadgeDefinition) -> Self {
        Self {
            badge_id: BadgeId::new(),
            owner_id,
            name: definition.name.clone(),
            description: definition.description.clone(),
            icon: definition.icon.clone(),
            condition_days: definition.condition_days,
            unlocked: false,
            unlocked_at: None,
        }
    }

    /// Either counter reaching the threshold earns the badge
    pub fn is_earned_by(&self, total_days: u32, streak: u32) -> bool {
        total_days >= self.condition_days || streak >= self.condition_days
    }
}
