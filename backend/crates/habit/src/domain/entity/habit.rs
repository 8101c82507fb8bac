//! Habit Entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use kernel::id::{HabitId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::HabitError;

/// Maximum habit name length in characters
pub const HABIT_NAME_MAX_LENGTH: usize = 255;

/// How often the habit is meant to be done
///
/// Streaks are counted in calendar days for both.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    #[display("daily")]
    Daily,
    #[display("weekly")]
    Weekly,
}

impl Frequency {
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }
}

impl FromStr for Frequency {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            other => Err(HabitError::InvalidInput(format!(
                "Unknown frequency '{other}', expected 'daily' or 'weekly'"
            ))),
        }
    }
}

/// A tracked habit
///
/// `streak` and `total_days` change only through a recorded check-in,
/// and `streak <= total_days` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    pub habit_id: HabitId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub streak: u32,
    pub total_days: u32,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a habit with no check-ins
    ///
    /// The name is trimmed and must be 1..=255 characters.
    pub fn new(
        owner_id: UserId,
        name: &str,
        description: &str,
        frequency: Frequency,
        now: DateTime<Utc>,
    ) -> Result<Self, HabitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitError::InvalidInput("Habit name is required".into()));
        }
        if name.chars().count() > HABIT_NAME_MAX_LENGTH {
            return Err(HabitError::InvalidInput(format!(
                "Habit name must be at most {HABIT_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self {
            habit_id: HabitId::new(),
            owner_id,
            name: name.to_string(),
            description: description.trim().to_string(),
            frequency,
            streak: 0,
            total_days: 0,
            created_at: now,
        })
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id == *user_id
    }
}
