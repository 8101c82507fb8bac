//! Habit Check-in Entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CheckinId, HabitId};

/// One completion of a habit
///
/// `checkin_day` is the local calendar day of `checked_at`; storage keeps at
/// most one check-in per habit and day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkin {
    pub checkin_id: CheckinId,
    pub habit_id: HabitId,
    pub checked_at: DateTime<Utc>,
    pub checkin_day: NaiveDate,
}

impl Checkin {
    pub fn new(habit_id: HabitId, checked_at: DateTime<Utc>, checkin_day: NaiveDate) -> Self {
        Self {
            checkin_id: CheckinId::new(),
            habit_id,
            checked_at,
            checkin_day,
        }
    }
}
