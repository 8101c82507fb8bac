//! Calendar-day boundaries
//!
//! A check-in belongs to the local calendar day it happens on. Days start at
//! local wall-clock midnight, so a day can be 23 or 25 hours long across a
//! DST change.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Time zone the day boundaries are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Calendar {
    /// The server's local time zone
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

/// Boundaries needed to record a check-in at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub today: NaiveDate,
    pub start_of_today: DateTime<Utc>,
    pub start_of_yesterday: DateTime<Utc>,
}

impl Calendar {
    /// Local calendar day of an instant
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Calendar::Local => instant.with_timezone(&Local).date_naive(),
            Calendar::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    /// First instant of a local calendar day
    pub fn start_of(&self, day: NaiveDate) -> DateTime<Utc> {
        match self {
            Calendar::Local => local_midnight(&Local, day),
            Calendar::Fixed(offset) => local_midnight(offset, day),
        }
    }

    pub fn window(&self, now: DateTime<Utc>) -> DayWindow {
        let today = self.day_of(now);
        let yesterday = today.pred_opt().unwrap_or(NaiveDate::MIN);

        DayWindow {
            today,
            start_of_today: self.start_of(today),
            start_of_yesterday: self.start_of(yesterday),
        }
    }
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let mut local = day.and_time(NaiveTime::MIN);

    // Where a DST jump skips midnight the day starts at the first instant that exists
    for _ in 0..(24 * 4) {
        if let Some(instant) = tz.from_local_datetime(&local).earliest() {
            return instant.with_timezone(&Utc);
        }
        local += Duration::minutes(15);
    }

    day.and_time(NaiveTime::MIN).and_utc()
}
