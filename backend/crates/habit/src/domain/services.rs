//! Domain Services
//!
//! Pure decision logic for streaks and badge unlocks.

use super::entity::badge::Badge;

/// Streak and total of a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub streak: u32,
    pub total_days: u32,
}

impl Progress {
    pub fn new(streak: u32, total_days: u32) -> Self {
        Self { streak, total_days }
    }

    /// Progress after one more check-in
    ///
    /// The streak continues only if the habit was also checked in on the
    /// previous calendar day; otherwise it restarts at 1.
    pub fn after_checkin(self, checked_in_yesterday: bool) -> Self {
        let streak = if checked_in_yesterday {
            self.streak.saturating_add(1)
        } else {
            1
        };

        Self {
            streak,
            total_days: self.total_days.saturating_add(1),
        }
    }
}

/// Locked badges that the given counters earn
pub fn badges_to_unlock(badges: &[Badge], total_days: u32, streak: u32) -> Vec<&Badge> {
    badges
        .iter()
        .filter(|badge| !badge.unlocked && badge.is_earned_by(total_days, streak))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::badge::BadgeDefinition;
    use kernel::id::UserId;

    fn badge(days: u32, unlocked: bool) -> Badge {
        let mut badge = Badge::from_definition(
            UserId::new(),
            &BadgeDefinition::new("b", "", "*", days),
        );
        badge.unlocked = unlocked;
        badge
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let p = Progress::new(0, 0)
            .after_checkin(false)
            .after_checkin(true)
            .after_checkin(true);
        assert_eq!(p, Progress::new(3, 3));
    }

    #[test]
    fn test_gap_resets_streak_but_not_total() {
        let p = Progress::new(0, 0).after_checkin(false).after_checkin(false);
        assert_eq!(p, Progress::new(1, 2));
    }

    #[test]
    fn test_streak_never_exceeds_total() {
        let mut p = Progress::new(0, 0);
        for i in 0..50 {
            p = p.after_checkin(i % 7 != 0);
            assert!(p.streak <= p.total_days);
        }
    }

    #[test]
    fn test_either_counter_unlocks() {
        let badges = vec![badge(1, false), badge(7, false), badge(21, false)];

        let by_total: Vec<u32> = badges_to_unlock(&badges, 7, 1)
            .iter()
            .map(|b| b.condition_days)
            .collect();
        assert_eq!(by_total, vec![1, 7]);

        // A broken streak does not hold back a badge the total has earned
        assert_eq!(badges_to_unlock(&badges, 21, 1).len(), 3);
    }

    #[test]
    fn test_unlocked_badges_skipped() {
        let badges = vec![badge(1, true), badge(7, false)];
        assert!(badges_to_unlock(&badges, 3, 3).is_empty());
    }
}
