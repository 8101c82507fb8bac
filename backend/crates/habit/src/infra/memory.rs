//! In-Memory Habit Store
//!
//! Backs tests and local runs without a database. Enforces the same
//! one-check-in-per-day key as the PostgreSQL schema.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{BadgeId, HabitId, UserId};
use parking_lot::RwLock;

use crate::domain::entity::{Badge, Checkin, Habit};
use crate::domain::repository::{BadgeRepository, CheckinRepository, HabitRepository};
use crate::domain::services::Progress;
use crate::error::{HabitError, HabitResult};

#[derive(Debug, Default)]
struct Tables {
    habits: HashMap<HabitId, Habit>,
    checkins: Vec<Checkin>,
    badges: Vec<Badge>,
}

/// Habits, check-ins and badges held in process memory
#[derive(Debug, Default)]
pub struct InMemoryHabitStore {
    tables: RwLock<Tables>,
}

impl InMemoryHabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All check-ins of a habit, oldest first
    pub fn checkins_of(&self, habit_id: &HabitId) -> Vec<Checkin> {
        let mut checkins: Vec<Checkin> = self
            .tables
            .read()
            .checkins
            .iter()
            .filter(|c| c.habit_id == *habit_id)
            .cloned()
            .collect();
        checkins.sort_by_key(|c| c.checked_at);
        checkins
    }
}

impl HabitRepository for InMemoryHabitStore {
    async fn create(&self, habit: &Habit) -> HabitResult<()> {
        self.tables
            .write()
            .habits
            .insert(habit.habit_id, habit.clone());
        Ok(())
    }

    async fn find_owned(
        &self,
        habit_id: &HabitId,
        owner_id: &UserId,
    ) -> HabitResult<Option<Habit>> {
        Ok(self
            .tables
            .read()
            .habits
            .get(habit_id)
            .filter(|h| h.is_owned_by(owner_id))
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> HabitResult<Vec<Habit>> {
        let mut habits: Vec<Habit> = self
            .tables
            .read()
            .habits
            .values()
            .filter(|h| h.is_owned_by(owner_id))
            .cloned()
            .collect();
        habits.sort_by_key(|h| h.created_at);
        Ok(habits)
    }

    async fn delete_owned(&self, habit_id: &HabitId, owner_id: &UserId) -> HabitResult<bool> {
        let mut tables = self.tables.write();

        let owned = tables
            .habits
            .get(habit_id)
            .is_some_and(|h| h.is_owned_by(owner_id));
        if !owned {
            return Ok(false);
        }

        tables.checkins.retain(|c| c.habit_id != *habit_id);
        tables.habits.remove(habit_id);
        Ok(true)
    }
}

impl CheckinRepository for InMemoryHabitStore {
    async fn record(&self, checkin: &Checkin, progress: Progress) -> HabitResult<()> {
        let mut tables = self.tables.write();

        if tables
            .checkins
            .iter()
            .any(|c| c.habit_id == checkin.habit_id && c.checkin_day == checkin.checkin_day)
        {
            return Err(HabitError::AlreadyCheckedIn);
        }

        let habit = tables
            .habits
            .get_mut(&checkin.habit_id)
            .ok_or(HabitError::HabitNotFound)?;
        habit.streak = progress.streak;
        habit.total_days = progress.total_days;

        tables.checkins.push(checkin.clone());
        Ok(())
    }

    async fn exists_since(&self, habit_id: &HabitId, since: DateTime<Utc>) -> HabitResult<bool> {
        Ok(self
            .tables
            .read()
            .checkins
            .iter()
            .any(|c| c.habit_id == *habit_id && c.checked_at >= since))
    }

    async fn count_between(
        &self,
        habit_id: &HabitId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> HabitResult<u64> {
        Ok(self
            .tables
            .read()
            .checkins
            .iter()
            .filter(|c| c.habit_id == *habit_id && c.checked_at >= from && c.checked_at < until)
            .count() as u64)
    }
}

impl BadgeRepository for InMemoryHabitStore {
    async fn insert_all(&self, badges: &[Badge]) -> HabitResult<()> {
        let mut tables = self.tables.write();
        for badge in badges {
            let exists = tables
                .badges
                .iter()
                .any(|b| b.owner_id == badge.owner_id && b.name == badge.name);
            if !exists {
                tables.badges.push(badge.clone());
            }
        }
        Ok(())
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> HabitResult<u64> {
        Ok(self
            .tables
            .read()
            .badges
            .iter()
            .filter(|b| b.owner_id == *owner_id)
            .count() as u64)
    }

    async fn list_badges(&self, owner_id: &UserId) -> HabitResult<Vec<Badge>> {
        let mut badges: Vec<Badge> = self
            .tables
            .read()
            .badges
            .iter()
            .filter(|b| b.owner_id == *owner_id)
            .cloned()
            .collect();
        badges.sort_by_key(|b| b.condition_days);
        Ok(badges)
    }

    async fn unlock(
        &self,
        badge_id: &BadgeId,
        owner_id: &UserId,
        now: DateTime<Utc>,
    ) -> HabitResult<bool> {
        let mut tables = self.tables.write();

        match tables
            .badges
            .iter_mut()
            .find(|b| b.badge_id == *badge_id && b.owner_id == *owner_id && !b.unlocked)
        {
            Some(badge) => {
                badge.unlocked = true;
                badge.unlocked_at = Some(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{BadgeDefinition, Frequency};
    use chrono::NaiveDate;

    async fn stored_habit(store: &InMemoryHabitStore) -> Habit {
        let habit = Habit::new(UserId::new(), "Run", "", Frequency::Daily, Utc::now()).unwrap();
        store.create(&habit).await.unwrap();
        habit
    }

    #[tokio::test]
    async fn test_one_checkin_per_day() {
        let store = InMemoryHabitStore::new();
        let habit = stored_habit(&store).await;
        let other = stored_habit(&store).await;
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let now = Utc::now();

        store
            .record(&Checkin::new(habit.habit_id, now, day), Progress::new(1, 1))
            .await
            .unwrap();
        let err = store
            .record(&Checkin::new(habit.habit_id, now, day), Progress::new(2, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::AlreadyCheckedIn));

        let stored = store.find_owned(&habit.habit_id, &habit.owner_id).await.unwrap().unwrap();
        assert_eq!((stored.streak, stored.total_days), (1, 1));

        // Another habit on the same day is fine
        store
            .record(&Checkin::new(other.habit_id, now, day), Progress::new(1, 1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_record_for_missing_habit_stores_nothing() {
        let store = InMemoryHabitStore::new();
        let habit_id = HabitId::new();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let err = store
            .record(&Checkin::new(habit_id, Utc::now(), day), Progress::new(1, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, HabitError::HabitNotFound));
        assert!(store.checkins_of(&habit_id).is_empty());
    }

    #[tokio::test]
    async fn test_insert_all_skips_existing_names() {
        let store = InMemoryHabitStore::new();
        let owner = UserId::new();
        let first = Badge::from_definition(owner, &BadgeDefinition::new("first", "", "*", 1));
        let week = Badge::from_definition(owner, &BadgeDefinition::new("week", "", "*", 7));

        store.insert_all(std::slice::from_ref(&first)).await.unwrap();
        store.insert_all(&[first.clone(), week]).await.unwrap();

        assert_eq!(store.count_by_owner(&owner).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_other_owner_sees_nothing() {
        let store = InMemoryHabitStore::new();
        let owner = UserId::new();
        let stranger = UserId::new();
        let habit = Habit::new(owner, "Run", "", Frequency::Daily, Utc::now()).unwrap();
        store.create(&habit).await.unwrap();

        assert!(
            store
                .find_owned(&habit.habit_id, &stranger)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!store.delete_owned(&habit.habit_id, &stranger).await.unwrap());
        assert!(store.delete_owned(&habit.habit_id, &owner).await.unwrap());
    }

    #[tokio::test]
    async fn test_unlock_is_one_way() {
        let store = InMemoryHabitStore::new();
        let owner = UserId::new();
        let badge = Badge::from_definition(owner, &BadgeDefinition::new("first", "", "*", 1));
        store.insert_all(std::slice::from_ref(&badge)).await.unwrap();

        let now = Utc::now();
        assert!(store.unlock(&badge.badge_id, &owner, now).await.unwrap());
        assert!(!store.unlock(&badge.badge_id, &owner, now).await.unwrap());
        assert!(!store.unlock(&badge.badge_id, &UserId::new(), now).await.unwrap());
    }
}
