//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{BadgeId, HabitId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Badge, Checkin, Frequency, Habit};
use crate::domain::repository::{BadgeRepository, CheckinRepository, HabitRepository};
use crate::domain::services::Progress;
use crate::error::{HabitError, HabitResult};

const CHECKIN_DAY_UNIQUE: &str = "habit_checkins_habit_id_checkin_day_key";

/// PostgreSQL-backed habit, check-in and badge repository
#[derive(Clone)]
pub struct PgHabitRepository {
    pool: PgPool,
}

impl PgHabitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Habit Repository Implementation
// ============================================================================

impl HabitRepository for PgHabitRepository {
    async fn create(&self, habit: &Habit) -> HabitResult<()> {
        sqlx::query(
            r#"
            INSERT INTO habits (
                habit_id,
                user_id,
                name,
                description,
                frequency,
                streak,
                total_days,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(habit.habit_id.as_uuid())
        .bind(habit.owner_id.as_uuid())
        .bind(&habit.name)
        .bind(&habit.description)
        .bind(habit.frequency.code())
        .bind(to_db_count(habit.streak)?)
        .bind(to_db_count(habit.total_days)?)
        .bind(habit.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_owned(
        &self,
        habit_id: &HabitId,
        owner_id: &UserId,
    ) -> HabitResult<Option<Habit>> {
        let row = sqlx::query_as::<_, HabitRow>(
            r#"
            SELECT habit_id, user_id, name, description, frequency, streak, total_days, created_at
            FROM habits
            WHERE habit_id = $1 AND user_id = $2
            "#,
        )
        .bind(habit_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(HabitRow::into_habit).transpose()
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> HabitResult<Vec<Habit>> {
        let rows = sqlx::query_as::<_, HabitRow>(
            r#"
            SELECT habit_id, user_id, name, description, frequency, streak, total_days, created_at
            FROM habits
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(HabitRow::into_habit).collect()
    }

    async fn delete_owned(&self, habit_id: &HabitId, owner_id: &UserId) -> HabitResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Check-ins reference the habit, so they go first
        sqlx::query(
            r#"
            DELETE FROM habit_checkins
            WHERE habit_id = $1
              AND EXISTS (SELECT 1 FROM habits WHERE habit_id = $1 AND user_id = $2)
            "#,
        )
        .bind(habit_id.as_uuid())
        .bind(owner_id.as_uuid())
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM habits WHERE habit_id = $1 AND user_id = $2")
            .bind(habit_id.as_uuid())
            .bind(owner_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }
}

// ============================================================================
// Check-in Repository Implementation
// ============================================================================

impl CheckinRepository for PgHabitRepository {
    async fn record(&self, checkin: &Checkin, progress: Progress) -> HabitResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE habits SET
                streak = $2,
                total_days = $3
            WHERE habit_id = $1
            "#,
        )
        .bind(checkin.habit_id.as_uuid())
        .bind(to_db_count(progress.streak)?)
        .bind(to_db_count(progress.total_days)?)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(HabitError::HabitNotFound);
        }

        sqlx::query(
            r#"
            INSERT INTO habit_checkins (checkin_id, habit_id, checked_at, checkin_day)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(checkin.checkin_id.as_uuid())
        .bind(checkin.habit_id.as_uuid())
        .bind(checkin.checked_at)
        .bind(checkin.checkin_day)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if db.is_unique_violation() && db.constraint() == Some(CHECKIN_DAY_UNIQUE) =>
            {
                HabitError::AlreadyCheckedIn
            }
            _ => HabitError::Database(e),
        })?;

        // Dropping `tx` on any early return rolls both writes back
        tx.commit().await?;

        Ok(())
    }

    async fn exists_since(&self, habit_id: &HabitId, since: DateTime<Utc>) -> HabitResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM habit_checkins WHERE habit_id = $1 AND checked_at >= $2)",
        )
        .bind(habit_id.as_uuid())
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn count_between(
        &self,
        habit_id: &HabitId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> HabitResult<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM habit_checkins
            WHERE habit_id = $1 AND checked_at >= $2 AND checked_at < $3
            "#,
        )
        .bind(habit_id.as_uuid())
        .bind(from)
        .bind(until)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}

// ============================================================================
// Badge Repository Implementation
// ============================================================================

impl BadgeRepository for PgHabitRepository {
    async fn insert_all(&self, badges: &[Badge]) -> HabitResult<()> {
        let mut tx = self.pool.begin().await?;

        for badge in badges {
            sqlx::query(
                r#"
                INSERT INTO badges (
                    badge_id,
                    user_id,
                    name,
                    description,
                    icon,
                    condition_days,
                    unlocked,
                    unlocked_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT ON CONSTRAINT badges_user_id_name_key DO NOTHING
                "#,
            )
            .bind(badge.badge_id.as_uuid())
            .bind(badge.owner_id.as_uuid())
            .bind(&badge.name)
            .bind(&badge.description)
            .bind(&badge.icon)
            .bind(to_db_count(badge.condition_days)?)
            .bind(badge.unlocked)
            .bind(badge.unlocked_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> HabitResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM badges WHERE user_id = $1")
            .bind(owner_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn list_badges(&self, owner_id: &UserId) -> HabitResult<Vec<Badge>> {
        let rows = sqlx::query_as::<_, BadgeRow>(
            r#"
            SELECT badge_id, user_id, name, description, icon, condition_days, unlocked, unlocked_at
            FROM badges
            WHERE user_id = $1
            ORDER BY condition_days
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BadgeRow::into_badge).collect())
    }

    async fn unlock(
        &self,
        badge_id: &BadgeId,
        owner_id: &UserId,
        now: DateTime<Utc>,
    ) -> HabitResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE badges SET
                unlocked = TRUE,
                unlocked_at = $3
            WHERE badge_id = $1 AND user_id = $2 AND NOT unlocked
            "#,
        )
        .bind(badge_id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

fn to_db_count(value: u32) -> HabitResult<i32> {
    i32::try_from(value).map_err(|_| HabitError::Internal(format!("Counter overflow: {value}")))
}

fn from_db_count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

#[derive(sqlx::FromRow)]
struct HabitRow {
    habit_id: Uuid,
    user_id: Uuid,
    name: String,
    description: String,
    frequency: String,
    streak: i32,
    total_days: i32,
    created_at: DateTime<Utc>,
}

impl HabitRow {
    fn into_habit(self) -> HabitResult<Habit> {
        let frequency = self
            .frequency
            .parse::<Frequency>()
            .map_err(|e| HabitError::Internal(format!("Invalid frequency: {e}")))?;

        Ok(Habit {
            habit_id: HabitId::from_uuid(self.habit_id),
            owner_id: UserId::from_uuid(self.user_id),
            name: self.name,
            description: self.description,
            frequency,
            streak: from_db_count(self.streak),
            total_days: from_db_count(self.total_days),
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BadgeRow {
    badge_id: Uuid,
    user_id: Uuid,
    name: String,
    description: String,
    icon: String,
    condition_days: i32,
    unlocked: bool,
    unlocked_at: Option<DateTime<Utc>>,
}

impl BadgeRow {
    fn into_badge(self) -> Badge {
        Badge {
            badge_id: BadgeId::from_uuid(self.badge_id),
            owner_id: UserId::from_uuid(self.user_id),
            name: self.name,
            description: self.description,
            icon: self.icon,
            condition_days: from_db_count(self.condition_days),
            unlocked: self.unlocked,
            unlocked_at: self.unlocked_at,
        }
    }
}
