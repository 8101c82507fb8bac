//! Scenario tests for the habit crate
//!
//! Days are taken at UTC+8 and time comes from a `ManualClock`; the store is
//! in-memory.

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use kernel::clock::ManualClock;
    use kernel::id::{HabitId, UserId};

    use crate::application::{
        CheckinOutcome, CreateHabitInput, CreateHabitUseCase, HabitConfig, RecordCheckinUseCase,
        SeedBadgesUseCase,
    };
    use crate::domain::calendar::Calendar;
    use crate::domain::entity::Habit;
    use crate::infra::InMemoryHabitStore;
    use crate::presentation::HabitAppState;

    /// 2024-05-01 09:00 at UTC+8
    pub fn day_one() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 1, 0, 0).unwrap()
    }

    pub fn config() -> HabitConfig {
        HabitConfig {
            calendar: Calendar::Fixed(FixedOffset::east_opt(8 * 3600).unwrap()),
            ..HabitConfig::default()
        }
    }

    pub struct Harness {
        pub state: HabitAppState<InMemoryHabitStore>,
        pub clock: ManualClock,
        pub owner: UserId,
    }

    impl Harness {
        pub fn new() -> Self {
            let clock = ManualClock::new(day_one());
            let state = HabitAppState::new(
                Arc::new(InMemoryHabitStore::new()),
                config(),
                Arc::new(clock.clone()),
            );
            Self {
                state,
                clock,
                owner: UserId::new(),
            }
        }

        pub async fn seed(&self) {
            SeedBadgesUseCase::new(self.state.repo.clone(), self.state.config.clone())
                .execute(&self.owner)
                .await
                .unwrap();
        }

        pub async fn habit(&self, name: &str) -> Habit {
            CreateHabitUseCase::new(self.state.repo.clone(), self.state.clock.clone())
                .execute(
                    &self.owner,
                    CreateHabitInput {
                        name: name.to_string(),
                        description: None,
                        frequency: None,
                    },
                )
                .await
                .unwrap()
        }

        pub fn record(&self) -> RecordCheckinUseCase<InMemoryHabitStore, InMemoryHabitStore, InMemoryHabitStore> {
            RecordCheckinUseCase::new(
                self.state.repo.clone(),
                self.state.repo.clone(),
                self.state.repo.clone(),
                self.state.locks.clone(),
                self.state.config.clone(),
                self.state.clock.clone(),
            )
        }

        pub async fn check_in(&self, habit_id: &HabitId) -> CheckinOutcome {
            self.record().execute(habit_id, &self.owner).await.unwrap()
        }
    }
}

#[cfg(test)]
mod streak_tests {
    use chrono::Duration;

    use super::fixtures::*;
    use crate::application::CheckinOutcome;
    use crate::domain::repository::HabitRepository;
    use crate::domain::services::Progress;
    use crate::error::HabitError;
    use kernel::id::UserId;

    #[tokio::test]
    async fn test_second_checkin_same_day_changes_nothing() {
        let h = Harness::new();
        let habit = h.habit("Read").await;

        let first = h.check_in(&habit.habit_id).await;
        assert_eq!(first.progress(), Progress::new(1, 1));

        h.clock.advance(Duration::hours(10));
        let second = h.check_in(&habit.habit_id).await;
        assert!(second.is_already_checked_in());
        assert_eq!(second.progress(), Progress::new(1, 1));

        assert_eq!(h.state.repo.checkins_of(&habit.habit_id).len(), 1);
    }

    #[tokio::test]
    async fn test_three_consecutive_days() {
        let h = Harness::new();
        let habit = h.habit("Run").await;

        for expected in 1..=3 {
            let outcome = h.check_in(&habit.habit_id).await;
            assert_eq!(outcome.progress(), Progress::new(expected, expected));
            h.clock.advance(Duration::days(1));
        }
    }

    #[tokio::test]
    async fn test_gap_restarts_streak() {
        let h = Harness::new();
        let habit = h.habit("Run").await;

        h.check_in(&habit.habit_id).await;
        h.clock.advance(Duration::days(2));
        let outcome = h.check_in(&habit.habit_id).await;

        assert_eq!(outcome.progress(), Progress::new(1, 2));

        let stored = h
            .state
            .repo
            .find_owned(&habit.habit_id, &h.owner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!((stored.streak, stored.total_days), (1, 2));
    }

    #[tokio::test]
    async fn test_local_midnight_separates_days() {
        let h = Harness::new();
        let habit = h.habit("Journal").await;

        // 23:59 local, then two minutes later on the next local day
        h.clock
            .set(chrono::DateTime::parse_from_rfc3339("2024-05-01T15:59:00Z").unwrap().into());
        h.check_in(&habit.habit_id).await;
        h.clock.advance(Duration::minutes(2));
        let outcome = h.check_in(&habit.habit_id).await;

        assert_eq!(outcome.progress(), Progress::new(2, 2));
    }

    #[tokio::test]
    async fn test_stranger_cannot_check_in() {
        let h = Harness::new();
        let habit = h.habit("Read").await;

        let err = h
            .record()
            .execute(&habit.habit_id, &UserId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::HabitNotFound));
        assert!(h.state.repo.checkins_of(&habit.habit_id).is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_checkins_record_once() {
        let h = Harness::new();
        let habit = h.habit("Meditate").await;

        let mut handles = Vec::new();
        for _ in 0..10 {
            let use_case = h.record();
            let habit_id = habit.habit_id;
            let owner = h.owner;
            handles.push(tokio::spawn(async move {
                use_case.execute(&habit_id, &owner).await.unwrap()
            }));
        }

        let mut recorded = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), CheckinOutcome::Recorded { .. }) {
                recorded += 1;
            }
        }

        assert_eq!(recorded, 1);
        assert_eq!(h.state.repo.checkins_of(&habit.habit_id).len(), 1);
    }
}

#[cfg(test)]
mod badge_tests {
    use chrono::Duration;

    use super::fixtures::*;
    use crate::application::{BadgeProvisioner, CheckinOutcome, ListBadgesUseCase};
    use crate::domain::entity::Badge;
    use auth::domain::repository::AccountProvisioner;

    async fn badges(h: &Harness) -> Vec<Badge> {
        ListBadgesUseCase::new(h.state.repo.clone(), h.state.config.clone())
            .execute(&h.owner)
            .await
            .unwrap()
    }

    fn unlocked_thresholds(badges: &[Badge]) -> Vec<u32> {
        badges
            .iter()
            .filter(|b| b.unlocked)
            .map(|b| b.condition_days)
            .collect()
    }

    #[tokio::test]
    async fn test_registration_seeds_four_locked_badges_once() {
        let h = Harness::new();
        let provisioner = BadgeProvisioner::new(h.state.repo.clone(), h.state.config.clone());

        provisioner.provision(&h.owner).await.unwrap();
        provisioner.provision(&h.owner).await.unwrap();

        let seeded = badges(&h).await;
        assert_eq!(seeded.len(), 4);
        assert!(seeded.iter().all(|b| !b.unlocked));
        assert_eq!(seeded[0].name, "初出茅庐");
        assert_eq!(seeded[0].icon, "🌱");
    }

    #[tokio::test]
    async fn test_first_checkin_unlocks_only_first_badge() {
        let h = Harness::new();
        h.seed().await;
        let habit = h.habit("Read").await;

        let CheckinOutcome::Recorded { unlocked, .. } = h.check_in(&habit.habit_id).await else {
            panic!("expected a recorded check-in");
        };

        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].condition_days, 1);
        assert_eq!(unlocked_thresholds(&badges(&h).await), vec![1]);
    }

    #[tokio::test]
    async fn test_seven_day_badge_on_seventh_checkin() {
        let h = Harness::new();
        h.seed().await;
        let habit = h.habit("Run").await;

        for day in 1..=7u32 {
            let outcome = h.check_in(&habit.habit_id).await;
            let CheckinOutcome::Recorded { unlocked, .. } = outcome else {
                panic!("day {day} should record");
            };
            let newly: Vec<u32> = unlocked.iter().map(|b| b.condition_days).collect();

            match day {
                1 => assert_eq!(newly, vec![1]),
                7 => assert_eq!(newly, vec![7]),
                _ => assert!(newly.is_empty(), "day {day} unlocked {newly:?}"),
            }
            h.clock.advance(Duration::days(1));
        }

        assert_eq!(unlocked_thresholds(&badges(&h).await), vec![1, 7]);
    }

    #[tokio::test]
    async fn test_badges_stay_unlocked_after_streak_breaks() {
        let h = Harness::new();
        h.seed().await;
        let habit = h.habit("Run").await;

        h.check_in(&habit.habit_id).await;
        h.clock.advance(Duration::days(5));
        h.check_in(&habit.habit_id).await;

        let all = badges(&h).await;
        assert_eq!(unlocked_thresholds(&all), vec![1]);
        assert!(all[0].unlocked_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_badge_set_is_seeded_on_first_use() {
        // Registration-time seeding never ran for this account
        let h = Harness::new();
        let habit = h.habit("Read").await;

        let CheckinOutcome::Recorded { unlocked, .. } = h.check_in(&habit.habit_id).await else {
            panic!("expected a recorded check-in");
        };
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].condition_days, 1);

        let all = badges(&h).await;
        assert_eq!(all.len(), 4);
        assert_eq!(unlocked_thresholds(&all), vec![1]);
    }

    #[tokio::test]
    async fn test_listing_badges_fills_in_missing_set() {
        let h = Harness::new();

        let listed = badges(&h).await;
        assert_eq!(listed.len(), 4);
        assert!(listed.iter().all(|b| !b.unlocked));

        // Seeding again is a no-op
        assert_eq!(badges(&h).await.len(), 4);
    }

    #[tokio::test]
    async fn test_badges_are_per_user() {
        let h = Harness::new();
        h.seed().await;
        let other = Harness {
            state: h.state.clone(),
            clock: h.clock.clone(),
            owner: kernel::id::UserId::new(),
        };
        other.seed().await;

        let habit = h.habit("Read").await;
        h.check_in(&habit.habit_id).await;

        assert_eq!(unlocked_thresholds(&badges(&h).await), vec![1]);
        assert!(unlocked_thresholds(&badges(&other).await).is_empty());
    }
}

#[cfg(test)]
mod storage_failure_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::{DateTime, Utc};
    use kernel::clock::ManualClock;
    use kernel::id::{BadgeId, HabitId, UserId};

    use super::fixtures::*;
    use crate::application::{CheckinLocks, CheckinOutcome, RecordCheckinUseCase};
    use crate::domain::entity::{Badge, Checkin, Frequency, Habit};
    use crate::domain::repository::{BadgeRepository, CheckinRepository, HabitRepository};
    use crate::domain::services::Progress;
    use crate::error::{HabitError, HabitResult};
    use crate::infra::InMemoryHabitStore;

    /// In-memory store whose next check-in write can be made to fail
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryHabitStore,
        fail_next_record: AtomicBool,
    }

    impl HabitRepository for FlakyStore {
        async fn create(&self, habit: &Habit) -> HabitResult<()> {
            self.inner.create(habit).await
        }

        async fn find_owned(
            &self,
            habit_id: &HabitId,
            owner_id: &UserId,
        ) -> HabitResult<Option<Habit>> {
            self.inner.find_owned(habit_id, owner_id).await
        }

        async fn list_by_owner(&self, owner_id: &UserId) -> HabitResult<Vec<Habit>> {
            self.inner.list_by_owner(owner_id).await
        }

        async fn delete_owned(&self, habit_id: &HabitId, owner_id: &UserId) -> HabitResult<bool> {
            self.inner.delete_owned(habit_id, owner_id).await
        }
    }

    impl CheckinRepository for FlakyStore {
        async fn record(&self, checkin: &Checkin, progress: Progress) -> HabitResult<()> {
            if self.fail_next_record.swap(false, Ordering::SeqCst) {
                return Err(HabitError::Internal("db down".to_string()));
            }
            self.inner.record(checkin, progress).await
        }

        async fn exists_since(&self, habit_id: &HabitId, since: DateTime<Utc>) -> HabitResult<bool> {
            self.inner.exists_since(habit_id, since).await
        }

        async fn count_between(
            &self,
            habit_id: &HabitId,
            from: DateTime<Utc>,
            until: DateTime<Utc>,
        ) -> HabitResult<u64> {
            self.inner.count_between(habit_id, from, until).await
        }
    }

    impl BadgeRepository for FlakyStore {
        async fn insert_all(&self, badges: &[Badge]) -> HabitResult<()> {
            self.inner.insert_all(badges).await
        }

        async fn count_by_owner(&self, owner_id: &UserId) -> HabitResult<u64> {
            self.inner.count_by_owner(owner_id).await
        }

        async fn list_badges(&self, owner_id: &UserId) -> HabitResult<Vec<Badge>> {
            self.inner.list_badges(owner_id).await
        }

        async fn unlock(
            &self,
            badge_id: &BadgeId,
            owner_id: &UserId,
            now: DateTime<Utc>,
        ) -> HabitResult<bool> {
            self.inner.unlock(badge_id, owner_id, now).await
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_nothing_behind_and_retry_succeeds() {
        let store = Arc::new(FlakyStore::default());
        let owner = UserId::new();
        let habit = Habit::new(owner, "Read", "", Frequency::Daily, day_one()).unwrap();
        store.create(&habit).await.unwrap();

        let record = RecordCheckinUseCase::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(CheckinLocks::new()),
            Arc::new(config()),
            Arc::new(ManualClock::new(day_one())),
        );

        store.fail_next_record.store(true, Ordering::SeqCst);
        let err = record.execute(&habit.habit_id, &owner).await.unwrap_err();
        assert!(matches!(err, HabitError::Internal(_)));
        assert!(store.inner.checkins_of(&habit.habit_id).is_empty());

        let retry = record.execute(&habit.habit_id, &owner).await.unwrap();
        assert!(matches!(retry, CheckinOutcome::Recorded { .. }));
        assert_eq!(retry.progress(), Progress::new(1, 1));

        let stored = store.find_owned(&habit.habit_id, &owner).await.unwrap().unwrap();
        assert_eq!((stored.streak, stored.total_days), (1, 1));
        assert_eq!(store.inner.checkins_of(&habit.habit_id).len(), 1);
    }
}

#[cfg(test)]
mod management_tests {
    use chrono::Duration;

    use super::fixtures::*;
    use crate::application::{CreateHabitInput, CreateHabitUseCase, DeleteHabitUseCase, ListHabitsUseCase};
    use crate::domain::entity::Frequency;
    use crate::error::HabitError;
    use kernel::id::UserId;

    fn list(h: &Harness) -> ListHabitsUseCase<crate::InMemoryHabitStore, crate::InMemoryHabitStore, crate::InMemoryHabitStore> {
        ListHabitsUseCase::new(
            h.state.repo.clone(),
            h.state.repo.clone(),
            h.state.repo.clone(),
            h.state.config.clone(),
            h.state.clock.clone(),
        )
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let h = Harness::new();
        let create = CreateHabitUseCase::new(h.state.repo.clone(), h.state.clock.clone());

        let weekly = create
            .execute(
                &h.owner,
                CreateHabitInput {
                    name: "Call family".to_string(),
                    description: Some("Sunday evening".to_string()),
                    frequency: Some("weekly".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(weekly.frequency, Frequency::Weekly);

        for (name, frequency) in [("", None), ("Swim", Some("hourly"))] {
            let err = create
                .execute(
                    &h.owner,
                    CreateHabitInput {
                        name: name.to_string(),
                        description: None,
                        frequency: frequency.map(str::to_string),
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, HabitError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_overview_flags_and_stats() {
        let h = Harness::new();
        h.seed().await;
        let read = h.habit("Read").await;
        let run = h.habit("Run").await;

        h.check_in(&read.habit_id).await;
        h.clock.advance(Duration::days(1));
        h.check_in(&read.habit_id).await;
        h.check_in(&run.habit_id).await;
        h.clock.advance(Duration::days(1));
        h.check_in(&run.habit_id).await;

        let overview = list(&h).execute(&h.owner).await.unwrap();

        assert_eq!(overview.habits.len(), 2);
        assert_eq!(overview.habits[0].habit.name, "Read");
        assert!(!overview.habits[0].today_checked);
        assert!(overview.habits[1].today_checked);

        assert_eq!(overview.stats.total_habits, 2);
        assert_eq!(overview.stats.done_today, 1);
        assert_eq!(overview.stats.max_streak, 2);
        assert_eq!(overview.stats.unlocked_badges, 1);
        assert_eq!(overview.stats.total_badges, 4);
    }

    #[tokio::test]
    async fn test_delete_removes_checkins_and_is_owner_scoped() {
        let h = Harness::new();
        let habit = h.habit("Read").await;
        h.check_in(&habit.habit_id).await;

        let delete = DeleteHabitUseCase::new(h.state.repo.clone(), h.state.locks.clone());

        let err = delete
            .execute(&habit.habit_id, &UserId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HabitError::HabitNotFound));

        delete.execute(&habit.habit_id, &h.owner).await.unwrap();
        assert!(h.state.repo.checkins_of(&habit.habit_id).is_empty());
        assert!(list(&h).execute(&h.owner).await.unwrap().habits.is_empty());

        let err = delete.execute(&habit.habit_id, &h.owner).await.unwrap_err();
        assert!(matches!(err, HabitError::HabitNotFound));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use auth::application::config::AuthConfig;
    use auth::{AuthAppState, InMemoryAuthRepository, InMemorySessionStore, auth_router};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use platform::password::HashParams;
    use tower::ServiceExt;

    use auth::domain::repository::AccountProvisioner;
    use kernel::error::app_error::{AppError, AppResult};
    use kernel::id::UserId;

    use super::fixtures::*;
    use crate::application::BadgeProvisioner;
    use crate::infra::InMemoryHabitStore;
    use crate::presentation::habit_router;

    /// Provisioner whose badge store is unreachable
    struct OfflineProvisioner;

    impl AccountProvisioner for OfflineProvisioner {
        async fn provision(&self, _user_id: &UserId) -> AppResult<()> {
            Err(AppError::service_unavailable("badge store offline"))
        }
    }

    fn app_with<P, F>(provisioner: F) -> Router
    where
        P: AccountProvisioner + Send + Sync + 'static,
        F: FnOnce(&Harness) -> P,
    {
        let h = Harness::new();
        let auth_state = AuthAppState {
            repo: Arc::new(InMemoryAuthRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            provisioner: Arc::new(provisioner(&h)),
            config: Arc::new(AuthConfig {
                hash_params: HashParams::minimal(),
                ..AuthConfig::development()
            }),
            clock: h.state.clock.clone(),
        };
        let guard = auth_state.session_guard();

        Router::new()
            .nest("/api/auth", auth_router(auth_state))
            .nest("/api", habit_router(h.state, guard))
    }

    fn app() -> Router {
        app_with(|h| {
            BadgeProvisioner::<InMemoryHabitStore>::new(h.state.repo.clone(), h.state.config.clone())
        })
    }

    fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn sign_up(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/auth/signup",
                None,
                Some(serde_json::json!({
                    "userName": "alice",
                    "email": "alice@example.com",
                    "password": "hunter22",
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_habit_routes_require_session() {
        let app = app();

        let response = app
            .oneshot(request("GET", "/api/habits", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get("x-auth-required").unwrap(), "true");
    }

    #[tokio::test]
    async fn test_signup_then_create_and_check_in() {
        let app = app();
        let cookie = sign_up(&app).await;

        // Registration seeded the badge set
        let response = app
            .clone()
            .oneshot(request("GET", "/api/badges", Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 4);

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/habits",
                Some(&cookie),
                Some(serde_json::json!({ "name": "Read", "frequency": "daily" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let habit = body_json(response).await;
        let id = habit["id"].as_str().unwrap().to_string();
        assert_eq!(habit["todayChecked"], false);

        let checkin_uri = format!("/api/habits/{id}/checkin");
        let response = app
            .clone()
            .oneshot(request("POST", &checkin_uri, Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["alreadyCheckedIn"], false);
        assert_eq!(body["streak"], 1);
        assert_eq!(body["unlockedBadges"][0]["conditionDays"], 1);

        let response = app
            .clone()
            .oneshot(request("POST", &checkin_uri, Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["alreadyCheckedIn"], true);
        assert_eq!(body["totalDays"], 1);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/habits", Some(&cookie), None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["habits"][0]["todayChecked"], true);
        assert_eq!(body["stats"]["doneToday"], 1);
        assert_eq!(body["stats"]["unlockedBadges"], 1);

        let response = app
            .oneshot(request("DELETE", &format!("/api/habits/{id}"), Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_unknown_habit_is_not_found() {
        let app = app();
        let cookie = sign_up(&app).await;

        let response = app
            .oneshot(request(
                "POST",
                &format!("/api/habits/{}/checkin", uuid::Uuid::new_v4()),
                Some(&cookie),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_badges_appear_after_failed_registration_seeding() {
        let app = app_with(|_| OfflineProvisioner);
        let cookie = sign_up(&app).await;

        let response = app
            .clone()
            .oneshot(request("GET", "/api/badges", Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let badges = body_json(response).await;
        assert_eq!(badges.as_array().unwrap().len(), 4);
        assert!(badges.as_array().unwrap().iter().all(|b| b["unlocked"] == false));

        let response = app
            .oneshot(request("GET", "/api/habits", Some(&cookie), None))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["stats"]["totalBadges"], 4);
    }
}
