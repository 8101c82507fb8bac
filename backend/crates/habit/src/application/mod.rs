//! Application Layer
//!
//! Use cases and application services.

pub mod checkin_locks;
pub mod config;
pub mod create_habit;
pub mod delete_habit;
pub mod evaluate_badges;
pub mod list_badges;
pub mod list_habits;
pub mod record_checkin;
pub mod seed_badges;

// Re-exports
pub use checkin_locks::CheckinLocks;
pub use config::HabitConfig;
pub use create_habit::{CreateHabitInput, CreateHabitUseCase};
pub use delete_habit::DeleteHabitUseCase;
pub use evaluate_badges::EvaluateBadgesUseCase;
pub use list_badges::ListBadgesUseCase;
pub use list_habits::{HabitOverview, HabitStats, HabitStatus, ListHabitsUseCase};
pub use record_checkin::{CheckinOutcome, RecordCheckinUseCase};
pub use seed_badges::{BadgeProvisioner, SeedBadgesUseCase};
