//! Habit Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, calendar-day rules, streak and badge logic
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Streaks
//! A check-in on local day D continues the streak when day D-1 also has a
//! check-in and restarts it at 1 otherwise. At most one check-in per habit
//! and day is accepted.
//!
//! ## Badges
//! Each account is seeded with a badge set at registration. A badge unlocks
//! once the habit's total or streak reaches its threshold and stays unlocked.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{BadgeProvisioner, HabitConfig};
pub use error::{HabitError, HabitResult};
pub use infra::{InMemoryHabitStore, PgHabitRepository};
pub use presentation::{HabitAppState, habit_router};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
