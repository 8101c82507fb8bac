//! Domain Layer
//!
//! Entities, calendar rules, streak and badge logic, repository traits.

pub mod calendar;
pub mod entity;
pub mod repository;
pub mod services;

// Re-exports
pub use calendar::{Calendar, DayWindow};
pub use entity::{Badge, BadgeDefinition, Checkin, Frequency, Habit};
pub use repository::{BadgeRepository, CheckinRepository, HabitRepository};
pub use services::{Progress, badges_to_unlock};
