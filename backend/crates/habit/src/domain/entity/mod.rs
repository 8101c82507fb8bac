//! Entities

pub mod badge;
pub mod checkin;
pub mod habit;

pub use badge::{Badge, BadgeDefinition};
pub use checkin::Checkin;
pub use habit::{Frequency, Habit};
