//! Create Habit Use Case

use std::sync::Arc;

use kernel::clock::Clock;
use kernel::id::UserId;

use crate::domain::entity::{Frequency, Habit};
use crate::domain::repository::HabitRepository;
use crate::error::HabitResult;

#[derive(Debug, Clone)]
pub struct CreateHabitInput {
    pub name: String,
    pub description: Option<String>,
    /// `daily` or `weekly`; defaults to `daily`
    pub frequency: Option<String>,
}

pub struct CreateHabitUseCase<H>
where
    H: HabitRepository,
{
    habit_repo: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<H> CreateHabitUseCase<H>
where
    H: HabitRepository,
{
    pub fn new(habit_repo: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self { habit_repo, clock }
    }

    pub async fn execute(&self, owner_id: &UserId, input: CreateHabitInput) -> HabitResult<Habit> {
        let frequency = match input.frequency.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<Frequency>()?,
            _ => Frequency::default(),
        };

        let habit = Habit::new(
            *owner_id,
            &input.name,
            input.description.as_deref().unwrap_or_default(),
            frequency,
            self.clock.now(),
        )?;

        self.habit_repo.create(&habit).await?;

        tracing::info!(
            habit_id = %habit.habit_id,
            user_id = %owner_id,
            frequency = %habit.frequency,
            "Habit created"
        );

        Ok(habit)
    }
}
