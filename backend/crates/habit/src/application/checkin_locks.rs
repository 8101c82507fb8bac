//! Per-habit check-in serialization
//!
//! Two requests checking in the same habit must not both pass the
//! "already checked in today" test. Within one process they queue on a
//! per-habit async mutex; across processes the storage unique key on
//! `(habit, day)` rejects the loser.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use kernel::id::HabitId;
use parking_lot::Mutex;

/// Lock table keyed by habit
#[derive(Debug, Default)]
pub struct CheckinLocks {
    locks: Mutex<HashMap<HabitId, Arc<tokio::sync::Mutex<()>>>>,
}

impl CheckinLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` while holding the habit's lock
    ///
    /// The table entry is released even when the returned future is dropped
    /// before completion.
    pub async fn run<F>(&self, habit_id: HabitId, task: F) -> F::Output
    where
        F: Future,
    {
        let lease = self.lease(habit_id);
        let _guard = lease.lock.lock().await;
        task.await
    }

    /// Habits with a lock currently allocated
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }

    fn lease(&self, habit_id: HabitId) -> Lease<'_> {
        let lock = self.locks.lock().entry(habit_id).or_default().clone();
        Lease {
            table: self,
            habit_id,
            lock,
        }
    }
}

/// One holder or waiter of a habit lock
struct Lease<'a> {
    table: &'a CheckinLocks,
    habit_id: HabitId,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for Lease<'_> {
    /// Drop the entry once no task holds or waits on it
    fn drop(&mut self) {
        let mut locks = self.table.locks.lock();
        // Give up our handle under the table lock so the count below is exact
        drop(std::mem::take(&mut self.lock));

        if let Some(lock) = locks.get(&self.habit_id)
            && Arc::strong_count(lock) == 1
        {
            locks.remove(&self.habit_id);
        }
    }
}
