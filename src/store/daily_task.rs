use std::rc::Rc;
use tracing::debug;

use crate::models::{DailyTask, TaskStatus};
use crate::storage::{Storage, StorageError};
use crate::store::DAILY_TASK_KEY;
use crate::utils;

/// Single-record store for the daily task. The task does not carry over
/// across days: a stored date that is not today forces a reset to idle
/// before anything reads the status.
pub struct DailyTaskStore {
    storage: Rc<Storage>,
    state: DailyTask,
}

impl DailyTaskStore {
    /// Load the record, applying the day-rollover check before the first
    /// read can observe a stale day's status.
    pub fn load(storage: Rc<Storage>) -> Result<Self, StorageError> {
        let state: DailyTask = storage.get(DAILY_TASK_KEY)?.unwrap_or_default();
        let mut store = Self { storage, state };
        store.rollover_if_stale()?;
        Ok(store)
    }

    /// Current state; re-checks the rollover so a session left open across
    /// midnight also resets.
    pub fn get(&mut self) -> Result<&DailyTask, StorageError> {
        self.rollover_if_stale()?;
        Ok(&self.state)
    }

    /// Current state without the rollover check. For render paths; the
    /// event loop runs `get` every tick, so staleness is bounded by one
    /// poll interval.
    pub fn peek(&self) -> &DailyTask {
        &self.state
    }

    /// Overwrite the record wholesale and persist.
    pub fn set(&mut self, state: DailyTask) -> Result<(), StorageError> {
        self.state = state;
        self.storage.set(DAILY_TASK_KEY, &self.state)
    }

    /// Move to `status` keeping the stored date. Used by the in-day
    /// transitions (running -> done -> prize, running -> timeout).
    pub fn set_status(&mut self, status: TaskStatus) -> Result<(), StorageError> {
        let date = self.state.date.clone();
        self.set(DailyTask { date, status })
    }

    /// Start (or restart) the task, stamping today as the task's day.
    pub fn start(&mut self) -> Result<(), StorageError> {
        self.set(DailyTask {
            date: utils::today_string(),
            status: TaskStatus::Running,
        })
    }

    /// Reset to idle for today. "Back home" from the timeout and prize
    /// screens lands here, by design losing same-day history.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.set(DailyTask::idle_today())
    }

    fn rollover_if_stale(&mut self) -> Result<(), StorageError> {
        let today = utils::today_string();
        if self.state.date != today {
            debug!(stored = %self.state.date, %today, "daily task day rollover, resetting");
            self.set(DailyTask {
                date: today,
                status: TaskStatus::Idle,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_date_resets_to_idle_on_load() {
        let storage = Rc::new(Storage::open_in_memory().unwrap());
        storage
            .set(
                DAILY_TASK_KEY,
                &DailyTask {
                    date: "2001-01-01".to_string(),
                    status: TaskStatus::Done,
                },
            )
            .unwrap();

        let mut store = DailyTaskStore::load(Rc::clone(&storage)).unwrap();
        let state = store.get().unwrap();
        assert_eq!(state.date, utils::today_string());
        assert_eq!(state.status, TaskStatus::Idle);

        // The reset is persisted, not just in memory.
        let persisted: DailyTask = storage.get(DAILY_TASK_KEY).unwrap().unwrap();
        assert_eq!(persisted.status, TaskStatus::Idle);
    }

    #[test]
    fn todays_state_is_preserved_on_load() {
        let storage = Rc::new(Storage::open_in_memory().unwrap());
        storage
            .set(
                DAILY_TASK_KEY,
                &DailyTask {
                    date: utils::today_string(),
                    status: TaskStatus::Done,
                },
            )
            .unwrap();

        let mut store = DailyTaskStore::load(storage).unwrap();
        assert_eq!(store.get().unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn cold_start_is_idle_today() {
        let mut store = DailyTaskStore::load(Rc::new(Storage::open_in_memory().unwrap())).unwrap();
        let state = store.get().unwrap();
        assert_eq!(state.status, TaskStatus::Idle);
        assert_eq!(state.date, utils::today_string());
    }

    #[test]
    fn in_day_transitions_keep_the_date() {
        let mut store = DailyTaskStore::load(Rc::new(Storage::open_in_memory().unwrap())).unwrap();
        store.start().unwrap();
        assert_eq!(store.get().unwrap().status, TaskStatus::Running);

        store.set_status(TaskStatus::Done).unwrap();
        assert_eq!(store.get().unwrap().status, TaskStatus::Done);
        assert_eq!(store.get().unwrap().date, utils::today_string());

        store.set_status(TaskStatus::Prize).unwrap();
        store.reset().unwrap();
        assert_eq!(store.get().unwrap().status, TaskStatus::Idle);
    }
}
