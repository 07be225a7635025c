use serde::{Deserialize, Serialize};

use crate::utils;

/// A single journaled entry in the archive.
///
/// `id` is derived from the creation timestamp and never changes; `ts` is
/// the user-chosen date/time of the memory, which is independent of when
/// the record was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub title: String,
    pub desc: String,
    /// Opaque photo path or URL. Never validated or opened.
    pub photo: String,
    pub date_str: String,
    pub time_str: String,
    /// Epoch milliseconds of the user-chosen date/time.
    pub ts: i64,
    pub is_daily: bool,
}

/// A content record sealed until `open_at`.
///
/// Unlock status is a pure function of `open_at` and the clock; it is never
/// stored. `open_at` and `create_at` are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capsule {
    pub id: String,
    pub title: String,
    pub photo: String,
    pub text: String,
    pub create_at: i64,
    pub open_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Idle,
    Running,
    Done,
    Timeout,
    Prize,
}

/// The one per-calendar-day task record. `date` is the calendar-day
/// identity; a stored date that is not today resets the status to idle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTask {
    pub date: String,
    pub status: TaskStatus,
}

impl Memory {
    /// Create a memory dated `ts` (epoch millis). The id is stamped from
    /// the current wall clock.
    pub fn new(title: String, desc: String, photo: String, ts: i64) -> Self {
        Self {
            id: utils::now_millis().to_string(),
            title,
            desc,
            photo,
            date_str: utils::format_date(ts),
            time_str: utils::format_time(ts),
            ts,
            is_daily: false,
        }
    }

    /// Memory produced by completing the daily task, dated now.
    pub fn from_daily_task(desc: String, photo: Option<String>) -> Self {
        let now = utils::now_millis();
        let mut m = Self::new(
            "Task of the day".to_string(),
            desc,
            photo.unwrap_or_else(|| "-".to_string()),
            now,
        );
        m.is_daily = true;
        m
    }
}

impl Capsule {
    /// Create a capsule opening at `open_at` (epoch millis). An empty
    /// description is stored as "-".
    pub fn new(title: String, photo: String, text: String, open_at: i64) -> Self {
        let now = utils::now_millis();
        Self {
            id: now.to_string(),
            title,
            photo,
            text: if text.is_empty() { "-".to_string() } else { text },
            create_at: now,
            open_at,
        }
    }
}

impl DailyTask {
    pub fn idle_today() -> Self {
        Self {
            date: utils::today_string(),
            status: TaskStatus::Idle,
        }
    }
}

impl Default for DailyTask {
    fn default() -> Self {
        Self::idle_today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capsule_new_defaults_empty_text_to_dash() {
        let c = Capsule::new("t".into(), "p.jpg".into(), String::new(), 1);
        assert_eq!(c.text, "-");
        let c = Capsule::new("t".into(), "p.jpg".into(), "hello".into(), 1);
        assert_eq!(c.text, "hello");
    }

    #[test]
    fn daily_memory_is_flagged_and_titled() {
        let m = Memory::from_daily_task("smiled".into(), None);
        assert!(m.is_daily);
        assert_eq!(m.title, "Task of the day");
        assert_eq!(m.photo, "-");
    }

    #[test]
    fn task_status_serializes_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Timeout).unwrap();
        assert_eq!(json, "\"timeout\"");
        let s: TaskStatus = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(s, TaskStatus::Running);
    }
}
