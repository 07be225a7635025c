//! Record stores over the persistent collection store.
//!
//! Each store owns its collection exclusively, keeps an in-memory copy and
//! mirrors every mutation wholesale into storage. There are no cross-store
//! references; a memory created from the daily task is a plain new record.

pub mod capsules;
pub mod daily_task;
pub mod memories;

pub use capsules::CapsuleStore;
pub use daily_task::DailyTaskStore;
pub use memories::MemoryStore;

pub const MEMORIES_KEY: &str = "memories";
pub const CAPSULES_KEY: &str = "capsules";
pub const DAILY_TASK_KEY: &str = "daily_task";
pub const SEEN_ONBOARD_KEY: &str = "seen_onboard";
