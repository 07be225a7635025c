pub mod capsule;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod storage;
pub mod store;
pub mod utils;
pub mod tui;

pub use config::Config;
pub use models::{Capsule, DailyTask, Memory, TaskStatus};
pub use storage::Storage;
pub use utils::Profile;
