use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::models::{Capsule, Memory};
use crate::storage::StorageError;
use crate::store::{CapsuleStore, MemoryStore};
use crate::utils;

#[derive(Parser)]
#[command(name = "crownmem")]
#[command(about = "Crown Memories - memories archive, time capsules and a daily task")]
#[command(version)]
pub struct Cli {
    /// Use development mode (uses separate dev config/storage)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Quickly add a new memory
    AddMemory {
        /// Memory title
        title: String,
        /// Photo path or URL
        #[arg(long)]
        photo: String,
        /// Description
        #[arg(long)]
        desc: Option<String>,
        /// Memory date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Memory time (HH:MM), defaults to now
        #[arg(long)]
        time: Option<String>,
    },
    /// Quickly create a time capsule
    AddCapsule {
        /// Capsule name
        title: String,
        /// Photo path or URL
        #[arg(long)]
        photo: String,
        /// Opening date (YYYY-MM-DD)
        #[arg(long)]
        open_date: String,
        /// Opening time (HH:MM), defaults to midnight
        #[arg(long)]
        open_time: Option<String>,
        /// Capsule text
        #[arg(long)]
        text: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("Failed to parse date/time: {0}")]
    DateParseError(String),
}

/// Resolve an optional date + time pair into epoch millis, defaulting to
/// the current moment.
fn resolve_timestamp(date: Option<String>, time: Option<String>) -> Result<i64, CliError> {
    match (date, time) {
        (None, None) => Ok(utils::now_millis()),
        (date, time) => {
            let date_str = date.unwrap_or_else(utils::today_string);
            let time_str = time.unwrap_or_else(|| "00:00".to_string());
            parse_timestamp(&date_str, &time_str)
        }
    }
}

fn parse_timestamp(date_str: &str, time_str: &str) -> Result<i64, CliError> {
    let date = utils::parse_date(date_str)
        .map_err(|e| CliError::DateParseError(format!("Invalid date '{}': {}", date_str, e)))?;
    let time = utils::parse_time(time_str)
        .map_err(|e| CliError::DateParseError(format!("Invalid time '{}': {}", time_str, e)))?;
    utils::to_epoch_millis(date, time).ok_or_else(|| {
        CliError::DateParseError(format!("'{} {}' is not a valid local time", date_str, time_str))
    })
}

/// Handle the add-memory command
pub fn handle_add_memory(
    title: String,
    photo: String,
    desc: Option<String>,
    date: Option<String>,
    time: Option<String>,
    memories: &mut MemoryStore,
) -> Result<(), CliError> {
    let ts = resolve_timestamp(date, time)?;
    let memory = Memory::new(title, desc.unwrap_or_default(), photo, ts);
    let id = memory.id.clone();
    memories.add(memory)?;
    println!("Memory created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-capsule command
pub fn handle_add_capsule(
    title: String,
    photo: String,
    open_date: String,
    open_time: Option<String>,
    text: Option<String>,
    capsules: &mut CapsuleStore,
) -> Result<(), CliError> {
    let open_at = parse_timestamp(&open_date, open_time.as_deref().unwrap_or("00:00"))?;
    let capsule = Capsule::new(title, photo, text.unwrap_or_default(), open_at);
    let id = capsule.id.clone();
    capsules.add(capsule)?;
    println!(
        "Time capsule created successfully (ID: {}, opens {})",
        id,
        utils::format_datetime(open_at)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_timestamp("2026-13-01", "00:00").is_err());
        assert!(parse_timestamp("2026-01-01", "25:00").is_err());
        assert!(parse_timestamp("2026-01-01", "08:30").is_ok());
    }
}
