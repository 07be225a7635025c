use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create storage directory: {0}")]
    DirectoryError(String),
    #[error("Failed to encode value for key '{key}': {source}")]
    EncodeError {
        key: String,
        source: serde_json::Error,
    },
    #[error("Failed to decode value for key '{key}': {source}")]
    DecodeError {
        key: String,
        source: serde_json::Error,
    },
}

/// The persistent collection store: string key to JSON blob, one SQLite
/// table. Collections are read once at startup and rewritten wholesale on
/// every mutation; there is no partial update and no schema beyond the
/// JSON shapes the callers serialize.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the storage file and initialize the schema.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let db_path = PathBuf::from(path);

        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// In-memory storage, used by tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    fn initialize_schema(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Raw string value for a key, or None on a cold start.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        debug!(key, bytes = value.len(), "persisted value");
        Ok(())
    }

    /// Deserialize the value stored under `key`. A missing key is not an
    /// error: the caller's default is the normal cold-start state.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value =
                    serde_json::from_str(&raw).map_err(|source| StorageError::DecodeError {
                        key: key.to_string(),
                        source,
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::EncodeError {
            key: key.to_string(),
            source,
        })?;
        self.set_raw(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none_not_error() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.get_raw("nothing").unwrap().is_none());
        let decoded: Option<Vec<String>> = storage.get("nothing").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set("flag", &"1".to_string()).unwrap();
        let flag: Option<String> = storage.get("flag").unwrap();
        assert_eq!(flag.as_deref(), Some("1"));
    }

    #[test]
    fn set_overwrites_wholesale() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set("list", &vec![1, 2, 3]).unwrap();
        storage.set("list", &vec![9]).unwrap();
        let list: Option<Vec<i32>> = storage.get("list").unwrap();
        assert_eq!(list, Some(vec![9]));
    }

    #[test]
    fn opens_file_backed_storage_in_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("app.db");
        let storage = Storage::open(path.to_str().unwrap()).unwrap();
        storage.set_raw("k", "v").unwrap();
        assert_eq!(storage.get_raw("k").unwrap().as_deref(), Some("v"));
    }
}
