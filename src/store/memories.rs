use std::rc::Rc;
use tracing::debug;

use crate::models::Memory;
use crate::storage::{Storage, StorageError};
use crate::store::MEMORIES_KEY;

/// CRUD over the memories collection, newest-first.
pub struct MemoryStore {
    storage: Rc<Storage>,
    items: Vec<Memory>,
}

impl MemoryStore {
    /// Load the collection from storage; a missing key is an empty archive.
    pub fn load(storage: Rc<Storage>) -> Result<Self, StorageError> {
        let items: Vec<Memory> = storage.get(MEMORIES_KEY)?.unwrap_or_default();
        debug!(count = items.len(), "loaded memories");
        Ok(Self { storage, items })
    }

    /// All memories, most recently added first.
    pub fn list(&self) -> &[Memory] {
        &self.items
    }

    /// Prepend a memory and persist.
    pub fn add(&mut self, memory: Memory) -> Result<(), StorageError> {
        self.items.insert(0, memory);
        self.persist()
    }

    /// Replace the record whose id matches. Unknown ids leave the
    /// collection unchanged.
    pub fn update(&mut self, updated: Memory) -> Result<(), StorageError> {
        match self.items.iter_mut().find(|m| m.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                self.persist()
            }
            None => Ok(()),
        }
    }

    /// Delete by id; absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        let before = self.items.len();
        self.items.retain(|m| m.id != id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Case-insensitive substring match over title and description.
    pub fn search(&self, query: &str) -> Vec<&Memory> {
        let q = query.to_lowercase();
        self.items
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&q) || m.desc.to_lowercase().contains(&q))
            .collect()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.set(MEMORIES_KEY, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::load(Rc::new(Storage::open_in_memory().unwrap())).unwrap()
    }

    fn memory(id: &str, title: &str, desc: &str) -> Memory {
        Memory {
            id: id.to_string(),
            title: title.to_string(),
            desc: desc.to_string(),
            photo: "photo.jpg".to_string(),
            date_str: "2026-08-30".to_string(),
            time_str: "12:00".to_string(),
            ts: 0,
            is_daily: false,
        }
    }

    #[test]
    fn add_prepends_newest_first() {
        let mut store = store();
        store.add(memory("1", "first", "")).unwrap();
        store.add(memory("2", "second", "")).unwrap();
        let titles: Vec<_> = store.list().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn remove_deletes_and_ignores_unknown_ids() {
        let mut store = store();
        store.add(memory("1", "keep", "")).unwrap();
        store.add(memory("2", "drop", "")).unwrap();
        store.remove("2").unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].id, "1");
        store.remove("missing").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn update_unknown_id_leaves_collection_unchanged() {
        let mut store = store();
        store.add(memory("1", "original", "")).unwrap();
        store.update(memory("999", "phantom", "")).unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].title, "original");

        let mut edited = memory("1", "edited", "");
        edited.is_daily = true;
        store.update(edited).unwrap();
        assert_eq!(store.list()[0].title, "edited");
        assert!(store.list()[0].is_daily);
    }

    #[test]
    fn search_matches_desc_only_substrings() {
        let mut store = store();
        store.add(memory("1", "Beach day", "sunset over the WAVES")).unwrap();
        store.add(memory("2", "Dinner", "pasta night")).unwrap();

        let hits = store.search("waves");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");

        assert!(store.search("nowhere").is_empty());
        // Empty query matches everything, mirroring live keystroke filtering.
        assert_eq!(store.search("").len(), 2);
    }

    #[test]
    fn mutations_survive_reload() {
        let storage = Rc::new(Storage::open_in_memory().unwrap());
        let mut store = MemoryStore::load(Rc::clone(&storage)).unwrap();
        store.add(memory("1", "persisted", "")).unwrap();
        drop(store);

        let reloaded = MemoryStore::load(storage).unwrap();
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(reloaded.list()[0].title, "persisted");
    }
}
