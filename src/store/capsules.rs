use std::rc::Rc;
use tracing::debug;

use crate::models::Capsule;
use crate::storage::{Storage, StorageError};
use crate::store::CAPSULES_KEY;

/// The capsules collection. Capsules are immutable after creation except
/// for deletion, so there is no update operation.
pub struct CapsuleStore {
    storage: Rc<Storage>,
    items: Vec<Capsule>,
}

impl CapsuleStore {
    pub fn load(storage: Rc<Storage>) -> Result<Self, StorageError> {
        let items: Vec<Capsule> = storage.get(CAPSULES_KEY)?.unwrap_or_default();
        debug!(count = items.len(), "loaded capsules");
        Ok(Self { storage, items })
    }

    /// All capsules, most recently created first.
    pub fn list(&self) -> &[Capsule] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Capsule> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn add(&mut self, capsule: Capsule) -> Result<(), StorageError> {
        self.items.insert(0, capsule);
        self.persist()
    }

    pub fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        let before = self.items.len();
        self.items.retain(|c| c.id != id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.set(CAPSULES_KEY, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capsule(id: &str) -> Capsule {
        Capsule {
            id: id.to_string(),
            title: format!("capsule {}", id),
            photo: "p.jpg".to_string(),
            text: "-".to_string(),
            create_at: 0,
            open_at: 1,
        }
    }

    #[test]
    fn add_prepends_and_remove_deletes() {
        let mut store = CapsuleStore::load(Rc::new(Storage::open_in_memory().unwrap())).unwrap();
        store.add(capsule("1")).unwrap();
        store.add(capsule("2")).unwrap();
        assert_eq!(store.list()[0].id, "2");

        store.remove("1").unwrap();
        assert_eq!(store.list().len(), 1);
        assert!(store.get("1").is_none());
        assert!(store.get("2").is_some());

        // Unknown id is a no-op.
        store.remove("1").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn collection_survives_reload() {
        let storage = Rc::new(Storage::open_in_memory().unwrap());
        let mut store = CapsuleStore::load(Rc::clone(&storage)).unwrap();
        store.add(capsule("1")).unwrap();
        drop(store);

        let reloaded = CapsuleStore::load(storage).unwrap();
        assert_eq!(reloaded.list().len(), 1);
    }
}
