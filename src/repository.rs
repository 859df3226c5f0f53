//! Item Repository
//!
//! The whole to-do list lives as one JSON array under a single
//! key-value storage key. Reads fail soft to an empty list, writes fail
//! soft to a logged no-op.

use chrono::{DateTime, SecondsFormat, Utc};
use log::error;
use thiserror::Error;

use crate::models::Item;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("stored items are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Synchronous string key-value storage (localStorage in the browser)
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Next identifier: the creation timestamp, or one past the largest id in
/// use when that timestamp is already taken
pub fn next_id(items: &[Item], now_ms: i64) -> u64 {
    let now = now_ms.max(0) as u64;
    let after_last = items.iter().map(|i| i.id).max().map_or(0, |max| max + 1);
    now.max(after_last)
}

pub struct TodoRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> TodoRepository<S> {
    pub fn new(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn try_load(&self) -> Result<Vec<Item>, StorageError> {
        match self.storage.get(&self.key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Stored items in insertion order; empty on any failure
    pub fn load(&self) -> Vec<Item> {
        self.try_load().unwrap_or_else(|e| {
            error!("[App] Error loading todos: {}", e);
            Vec::new()
        })
    }

    pub fn try_save(&self, items: &[Item]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items)?;
        self.storage.set(&self.key, &json)
    }

    pub fn save(&self, items: &[Item]) {
        if let Err(e) = self.try_save(items) {
            error!("[App] Error saving todos: {}", e);
        }
    }

    /// Append a new item. `Ok(None)` for blank text; an error when the
    /// list could not be written back.
    pub fn add(&self, text: &str, now: DateTime<Utc>) -> Result<Option<Item>, StorageError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let mut items = self.load();
        let item = Item::new(
            next_id(&items, now.timestamp_millis()),
            text,
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        items.push(item.clone());
        self.try_save(&items)?;
        Ok(Some(item))
    }

    /// Flip `completed`; `false` if no such item
    pub fn toggle(&self, id: u64) -> bool {
        let mut items = self.load();
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.completed = !item.completed;
        self.save(&items);
        true
    }

    /// Remove an item; `false` if no such item
    pub fn delete(&self, id: u64) -> bool {
        let mut items = self.load();
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return false;
        }
        self.save(&items);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct MemoryStorage {
        values: RefCell<HashMap<String, String>>,
        read_only: bool,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self::default()
        }

        fn read_only() -> Self {
            Self { read_only: true, ..Self::default() }
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.read_only {
                return Err(StorageError::Write("QuotaExceededError".to_string()));
            }
            self.values.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    const KEY: &str = "pwa-todos";

    fn repo() -> TodoRepository<MemoryStorage> {
        TodoRepository::new(MemoryStorage::new(), KEY)
    }

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_add_item() {
        let repo = repo();
        let item = repo.add("  Buy milk  ", at(1_700_000_000_000)).unwrap().unwrap();

        assert_eq!(item.id, 1_700_000_000_000);
        assert_eq!(item.text, "Buy milk");
        assert!(!item.completed);
        assert_eq!(item.created_at, "2023-11-14T22:13:20.000Z");
        assert_eq!(repo.load(), vec![item]);
    }

    #[test]
    fn test_whitespace_add_is_ignored() {
        let repo = repo();
        repo.add("keep", at(1)).unwrap().unwrap();
        let before = repo.load();

        assert!(repo.add("", at(2)).unwrap().is_none());
        assert!(repo.add(" \t\n ", at(3)).unwrap().is_none());
        assert_eq!(repo.load(), before);
    }

    #[test]
    fn test_same_millisecond_ids_are_unique() {
        let repo = repo();
        let a = repo.add("a", at(1000)).unwrap().unwrap();
        let b = repo.add("b", at(1000)).unwrap().unwrap();
        let c = repo.add("c", at(999)).unwrap().unwrap();

        assert_eq!(a.id, 1000);
        assert_eq!(b.id, 1001);
        assert_eq!(c.id, 1002);
    }

    #[test]
    fn test_toggle_and_delete() {
        let repo = repo();
        let a = repo.add("a", at(10)).unwrap().unwrap();
        let b = repo.add("b", at(20)).unwrap().unwrap();

        assert!(repo.toggle(a.id));
        assert!(repo.load()[0].completed);
        assert!(repo.toggle(a.id));
        assert!(!repo.load()[0].completed);

        assert!(repo.delete(a.id));
        assert_eq!(repo.load(), vec![b]);
    }

    #[test]
    fn test_failed_write_is_reported() {
        let repo = TodoRepository::new(MemoryStorage::read_only(), KEY);

        let result = repo.add("never stored", at(10));

        assert!(matches!(result, Err(StorageError::Write(_))));
        assert!(repo.load().is_empty());
        // blank text is rejected before any write
        assert!(repo.add("  ", at(11)).unwrap().is_none());
    }

    #[test]
    fn test_missing_id_is_noop() {
        let repo = repo();
        repo.add("a", at(10)).unwrap().unwrap();
        let before = repo.load();

        assert!(!repo.toggle(999));
        assert!(!repo.delete(999));
        assert_eq!(repo.load(), before);
    }

    #[test]
    fn test_corrupt_storage_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set(KEY, "{not json").unwrap();
        let repo = TodoRepository::new(storage, KEY);

        assert!(matches!(repo.try_load(), Err(StorageError::Corrupt(_))));
        assert!(repo.load().is_empty());

        // next write replaces the corrupt value
        repo.add("fresh", at(5)).unwrap().unwrap();
        assert_eq!(repo.load().len(), 1);
    }

    #[test]
    fn test_reads_list_written_by_earlier_versions() {
        let storage = MemoryStorage::new();
        storage
            .set(
                KEY,
                r#"[{"id":1700000000000,"text":"old","completed":true,"createdAt":"2023-11-14T22:13:20.000Z"}]"#,
            )
            .unwrap();
        let repo = TodoRepository::new(storage, KEY);

        let items = repo.load();
        assert_eq!(items.len(), 1);
        assert!(items[0].completed);
        assert_eq!(items[0].created_at, "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_serialization_preserves_order() {
        let items: Vec<Item> = (0..5)
            .map(|n| Item::new(n, &format!("item <{}> \"quoted\"", n), format!("t{}", n)))
            .collect();
        let json = serde_json::to_string(&items).unwrap();
        let back: Vec<Item> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, items);
    }

    /// Replays a pseudo-random add/toggle/delete sequence against the
    /// repository and a plain Vec, comparing after every step
    #[test]
    fn test_matches_in_memory_model() {
        let repo = repo();
        let mut model: Vec<Item> = Vec::new();
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut clock: i64 = 1_000;

        for step in 0..300 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            // clock sometimes stands still to force id bumps
            clock += (seed % 3) as i64;

            match seed % 5 {
                0 | 1 => {
                    let text = if seed % 7 == 0 { "   ".to_string() } else { format!("step {}", step) };
                    let added = repo.add(&text, at(clock)).unwrap();
                    if text.trim().is_empty() {
                        assert!(added.is_none());
                    } else {
                        let added = added.unwrap();
                        assert!(model.iter().all(|i| i.id != added.id));
                        model.push(added);
                    }
                }
                2 | 3 => {
                    let id = pick_id(&model, seed);
                    let exists = model.iter().any(|i| i.id == id);
                    assert_eq!(repo.toggle(id), exists);
                    if let Some(item) = model.iter_mut().find(|i| i.id == id) {
                        item.completed = !item.completed;
                    }
                }
                _ => {
                    let id = pick_id(&model, seed);
                    let exists = model.iter().any(|i| i.id == id);
                    assert_eq!(repo.delete(id), exists);
                    model.retain(|i| i.id != id);
                }
            }
            assert_eq!(repo.load(), model, "diverged at step {}", step);
        }
    }

    /// An existing id most of the time, a missing one otherwise
    fn pick_id(model: &[Item], seed: u64) -> u64 {
        if model.is_empty() || seed % 11 == 0 {
            return u64::MAX;
        }
        model[(seed as usize / 5) % model.len()].id
    }
}
