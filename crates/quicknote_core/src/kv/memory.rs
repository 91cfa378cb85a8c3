use super::{KeyValueStore, KvResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-process key-value store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> KvResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> KvResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore};

    #[test]
    fn set_overwrites_and_remove_clears() {
        let kv = MemoryKeyValueStore::new();
        assert_eq!(kv.get_item("notes").unwrap(), None);

        kv.set_item("notes", "[]").unwrap();
        kv.set_item("notes", "[\"a\"]").unwrap();
        assert_eq!(kv.get_item("notes").unwrap().as_deref(), Some("[\"a\"]"));
        assert_eq!(kv.len(), 1);

        kv.remove_item("notes").unwrap();
        kv.remove_item("notes").unwrap();
        assert!(kv.is_empty());
    }
}
