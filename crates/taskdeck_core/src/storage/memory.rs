use crate::error::AppError;
use crate::storage::KeyValueStore;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory adapter for tests and ephemeral sessions. Clones share the same
/// backing map, so a second store instance can rehydrate from what the first
/// one saved.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
