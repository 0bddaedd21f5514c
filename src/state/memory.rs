//! In-memory client state

use super::traits::{StateKey, StateResult, StateStore};
use dashmap::DashMap;
use serde_json::Value;

/// Process-local state, lost on exit
#[derive(Debug, Default)]
pub struct MemoryState {
    values: DashMap<StateKey, Value>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryState {
    fn get(&self, key: StateKey) -> StateResult<Option<Value>> {
        Ok(self
            .values
            .get(&key)
            .map(|v| v.value().clone())
            .filter(|v| !v.is_null()))
    }

    fn set(&self, key: StateKey, value: Value) -> StateResult<()> {
        self.values.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: StateKey) -> StateResult<()> {
        self.values.remove(&key);
        Ok(())
    }
}
