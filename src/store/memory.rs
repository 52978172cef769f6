use rustc_hash::FxHashMap;

use super::{parse_score, Result, ScoreStore};

/// Process-local score store.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    values: FxHashMap<String, String>,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw, possibly unparsable, value.
    #[must_use]
    pub fn with_raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// The raw stored string for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl ScoreStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        self.values
            .get(key)
            .map(|raw| parse_score(key, raw))
            .transpose()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
