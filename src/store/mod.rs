//! High score persistence.
//!
//! The game persists exactly one value: the high score, under a named key.
//! Storage sits behind the [`ScoreStore`] trait so hosts can plug in
//! whatever they have:
//!
//! - [`InMemoryStore`]: process-local, for tests and ephemeral hosts
//! - [`FileStore`]: a JSON key/value file on disk
//!
//! Values are kept as strings, the way browser local storage keeps them.
//! A value that does not parse as a non-negative integer is reported as
//! [`StoreError::Corrupt`]; the engine treats it as no high score.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

use std::io;

/// Errors from a score store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("stored value for {key:?} is not a score: {value:?}")]
    Corrupt { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Key/value storage for integer scores.
pub trait ScoreStore {
    /// Read the score stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<u32>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: u32) -> Result<()>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        (**self).set(key, value)
    }
}

pub type ScoreStoreBox = Box<dyn ScoreStore>;

/// Parse a raw stored value.
pub(crate) fn parse_score(key: &str, raw: &str) -> Result<u32> {
    raw.trim().parse().map_err(|_| StoreError::Corrupt {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("k", "42").unwrap(), 42);
        assert_eq!(parse_score("k", " 7\n").unwrap(), 7);
        assert!(matches!(
            parse_score("k", "-1"),
            Err(StoreError::Corrupt { .. })
        ));
        assert!(matches!(
            parse_score("k", "lots"),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_boxed_store() {
        let mut store: ScoreStoreBox = Box::new(InMemoryStore::new());
        store.set("best", 9).unwrap();
        assert_eq!(store.get("best").unwrap(), Some(9));
    }
}
