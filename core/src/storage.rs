//! Key/value storage abstraction for persisted application state.
//!
//! Applications persist a handful of named string values (for example a
//! serialized list under one key and a preference under another). This
//! module defines the store those values live in and the effect operation a
//! reducer returns to write one of them.
//!
//! # Implementations
//!
//! - `FileStore` (in the `todo` crate): a JSON object file on disk
//! - `InMemoryStore` (in `composable-todo-testing`): fast, deterministic tests
//!
//! # Example
//!
//! ```
//! use composable_todo_core::storage::{KeyValueStore, StorageError};
//! use std::collections::HashMap;
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct MapStore(Mutex<HashMap<String, String>>);
//!
//! impl KeyValueStore for MapStore {
//!     fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
//!         let map = self.0.lock().map_err(|e| StorageError::Unavailable(e.to_string()))?;
//!         Ok(map.get(key).cloned())
//!     }
//!
//!     fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
//!         let mut map = self.0.lock().map_err(|e| StorageError::Unavailable(e.to_string()))?;
//!         map.insert(key.to_string(), value.to_string());
//!         Ok(())
//!     }
//! }
//!
//! let store = MapStore::default();
//! store.set("theme", "dark").ok();
//! assert_eq!(store.get("theme").ok().flatten().as_deref(), Some("dark"));
//! ```

use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium holds data that cannot be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store cannot currently serve requests.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key/value medium for string values.
///
/// Writes are synchronous: when `set` returns `Ok`, the value is what a
/// later `get` (in this or a future session) returns.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so reducers can capture an
/// `Arc<dyn KeyValueStore>` inside effects.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Callback invoked when a storage write succeeds.
pub type OnStored<Action> = Box<dyn FnOnce(()) -> Option<Action> + Send>;

/// Callback invoked when a storage write fails.
pub type OnStorageError<Action> = Box<dyn FnOnce(StorageError) -> Option<Action> + Send>;

/// A storage write described by a reducer and executed by the runtime.
pub enum StorageOperation<Action> {
    /// Write `value` under `key`.
    Put {
        /// Store to write to
        store: Arc<dyn KeyValueStore>,
        /// Key to write
        key: String,
        /// Serialized value
        value: String,
        /// Maps success into an optional feedback action
        on_success: OnStored<Action>,
        /// Maps failure into an optional feedback action
        on_error: OnStorageError<Action>,
    },
}

impl<Action> StorageOperation<Action> {
    /// Build a `Put` operation.
    pub fn put<S, F>(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        value: impl Into<String>,
        on_success: S,
        on_error: F,
    ) -> Self
    where
        S: FnOnce(()) -> Option<Action> + Send + 'static,
        F: FnOnce(StorageError) -> Option<Action> + Send + 'static,
    {
        Self::Put {
            store,
            key: key.into(),
            value: value.into(),
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
        }
    }

    /// Key this operation writes.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } => key,
        }
    }

    /// Value this operation writes.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Put { value, .. } => value,
        }
    }

    /// Perform the write and map the outcome into a feedback action.
    pub fn execute(self) -> Result<Option<Action>, Option<Action>> {
        match self {
            Self::Put {
                store,
                key,
                value,
                on_success,
                on_error,
            } => match store.set(&key, &value) {
                Ok(()) => Ok(on_success(())),
                Err(error) => Err(on_error(error)),
            },
        }
    }
}

impl<Action> std::fmt::Debug for StorageOperation<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Put { key, value, .. } => f
                .debug_struct("StorageOperation::Put")
                .field("key", key)
                .field("value_len", &value.len())
                .finish_non_exhaustive(),
        }
    }
}
