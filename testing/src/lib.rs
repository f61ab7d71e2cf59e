//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the Composable Todo architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_testing::{InMemoryStore, SequentialIds};
//! use composable_todo_runtime::Store;
//!
//! #[tokio::test]
//! async fn adds_and_persists() {
//!     let storage = Arc::new(InMemoryStore::new());
//!     let env = TodoEnvironment::new(storage.clone(), Arc::new(SequentialIds::new()));
//!     let store = Store::new(AppState::default(), app_reducer(), env);
//!
//!     store.send(AppAction::AddTodo { text: "Buy milk".into() }).await?;
//!
//!     assert!(storage.value("todos").is_some());
//! }
//! ```


/// Mock implementations of Environment traits
pub mod mocks {
    use composable_todo_core::environment::IdGenerator;
    use composable_todo_core::storage::{KeyValueStore, StorageError};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex;

    /// In-memory key/value store for deterministic tests
    ///
    /// Records every successful write in order and can be switched into a
    /// failing mode to exercise persistence error paths.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::mocks::InMemoryStore;
    /// use composable_todo_core::storage::KeyValueStore;
    ///
    /// let store = InMemoryStore::new().with_entry("theme", "dark");
    /// assert_eq!(store.value("theme").as_deref(), Some("dark"));
    ///
    /// store.fail_writes(true);
    /// assert!(store.set("theme", "light").is_err());
    /// assert_eq!(store.value("theme").as_deref(), Some("dark"));
    /// ```
    #[derive(Debug, Default)]
    pub struct InMemoryStore {
        entries: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<(String, String)>>,
        failing: AtomicBool,
    }

    impl InMemoryStore {
        /// Create an empty store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed an entry without recording it as a write
        #[must_use]
        pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
            if let Ok(mut entries) = self.entries.lock() {
                entries.insert(key.into(), value.into());
            }
            self
        }

        /// Make subsequent `set` calls fail (or succeed again)
        pub fn fail_writes(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Current value under `key`
        #[must_use]
        pub fn value(&self, key: &str) -> Option<String> {
            self.entries.lock().ok()?.get(key).cloned()
        }

        /// Every successful write, oldest first
        #[must_use]
        pub fn writes(&self) -> Vec<(String, String)> {
            self.writes.lock().map(|w| w.clone()).unwrap_or_default()
        }

        /// Keys of every successful write, oldest first
        #[must_use]
        pub fn written_keys(&self) -> Vec<String> {
            self.writes().into_iter().map(|(key, _)| key).collect()
        }

        fn check_writable(&self) -> Result<(), StorageError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable(
                    "in-memory store is set to fail".to_string(),
                ));
            }
            Ok(())
        }

        fn poisoned<T>(_: T) -> StorageError {
            StorageError::Unavailable("in-memory store lock poisoned".to_string())
        }
    }

    impl KeyValueStore for InMemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let entries = self.entries.lock().map_err(Self::poisoned)?;
            Ok(entries.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check_writable()?;
            self.entries
                .lock()
                .map_err(Self::poisoned)?
                .insert(key.to_string(), value.to_string());
            self.writes
                .lock()
                .map_err(Self::poisoned)?
                .push((key.to_string(), value.to_string()));
            Ok(())
        }
    }

    /// Deterministic id generator: `test-1`, `test-2`, ...
    ///
    /// The prefix keeps generated ids apart from any numeric ids a test
    /// seeds into state.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_todo_testing::mocks::SequentialIds;
    /// use composable_todo_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIds::new();
    /// assert_eq!(ids.next_id(), "test-1");
    /// assert_eq!(ids.next_id(), "test-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Start counting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIds {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            format!("test-{}", self.next.fetch_add(1, Ordering::SeqCst))
        }
    }
}

// Re-export commonly used items
pub use mocks::{InMemoryStore, SequentialIds};
pub use reducer_test::{assertions, ReducerTest};
