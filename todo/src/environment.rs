//! Injected dependencies for the todo reducers.

use crate::types::Todo;
use composable_todo_core::environment::IdGenerator;
use composable_todo_core::storage::KeyValueStore;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Environment dependencies for the todo reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Where commits are written
    pub storage: Arc<dyn KeyValueStore>,
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { storage, ids }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Monotonic decimal ids: `"7"`, `"8"`, ...
///
/// Seeded past every decimal id already in the list, so a generated id can
/// never equal a loaded one.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Start at `first`
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Start one past the largest decimal id in `todos` (at 1 if there is none)
    #[must_use]
    pub fn starting_after(todos: &[Todo]) -> Self {
        let max = todos
            .iter()
            .filter_map(|t| t.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self::starting_at(max.saturating_add(1))
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Random v4 UUID ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Which id generator a session uses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// [`SequentialIdGenerator`]
    #[default]
    Sequential,
    /// [`UuidIdGenerator`]
    Uuid,
}

impl IdStrategy {
    /// Build the generator for a session starting with `todos`
    #[must_use]
    pub fn generator(self, todos: &[Todo]) -> Arc<dyn IdGenerator> {
        match self {
            Self::Sequential => Arc::new(SequentialIdGenerator::starting_after(todos)),
            Self::Uuid => Arc::new(UuidIdGenerator),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = crate::types::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            _ => Err(crate::types::ParseEnumError::new(
                "id strategy",
                s,
                "sequential, uuid",
            )),
        }
    }
}
