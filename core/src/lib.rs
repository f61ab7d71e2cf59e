//! # Composable Todo Core
//!
//! Core traits and types for the reducer architecture the todo application
//! is built on.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (user intents and effect feedback)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use composable_todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct ListState {
//!     items: Vec<String>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum ListAction {
//!     Push(String),
//! }
//!
//! struct ListReducer;
//!
//! impl Reducer for ListReducer {
//!     type State = ListState;
//!     type Action = ListAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut ListState,
//!         action: ListAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<ListAction>; 4]> {
//!         match action {
//!             ListAction::Push(item) => state.items.push(item),
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = ListState::default();
//! let _ = ListReducer.reduce(&mut state, ListAction::Push("milk".into()), &());
//! assert_eq!(state.items, vec!["milk".to_string()]);
//! ```

// Re-export commonly used types
pub use smallvec::{smallvec, SmallVec};

/// Reducer composition utilities
pub mod composition;

/// Key/value storage abstraction used by persistence effects
pub mod storage;

/// Declarative macros for building effects
pub mod effect_macros;

pub use composition::{combine_reducers, scope_reducer};
pub use storage::{KeyValueStore, StorageError};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce zero or one effect, so the returned
        /// collection stays inline for up to four effects.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use crate::storage::StorageOperation;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Write to a key/value store
        ///
        /// The operation carries the store handle and the callbacks that map
        /// the outcome back into an action.
        Storage(StorageOperation<Action>),
    }

    // Manual Debug implementation since the store handle doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Storage(op) => f.debug_tuple("Effect::Storage").field(op).finish(),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns true if this effect does nothing when executed
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// Returns the storage key written by this effect, if it is a storage write
        #[must_use]
        pub fn storage_key(&self) -> Option<&str> {
            match self {
                Effect::Storage(op) => Some(op.key()),
                Effect::None => None,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    /// Source of fresh identifiers for newly created records
    ///
    /// Implementations must never hand out the same value twice for the
    /// lifetime of the generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_todo_core::environment::IdGenerator;
    /// use std::sync::atomic::{AtomicU64, Ordering};
    ///
    /// struct Counter(AtomicU64);
    ///
    /// impl IdGenerator for Counter {
    ///     fn next_id(&self) -> String {
    ///         self.0.fetch_add(1, Ordering::Relaxed).to_string()
    ///     }
    /// }
    ///
    /// let ids = Counter(AtomicU64::new(1));
    /// assert_eq!(ids.next_id(), "1");
    /// assert_eq!(ids.next_id(), "2");
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier
        fn next_id(&self) -> String;
    }
}
