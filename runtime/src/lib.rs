//! # Composable Todo Runtime
//!
//! Runtime implementation for the Composable Todo architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//!
//! ## Execution Model
//!
//! `send()` is synchronous with respect to state: when it returns, the
//! action has been reduced, every effect it produced has run (storage
//! writes included), and every action fed back by those effects has been
//! reduced too. Callers never observe a state whose commit is still pending.
//!
//! Concurrent `send()` calls are serialized: one call's reduction, writes
//! and feedback finish before the next call reduces anything, so the last
//! value written under a key always matches the state in memory.
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use composable_todo_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum StoreError {
        /// One or more effects failed and no reducer was told about it
        ///
        /// Effects whose failure maps to a feedback action are not reported
        /// here; the reducer handles those.
        #[error("Effect execution failed: {0}")]
        EffectFailed(String),

        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// Result of executing a single effect
enum Feedback<A> {
    /// An action to reduce next
    Action(A),
    /// A failure no action was produced for
    Unhandled(String),
}

/// Execute one effect and return what it feeds back.
fn execute_effect<A>(effect: Effect<A>) -> Option<Feedback<A>> {
    match effect {
        Effect::None => {
            tracing::trace!("Executing Effect::None (no-op)");
            None
        },
        Effect::Storage(op) => {
            let key = op.key().to_string();
            tracing::trace!(key = %key, "Executing Effect::Storage");
            metrics::counter!("store.storage.writes").increment(1);

            match op.execute() {
                Ok(action) => action.map(Feedback::Action),
                Err(Some(action)) => {
                    metrics::counter!("store.storage.failures").increment(1);
                    Some(Feedback::Action(action))
                },
                Err(None) => {
                    metrics::counter!("store.storage.failures").increment(1);
                    tracing::error!(key = %key, "Storage write failed with no error handler");
                    Some(Feedback::Unhandled(format!("storage write to '{key}' failed")))
                },
            }
        },
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        execute_effect, Arc, AtomicBool, Feedback, Mutex, Ordering, Reducer, RwLock, StoreError,
        VecDeque,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` so views can read while effects run)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. Dispatch ordering (one `send` at a time)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        dispatch: Mutex<()>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Send + std::fmt::Debug + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                dispatch: Mutex::new(()),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Send an action to the store
        ///
        /// 1. Waits for any other `send` to finish
        /// 2. Acquires write lock on state
        /// 3. Calls reducer with (state, action, environment)
        /// 4. Releases the state lock and executes returned effects
        /// 5. Reduces every action the effects fed back, in order
        ///
        /// Returns once the whole feedback chain is exhausted. The dispatch
        /// lock is held until then, so writes land in the same order as the
        /// transitions that produced them.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store is shutting down
        /// - [`StoreError::EffectFailed`] if an effect failed without producing
        ///   a feedback action (state changes are kept)
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller.
        #[tracing::instrument(skip_all, name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejecting action, store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            let _dispatch = self.dispatch.lock().await;
            let mut queue = VecDeque::from([action]);
            let mut unhandled = Vec::new();

            while let Some(action) = queue.pop_front() {
                tracing::debug!(?action, "Reducing action");
                let effects = {
                    let mut state = self.state.write().await;
                    self.reducer.reduce(&mut state, action, &self.environment)
                };
                metrics::counter!("store.actions.processed").increment(1);

                for feedback in effects.into_iter().filter_map(execute_effect) {
                    match feedback {
                        Feedback::Action(next) => queue.push_back(next),
                        Feedback::Unhandled(reason) => unhandled.push(reason),
                    }
                }
            }

            if unhandled.is_empty() {
                Ok(())
            } else {
                Err(StoreError::EffectFailed(unhandled.join("; ")))
            }
        }

        /// Read the current state through a projection
        ///
        /// # Example
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Access the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Stop accepting actions
        ///
        /// Effects run inside `send()`, so nothing is left pending once the
        /// flag is set; later `send()` calls fail with
        /// [`StoreError::ShutdownInProgress`].
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Returns true once `shutdown()` has been called
        #[must_use]
        pub fn is_shutdown(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("shutdown", &self.shutdown.load(Ordering::Acquire))
                .finish_non_exhaustive()
        }
    }
}

pub use store::Store;
