//! A running todo session: startup, dispatch and views.

use crate::cli::Command;
use crate::environment::{IdStrategy, TodoEnvironment};
use crate::persistence;
use crate::reducer::{app_reducer, AppReducer};
use crate::theme::{self, ColorSchemePreference};
use crate::types::{AppAction, AppState, SeedList, Todo, TodoId};
use crate::view::TodoView;
use composable_todo_core::environment::IdGenerator;
use composable_todo_core::storage::KeyValueStore;
use composable_todo_runtime::{Store, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// The store type backing a session
pub type TodoStore = Store<AppState, AppAction, TodoEnvironment, AppReducer>;

/// Errors surfaced while executing a command
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The store rejected or failed the action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The command named a row that is not on screen
    #[error("no row {position}, the list shows {visible}")]
    NoSuchRow {
        /// Requested position
        position: usize,
        /// Rows currently visible
        visible: usize,
    },
}

/// What the front end should do after a command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State may have changed, draw this frame
    Render(TodoView),
    /// Print usage
    Help,
    /// Stop reading input
    Quit,
}

/// One user's todo list, wired to its storage
#[derive(Debug)]
pub struct Session {
    store: TodoStore,
}

impl Session {
    /// Start a session: resolve the theme, load or seed the list, pick an
    /// id generator that cannot collide with the loaded ids, then write the
    /// starting theme and list back to storage.
    ///
    /// A failed startup write does not fail the session; it shows up in
    /// `last_error` like any other failed commit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the startup commit fails without feeding
    /// back an action.
    pub async fn new(
        storage: Arc<dyn KeyValueStore>,
        preference: &dyn ColorSchemePreference,
        seed: SeedList,
        id_strategy: IdStrategy,
    ) -> Result<Self, StoreError> {
        let todos = persistence::initial_todos(storage.as_ref(), seed);
        let ids = id_strategy.generator(&todos);
        Self::start(storage, preference, todos, ids).await
    }

    /// Like [`Session::new`] with an explicit id generator
    ///
    /// # Errors
    ///
    /// Same as [`Session::new`].
    pub async fn with_id_generator(
        storage: Arc<dyn KeyValueStore>,
        preference: &dyn ColorSchemePreference,
        seed: SeedList,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, StoreError> {
        let todos = persistence::initial_todos(storage.as_ref(), seed);
        Self::start(storage, preference, todos, ids).await
    }

    async fn start(
        storage: Arc<dyn KeyValueStore>,
        preference: &dyn ColorSchemePreference,
        todos: Vec<Todo>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, StoreError> {
        let theme = theme::init(storage.as_ref(), preference);
        tracing::info!(%theme, todos = todos.len(), "Session started");

        let env = TodoEnvironment::new(storage, ids);
        let session = Self {
            store: Store::new(AppState::new(theme, todos), app_reducer(), env),
        };
        session.send(AppAction::Started).await?;
        Ok(session)
    }

    /// Dispatch an action; persistence has finished when this returns
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store is shut down or an effect failed
    /// without feeding back an action.
    pub async fn send(&self, action: AppAction) -> Result<(), StoreError> {
        self.store.send(action).await
    }

    /// The current render model
    pub async fn view(&self) -> TodoView {
        self.store.state(TodoView::from_state).await
    }

    /// A snapshot of the full state
    pub async fn state(&self) -> AppState {
        self.store.state(Clone::clone).await
    }

    /// Run a parsed command against the current view
    ///
    /// Row positions are resolved against the rows visible right now.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoSuchRow`] for positions off the list, or
    /// the store's error.
    pub async fn execute(&self, command: Command) -> Result<Outcome, SessionError> {
        let action = match command {
            Command::Add(text) => AppAction::AddTodo { text },
            Command::Toggle(position) => AppAction::ToggleTodo {
                id: self.id_at(position).await?,
            },
            Command::Delete(position) => AppAction::DeleteTodo {
                id: self.id_at(position).await?,
            },
            Command::ClearCompleted => AppAction::ClearCompleted,
            Command::Filter(filter) => AppAction::SetFilter { filter },
            Command::ToggleTheme => AppAction::ToggleTheme,
            Command::List => return Ok(Outcome::Render(self.view().await)),
            Command::Help => return Ok(Outcome::Help),
            Command::Quit => return Ok(Outcome::Quit),
        };

        self.send(action).await?;
        Ok(Outcome::Render(self.view().await))
    }

    async fn id_at(&self, position: usize) -> Result<TodoId, SessionError> {
        let view = self.view().await;
        view.item_at(position)
            .map(|todo| todo.id.clone())
            .ok_or(SessionError::NoSuchRow {
                position,
                visible: view.items.len(),
            })
    }

    /// Stop accepting commands
    pub fn shutdown(&self) {
        self.store.shutdown();
    }
}
