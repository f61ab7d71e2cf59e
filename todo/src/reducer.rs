//! Reducer logic for the todo list.
//!
//! Every transition that touches the list ends in a commit: the whole list
//! is serialized and written under [`TODOS_KEY`]. The write is described as
//! an effect, the store executes it before `send` returns.

use crate::environment::TodoEnvironment;
use crate::persistence::{self, TODOS_KEY};
use crate::theme::ThemeReducer;
use crate::types::{AppAction, AppState, Todo, TodoId};
use composable_todo_core::composition::CombinedReducer;
use composable_todo_core::{
    combine_reducers, effect::Effect, put_value, reducer::Reducer, scope_reducer, smallvec,
    SmallVec,
};

/// Draws allowed before an add gives up on finding an unused id
const MAX_ID_ATTEMPTS: usize = 16;

/// Reducer for the todo list, the filter and persistence feedback
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draw an id no record currently holds
    fn fresh_id(state: &AppState, env: &TodoEnvironment) -> Result<TodoId, String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = TodoId::new(env.ids.next_id());
            if !state.exists(&id) {
                return Ok(id);
            }
            tracing::debug!(%id, "Generated id already in use, drawing again");
        }

        Err(format!(
            "could not allocate an unused todo id after {MAX_ID_ATTEMPTS} attempts"
        ))
    }

    /// Write the current list under [`TODOS_KEY`]
    fn commit_todos(state: &mut AppState, env: &TodoEnvironment) -> SmallVec<[Effect<AppAction>; 4]> {
        let value = match persistence::encode_todos(&state.todos) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "Could not encode todos, skipping commit");
                state.last_error = Some(format!("could not encode todos: {error}"));
                return SmallVec::new();
            },
        };

        smallvec![put_value! {
            store: env.storage,
            key: TODOS_KEY,
            value: value,
            on_success: || Some(AppAction::Committed { key: TODOS_KEY.to_string() }),
            on_error: |error| Some(AppAction::PersistFailed {
                key: TODOS_KEY.to_string(),
                error: error.to_string(),
            })
        }]
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Lifecycle ==========
            AppAction::Started => {
                tracing::debug!(count = state.todos.len(), "Committing starting list");
                Self::commit_todos(state, env)
            }

            // ========== User intents ==========
            AppAction::AddTodo { text } => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!("Ignoring blank todo");
                    return SmallVec::new();
                }

                let id = match Self::fresh_id(state, env) {
                    Ok(id) => id,
                    Err(error) => {
                        tracing::warn!(%error, "Todo not added");
                        state.last_error = Some(error);
                        return SmallVec::new();
                    },
                };

                tracing::info!(%id, "Todo added");
                state.todos.push(Todo::new(id, text));
                Self::commit_todos(state, env)
            }

            AppAction::ToggleTodo { id } => {
                // Loaded lists may repeat an id; every matching record flips.
                state
                    .todos
                    .iter_mut()
                    .filter(|t| t.id == id)
                    .for_each(Todo::toggle);
                Self::commit_todos(state, env)
            }

            AppAction::DeleteTodo { id } => {
                state.todos.retain(|t| t.id != id);
                Self::commit_todos(state, env)
            }

            AppAction::ClearCompleted => {
                let before = state.todos.len();
                state.todos.retain(|t| !t.completed);
                tracing::info!(removed = before - state.todos.len(), "Cleared completed todos");
                Self::commit_todos(state, env)
            }

            AppAction::SetFilter { filter } => {
                state.filter = filter;
                SmallVec::new()
            }

            // Handled by ThemeReducer
            AppAction::ToggleTheme => SmallVec::new(),

            // ========== Effect feedback ==========
            AppAction::Committed { key } => {
                tracing::debug!(%key, "Committed");
                state.last_error = None;
                SmallVec::new()
            }

            AppAction::PersistFailed { key, error } => {
                tracing::warn!(%key, %error, "Failed to persist");
                state.last_error = Some(format!("could not save {key}: {error}"));
                SmallVec::new()
            }
        }
    }
}

/// The whole application reducer
pub type AppReducer = CombinedReducer<AppState, AppAction, TodoEnvironment>;

/// Theme slice plus todo list, combined over [`AppState`]
#[must_use]
pub fn app_reducer() -> AppReducer {
    combine_reducers(vec![
        Box::new(scope_reducer(
            ThemeReducer::new(),
            |state: &AppState| &state.theme,
            |state: &mut AppState, theme| state.theme = theme,
        )),
        Box::new(TodoReducer::new()),
    ])
}
