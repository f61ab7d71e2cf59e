//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of records that can be added,
//! completed, deleted and cleared. Theme and filter travel alongside it in
//! the same [`AppState`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string names none of an enum's variants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Unique identifier for a todo record
///
/// Opaque: loaded lists may carry any string, generated ids come from the
/// environment's `IdGenerator`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wrap a raw id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Task text, trimmed and non-empty when created through the reducer
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
}

impl Todo {
    /// Creates an open todo
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Creates a todo that is already done
    #[must_use]
    pub fn completed(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            completed: true,
            ..Self::new(id, text)
        }
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Colour scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Persisted string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseEnumError;

    /// Exact match only: `"Dark"` or `" dark"` are not themes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseEnumError::new("theme", other, "light, dark")),
        }
    }
}

/// Which todos the list shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl Filter {
    /// Every filter, in display order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns true if `todo` is visible under this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    /// Display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError::new("filter", s, "all, active, completed")),
        }
    }
}

/// Fallback list used when nothing is persisted yet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeedList {
    /// Six example tasks, the first one completed
    #[default]
    Sample,
    /// Start with no tasks
    Empty,
}

impl SeedList {
    /// Materialize the seed todos
    #[must_use]
    pub fn todos(self) -> Vec<Todo> {
        match self {
            Self::Empty => Vec::new(),
            Self::Sample => vec![
                Todo::completed(TodoId::new("1"), "Complete online JavaScript course"),
                Todo::new(TodoId::new("2"), "Jog around the park 3x"),
                Todo::new(TodoId::new("3"), "10 minutes meditation"),
                Todo::new(TodoId::new("4"), "Read for 1 hour"),
                Todo::new(TodoId::new("5"), "Pick up groceries"),
                Todo::new(TodoId::new("6"), "Complete Todo App on Frontend Mentor"),
            ],
        }
    }
}

impl FromStr for SeedList {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sample" => Ok(Self::Sample),
            "empty" => Ok(Self::Empty),
            _ => Err(ParseEnumError::new("seed list", s, "sample, empty")),
        }
    }
}

/// Whole application state owned by the store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// Current colour scheme
    pub theme: Theme,
    /// Todos in insertion order
    pub todos: Vec<Todo>,
    /// Active view filter, never persisted
    pub filter: Filter,
    /// Last persistence failure, cleared by the next successful commit
    pub last_error: Option<String>,
}

impl AppState {
    /// Creates state with the given theme and todos and the default filter
    #[must_use]
    pub fn new(theme: Theme, todos: Vec<Todo>) -> Self {
        Self {
            theme,
            todos,
            filter: Filter::All,
            last_error: None,
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Everything the store can be asked to do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    // ========== Lifecycle ==========
    /// The session started; commit the starting theme and list
    Started,

    // ========== User intents ==========
    /// Append a todo; blank text is ignored
    AddTodo {
        /// Raw input, trimmed by the reducer
        text: String,
    },

    /// Flip completion of a todo
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Remove a todo
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    /// Remove every completed todo
    ClearCompleted,

    /// Change the view filter
    SetFilter {
        /// New filter
        filter: Filter,
    },

    /// Switch between light and dark
    ToggleTheme,

    // ========== Effect feedback ==========
    /// A value was written to storage
    Committed {
        /// Key that was written
        key: String,
    },

    /// Writing a value to storage failed
    PersistFailed {
        /// Key that could not be written
        key: String,
        /// Error description
        error: String,
    },
}
