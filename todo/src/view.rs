//! Derived view: filter projection, counters and the render model.

use crate::types::{AppState, Filter, Theme, Todo};

/// Todos visible under `filter`, in list order
#[must_use]
pub fn project(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|t| filter.matches(t)).collect()
}

/// Number of todos not yet completed
#[must_use]
pub fn active_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|t| !t.completed).count()
}

/// Footer counter text. Always plural.
#[must_use]
pub fn items_left_label(count: usize) -> String {
    format!("{count} items left")
}

/// Label of the control that switches theme: names the theme it switches to
#[must_use]
pub const fn theme_toggle_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "Light Mode",
        Theme::Light => "Dark Mode",
    }
}

/// A visible row with its 1-based display position
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleTodo {
    /// Position the user refers to in commands
    pub position: usize,
    /// The record itself
    pub todo: Todo,
}

/// Everything a front end needs to draw one frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoView {
    /// Palette to draw with
    pub theme: Theme,
    /// Filter that produced `items`
    pub filter: Filter,
    /// Rows that pass the filter
    pub items: Vec<VisibleTodo>,
    /// Footer counter, independent of the filter
    pub items_left: String,
    /// Label of the theme switch
    pub theme_toggle_label: &'static str,
    /// Last persistence failure, if any
    pub last_error: Option<String>,
}

impl TodoView {
    /// Build the view of `state`
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        let items = project(&state.todos, state.filter)
            .into_iter()
            .enumerate()
            .map(|(index, todo)| VisibleTodo {
                position: index + 1,
                todo: todo.clone(),
            })
            .collect();

        Self {
            theme: state.theme,
            filter: state.filter,
            items,
            items_left: items_left_label(active_count(&state.todos)),
            theme_toggle_label: theme_toggle_label(state.theme),
            last_error: state.last_error.clone(),
        }
    }

    /// The row shown at `position` (1-based)
    #[must_use]
    pub fn item_at(&self, position: usize) -> Option<&Todo> {
        self.items
            .iter()
            .find(|item| item.position == position)
            .map(|item| &item.todo)
    }
}
