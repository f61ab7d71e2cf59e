//! Persisted form of the todo list and theme.
//!
//! Two keys live in the key/value store: `theme` holds `"light"` or
//! `"dark"`, `todos` holds the full list as a JSON array. Anything that
//! cannot be read or decoded is treated as absent.

use crate::types::{SeedList, Theme, Todo};
use composable_todo_core::storage::KeyValueStore;

/// Key holding the theme
pub const THEME_KEY: &str = "theme";

/// Key holding the todo list
pub const TODOS_KEY: &str = "todos";

/// Serialize the list, preserving order and every field.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn encode_todos(todos: &[Todo]) -> Result<String, serde_json::Error> {
    serde_json::to_string(todos)
}

/// Parse a list written by [`encode_todos`].
///
/// # Errors
///
/// Returns the `serde_json` error if `raw` is not a JSON array of todos.
pub fn decode_todos(raw: &str) -> Result<Vec<Todo>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Read the persisted list, `None` if absent or unusable.
pub fn load_todos(storage: &dyn KeyValueStore) -> Option<Vec<Todo>> {
    let raw = match storage.get(TODOS_KEY) {
        Ok(raw) => raw?,
        Err(error) => {
            tracing::warn!(%error, key = TODOS_KEY, "Could not read persisted todos");
            return None;
        },
    };

    match decode_todos(&raw) {
        Ok(todos) => Some(todos),
        Err(error) => {
            tracing::warn!(%error, key = TODOS_KEY, "Ignoring malformed persisted todos");
            None
        },
    }
}

/// Read the persisted theme, `None` if absent, unreadable or not exactly
/// `"light"` / `"dark"`.
pub fn load_theme(storage: &dyn KeyValueStore) -> Option<Theme> {
    let raw = match storage.get(THEME_KEY) {
        Ok(raw) => raw?,
        Err(error) => {
            tracing::warn!(%error, key = THEME_KEY, "Could not read persisted theme");
            return None;
        },
    };

    match raw.parse() {
        Ok(theme) => Some(theme),
        Err(error) => {
            tracing::warn!(%error, key = THEME_KEY, "Ignoring invalid persisted theme");
            None
        },
    }
}

/// The list a session starts with: the persisted one verbatim, else the seed.
pub fn initial_todos(storage: &dyn KeyValueStore, seed: SeedList) -> Vec<Todo> {
    load_todos(storage).unwrap_or_else(|| {
        tracing::debug!(?seed, "No persisted todos, using seed list");
        seed.todos()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests can unwrap
mod tests {
    use super::*;
    use crate::types::TodoId;
    use composable_todo_testing::InMemoryStore;

    #[test]
    fn encode_matches_stored_shape() {
        let todos = vec![
            Todo::completed(TodoId::new("1"), "a"),
            Todo::new(TodoId::new("2"), "b"),
        ];
        assert_eq!(
            encode_todos(&todos).unwrap(),
            r#"[{"id":"1","text":"a","completed":true},{"id":"2","text":"b","completed":false}]"#
        );
    }

    #[test]
    fn encode_escapes_quotes_backslashes_and_newlines() {
        let todos = vec![Todo::new(TodoId::new("1"), "say \"hi\"\n\\ café 漢字")];
        let encoded = encode_todos(&todos).unwrap();

        assert_eq!(
            encoded,
            r#"[{"id":"1","text":"say \"hi\"\n\\ café 漢字","completed":false}]"#
        );
        assert_eq!(decode_todos(&encoded).unwrap(), todos);
    }

    #[test]
    fn decode_accepts_timestamp_ids() {
        let todos =
            decode_todos(r#"[{"id":"1718000000000","text":"from the web","completed":false}]"#)
                .unwrap();
        assert_eq!(todos[0].id.as_str(), "1718000000000");
    }

    #[test]
    fn load_todos_falls_back_on_garbage() {
        let storage = InMemoryStore::new().with_entry(TODOS_KEY, "{not json");
        assert_eq!(load_todos(&storage), None);
        assert_eq!(initial_todos(&storage, SeedList::Empty), Vec::new());
        assert_eq!(initial_todos(&storage, SeedList::Sample).len(), 6);
    }

    #[test]
    fn load_todos_keeps_persisted_list_verbatim() {
        let storage = InMemoryStore::new().with_entry(TODOS_KEY, "[]");
        assert_eq!(initial_todos(&storage, SeedList::Sample), Vec::new());
    }

    #[test]
    fn load_theme_rejects_invalid_values() {
        assert_eq!(load_theme(&InMemoryStore::new()), None);
        assert_eq!(
            load_theme(&InMemoryStore::new().with_entry(THEME_KEY, "dark")),
            Some(Theme::Dark)
        );
        assert_eq!(
            load_theme(&InMemoryStore::new().with_entry(THEME_KEY, "purple")),
            None
        );
    }
}
