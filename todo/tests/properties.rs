//! Property tests for the todo reducer and the derived view.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use composable_todo_core::reducer::Reducer;
use composable_todo_testing::{InMemoryStore, SequentialIds};
use proptest::prelude::*;
use std::sync::Arc;
use todo::environment::SequentialIdGenerator;
use todo::persistence::{decode_todos, encode_todos};
use todo::view::{active_count, project};
use todo::{AppAction, AppState, Filter, Theme, Todo, TodoEnvironment, TodoId, TodoReducer};

fn env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(InMemoryStore::new()), Arc::new(SequentialIds::new()))
}

fn reduce(state: &mut AppState, action: AppAction) {
    let _ = TodoReducer::new().reduce(state, action, &env());
}

/// Todo text: plain words, JSON-escaped characters and arbitrary unicode
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9][a-zA-Z0-9 ]{0,15}",
        r#"[\\"\n\t\r 'a-zé漢字😀]{1,16}"#,
        any::<String>(),
    ]
}

/// Lists with distinct decimal ids, like the seed list
fn todos_strategy() -> impl Strategy<Value = Vec<Todo>> {
    prop::collection::vec((text_strategy(), any::<bool>()), 0..12).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (text, completed))| Todo {
                    id: TodoId::new((i + 1).to_string()),
                    text,
                    completed,
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn toggling_twice_restores_the_list(todos in todos_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!todos.is_empty());
        let id = todos[pick.index(todos.len())].id.clone();
        let mut state = AppState::new(Theme::Light, todos.clone());

        reduce(&mut state, AppAction::ToggleTodo { id: id.clone() });
        reduce(&mut state, AppAction::ToggleTodo { id });

        prop_assert_eq!(state.todos, todos);
    }

    #[test]
    fn deleting_an_added_todo_restores_the_list(todos in todos_strategy(), text in "[a-z]{1,10}") {
        let mut state = AppState::new(Theme::Light, todos.clone());

        reduce(&mut state, AppAction::AddTodo { text });
        prop_assert_eq!(state.todos.len(), todos.len() + 1);
        let added = state.todos[todos.len()].id.clone();
        reduce(&mut state, AppAction::DeleteTodo { id: added });

        prop_assert_eq!(state.todos, todos);
    }

    #[test]
    fn filters_partition_the_list(todos in todos_strategy()) {
        let all = project(&todos, Filter::All);
        let active = project(&todos, Filter::Active);
        let completed = project(&todos, Filter::Completed);

        prop_assert_eq!(all, todos.iter().collect::<Vec<_>>());
        prop_assert_eq!(active.len() + completed.len(), todos.len());
        prop_assert!(active.iter().all(|t| !t.completed));
        prop_assert!(completed.iter().all(|t| t.completed));
        prop_assert_eq!(active_count(&todos), active.len());
    }

    #[test]
    fn added_text_is_trimmed(
        todos in todos_strategy(),
        lead in "[ \t]{0,3}",
        core in "[a-z]([a-z ]{0,8}[a-z])?",
        tail in "[ \t]{0,3}",
    ) {
        let mut state = AppState::new(Theme::Light, todos);

        reduce(&mut state, AppAction::AddTodo { text: format!("{lead}{core}{tail}") });

        let last = state.todos.last().map(|t| t.text.clone());
        prop_assert_eq!(last, Some(core));
    }

    #[test]
    fn blank_text_changes_nothing(todos in todos_strategy(), blank in "[ \t\n]{0,6}") {
        let mut state = AppState::new(Theme::Light, todos.clone());

        let effects = TodoReducer::new().reduce(&mut state, AppAction::AddTodo { text: blank }, &env());

        prop_assert!(effects.is_empty());
        prop_assert_eq!(state.todos, todos);
    }

    #[test]
    fn clear_completed_keeps_active_in_order(todos in todos_strategy()) {
        let mut state = AppState::new(Theme::Light, todos.clone());

        reduce(&mut state, AppAction::ClearCompleted);

        let expected: Vec<Todo> = todos.into_iter().filter(|t| !t.completed).collect();
        prop_assert_eq!(state.todos, expected);
    }

    #[test]
    fn persisted_list_round_trips(todos in todos_strategy()) {
        let encoded = encode_todos(&todos).unwrap();
        prop_assert_eq!(decode_todos(&encoded).unwrap(), todos);
    }

    #[test]
    fn sequential_ids_avoid_loaded_ids(todos in todos_strategy()) {
        use composable_todo_core::environment::IdGenerator;

        let ids = SequentialIdGenerator::starting_after(&todos);
        for _ in 0..4 {
            let id = TodoId::new(ids.next_id());
            prop_assert!(todos.iter().all(|t| t.id != id));
        }
    }
}
