//! Tests for the in-memory storage mock driven through a real Store

#![allow(clippy::unwrap_used)] // Tests can unwrap

use composable_todo_core::environment::IdGenerator;
use composable_todo_core::{effect::Effect, put_value, reducer::Reducer, smallvec, SmallVec};
use composable_todo_core::storage::KeyValueStore;
use composable_todo_runtime::Store;
use composable_todo_testing::{InMemoryStore, SequentialIds};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
struct NotesState {
    notes: Vec<(String, String)>,
    failures: usize,
}

#[derive(Clone, Debug)]
enum NotesAction {
    Add { text: String },
    WriteFailed,
}

struct NotesEnv {
    storage: Arc<dyn KeyValueStore>,
    ids: Arc<dyn IdGenerator>,
}

struct NotesReducer;

impl Reducer for NotesReducer {
    type State = NotesState;
    type Action = NotesAction;
    type Environment = NotesEnv;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            NotesAction::Add { text } => {
                state.notes.push((env.ids.next_id(), text));
                let joined = state
                    .notes
                    .iter()
                    .map(|(id, text)| format!("{id}={text}"))
                    .collect::<Vec<_>>()
                    .join(",");
                smallvec![put_value! {
                    store: env.storage,
                    key: "notes",
                    value: joined,
                    on_success: || None,
                    on_error: |_error| Some(NotesAction::WriteFailed)
                }]
            },
            NotesAction::WriteFailed => {
                state.failures += 1;
                smallvec![]
            },
        }
    }
}

fn store(storage: &Arc<InMemoryStore>) -> Store<NotesState, NotesAction, NotesEnv, NotesReducer> {
    Store::new(
        NotesState::default(),
        NotesReducer,
        NotesEnv {
            storage: Arc::clone(storage) as Arc<dyn KeyValueStore>,
            ids: Arc::new(SequentialIds::new()),
        },
    )
}

#[tokio::test]
async fn writes_land_in_the_mock_in_order() {
    let storage = Arc::new(InMemoryStore::new());
    let store = store(&storage);

    store.send(NotesAction::Add { text: "a".into() }).await.unwrap();
    store.send(NotesAction::Add { text: "b".into() }).await.unwrap();

    assert_eq!(
        storage.writes(),
        vec![
            ("notes".to_string(), "test-1=a".to_string()),
            ("notes".to_string(), "test-1=a,test-2=b".to_string()),
        ]
    );
    assert_eq!(storage.value("notes").as_deref(), Some("test-1=a,test-2=b"));
}

#[tokio::test]
async fn failing_mock_feeds_error_back_to_reducer() {
    let storage = Arc::new(InMemoryStore::new());
    storage.fail_writes(true);
    let store = store(&storage);

    store.send(NotesAction::Add { text: "a".into() }).await.unwrap();

    assert_eq!(store.state(|s| s.failures).await, 1);
    assert_eq!(store.state(|s| s.notes.len()).await, 1);
    assert!(storage.writes().is_empty());
}
