//! Integration tests for the Store runtime driven by composed reducers
//! and the in-memory storage mock.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use composable_todo_core::storage::{KeyValueStore, StorageError};
use composable_todo_core::{
    combine_reducers, effect::Effect, put_value, reducer::Reducer, scope_reducer, smallvec,
    SmallVec,
};
use composable_todo_runtime::{Store, StoreError};
use composable_todo_testing::InMemoryStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

#[derive(Clone, Debug, Default)]
struct CounterState {
    dark: bool,
    count: u32,
    saved: u32,
    failed: u32,
}

#[derive(Clone, Debug)]
enum CounterAction {
    Flip,
    Increment,
    Saved,
    SaveFailed,
}

struct CounterEnv {
    storage: Arc<dyn KeyValueStore>,
}

struct FlipReducer;

impl Reducer for FlipReducer {
    type State = bool;
    type Action = CounterAction;
    type Environment = CounterEnv;

    fn reduce(
        &self,
        dark: &mut bool,
        action: CounterAction,
        env: &CounterEnv,
    ) -> SmallVec<[Effect<CounterAction>; 4]> {
        if !matches!(action, CounterAction::Flip) {
            return SmallVec::new();
        }
        *dark = !*dark;
        smallvec![put_value! {
            store: env.storage,
            key: "dark",
            value: dark.to_string(),
            on_success: || Some(CounterAction::Saved),
            on_error: |_error| Some(CounterAction::SaveFailed)
        }]
    }
}

struct CountReducer;

impl Reducer for CountReducer {
    type State = CounterState;
    type Action = CounterAction;
    type Environment = CounterEnv;

    fn reduce(
        &self,
        state: &mut CounterState,
        action: CounterAction,
        env: &CounterEnv,
    ) -> SmallVec<[Effect<CounterAction>; 4]> {
        match action {
            CounterAction::Increment => {
                state.count += 1;
                smallvec![put_value! {
                    store: env.storage,
                    key: "count",
                    value: state.count.to_string(),
                    on_success: || Some(CounterAction::Saved),
                    on_error: |_error| Some(CounterAction::SaveFailed)
                }]
            },
            CounterAction::Saved => {
                state.saved += 1;
                SmallVec::new()
            },
            CounterAction::SaveFailed => {
                state.failed += 1;
                SmallVec::new()
            },
            CounterAction::Flip => SmallVec::new(),
        }
    }
}

type App = composable_todo_core::composition::CombinedReducer<CounterState, CounterAction, CounterEnv>;

fn app() -> App {
    combine_reducers(vec![
        Box::new(scope_reducer(
            FlipReducer,
            |s: &CounterState| &s.dark,
            |s: &mut CounterState, dark| s.dark = dark,
        )),
        Box::new(CountReducer),
    ])
}

fn store(storage: &Arc<InMemoryStore>) -> Store<CounterState, CounterAction, CounterEnv, App> {
    let storage = Arc::clone(storage) as Arc<dyn KeyValueStore>;
    Store::new(CounterState::default(), app(), CounterEnv { storage })
}

#[tokio::test]
async fn test_writes_land_before_send_returns() {
    let storage = Arc::new(InMemoryStore::new());
    let store = store(&storage);

    assert_ok!(store.send(CounterAction::Increment).await);
    assert_eq!(storage.value("count").as_deref(), Some("1"));

    assert_ok!(store.send(CounterAction::Flip).await);
    assert_eq!(storage.value("dark").as_deref(), Some("true"));

    let (count, saved, dark) = store.state(|s| (s.count, s.saved, s.dark)).await;
    assert_eq!((count, saved, dark), (1, 2, true));
    assert_eq!(storage.written_keys(), vec!["count", "dark"]);
}

#[tokio::test]
async fn test_failed_writes_feed_back_and_keep_state() {
    let storage = Arc::new(InMemoryStore::new());
    storage.fail_writes(true);
    let store = store(&storage);

    assert_ok!(store.send(CounterAction::Increment).await);
    assert_ok!(store.send(CounterAction::Increment).await);

    let (count, failed) = store.state(|s| (s.count, s.failed)).await;
    assert_eq!((count, failed), (2, 2));
    assert!(storage.writes().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_senders_are_serialized() {
    let storage = Arc::new(InMemoryStore::new());
    let store = Arc::new(store(&storage));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.send(CounterAction::Increment).await })
        })
        .collect();

    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }

    assert_eq!(store.state(|s| s.count).await, 8);
    let values: Vec<String> = storage.writes().into_iter().map(|(_, v)| v).collect();
    assert_eq!(values, (1..=8).map(|n| n.to_string()).collect::<Vec<_>>());
    assert_eq!(storage.value("count").as_deref(), Some("8"));
}

/// Store that stalls while writing the first count
struct SlowFirstWrite {
    inner: InMemoryStore,
}

impl KeyValueStore for SlowFirstWrite {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value == "1" {
            std::thread::sleep(Duration::from_millis(200));
        }
        self.inner.set(key, value)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_write_is_not_overtaken() {
    let storage = Arc::new(SlowFirstWrite {
        inner: InMemoryStore::new(),
    });
    let store = Arc::new(Store::new(
        CounterState::default(),
        app(),
        CounterEnv {
            storage: Arc::clone(&storage) as Arc<dyn KeyValueStore>,
        },
    ));

    let first = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.send(CounterAction::Increment).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_ok!(store.send(CounterAction::Increment).await);
    assert_ok!(first.await.unwrap());

    assert_eq!(store.state(|s| s.count).await, 2);
    assert_eq!(storage.inner.value("count").as_deref(), Some("2"));
}

#[tokio::test]
async fn test_shutdown_rejects_new_actions() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let storage = Arc::new(InMemoryStore::new());
    let store = store(&storage);
    store.shutdown();

    let err = assert_err!(store.send(CounterAction::Increment).await);
    assert_eq!(err, StoreError::ShutdownInProgress);
    assert_eq!(store.state(|s| s.count).await, 0);
}
