//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants,
//! particularly storage writes whose callbacks map outcomes into actions.

/// Create an `Effect::Storage` with a `Put` operation
///
/// # Example
///
/// ```
/// use composable_todo_core::{put_value, effect::Effect, storage::{KeyValueStore, StorageError}};
/// use std::sync::Arc;
///
/// # struct NullStore;
/// # impl KeyValueStore for NullStore {
/// #     fn get(&self, _: &str) -> Result<Option<String>, StorageError> { Ok(None) }
/// #     fn set(&self, _: &str, _: &str) -> Result<(), StorageError> { Ok(()) }
/// # }
/// #[derive(Debug)]
/// enum Action {
///     Saved,
///     SaveFailed { error: String },
/// }
///
/// let store: Arc<dyn KeyValueStore> = Arc::new(NullStore);
/// let effect: Effect<Action> = put_value! {
///     store: store,
///     key: "theme",
///     value: "dark",
///     on_success: || Some(Action::Saved),
///     on_error: |error| Some(Action::SaveFailed { error: error.to_string() })
/// };
/// assert_eq!(effect.storage_key(), Some("theme"));
/// ```
#[macro_export]
macro_rules! put_value {
    (
        store: $store:expr,
        key: $key:expr,
        value: $value:expr,
        on_success: || $success_body:expr,
        on_error: |$error_param:ident| $error_body:expr
    ) => {
        $crate::effect::Effect::Storage(
            $crate::storage::StorageOperation::Put {
                store: ::std::sync::Arc::clone(&$store),
                key: ::std::string::ToString::to_string(&$key),
                value: ::std::convert::Into::<::std::string::String>::into($value),
                on_success: ::std::boxed::Box::new(move |()| $success_body),
                on_error: ::std::boxed::Box::new(move |$error_param| $error_body),
            }
        )
    };
}
