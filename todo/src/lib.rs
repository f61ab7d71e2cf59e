//! A persistent todo list with light and dark themes.
//!
//! The list, the theme and the view filter live in one [`AppState`] owned by
//! a `Store`. The starting theme and list, and every later change to either,
//! are committed to a key/value store before `send` returns:
//!
//! - `theme`: `"light"` or `"dark"`
//! - `todos`: the full list as a JSON array
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{AppAction, FileStore, FixedPreference, IdStrategy, SeedList, Session};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = Arc::new(FileStore::new("todo-data.json"));
//! let session =
//!     Session::new(storage, &FixedPreference(None), SeedList::Sample, IdStrategy::Sequential)
//!         .await?;
//!
//! session.send(AppAction::AddTodo { text: "Buy milk".to_string() }).await?;
//! session.send(AppAction::ToggleTheme).await?;
//!
//! let view = session.view().await;
//! println!("{}", view.items_left);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod file_store;
pub mod persistence;
pub mod reducer;
pub mod session;
pub mod theme;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use environment::{IdStrategy, TodoEnvironment};
pub use file_store::FileStore;
pub use reducer::{app_reducer, AppReducer, TodoReducer};
pub use session::{Outcome, Session, SessionError};
pub use theme::{ColorSchemePreference, FixedPreference, TerminalPreference, ThemeReducer};
pub use types::{AppAction, AppState, Filter, SeedList, Theme, Todo, TodoId};
pub use view::TodoView;
