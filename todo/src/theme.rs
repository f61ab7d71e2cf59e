//! Theme controller: startup resolution and the toggle transition.
//!
//! The startup theme is the persisted one if it is valid, else the
//! environment's dark-mode preference, else light. Toggling flips the value
//! and commits it under [`THEME_KEY`].

use crate::environment::TodoEnvironment;
use crate::persistence::{self, THEME_KEY};
use crate::types::{AppAction, Theme};
use composable_todo_core::storage::KeyValueStore;
use composable_todo_core::{effect::Effect, put_value, reducer::Reducer, smallvec, SmallVec};

/// Environment signal saying whether the user prefers a dark scheme
pub trait ColorSchemePreference: Send + Sync {
    /// `Some(true)` for dark, `Some(false)` for light, `None` if unknown
    fn prefers_dark(&self) -> Option<bool>;
}

/// Preference fixed by configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedPreference(pub Option<bool>);

impl ColorSchemePreference for FixedPreference {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

/// Preference read from the terminal's `COLORFGBG` variable
///
/// `COLORFGBG` is `"<fg>;<bg>"` (some terminals insert a middle field);
/// the last field is the background palette index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalPreference {
    colorfgbg: Option<String>,
}

impl TerminalPreference {
    /// Read `COLORFGBG` from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok())
    }

    /// Use an explicit `COLORFGBG` value
    #[must_use]
    pub const fn from_colorfgbg(colorfgbg: Option<String>) -> Self {
        Self { colorfgbg }
    }
}

impl ColorSchemePreference for TerminalPreference {
    fn prefers_dark(&self) -> Option<bool> {
        let background: u8 = self.colorfgbg.as_deref()?.rsplit(';').next()?.trim().parse().ok()?;
        match background {
            0..=6 | 8 => Some(true),
            7 | 9..=15 => Some(false),
            _ => None,
        }
    }
}

/// Resolve the startup theme. Never fails.
pub fn init(storage: &dyn KeyValueStore, preference: &dyn ColorSchemePreference) -> Theme {
    if let Some(theme) = persistence::load_theme(storage) {
        return theme;
    }

    match preference.prefers_dark() {
        Some(true) => Theme::Dark,
        Some(false) | None => Theme::Light,
    }
}

/// The theme after a toggle
#[must_use]
pub const fn toggle(current: Theme) -> Theme {
    current.opposite()
}

/// Reducer for the theme slice of the state
#[derive(Clone, Debug, Default)]
pub struct ThemeReducer;

impl ThemeReducer {
    /// Creates a new `ThemeReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for ThemeReducer {
    type State = Theme;
    type Action = AppAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        theme: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::ToggleTheme => {
                *theme = toggle(*theme);
                tracing::info!(theme = %theme, "Theme toggled");
            },
            AppAction::Started => {},
            _ => return SmallVec::new(),
        }

        smallvec![put_value! {
            store: env.storage,
            key: THEME_KEY,
            value: theme.as_str(),
            on_success: || Some(AppAction::Committed { key: THEME_KEY.to_string() }),
            on_error: |error| Some(AppAction::PersistFailed {
                key: THEME_KEY.to_string(),
                error: error.to_string(),
            })
        }]
    }
}
