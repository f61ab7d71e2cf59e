//! Line-oriented front end: command parsing and frame rendering.
//!
//! Plain text adds a todo. Lines starting with `:` are commands; positions
//! refer to the numbered rows of the last rendered frame. A task that itself
//! starts with `:` is added with `::` or `:add`.

use crate::types::{Filter, ParseEnumError, Theme};
use crate::view::TodoView;
use crossterm::style::{style as styled, Color, Stylize};
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

/// Usage text printed by `:help`
pub const HELP: &str = "\
Type a task and press Enter to add it.

Commands:
  :add TEXT, ::TEXT    add TEXT even if it starts with ':'
  :toggle N, :t N      mark row N done / not done
  :delete N, :d N      delete row N
  :clear               delete every completed task
  :all :active :completed, :filter NAME
                       choose which tasks are listed
  :theme               switch between light and dark
  :list                show the list again
  :help                show this help
  :quit, :q            exit";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a todo with this raw text
    Add(String),
    /// Toggle the row at this position
    Toggle(usize),
    /// Delete the row at this position
    Delete(usize),
    /// Remove completed todos
    ClearCompleted,
    /// Change the filter
    Filter(Filter),
    /// Switch theme
    ToggleTheme,
    /// Render again
    List,
    /// Print usage
    Help,
    /// Leave the session
    Quit,
}

/// Why a line could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    /// `:` followed by a word that is not a command
    #[error("unknown command ':{0}', type :help for usage")]
    Unknown(String),

    /// A positional command without a usable row number
    #[error(":{command} needs a row number, e.g. :{command} 2")]
    MissingPosition {
        /// Command name as typed
        command: String,
    },

    /// `:filter` with a bad name
    #[error(transparent)]
    Filter(#[from] ParseEnumError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            return Ok(Self::Add(line.to_string()));
        };

        // `::text` adds ":text"
        if rest.starts_with(':') {
            return Ok(Self::Add(rest.to_string()));
        }
        if let Some(text) = rest
            .trim_start()
            .strip_prefix("add")
            .filter(|text| text.is_empty() || text.starts_with(char::is_whitespace))
        {
            return Ok(Self::Add(text.to_string()));
        }

        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        let argument = words.next();

        let position = |command: &str| {
            argument
                .and_then(|a| a.parse::<usize>().ok())
                .ok_or_else(|| ParseCommandError::MissingPosition {
                    command: command.to_string(),
                })
        };

        match name {
            "toggle" | "t" => Ok(Self::Toggle(position(name)?)),
            "delete" | "d" => Ok(Self::Delete(position(name)?)),
            "clear" => Ok(Self::ClearCompleted),
            "all" => Ok(Self::Filter(Filter::All)),
            "active" => Ok(Self::Filter(Filter::Active)),
            "completed" => Ok(Self::Filter(Filter::Completed)),
            "filter" => Ok(Self::Filter(argument.unwrap_or_default().parse()?)),
            "theme" => Ok(Self::ToggleTheme),
            "list" | "ls" => Ok(Self::List),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// Parse one input line
///
/// # Errors
///
/// Returns [`ParseCommandError`] for unknown commands or missing arguments.
pub fn parse(line: &str) -> Result<Command, ParseCommandError> {
    line.parse()
}

/// How frames are drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    /// No escape sequences, for pipes and tests
    #[default]
    Plain,
    /// Coloured output picked from the theme
    Ansi,
}

struct Palette {
    text: Color,
    done: Color,
    accent: Color,
}

const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            text: Color::Black,
            done: Color::Grey,
            accent: Color::DarkBlue,
        },
        Theme::Dark => Palette {
            text: Color::White,
            done: Color::DarkGrey,
            accent: Color::Cyan,
        },
    }
}

/// Draw one frame of `view`
#[must_use]
pub fn render(view: &TodoView, style: Style) -> String {
    let mut out = String::new();
    let colours = palette(view.theme);

    let header = format!("TODO  [{}]  ({})", view.filter, view.theme_toggle_label);
    match style {
        Style::Plain => out.push_str(&header),
        Style::Ansi => {
            let _ = write!(out, "{}", styled(header).with(colours.accent).bold());
        },
    }
    out.push('\n');

    if view.items.is_empty() {
        out.push_str("  (nothing here)\n");
    }

    for item in &view.items {
        let mark = if item.todo.completed { "x" } else { " " };
        let row = format!("{:>3}. [{mark}] {}", item.position, item.todo.text);
        match (style, item.todo.completed) {
            (Style::Plain, _) => out.push_str(&row),
            (Style::Ansi, true) => {
                let _ = write!(out, "{}", styled(row).with(colours.done).crossed_out());
            },
            (Style::Ansi, false) => {
                let _ = write!(out, "{}", styled(row).with(colours.text));
            },
        }
        out.push('\n');
    }

    out.push_str(&view.items_left);
    out.push('\n');

    if let Some(error) = &view.last_error {
        let line = format!("! {error}");
        match style {
            Style::Plain => out.push_str(&line),
            Style::Ansi => {
                let _ = write!(out, "{}", styled(line).with(Color::Red));
            },
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests can unwrap
mod tests {
    use super::*;
    use crate::types::{AppState, SeedList};

    #[test]
    fn plain_text_is_an_add() {
        assert_eq!(parse("Buy milk"), Ok(Command::Add("Buy milk".into())));
        assert_eq!(parse("   "), Ok(Command::Add("   ".into())));
    }

    #[test]
    fn colon_text_can_be_added() {
        assert_eq!(parse("::wq"), Ok(Command::Add(":wq".into())));
        assert_eq!(parse(":: smile"), Ok(Command::Add(": smile".into())));
        assert_eq!(parse(":add :t 3"), Ok(Command::Add(" :t 3".into())));
        assert_eq!(parse(":add"), Ok(Command::Add(String::new())));
        assert_eq!(parse(":address"), Err(ParseCommandError::Unknown("address".into())));
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse(":t 3"), Ok(Command::Toggle(3)));
        assert_eq!(parse(" :delete 1 "), Ok(Command::Delete(1)));
        assert_eq!(parse(":clear"), Ok(Command::ClearCompleted));
        assert_eq!(parse(":active"), Ok(Command::Filter(Filter::Active)));
        assert_eq!(parse(":filter Completed"), Ok(Command::Filter(Filter::Completed)));
        assert_eq!(parse(":theme"), Ok(Command::ToggleTheme));
        assert_eq!(parse(":q"), Ok(Command::Quit));
    }

    #[test]
    fn bad_commands_are_errors() {
        assert_eq!(parse(":frobnicate"), Err(ParseCommandError::Unknown("frobnicate".into())));
        assert_eq!(
            parse(":toggle x"),
            Err(ParseCommandError::MissingPosition {
                command: "toggle".into()
            })
        );
        assert!(matches!(parse(":filter done"), Err(ParseCommandError::Filter(_))));
        assert!(matches!(parse(":"), Err(ParseCommandError::Unknown(_))));
    }

    #[test]
    fn plain_render_lists_rows_and_footer() {
        let state = AppState::new(Theme::Dark, SeedList::Sample.todos());
        let frame = render(&TodoView::from_state(&state), Style::Plain);

        let lines: Vec<_> = frame.lines().collect();
        assert_eq!(lines[0], "TODO  [all]  (Light Mode)");
        assert_eq!(lines[1], "  1. [x] Complete online JavaScript course");
        assert_eq!(lines[2], "  2. [ ] Jog around the park 3x");
        assert_eq!(lines[7], "5 items left");
        assert!(!frame.contains('\u{1b}'));
    }

    #[test]
    fn render_shows_error_and_empty_list() {
        let mut state = AppState::default();
        state.last_error = Some("could not save todos: disk full".into());

        let frame = render(&TodoView::from_state(&state), Style::Plain);
        assert!(frame.contains("(nothing here)"));
        assert!(frame.contains("0 items left"));
        assert!(frame.ends_with("! could not save todos: disk full\n"));
    }

    #[test]
    fn ansi_render_uses_escapes() {
        let state = AppState::new(Theme::Light, SeedList::Sample.todos());
        let frame = render(&TodoView::from_state(&state), Style::Ansi);
        assert!(frame.contains('\u{1b}'));
        assert!(frame.contains("Complete online JavaScript course"));
    }
}
