// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, Dispatch},
    theme::Theme,
};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    // Change theme
    Theme(String),
    // Jump to a page (needs pagination)
    Page(u64),
    // Set rows per page
    Limit(u64),
    // Turn SKIP/LIMIT on or off
    Paginate,
    // Re-run the current search immediately
    Refresh,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "r" | "refresh" => Ok(Command::Refresh),
            "paginate" => Ok(Command::Paginate),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "page" => match rest.parse::<u64>() {
                Ok(n) if n >= 1 => Ok(Command::Page(n)),
                _ => Err("usage: page <n ≥ 1>".to_string()),
            },
            "limit" => match rest.parse::<u64>() {
                Ok(n) if n >= 1 => Ok(Command::Limit(n)),
                _ => Err("usage: limit <n ≥ 1>".to_string()),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state. Commands
/// that change what is being asked for queue an immediate search.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::lookup(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
        }
        Command::Page(n) => {
            if !s.paginate {
                return Err("pagination is off (:paginate to enable)".to_string());
            }
            s.page = n;
            s.search_now();
        }
        Command::Limit(n) => {
            s.limit = n;
            s.page = 1;
            if s.paginate {
                s.search_now();
            }
        }
        Command::Paginate => {
            s.paginate = !s.paginate;
            s.page = 1;
            s.outbox.push(Dispatch::Paginate(s.paginate));
            s.search_now();
        }
        Command::Refresh => {
            s.search_now();
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
