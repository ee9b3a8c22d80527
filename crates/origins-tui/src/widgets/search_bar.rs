//! Search bar widget — text input + pager indicator at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor, `Delete` the one
//!   under it.
//! - `Nav(Left)` / `Nav(Right)` move the cursor; `Nav(Up)` / `Nav(Down)`
//!   leave it where it is.
//!
//! Every event the bar consumes counts as a keystroke and re-issues the
//! search once the debounce window settles; the app shell does the
//! submitting.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The term typed by the user, untrimmed.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
}

impl SearchBarState {
    /// Handle a key event from the app shell. Returns `true` when the event
    /// was a keystroke the bar acted on.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(input = %self.input, cursor = self.cursor, "search: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.input.remove(prev);
                    self.cursor = prev;
                    tracing::debug!(input = %self.input, cursor = self.cursor, "search: backspace");
                }
                true
            }
            AppEvent::Delete => {
                if self.cursor < self.input.len() {
                    self.input.remove(self.cursor);
                    tracing::debug!(input = %self.input, cursor = self.cursor, "search: delete");
                }
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                true
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = self.next_boundary();
                true
            }
            AppEvent::Nav(Direction::Up | Direction::Down) => true,
            _ => false,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.input
            .get(..self.cursor)
            .and_then(|head| head.char_indices().last())
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.input
            .get(self.cursor..)
            .and_then(|tail| tail.chars().next())
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.input.len())
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    /// Right-hand pager label, e.g. `page 2 · 100/pg` or `pager off`.
    pager: String,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(state: &'a SearchBarState, pager: String, focused: bool, theme: &'a Theme) -> Self {
        Self { state, pager, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self
            .state
            .input
            .get(..self.state.cursor)
            .map(|head| head.chars().count())
            .unwrap_or(0) as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Search").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(22)])
            .split(inner);

        let input_line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.input.as_str())
        };
        Paragraph::new(input_line).render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(self.pager, self.theme.status_normal)))
            .right_aligned()
            .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
