//! Result list widget — the scrollable pane of search hits.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one result |
//! | `↓` / `j` | Move cursor down one result |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//! | `g` / `G` | Jump to first / last result |
//!
//! # Replacement semantics
//!
//! Each applied response discards every previous record. A response is
//! applied only if its sequence number is newer than the one currently on
//! screen, so a slow stale answer cannot overwrite a fresher one.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use origins_core::render::NO_RESULTS_TEXT;
use origins_core::{ResultRecord, ResultSet};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct ResultListState {
    pub records: Vec<ResultRecord>,
    /// Sequence number of the response on screen (0 = none yet).
    pub applied_seq: u64,
    /// Some search has come back, successfully or not.
    pub settled: bool,
    /// Index of the highlighted record.
    pub cursor: usize,
    /// Index of the first visible record.
    pub offset: usize,
    /// Render the uri caption under each label.
    pub show_uri: bool,
    /// Visible record count from the last render, so `handle()` can keep the
    /// cursor on screen.
    last_visible: Cell<usize>,
}

impl Default for ResultListState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ResultListState {
    pub fn new(show_uri: bool) -> Self {
        Self {
            records: Vec::new(),
            applied_seq: 0,
            settled: false,
            cursor: 0,
            offset: 0,
            show_uri,
            last_visible: Cell::new(20),
        }
    }

    /// Replace the records with `set` unless it is older than what is shown.
    /// Returns whether the set was applied.
    pub fn apply(&mut self, set: ResultSet) -> bool {
        if set.seq <= self.applied_seq {
            tracing::debug!(
                seq = set.seq,
                applied = self.applied_seq,
                "results: stale response dropped"
            );
            return false;
        }
        tracing::debug!(seq = set.seq, rows = set.records.len(), "results: replaced");
        self.applied_seq = set.seq;
        self.settled = true;
        self.records = set.records;
        self.cursor = 0;
        self.offset = 0;
        true
    }

    fn visible(&self) -> usize {
        self.last_visible.get().max(1)
    }

    fn rows_per_record(&self) -> usize {
        if self.show_uri { 2 } else { 1 }
    }

    /// Keep `offset` such that the cursor is inside the visible window.
    fn follow_cursor(&mut self) {
        let visible = self.visible();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.records.len();
        if total == 0 {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(last);
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + PAGE_STEP).min(last);
            }
            AppEvent::ScrollToTop => {
                self.cursor = 0;
            }
            AppEvent::ScrollToBottom => {
                self.cursor = last;
            }
            _ => return,
        }
        self.follow_cursor();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "results: cursor moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    state: &'a ResultListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(state: &'a ResultListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("Results").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let per = self.state.rows_per_record();
        let visible = (inner.height as usize / per).max(1);
        self.state.last_visible.set(visible);

        let total = self.state.records.len();
        if total == 0 {
            let text = if !self.state.settled {
                Line::from(Span::styled("searching…", self.theme.status_busy))
            } else if self.state.applied_seq == 0 {
                // Only failures so far; the status bar carries the error.
                Line::default()
            } else {
                Line::from(Span::styled(NO_RESULTS_TEXT, self.theme.placeholder))
            };
            Paragraph::new(text).render(inner, buf);
            return;
        }

        let start = self.state.offset.min(total.saturating_sub(1));
        let end = (start + visible).min(total);

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        let lines: Vec<Line<'static>> = self
            .state
            .records
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .flat_map(|(row, record)| {
                let selected = self.focused && start + row == self.state.cursor;
                render_record(record, self.state.show_uri, selected, self.theme)
            })
            .collect();

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(visible);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Record rendering
// ---------------------------------------------------------------------------

fn render_record(
    record: &ResultRecord,
    show_uri: bool,
    selected: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(record.label.clone(), theme.result_label))];
    if show_uri {
        lines.push(Line::from(vec![
            Span::styled("  ".to_string(), Style::default()),
            Span::styled(record.uri.clone(), theme.result_uri),
        ]));
    }
    if selected {
        lines = lines
            .into_iter()
            .map(|l| l.patch_style(theme.result_selected))
            .collect();
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
