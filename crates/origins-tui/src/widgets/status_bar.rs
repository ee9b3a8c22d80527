//! Status bar — the 1-line strip at the top of the screen.
//!
//! Shows the endpoint, the state of the last search (in flight, result
//! count and time, or the last error) and keybinding hints on the right.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// What the status bar reports about searching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    /// At least one request newer than the applied results is in flight.
    Searching,
    /// Results on screen: row count and receive time.
    Done { rows: usize, at: String },
    /// The newest request failed; the previous results are still shown.
    Failed(String),
}

pub struct StatusBar<'a> {
    endpoint: &'a str,
    status: &'a SearchStatus,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(endpoint: &'a str, status: &'a SearchStatus, theme: &'a Theme) -> Self {
        Self { endpoint, status, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" origins ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("{} ", self.endpoint), self.theme.status_normal),
        ];

        match self.status {
            SearchStatus::Idle => {}
            SearchStatus::Searching => {
                spans.push(Span::styled("· searching… ", self.theme.status_busy));
            }
            SearchStatus::Done { rows, at } => {
                let noun = if *rows == 1 { "result" } else { "results" };
                spans.push(Span::styled(
                    format!("· {rows} {noun} at {at} "),
                    self.theme.status_normal,
                ));
            }
            SearchStatus::Failed(msg) => {
                spans.push(Span::styled(format!("· {msg} "), self.theme.status_error));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);

        let hint = " q:quit  /:search  ?:help ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
