//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, fires the initial unparameterized
//! search, drives the crossterm event loop, and tears everything down
//! cleanly on exit or panic.
//!
//! State changes never talk to the worker directly: they queue a
//! [`Dispatch`] in [`AppState::outbox`], which the loop hands to the
//! [`SearchWorker`] after each event. That keeps [`AppState`] testable
//! without a runtime.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        result_list::{ResultList, ResultListState},
        search_bar::{SearchBar, SearchBarState},
        status_bar::{SearchStatus, StatusBar},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use origins_core::{config::Config, SearchRequest};
use origins_cypher::{SearchEvent, SearchWorker};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Focus + dispatch types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Results,
    Search,
    /// Vim-style `:` command line is active.
    Command,
}

/// A search the state wants sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Through the debounce window (keystrokes).
    Debounced(SearchRequest),
    /// Straight away (initial load, pager, commands).
    Immediate(SearchRequest),
    /// Turn SKIP/LIMIT on or off for later requests.
    Paginate(bool),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub search: SearchBarState,
    pub results: ResultListState,
    pub page: u64,
    pub limit: u64,
    /// Whether page/limit reach the server.
    pub paginate: bool,
    pub status: SearchStatus,
    /// Highest sequence number seen in a `Started` event.
    pub latest_started: u64,
    pub endpoint: String,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub outbox: Vec<Dispatch>,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self {
            focus: Focus::Search,
            prev_focus: Focus::Search,
            search: SearchBarState::default(),
            results: ResultListState::new(config.ui.show_uri),
            page: config.search.default_page.max(1),
            limit: config.search.default_limit.max(1),
            paginate: config.search.paginate,
            status: SearchStatus::Idle,
            latest_started: 0,
            endpoint: config.neo4j.endpoint(),
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            outbox: Vec::new(),
            quit: false,
        }
    }

    /// The request matching what is on screen right now.
    pub fn current_request(&self) -> SearchRequest {
        let term = Some(self.search.input.clone()).filter(|t| !t.trim().is_empty());
        SearchRequest::new(term, Some(self.page), Some(self.limit))
    }

    /// Queue the unparameterized startup search.
    pub fn initial_load(&mut self) {
        let request = SearchRequest::new(None, Some(self.page), Some(self.limit));
        tracing::debug!("initial load");
        self.outbox.push(Dispatch::Immediate(request));
    }

    pub fn search_now(&mut self) {
        let request = self.current_request();
        self.outbox.push(Dispatch::Immediate(request));
    }

    pub fn search_debounced(&mut self) {
        let request = self.current_request();
        self.outbox.push(Dispatch::Debounced(request));
    }

    /// Fold a worker event into the state.
    pub fn apply(&mut self, event: SearchEvent) {
        tracing::debug!(seq = event.seq(), "search event");
        match event {
            SearchEvent::Started { seq, .. } => {
                self.latest_started = self.latest_started.max(seq);
                self.status = SearchStatus::Searching;
            }
            SearchEvent::Completed(set) => {
                let seq = set.seq;
                let rows = set.len();
                let at = set.received_at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string();
                if self.results.apply(set) && seq >= self.latest_started {
                    self.status = SearchStatus::Done { rows, at };
                }
            }
            SearchEvent::Failed { seq, error, .. } => {
                tracing::warn!(seq, %error, "search failed; keeping previous results");
                self.results.settled = true;
                if seq > self.results.applied_seq && seq >= self.latest_started {
                    self.status = SearchStatus::Failed(error.to_string());
                }
            }
        }
    }

    fn pager_label(&self) -> String {
        if self.paginate {
            format!("page {} · {}/pg", self.page, self.limit)
        } else {
            "pager off".to_string()
        }
    }

    /// Route one semantic event.
    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_mode(event);
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Escape if self.focus == Focus::Search => {
                tracing::debug!("focus: Search -> Results");
                self.focus = Focus::Results;
            }

            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Results => Focus::Search,
                    Focus::Search | Focus::Command => Focus::Results,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::SearchFocus => {
                tracing::debug!("focus -> Search");
                self.focus = Focus::Search;
            }

            // Enter in the search bar moves to the results.
            AppEvent::Enter if self.focus == Focus::Search => {
                self.focus = Focus::Results;
            }

            AppEvent::PageNext | AppEvent::PagePrevious => self.turn_page(&event),

            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    fn handle_command_mode(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.clone();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        if let Err(msg) = execute_command(self, cmd) {
                            self.focus = Focus::Command;
                            self.command_bar.error = Some(msg);
                        }
                    }
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => {
                        self.command_bar.error = Some(msg);
                    }
                }
            }
            AppEvent::Quit => self.quit = true,
            other => self.command_bar.handle(&other),
        }
    }

    fn turn_page(&mut self, event: &AppEvent) {
        if !self.paginate {
            tracing::debug!("pager ignored: pagination off");
            return;
        }
        let page = match event {
            AppEvent::PageNext => self.page.saturating_add(1),
            _ => self.page.saturating_sub(1).max(1),
        };
        if page != self.page {
            tracing::debug!(from = self.page, to = page, "pager");
            self.page = page;
            self.search_now();
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Results => self.results.handle(&event),
            Focus::Search => {
                let before = self.search.input.clone();
                if self.search.handle(&event) {
                    if self.search.input != before {
                        self.page = 1;
                    }
                    self.search_debounced();
                }
            }
            Focus::Command => {}
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    worker: SearchWorker,
    events: mpsc::UnboundedReceiver<SearchEvent>,
}

impl App {
    pub fn new(
        config: Config,
        theme: Theme,
        worker: SearchWorker,
        events: mpsc::UnboundedReceiver<SearchEvent>,
    ) -> Self {
        App {
            state: AppState::new(config, theme),
            worker,
            events,
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.state.initial_load();
        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        self.worker.shutdown();
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.flush_outbox();

            while let Ok(ev) = self.events.try_recv() {
                self.state.apply(ev);
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn flush_outbox(&mut self) {
        for dispatch in self.state.outbox.drain(..) {
            match dispatch {
                Dispatch::Debounced(request) => self.worker.submit(request),
                Dispatch::Immediate(request) => self.worker.submit_now(request),
                Dispatch::Paginate(on) => self.worker.set_paginate(on),
            }
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line status bar | results | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(
        StatusBar::new(&state.endpoint, &state.status, &state.theme),
        vert[0],
    );
    frame.render_widget(
        ResultList::new(&state.results, state.focus == Focus::Results, &state.theme),
        vert[1],
    );
    frame.render_widget(
        SearchBar::new(
            &state.search,
            state.pager_label(),
            state.focus == Focus::Search,
            &state.theme,
        ),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Search {
        let bar = SearchBar::new(&state.search, String::new(), true, &state.theme);
        frame.set_cursor_position(bar.cursor_position(vert[2]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
