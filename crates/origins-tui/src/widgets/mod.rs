//! Ratatui widgets for the origins-search TUI.

pub mod command_bar;
pub mod help;
pub mod result_list;
pub mod search_bar;
pub mod status_bar;
