//! origins-search TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

use std::sync::Arc;

pub use app::App;
use origins_core::config::Config;
use origins_cypher::{CypherClient, SearchWorker, WorkerOptions};

/// Start the TUI against the configured endpoint.
///
/// The event loop blocks the calling thread; search requests run on
/// `runtime`, so this must not be called from inside one of its workers.
pub fn run(config: Config, runtime: &tokio::runtime::Handle) -> anyhow::Result<()> {
    let _guard = runtime.enter();

    let client = CypherClient::new(&config.neo4j)?;
    tracing::info!(endpoint = %client.endpoint(), "starting TUI");

    let options = WorkerOptions {
        debounce: config.search.debounce(),
        query: config.search.query_options(),
    };
    let (worker, events) = SearchWorker::spawn(Arc::new(client), options);
    let theme = theme::Theme::by_name(&config.ui.theme);

    App::new(config, theme, worker, events).run()
}
