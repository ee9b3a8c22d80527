//! Command-line interface. Flags override values from the config file.

use std::path::PathBuf;

use clap::Parser;
use origins_core::config::Config;
use origins_core::render::OutputFormat;
use origins_core::SearchRequest;

#[derive(Debug, Parser)]
#[command(name = "origins-search", about = "Search an origins graph served by Neo4j")]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/origins-search/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Neo4j host (overrides [neo4j].host).
    #[arg(long)]
    pub host: Option<String>,

    /// Neo4j HTTP port (overrides [neo4j].port).
    #[arg(long)]
    pub port: Option<u16>,

    /// Write debug logs to /tmp/origins-search-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,

    /// Run one search, print the results and exit instead of starting the TUI.
    #[arg(long)]
    pub headless: bool,

    /// Search term for headless mode. Omit to list everything.
    #[arg(long, short = 'q', requires = "headless")]
    pub query: Option<String>,

    /// Page to fetch (only sent when pagination is enabled).
    #[arg(long)]
    pub page: Option<u64>,

    /// Rows per page (only sent when pagination is enabled).
    #[arg(long)]
    pub limit: Option<u64>,

    /// Send SKIP/LIMIT with the query (overrides [search].paginate).
    #[arg(long)]
    pub paginate: bool,

    /// Headless output format: html, text or json.
    #[arg(long, default_value = "html")]
    pub format: OutputFormat,
}

impl Cli {
    /// Fold flag overrides into a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.neo4j.host = host.clone();
        }
        if let Some(port) = self.port {
            config.neo4j.port = port;
        }
        if let Some(page) = self.page {
            config.search.default_page = page.max(1);
        }
        if let Some(limit) = self.limit {
            config.search.default_limit = limit.max(1);
        }
        if self.paginate {
            config.search.paginate = true;
        }
    }

    /// The single request headless mode sends.
    pub fn request(&self, config: &Config) -> SearchRequest {
        SearchRequest::new(
            self.query.clone(),
            Some(config.search.default_page),
            Some(config.search.default_limit),
        )
    }
}
