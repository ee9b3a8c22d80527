use std::io::Write;

use clap::Parser;
use origins_core::config::Config;
use origins_search::{cli::Cli, headless};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/origins-search-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("origins-search debug log started — tail -f /tmp/origins-search-debug.log");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load config file, using defaults");
            Config::defaults()
        }),
    };
    cli.apply_overrides(&mut config);

    let runtime = tokio::runtime::Runtime::new()?;

    if cli.headless {
        let request = cli.request(&config);
        let lines = runtime.block_on(headless::run(&config, &request, cli.format))?;
        let mut out = std::io::stdout().lock();
        for line in lines {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    }

    origins_tui::run(config, runtime.handle())
}
