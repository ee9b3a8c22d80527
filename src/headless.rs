//! Headless mode — one search, rendered to lines, no terminal UI.

use origins_core::config::Config;
use origins_core::render::{render_lines, OutputFormat};
use origins_core::{build_query, ResultRecord, SearchError, SearchRequest};
use origins_cypher::CypherClient;

/// Send `request` once and return the decoded records.
pub async fn search_once(
    config: &Config,
    request: &SearchRequest,
) -> Result<Vec<ResultRecord>, SearchError> {
    let client = CypherClient::new(&config.neo4j)?;
    let query = build_query(request, &config.search.query_options());
    tracing::debug!(endpoint = %client.endpoint(), query = %query.query, "headless search");
    client.execute(&query).await
}

/// Search and render in `format`. Any failure is returned so the binary can
/// exit non-zero.
pub async fn run(
    config: &Config,
    request: &SearchRequest,
    format: OutputFormat,
) -> anyhow::Result<Vec<String>> {
    let records = search_once(config, request).await?;
    Ok(render_lines(&records, format, config.render.options())?)
}
