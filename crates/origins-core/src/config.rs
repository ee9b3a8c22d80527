//! Configuration types for origins-search.
//!
//! [`Config::load`] reads `~/.config/origins-search/config.toml`, creating it
//! with hardcoded defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests). [`Config::load_from`] reads an explicit path, as passed with
//! `--config`.

use crate::query::{ParamStyle, QueryOptions};
use crate::render::RenderOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[neo4j]
host       = "localhost"
port       = 7474
path       = "/db/data/cypher"
timeout_ms = 10000

[search]
debounce_ms   = 200
default_page  = 1
default_limit = 100
node_label    = "Element"
param_style   = "legacy"
paginate      = false
escape_term   = false

[render]
escape_html = false

[ui]
theme    = "default"
show_uri = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub neo4j: Neo4jConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[neo4j]` section — where the Cypher endpoint lives.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_path")]
    pub path: String,
    /// 0 disables the timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_host() -> String { "localhost".to_string() }
fn default_port() -> u16 { 7474 }
fn default_path() -> String { "/db/data/cypher".to_string() }
fn default_timeout_ms() -> u64 { 10_000 }

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
            timeout_ms: default_timeout_ms(),
            username: None,
            password: None,
        }
    }
}

impl Neo4jConfig {
    /// Full endpoint URL, e.g. `http://localhost:7474/db/data/cypher`.
    pub fn endpoint(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!("http://{}:{}{}", self.host, self.port, path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Basic-auth credentials, only when both halves are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_page")]
    pub default_page: u64,
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    #[serde(default = "default_node_label")]
    pub node_label: String,
    #[serde(default)]
    pub param_style: ParamStyle,
    #[serde(default)]
    pub paginate: bool,
    #[serde(default)]
    pub escape_term: bool,
}

fn default_debounce_ms() -> u64 { 200 }
fn default_page() -> u64 { crate::types::DEFAULT_PAGE }
fn default_limit() -> u64 { crate::types::DEFAULT_LIMIT }
fn default_node_label() -> String { "Element".to_string() }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_page: default_page(),
            default_limit: default_limit(),
            node_label: default_node_label(),
            param_style: ParamStyle::default(),
            paginate: false,
            escape_term: false,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            node_label: self.node_label.clone(),
            param_style: self.param_style,
            paginate: self.paginate,
            escape_term: self.escape_term,
        }
    }
}

/// `[render]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub escape_html: bool,
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions { escape_html: self.escape_html }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_show_uri")]
    pub show_uri: bool,
}

fn default_theme() -> String { "default".to_string() }
fn default_show_uri() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_uri: default_show_uri(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/origins-search/config.toml`, layered on top of
    /// the built-in defaults. Creates the file with defaults if it does not
    /// exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Ok(Self::load_from(&path)?)
    }

    /// Load an explicit file layered on top of the built-in defaults. The
    /// file must exist.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_else(|_| Self::fallback())
    }

    /// Struct-level defaults, used only if the embedded TOML fails to parse.
    fn fallback() -> Self {
        Self {
            neo4j: Neo4jConfig::default(),
            search: SearchConfig::default(),
            render: RenderConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("origins-search")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.neo4j.endpoint(), "http://localhost:7474/db/data/cypher");
        assert_eq!(cfg.search.debounce(), Duration::from_millis(200));
        assert_eq!(cfg.search.default_limit, 100);
        assert!(!cfg.search.paginate);
        assert!(!cfg.render.escape_html);
        assert_eq!(cfg.ui.theme, "default");
    }

    #[test]
    fn defaults_match_struct_fallback() {
        let toml = Config::defaults();
        let structs = Config::fallback();
        assert_eq!(toml.neo4j.endpoint(), structs.neo4j.endpoint());
        assert_eq!(toml.search.query_options(), structs.search.query_options());
        assert_eq!(toml.search.debounce_ms, structs.search.debounce_ms);
    }

    #[test]
    fn user_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[neo4j]\nhost = \"graph.internal\"\nport = 7575\n\n[search]\npaginate = true\nparam_style = \"dollar\""
        )
        .unwrap();

        let cfg = Config::load_from(file.path()).unwrap();
        assert_eq!(cfg.neo4j.endpoint(), "http://graph.internal:7575/db/data/cypher");
        assert!(cfg.search.paginate);
        assert_eq!(cfg.search.param_style, ParamStyle::Dollar);
        // Untouched keys keep their defaults.
        assert_eq!(cfg.search.debounce_ms, 200);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn endpoint_adds_leading_slash() {
        let neo = Neo4jConfig { path: "db/data/cypher".into(), ..Neo4jConfig::default() };
        assert_eq!(neo.endpoint(), "http://localhost:7474/db/data/cypher");
    }

    #[test]
    fn zero_timeout_disables_it() {
        let neo = Neo4jConfig { timeout_ms: 0, ..Neo4jConfig::default() };
        assert_eq!(neo.timeout(), None);
    }

    #[test]
    fn credentials_need_both_halves() {
        let mut neo = Neo4jConfig { username: Some("neo4j".into()), ..Neo4jConfig::default() };
        assert_eq!(neo.credentials(), None);
        neo.password = Some("secret".into());
        assert_eq!(neo.credentials(), Some(("neo4j", "secret")));
    }
}
