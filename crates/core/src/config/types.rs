use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    7860
}

/// Upstream catalog site configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Catalog site base URL, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Host substring identifying download-mirror links on play pages.
    #[serde(default = "default_download_host")]
    pub download_host: String,
    /// Search query applied when the caller sends none.
    #[serde(default = "default_query")]
    pub default_query: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            download_host: default_download_host(),
            default_query: default_query(),
        }
    }
}

fn default_base_url() -> String {
    "https://animepahe.ru".to_string()
}

fn default_download_host() -> String {
    "pahe.win".to_string()
}

fn default_query() -> String {
    "Naruto".to_string()
}

/// Rendering collaborator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    /// Run the browser headless (default: true).
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Maximum concurrent browser sessions. Each public operation owns one
    /// session exclusively, so this bounds request concurrency.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Navigation / readiness-wait timeout in seconds.
    #[serde(default = "default_navigation_timeout")]
    pub navigation_timeout_secs: u64,
    /// Fixed settle delay after loading a play page, waiting for the
    /// player's asynchronous stream negotiation.
    #[serde(default = "default_player_settle")]
    pub player_settle_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            max_sessions: default_max_sessions(),
            navigation_timeout_secs: default_navigation_timeout(),
            player_settle_secs: default_player_settle(),
        }
    }
}

fn default_headless() -> bool {
    true
}

fn default_max_sessions() -> usize {
    4
}

fn default_navigation_timeout() -> u64 {
    30
}

fn default_player_settle() -> u64 {
    5
}
