use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub unix_socket: Option<PathBuf>,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
    /// Requests served at once; extra requests are answered with 503
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Upper bound on simultaneously open pages
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Seconds a page may sit idle before it is discarded
    #[serde(default = "default_page_timeout")]
    pub page_timeout: i64,
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,
    #[serde(default = "default_roster_capacity")]
    pub roster_capacity: usize,
    /// Registrations accepted before `/register` starts refusing
    #[serde(default = "default_max_registrations")]
    pub max_registrations: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DirectoryConfig {
    /// TOML file with `[[alumni]]` entries; the built-in list is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// JSON log file; stdout when unset
    pub path: Option<PathBuf>,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            page_timeout: default_page_timeout(),
            cleanup_interval: default_cleanup_interval(),
            roster_capacity: default_roster_capacity(),
            max_registrations: default_max_registrations(),
        }
    }
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_max_connections() -> usize {
    10000
}

fn default_max_pages() -> usize {
    10_000
}

fn default_page_timeout() -> i64 {
    1800 // 30 minutes
}

fn default_cleanup_interval() -> u64 {
    300 // 5 minutes
}

fn default_roster_capacity() -> usize {
    1024
}

fn default_max_registrations() -> usize {
    100_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port.is_none() && self.server.unix_socket.is_none() {
            bail!("Either port or unix_socket must be specified in server config");
        }

        if let Some(port) = self.server.port {
            if port == 0 {
                bail!("Server port must be greater than 0");
            }
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.server.max_connections == 0 {
            bail!("max_connections must be greater than 0");
        }

        if self.server.max_connections > Semaphore::MAX_PERMITS {
            bail!(
                "max_connections must be at most {}",
                Semaphore::MAX_PERMITS
            );
        }

        if self.portal.max_pages == 0 {
            bail!("max_pages must be greater than 0");
        }

        if self.portal.max_registrations == 0 {
            bail!("max_registrations must be greater than 0");
        }

        if self.portal.cleanup_interval == 0 {
            bail!("cleanup_interval must be greater than 0");
        }

        if self.portal.page_timeout <= self.portal.cleanup_interval as i64 {
            bail!(
                "page_timeout ({}) must be greater than cleanup_interval ({})",
                self.portal.page_timeout,
                self.portal.cleanup_interval
            );
        }

        if self.admin.api_key.is_empty() {
            bail!("api_key must not be empty");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
