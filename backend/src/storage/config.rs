//! Server configuration and environment variable handling.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_STATIC_DIR: &str = "stat";
pub const DEFAULT_FAVICON: &str = "favicon.ico";
pub const DEFAULT_HELP_PAGE: &str = "helpPage.md";
pub const DEFAULT_DATASET: &str = "demo.csv";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Flat directory holding datasets, dashboard configs and uploads
    pub data_dir: PathBuf,
    /// Directory served under `/stat`
    pub static_dir: PathBuf,
    pub favicon: PathBuf,
    /// Markdown source of the help page
    pub help_page: PathBuf,
    /// Dataset shown when no `d` parameter is given
    pub default_data: String,
    /// Fixed jitter seed; entropy-seeded when unset
    pub jitter_seed: Option<u64>,
    pub max_upload_bytes: usize,
    /// Idle time after which a dashboard session is dropped; 0 keeps sessions forever
    pub session_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            favicon: PathBuf::from(DEFAULT_FAVICON),
            help_page: PathBuf::from(DEFAULT_HELP_PAGE),
            default_data: DEFAULT_DATASET.to_string(),
            jitter_seed: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl ServerConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (default: 0.0.0.0)
    /// - `PORT` (default: 8080)
    /// - `DATA_DIR` (default: data)
    /// - `STATIC_DIR` (default: stat)
    /// - `FAVICON` (default: favicon.ico)
    /// - `HELP_PAGE` (default: helpPage.md)
    /// - `DEFAULT_DATA` (default: demo.csv)
    /// - `JITTER_SEED` (optional): unsigned integer
    /// - `MAX_UPLOAD_BYTES` (default: 52428800)
    /// - `SESSION_TTL_SECS` (default: 1800, 0 disables eviction)
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| format!("PORT must be a valid port number, got '{}'", p))?,
            None => defaults.port,
        };
        let jitter_seed = match var("JITTER_SEED") {
            Some(s) => Some(
                s.trim()
                    .parse()
                    .map_err(|_| format!("JITTER_SEED must be an unsigned integer, got '{}'", s))?,
            ),
            None => None,
        };
        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("MAX_UPLOAD_BYTES must be a byte count, got '{}'", s))?,
            None => defaults.max_upload_bytes,
        };
        let session_ttl_secs = match var("SESSION_TTL_SECS") {
            Some(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("SESSION_TTL_SECS must be a number of seconds, got '{}'", s))?,
            None => defaults.session_ttl_secs,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            data_dir: var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            favicon: var("FAVICON").map(PathBuf::from).unwrap_or(defaults.favicon),
            help_page: var("HELP_PAGE")
                .map(PathBuf::from)
                .unwrap_or(defaults.help_page),
            default_data: var("DEFAULT_DATA").unwrap_or(defaults.default_data),
            jitter_seed,
            max_upload_bytes,
            session_ttl_secs,
        })
    }

    /// Idle session lifetime, `None` when eviction is disabled.
    pub fn session_ttl(&self) -> Option<Duration> {
        (self.session_ttl_secs > 0).then(|| Duration::from_secs(self.session_ttl_secs))
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("invalid bind address {}:{}: {}", self.host, self.port, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("DATA_DIR", "/srv/data"),
            ("JITTER_SEED", "42"),
            ("DEFAULT_DATA", "other.csv"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.jitter_seed, Some(42));
        assert_eq!(config.default_data, "other.csv");
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.contains("PORT"));

        let err = ServerConfig::from_lookup(lookup(&[("JITTER_SEED", "-1")])).unwrap_err();
        assert!(err.contains("JITTER_SEED"));
    }

    #[test]
    fn test_session_ttl() {
        let config = ServerConfig::from_lookup(lookup(&[("SESSION_TTL_SECS", "90")])).unwrap();
        assert_eq!(config.session_ttl(), Some(Duration::from_secs(90)));

        let config = ServerConfig::from_lookup(lookup(&[("SESSION_TTL_SECS", "0")])).unwrap();
        assert_eq!(config.session_ttl(), None);

        let err = ServerConfig::from_lookup(lookup(&[("SESSION_TTL_SECS", "soon")])).unwrap_err();
        assert!(err.contains("SESSION_TTL_SECS"));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("HOST", "  ")])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
    }
}
