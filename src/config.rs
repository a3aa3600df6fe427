//! Environment-driven configuration.
//!
//! Read once at startup; the resulting [`Config`] is immutable.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: bind port (default `8080`)
//! - `REDIS_URL`: Redis connection URL; when unset, the in-process
//!   [`MemoryCache`](crate::MemoryCache) is used instead
//! - `CACHE_ENABLED`: `true`/`1` or `false`/`0` (default true)
//! - `RUST_LOG`: tracing filter (e.g. `taskserve=debug`)

use std::net::SocketAddr;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Redis URL; `None` selects the in-process cache.
    pub redis_url: Option<String>,
    /// Whether the cache layer is consulted at all.
    pub cache_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            redis_url: None,
            cache_enabled: true,
        }
    }
}

impl Config {
    /// Builds a configuration from environment variables, falling back
    /// to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.port),
            redis_url: std::env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            cache_enabled: std::env::var("CACHE_ENABLED")
                .map(|raw| parse_bool(&raw))
                .unwrap_or(defaults.cache_enabled),
        }
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns the parse error when host/port do not form a valid
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.redis_url.is_none());
        assert!(config.cache_enabled);
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Config::default()
        };
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn bind_addr_rejects_invalid_host() {
        let config = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("banana"));
    }
}
