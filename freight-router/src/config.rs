//! Process configuration for the binaries, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::planner::SearchConfig;

/// Feed file path.
pub const DATA_VAR: &str = "FREIGHT_DATA";
/// Listen address for the HTTP server.
pub const ADDR_VAR: &str = "FREIGHT_ADDR";
/// Hop bound override for the connectivity pruner.
pub const MAX_HOPS_VAR: &str = "FREIGHT_MAX_HOPS";

const DEFAULT_DATA: &str = "data/freight.json";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration shared by the server and the CLI.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub addr: SocketAddr,
    pub search: SearchConfig,
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Unset or blank variables fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let data_path = get(DATA_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA));

        let addr = match get(ADDR_VAR) {
            Some(value) => value.trim().parse::<SocketAddr>().map_err(|e| {
                ConfigError::Invalid {
                    var: ADDR_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => default_addr(),
        };

        let mut search = SearchConfig::default();
        if let Some(value) = get(MAX_HOPS_VAR) {
            search.max_hops = value.trim().parse::<usize>().map_err(|e| {
                ConfigError::Invalid {
                    var: MAX_HOPS_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(Self {
            data_path,
            addr,
            search,
            cache: CacheConfig::default(),
        })
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA),
            addr: default_addr(),
            search: SearchConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/freight.json"));
        assert_eq!(config.addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.search.max_hops, 4);
    }

    #[test]
    fn default_impl_matches_empty_environment() {
        let config = ServerConfig::default();
        assert_eq!(config.addr, from_pairs(&[]).unwrap().addr);
    }

    #[test]
    fn overrides_from_environment() {
        let config = from_pairs(&[
            ("FREIGHT_DATA", "/srv/feed.json"),
            ("FREIGHT_ADDR", "0.0.0.0:8080"),
            ("FREIGHT_MAX_HOPS", " 6 "),
        ])
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/feed.json"));
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.search.max_hops, 6);
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = from_pairs(&[("FREIGHT_MAX_HOPS", "  ")]).unwrap();
        assert_eq!(config.search.max_hops, 4);
    }

    #[test]
    fn invalid_hops_names_the_variable() {
        let err = from_pairs(&[("FREIGHT_MAX_HOPS", "many")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FREIGHT_MAX_HOPS", .. }));
        assert!(err.to_string().contains("FREIGHT_MAX_HOPS"));
    }

    #[test]
    fn invalid_address_is_rejected() {
        let err = from_pairs(&[("FREIGHT_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FREIGHT_ADDR", .. }));
    }
}
