//! Service settings read from `SEO_INSIGHTS_*` environment variables.

use std::collections::HashMap;
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "SEO_INSIGHTS_ADDR";
pub const MAX_BODY_VAR: &str = "SEO_INSIGHTS_MAX_BODY_BYTES";
pub const LOG_VAR: &str = "SEO_INSIGHTS_LOG";

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error)]
#[error("invalid {var} value {value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Same as [`Config::from_env`] over an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = |var: &str| {
            vars.get(var)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let addr = lookup(ADDR_VAR)
            .unwrap_or(DEFAULT_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError {
                var: ADDR_VAR,
                value: lookup(ADDR_VAR).unwrap_or_default().to_string(),
                reason: e.to_string(),
            })?;

        let max_body_bytes = match lookup(MAX_BODY_VAR) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError {
                        var: MAX_BODY_VAR,
                        value: raw.to_string(),
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(n) => n,
                Err(e) => {
                    return Err(ConfigError {
                        var: MAX_BODY_VAR,
                        value: raw.to_string(),
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let log_filter = lookup(LOG_VAR).unwrap_or(DEFAULT_LOG_FILTER).to_string();

        Ok(Self {
            addr,
            max_body_bytes,
            log_filter,
        })
    }
}
