//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `FUNDBOOK_HTTP_BIND` | `127.0.0.1:8080` |
//! | `FUNDBOOK_BASE_PATH` | `/api` |
//! | `FUNDBOOK_DB_PATH` | unset: in-memory store |
//! | `FUNDBOOK_LOG_LEVEL` | `debug` (debug build) / `info` (release) |
//! | `FUNDBOOK_LOG_DIR` | unset: stderr |
//! | `FUNDBOOK_SEED_FUNDS` | unset: no funds |

use fundbook_core::{default_log_level, LogTarget};
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_VAR: &str = "FUNDBOOK_HTTP_BIND";
pub const BASE_PATH_VAR: &str = "FUNDBOOK_BASE_PATH";
pub const DB_PATH_VAR: &str = "FUNDBOOK_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "FUNDBOOK_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "FUNDBOOK_LOG_DIR";
pub const SEED_FUNDS_VAR: &str = "FUNDBOOK_SEED_FUNDS";

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_BASE_PATH: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Normalized: `""` or `/segment[/segment]` without trailing slash.
    pub base_path: String,
    /// `None` runs against a fresh in-memory store.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    pub log_target: LogTarget,
    pub seed_funds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBind { value: String, reason: String },
    InvalidBasePath(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBind { value, reason } => {
                write!(f, "{BIND_VAR}=`{value}` is not a socket address: {reason}")
            }
            Self::InvalidBasePath(value) => {
                write!(f, "{BASE_PATH_VAR}=`{value}` must not contain whitespace or `:`")
            }
            Self::InvalidLogDir(reason) => write!(f, "{LOG_DIR_VAR}: {reason}"),
        }
    }
}

impl Error for ConfigError {}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_text = get(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidBind {
                value: bind_text.clone(),
                reason: err.to_string(),
            })?;

        let base_path = match lookup(BASE_PATH_VAR) {
            Some(raw) => normalize_base_path(&raw)?,
            None => DEFAULT_BASE_PATH.to_string(),
        };

        let log_target = match get(LOG_DIR_VAR) {
            Some(dir) => LogTarget::directory(&dir).map_err(ConfigError::InvalidLogDir)?,
            None => LogTarget::Stderr,
        };

        let seed_funds = get(SEED_FUNDS_VAR)
            .map(|names| {
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind,
            base_path,
            db_path: get(DB_PATH_VAR).map(PathBuf::from),
            log_level: get(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_target,
            seed_funds,
        })
    }
}

/// `api/` → `/api`, `/` or blank → `""`.
fn normalize_base_path(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.chars().any(|c| c.is_whitespace() || c == ':') {
        return Err(ConfigError::InvalidBasePath(raw.to_string()));
    }
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("/{trimmed}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.base_path, "/api");
        assert_eq!(config.db_path, None);
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_target, LogTarget::Stderr);
        assert!(config.seed_funds.is_empty());
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = config_from(&[
            (BIND_VAR, "0.0.0.0:9000"),
            (BASE_PATH_VAR, "v1/"),
            (DB_PATH_VAR, "/var/lib/fundbook.db"),
            (LOG_LEVEL_VAR, "warn"),
            (LOG_DIR_VAR, "/var/log/fundbook"),
            (SEED_FUNDS_VAR, "Growth, Income,, "),
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.base_path, "/v1");
        assert_eq!(config.db_path, Some(PathBuf::from("/var/lib/fundbook.db")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(
            config.log_target,
            LogTarget::Directory(PathBuf::from("/var/log/fundbook"))
        );
        assert_eq!(config.seed_funds, vec!["Growth", "Income"]);
    }

    #[test]
    fn root_base_path_means_no_prefix() {
        assert_eq!(config_from(&[(BASE_PATH_VAR, "/")]).unwrap().base_path, "");
        assert_eq!(config_from(&[(BASE_PATH_VAR, "")]).unwrap().base_path, "");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[(BIND_VAR, "localhost")]),
            Err(ConfigError::InvalidBind { .. })
        ));
        assert!(matches!(
            config_from(&[(BASE_PATH_VAR, "/a b")]),
            Err(ConfigError::InvalidBasePath(_))
        ));
        assert!(matches!(
            config_from(&[(LOG_DIR_VAR, "relative/logs")]),
            Err(ConfigError::InvalidLogDir(_))
        ));
    }
}
