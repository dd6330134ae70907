//! Server configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `LISTEN_ADDR` | `0.0.0.0:8000` |
//! | `SURREAL_URL` | `127.0.0.1:8000` |
//! | `SURREAL_NAMESPACE` | `design_storage` |
//! | `SURREAL_DATABASE` | `main` |
//! | `SURREAL_USERNAME` / `SURREAL_PASSWORD` | `root` / `root` |
//! | `JWT_PUBLIC_KEY` or `JWT_PUBLIC_KEY_FILE` | required |
//! | `JWT_ALGORITHM` | `RS512` |
//! | `JWT_ISSUER` | unset (any issuer) |
//! | `JWT_REQUIRE_EXP` | `false` |
//! | `JWT_LEEWAY_SECS` | `60` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use design_storage_auth::AuthConfig;
use design_storage_db::DbConfig;
use jsonwebtoken::Algorithm;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid("LISTEN_ADDR", e))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8000)),
        };

        let defaults = DbConfig::default();
        let db = DbConfig {
            url: lookup("SURREAL_URL").unwrap_or(defaults.url),
            namespace: lookup("SURREAL_NAMESPACE").unwrap_or(defaults.namespace),
            database: lookup("SURREAL_DATABASE").unwrap_or(defaults.database),
            username: lookup("SURREAL_USERNAME").unwrap_or(defaults.username),
            password: lookup("SURREAL_PASSWORD").unwrap_or(defaults.password),
        };

        let jwt_public_key_pem = match (lookup("JWT_PUBLIC_KEY"), lookup("JWT_PUBLIC_KEY_FILE")) {
            (Some(pem), _) => pem,
            (None, Some(path)) => {
                std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.into(),
                    source,
                })?
            }
            (None, None) => return Err(ConfigError::Missing("JWT_PUBLIC_KEY")),
        };

        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            jwt_public_key_pem,
            jwt_algorithm: match lookup("JWT_ALGORITHM") {
                Some(raw) => Algorithm::from_str(&raw)
                    .map_err(|e| ConfigError::invalid("JWT_ALGORITHM", e))?,
                None => defaults.jwt_algorithm,
            },
            jwt_issuer: lookup("JWT_ISSUER").filter(|s| !s.is_empty()),
            require_expiry: match lookup("JWT_REQUIRE_EXP") {
                Some(raw) => parse_bool(&raw)
                    .ok_or_else(|| ConfigError::invalid("JWT_REQUIRE_EXP", "expected bool"))?,
                None => defaults.require_expiry,
            },
            leeway_secs: match lookup("JWT_LEEWAY_SECS") {
                Some(raw) => raw
                    .parse()
                    .map_err(|e| ConfigError::invalid("JWT_LEEWAY_SECS", e))?,
                None => defaults.leeway_secs,
            },
        };

        Ok(Self {
            listen_addr,
            db,
            auth,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
