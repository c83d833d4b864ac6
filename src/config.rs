// src/config.rs
use std::{env, net::SocketAddr, path::Path, str::FromStr, time::Duration};

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY not set in .env file.")]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// How the relay reports a failed provider call to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpstreamErrorMode {
    /// 200 with the error text as the reply.
    #[default]
    Embed,
    /// 502 with the error text as the reply.
    Status,
}

impl FromStr for UpstreamErrorMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embed" => Ok(Self::Embed),
            "status" => Ok(Self::Status),
            _ => Err(()),
        }
    }
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

// Keeps the key out of logs and panics.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub gemini: GeminiConfig,
    pub host: String,
    pub port: u16,
    pub upstream_errors: UpstreamErrorMode,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Fails when the credential is
    /// absent or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse("GEMINI_TIMEOUT_SECS", raw)?)),
            None => None,
        };

        let upstream_errors = match lookup("RELAY_UPSTREAM_ERRORS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "RELAY_UPSTREAM_ERRORS",
                value: raw,
            })?,
            None => UpstreamErrorMode::default(),
        };

        Ok(Self {
            gemini: GeminiConfig {
                api_key,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: lookup("GEMINI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout,
            },
            host: lookup("RELAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match lookup("PORT") {
                Some(raw) => parse("PORT", raw)?,
                None => 8000,
            },
            upstream_errors,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr(&self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub backend_url: String,
    pub host: String,
    pub port: u16,
    pub session_ttl: Duration,
}

impl UiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            backend_url,
            host: lookup("UI_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match lookup("UI_PORT") {
                Some(raw) => parse("UI_PORT", raw)?,
                None => 8501,
            },
            session_ttl: Duration::from_secs(match lookup("UI_SESSION_TTL_SECS") {
                Some(raw) => match parse("UI_SESSION_TTL_SECS", raw.clone())? {
                    // Zero would expire every transcript on the next sweep.
                    0 => {
                        return Err(ConfigError::Invalid {
                            key: "UI_SESSION_TTL_SECS",
                            value: raw,
                        });
                    }
                    secs => secs,
                },
                None => 3600,
            }),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr(&self.host, self.port)
    }
}

/// Loads `.env` from the working directory if present. A missing file is
/// fine; a malformed one is not.
pub fn load_dotenv() -> anyhow::Result<()> {
    let path = Path::new(".env");
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::info!("loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => {
            tracing::debug!("no .env at {}", path.display());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("malformed .env at {}: {}", path.display(), e)),
    }
}

fn parse<T: FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    format!("{host}:{port}")
        .parse()
        .map_err(|_| ConfigError::Invalid {
            key: "host",
            value: host.to_string(),
        })
}
