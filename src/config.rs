/*
 * Responsibility
 * - Read settings from the environment (.env is honoured via dotenvy)
 * - Validate them; anything unusable stops the process before it binds
 */
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderName;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub require_api_key: bool,
    /// Raw entries of `API_KEYS`; turned into digests by the auth factory.
    pub api_keys: Vec<String>,
    pub api_key_header: HeaderName,
    /// As written in the environment, used for usage hints.
    pub api_key_header_display: String,
    pub api_key_query_param: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("require_api_key", &self.require_api_key)
            .field("api_keys", &format_args!("[{} redacted]", self.api_keys.len()))
            .field("api_key_header", &self.api_key_header)
            .field("api_key_query_param", &self.api_key_query_param)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = match lookup("MCP_HOST") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("MCP_HOST"))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };

        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr = SocketAddr::new(host, port);

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = split_list(&lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        // Anything but an explicit "false" keeps the gate on.
        let require_api_key = !lookup("REQUIRE_API_KEY")
            .map(|v| v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(false);

        let api_keys = split_list(&lookup("API_KEYS").unwrap_or_default());

        let api_key_header_display = lookup("API_KEY_HEADER")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| "X-API-Key".to_string());
        let api_key_header = HeaderName::from_bytes(api_key_header_display.as_bytes())
            .map_err(|_| ConfigError::Invalid("API_KEY_HEADER"))?;

        let api_key_query_param = lookup("API_KEY_QUERY_PARAM")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| "api_key".to_string());
        if api_key_query_param.is_empty() {
            return Err(ConfigError::Invalid("API_KEY_QUERY_PARAM"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            require_api_key,
            api_keys,
            api_key_header,
            api_key_header_display,
            api_key_query_param,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
