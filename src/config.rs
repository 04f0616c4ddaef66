//! Process configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set or is blank.
    #[error("missing required env var {var}")]
    Missing { var: String },

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    /// Whole-request limit. `None` lets a slow backend take as long as it needs.
    pub request_secs: Option<u64>,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the session API, without a trailing slash.
    pub server_endpoint: String,
    pub port: u16,
    pub timeouts: HttpTimeouts,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `SERVER_ENDPOINT`: base URL shared by `/api/sessions`, `/api/users` and `/api/me`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `HTTP_REQUEST_TIMEOUT_SECS`: unset means no request timeout
    /// - `HTTP_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `SERVER_ENDPOINT` is missing or not an http(s)
    /// URL, or when `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_endpoint = parse_endpoint(std::env::var("SERVER_ENDPOINT").ok().as_deref())?;
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let timeouts = HttpTimeouts {
            request_secs: env_parse_opt_u64("HTTP_REQUEST_TIMEOUT_SECS"),
            connect_secs: env_parse_u64("HTTP_CONNECT_TIMEOUT_SECS", DEFAULT_HTTP_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { server_endpoint, port, timeouts })
    }

    /// `POST` target for creating a session (login).
    #[must_use]
    pub fn sessions_url(&self) -> String {
        format!("{}/api/sessions", self.server_endpoint)
    }

    /// `POST` target for creating a user (registration).
    #[must_use]
    pub fn users_url(&self) -> String {
        format!("{}/api/users", self.server_endpoint)
    }

    /// `GET` target for the current session user.
    #[must_use]
    pub fn me_url(&self) -> String {
        format!("{}/api/me", self.server_endpoint)
    }
}

fn env_parse_opt_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<u64>().ok())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    env_parse_opt_u64(key).unwrap_or(default)
}

fn parse_endpoint(raw: Option<&str>) -> Result<String, ConfigError> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(ConfigError::Missing { var: "SERVER_ENDPOINT".into() });
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            var: "SERVER_ENDPOINT".into(),
            reason: format!("expected an http(s) URL, got '{value}'"),
        });
    }
    Ok(value.trim_end_matches('/').to_owned())
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid { var: "PORT".into(), reason: e.to_string() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
