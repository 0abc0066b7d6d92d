//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{
    DEFAULT_BACKEND_TIMEOUT_SECONDS, DEFAULT_BACKEND_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the invoice backend, without trailing slash
    pub backend_url: String,
    pub backend_timeout_seconds: u64,
    pub server_host: String,
    pub server_port: u16,
    /// Browser origin allowed by CORS; cross-origin requests are refused when unset
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let backend_url = env::var("BACKEND_URL").unwrap_or_else(|_| {
            tracing::warn!(
                "BACKEND_URL not set, using development default {}",
                DEFAULT_BACKEND_URL
            );
            DEFAULT_BACKEND_URL.to_string()
        });

        Self {
            backend_url: normalize_base_url(&backend_url),
            backend_timeout_seconds: env::var("BACKEND_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECONDS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    /// Configuration pointing at a given backend, with defaults elsewhere.
    pub fn for_backend(backend_url: &str) -> Self {
        Self {
            backend_url: normalize_base_url(backend_url),
            backend_timeout_seconds: DEFAULT_BACKEND_TIMEOUT_SECONDS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cors_allowed_origin: None,
        }
    }

    /// Timeout applied to every backend request.
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_backend_strips_trailing_slash() {
        let config = Config::for_backend("https://invoices.example.com/ ");
        assert_eq!(config.backend_url, "https://invoices.example.com");
        assert_eq!(config.backend_timeout(), Duration::from_secs(30));
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }
}
