use std::env;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_ENVIRONMENT: &str = "local";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub environment: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_url: env::var("API_URL").unwrap_or_else(|_| {
                warn!("API_URL not set, using {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            }),
            environment: env::var("APP_ENVIRONMENT").unwrap_or_else(|_| {
                warn!("APP_ENVIRONMENT not set, using {}", DEFAULT_ENVIRONMENT);
                DEFAULT_ENVIRONMENT.to_string()
            }),
        };

        if !config.is_known_environment() {
            warn!(
                "Unrecognized APP_ENVIRONMENT '{}', expected local, staging, or production",
                config.environment
            );
        }

        config
    }

    /// Config pointed at an explicit base URL, used by tests and tools.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }

    pub fn is_known_environment(&self) -> bool {
        matches!(self.environment.as_str(), "local" | "staging" | "production")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
