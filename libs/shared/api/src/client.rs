use reqwest::{header::CONTENT_TYPE, Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// HTTP client for the dentistry REST API.
///
/// Every call takes a [`CancellationToken`]; a request cancelled mid-flight
/// resolves to [`ApiError::Cancelled`], which callers treat as "discard the
/// result". Cancelled work must never write into state owned by a newer
/// request.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(payload) = body {
            req = req.json(payload);
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("request cancelled before response: {}", url);
                return Err(ApiError::Cancelled);
            }
            result = req.send() => {
                result.map_err(|e| ApiError::Network(e.to_string()))?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body_text = tokio::select! {
                _ = cancel.cancelled() => return Err(ApiError::Cancelled),
                result = response.text() => result.unwrap_or_default(),
            };
            error!("API error ({}): {}", status, body_text);
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let data = tokio::select! {
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            result = response.json::<T>() => {
                result.map_err(|e| ApiError::Network(format!("invalid response body: {}", e)))?
            }
        };

        Ok(data)
    }

    pub async fn get<T>(&self, path: &str, cancel: &CancellationToken) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request::<T, ()>(Method::GET, path, None, cancel).await
    }

    pub async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        self.request(Method::POST, path, Some(body), cancel).await
    }

    pub async fn put<T, B>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        self.request(Method::PUT, path, Some(body), cancel).await
    }

    /// Connectivity probe against the API's health endpoint.
    pub async fn check_health(&self, cancel: &CancellationToken) -> Result<HealthStatus, ApiError> {
        self.get("/health", cancel).await
    }
}
