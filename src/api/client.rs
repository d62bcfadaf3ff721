//! HTTP client for the broadcast server REST surface

use reqwest::{header::{HeaderMap, HeaderValue, ACCEPT}, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::url::EndpointResolver;
use crate::config::Settings;
use crate::error::{AppError, Result};

/// Typed client for `/api/*`. Area-specific operations live in the sibling modules.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: EndpointResolver,
}

impl ApiClient {
    /// Create a client from console settings
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_base_url(&settings.server.base_url, settings.request_timeout())
    }

    /// Create a client for an explicit base URL
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoints: EndpointResolver::new(base_url)?,
        })
    }

    pub fn endpoints(&self) -> &EndpointResolver {
        &self.endpoints
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoints.http(path);
        debug!(method = "GET", url = %url, "Sending request");
        let response = self.send(self.client.get(&url)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoints.http(path);
        debug!(method = "POST", url = %url, "Sending request");
        let response = self.send(self.client.post(&url).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoints.http(path);
        debug!(method = "POST", url = %url, "Sending request");
        let response = self.send(self.client.post(&url)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoints.http(path);
        debug!(method = "PUT", url = %url, "Sending request");
        let response = self.send(self.client.put(&url).json(body)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoints.http(path);
        debug!(method = "DELETE", url = %url, "Sending request");
        let response = self.send(self.client.delete(&url)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.endpoints.http(path);
        debug!(method = "POST", url = %url, "Sending multipart request");
        let response = self.send(self.client.post(&url).multipart(form)).await?;
        Self::decode(response).await
    }

    /// Send a request and turn any non-2xx status into `AppError::Api`
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        warn!(status = %status, message = %message, "Server rejected request");

        Err(AppError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

/// Pull a human-readable message out of an error body.
///
/// The server answers with `{"error": "..."}`, `{"detail": "..."}` (validation
/// errors carry a list under `detail`) or `{"message": "..."}`; anything else is
/// returned as trimmed text.
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    for key in ["error", "detail", "message"] {
        match value.get(key) {
            Some(Value::String(text)) => return Some(text.clone()),
            Some(Value::Array(entries)) => {
                let joined = entries
                    .iter()
                    .map(|entry| {
                        entry
                            .get("msg")
                            .and_then(Value::as_str)
                            .map(String::from)
                            .unwrap_or_else(|| entry.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                return Some(joined);
            }
            Some(Value::Null) | None => continue,
            Some(other) => return Some(other.to_string()),
        }
    }

    Some(trimmed.to_string())
}
