//! HTTP seam between the frontend and the REST backend.
//!
//! Everything that talks to the network goes through [`HttpTransport`], so
//! the lifecycle client can run against an in-memory double in tests.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;
use thiserror::Error;

use super::api_utils::ApiConfig;
use crate::system::auth::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with {status}")]
    Status { status: u16, body: String },

    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Sends one JSON request and returns the JSON response body.
///
/// An empty response body is returned as `Value::Null`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, HttpError>;
}

/// Browser transport built on `gloo-net`, authenticated with the stored bearer token.
#[derive(Debug, Clone)]
pub struct GlooTransport {
    config: ApiConfig,
}

impl GlooTransport {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    fn builder(&self, method: HttpMethod, url: &str) -> RequestBuilder {
        let builder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
        };
        match storage::get_access_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, HttpError> {
        let url = self.config.url(path);
        log::debug!("{} {}", method.as_str(), url);
        let builder = self.builder(method, &url);

        let response = match body {
            Some(body) => builder
                .json(&body)
                .map_err(|e| HttpError::Serialize(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status();
        let ok = response.ok();
        let text = response
            .text()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        if !ok {
            return Err(HttpError::Status { status, body: text });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| HttpError::Decode(e.to_string()))
    }
}
