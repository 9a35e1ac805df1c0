use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{GenerateRequest, GenerateResponse};
use tracing::{debug, info};
use url::Url;

pub mod config;
pub mod error;

pub use error::{FailureKind, GenerationError, GENERIC_FAILURE_MESSAGE};

/// Turns a prepared request into email text.
#[async_trait]
pub trait EmailGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GenerationError>;
}

/// Generator backed by the remote `POST /api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmailGenerator {
    http: Client,
    endpoint: Url,
}

impl HttpEmailGenerator {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn with_timeout(endpoint: Url, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
        })
    }

    pub fn from_settings(settings: &config::Settings) -> anyhow::Result<Self> {
        let endpoint = config::prepare_endpoint(&settings.endpoint)?;
        Self::with_timeout(endpoint, settings.request_timeout())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl EmailGenerator for HttpEmailGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, GenerationError> {
        info!(endpoint = %self.endpoint, "requesting email generation");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(GenerationError::Transport)?;
        debug!(status = status.as_u16(), bytes = body.len(), "generation response received");

        interpret_response(status, &body)
    }
}

/// The body is parsed whatever the status; an `email` field wins over the status code.
///
/// Only a JSON object is accepted; arrays would otherwise bind fields by position.
fn interpret_response(status: reqwest::StatusCode, body: &[u8]) -> Result<String, GenerationError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(GenerationError::Decode)?;
    if !value.is_object() {
        return Err(GenerationError::Decode(serde::de::Error::custom(
            "generation response is not a JSON object",
        )));
    }
    let parsed: GenerateResponse =
        serde_json::from_value(value).map_err(GenerationError::Decode)?;
    match parsed.email {
        Some(email) => Ok(email),
        None if !status.is_success() => Err(GenerationError::Status {
            status: status.as_u16(),
        }),
        None => Err(GenerationError::MissingEmail),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
