//! HTTP fallback transport.
//!
//! When no native bridge is available the same commands are served by a
//! local loopback HTTP backend: `POST /<command>` with the JSON args as
//! body. The status mapping is part of the backend contract:
//!
//! - 2xx ⇒ the parsed JSON body
//! - 404 ⇒ a successful `null` (absence is not an error)
//! - any other status ⇒ a rejection carrying the parsed JSON body

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::InvokeError;
use crate::invoker::Invoker;
use crate::DEFAULT_ENDPOINT;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    /// Create a gateway posting to `endpoint` (scheme + authority, no
    /// trailing path).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl Invoker for HttpGateway {
    async fn invoke_raw(&self, command: &str, args: Option<Value>) -> Result<Value, InvokeError> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), command);
        debug!("POST {url}");

        let mut request = self.client.post(&url);
        if let Some(args) = &args {
            request = request.json(args);
        }

        let response = request
            .send()
            .await
            .map_err(|source| InvokeError::Transport {
                command: command.to_string(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Value::Null);
        }
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|source| InvokeError::Transport {
                    command: command.to_string(),
                    source,
                });
        }

        let payload = response.json().await.unwrap_or(Value::Null);
        Err(InvokeError::Backend {
            command: command.to_string(),
            payload,
        })
    }
}
