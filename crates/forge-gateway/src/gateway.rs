//! Per-call transport selection.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::bridge::NativeBridge;
use crate::error::InvokeError;
use crate::http::HttpGateway;
use crate::invoker::Invoker;

/// The transport-selecting gateway the rest of the client talks to.
///
/// When the host exposes a native bridge every command goes through it;
/// otherwise the HTTP fallback serves the same commands. Callers cannot
/// observe which transport answered.
#[derive(Clone)]
pub struct Gateway {
    bridge: Option<Arc<dyn NativeBridge>>,
    fallback: HttpGateway,
}

impl Gateway {
    /// Gateway backed by a host-provided native bridge.
    pub fn with_bridge(bridge: Arc<dyn NativeBridge>) -> Self {
        Self {
            bridge: Some(bridge),
            fallback: HttpGateway::default(),
        }
    }

    /// Gateway using only the HTTP fallback at `endpoint`.
    pub fn http(endpoint: impl Into<String>) -> Self {
        Self {
            bridge: None,
            fallback: HttpGateway::new(endpoint),
        }
    }

    pub fn has_bridge(&self) -> bool {
        self.bridge.is_some()
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self {
            bridge: None,
            fallback: HttpGateway::default(),
        }
    }
}

#[async_trait]
impl Invoker for Gateway {
    async fn invoke_raw(&self, command: &str, args: Option<Value>) -> Result<Value, InvokeError> {
        match &self.bridge {
            Some(bridge) => {
                bridge
                    .invoke(command, args)
                    .await
                    .map_err(|payload| InvokeError::Backend {
                        command: command.to_string(),
                        payload,
                    })
            }
            None => self.fallback.invoke_raw(command, args).await,
        }
    }
}
