//! The command invocation seam every component calls through.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::InvokeError;

/// Asynchronous command invocation.
///
/// Implementations must be `Send + Sync`: the invoker is shared across
/// concurrently loading routes.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Invoke `command` with optional JSON `args` and return the raw
    /// JSON result.
    async fn invoke_raw(&self, command: &str, args: Option<Value>) -> Result<Value, InvokeError>;
}

/// Invoke `command` and deserialize its result.
///
/// A `null` result deserializes into `Option::None` for optional
/// targets; a shape mismatch is reported as [`InvokeError::Decode`].
pub async fn invoke<T: DeserializeOwned>(
    invoker: &dyn Invoker,
    command: &str,
    args: Option<Value>,
) -> Result<T, InvokeError> {
    let value = invoker.invoke_raw(command, args).await?;
    serde_json::from_value(value).map_err(|source| InvokeError::Decode {
        command: command.to_string(),
        source,
    })
}
