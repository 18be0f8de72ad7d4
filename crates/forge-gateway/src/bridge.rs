//! Host-provided native command channel.

use async_trait::async_trait;
use serde_json::Value;

/// The in-process command channel a desktop host exposes to the client.
///
/// The transport itself lives in the host shell; the client only relies
/// on this contract: a JSON result on success, the host's structured
/// JSON error payload on rejection, both passed through unchanged.
#[async_trait]
pub trait NativeBridge: Send + Sync {
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value, Value>;
}
