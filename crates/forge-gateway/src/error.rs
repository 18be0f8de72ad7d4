//! Gateway error type.

use serde_json::Value;

/// Failure modes of a backend invocation.
///
/// `Backend` is the interesting one: it carries the backend's own
/// structured error payload, unmodified, so callers can present it.
/// The gateway never reclassifies backend rejections.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// The backend rejected the command with a structured payload.
    #[error("backend rejected `{command}`: {payload}")]
    Backend { command: String, payload: Value },

    /// The fallback transport failed before a response was produced.
    #[error("transport failure invoking `{command}`")]
    Transport {
        command: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived but did not match the expected shape.
    #[error("could not decode response of `{command}`")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InvokeError {
    /// The command the failed invocation was for.
    pub fn command(&self) -> &str {
        match self {
            Self::Backend { command, .. }
            | Self::Transport { command, .. }
            | Self::Decode { command, .. } => command,
        }
    }
}
