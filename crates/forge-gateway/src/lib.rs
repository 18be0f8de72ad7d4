//! Uniform backend command invocation
//!
//! Every backend interaction in the client goes through one asynchronous
//! call shape: a command name plus optional JSON args, answered by a JSON
//! value. Which transport serves the call is a per-call strategy choice
//! the caller never sees:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Invoker trait                   │
//! │  - invoke_raw(command, args) -> Value           │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │  NativeBridge   │         │     HttpGateway     │
//! │  (host channel) │         │  (loopback POST)    │
//! └─────────────────┘         └─────────────────────┘
//!                 ▲                     ▲
//!                 └──────┬──────────────┘
//!                 ┌──────┴───────┐
//!                 │   Gateway    │  bridge when present,
//!                 │  (strategy)  │  HTTP otherwise
//!                 └──────────────┘
//! ```
//!
//! Error semantics are part of the contract: backend rejections carry the
//! backend's structured JSON payload unmodified, an HTTP 404 is a
//! successful `null` (absence is not an error), and the gateway never
//! retries or times out — both are the caller's responsibility.

pub mod bridge;
pub mod error;
pub mod gateway;
pub mod http;
pub mod invoker;

/// Loopback endpoint of the HTTP fallback backend.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";

pub use bridge::NativeBridge;
pub use error::InvokeError;
pub use gateway::Gateway;
pub use http::HttpGateway;
pub use invoker::{invoke, Invoker};
