//! Shared view-model types for the forge desktop client
//!
//! Every type in this crate mirrors the JSON shape a backend command
//! returns, so deserialization is the only translation layer between the
//! command channel and the application. Field names are `camelCase` on
//! the wire; state enums are internally tagged by `status`.
//!
//! The backend itself is an external contract: these types describe what
//! the client consumes, not how the data is produced or stored.

pub mod cobs;
pub mod config;
pub mod inbox;
pub mod repo;

pub use cobs::{
    Author, CloseReason, Comment, Issue, IssueState, Operation, PaginatedQuery, Patch, PatchState,
    Review, Revision, Thread, Verdict,
};
pub use config::{Config, Profile};
pub use inbox::NotificationRow;
pub use repo::{RepoCount, RepoInfo, Visibility};

/// Page size used by paginated list commands.
pub const DEFAULT_TAKE: usize = 20;
