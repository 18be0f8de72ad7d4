//! Client-side router for the forge desktop client
//!
//! Maps URL-shaped locations to typed route descriptors, resolves each
//! route into a fully loaded view model through the backend gateway,
//! serializes routes back into canonical paths, and keeps navigation
//! history and loading state consistent under rapid, overlapping
//! navigation requests.
//!
//! # Architecture
//!
//! ```text
//!        navigation request (user action / history pop)
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────┐
//! │                    Navigator                     │
//! │  current route · loading flag · URL cursor       │
//! └──────────────────────────────────────────────────┘
//!        │                  │                  │
//!        ▼                  ▼                  ▼
//! ┌─────────────┐   ┌───────────────┐   ┌─────────────┐
//! │ Path codec  │   │ MutexExecutor │   │ RouteLoader │
//! │ route ↔ URL │   │ last-wins slot│   │ per-kind    │
//! └─────────────┘   └───────────────┘   │ fan-out     │
//!                                       └─────────────┘
//!                                              │
//!                                              ▼
//!                                     forge-gateway (Invoker)
//! ```
//!
//! Only the most recently requested navigation ever publishes: earlier
//! in-flight loads run to completion but their results are discarded by
//! the executor. There is no partial publication — a route is either
//! fully loaded or not published at all.

pub mod executor;
pub mod loader;
pub mod navigator;
pub mod path;
pub mod route;

#[cfg(test)]
pub(crate) mod fixtures;

pub use executor::MutexExecutor;
pub use loader::RouteLoader;
pub use navigator::{History, MemoryHistory, NavigationAction, NavigationError, Navigator};
pub use path::{route_to_path, url_to_route};
pub use route::{
    HomeTab, HomeView, InboxView, IssueStatus, IssueView, IssuesView, LoadedRoute, PatchStatus,
    PatchView, PatchesView, Route,
};
