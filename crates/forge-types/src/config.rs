//! Application configuration as served by the `config` command.

use serde::{Deserialize, Serialize};

/// Node-wide configuration the UI needs on every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// URL template of the public web explorer for share links.
    pub public_explorer: String,
    pub profile: Profile,
}

/// The local identity the node is operating as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub did: String,
    #[serde(default)]
    pub alias: Option<String>,
}
