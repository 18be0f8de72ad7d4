//! Repository metadata types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cobs::Author;

/// Repository counts per relationship to the local identity, shown as
/// tab badges on the home screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoCount {
    pub total: usize,
    pub contributor: usize,
    pub delegate: usize,
    pub private: usize,
    pub seeding: usize,
}

/// Repository metadata as returned by `repo_by_id` and `list_repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoInfo {
    pub rid: String,
    pub name: String,
    pub description: String,
    pub default_branch: String,
    pub delegates: Vec<Author>,
    pub threshold: usize,
    pub visibility: Visibility,
    pub seeding: usize,
    pub last_commit_timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Visibility {
    /// Anyone and everyone.
    #[default]
    Public,
    /// Delegates plus the allowed DIDs.
    Private {
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        allow: BTreeSet<String>,
    },
}
