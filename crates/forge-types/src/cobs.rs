//! Collaborative object types: issues, patches, revisions, reviews,
//! comment threads, and the activity log entries shared between them.

use serde::{Deserialize, Serialize};

/// An author reference on any collaborative object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub did: String,
    #[serde(default)]
    pub alias: Option<String>,
}

/// One page of a paginated list command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedQuery<T> {
    pub cursor: usize,
    pub more: bool,
    pub content: T,
}

/// One entry of a collaborative object's activity log.
///
/// The action payload is kept as raw JSON: the router only transports
/// activity, rendering it is the timeline view's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub entry_id: String,
    pub author: Author,
    pub timestamp: u64,
    #[serde(flatten)]
    pub action: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub author: Author,
    pub title: String,
    pub state: IssueState,
    pub assignees: Vec<Author>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub discussion: Vec<Comment>,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum IssueState {
    #[default]
    Open,
    Closed {
        reason: CloseReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CloseReason {
    Other,
    Solved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    pub id: String,
    pub author: Author,
    pub title: String,
    pub base: String,
    pub head: String,
    pub state: PatchState,
    pub assignees: Vec<Author>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub timestamp: u64,
    pub revision_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum PatchState {
    Draft,
    Open {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conflicts: Vec<(String, String)>,
    },
    Archived,
    Merged {
        revision: String,
        commit: String,
    },
}

/// A proposed iteration of a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: String,
    pub author: Author,
    pub base: String,
    pub head: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub author: Author,
    #[serde(default)]
    pub verdict: Option<Verdict>,
    #[serde(default)]
    pub summary: Option<String>,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Accept,
    Reject,
}

/// A root comment plus its replies, as returned by
/// `comment_threads_by_issue_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub root: Comment,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: Author,
    pub body: String,
    #[serde(default)]
    pub reply_to: Option<String>,
    pub timestamp: u64,
}
