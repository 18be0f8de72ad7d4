//! Test support: a canned backend and wire-shaped fixtures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use forge_gateway::{InvokeError, Invoker};

/// Backend stub answering commands from a canned response map, with
/// optional per-command gates to hold a call open mid-flight.
pub(crate) struct StubBackend {
    responses: Mutex<HashMap<String, Value>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    calls: Mutex<Vec<(String, Option<Value>)>>,
}

impl StubBackend {
    /// A stub that answers every command the loader knows about.
    pub fn with_defaults() -> Self {
        let stub = Self::empty();
        {
            let mut responses = stub.responses.lock().unwrap();
            responses.insert("config".into(), config());
            responses.insert("repo_count".into(), repo_count());
            responses.insert("list_repos".into(), json!([repo_info("rad:zRepoA")]));
            responses.insert("repo_by_id".into(), repo_info("rad:zRepoA"));
            responses.insert(
                "count_notifications_by_repo".into(),
                json!([["rad:zRepoA", 2], ["rad:zRepoB", 1]]),
            );
            responses.insert("list_notifications".into(), notifications_page());
            responses.insert("list_issues".into(), json!([issue("i-1")]));
            responses.insert("issue_by_id".into(), issue("i-1"));
            responses.insert("activity_by_issue".into(), json!([operation("op-1")]));
            responses.insert("comment_threads_by_issue_id".into(), json!([thread()]));
            responses.insert("list_patches".into(), patches_page());
            responses.insert("patch_by_id".into(), patch("p-1"));
            responses.insert("revisions_by_patch".into(), json!([revision("r-1", "rev-1")]));
            responses.insert("activity_by_patch".into(), json!([operation("op-2")]));
        }
        stub
    }

    pub fn empty() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replace the canned response for one command.
    pub fn respond(self, command: &str, value: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(command.to_string(), value);
        self
    }

    /// Remove a command so invoking it fails.
    pub fn without(self, command: &str) -> Self {
        self.responses.lock().unwrap().remove(command);
        self
    }

    /// Gate `command`: calls block until a permit is added to the
    /// returned semaphore.
    pub fn gate(&self, command: &str) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates
            .lock()
            .unwrap()
            .insert(command.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, command: &str) -> Vec<Option<Value>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == command)
            .map(|(_, args)| args.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Invoker for StubBackend {
    async fn invoke_raw(&self, command: &str, args: Option<Value>) -> Result<Value, InvokeError> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), args));

        let gate = self.gates.lock().unwrap().get(command).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        let response = self.responses.lock().unwrap().get(command).cloned();
        response.ok_or_else(|| InvokeError::Backend {
            command: command.to_string(),
            payload: json!({ "error": "unknown command" }),
        })
    }
}

pub(crate) fn author() -> Value {
    json!({ "did": "did:key:z6MkltRpzcq2ybm13yQpyre58JUeMvZY6toxoZVpLZ8YabNf", "alias": "alice" })
}

pub(crate) fn config() -> Value {
    json!({
        "publicExplorer": "https://app.radicle.xyz/nodes/$host/$rid$path",
        "profile": { "did": "did:key:z6MkltRpzcq2ybm13yQpyre58JUeMvZY6toxoZVpLZ8YabNf", "alias": "alice" },
    })
}

pub(crate) fn repo_count() -> Value {
    json!({ "total": 3, "contributor": 1, "delegate": 1, "private": 1, "seeding": 3 })
}

pub(crate) fn repo_info(rid: &str) -> Value {
    json!({
        "rid": rid,
        "name": "heartwood",
        "description": "Radicle protocol implementation",
        "defaultBranch": "master",
        "delegates": [author()],
        "threshold": 1,
        "visibility": { "type": "public" },
        "seeding": 12,
        "lastCommitTimestamp": 1700000000000u64,
    })
}

pub(crate) fn issue(id: &str) -> Value {
    json!({
        "id": id,
        "author": author(),
        "title": "Panic on empty diff",
        "state": { "status": "open" },
        "assignees": [],
        "labels": ["bug"],
        "discussion": [],
        "timestamp": 1700000000000u64,
    })
}

pub(crate) fn patch(id: &str) -> Value {
    json!({
        "id": id,
        "author": author(),
        "title": "Fix diff rendering",
        "base": "1111111111111111111111111111111111111111",
        "head": "2222222222222222222222222222222222222222",
        "state": { "status": "open" },
        "assignees": [],
        "labels": [],
        "timestamp": 1700000000000u64,
        "revisionCount": 1,
    })
}

pub(crate) fn patches_page() -> Value {
    json!({ "cursor": 0, "more": false, "content": [patch("p-1")] })
}

pub(crate) fn revision(id: &str, review_id: &str) -> Value {
    json!({
        "id": id,
        "author": author(),
        "base": "1111111111111111111111111111111111111111",
        "head": "2222222222222222222222222222222222222222",
        "reviews": [{
            "id": review_id,
            "author": author(),
            "verdict": "accept",
            "summary": "LGTM",
            "timestamp": 1700000000000u64,
        }],
        "timestamp": 1700000000000u64,
    })
}

pub(crate) fn operation(id: &str) -> Value {
    json!({
        "entryId": id,
        "author": author(),
        "timestamp": 1700000000000u64,
        "type": "comment",
        "body": "looks good",
    })
}

pub(crate) fn thread() -> Value {
    json!({
        "root": {
            "id": "c-1",
            "author": author(),
            "body": "Can reproduce on master.",
            "replyTo": null,
            "timestamp": 1700000000000u64,
        },
        "replies": [],
    })
}

pub(crate) fn notifications_page() -> Value {
    json!({
        "cursor": 0,
        "more": false,
        "content": [{
            "rowId": 1,
            "timestamp": 1700000000000u64,
            "remote": null,
            "old": "1111111111111111111111111111111111111111",
            "new": "2222222222222222222222222222222222222222",
        }],
    })
}
