//! Path codec: routes to canonical paths and back.
//!
//! `route_to_path` and `url_to_route` are exact inverses modulo filter
//! normalization: issue routes always carry an explicit `status` query
//! parameter (absent decodes to `all`), patch routes omit the parameter
//! entirely when the filter is unset, and tab state (home tab, inbox
//! repository) is never encoded into the URL.

use std::borrow::Cow;

use url::form_urlencoded::Serializer;
use url::Url;

use crate::route::{HomeTab, IssueStatus, PatchStatus, Route};

/// Serialize `route` into its canonical path + query string.
pub fn route_to_path(route: &Route) -> String {
    match route {
        Route::Booting => String::new(),
        Route::Home { .. } => "/".to_string(),
        Route::Inbox { .. } => "/inbox".to_string(),
        Route::RepoIssue { rid, issue, status } => {
            let mut query = Serializer::new(String::new());
            query.append_pair("status", status.as_str());
            format!("/repos/{rid}/issues/{issue}?{}", query.finish())
        }
        Route::RepoCreateIssue { rid, status } => {
            let mut query = Serializer::new(String::new());
            query.append_pair("status", status.as_str());
            format!("/repos/{rid}/issues/create?{}", query.finish())
        }
        Route::RepoIssues { rid, status } => {
            let mut query = Serializer::new(String::new());
            query.append_pair("status", status.as_str());
            format!("/repos/{rid}/issues?{}", query.finish())
        }
        Route::RepoPatch {
            rid,
            patch,
            status,
            review_id,
        } => {
            let mut path = format!("/repos/{rid}/patches/{patch}");
            let mut query = Serializer::new(String::new());
            if let Some(status) = status {
                query.append_pair("status", status.as_str());
            }
            if let Some(review_id) = review_id {
                query.append_pair("review", review_id);
            }
            let query = query.finish();
            if !query.is_empty() {
                path.push('?');
                path.push_str(&query);
            }
            path
        }
        Route::RepoPatches { rid, status } => {
            let mut path = format!("/repos/{rid}/patches");
            if let Some(status) = status {
                let mut query = Serializer::new(String::new());
                query.append_pair("status", status.as_str());
                path.push('?');
                path.push_str(&query.finish());
            }
            path
        }
    }
}

/// Decode `url` into a route, or `None` when no known path shape
/// matches. Callers fall back to the home route on `None`; decoding
/// never fails loudly.
pub fn url_to_route(url: &Url) -> Option<Route> {
    let mut segments = url.path().trim_start_matches('/').split('/');

    match segments.next() {
        Some("") => Some(Route::Home {
            active_tab: HomeTab::default(),
        }),
        Some("inbox") => Some(Route::Inbox { repo: None }),
        Some("repos") => repo_url_to_route(&mut segments, url),
        _ => None,
    }
}

fn repo_url_to_route<'a>(
    segments: &mut impl Iterator<Item = &'a str>,
    url: &Url,
) -> Option<Route> {
    let rid = segments.next().filter(|rid| !rid.is_empty())?.to_string();

    match segments.next() {
        Some("issues") => {
            let status = issue_status(url);
            match segments.next().filter(|segment| !segment.is_empty()) {
                Some("create") => Some(Route::RepoCreateIssue { rid, status }),
                Some(id) => Some(Route::RepoIssue {
                    rid,
                    issue: id.to_string(),
                    status,
                }),
                None => Some(Route::RepoIssues { rid, status }),
            }
        }
        Some("patches") => {
            let status = query_param(url, "status").and_then(|value| PatchStatus::parse(&value));
            match segments.next().filter(|segment| !segment.is_empty()) {
                Some(id) => Some(Route::RepoPatch {
                    rid,
                    patch: id.to_string(),
                    status,
                    review_id: query_param(url, "review").map(Cow::into_owned),
                }),
                None => Some(Route::RepoPatches { rid, status }),
            }
        }
        _ => None,
    }
}

fn issue_status(url: &Url) -> IssueStatus {
    query_param(url, "status")
        .map(|value| IssueStatus::parse(&value))
        .unwrap_or_default()
}

fn query_param<'a>(url: &'a Url, name: &str) -> Option<Cow<'a, str>> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}
