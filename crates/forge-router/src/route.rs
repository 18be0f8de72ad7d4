//! Route descriptors and their loaded counterparts.
//!
//! `Route` is the unresolved, parameter-only description of a navigable
//! location; `LoadedRoute` pairs the same tag with the fully resolved
//! view model. The two enums share one closed tag space and every
//! dispatch over them is a wildcard-free `match`, so adding a resource
//! kind without updating the codec or the loader fails to compile.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use forge_types::{
    Config, Issue, NotificationRow, Operation, PaginatedQuery, Patch, RepoCount, RepoInfo, Review,
    Revision, Thread,
};

/// Issue filter domain. A missing filter always normalizes to `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    #[default]
    All,
    Open,
    Closed,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Parse a query-string value, normalizing anything unrecognized to
    /// the `all` default.
    pub fn parse(value: &str) -> Self {
        match value {
            "open" => Self::Open,
            "closed" => Self::Closed,
            _ => Self::All,
        }
    }
}

/// Patch filter domain. Unlike issues there is no `all` member: an
/// unset patch filter stays absent and is omitted from paths and
/// backend args entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchStatus {
    Draft,
    Open,
    Archived,
    Merged,
}

impl PatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Archived => "archived",
            Self::Merged => "merged",
        }
    }

    /// Parse a query-string value; unrecognized values mean "unset".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "open" => Some(Self::Open),
            "archived" => Some(Self::Archived),
            "merged" => Some(Self::Merged),
            _ => None,
        }
    }
}

/// Repository tabs on the home screen. Tab state lives in the route,
/// not in the URL: `/` always decodes to the default tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeTab {
    #[default]
    All,
    Delegate,
    Private,
    Contributor,
}

impl HomeTab {
    /// The `show` filter value `list_repos` expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Delegate => "delegate",
            Self::Private => "private",
            Self::Contributor => "contributor",
        }
    }
}

/// An unresolved navigable location.
///
/// Routes are immutable value objects with structural equality; history
/// entries carry the serialized route as their state payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resource", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Route {
    Booting,
    Home {
        #[serde(default)]
        active_tab: HomeTab,
    },
    Inbox {
        #[serde(default)]
        repo: Option<String>,
    },
    #[serde(rename = "repo.issue")]
    RepoIssue {
        rid: String,
        issue: String,
        #[serde(default)]
        status: IssueStatus,
    },
    #[serde(rename = "repo.createIssue")]
    RepoCreateIssue {
        rid: String,
        #[serde(default)]
        status: IssueStatus,
    },
    #[serde(rename = "repo.issues")]
    RepoIssues {
        rid: String,
        #[serde(default)]
        status: IssueStatus,
    },
    #[serde(rename = "repo.patch")]
    RepoPatch {
        rid: String,
        patch: String,
        #[serde(default)]
        status: Option<PatchStatus>,
        #[serde(default)]
        review_id: Option<String>,
    },
    #[serde(rename = "repo.patches")]
    RepoPatches {
        rid: String,
        #[serde(default)]
        status: Option<PatchStatus>,
    },
}

impl Route {
    /// Route the controller falls back to when a URL matches nothing.
    pub fn home() -> Self {
        Self::Home {
            active_tab: HomeTab::default(),
        }
    }

    /// Discriminant name, as used in history payloads and logs.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Booting => "booting",
            Self::Home { .. } => "home",
            Self::Inbox { .. } => "inbox",
            Self::RepoIssue { .. } => "repo.issue",
            Self::RepoCreateIssue { .. } => "repo.createIssue",
            Self::RepoIssues { .. } => "repo.issues",
            Self::RepoPatch { .. } => "repo.patch",
            Self::RepoPatches { .. } => "repo.patches",
        }
    }
}

/// A route resolved into its view model.
///
/// Produced exactly once per successful navigation and replaced
/// atomically; never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedRoute {
    Booting,
    Home(HomeView),
    Inbox(InboxView),
    RepoIssue(IssueView),
    RepoCreateIssue(IssuesView),
    RepoIssues(IssuesView),
    RepoPatch(PatchView),
    RepoPatches(PatchesView),
}

impl LoadedRoute {
    /// Discriminant name; pairs one-to-one with [`Route::resource`].
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Booting => "booting",
            Self::Home(_) => "home",
            Self::Inbox(_) => "inbox",
            Self::RepoIssue(_) => "repo.issue",
            Self::RepoCreateIssue(_) => "repo.createIssue",
            Self::RepoIssues(_) => "repo.issues",
            Self::RepoPatch(_) => "repo.patch",
            Self::RepoPatches(_) => "repo.patches",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub active_tab: HomeTab,
    pub config: Config,
    pub repo_count: RepoCount,
    pub repos: Vec<RepoInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InboxView {
    pub config: Config,
    pub repo_count: RepoCount,
    /// Pending notification counts keyed by repository id.
    pub counts: BTreeMap<String, usize>,
    /// One notification page per fetched repository, keyed by id.
    pub notifications: BTreeMap<String, PaginatedQuery<Vec<NotificationRow>>>,
    /// Active repository tab, when one is selected.
    pub repo: Option<String>,
}

/// Issue list view, shared by the list and the create-issue screens.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuesView {
    pub repo: RepoInfo,
    pub config: Config,
    pub issues: Vec<Issue>,
    pub status: IssueStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueView {
    pub repo: RepoInfo,
    pub config: Config,
    pub issue: Issue,
    pub issues: Vec<Issue>,
    pub status: IssueStatus,
    pub activity: Vec<Operation>,
    pub threads: Vec<Thread>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatchesView {
    pub repo: RepoInfo,
    pub config: Config,
    pub patches: PaginatedQuery<Vec<Patch>>,
    pub status: Option<PatchStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatchView {
    pub repo: RepoInfo,
    pub config: Config,
    pub patch: Patch,
    pub patches: PaginatedQuery<Vec<Patch>>,
    pub status: Option<PatchStatus>,
    /// The review the route asked to highlight, when it exists.
    pub review: Option<Review>,
    pub revisions: Vec<Revision>,
    pub activity: Vec<Operation>,
}
