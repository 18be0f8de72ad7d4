//! Per-kind asynchronous route resolution.
//!
//! Each route tag resolves through the minimum set of backend calls:
//! independent calls are dispatched concurrently and joined, and only a
//! call whose arguments depend on an earlier result is sequenced after
//! it. Any failed call aborts the whole resolution — a partially
//! populated view is never produced.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use forge_gateway::{invoke, InvokeError, Invoker};
use forge_types::{
    Config, Issue, NotificationRow, Operation, PaginatedQuery, Patch, RepoCount, RepoInfo,
    Revision, Thread, DEFAULT_TAKE,
};

use crate::route::{
    HomeTab, HomeView, InboxView, IssueStatus, IssueView, IssuesView, LoadedRoute, PatchStatus,
    PatchView, PatchesView, Route,
};

#[derive(Serialize)]
struct RepoArgs<'a> {
    rid: &'a str,
}

#[derive(Serialize)]
struct CobArgs<'a> {
    rid: &'a str,
    id: &'a str,
}

#[derive(Serialize)]
struct ListReposArgs<'a> {
    show: &'a str,
}

#[derive(Serialize)]
struct ListIssuesArgs<'a> {
    rid: &'a str,
    status: IssueStatus,
}

#[derive(Serialize)]
struct ListPatchesArgs<'a> {
    rid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<PatchStatus>,
    take: usize,
}

#[derive(Serialize)]
struct ListNotificationsArgs<'a> {
    rid: &'a str,
    take: usize,
}

/// Resolves routes into loaded view models via the backend gateway.
pub struct RouteLoader {
    backend: Arc<dyn Invoker>,
}

impl RouteLoader {
    pub fn new(backend: Arc<dyn Invoker>) -> Self {
        Self { backend }
    }

    /// Resolve `route` into its loaded counterpart.
    ///
    /// Errors from the gateway propagate unmodified; the loader neither
    /// wraps nor retries them.
    pub async fn load(&self, route: &Route) -> Result<LoadedRoute, InvokeError> {
        log::debug!("loading route `{}`", route.resource());
        match route {
            Route::Booting => Ok(LoadedRoute::Booting),
            Route::Home { active_tab } => self.load_home(*active_tab).await.map(LoadedRoute::Home),
            Route::Inbox { repo } => self
                .load_inbox(repo.as_deref())
                .await
                .map(LoadedRoute::Inbox),
            Route::RepoIssue { rid, issue, status } => self
                .load_issue(rid, issue, *status)
                .await
                .map(LoadedRoute::RepoIssue),
            Route::RepoCreateIssue { rid, status } => self
                .load_issue_list(rid, *status)
                .await
                .map(LoadedRoute::RepoCreateIssue),
            Route::RepoIssues { rid, status } => self
                .load_issue_list(rid, *status)
                .await
                .map(LoadedRoute::RepoIssues),
            Route::RepoPatch {
                rid,
                patch,
                status,
                review_id,
            } => self
                .load_patch(rid, patch, *status, review_id.as_deref())
                .await
                .map(LoadedRoute::RepoPatch),
            Route::RepoPatches { rid, status } => self
                .load_patch_list(rid, *status)
                .await
                .map(LoadedRoute::RepoPatches),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, command: &str) -> Result<T, InvokeError> {
        invoke(self.backend.as_ref(), command, None).await
    }

    async fn fetch_with<T: DeserializeOwned, A: Serialize + Sync>(
        &self,
        command: &str,
        args: &A,
    ) -> Result<T, InvokeError> {
        let args = serde_json::to_value(args).map_err(|source| InvokeError::Decode {
            command: command.to_string(),
            source,
        })?;
        invoke(self.backend.as_ref(), command, Some(args)).await
    }

    async fn load_home(&self, active_tab: HomeTab) -> Result<HomeView, InvokeError> {
        let list_repos_args = ListReposArgs {
            show: active_tab.as_str(),
        };
        let (config, repo_count, repos) = tokio::try_join!(
            self.fetch::<Config>("config"),
            self.fetch::<RepoCount>("repo_count"),
            self.fetch_with::<Vec<RepoInfo>, _>("list_repos", &list_repos_args),
        )?;

        Ok(HomeView {
            active_tab,
            config,
            repo_count,
            repos,
        })
    }

    async fn load_inbox(&self, repo: Option<&str>) -> Result<InboxView, InvokeError> {
        let (config, repo_count, counts) = tokio::try_join!(
            self.fetch::<Config>("config"),
            self.fetch::<RepoCount>("repo_count"),
            self.fetch::<Vec<(String, usize)>>("count_notifications_by_repo"),
        )?;
        let counts: BTreeMap<String, usize> = counts.into_iter().collect();

        let mut notifications = BTreeMap::new();
        match repo {
            Some(rid) => {
                let page = self.fetch_notifications(rid).await?;
                notifications.insert(rid.to_string(), page);
            }
            None => {
                // One page per repository with pending notifications, in
                // repository id order.
                for rid in counts.keys() {
                    let page = self.fetch_notifications(rid).await?;
                    notifications.insert(rid.clone(), page);
                }
            }
        }

        Ok(InboxView {
            config,
            repo_count,
            counts,
            notifications,
            repo: repo.map(str::to_string),
        })
    }

    async fn fetch_notifications(
        &self,
        rid: &str,
    ) -> Result<PaginatedQuery<Vec<NotificationRow>>, InvokeError> {
        self.fetch_with(
            "list_notifications",
            &ListNotificationsArgs {
                rid,
                take: DEFAULT_TAKE,
            },
        )
        .await
    }

    async fn load_issue_list(
        &self,
        rid: &str,
        status: IssueStatus,
    ) -> Result<IssuesView, InvokeError> {
        let repo_args = RepoArgs { rid };
        let list_issues_args = ListIssuesArgs { rid, status };
        let (config, repo, issues) = tokio::try_join!(
            self.fetch::<Config>("config"),
            self.fetch_with::<RepoInfo, _>("repo_by_id", &repo_args),
            self.fetch_with::<Vec<Issue>, _>("list_issues", &list_issues_args),
        )?;

        Ok(IssuesView {
            repo,
            config,
            issues,
            status,
        })
    }

    async fn load_issue(
        &self,
        rid: &str,
        id: &str,
        status: IssueStatus,
    ) -> Result<IssueView, InvokeError> {
        let repo_args = RepoArgs { rid };
        let cob_args = CobArgs { rid, id };
        let list_issues_args = ListIssuesArgs { rid, status };
        let (config, repo, issue, activity, issues, threads) = tokio::try_join!(
            self.fetch::<Config>("config"),
            self.fetch_with::<RepoInfo, _>("repo_by_id", &repo_args),
            self.fetch_with::<Issue, _>("issue_by_id", &cob_args),
            self.fetch_with::<Vec<Operation>, _>("activity_by_issue", &cob_args),
            self.fetch_with::<Vec<Issue>, _>("list_issues", &list_issues_args),
            self.fetch_with::<Vec<Thread>, _>("comment_threads_by_issue_id", &cob_args),
        )?;

        Ok(IssueView {
            repo,
            config,
            issue,
            issues,
            status,
            activity,
            threads,
        })
    }

    async fn load_patch_list(
        &self,
        rid: &str,
        status: Option<PatchStatus>,
    ) -> Result<PatchesView, InvokeError> {
        let repo_args = RepoArgs { rid };
        let list_patches_args = ListPatchesArgs {
            rid,
            status,
            take: DEFAULT_TAKE,
        };
        let (config, repo, patches) = tokio::try_join!(
            self.fetch::<Config>("config"),
            self.fetch_with::<RepoInfo, _>("repo_by_id", &repo_args),
            self.fetch_with::<PaginatedQuery<Vec<Patch>>, _>("list_patches", &list_patches_args),
        )?;

        Ok(PatchesView {
            repo,
            config,
            patches,
            status,
        })
    }

    async fn load_patch(
        &self,
        rid: &str,
        id: &str,
        status: Option<PatchStatus>,
        review_id: Option<&str>,
    ) -> Result<PatchView, InvokeError> {
        let repo_args = RepoArgs { rid };
        let cob_args = CobArgs { rid, id };
        let list_patches_args = ListPatchesArgs {
            rid,
            status,
            take: DEFAULT_TAKE,
        };
        let (config, repo, patches, patch, revisions, activity) = tokio::try_join!(
            self.fetch::<Config>("config"),
            self.fetch_with::<RepoInfo, _>("repo_by_id", &repo_args),
            self.fetch_with::<PaginatedQuery<Vec<Patch>>, _>("list_patches", &list_patches_args),
            self.fetch_with::<Patch, _>("patch_by_id", &cob_args),
            self.fetch_with::<Vec<Revision>, _>("revisions_by_patch", &cob_args),
            self.fetch_with::<Vec<Operation>, _>("activity_by_patch", &cob_args),
        )?;

        // There is no "review by id" command; the requested review is
        // selected from the loaded revisions instead.
        let review = review_id.and_then(|wanted| {
            revisions
                .iter()
                .flat_map(|revision| revision.reviews.iter())
                .find(|review| review.id == wanted)
                .cloned()
        });

        Ok(PatchView {
            repo,
            config,
            patch,
            patches,
            status,
            review,
            revisions,
            activity,
        })
    }
}
