//! Navigation controller.
//!
//! Owns the process-wide navigation state: the current loaded route, the
//! current unloaded route, the loading flag, and the current-URL cursor.
//! All mutation happens here; views observe the state through watch
//! channels. Competing navigations are serialized through the
//! [`MutexExecutor`](crate::executor::MutexExecutor), so only the most
//! recently requested navigation ever publishes.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use url::Url;

use forge_gateway::InvokeError;

use crate::executor::MutexExecutor;
use crate::loader::RouteLoader;
use crate::path::{route_to_path, url_to_route};
use crate::route::{LoadedRoute, Route};

/// How a navigation manipulates the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Add a new history entry.
    Push,
    /// Overwrite the current entry.
    Replace,
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Attempted to navigate outside the application origin. This is a
    /// programming error, not a runtime condition to recover from.
    #[error("cannot navigate to other origin: {0}")]
    CrossOrigin(Url),

    /// Route resolution failed; the initiator decides what to surface.
    #[error(transparent)]
    Load(#[from] InvokeError),
}

/// Browser-history integration seam.
///
/// Pop events (back/forward traversal) are intentionally not part of
/// this trait: the host registers its own listener and calls
/// [`Navigator::handle_pop`], so the controller's own push/replace calls
/// can never feed back into it.
pub trait History: Send + Sync {
    /// Add an entry for `route` at `path`. The state payload is the
    /// route, never the loaded route.
    fn push(&self, route: &Route, path: &str);
    /// Overwrite the current entry with `route` at `path`.
    fn replace(&self, route: &Route, path: &str);
    /// The URL the history currently points at.
    fn location(&self) -> Url;
}

/// In-memory [`History`] for headless operation and tests.
pub struct MemoryHistory {
    base: Url,
    entries: Mutex<Vec<(Route, Url)>>,
}

impl MemoryHistory {
    /// `base` supplies the origin and the initial location.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<(Route, Url)> {
        self.entries.lock().unwrap().clone()
    }

    fn resolve(&self, path: &str) -> Url {
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }
}

impl History for MemoryHistory {
    fn push(&self, route: &Route, path: &str) {
        let url = self.resolve(path);
        self.entries.lock().unwrap().push((route.clone(), url));
    }

    fn replace(&self, route: &Route, path: &str) {
        let url = self.resolve(path);
        let mut entries = self.entries.lock().unwrap();
        match entries.last_mut() {
            Some(last) => *last = (route.clone(), url),
            None => entries.push((route.clone(), url)),
        }
    }

    fn location(&self) -> Url {
        self.entries
            .lock()
            .unwrap()
            .last()
            .map(|(_, url)| url.clone())
            .unwrap_or_else(|| self.base.clone())
    }
}

/// The navigation controller.
///
/// Single writer of the published route state; any number of readers
/// subscribe through the watch channels.
pub struct Navigator {
    loader: RouteLoader,
    history: Arc<dyn History>,
    executor: MutexExecutor,
    active: watch::Sender<LoadedRoute>,
    active_unloaded: watch::Sender<Route>,
    loading: watch::Sender<bool>,
    current_url: Mutex<Option<Url>>,
}

impl Navigator {
    pub fn new(loader: RouteLoader, history: Arc<dyn History>) -> Self {
        let (active, _) = watch::channel(LoadedRoute::Booting);
        let (active_unloaded, _) = watch::channel(Route::Booting);
        let (loading, _) = watch::channel(true);
        Self {
            loader,
            history,
            executor: MutexExecutor::new(),
            active,
            active_unloaded,
            loading,
            current_url: Mutex::new(None),
        }
    }

    /// The currently published loaded route.
    pub fn active_route(&self) -> watch::Receiver<LoadedRoute> {
        self.active.subscribe()
    }

    /// The currently published unloaded route.
    pub fn active_unloaded_route(&self) -> watch::Receiver<Route> {
        self.active_unloaded.subscribe()
    }

    /// Whether a navigation is in flight.
    pub fn is_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Navigate by adding a history entry.
    pub async fn push(&self, route: Route) -> Result<(), NavigationError> {
        self.navigate(NavigationAction::Push, route).await
    }

    /// Navigate by overwriting the current history entry.
    pub async fn replace(&self, route: Route) -> Result<(), NavigationError> {
        self.navigate(NavigationAction::Replace, route).await
    }

    /// Re-derive the route from the history's current location and
    /// replace-navigate to it.
    pub async fn load_from_location(&self) -> Result<(), NavigationError> {
        let location = self.history.location();
        self.navigate_to_url(NavigationAction::Replace, location)
            .await
    }

    /// History-pop callback. The host binds back/forward traversal here
    /// so traversal re-resolves data instead of replaying stale state.
    pub async fn handle_pop(&self) -> Result<(), NavigationError> {
        self.load_from_location().await
    }

    /// Navigate to a URL within the application origin.
    ///
    /// A target whose pathname and query match the current-URL cursor
    /// is a no-op, so hash-only changes never trigger a reload. A URL
    /// that matches no known route falls back to home.
    pub async fn navigate_to_url(
        &self,
        action: NavigationAction,
        url: Url,
    ) -> Result<(), NavigationError> {
        if url.origin() != self.history.location().origin() {
            return Err(NavigationError::CrossOrigin(url));
        }

        {
            let current_url = self.current_url.lock().unwrap();
            if let Some(current) = current_url.as_ref() {
                if current.path() == url.path() && current.query() == url.query() {
                    return Ok(());
                }
            }
        }

        match url_to_route(&url) {
            Some(route) => self.navigate(action, route).await,
            None => {
                // Unmatched paths recover to home; never surface an
                // error and never leave the navigation unresolved.
                log::debug!("no route matches `{}`, falling back to home", url.path());
                self.navigate(action, Route::home()).await
            }
        }
    }

    async fn navigate(&self, action: NavigationAction, route: Route) -> Result<(), NavigationError> {
        self.loading.send_replace(true);

        // The URL bar reflects the destination even while its data is
        // still loading.
        let path = route_to_path(&route);
        match action {
            NavigationAction::Push => self.history.push(&route, &path),
            NavigationAction::Replace => self.history.replace(&route, &path),
        }
        *self.current_url.lock().unwrap() = Some(self.history.location());

        match self.executor.run(self.loader.load(&route)).await {
            // A newer navigation owns the slot; its publish is the only
            // one that counts.
            None => Ok(()),
            Some(Ok(loaded)) => {
                self.active.send_replace(loaded);
                self.active_unloaded.send_replace(route);
                self.loading.send_replace(false);
                Ok(())
            }
            Some(Err(err)) => {
                log::error!("failed to load `{}`: {err}", route.resource());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::StubBackend;
    use crate::route::{HomeTab, IssueStatus};

    fn navigator(backend: StubBackend) -> (Arc<Navigator>, Arc<StubBackend>, Arc<MemoryHistory>) {
        let backend = Arc::new(backend);
        let history = Arc::new(MemoryHistory::new(
            Url::parse("http://localhost/").unwrap(),
        ));
        let loader = RouteLoader::new(Arc::clone(&backend) as Arc<dyn forge_gateway::Invoker>);
        let navigator = Arc::new(Navigator::new(
            loader,
            Arc::clone(&history) as Arc<dyn History>,
        ));
        (navigator, backend, history)
    }

    fn url(path: &str) -> Url {
        Url::parse(&format!("http://localhost{path}")).unwrap()
    }

    #[tokio::test]
    async fn test_push_publishes_loaded_route_and_clears_loading() {
        let (navigator, _backend, history) = navigator(StubBackend::with_defaults());
        assert!(*navigator.is_loading().borrow());

        navigator
            .push(Route::Home {
                active_tab: HomeTab::All,
            })
            .await
            .unwrap();

        assert!(matches!(
            &*navigator.active_route().borrow(),
            LoadedRoute::Home(_)
        ));
        assert_eq!(*navigator.active_unloaded_route().borrow(), Route::home());
        assert!(!*navigator.is_loading().borrow());

        let entries = history.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, Route::home());
        assert_eq!(entries[0].1.path(), "/");
    }

    #[tokio::test]
    async fn test_replace_overwrites_the_current_entry() {
        let (navigator, _backend, history) = navigator(StubBackend::with_defaults());

        navigator.push(Route::home()).await.unwrap();
        navigator
            .replace(Route::Inbox { repo: None })
            .await
            .unwrap();

        let entries = history.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.path(), "/inbox");
    }

    #[tokio::test]
    async fn test_identical_url_is_a_no_op() {
        let (navigator, backend, history) = navigator(StubBackend::with_defaults());

        navigator
            .navigate_to_url(NavigationAction::Push, url("/repos/rad:zRepoA/issues?status=open"))
            .await
            .unwrap();
        let calls_after_first = backend.call_count();

        navigator
            .navigate_to_url(NavigationAction::Push, url("/repos/rad:zRepoA/issues?status=open"))
            .await
            .unwrap();

        assert_eq!(backend.call_count(), calls_after_first);
        assert_eq!(history.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_hash_only_change_does_not_reload() {
        let (navigator, backend, history) = navigator(StubBackend::with_defaults());

        navigator
            .navigate_to_url(NavigationAction::Push, url("/repos/rad:zRepoA/issues?status=open"))
            .await
            .unwrap();
        let calls_after_first = backend.call_count();

        navigator
            .navigate_to_url(
                NavigationAction::Push,
                url("/repos/rad:zRepoA/issues?status=open#comment-3"),
            )
            .await
            .unwrap();

        assert_eq!(backend.call_count(), calls_after_first);
        assert_eq!(history.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_unmatched_path_falls_back_to_home() {
        let (navigator, _backend, history) = navigator(StubBackend::with_defaults());

        navigator
            .navigate_to_url(NavigationAction::Push, url("/unknown/path"))
            .await
            .unwrap();

        assert!(matches!(
            &*navigator.active_route().borrow(),
            LoadedRoute::Home(_)
        ));
        // The canonical home path is what lands in history.
        assert_eq!(history.entries()[0].1.path(), "/");
    }

    #[tokio::test]
    async fn test_cross_origin_navigation_is_fatal() {
        let (navigator, backend, _history) = navigator(StubBackend::with_defaults());

        let result = navigator
            .navigate_to_url(
                NavigationAction::Push,
                Url::parse("http://example.com/repos/rad:zRepoA/issues").unwrap(),
            )
            .await;

        assert!(matches!(result, Err(NavigationError::CrossOrigin(_))));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_last_navigation_wins() {
        let (navigator, backend, _history) = navigator(StubBackend::with_defaults());
        // Hold the first navigation open at one of its backend calls.
        let gate = backend.gate("repo_by_id");

        let slow = tokio::spawn({
            let navigator = Arc::clone(&navigator);
            async move {
                navigator
                    .push(Route::RepoIssues {
                        rid: "rad:zRepoA".to_string(),
                        status: IssueStatus::All,
                    })
                    .await
            }
        });
        // Let the slow navigation submit its load and block.
        tokio::task::yield_now().await;

        navigator.push(Route::home()).await.unwrap();
        assert!(matches!(
            &*navigator.active_route().borrow(),
            LoadedRoute::Home(_)
        ));
        assert!(!*navigator.is_loading().borrow());

        // Release the superseded navigation: it completes without
        // publishing anything.
        gate.add_permits(1);
        slow.await.unwrap().unwrap();

        assert!(matches!(
            &*navigator.active_route().borrow(),
            LoadedRoute::Home(_)
        ));
        assert_eq!(*navigator.active_unloaded_route().borrow(), Route::home());
        assert!(!*navigator.is_loading().borrow());
    }

    #[tokio::test]
    async fn test_load_from_location_replaces_in_place() {
        let (navigator, _backend, history) = navigator(StubBackend::with_defaults());
        history.push(
            &Route::Inbox { repo: None },
            "/inbox",
        );

        navigator.load_from_location().await.unwrap();

        assert!(matches!(
            &*navigator.active_route().borrow(),
            LoadedRoute::Inbox(_)
        ));
        assert_eq!(history.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_publishes_nothing() {
        let (navigator, _backend, _history) =
            navigator(StubBackend::with_defaults().without("repo_count"));

        let result = navigator.push(Route::home()).await;

        assert!(matches!(result, Err(NavigationError::Load(_))));
        assert_eq!(*navigator.active_route().borrow(), LoadedRoute::Booting);
        // The flag stays up; the initiator decides what to show.
        assert!(*navigator.is_loading().borrow());
    }
}
