//! Feed state controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use feed_cache::{InFlight, Placeholder, QueryState};
use feed_core::{total_pages, ClientConfig, FeedPage, QueryKey, UsersKey};
use feed_data::SharedGateway;
use tokio::sync::watch;

use crate::{FeedViewModel, QueryClient, Selection, UserList};

/// Owns the feed selection and keeps the published view in step with it.
///
/// Every transition recomputes the feed key, resolves it through the
/// [`QueryClient`], and publishes a fresh [`FeedViewModel`]. Fetches run
/// as tokio tasks; a response whose key is no longer current still lands
/// in the cache but never reaches the view.
///
/// Transitions spawn tasks, so they must be called inside a tokio runtime.
#[derive(Clone)]
pub struct FeedController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    client: QueryClient,
    page_size: u32,
    state: Mutex<ControllerState>,
    view: watch::Sender<Arc<FeedViewModel>>,
}

#[derive(Default)]
struct ControllerState {
    selection: Selection,
    users: QueryState<UserList>,
    feed: QueryState<FeedPage>,
    /// Key of the feed query the view currently follows.
    feed_key: Option<QueryKey>,
    /// Last key whose own data was shown. Source of placeholder data.
    shown_key: Option<QueryKey>,
}

impl FeedController {
    pub fn new(client: QueryClient, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let state = ControllerState::default();
        let initial = FeedViewModel::build(&state.selection, &state.users, &state.feed, None, page_size);
        let (view, _) = watch::channel(Arc::new(initial));

        Self {
            inner: Arc::new(ControllerInner {
                client,
                page_size,
                state: Mutex::new(state),
                view,
            }),
        }
    }

    /// Controller with caches and page size taken from `config`.
    pub fn from_config(gateway: SharedGateway, config: &ClientConfig) -> Self {
        Self::new(QueryClient::from_config(gateway, config), config.page_size)
    }

    pub fn client(&self) -> &QueryClient {
        &self.inner.client
    }

    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    /// Load the user list and, once a user is known, the first feed page.
    pub fn start(&self) {
        tracing::debug!("feed controller started");
        self.inner.sync_users();
        self.inner.sync_feed();
    }

    /// Select a user. Resets to page 1.
    pub fn set_user(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        tracing::info!(user_id = %user_id, "user selected");
        self.inner.lock().selection.select_user(user_id);
        self.inner.sync_feed();
    }

    /// Select a category; `None` or blank means all. Resets to page 1.
    pub fn set_category(&self, category: Option<&str>) {
        tracing::info!(category = category.unwrap_or("all"), "category selected");
        self.inner.lock().selection.select_category(category);
        self.inner.sync_feed();
    }

    /// Go to page `page`, clamped into the known page range.
    pub fn set_page(&self, page: i64) {
        {
            let mut state = self.inner.lock();
            let total = state.feed.data.as_ref().map_or(0, |p| p.total);
            let pages = total_pages(total, self.inner.page_size);
            let applied = state.selection.go_to_page(page, pages);
            tracing::info!(requested = page, page = applied, "page changed");
        }
        self.inner.sync_feed();
    }

    pub fn next_page(&self) {
        let current = self.inner.lock().selection.page;
        self.set_page(i64::from(current) + 1);
    }

    pub fn previous_page(&self) {
        let current = self.inner.lock().selection.page;
        self.set_page(i64::from(current) - 1);
    }

    /// Show or hide signal breakdowns. Never fetches.
    pub fn toggle_signals(&self) {
        let mut state = self.inner.lock();
        let shown = state.selection.toggle_signals();
        tracing::debug!(show_signals = shown, "signals toggled");
        self.inner.publish(&state);
    }

    /// Re-resolve both queries. Only stale or failed entries refetch.
    pub fn refresh(&self) {
        self.inner.sync_users();
        self.inner.sync_feed();
    }

    /// Receiver of view snapshots. Starts with the current one.
    pub fn subscribe(&self) -> watch::Receiver<Arc<FeedViewModel>> {
        self.inner.view.subscribe()
    }

    /// Latest published view.
    pub fn snapshot(&self) -> Arc<FeedViewModel> {
        self.inner.view.borrow().clone()
    }

    /// Wait until no query of the current view is running.
    pub async fn settled(&self) -> Arc<FeedViewModel> {
        let mut rx = self.subscribe();
        let view = match rx.wait_for(|view| !view.phase.is_busy()).await {
            Ok(view) => view.clone(),
            Err(_) => self.snapshot(),
        };
        view
    }
}

impl ControllerInner {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ControllerState) {
        let view = FeedViewModel::build(
            &state.selection,
            &state.users,
            &state.feed,
            state.feed_key.as_ref(),
            self.page_size,
        );
        self.view.send_replace(Arc::new(view));
    }

    fn sync_users(self: &Arc<Self>) {
        let mut state = self.lock();
        let resolution = self.client.resolve_users();
        state.users = resolution.state;
        self.publish(&state);
        drop(state);

        if let Some(fetch) = resolution.fetch {
            let inner = Arc::clone(self);
            tokio::spawn(async move {
                let _ = fetch.await;
                inner.users_settled();
            });
        }
    }

    fn users_settled(self: &Arc<Self>) {
        {
            let mut state = self.lock();
            state.users = self.client.users_cache().state(&UsersKey);
            if let Some(e) = &state.users.error {
                tracing::warn!(error = %e, "failed to load users");
            }
        }
        // The first user may have just become known.
        self.sync_feed();
    }

    fn sync_feed(self: &Arc<Self>) {
        let mut state = self.lock();
        let key = {
            let users = state.users.data.as_deref().map(Vec::as_slice);
            state.selection.query_key(users, self.page_size)
        };
        state.feed_key = key.clone();

        let Some(key) = key else {
            state.feed = QueryState::idle();
            self.publish(&state);
            return;
        };

        let resolution = self
            .client
            .resolve_feed(&key, Placeholder::keep_previous(state.shown_key.as_ref()));
        if resolution.state.data.is_some() && !resolution.state.is_placeholder {
            state.shown_key = Some(key.clone());
        }
        state.feed = resolution.state;
        self.publish(&state);
        drop(state);

        if let Some(fetch) = resolution.fetch {
            self.spawn_feed_wait(key, fetch);
        }
    }

    fn spawn_feed_wait(self: &Arc<Self>, key: QueryKey, fetch: InFlight<FeedPage>) {
        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let _ = fetch.await;
            inner.feed_settled(&key);
        });
    }

    fn feed_settled(&self, key: &QueryKey) {
        let mut state = self.lock();
        if state.feed_key.as_ref() != Some(key) {
            tracing::debug!(key = %key, "response for superseded key not shown");
            return;
        }

        let settled = self.client.feed_cache().state(key);
        if settled.is_fetching {
            // A newer fetch for the same key owns the entry now.
            return;
        }
        match &settled.error {
            Some(e) => tracing::warn!(key = %key, error = %e, "failed to load feed"),
            None => tracing::info!(
                key = %key,
                total = settled.data.as_ref().map_or(0, |p| p.total),
                "feed page loaded"
            ),
        }
        if settled.data.is_some() {
            state.shown_key = Some(key.clone());
        }
        state.feed = settled;
        self.publish(&state);
    }
}
