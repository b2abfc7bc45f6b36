//! List query engine implementation
//!
//! Translates user-adjustable query parameters into at most one backend
//! list request at a time. Parameter changes supersede whatever is in
//! flight: the outdated task is aborted and its generation invalidated,
//! so a stale response can never overwrite newer state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::QueryConfig;
use crate::query::{Debouncer, ListPage, ListQuery, PageWindow};
use crate::utils::errors::Result;
use crate::utils::logging::log_stale_response;

type Fetcher<T> = Box<dyn Fn(ListQuery) -> BoxFuture<'static, Result<ListPage<T>>> + Send + Sync>;

/// Tunable knobs for a [`ListQueryEngine`]
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Initial rows per page
    pub limit: u32,
    /// Quiet period for search edits
    pub search_debounce: Duration,
    /// Quiet period for page-size edits
    pub limit_debounce: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from(&QueryConfig::default())
    }
}

impl From<&QueryConfig> for EngineOptions {
    fn from(config: &QueryConfig) -> Self {
        Self {
            limit: config.default_limit,
            search_debounce: Duration::from_millis(config.search_debounce_ms),
            limit_debounce: Duration::from_millis(config.limit_debounce_ms),
        }
    }
}

/// Render-ready view of the engine state
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    pub rows: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub window: PageWindow,
    pub loading: bool,
    /// Dismissible message from the last failed fetch
    pub error: Option<String>,
}

struct EngineState<T> {
    query: ListQuery,
    rows: Vec<T>,
    total_pages: u32,
    total_items: u64,
    loading: bool,
    error: Option<String>,
    in_flight: Option<JoinHandle<()>>,
}

struct EngineInner<T> {
    fetcher: Fetcher<T>,
    state: Mutex<EngineState<T>>,
    /// Bumped on every issued request; completions with an older value
    /// are discarded.
    generation: AtomicU64,
    search_debounce: Debouncer,
    limit_debounce: Debouncer,
}

/// Debounced, cancellable paginated list query engine
pub struct ListQueryEngine<T>
where
    T: Clone + Send + 'static,
{
    inner: Arc<EngineInner<T>>,
}

impl<T> Clone for ListQueryEngine<T>
where
    T: Clone + Send + 'static,
{
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> ListQueryEngine<T>
where
    T: Clone + Send + 'static,
{
    /// Create an engine around an async fetcher
    pub fn new<F, Fut>(options: EngineOptions, fetcher: F) -> Self
    where
        F: Fn(ListQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ListPage<T>>> + Send + 'static,
    {
        let inner = Arc::new(EngineInner {
            fetcher: Box::new(move |query| fetcher(query).boxed()),
            state: Mutex::new(EngineState {
                query: ListQuery::new(options.limit),
                rows: Vec::new(),
                total_pages: 1,
                total_items: 0,
                loading: false,
                error: None,
                in_flight: None,
            }),
            generation: AtomicU64::new(0),
            search_debounce: Debouncer::new(options.search_debounce),
            limit_debounce: Debouncer::new(options.limit_debounce),
        });
        Self { inner }
    }

    /// Issue the initial request for the current query
    pub fn start(&self) {
        let mut state = self.inner.lock_state();
        EngineInner::spawn_fetch(&self.inner, &mut state);
    }

    /// Record a search keystroke; becomes effective after the quiet period
    pub fn set_search_input(&self, input: impl Into<String>) {
        let text = input.into();
        let inner = Arc::clone(&self.inner);
        self.inner.search_debounce.call(move || {
            EngineInner::apply(&inner, |query| {
                if query.search != text {
                    query.search = text;
                    query.page = 1;
                    true
                } else {
                    false
                }
            });
        });
    }

    /// Record a page-size edit; applied after the quiet period and only
    /// when the raw value parses to a positive integer.
    pub fn set_limit_input(&self, input: impl Into<String>) {
        let raw = input.into();
        let inner = Arc::clone(&self.inner);
        self.inner.limit_debounce.call(move || {
            let Some(limit) = raw.trim().parse::<u32>().ok().filter(|n| *n > 0) else {
                debug!(input = %raw, "Ignoring invalid page-size input");
                return;
            };
            EngineInner::apply(&inner, |query| {
                if query.limit != limit {
                    query.limit = limit;
                    query.page = 1;
                    true
                } else {
                    false
                }
            });
        });
    }

    /// Change the status/type filter; takes effect immediately
    pub fn set_filter(&self, filter: Option<String>) {
        EngineInner::apply(&self.inner, |query| {
            if query.filter != filter {
                query.filter = filter;
                query.page = 1;
                true
            } else {
                false
            }
        });
    }

    /// Navigate to an explicit page (1-based); not a reset
    pub fn set_page(&self, page: u32) {
        let page = page.max(1);
        EngineInner::apply(&self.inner, |query| {
            if query.page != page {
                query.page = page;
                true
            } else {
                false
            }
        });
    }

    pub fn next_page(&self) {
        let mut state = self.inner.lock_state();
        if state.query.page < state.total_pages {
            state.query.page += 1;
            EngineInner::spawn_fetch(&self.inner, &mut state);
        }
    }

    pub fn prev_page(&self) {
        let mut state = self.inner.lock_state();
        if state.query.page > 1 {
            state.query.page -= 1;
            EngineInner::spawn_fetch(&self.inner, &mut state);
        }
    }

    /// Manual re-trigger; the only retry mechanism in the system
    pub fn refresh(&self) {
        let mut state = self.inner.lock_state();
        EngineInner::spawn_fetch(&self.inner, &mut state);
    }

    pub fn dismiss_error(&self) {
        self.inner.lock_state().error = None;
    }

    /// Cancel the in-flight request and pending debounces, e.g. on view
    /// teardown.
    pub fn cancel(&self) {
        self.inner.search_debounce.cancel();
        self.inner.limit_debounce.cancel();
        if let Some(handle) = self.inner.lock_state().in_flight.take() {
            handle.abort();
        }
        // Anything already completed but not yet applied is now stale.
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Current query parameters
    pub fn query(&self) -> ListQuery {
        self.inner.lock_state().query.clone()
    }

    /// Render-ready view of rows, pagination, and errors
    pub fn snapshot(&self) -> ListSnapshot<T> {
        let state = self.inner.lock_state();
        ListSnapshot {
            rows: state.rows.clone(),
            page: state.query.page,
            limit: state.query.limit,
            total_pages: state.total_pages,
            total_items: state.total_items,
            window: PageWindow::compute(state.query.page, state.query.limit, state.total_items),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}

impl<T> EngineInner<T>
where
    T: Clone + Send + 'static,
{
    fn lock_state(&self) -> MutexGuard<'_, EngineState<T>> {
        self.state.lock().expect("engine lock poisoned")
    }

    /// Mutate the query; issue exactly one request when it changed
    fn apply<M>(inner: &Arc<Self>, mutate: M)
    where
        M: FnOnce(&mut ListQuery) -> bool,
    {
        let mut state = inner.lock_state();
        if mutate(&mut state.query) {
            Self::spawn_fetch(inner, &mut state);
        }
    }

    fn spawn_fetch(inner: &Arc<Self>, state: &mut EngineState<T>) {
        if let Some(previous) = state.in_flight.take() {
            previous.abort();
        }

        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        state.loading = true;
        let query = state.query.clone();
        let task_inner = Arc::clone(inner);
        let handle = tokio::spawn(async move {
            let result = (task_inner.fetcher)(query.clone()).await;
            Self::complete(&task_inner, generation, query, result);
        });
        state.in_flight = Some(handle);
    }

    fn complete(inner: &Arc<Self>, generation: u64, requested: ListQuery, result: Result<ListPage<T>>) {
        let mut state = inner.lock_state();
        let latest = inner.generation.load(Ordering::SeqCst);
        if generation != latest {
            log_stale_response(generation, latest);
            return;
        }

        state.loading = false;
        state.in_flight = None;

        match result {
            Ok(page) => {
                state.error = None;
                state.rows = page.rows;
                state.total_pages = page.total_pages;
                state.total_items = page.total_items;

                // A shrunken result set can leave the requested page past the
                // end; clamp down and refetch once. Not a user-initiated
                // reset, and it cannot loop: a clamped page never exceeds
                // the total again.
                let clamped = page.total_pages.max(1);
                if requested.page > page.total_pages && requested.page != clamped {
                    debug!(from = requested.page, to = clamped, "Clamping page to server-reported total");
                    state.query.page = clamped;
                    Self::spawn_fetch(inner, &mut state);
                }
            }
            Err(e) => {
                // Stale-but-available beats empty: keep the last good rows.
                warn!(error = %e, "List fetch failed");
                state.error = Some(e.to_string());
            }
        }
    }
}

impl<T> Drop for EngineInner<T> {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            if let Some(handle) = state.in_flight.take() {
                handle.abort();
            }
        }
    }
}
