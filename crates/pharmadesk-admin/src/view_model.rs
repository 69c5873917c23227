//! Product listing view-model.
//!
//! The rendered rows are always
//! `paginate(filtered source, page, page_size)`, where the filtered source
//! is the cached full list while the debounced query is blank and the
//! latest search result otherwise. The page resets to 1 whenever the
//! filtered source changes.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use pharmadesk_catalog::{paginate, total_pages, Pagination, Product};
use pharmadesk_store::SharedRepository;
use serde::Serialize;

use crate::{Debouncer, NotFoundReason, ProductListConfig, SearchPhase};

#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterSource {
    Cached,
    Searched(Vec<Product>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ListStatus {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug)]
struct ListState {
    cached: Vec<Product>,
    list_status: ListStatus,
    source: FilterSource,
    raw_query: String,
    debounced_query: String,
    page: usize,
    phase: SearchPhase,
    /// Bumped on every debounced change and on close; a search result is
    /// applied only if its ticket still carries the current value.
    generation: u64,
    /// Bumped on every `load`; only the latest list fetch is applied.
    load_generation: u64,
    closed: bool,
}

impl ListState {
    fn new() -> Self {
        Self {
            cached: Vec::new(),
            list_status: ListStatus::Loading,
            source: FilterSource::Cached,
            raw_query: String::new(),
            debounced_query: String::new(),
            page: 1,
            phase: SearchPhase::Loading,
            generation: 0,
            load_generation: 0,
            closed: false,
        }
    }

    fn filtered(&self) -> &[Product] {
        match &self.source {
            FilterSource::Cached => &self.cached,
            FilterSource::Searched(products) => products,
        }
    }

    fn idle_phase(&self) -> SearchPhase {
        match &self.list_status {
            ListStatus::Loading => SearchPhase::Loading,
            ListStatus::Loaded => SearchPhase::Idle,
            ListStatus::Failed(reason) => SearchPhase::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

struct SearchTicket {
    generation: u64,
    query: String,
}

/// Snapshot of what the product table renders.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    /// Rows on the current page.
    pub products: Vec<Product>,
    /// Page controls.
    pub pagination: Pagination,
    /// Text in the search box.
    pub raw_query: String,
    /// Load/search phase.
    pub phase: SearchPhase,
}

impl ListView {
    /// Placeholder text shown instead of rows.
    pub fn message(&self) -> Option<&'static str> {
        self.phase.message()
    }
}

struct Shared {
    repo: SharedRepository,
    config: ProductListConfig,
    state: Mutex<ListState>,
    debouncer: Debouncer,
}

/// View-model behind the admin product table.
///
/// Handles are cheap to clone and share one state. One instance lives for
/// one visit of the products page; call [`close`](Self::close) when the
/// page goes away.
#[derive(Clone)]
pub struct ProductListViewModel {
    shared: Arc<Shared>,
}

impl ProductListViewModel {
    /// Create a view-model over `repo`. Nothing is fetched until
    /// [`load`](Self::load).
    pub fn new(repo: SharedRepository, config: ProductListConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                repo,
                config,
                state: Mutex::new(ListState::new()),
                debouncer: Debouncer::new(),
            }),
        }
    }

    fn upgrade(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    /// Fetch the full product list into the cache.
    ///
    /// A failure leaves the cache empty and shows `Unavailable` rather than
    /// an empty table. When loads overlap, only the latest one is applied.
    pub async fn load(&self) {
        let ticket = {
            let mut state = self.shared.state.lock();
            if state.closed {
                return;
            }
            state.load_generation += 1;
            state.load_generation
        };

        let result = self.shared.repo.list().await;

        let mut state = self.shared.state.lock();
        if state.closed {
            return;
        }
        if state.load_generation != ticket {
            tracing::debug!(ticket, "dropping superseded product list");
            return;
        }
        match result {
            Ok(mut products) => {
                if let Some(tag) = &self.shared.config.tag {
                    products.retain(|p| p.has_tag(tag));
                }
                tracing::debug!(count = products.len(), "product list loaded");
                state.cached = products;
                state.list_status = ListStatus::Loaded;
            }
            Err(e) => {
                tracing::warn!(error = %e, "product list failed");
                state.cached.clear();
                state.list_status = ListStatus::Failed(e.to_string());
            }
        }

        if state.debounced_query.trim().is_empty() {
            let phase = state.idle_phase();
            state.source = FilterSource::Cached;
            state.phase = phase;
            state.page = 1;
        }
    }

    /// Record a keystroke and restart the debounce timer.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.shared.state.lock();
            if state.closed {
                return;
            }
            state.raw_query = text.clone();
        }

        let weak = Arc::downgrade(&self.shared);
        self.shared
            .debouncer
            .schedule(self.shared.config.debounce(), async move {
                if let Some(vm) = Self::upgrade(&weak) {
                    vm.fire_debounced(text);
                }
            });
    }

    fn fire_debounced(&self, text: String) {
        if self.debounced_query() == text {
            return;
        }
        if let Some(ticket) = self.begin_query(&text) {
            let vm = self.clone();
            tokio::spawn(async move { vm.run_search(ticket).await });
        }
    }

    /// Apply a settled query.
    ///
    /// A blank query shows the cached list without calling the store.
    /// Anything else issues one search whose result becomes the filtered
    /// source, unless a newer query was issued before it came back.
    pub async fn on_debounced_query_change(&self, text: &str) {
        if let Some(ticket) = self.begin_query(text) {
            self.run_search(ticket).await;
        }
    }

    fn begin_query(&self, text: &str) -> Option<SearchTicket> {
        let mut state = self.shared.state.lock();
        if state.closed {
            return None;
        }
        state.generation += 1;
        state.debounced_query = text.to_string();
        state.page = 1;

        if text.trim().is_empty() {
            let phase = state.idle_phase();
            state.source = FilterSource::Cached;
            state.phase = phase;
            tracing::debug!("query cleared");
            return None;
        }

        state.phase = SearchPhase::Searching {
            query: text.to_string(),
        };
        tracing::debug!(query = text, generation = state.generation, "search issued");
        Some(SearchTicket {
            generation: state.generation,
            query: text.to_string(),
        })
    }

    async fn run_search(&self, ticket: SearchTicket) {
        let result = self.shared.repo.search(&ticket.query).await;

        let mut state = self.shared.state.lock();
        if state.closed || state.generation != ticket.generation {
            tracing::debug!(query = %ticket.query, "dropping superseded search result");
            return;
        }

        let (products, phase) = match result {
            Ok(products) if products.is_empty() => (
                products,
                SearchPhase::NotFound {
                    query: ticket.query,
                    reason: NotFoundReason::NoMatches,
                },
            ),
            Ok(products) => (products, SearchPhase::Results { query: ticket.query }),
            Err(e) => {
                tracing::warn!(query = %ticket.query, error = %e, "product search failed");
                (
                    Vec::new(),
                    SearchPhase::NotFound {
                        query: ticket.query,
                        reason: NotFoundReason::Failed(e.to_string()),
                    },
                )
            }
        };
        state.source = FilterSource::Searched(products);
        state.phase = phase;
        state.page = 1;
    }

    /// Jump to `page`. Out-of-range pages render empty.
    pub fn set_page(&self, page: usize) {
        self.shared.state.lock().page = page;
    }

    /// Advance one page, stopping at the last.
    pub fn next_page(&self) -> usize {
        let mut state = self.shared.state.lock();
        let last = total_pages(state.filtered().len(), self.shared.config.page_size);
        state.page = (state.page + 1).clamp(1, last);
        state.page
    }

    /// Go back one page, stopping at the first.
    pub fn prev_page(&self) -> usize {
        let mut state = self.shared.state.lock();
        let last = total_pages(state.filtered().len(), self.shared.config.page_size);
        state.page = state.page.saturating_sub(1).clamp(1, last);
        state.page
    }

    /// Current page (1-indexed).
    pub fn page(&self) -> usize {
        self.shared.state.lock().page
    }

    /// Page count of the filtered source, at least 1.
    pub fn total_pages(&self) -> usize {
        let state = self.shared.state.lock();
        total_pages(state.filtered().len(), self.shared.config.page_size)
    }

    /// Text currently in the search box.
    pub fn raw_query(&self) -> String {
        self.shared.state.lock().raw_query.clone()
    }

    /// Last settled query.
    pub fn debounced_query(&self) -> String {
        self.shared.state.lock().debounced_query.clone()
    }

    /// The whole filtered source, before pagination.
    pub fn filtered_products(&self) -> Vec<Product> {
        self.shared.state.lock().filtered().to_vec()
    }

    /// Number of products in the cached full list.
    pub fn cached_len(&self) -> usize {
        self.shared.state.lock().cached.len()
    }

    /// Current phase; `Debouncing` while a keystroke is waiting to settle.
    pub fn phase(&self) -> SearchPhase {
        let pending = self.shared.debouncer.is_pending();
        let state = self.shared.state.lock();
        if pending && !state.closed {
            SearchPhase::Debouncing {
                pending: state.raw_query.clone(),
            }
        } else {
            state.phase.clone()
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ListView {
        let phase = self.phase();
        let page_size = self.shared.config.page_size;
        let state = self.shared.state.lock();
        let filtered = state.filtered();
        ListView {
            products: paginate(filtered, state.page, page_size).to_vec(),
            pagination: Pagination::new(state.page, page_size, filtered.len()),
            raw_query: state.raw_query.clone(),
            phase,
        }
    }

    /// Tear down: cancel the pending debounce and ignore any search still
    /// in flight. Later calls on this view-model are no-ops.
    pub fn close(&self) {
        self.shared.debouncer.cancel();
        let mut state = self.shared.state.lock();
        state.closed = true;
        state.generation += 1;
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }
}
