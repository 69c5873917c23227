//! Out-of-order search completions.
//!
//! Searches (and, when gated, list fetches) against `GatedRepository` only
//! resolve when the test releases them, so completion order can be chosen
//! independently of issue order.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pharmadesk_admin::{NotFoundReason, ProductListConfig, ProductListViewModel, SearchPhase};
use pharmadesk_catalog::Product;
use pharmadesk_store::{ProductRepository, StoreError, StoreResult};
use tokio::sync::oneshot;

type Reply = StoreResult<Vec<Product>>;

#[derive(Default)]
struct GatedRepository {
    cached: Vec<Product>,
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    list_gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
}

impl GatedRepository {
    fn new(cached: Vec<Product>) -> Self {
        Self {
            cached,
            gates: Mutex::new(HashMap::new()),
            list_gates: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a pending list fetch; fetches take gates in call order.
    fn gate_list(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().push_back(rx);
        tx
    }

    /// Register a pending search for `query`; send on the returned channel
    /// to let it complete.
    fn gate(&self, query: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(query.to_string(), rx);
        tx
    }
}

#[async_trait]
impl ProductRepository for GatedRepository {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        let gate = self.list_gates.lock().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(StoreError::Unavailable("gate dropped".into()))),
            None => Ok(self.cached.clone()),
        }
    }

    async fn search(&self, text: &str) -> StoreResult<Vec<Product>> {
        let gate = self.gates.lock().remove(text);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(StoreError::Unavailable("gate dropped".into()))),
            None => Err(StoreError::Unavailable(format!("no gate for {}", text))),
        }
    }
}

fn catalog(n: usize) -> Vec<Product> {
    (1..=n)
        .map(|i| Product::new(format!("p{}", i), format!("Product {}", i), 100))
        .collect()
}

fn named(id: &str, name: &str) -> Product {
    Product::new(id, name, 100)
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

async fn setup() -> (Arc<GatedRepository>, ProductListViewModel) {
    let repo = Arc::new(GatedRepository::new(catalog(25)));
    let vm = ProductListViewModel::new(repo.clone(), ProductListConfig::default());
    vm.load().await;
    (repo, vm)
}

#[tokio::test]
async fn test_late_result_for_superseded_query_is_dropped() {
    let (repo, vm) = setup().await;
    let gate_a = repo.gate("a");
    let gate_ab = repo.gate("ab");

    let first = tokio::spawn({
        let vm = vm.clone();
        async move { vm.on_debounced_query_change("a").await }
    });
    settle().await;
    assert_eq!(vm.phase(), SearchPhase::Searching { query: "a".into() });

    let second = tokio::spawn({
        let vm = vm.clone();
        async move { vm.on_debounced_query_change("ab").await }
    });
    settle().await;
    assert_eq!(vm.phase(), SearchPhase::Searching { query: "ab".into() });

    gate_ab.send(Ok(vec![named("x1", "Abacavir")])).unwrap();
    second.await.unwrap();
    assert_eq!(vm.phase(), SearchPhase::Results { query: "ab".into() });

    gate_a
        .send(Ok(vec![named("y1", "Aspirin"), named("y2", "Amoxicillin")]))
        .unwrap();
    first.await.unwrap();

    let filtered = vm.filtered_products();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id.as_str(), "x1");
    assert_eq!(vm.phase(), SearchPhase::Results { query: "ab".into() });
}

#[tokio::test]
async fn test_stale_failure_does_not_clobber_results() {
    let (repo, vm) = setup().await;
    let gate_a = repo.gate("a");
    let gate_ab = repo.gate("ab");

    let first = tokio::spawn({
        let vm = vm.clone();
        async move { vm.on_debounced_query_change("a").await }
    });
    settle().await;
    let second = tokio::spawn({
        let vm = vm.clone();
        async move { vm.on_debounced_query_change("ab").await }
    });
    settle().await;

    gate_ab.send(Ok(vec![named("x1", "Abacavir")])).unwrap();
    second.await.unwrap();
    gate_a
        .send(Err(StoreError::Unavailable("timeout".into())))
        .unwrap();
    first.await.unwrap();

    assert_eq!(vm.phase(), SearchPhase::Results { query: "ab".into() });
    assert_eq!(vm.view().products.len(), 1);
}

#[tokio::test]
async fn test_in_order_completion_applies_latest() {
    let (repo, vm) = setup().await;
    let gate_a = repo.gate("a");
    let gate_ab = repo.gate("ab");

    let first = tokio::spawn({
        let vm = vm.clone();
        async move { vm.on_debounced_query_change("a").await }
    });
    settle().await;
    let second = tokio::spawn({
        let vm = vm.clone();
        async move { vm.on_debounced_query_change("ab").await }
    });
    settle().await;

    gate_a.send(Ok(vec![named("y1", "Aspirin")])).unwrap();
    first.await.unwrap();
    assert_eq!(vm.phase(), SearchPhase::Searching { query: "ab".into() });

    gate_ab.send(Ok(vec![])).unwrap();
    second.await.unwrap();
    assert_eq!(
        vm.phase(),
        SearchPhase::NotFound {
            query: "ab".into(),
            reason: NotFoundReason::NoMatches
        }
    );
    assert!(vm.filtered_products().is_empty());
}

#[tokio::test]
async fn test_clearing_while_search_in_flight_keeps_cached_list() {
    let (repo, vm) = setup().await;
    let gate = repo.gate("aspirin");

    let search = tokio::spawn({
        let vm = vm.clone();
        async move { vm.on_debounced_query_change("aspirin").await }
    });
    settle().await;

    vm.on_debounced_query_change("").await;
    assert_eq!(vm.phase(), SearchPhase::Idle);

    gate.send(Ok(vec![named("y1", "Aspirin")])).unwrap();
    search.await.unwrap();

    assert_eq!(vm.phase(), SearchPhase::Idle);
    assert_eq!(vm.filtered_products().len(), 25);
}

#[tokio::test]
async fn test_close_discards_in_flight_search() {
    let (repo, vm) = setup().await;
    let gate = repo.gate("aspirin");

    let search = tokio::spawn({
        let vm = vm.clone();
        async move { vm.on_debounced_query_change("aspirin").await }
    });
    settle().await;

    vm.close();
    gate.send(Ok(vec![named("y1", "Aspirin")])).unwrap();
    search.await.unwrap();

    assert_eq!(vm.phase(), SearchPhase::Searching { query: "aspirin".into() });
    assert_eq!(vm.filtered_products().len(), 25);
}

#[tokio::test(start_paused = true)]
async fn test_typed_queries_resolving_out_of_order() {
    let (repo, vm) = setup().await;
    let gate_a = repo.gate("a");
    let gate_ab = repo.gate("ab");

    vm.set_query("a");
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(vm.phase(), SearchPhase::Searching { query: "a".into() });

    vm.set_query("ab");
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(vm.phase(), SearchPhase::Searching { query: "ab".into() });

    gate_ab.send(Ok(vec![named("x1", "Abacavir")])).unwrap();
    settle().await;
    assert_eq!(vm.phase(), SearchPhase::Results { query: "ab".into() });

    gate_a
        .send(Ok(vec![named("y1", "Aspirin"), named("y2", "Amoxicillin")]))
        .unwrap();
    settle().await;

    assert_eq!(vm.phase(), SearchPhase::Results { query: "ab".into() });
    let ids: Vec<String> = vm
        .filtered_products()
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(ids, vec!["x1".to_string()]);
}

#[tokio::test]
async fn test_overlapping_loads_keep_the_latest_list() {
    let repo = Arc::new(GatedRepository::new(Vec::new()));
    let vm = ProductListViewModel::new(repo.clone(), ProductListConfig::default());
    let gate_first = repo.gate_list();
    let gate_second = repo.gate_list();

    let first = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load().await }
    });
    settle().await;
    let second = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load().await }
    });
    settle().await;

    gate_second.send(Ok(catalog(3))).unwrap();
    second.await.unwrap();
    assert_eq!(vm.cached_len(), 3);
    assert_eq!(vm.phase(), SearchPhase::Idle);

    gate_first.send(Ok(catalog(25))).unwrap();
    first.await.unwrap();

    assert_eq!(vm.cached_len(), 3);
    assert_eq!(vm.total_pages(), 1);
    assert_eq!(vm.phase(), SearchPhase::Idle);
}

#[tokio::test]
async fn test_stale_list_failure_does_not_clear_cache() {
    let repo = Arc::new(GatedRepository::new(Vec::new()));
    let vm = ProductListViewModel::new(repo.clone(), ProductListConfig::default());
    let gate_first = repo.gate_list();
    let gate_second = repo.gate_list();

    let first = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load().await }
    });
    settle().await;
    let second = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load().await }
    });
    settle().await;

    gate_second.send(Ok(catalog(12))).unwrap();
    second.await.unwrap();
    gate_first
        .send(Err(StoreError::Unavailable("timeout".into())))
        .unwrap();
    first.await.unwrap();

    assert_eq!(vm.cached_len(), 12);
    assert_eq!(vm.phase(), SearchPhase::Idle);
}
