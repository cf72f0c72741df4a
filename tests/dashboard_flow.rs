//! End-to-end workflow tests against an in-memory `OrdersApi`.
//!
//! The fake backend keeps orders newest-first, counts calls per endpoint, and
//! can hold individual requests on `oneshot` gates so tests control exactly
//! when each response lands.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

use delivery_tax_dashboard::prelude::*;

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    List { offset: u32 },
    Create,
    Import,
}

#[derive(Default)]
struct FakeApi {
    orders: Mutex<Vec<Order>>,
    next_id: Mutex<i64>,
    next_import_id: Mutex<i64>,
    imported: Mutex<HashSet<Vec<u8>>>,
    /// (total, inserted, failed) reported for a fresh import.
    import_counts: Mutex<(u64, u64, u64)>,
    create_failure: Mutex<Option<(u16, String)>>,
    list_failure: Mutex<Option<(u16, String)>>,

    list_gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
    create_gate: Mutex<Option<oneshot::Receiver<()>>>,
    import_gate: Mutex<Option<oneshot::Receiver<()>>>,
    started: Mutex<Option<mpsc::UnboundedSender<Call>>>,

    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    import_calls: AtomicUsize,
}

impl FakeApi {
    fn with_orders(count: i64) -> Arc<Self> {
        let fake = FakeApi {
            next_import_id: Mutex::new(7),
            import_counts: Mutex::new((10, 8, 2)),
            ..Default::default()
        };
        for _ in 0..count {
            fake.insert(sample_request(40.7128, -74.006, 25.0));
        }
        Arc::new(fake)
    }

    fn insert(&self, req: OrderCreate) -> Order {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let order = make_order(id, &req);
        self.orders.lock().unwrap().insert(0, order.clone());
        order
    }

    fn watch_calls(&self) -> mpsc::UnboundedReceiver<Call> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.started.lock().unwrap() = Some(tx);
        rx
    }

    fn gate_list(&self, offset: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().unwrap().insert(offset, rx);
        tx
    }

    fn gate_create(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.create_gate.lock().unwrap() = Some(rx);
        tx
    }

    fn gate_import(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.import_gate.lock().unwrap() = Some(rx);
        tx
    }

    fn notify(&self, call: Call) {
        if let Some(tx) = self.started.lock().unwrap().as_ref() {
            let _ = tx.send(call);
        }
    }

    fn status_error(failure: &Mutex<Option<(u16, String)>>) -> Option<HttpError> {
        failure
            .lock()
            .unwrap()
            .clone()
            .map(|(status, message)| HttpError::Status { status, message })
    }
}

#[async_trait]
impl OrdersApi for FakeApi {
    async fn list_orders(&self, query: &OrdersQuery) -> Result<OrdersPage, HttpError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.notify(Call::List {
            offset: query.offset,
        });
        let gate = self.list_gates.lock().unwrap().remove(&query.offset);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(err) = Self::status_error(&self.list_failure) {
            return Err(err);
        }

        let orders = self.orders.lock().unwrap();
        let start = (query.offset as usize).min(orders.len());
        let end = (start + query.limit as usize).min(orders.len());
        Ok(OrdersPage {
            items: orders[start..end].to_vec(),
            total: orders.len() as u64,
            limit: query.limit,
            offset: query.offset,
        })
    }

    async fn create_order(&self, request: &OrderCreate) -> Result<Order, HttpError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.notify(Call::Create);
        let gate = self.create_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(err) = Self::status_error(&self.create_failure) {
            return Err(err);
        }
        Ok(self.insert(request.clone()))
    }

    async fn import_orders(&self, file: &StagedFile) -> Result<ImportOutcome, HttpError> {
        self.import_calls.fetch_add(1, Ordering::SeqCst);
        self.notify(Call::Import);
        let gate = self.import_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if !self.imported.lock().unwrap().insert(file.bytes.clone()) {
            return Ok(ImportOutcome::Duplicate {
                error: "File already imported".into(),
            });
        }

        let (total, inserted, failed) = *self.import_counts.lock().unwrap();
        for _ in 0..inserted {
            self.insert(sample_request(42.65, -73.75, 10.0));
        }
        let import_id = {
            let mut next = self.next_import_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        Ok(ImportOutcome::Success(ImportSummary {
            import_id,
            total,
            inserted,
            failed,
        }))
    }
}

fn sample_request(latitude: f64, longitude: f64, subtotal: f64) -> OrderCreate {
    OrderCreate {
        latitude,
        longitude,
        subtotal,
        timestamp: Utc.with_ymd_and_hms(2026, 2, 23, 10, 15, 0).unwrap(),
    }
}

fn make_order(id: i64, req: &OrderCreate) -> Order {
    let rate = 0.08;
    let tax = (req.subtotal * rate * 100.0).round() / 100.0;
    Order {
        id: OrderId::new(id),
        latitude: req.latitude,
        longitude: req.longitude,
        subtotal: req.subtotal,
        timestamp: req.timestamp,
        composite_tax_rate: rate,
        tax_amount: tax,
        total_amount: req.subtotal + tax,
        breakdown: TaxBreakdown {
            state_rate: 0.04,
            county_rate: 0.04,
            city_rate: 0.0,
            special_rates: vec![],
        },
        jurisdictions: Some(Jurisdictions {
            state: Some("New York".into()),
            county: Some("Albany".into()),
            city: None,
            special: vec![],
        }),
    }
}

fn client_for(fake: &Arc<FakeApi>) -> DashboardClient<Arc<FakeApi>> {
    DashboardClientBuilder::new().build_with(Arc::clone(fake))
}

async fn fill_form(client: &DashboardClient<Arc<FakeApi>>, lat: &str, lon: &str, subtotal: &str) {
    let create = client.create();
    create.set_field(FormField::Latitude, lat).await;
    create.set_field(FormField::Longitude, lon).await;
    create.set_field(FormField::Subtotal, subtotal).await;
    create.set_field(FormField::Timestamp, "2026-02-23T10:15:00Z").await;
}

async fn next_call(rx: &mut mpsc::UnboundedReceiver<Call>) -> Call {
    timeout(TEST_TIMEOUT, rx.recv())
        .await
        .expect("timed out waiting for a call")
        .expect("call channel closed")
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_increments_total_and_prepends() {
    let fake = FakeApi::with_orders(3);
    let client = client_for(&fake);
    assert!(client.orders().refresh().await.unwrap());
    assert_eq!(client.orders().total().await, 3);

    fill_form(&client, "40,75", "-73.99", "19.99").await;
    let outcome = client.create().submit().await.unwrap();
    let created = match outcome {
        CreateOutcome::Created(order) => order,
        other => panic!("expected Created, got {other:?}"),
    };
    assert_eq!(created.latitude, 40.75);

    let store = client.orders().snapshot().await;
    assert_eq!(store.total(), 4);
    assert_eq!(store.orders()[0].id, created.id);
    assert_eq!(fake.list_calls.load(Ordering::SeqCst), 1, "no refetch after create");

    assert!(matches!(client.create().state().await, CreateState::Success(_)));
    assert!(client.create().form().await.latitude.is_empty());
}

#[tokio::test]
async fn zero_latitude_is_rejected_without_network() {
    let fake = FakeApi::with_orders(0);
    let client = client_for(&fake);

    fill_form(&client, "0", "-73.99", "19.99").await;
    let err = client.create().submit().await.unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Create(CreateError::Validation(ValidationError::MissingLatitude))
    ));
    assert_eq!(err.user_message(), "Fill all fields");
    assert_eq!(
        client.create().state().await,
        CreateState::Error("Fill all fields".into())
    );
    assert_eq!(fake.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn create_failure_keeps_entered_values() {
    let fake = FakeApi::with_orders(1);
    *fake.create_failure.lock().unwrap() = Some((422, "Point is outside New York State".into()));
    let client = client_for(&fake);
    client.orders().refresh().await.unwrap();

    fill_form(&client, "51.5", "-0.12", "10").await;
    let err = client.create().submit().await.unwrap_err();
    assert_eq!(err.user_message(), "Point is outside New York State");
    assert_eq!(client.create().form().await.latitude, "51.5");
    assert_eq!(client.orders().total().await, 1);

    // editing clears the error
    client.create().set_field(FormField::Latitude, "40.7").await;
    assert_eq!(client.create().state().await, CreateState::Entry);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_busy() {
    let fake = FakeApi::with_orders(0);
    let mut calls = fake.watch_calls();
    let release = fake.gate_create();
    let client = client_for(&fake);
    fill_form(&client, "40.7", "-74.0", "12").await;

    let background = client.clone();
    let first = tokio::spawn(async move { background.create().submit().await });
    assert_eq!(next_call(&mut calls).await, Call::Create);

    let err = client.create().submit().await.unwrap_err();
    assert!(matches!(err, DashboardError::Create(CreateError::Busy)));

    release.send(()).unwrap();
    let outcome = first.await.unwrap().unwrap();
    assert!(matches!(outcome, CreateOutcome::Created(_)));
    assert_eq!(fake.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn closing_create_drawer_discards_late_response() {
    let fake = FakeApi::with_orders(2);
    let mut calls = fake.watch_calls();
    let client = client_for(&fake);
    client.orders().refresh().await.unwrap();
    assert!(matches!(next_call(&mut calls).await, Call::List { .. }));

    let release = fake.gate_create();
    fill_form(&client, "40.7", "-74.0", "12").await;
    let background = client.clone();
    let pending = tokio::spawn(async move { background.create().submit().await });
    assert_eq!(next_call(&mut calls).await, Call::Create);

    client.create().close().await;
    assert_eq!(client.create().state().await, CreateState::Entry);

    release.send(()).unwrap();
    assert_eq!(pending.await.unwrap().unwrap(), CreateOutcome::Discarded);
    assert_eq!(client.orders().total().await, 2);
    assert_eq!(client.create().state().await, CreateState::Entry);
}

// ─── Loads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn small_result_set_is_a_single_page() {
    let fake = FakeApi::with_orders(3);
    let client = DashboardClientBuilder::new()
        .list_limit(5)
        .build_with(Arc::clone(&fake));
    client.orders().refresh().await.unwrap();

    assert_eq!(client.orders().total().await, 3);
    assert_eq!(client.orders().page_count().await, 1);
    let page = client.orders().listing(&ListingQuery::new().with_page(4)).await;
    assert_eq!(page.page, 1);
    assert_eq!(page.page_count, 1);
    assert_eq!(page.items.len(), 3);
    assert!(!page.show_pager());
}

#[tokio::test]
async fn earlier_load_is_discarded_even_when_it_lands_first() {
    let fake = FakeApi::with_orders(10);
    let mut calls = fake.watch_calls();
    let release_first = fake.gate_list(0);
    let release_second = fake.gate_list(5);
    let client = DashboardClientBuilder::new()
        .list_limit(5)
        .build_with(Arc::clone(&fake));

    let c1 = client.clone();
    let first = tokio::spawn(async move { c1.orders().load(OrdersQuery::new().with_limit(5)).await });
    assert_eq!(next_call(&mut calls).await, Call::List { offset: 0 });

    let c2 = client.clone();
    let second = tokio::spawn(async move { c2.orders().load_page(2).await });
    assert_eq!(next_call(&mut calls).await, Call::List { offset: 5 });

    release_first.send(()).unwrap();
    assert!(!first.await.unwrap().unwrap(), "superseded load must not apply");
    assert!(client.orders().snapshot().await.is_empty());

    release_second.send(()).unwrap();
    assert!(second.await.unwrap().unwrap());

    let store = client.orders().snapshot().await;
    let ids: Vec<i64> = store.orders().iter().map(|o| o.id.get()).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    assert_eq!(store.last_query().unwrap().offset, 5);
}

#[tokio::test]
async fn failed_load_leaves_cache_untouched() {
    let fake = FakeApi::with_orders(2);
    let client = client_for(&fake);
    client.orders().refresh().await.unwrap();

    *fake.list_failure.lock().unwrap() = Some((500, "Internal Server Error".into()));
    let err = client.orders().refresh().await.unwrap_err();
    assert_eq!(err.user_message(), "Internal Server Error");
    assert_eq!(client.orders().snapshot().await.len(), 2);
}

#[tokio::test]
async fn refresh_after_failed_load_reruns_the_shown_page() {
    let fake = FakeApi::with_orders(30);
    let client = client_for(&fake);
    client.orders().refresh().await.unwrap();
    assert_eq!(client.orders().page_count().await, 2);

    *fake.list_failure.lock().unwrap() = Some((500, "Internal Server Error".into()));
    let failed = client
        .orders()
        .load(OrdersQuery::new().with_limit(5).with_offset(20))
        .await;
    assert!(failed.is_err());
    assert_eq!(client.orders().page_count().await, 2);
    *fake.list_failure.lock().unwrap() = None;

    let mut calls = fake.watch_calls();
    assert!(client.orders().refresh().await.unwrap());
    assert_eq!(next_call(&mut calls).await, Call::List { offset: 0 });

    let store = client.orders().snapshot().await;
    assert_eq!(store.len(), 20);
    assert_eq!(store.last_query().unwrap().limit, 20);
}

#[tokio::test]
async fn invalid_query_never_reaches_network() {
    let fake = FakeApi::with_orders(2);
    let client = client_for(&fake);
    let err = client
        .orders()
        .load(OrdersQuery::new().with_subtotal_range(Some(50.0), Some(10.0)))
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Query(QueryError::InvertedSubtotalRange)));
    assert_eq!(fake.list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn health_check_reports_status() {
    let fake = FakeApi::with_orders(4);
    let client = client_for(&fake);
    assert_eq!(client.orders().check_api().await, ApiStatus::Online { total: 4 });
    assert!(client.orders().snapshot().await.is_empty(), "probe must not fill the cache");

    *fake.list_failure.lock().unwrap() = Some((503, "Service Unavailable".into()));
    assert_eq!(
        client.orders().check_api().await,
        ApiStatus::Error("Service Unavailable".into())
    );
}

// ─── Import ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn import_success_refreshes_store() {
    let fake = FakeApi::with_orders(3);
    let client = client_for(&fake);
    client.orders().refresh().await.unwrap();

    client
        .import()
        .select_file(StagedFile::new("orders.csv", b"latitude,longitude\n1,2\n".to_vec()))
        .await
        .unwrap();
    let result = client.import().upload().await.unwrap();
    assert_eq!(
        result,
        UploadResult::Imported {
            summary: ImportSummary {
                import_id: 7,
                total: 10,
                inserted: 8,
                failed: 2
            },
            refreshed: true
        }
    );
    assert_eq!(client.orders().total().await, 11);

    let wf = client.import().snapshot().await;
    assert_eq!(wf.progress(), 100);
    assert!(!wf.can_submit());
    let err = client.import().upload().await.unwrap_err();
    assert!(matches!(err, DashboardError::Import(ImportError::AlreadyImported)));
    assert_eq!(fake.import_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn duplicate_blocks_resubmission_until_reset() {
    let fake = FakeApi::with_orders(0);
    let client = client_for(&fake);
    let bytes = b"latitude,longitude,subtotal,timestamp\n".to_vec();

    client.import().select_file(StagedFile::new("a.csv", bytes.clone())).await.unwrap();
    client.import().upload().await.unwrap();
    client.import().reset().await;

    client.import().select_file(StagedFile::new("a-copy.CSV", bytes)).await.unwrap();
    let result = client.import().upload().await.unwrap();
    assert_eq!(result, UploadResult::Duplicate("File already imported".into()));
    assert_eq!(
        client.import().snapshot().await.state(),
        &ImportState::Duplicate("File already imported".into())
    );

    let err = client.import().upload().await.unwrap_err();
    assert!(matches!(err, DashboardError::Import(ImportError::DuplicateBlocked)));
    assert_eq!(fake.import_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn non_csv_file_never_uploads() {
    let fake = FakeApi::with_orders(0);
    let client = client_for(&fake);
    let err = client
        .import()
        .select_file(StagedFile::new("orders.xlsx", vec![1, 2, 3]))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Select a .csv file");
    let err = client.import().upload().await.unwrap_err();
    assert!(matches!(err, DashboardError::Import(ImportError::NoFile)));
    assert_eq!(fake.import_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn closing_import_drawer_discards_late_response() {
    let fake = FakeApi::with_orders(1);
    let mut calls = fake.watch_calls();
    let release = fake.gate_import();
    let client = client_for(&fake);

    client
        .import()
        .select_file(StagedFile::new("orders.csv", b"x".to_vec()))
        .await
        .unwrap();
    let background = client.clone();
    let pending = tokio::spawn(async move { background.import().upload().await });
    assert_eq!(next_call(&mut calls).await, Call::Import);
    assert_eq!(client.import().progress().await, 60);

    client.import().close().await;
    release.send(()).unwrap();
    assert_eq!(pending.await.unwrap().unwrap(), UploadResult::Discarded);

    let wf = client.import().snapshot().await;
    assert_eq!(wf.state(), &ImportState::Idle);
    assert_eq!(wf.progress(), 0);
    assert_eq!(fake.list_calls.load(Ordering::SeqCst), 0, "no refresh after discard");
}

// ─── Selection ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn selection_drives_map_and_list() {
    let fake = FakeApi::with_orders(10);
    let client = client_for(&fake);
    client.orders().refresh().await.unwrap();

    let target = OrderId::new(1);
    assert!(client.selection().select(target).await);
    let revision = client.selection().revision().await;
    assert!(!client.selection().select(target).await);
    assert_eq!(client.selection().revision().await, revision);

    let fly = client.selection().fly_to().await.unwrap();
    assert_eq!(fly.target, Coordinates::new(40.7128, -74.006));
    assert_eq!(fly.zoom, 12.0);

    // id 1 is the oldest, so it sits on the second page of 8
    let first = client.orders().listing(&ListingQuery::new()).await;
    assert_eq!(client.selection().highlighted_row(&first).await, None);
    let second = client.orders().listing(&ListingQuery::new().with_page(2)).await;
    assert_eq!(client.selection().highlighted_row(&second).await, Some(1));

    match client.selection().overlay(None).await {
        MapOverlay::Selected { label, .. } => assert_eq!(label, "ORD-001"),
        other => panic!("expected Selected overlay, got {other:?}"),
    }

    client.selection().clear().await;
    assert!(client.selection().selected().await.is_none());
}

#[tokio::test]
async fn selection_of_unloaded_order_resolves_to_none() {
    let fake = FakeApi::with_orders(2);
    let client = client_for(&fake);
    client.orders().refresh().await.unwrap();

    client.selection().select(OrderId::new(404)).await;
    assert!(client.selection().selected().await.is_none());
    assert!(client.selection().fly_to().await.is_none());
    let pointer = Coordinates::new(42.0, -75.0);
    assert_eq!(
        client.selection().overlay(Some(pointer)).await,
        MapOverlay::Pointer { position: pointer }
    );
}
