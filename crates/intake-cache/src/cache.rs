//! The cache core.
//!
//! All state sits behind one mutex. Every accessor takes it, runs the
//! refresh gate, reloads whatever is stale and returns the slot, so callers
//! never see a half-built snapshot. Source I/O happens with the lock held.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, NaiveDate, Utc};
use intake_ingest::{OrderReceipt, StoreError, Table, TabularStore, append_order};
use intake_model::{
    Customer, EntityKind, NewOrder, Product, SaleRecord, SalesQuery, Store, Student,
    ValidationError,
};
use intake_validate::Batch;
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn};

use crate::alert::{Alert, AlertSink};
use crate::config::CacheConfig;
use crate::detector::{ChangeDetector, Observation};
use crate::error::{CacheError, ProjectionError, Result};
use crate::export::write_sales_csv;
use crate::projector::{self, Input};
use crate::search::search_sales;
use crate::stats::{SalesStatistics, sales_statistics};

/// `None` until the first load; loaded slots may hold zero records.
type Slot<T> = Option<Arc<Vec<T>>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheInfo {
    pub last_updated: Option<DateTime<Utc>>,
    pub last_check: Option<DateTime<Utc>>,
    pub cached_items: BTreeMap<EntityKind, usize>,
    pub check_interval_minutes: f64,
}

/// File-level state of one monitored source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStatus {
    pub name: String,
    pub exists: bool,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Utc>>,
    /// Content digest as last recorded by the change detector.
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct CacheState {
    students: Slot<Student>,
    customers: Slot<Customer>,
    stores: Slot<Store>,
    products: Slot<Product>,
    sales: Slot<SaleRecord>,
    detector: ChangeDetector,
    last_check: Option<DateTime<Utc>>,
    last_updated: Option<DateTime<Utc>>,
}

impl CacheState {
    fn is_loaded(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Student => self.students.is_some(),
            EntityKind::Customer => self.customers.is_some(),
            EntityKind::Store => self.stores.is_some(),
            EntityKind::Product => self.products.is_some(),
            EntityKind::Sale => self.sales.is_some(),
        }
    }

    fn count(&self, kind: EntityKind) -> usize {
        fn len<T>(slot: &Slot<T>) -> usize {
            slot.as_ref().map_or(0, |records| records.len())
        }
        match kind {
            EntityKind::Student => len(&self.students),
            EntityKind::Customer => len(&self.customers),
            EntityKind::Store => len(&self.stores),
            EntityKind::Product => len(&self.products),
            EntityKind::Sale => len(&self.sales),
        }
    }
}

/// Result of reading one source during a reload.
#[derive(Debug)]
enum SourceLoad {
    Loaded(Table),
    Unavailable(StoreError),
}

impl SourceLoad {
    fn read(store: &dyn TabularStore, name: &str) -> Self {
        match store.read(name) {
            Ok(table) => Self::Loaded(table),
            Err(error) => Self::Unavailable(error),
        }
    }
}

/// Validated, lazily refreshed view of the reference sources.
///
/// Construct one per process and share it (it is `Send + Sync`).
pub struct ReferenceCache {
    store: Arc<dyn TabularStore>,
    alerts: Arc<dyn AlertSink>,
    config: CacheConfig,
    state: Mutex<CacheState>,
    /// Serializes appends to the sales log. Taken before `state`, never after.
    orders: Mutex<()>,
}

impl ReferenceCache {
    pub fn new(store: Arc<dyn TabularStore>, alerts: Arc<dyn AlertSink>, config: CacheConfig) -> Self {
        Self {
            store,
            alerts,
            config,
            state: Mutex::new(CacheState::default()),
            orders: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Take the state lock. A poisoned lock is recovered with empty slots.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => {
                let mut state = poisoned.into_inner();
                self.state.clear_poison();
                error!("cache state lock was poisoned; clearing the cache");
                self.alerts.notify(Alert::system(
                    "A cache operation panicked; the cache was cleared and will reload.",
                ));
                *state = CacheState::default();
                state
            }
        }
    }

    fn gate_open(&self, state: &CacheState, now: DateTime<Utc>) -> bool {
        let Some(last_check) = state.last_check else {
            return true;
        };
        // A clock that moved backwards opens the gate rather than stalling it.
        (now - last_check)
            .to_std()
            .map_or(true, |elapsed| elapsed >= self.config.check_interval())
    }

    /// Bring the slots up to date.
    ///
    /// With the gate open every source is checked and every stale or empty
    /// slot reloaded. With it closed only `wanted` is loaded, and only if it
    /// never was.
    fn sync(&self, state: &mut CacheState, wanted: Option<EntityKind>) {
        let now = Utc::now();
        if !self.gate_open(state, now) {
            if let Some(kind) = wanted
                && !state.is_loaded(kind)
            {
                self.reload(state, kind);
            }
            return;
        }

        let _span = info_span!("refresh").entered();
        state.last_check = Some(now);
        let changed = self.check_sources(state);
        for kind in EntityKind::ALL {
            let stale = kind
                .sources(&self.config.sources)
                .iter()
                .any(|source| changed.contains(*source));
            if stale || !state.is_loaded(kind) {
                self.reload(state, kind);
            }
        }
    }

    fn check_sources(&self, state: &mut CacheState) -> BTreeSet<String> {
        let mut changed = BTreeSet::new();
        for name in self.config.sources.all() {
            match state.detector.observe(self.store.as_ref(), name) {
                Observation::Unreadable(message) => {
                    warn!(source = %name, error = %message, "could not check source");
                    self.alerts.notify(Alert::file_access(name, message));
                }
                observation if observation.is_changed() => {
                    debug!(source = %name, ?observation, "source changed");
                    changed.insert(name.to_string());
                }
                _ => {}
            }
        }
        changed
    }

    fn reload(&self, state: &mut CacheState, kind: EntityKind) {
        let sources = kind.sources(&self.config.sources);
        let mut tables = Vec::with_capacity(sources.len());
        let mut unavailable = 0;
        for source in &sources {
            match SourceLoad::read(self.store.as_ref(), source) {
                SourceLoad::Loaded(table) => {
                    state.detector.record_load(self.store.as_ref(), source);
                    tables.push(table);
                }
                SourceLoad::Unavailable(error) => {
                    warn!(source = %source, kind = %kind, error = %error, "source unavailable");
                    self.alerts.notify(Alert::file_access(source, error.to_string()));
                    unavailable += 1;
                    tables.push(Table::default());
                }
            }
        }
        // The sales log has no useful empty fallback: until it has been read
        // once, get_sales reports it as unavailable.
        if unavailable > 0 && (state.is_loaded(kind) || kind == EntityKind::Sale) {
            debug!(kind = %kind, "keeping previous projection");
            return;
        }

        let input = |index: usize| Input::new(sources[index], &tables[index]);
        match kind {
            EntityKind::Student => {
                self.publish(&mut state.students, kind, projector::students(input(0)));
            }
            EntityKind::Customer => {
                let projected = projector::customers(input(0), input(1));
                self.publish(&mut state.customers, kind, projected);
            }
            EntityKind::Store => self.publish(&mut state.stores, kind, projector::stores(input(0))),
            EntityKind::Product => {
                let projected = projector::products(input(0), input(1));
                self.publish(&mut state.products, kind, projected);
            }
            EntityKind::Sale => self.publish(&mut state.sales, kind, projector::sales(input(0))),
        }
        state.last_updated = Some(Utc::now());
    }

    fn publish<T>(
        &self,
        slot: &mut Slot<T>,
        kind: EntityKind,
        projected: std::result::Result<Batch<T>, ProjectionError>,
    ) {
        match projected {
            Ok(batch) => {
                self.report_validation(&batch.errors);
                info!(kind = %kind, records = batch.records.len(), "projection published");
                *slot = Some(Arc::new(batch.records));
            }
            Err(projection_error) => {
                error!(kind = %kind, error = %projection_error, "projection failed");
                self.alerts.notify(Alert::data_corruption(
                    projection_error.source_name(),
                    &projection_error,
                ));
                *slot = Some(Arc::new(Vec::new()));
            }
        }
    }

    fn report_validation(&self, errors: &[ValidationError]) {
        let mut by_source: BTreeMap<&str, Vec<ValidationError>> = BTreeMap::new();
        for error in errors {
            by_source
                .entry(error.source.as_str())
                .or_default()
                .push(error.clone());
        }
        for (source, errors) in by_source {
            warn!(source = %source, errors = errors.len(), "rows failed validation");
            self.alerts.notify(Alert::validation(source, &errors));
        }
    }

    pub fn get_students(&self) -> Arc<Vec<Student>> {
        let mut state = self.lock();
        self.sync(&mut state, Some(EntityKind::Student));
        state.students.clone().unwrap_or_default()
    }

    pub fn get_customers(&self) -> Arc<Vec<Customer>> {
        let mut state = self.lock();
        self.sync(&mut state, Some(EntityKind::Customer));
        state.customers.clone().unwrap_or_default()
    }

    pub fn get_stores(&self) -> Arc<Vec<Store>> {
        let mut state = self.lock();
        self.sync(&mut state, Some(EntityKind::Store));
        state.stores.clone().unwrap_or_default()
    }

    pub fn get_products(&self) -> Arc<Vec<Product>> {
        let mut state = self.lock();
        self.sync(&mut state, Some(EntityKind::Product));
        state.products.clone().unwrap_or_default()
    }

    /// The sales log. Fails only if it has never been readable.
    pub fn get_sales(&self) -> Result<Arc<Vec<SaleRecord>>> {
        let mut state = self.lock();
        self.sync(&mut state, Some(EntityKind::Sale));
        state
            .sales
            .clone()
            .ok_or_else(|| CacheError::SalesUnavailable {
                source_name: self.config.sources.sales.clone(),
            })
    }

    /// First student whose name contains `fragment`, ignoring case.
    pub fn find_student_by_name(&self, fragment: &str) -> Option<Student> {
        let needle = fragment.to_lowercase();
        self.get_students()
            .iter()
            .find(|student| student.name.to_lowercase().contains(&needle))
            .cloned()
    }

    pub fn find_customer_by_name(&self, name: &str) -> Option<Customer> {
        self.get_customers()
            .iter()
            .find(|customer| customer.name == name)
            .cloned()
    }

    pub fn find_store_by_name(&self, name: &str) -> Option<Store> {
        self.get_stores()
            .iter()
            .find(|store| store.name == name)
            .cloned()
    }

    pub fn find_product_by_name(&self, name: &str) -> Option<Product> {
        self.get_products()
            .iter()
            .find(|product| product.name == name)
            .cloned()
    }

    pub fn search_sales(&self, query: &SalesQuery) -> Result<Vec<SaleRecord>> {
        Ok(search_sales(&self.get_sales()?, query))
    }

    pub fn sales_statistics(&self, today: NaiveDate) -> Result<SalesStatistics> {
        Ok(sales_statistics(&self.get_sales()?, today))
    }

    /// Write the sales matching `query` to a CSV file; returns the row count.
    pub fn export_sales(&self, query: &SalesQuery, path: &Path) -> Result<usize> {
        let matches = self.search_sales(query)?;
        if matches.is_empty() {
            return Err(CacheError::NothingToExport);
        }
        let stores = self.get_stores();
        write_sales_csv(path, &matches, &stores)
    }

    /// Append an order to the sales log.
    ///
    /// Store pickups get the store address from the cached store list. The
    /// sales slot is emptied so the next read picks the new row up. Orders
    /// placed from several threads are appended one at a time.
    pub fn place_order(&self, order: &NewOrder) -> Result<OrderReceipt> {
        let _appending = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        let pickup_address = if order.delivery.is_store_pickup() {
            self.find_store_by_name(&order.delivery.store)
                .map(|store| store.address)
        } else {
            None
        };
        let receipt = append_order(
            self.store.as_ref(),
            &self.config.sources.sales,
            order,
            pickup_address.as_deref(),
            Local::now().naive_local(),
        )?;
        self.lock().sales = None;
        Ok(receipt)
    }

    /// Drop every slot and fingerprint, then reload everything.
    pub fn force_refresh(&self) {
        let mut state = self.lock();
        *state = CacheState::default();
        info!("cache cleared");
        self.sync(&mut state, None);
    }

    /// Snapshot metadata. Does not refresh.
    pub fn get_cache_info(&self) -> CacheInfo {
        let state = self.lock();
        CacheInfo {
            last_updated: state.last_updated,
            last_check: state.last_check,
            cached_items: EntityKind::ALL
                .into_iter()
                .map(|kind| (kind, state.count(kind)))
                .collect(),
            check_interval_minutes: self.config.check_interval_secs as f64 / 60.0,
        }
    }

    /// File-level state of every monitored source. Does not refresh.
    pub fn source_status(&self) -> Vec<SourceStatus> {
        let state = self.lock();
        self.config
            .sources
            .all()
            .into_iter()
            .map(|name| {
                let digest = state
                    .detector
                    .fingerprint(name)
                    .and_then(|fingerprint| fingerprint.digest.clone());
                let mut status = SourceStatus {
                    name: name.to_string(),
                    exists: false,
                    size: None,
                    modified: None,
                    digest,
                    error: None,
                };
                match self.store.metadata(name) {
                    Ok(Some(meta)) => {
                        status.exists = true;
                        status.size = Some(meta.len);
                        status.modified = Some(DateTime::<Utc>::from(meta.modified));
                    }
                    Ok(None) => {}
                    Err(store_error) => status.error = Some(store_error.to_string()),
                }
                status
            })
            .collect()
    }
}
