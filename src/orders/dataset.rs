use super::domain::EnrichedOrder;
use super::enrich::{enrich_all, EnrichmentConfig};
use super::loader::{DatasetError, OrderLoader};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::info;

/// The enriched order set. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDataset {
    orders: Vec<EnrichedOrder>,
}

/// Observed universes used to populate filter controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub materials: Vec<String>,
    pub categories: Vec<String>,
    pub genders: Vec<String>,
    pub earliest_order: Option<NaiveDate>,
    pub latest_order: Option<NaiveDate>,
}

impl OrderDataset {
    pub fn new(orders: Vec<EnrichedOrder>) -> Self {
        Self { orders }
    }

    pub fn from_path<P: AsRef<Path>>(
        path: P,
        config: &EnrichmentConfig,
    ) -> Result<Self, DatasetError> {
        let records = OrderLoader::from_path(path)?;
        Ok(Self::new(enrich_all(records, config)))
    }

    pub fn from_reader<R: Read>(reader: R, config: &EnrichmentConfig) -> Result<Self, DatasetError> {
        let records = OrderLoader::from_reader(reader)?;
        Ok(Self::new(enrich_all(records, config)))
    }

    pub fn orders(&self) -> &[EnrichedOrder] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn materials(&self) -> Vec<String> {
        self.distinct(|order| &order.record.material)
    }

    pub fn categories(&self) -> Vec<String> {
        self.distinct(|order| &order.record.category)
    }

    pub fn genders(&self) -> Vec<String> {
        self.distinct(|order| &order.record.gender)
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.orders.iter().map(|order| order.record.order_date);
        let earliest = dates.clone().min()?;
        let latest = dates.max()?;
        Some((earliest, latest))
    }

    pub fn filter_options(&self) -> FilterOptions {
        let bounds = self.date_bounds();
        FilterOptions {
            materials: self.materials(),
            categories: self.categories(),
            genders: self.genders(),
            earliest_order: bounds.map(|(earliest, _)| earliest),
            latest_order: bounds.map(|(_, latest)| latest),
        }
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&EnrichedOrder) -> &String,
    {
        self.orders
            .iter()
            .map(field)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

type DatasetLoader = Box<dyn Fn() -> Result<OrderDataset, DatasetError> + Send + Sync>;

/// Loads the dataset at most once per process and hands out shared references.
pub struct DatasetCache {
    loader: DatasetLoader,
    cell: OnceLock<Arc<OrderDataset>>,
    init: Mutex<()>,
}

impl DatasetCache {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<OrderDataset, DatasetError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            cell: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    pub fn from_path(path: PathBuf, config: EnrichmentConfig) -> Self {
        Self::new(move || OrderDataset::from_path(&path, &config))
    }

    pub fn preloaded(dataset: OrderDataset) -> Self {
        let cache = Self::new(|| Ok(OrderDataset::new(Vec::new())));
        let _ = cache.cell.set(Arc::new(dataset));
        cache
    }

    /// Returns the cached dataset, running the loader on first use. Failures are not cached.
    pub fn get_or_load(&self) -> Result<Arc<OrderDataset>, DatasetError> {
        if let Some(dataset) = self.cell.get() {
            return Ok(Arc::clone(dataset));
        }

        let _guard = self
            .init
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(dataset) = self.cell.get() {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new((self.loader)()?);
        info!(orders = dataset.len(), "order dataset cached");
        let _ = self.cell.set(Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn get(&self) -> Option<Arc<OrderDataset>> {
        self.cell.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CSV: &str = "Order_Date,Total_Revenue ($),Material,Category_Name,Gender,Age,Return_Status,Percentage_Recycled_Material (%),Water_Usage (liters),Carbon_Offset_Investment ($)\n\
2024-03-04,80,Wool,Sweaters,Male,33,Not Returned,60,10,2\n\
2024-01-20,120,Hemp,Pants,Female,51,Returned,75,14,3\n\
2024-02-11,45,Hemp,Shirts,Female,22,Not Returned,40,8,1\n";

    fn dataset() -> OrderDataset {
        OrderDataset::from_reader(Cursor::new(CSV), &EnrichmentConfig::default())
            .expect("dataset loads")
    }

    #[test]
    fn filter_options_report_sorted_universes() {
        let options = dataset().filter_options();
        assert_eq!(options.materials, vec!["Hemp", "Wool"]);
        assert_eq!(options.categories, vec!["Pants", "Shirts", "Sweaters"]);
        assert_eq!(options.genders, vec!["Female", "Male"]);
        assert_eq!(options.earliest_order, NaiveDate::from_ymd_opt(2024, 1, 20));
        assert_eq!(options.latest_order, NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[test]
    fn empty_dataset_has_no_date_bounds() {
        assert_eq!(OrderDataset::new(Vec::new()).date_bounds(), None);
    }

    #[test]
    fn cache_runs_loader_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = DatasetCache::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            OrderDataset::from_reader(Cursor::new(CSV), &EnrichmentConfig::default())
        });

        assert!(cache.get().is_none());
        let first = cache.get_or_load().expect("first load");
        let second = cache.get_or_load().expect("cached load");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cache = DatasetCache::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                OrderDataset::from_path("./missing-orders.csv", &EnrichmentConfig::default())
            } else {
                OrderDataset::from_reader(Cursor::new(CSV), &EnrichmentConfig::default())
            }
        });

        assert!(matches!(cache.get_or_load(), Err(DatasetError::Io(_))));
        assert!(cache.get().is_none());
        assert_eq!(cache.get_or_load().expect("retry succeeds").len(), 3);
    }

    #[test]
    fn preloaded_cache_never_invokes_loader() {
        let cache = DatasetCache::preloaded(dataset());
        assert_eq!(cache.get_or_load().expect("preloaded").len(), 3);
    }
}
