//! Order analytics pipeline: load, enrich, filter, aggregate.

mod dataset;
pub mod domain;
mod enrich;
pub mod filter;
mod loader;
pub mod report;

pub use dataset::{DatasetCache, FilterOptions, OrderDataset};
pub use domain::{
    AgeGroup, EcoCertification, EnrichedOrder, Feedback, OrderRecord, ReturnStatus,
};
pub use enrich::{country_from_location, enrich, enrich_all, EnrichmentConfig, UNKNOWN_COUNTRY};
pub use filter::{DateRange, FilterError, FilterState, GenderFilter, MaterialSelection};
pub use loader::{DatasetError, OrderLoader, REQUIRED_COLUMNS};
pub use report::{aggregate, AggregateRequest, AggregateResult, DashboardOptions, DashboardReport, Metric};
