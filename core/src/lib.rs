//! Metrics and reporting over a synthetic UPI transaction dataset.
//!
//! A [`FactStore`] owns the SQLite connection to nine fact tables;
//! [`MetricsCatalog`] and [`AdvancedMetrics`] borrow it and expose the
//! read-only query surface. [`fixtures`] generates the deterministic
//! synthetic dataset the store is seeded with.

pub mod catalog;
pub mod error;
pub mod facts;
pub mod fixtures;
pub mod format;
pub mod rng;
pub mod store;
pub mod types;

pub use catalog::advanced::AdvancedMetrics;
pub use catalog::{MetricsCatalog, PincodeMetric, TopPincodes};
pub use error::{InsightsError, InsightsResult};
pub use fixtures::{load_fixtures, FixtureConfig, FixtureGenerator, FixtureSet};
pub use store::FactStore;
