#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Frequency tables and cross-tabulations.
pub mod aggregate;
/// Theme labels, sentinels and top-level configuration.
pub mod config;
/// Centralized constants used across sources, store and CLI.
pub mod constants;
/// Per-selection dashboard snapshots.
pub mod dashboard;
/// Review record and field types.
pub mod data;
/// Reusable command-line runners shared by binaries.
pub mod example_apps;
/// Facet filtering and filtered views.
pub mod filter;
/// Headline metrics.
pub mod metrics;
/// Review source traits and built-in sources.
pub mod source;
/// Session-long record store.
pub mod store;
/// Shared type aliases.
pub mod types;

mod errors;

pub use aggregate::{
    CrossTab, CrossTabCell, FrequencyEntry, FrequencyTable, count_by, cross_tabulate,
};
pub use config::{InsightsConfig, Sentinels, ThemeLabels};
pub use dashboard::DashboardSnapshot;
pub use data::{Field, RawReviewRow, ReviewRecord, Sentiment};
pub use errors::InsightsError;
pub use filter::{FilterSelection, FilteredView, apply, distinct_product_ids, filter_by_product};
pub use metrics::{Metrics, summarize};
pub use source::{CsvReviewSource, CsvSourceConfig, InMemoryReviewSource, ReviewSource};
pub use store::RecordStore;
pub use types::{CategoryValue, PainPoint, ProductId, SourceId, Suggestion, ThemeId, ThemeLabel};
