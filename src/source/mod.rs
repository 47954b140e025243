//! Review source interfaces and built-in sources.
//!
//! Ownership model:
//! - `ReviewSource` supplies raw rows exactly as stored upstream.
//! - `RecordStore` owns normalization (theme labels, sentinels) so every
//!   source yields records with the same invariants.

use std::sync::Arc;

use crate::data::RawReviewRow;
use crate::errors::InsightsError;
use crate::types::SourceId;

/// Source implementation modules.
pub mod sources;

pub use sources::csv_source::{CsvReviewSource, CsvSourceConfig};

/// Store-facing review source interface.
///
/// Implementations read the whole dataset in one call. For a fixed backing
/// dataset, `read_rows` must return the same rows in the same order.
pub trait ReviewSource: Send + Sync {
    /// Stable source identifier used in logs and errors.
    fn id(&self) -> &str;

    /// Read every available row.
    ///
    /// Return `InsightsError::DataUnavailable` when the backing data cannot
    /// be read. An empty result is not an error here; the store decides.
    fn read_rows(&self) -> Result<Vec<RawReviewRow>, InsightsError>;
}

/// Source backed by rows already held in memory.
pub struct InMemoryReviewSource {
    id: SourceId,
    rows: Arc<Vec<RawReviewRow>>,
}

impl InMemoryReviewSource {
    /// Create an in-memory source from prebuilt rows.
    pub fn new(id: impl Into<SourceId>, rows: Vec<RawReviewRow>) -> Self {
        Self {
            id: id.into(),
            rows: Arc::new(rows),
        }
    }
}

impl ReviewSource for InMemoryReviewSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn read_rows(&self) -> Result<Vec<RawReviewRow>, InsightsError> {
        Ok(self.rows.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_source_returns_rows_in_order() {
        let rows = vec![
            RawReviewRow {
                product_id: "A".into(),
                ..RawReviewRow::default()
            },
            RawReviewRow {
                product_id: "B".into(),
                ..RawReviewRow::default()
            },
        ];
        let source = InMemoryReviewSource::new("memory", rows.clone());
        assert_eq!(source.id(), "memory");
        assert_eq!(source.read_rows().unwrap(), rows);
        assert_eq!(source.read_rows().unwrap(), rows);
    }
}
