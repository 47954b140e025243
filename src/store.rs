//! Immutable, session-long holder of normalized review records.

use tracing::{info, warn};

use crate::config::InsightsConfig;
use crate::constants::ingest::SKIP_MALFORMED_MSG;
use crate::data::{RawReviewRow, ReviewRecord, Sentiment};
use crate::errors::InsightsError;
use crate::filter::FilterSelection;
use crate::source::ReviewSource;
use crate::types::ThemeId;

/// Full set of labeled review records, read once per session.
#[derive(Clone, Debug)]
pub struct RecordStore {
    records: Vec<ReviewRecord>,
    config: InsightsConfig,
}

impl RecordStore {
    /// Read and normalize every row from `source`.
    ///
    /// Rows without a recognizable sentiment are skipped. Fails with
    /// `DataUnavailable` when the source cannot be read or no record survives.
    pub fn load(source: &dyn ReviewSource, config: InsightsConfig) -> Result<Self, InsightsError> {
        let rows = source.read_rows()?;
        let row_count = rows.len();
        let mut records = Vec::with_capacity(row_count);
        for (idx, row) in rows.into_iter().enumerate() {
            match normalize_row(row, &config) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!(source = source.id(), row = idx + 1, %reason, "{SKIP_MALFORMED_MSG}");
                }
            }
        }
        if records.is_empty() {
            let reason = if row_count == 0 {
                "source contains no review rows".to_string()
            } else {
                format!("none of {row_count} rows carried a valid sentiment")
            };
            return Err(InsightsError::unavailable(source.id(), reason));
        }
        info!(
            source = source.id(),
            records = records.len(),
            skipped = row_count - records.len(),
            "loaded review records"
        );
        Ok(Self { records, config })
    }

    /// Wrap already-normalized records.
    pub fn from_records(
        records: Vec<ReviewRecord>,
        config: InsightsConfig,
    ) -> Result<Self, InsightsError> {
        if records.is_empty() {
            return Err(InsightsError::unavailable("records", "no review records supplied"));
        }
        Ok(Self { records, config })
    }

    /// Resolve a theme id through the configured mapping; `Unknown` if unmapped.
    pub fn resolve_theme_label(&self, theme_id: ThemeId) -> &str {
        self.config.theme_labels.resolve(theme_id)
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Selection admitting every sentiment, pain point and theme label present
    /// in the full dataset.
    ///
    /// Use this when the user has not narrowed a facet; an empty facet set
    /// excludes every record.
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::all_of(&self.records)
    }
}

fn normalize_row(row: RawReviewRow, config: &InsightsConfig) -> Result<ReviewRecord, String> {
    let sentiment = row
        .sentiment
        .as_deref()
        .ok_or_else(|| "missing sentiment".to_string())?
        .parse::<Sentiment>()?;
    let theme = row.theme.unwrap_or(-1);
    let theme_label = config.theme_labels.resolve(theme).to_string();
    let sentinels = &config.sentinels;
    Ok(ReviewRecord {
        product_id: row.product_id,
        review_text: row.review_text,
        overall_rating: row.overall_rating.unwrap_or(0.0),
        sentiment,
        theme,
        theme_label,
        pain_point: label_or_sentinel(row.pain_point, &sentinels.no_pain_point),
        suggestion: label_or_sentinel(row.suggestion, &sentinels.no_suggestion),
    })
}

fn label_or_sentinel(value: Option<String>, sentinel: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => sentinel.to_string(),
    }
}
