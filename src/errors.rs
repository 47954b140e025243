use std::io;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for dataset loading and configuration failures.
#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("review data from '{source_id}' is unavailable: {reason}")]
    DataUnavailable { source_id: SourceId, reason: String },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl InsightsError {
    pub(crate) fn unavailable(source_id: impl Into<SourceId>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            source_id: source_id.into(),
            reason: reason.into(),
        }
    }
}
