use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::ingest::SKIP_MALFORMED_MSG;
use crate::data::RawReviewRow;
use crate::errors::InsightsError;
use crate::source::ReviewSource;
use crate::types::SourceId;

/// Configuration for a CSV-backed review source.
#[derive(Clone, Debug)]
pub struct CsvSourceConfig {
    /// Stable source identifier used in logs and errors.
    pub source_id: SourceId,
    /// Path to the processed review table.
    pub path: PathBuf,
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl CsvSourceConfig {
    /// Create a config for `path`, using the file name as the source id.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let source_id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            source_id,
            path,
            delimiter: b',',
        }
    }

    /// Override the source id.
    pub fn with_source_id(mut self, source_id: impl Into<SourceId>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Override the field delimiter (for example `b'\t'`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Review source reading a headered CSV table.
///
/// Expected columns are `asin`, `reviewText`, `overall`, `sentiment`,
/// `theme`, `pain_point` and `suggestion`; extra columns are ignored.
pub struct CsvReviewSource {
    config: CsvSourceConfig,
}

impl CsvReviewSource {
    /// Create a CSV source from configuration.
    pub fn new(config: CsvSourceConfig) -> Self {
        Self { config }
    }

    /// Shorthand for a comma-separated file at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(CsvSourceConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

impl ReviewSource for CsvReviewSource {
    fn id(&self) -> &str {
        &self.config.source_id
    }

    fn read_rows(&self) -> Result<Vec<RawReviewRow>, InsightsError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.config.path)
            .map_err(|err| {
                InsightsError::unavailable(
                    &self.config.source_id,
                    format!("could not open '{}': {err}", self.config.path.display()),
                )
            })?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (idx, result) in reader.deserialize::<RawReviewRow>().enumerate() {
            match result {
                Ok(row) => rows.push(row),
                Err(err) => {
                    // I/O failures abort the read; parse failures skip the row.
                    if let csv::ErrorKind::Io(_) = err.kind() {
                        return Err(InsightsError::unavailable(
                            &self.config.source_id,
                            format!("read failed: {err}"),
                        ));
                    }
                    skipped += 1;
                    warn!(
                        source = %self.config.source_id,
                        row = idx + 1,
                        error = %err,
                        "{SKIP_MALFORMED_MSG}"
                    );
                }
            }
        }
        debug!(
            source = %self.config.source_id,
            rows = rows.len(),
            skipped,
            "read review table"
        );
        Ok(rows)
    }
}
