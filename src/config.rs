use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::sentinels::{NO_PAIN_POINT, NO_SUGGESTION};
use crate::constants::themes::{DEFAULT_THEME_LABELS, UNKNOWN_THEME_LABEL};
use crate::errors::InsightsError;
use crate::types::{ThemeId, ThemeLabel};

/// Immutable mapping from topic ids to display labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeLabels {
    labels: BTreeMap<ThemeId, ThemeLabel>,
}

impl ThemeLabels {
    /// Build a mapping from explicit `(id, label)` pairs.
    pub fn new<I, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ThemeId, L)>,
        L: Into<ThemeLabel>,
    {
        Self {
            labels: pairs
                .into_iter()
                .map(|(id, label)| (id, label.into()))
                .collect(),
        }
    }

    /// Parse a JSON object such as `{"0": "Battery and Charging"}`.
    pub fn from_json_str(raw: &str) -> Result<Self, InsightsError> {
        let parsed: BTreeMap<String, String> = serde_json::from_str(raw)
            .map_err(|err| InsightsError::Configuration(format!("invalid theme labels: {err}")))?;
        let mut labels = BTreeMap::new();
        for (key, label) in parsed {
            let id = key.trim().parse::<ThemeId>().map_err(|_| {
                InsightsError::Configuration(format!(
                    "theme label key '{key}' is not an integer theme id"
                ))
            })?;
            labels.insert(id, label);
        }
        Ok(Self { labels })
    }

    /// Read and parse a JSON theme-label file.
    pub fn from_json_file(path: &Path) -> Result<Self, InsightsError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            InsightsError::Configuration(format!(
                "could not read theme labels '{}': {err}",
                path.display()
            ))
        })?;
        Self::from_json_str(&raw)
    }

    /// Resolve `theme_id` to its label, or `Unknown` when it is not mapped.
    pub fn resolve(&self, theme_id: ThemeId) -> &str {
        self.labels
            .get(&theme_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_THEME_LABEL)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(id, label)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ThemeId, &str)> {
        self.labels.iter().map(|(id, label)| (*id, label.as_str()))
    }
}

impl Default for ThemeLabels {
    fn default() -> Self {
        Self::new(DEFAULT_THEME_LABELS)
    }
}

/// Reserved values meaning "attribute not present".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentinels {
    /// Pain-point value used when no pain point was identified.
    pub no_pain_point: String,
    /// Suggestion value used when no suggestion was identified.
    pub no_suggestion: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            no_pain_point: NO_PAIN_POINT.to_string(),
            no_suggestion: NO_SUGGESTION.to_string(),
        }
    }
}

impl Sentinels {
    /// Whether `pain_point` carries an identified pain point.
    pub fn has_pain_point(&self, pain_point: &str) -> bool {
        pain_point != self.no_pain_point
    }

    /// Whether `suggestion` carries an identified suggestion.
    pub fn has_suggestion(&self, suggestion: &str) -> bool {
        suggestion != self.no_suggestion
    }
}

/// Top-level configuration injected into a `RecordStore`.
#[derive(Clone, Debug, Default)]
pub struct InsightsConfig {
    /// Theme id to label mapping.
    pub theme_labels: ThemeLabels,
    /// Sentinel values for absent pain points and suggestions.
    pub sentinels: Sentinels,
}

impl InsightsConfig {
    /// Override the theme label mapping.
    pub fn with_theme_labels(mut self, theme_labels: ThemeLabels) -> Self {
        self.theme_labels = theme_labels;
        self
    }

    /// Override the pain-point sentinel.
    pub fn with_no_pain_point(mut self, value: impl Into<String>) -> Self {
        self.sentinels.no_pain_point = value.into();
        self
    }

    /// Override the suggestion sentinel.
    pub fn with_no_suggestion(mut self, value: impl Into<String>) -> Self {
        self.sentinels.no_suggestion = value.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_labels_resolve_known_ids() {
        let labels = ThemeLabels::default();
        assert_eq!(labels.len(), 5);
        assert_eq!(labels.resolve(0), "Battery and Charging");
        assert_eq!(labels.resolve(4), "Customer Service Issues");
    }

    #[test]
    fn resolve_degrades_to_unknown_for_any_unmapped_id() {
        let labels = ThemeLabels::default();
        for id in [5, -1, 99, ThemeId::MIN, ThemeId::MAX] {
            assert_eq!(labels.resolve(id), UNKNOWN_THEME_LABEL);
        }
        let empty = ThemeLabels::new(Vec::<(ThemeId, String)>::new());
        assert!(empty.is_empty());
        assert_eq!(empty.resolve(0), UNKNOWN_THEME_LABEL);
    }

    #[test]
    fn labels_parse_from_json_object() {
        let labels = ThemeLabels::from_json_str(r#"{"0": "Sound", " 7 ": "Comfort"}"#).unwrap();
        assert_eq!(labels.resolve(0), "Sound");
        assert_eq!(labels.resolve(7), "Comfort");
        assert_eq!(labels.resolve(1), UNKNOWN_THEME_LABEL);
        let ids: Vec<ThemeId> = labels.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 7]);
    }

    #[test]
    fn labels_reject_non_integer_keys() {
        let err = ThemeLabels::from_json_str(r#"{"battery": "Battery"}"#).unwrap_err();
        assert!(matches!(err, InsightsError::Configuration(_)));
        let err = ThemeLabels::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, InsightsError::Configuration(_)));
    }

    #[test]
    fn sentinels_flag_identified_values() {
        let config = InsightsConfig::default()
            .with_no_pain_point("No pain point")
            .with_no_suggestion("No suggestion");
        assert!(!config.sentinels.has_pain_point("No pain point"));
        assert!(config.sentinels.has_pain_point("battery life"));
        assert!(!config.sentinels.has_suggestion("No suggestion"));
        assert!(config.sentinels.has_suggestion("add a case"));
    }
}
