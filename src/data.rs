use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crate::types::{PainPoint, ProductId, Suggestion, ThemeId, ThemeLabel};

/// Sentiment label assigned to a review by the upstream classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Every sentiment in display order.
    pub const ALL: [Sentiment; 3] = [
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
    ];

    /// Canonical upper-case label (`POSITIVE`, `NEUTRAL`, `NEGATIVE`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Sentiment::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unrecognized sentiment '{trimmed}'"))
    }
}

/// One labeled review, normalized and immutable after load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Product the review belongs to.
    pub product_id: ProductId,
    /// Free review text (display only).
    pub review_text: String,
    /// Overall star rating (display only).
    pub overall_rating: f32,
    pub sentiment: Sentiment,
    /// Raw topic id from the topic model.
    pub theme: ThemeId,
    /// Display label resolved from `theme`; `Unknown` when unmapped.
    pub theme_label: ThemeLabel,
    /// Pain-point label, or the configured sentinel when none was identified.
    pub pain_point: PainPoint,
    /// Suggestion label, or the configured sentinel when none was identified.
    pub suggestion: Suggestion,
}

impl ReviewRecord {
    /// Categorical value of `field` for this record.
    pub fn value_of(&self, field: Field) -> &str {
        match field {
            Field::Sentiment => self.sentiment.as_str(),
            Field::ThemeLabel => &self.theme_label,
            Field::PainPoint => &self.pain_point,
            Field::Suggestion => &self.suggestion,
            Field::ProductId => &self.product_id,
        }
    }
}

/// Review row exactly as a source supplies it, before normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReviewRow {
    #[serde(rename = "asin", default)]
    pub product_id: String,
    #[serde(rename = "reviewText", default)]
    pub review_text: String,
    #[serde(rename = "overall", default)]
    pub overall_rating: Option<f32>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "deserialize_theme_id")]
    pub theme: Option<ThemeId>,
    #[serde(default)]
    pub pain_point: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
}

// Topic ids may arrive as `3` or `3.0` depending on how the table was written.
fn deserialize_theme_id<'de, D>(deserializer: D) -> Result<Option<ThemeId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTheme {
        Int(ThemeId),
        Float(f64),
        Text(String),
    }

    let raw: Option<RawTheme> = Option::deserialize(deserializer)?;
    let id = match raw {
        None => None,
        Some(RawTheme::Int(id)) => Some(id),
        Some(RawTheme::Float(value)) => float_theme_id(value),
        Some(RawTheme::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else if let Ok(id) = text.parse::<ThemeId>() {
                Some(id)
            } else {
                text.parse::<f64>().ok().and_then(float_theme_id)
            }
        }
    };
    Ok(id)
}

fn float_theme_id(value: f64) -> Option<ThemeId> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as ThemeId)
}

/// Categorical fields that can be counted or cross-tabulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Sentiment,
    ThemeLabel,
    PainPoint,
    Suggestion,
    ProductId,
}

impl Field {
    /// Column-style name of the field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::Sentiment => "sentiment",
            Field::ThemeLabel => "theme_label",
            Field::PainPoint => "pain_point",
            Field::Suggestion => "suggestion",
            Field::ProductId => "product_id",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
