use serde::Serialize;

use crate::config::Sentinels;
use crate::data::{ReviewRecord, Sentiment};

/// Headline statistics over a record view.
///
/// Percentages are in `0.0..=100.0` and computed over `total`; an empty view
/// reports `0.0` for every percentage.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    /// Share of records carrying an identified pain point.
    pub pain_point_pct: f64,
    /// Share of records carrying an identified suggestion.
    pub suggestion_pct: f64,
}

/// Compute headline statistics, treating sentinel labels as "not present".
pub fn summarize<'a, I>(records: I, sentinels: &Sentinels) -> Metrics
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut total = 0usize;
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut neutral = 0usize;
    let mut with_pain = 0usize;
    let mut with_suggestion = 0usize;
    for record in records {
        total += 1;
        match record.sentiment {
            Sentiment::Positive => positive += 1,
            Sentiment::Negative => negative += 1,
            Sentiment::Neutral => neutral += 1,
        }
        if sentinels.has_pain_point(&record.pain_point) {
            with_pain += 1;
        }
        if sentinels.has_suggestion(&record.suggestion) {
            with_suggestion += 1;
        }
    }
    Metrics {
        total,
        positive_pct: percent(positive, total),
        negative_pct: percent(negative, total),
        neutral_pct: percent(neutral, total),
        pain_point_pct: percent(with_pain, total),
        suggestion_pct: percent(with_suggestion, total),
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
