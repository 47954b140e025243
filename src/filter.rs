//! Facet filtering over review records.
//!
//! Filtering is conjunctive: a record survives only when its sentiment, pain
//! point and theme label are each members of the selection. An empty facet
//! set therefore excludes every record; callers wanting "no filter" should
//! start from [`FilterSelection::all_of`] (or `RecordStore::default_selection`).

use indexmap::IndexSet;
use serde::Serialize;

use crate::data::{ReviewRecord, Sentiment};
use crate::types::{PainPoint, ProductId, ThemeLabel};

/// Allowed values per facet for one filtering pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Sentiments to keep.
    pub sentiments: IndexSet<Sentiment>,
    /// Pain-point labels to keep (sentinel included when desired).
    pub pain_points: IndexSet<PainPoint>,
    /// Theme labels to keep (`Unknown` included when desired).
    pub theme_labels: IndexSet<ThemeLabel>,
}

impl FilterSelection {
    /// Selection built from explicit facet values.
    pub fn new<S, P, T>(sentiments: S, pain_points: P, theme_labels: T) -> Self
    where
        S: IntoIterator<Item = Sentiment>,
        P: IntoIterator,
        P::Item: Into<PainPoint>,
        T: IntoIterator,
        T::Item: Into<ThemeLabel>,
    {
        Self {
            sentiments: sentiments.into_iter().collect(),
            pain_points: pain_points.into_iter().map(Into::into).collect(),
            theme_labels: theme_labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Every distinct facet value present in `records`, in first-seen order.
    pub fn all_of<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ReviewRecord>,
    {
        let mut selection = Self::default();
        for record in records {
            selection.sentiments.insert(record.sentiment);
            if !selection.pain_points.contains(&record.pain_point) {
                selection.pain_points.insert(record.pain_point.clone());
            }
            if !selection.theme_labels.contains(&record.theme_label) {
                selection.theme_labels.insert(record.theme_label.clone());
            }
        }
        selection
    }

    /// Replace the allowed sentiments.
    pub fn with_sentiments(mut self, sentiments: impl IntoIterator<Item = Sentiment>) -> Self {
        self.sentiments = sentiments.into_iter().collect();
        self
    }

    /// Replace the allowed pain points.
    pub fn with_pain_points<P>(mut self, pain_points: P) -> Self
    where
        P: IntoIterator,
        P::Item: Into<PainPoint>,
    {
        self.pain_points = pain_points.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the allowed theme labels.
    pub fn with_theme_labels<T>(mut self, theme_labels: T) -> Self
    where
        T: IntoIterator,
        T::Item: Into<ThemeLabel>,
    {
        self.theme_labels = theme_labels.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `record` passes every facet.
    pub fn matches(&self, record: &ReviewRecord) -> bool {
        self.sentiments.contains(&record.sentiment)
            && self.pain_points.contains(&record.pain_point)
            && self.theme_labels.contains(&record.theme_label)
    }

    /// Whether any facet is empty, which excludes every record.
    pub fn excludes_all(&self) -> bool {
        self.sentiments.is_empty() || self.pain_points.is_empty() || self.theme_labels.is_empty()
    }
}

/// Borrowed, order-preserving subset of records.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilteredView<'a> {
    records: Vec<&'a ReviewRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a ReviewRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ReviewRecord> + '_ {
        self.records.iter().copied()
    }

    /// Clone the viewed records into an owned vector.
    pub fn to_owned_records(&self) -> Vec<ReviewRecord> {
        self.records.iter().map(|record| (*record).clone()).collect()
    }
}

impl<'a> FromIterator<&'a ReviewRecord> for FilteredView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a ReviewRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'v, 'a> IntoIterator for &'v FilteredView<'a> {
    type Item = &'a ReviewRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a ReviewRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}

impl<'a> IntoIterator for FilteredView<'a> {
    type Item = &'a ReviewRecord;
    type IntoIter = std::vec::IntoIter<&'a ReviewRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Keep every record matching `selection`, preserving input order.
pub fn apply<'a, I>(records: I, selection: &FilterSelection) -> FilteredView<'a>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    if selection.excludes_all() {
        return FilteredView::default();
    }
    records
        .into_iter()
        .filter(|record| selection.matches(record))
        .collect()
}

/// Keep only records belonging to `product_id`.
pub fn filter_by_product<'a, I>(records: I, product_id: &str) -> FilteredView<'a>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    records
        .into_iter()
        .filter(|record| record.product_id == product_id)
        .collect()
}

/// Distinct product ids in first-seen order.
pub fn distinct_product_ids<'a, I>(records: I) -> Vec<ProductId>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let ids: IndexSet<&str> = records
        .into_iter()
        .map(|record| record.product_id.as_str())
        .collect();
    ids.into_iter().map(str::to_string).collect()
}
