//! Frequency tables and cross-tabulations over a record view.
//!
//! Every aggregate is a plain group-and-count: only observed values appear,
//! and all tables built from the same view are additively consistent.

use indexmap::{IndexMap, IndexSet};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::data::{Field, ReviewRecord};
use crate::types::CategoryValue;

/// One `(category, count)` pair of a frequency table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub category: CategoryValue,
    pub count: usize,
}

/// Counts per distinct value of one field, descending by count.
///
/// Ties keep the order in which categories were first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (equals the number of records counted).
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Count for `category`, or 0 when it was not observed.
    pub fn count_of(&self, category: &str) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    /// Fraction of the total per category, in table order.
    pub fn shares(&self) -> Vec<(&str, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|entry| (entry.category.as_str(), entry.count as f64 / total as f64))
            .collect()
    }

    /// `(category, count)` pairs, for renderers that want tuples.
    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.entries
            .iter()
            .map(|entry| (entry.category.as_str(), entry.count))
            .collect()
    }
}

/// Count records per distinct value of `field`.
///
/// Returns an empty table for an empty input.
pub fn count_by<'a, I>(records: I, field: Field) -> FrequencyTable
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for record in records {
        *counts.entry(record.value_of(field)).or_insert(0) += 1;
    }
    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(category, count)| FrequencyEntry {
            category: category.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    FrequencyTable { entries }
}

/// One observed `(row, col)` pair of a cross-tabulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CrossTabCell {
    pub row: CategoryValue,
    pub col: CategoryValue,
    pub count: usize,
}

/// Joint counts of two fields over observed value pairs only.
///
/// Pairs that never occur are absent; [`CrossTab::get`] reports them as 0
/// and [`CrossTab::to_dense`] fills them in for matrix renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossTab {
    row_field: Field,
    col_field: Field,
    rows: IndexMap<CategoryValue, IndexMap<CategoryValue, usize>>,
    col_order: IndexSet<CategoryValue>,
}

impl CrossTab {
    fn new(row_field: Field, col_field: Field) -> Self {
        Self {
            row_field,
            col_field,
            rows: IndexMap::new(),
            col_order: IndexSet::new(),
        }
    }

    pub fn row_field(&self) -> Field {
        self.row_field
    }

    pub fn col_field(&self) -> Field {
        self.col_field
    }

    /// Count for `(row, col)`, or 0 when the pair was not observed.
    pub fn get(&self, row: &str, col: &str) -> usize {
        self.rows
            .get(row)
            .and_then(|cols| cols.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of counts across every column of `row`.
    pub fn row_total(&self, row: &str) -> usize {
        self.rows
            .get(row)
            .map(|cols| cols.values().sum())
            .unwrap_or(0)
    }

    /// Sum of counts across every row of `col`.
    pub fn col_total(&self, col: &str) -> usize {
        self.rows.values().filter_map(|cols| cols.get(col)).sum()
    }

    /// Observed row values in first-seen order.
    pub fn row_values(&self) -> Vec<&str> {
        self.rows.keys().map(String::as_str).collect()
    }

    /// Observed column values in first-seen order.
    pub fn col_values(&self) -> Vec<&str> {
        self.col_order.iter().map(String::as_str).collect()
    }

    /// Observed cells grouped by row, rows and columns in first-seen order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, usize)> + '_ {
        self.rows.iter().flat_map(|(row, cols)| {
            cols.iter()
                .map(move |(col, count)| (row.as_str(), col.as_str(), *count))
        })
    }

    /// Number of observed pairs.
    pub fn len(&self) -> usize {
        self.rows.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.rows.values().flat_map(IndexMap::values).sum()
    }

    /// Dense `rows x cols` matrix with zeros for unobserved pairs, aligned
    /// with [`CrossTab::row_values`] and [`CrossTab::col_values`].
    pub fn to_dense(&self) -> Vec<Vec<usize>> {
        self.rows
            .values()
            .map(|cols| {
                self.col_order
                    .iter()
                    .map(|col| cols.get(col).copied().unwrap_or(0))
                    .collect()
            })
            .collect()
    }
}

impl Serialize for CrossTab {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cells: Vec<CrossTabCell> = self
            .cells()
            .map(|(row, col, count)| CrossTabCell {
                row: row.to_string(),
                col: col.to_string(),
                count,
            })
            .collect();
        let mut state = serializer.serialize_struct("CrossTab", 5)?;
        state.serialize_field("row_field", &self.row_field)?;
        state.serialize_field("col_field", &self.col_field)?;
        state.serialize_field("rows", &self.row_values())?;
        state.serialize_field("cols", &self.col_values())?;
        state.serialize_field("cells", &cells)?;
        state.end()
    }
}

/// Count records per observed `(row_field, col_field)` value pair.
pub fn cross_tabulate<'a, I>(records: I, row_field: Field, col_field: Field) -> CrossTab
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut table = CrossTab::new(row_field, col_field);
    for record in records {
        let row = record.value_of(row_field);
        let col = record.value_of(col_field);
        if !table.col_order.contains(col) {
            table.col_order.insert(col.to_string());
        }
        let cols = match table.rows.get_index_of(row) {
            Some(idx) => &mut table.rows[idx],
            None => table.rows.entry(row.to_string()).or_default(),
        };
        match cols.get_mut(col) {
            Some(count) => *count += 1,
            None => {
                cols.insert(col.to_string(), 1);
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sentiment;

    fn record(sentiment: Sentiment, theme: &str, pain: &str) -> ReviewRecord {
        ReviewRecord {
            product_id: "P".into(),
            review_text: String::new(),
            overall_rating: 4.0,
            sentiment,
            theme: 0,
            theme_label: theme.into(),
            pain_point: pain.into(),
            suggestion: "none".into(),
        }
    }

    fn fixture() -> Vec<ReviewRecord> {
        vec![
            record(Sentiment::Positive, "Battery and Charging", "none"),
            record(Sentiment::Positive, "Price and Value", "none"),
            record(Sentiment::Negative, "Battery and Charging", "battery life"),
            record(Sentiment::Neutral, "Price and Value", "price"),
            record(Sentiment::Negative, "Battery and Charging", "battery life"),
        ]
    }

    #[test]
    fn count_by_orders_ties_by_first_occurrence() {
        let records = fixture();
        let table = count_by(&records, Field::Sentiment);
        assert_eq!(
            table.pairs(),
            vec![("POSITIVE", 2), ("NEGATIVE", 2), ("NEUTRAL", 1)]
        );
        assert_eq!(table.total(), records.len());
    }

    #[test]
    fn count_by_sorts_descending() {
        let records = fixture();
        let table = count_by(&records, Field::ThemeLabel);
        assert_eq!(
            table.pairs(),
            vec![("Battery and Charging", 3), ("Price and Value", 2)]
        );
        assert_eq!(table.count_of("Price and Value"), 2);
        assert_eq!(table.count_of("Design and Build Quality"), 0);
    }

    #[test]
    fn count_by_on_empty_input_is_empty() {
        let empty: Vec<ReviewRecord> = Vec::new();
        let table = count_by(&empty, Field::PainPoint);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert!(table.shares().is_empty());
    }

    #[test]
    fn shares_sum_to_one() {
        let records = fixture();
        let table = count_by(&records, Field::PainPoint);
        let shares = table.shares();
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].0, "none");
        let sum: f64 = shares.iter().map(|(_, share)| share).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cross_tab_omits_unobserved_pairs() {
        let records = fixture();
        let tab = cross_tabulate(&records, Field::ThemeLabel, Field::Sentiment);
        assert_eq!(tab.len(), 4);
        assert_eq!(tab.get("Battery and Charging", "NEGATIVE"), 2);
        assert_eq!(tab.get("Battery and Charging", "NEUTRAL"), 0);
        assert!(tab.cells().all(|(_, _, count)| count > 0));
        assert!(
            !tab.cells()
                .any(|(row, col, _)| row == "Battery and Charging" && col == "NEUTRAL")
        );
        assert_eq!(tab.row_values(), vec!["Battery and Charging", "Price and Value"]);
        assert_eq!(tab.col_values(), vec!["POSITIVE", "NEGATIVE", "NEUTRAL"]);
        assert_eq!(tab.total(), records.len());
    }

    #[test]
    fn cross_tab_rows_agree_with_count_by() {
        let records = fixture();
        let tab = cross_tabulate(&records, Field::ThemeLabel, Field::Sentiment);
        let themes = count_by(&records, Field::ThemeLabel);
        for entry in themes.entries() {
            assert_eq!(tab.row_total(&entry.category), entry.count);
        }
        let sentiments = count_by(&records, Field::Sentiment);
        for entry in sentiments.entries() {
            assert_eq!(tab.col_total(&entry.category), entry.count);
        }
    }

    #[test]
    fn dense_matrix_fills_gaps_with_zero() {
        let records = fixture();
        let tab = cross_tabulate(&records, Field::ThemeLabel, Field::Sentiment);
        assert_eq!(tab.to_dense(), vec![vec![1, 2, 0], vec![1, 0, 1]]);
    }

    #[test]
    fn empty_cross_tab_is_well_formed() {
        let empty: Vec<ReviewRecord> = Vec::new();
        let tab = cross_tabulate(&empty, Field::ThemeLabel, Field::Sentiment);
        assert!(tab.is_empty());
        assert_eq!(tab.total(), 0);
        assert_eq!(tab.row_total("anything"), 0);
        assert!(tab.to_dense().is_empty());
        assert_eq!(tab.row_field(), Field::ThemeLabel);
        assert_eq!(tab.col_field(), Field::Sentiment);
    }

    #[test]
    fn cross_tab_serializes_as_cell_list() {
        let records = fixture();
        let tab = cross_tabulate(&records[..2], Field::ThemeLabel, Field::Sentiment);
        let json = serde_json::to_value(&tab).unwrap();
        assert_eq!(json["row_field"], "theme_label");
        assert_eq!(json["col_field"], "sentiment");
        assert_eq!(json["cells"].as_array().unwrap().len(), 2);
        assert_eq!(json["cells"][0]["row"], "Battery and Charging");
        assert_eq!(json["cells"][0]["count"], 1);
    }
}
