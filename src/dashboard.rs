//! Everything a renderer needs for one filter selection.

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{CrossTab, FrequencyTable, count_by, cross_tabulate};
use crate::data::Field;
use crate::filter::{FilterSelection, FilteredView, apply, distinct_product_ids, filter_by_product};
use crate::metrics::{Metrics, summarize};
use crate::store::RecordStore;
use crate::types::ProductId;

/// Aggregates and detail rows computed from a single filtered view.
///
/// Every table, the cross-tab and the metrics are derived from `filtered`,
/// so per-theme cross-tab rows always sum to the `themes` counts.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    /// Records passing the selection, in dataset order.
    #[serde(skip)]
    pub filtered: FilteredView<'a>,
    pub metrics: Metrics,
    pub sentiment: FrequencyTable,
    pub themes: FrequencyTable,
    pub pain_points: FrequencyTable,
    pub suggestions: FrequencyTable,
    /// Rows are theme labels, columns are sentiments.
    pub sentiment_by_theme: CrossTab,
    /// Distinct products in the filtered view, first-seen order.
    pub product_ids: Vec<ProductId>,
    /// Product the detail list is narrowed to, when more than one remains.
    pub selected_product: Option<ProductId>,
    /// Rows for the browsable review list.
    pub details: FilteredView<'a>,
}

impl<'a> DashboardSnapshot<'a> {
    /// Filter `store` with `selection` and aggregate the result.
    ///
    /// With several products in the view the detail list shows one product:
    /// `product` when given, otherwise the first product seen. With a single
    /// product the detail list is the whole view.
    pub fn build(
        store: &'a RecordStore,
        selection: &FilterSelection,
        product: Option<&str>,
    ) -> Self {
        let filtered = apply(store.records(), selection);
        debug!(
            selected = filtered.len(),
            total = store.len(),
            "applied facet selection"
        );

        let product_ids = distinct_product_ids(&filtered);
        let selected_product = if product_ids.len() > 1 {
            product
                .map(str::to_string)
                .or_else(|| product_ids.first().cloned())
        } else {
            None
        };
        let details = match selected_product.as_deref() {
            Some(product_id) => filter_by_product(&filtered, product_id),
            None => filtered.clone(),
        };

        Self {
            metrics: summarize(&filtered, &store.config().sentinels),
            sentiment: count_by(&filtered, Field::Sentiment),
            themes: count_by(&filtered, Field::ThemeLabel),
            pain_points: count_by(&filtered, Field::PainPoint),
            suggestions: count_by(&filtered, Field::Suggestion),
            sentiment_by_theme: cross_tabulate(&filtered, Field::ThemeLabel, Field::Sentiment),
            product_ids,
            selected_product,
            details,
            filtered,
        }
    }

    /// Snapshot over the store's default (all values) selection.
    pub fn unfiltered(store: &'a RecordStore) -> Self {
        Self::build(store, &store.default_selection(), None)
    }
}
