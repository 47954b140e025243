/// Opaque product identifier grouping reviews of the same item.
/// Example: `B00004Y2UT`
pub type ProductId = String;
/// Identifier for the source that supplied review rows.
/// Examples: `processed_reviews.csv`, `in_memory`
pub type SourceId = String;
/// Integer topic id produced by the upstream topic model.
/// Examples: `0`, `4`
pub type ThemeId = i64;
/// Display label resolved from a theme id.
/// Examples: `Battery and Charging`, `Unknown`
pub type ThemeLabel = String;
/// Categorical complaint label attached to a review.
/// Examples: `quality issue`, `delivery problem`, `none`
pub type PainPoint = String;
/// Categorical improvement label attached to a review.
/// Examples: `improve durability`, `none`
pub type Suggestion = String;
/// Category value as it appears in frequency tables and cross-tabs.
/// Examples: `POSITIVE`, `Price and Value`
pub type CategoryValue = String;
