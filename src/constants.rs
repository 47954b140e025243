/// Constants used when resolving topic ids into display labels.
pub mod themes {
    /// Label used for theme ids outside the configured mapping.
    pub const UNKNOWN_THEME_LABEL: &str = "Unknown";
    /// Default theme labels summarizing the upstream topic model's top words.
    pub const DEFAULT_THEME_LABELS: [(i64, &str); 5] = [
        (0, "Battery and Charging"),
        (1, "Performance and Speed"),
        (2, "Design and Build Quality"),
        (3, "Price and Value"),
        (4, "Customer Service Issues"),
    ];
}

/// Constants used for the "attribute not present" categorical values.
pub mod sentinels {
    /// Default pain-point value meaning no pain point was identified.
    pub const NO_PAIN_POINT: &str = "none";
    /// Default suggestion value meaning no suggestion was identified.
    pub const NO_SUGGESTION: &str = "none";
}

/// Constants used when reading and normalizing review rows.
pub mod ingest {
    /// Log message used when a row cannot be turned into a record.
    pub const SKIP_MALFORMED_MSG: &str = "skipping malformed review row";
}

/// Constants used by the command-line dashboard.
pub mod cli {
    /// Environment variable consulted when `--data` is not given.
    pub const DATA_PATH_ENV: &str = "REVIEW_INSIGHTS_DATA";
    /// Dataset path used when neither flag nor environment variable is set.
    pub const DEFAULT_DATA_PATH: &str = "processed_reviews.csv";
}
