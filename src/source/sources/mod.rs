/// CSV-backed review source.
pub mod csv_source;
