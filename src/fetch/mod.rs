//! Percentile row sources: the stats backend over HTTP and JSON files on disk.
mod client;
mod payload;
mod source;

#[cfg(test)]
mod tests;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, StatsFetchClient};
pub use payload::decode_rows;
pub use source::{FileSource, HttpSource, PercentileSource, fetch_first_row};
