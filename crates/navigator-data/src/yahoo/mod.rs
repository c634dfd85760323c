//! Yahoo Finance price history.

pub mod quotes;

pub use quotes::{DEFAULT_START_YEAR, YahooQuoteProvider, default_start, returns_from_prices};
