#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/navigator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod columns;
pub mod error;
pub mod frame;
pub mod french;
pub mod types;
pub mod yahoo;

pub use error::{DataError, Result};
pub use french::{FactorDataset, FrenchLibraryClient};
pub use types::{FactorTable, Period, ReturnSeries};
pub use yahoo::YahooQuoteProvider;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
