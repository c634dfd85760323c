#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/navigator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod align;
pub mod error;
pub mod exposure;
pub mod performance;
pub mod regression;
pub mod resample;

pub use align::{MergedFrame, align};
pub use error::{ModelError, Result};
pub use exposure::ActiveExposure;
pub use performance::{CumulativeReturns, cumulative_returns};
pub use regression::{Coefficient, OlsFit, RegressionResult, fit_ols, run_factor_regression};
pub use resample::compound_monthly;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
