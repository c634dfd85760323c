#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/navigator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod request;
pub mod sources;

// Re-export main types from sub-crates
pub use navigator_data as data;
pub use navigator_model as model;
pub use navigator_narrative as narrative;
pub use navigator_output as output;

pub use config::NavigatorConfig;
pub use error::{NavigatorError, Result};
pub use pipeline::{DefaultNavigator, Navigator};
pub use report::{build_report, write_exports};
pub use request::{Analysis, AnalysisRequest, AnalysisResponse, AssetAnalysis, BenchmarkComparison};
pub use sources::{FactorLoader, FactorSource, ReturnSource};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
