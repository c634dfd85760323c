#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/navigator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod prompts;

pub use client::{OpenAiClient, TextGenerator};
pub use config::LlmConfig;
pub use error::{NarrativeError, Result};
pub use prompts::{
    active_exposure_prompt, factor_regression_prompt, summarize_active_exposures,
    summarize_factor_regression,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
