#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/navigator/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod export;
pub mod report;
pub mod summary;

pub use chart::{
    Figure, Trace, TraceKind, active_exposure_figure, cumulative_figure, exposure_figure,
};
pub use export::{
    CoefficientRecord, ExportError, ExportFormat, Exporter, export_merged_frame,
};
pub use report::{Report, ReportBuilder, ReportError};
pub use summary::{portfolio_label, regression_summary_text, summarize_cumulative_returns};

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
