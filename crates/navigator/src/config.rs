//! Pipeline configuration.

use chrono::NaiveDate;
use navigator_data::FactorDataset;
use navigator_data::yahoo::default_start;
use navigator_narrative::LlmConfig;
use std::path::PathBuf;

/// Settings shared by every request a [`Navigator`](crate::Navigator) serves.
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// First day of price and factor history.
    pub start: NaiveDate,
    /// Factor dataset frequency.
    pub dataset: FactorDataset,
    /// Local `.zip`/`.csv` copy of the dataset, used instead of downloading.
    pub factors_file: Option<PathBuf>,
    /// Compound daily returns to months before joining monthly factors.
    /// Off by default: daily returns join factor periods on date as-is.
    pub compound_monthly: bool,
    /// Whether to request plain-language summaries.
    pub narrative: bool,
    /// Text-generation settings; narratives are skipped when absent.
    pub llm: Option<LlmConfig>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            dataset: FactorDataset::default(),
            factors_file: None,
            compound_monthly: false,
            narrative: true,
            llm: None,
        }
    }
}

impl NavigatorConfig {
    /// Set the start date.
    pub const fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    /// Set the factor dataset.
    pub const fn with_dataset(mut self, dataset: FactorDataset) -> Self {
        self.dataset = dataset;
        self
    }

    /// Read factors from a local file.
    pub fn with_factors_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.factors_file = Some(path.into());
        self
    }

    /// Enable or disable monthly compounding.
    pub const fn with_compound_monthly(mut self, enabled: bool) -> Self {
        self.compound_monthly = enabled;
        self
    }

    /// Use `llm` for narratives.
    pub fn with_llm(mut self, llm: Option<LlmConfig>) -> Self {
        self.llm = llm;
        self
    }

    /// Disable narratives.
    pub fn without_narrative(mut self) -> Self {
        self.narrative = false;
        self.llm = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavigatorConfig::default();
        assert_eq!(config.start, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(config.dataset, FactorDataset::Monthly);
        assert!(!config.compound_monthly);
        assert!(config.narrative);
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_without_narrative_drops_llm() {
        let config = NavigatorConfig::default()
            .with_llm(Some(LlmConfig::with_api_key("sk-test")))
            .without_narrative();
        assert!(!config.narrative);
        assert!(config.llm.is_none());
    }
}
