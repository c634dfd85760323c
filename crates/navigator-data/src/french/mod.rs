//! Fama/French factor data from the Kenneth R. French data library.

pub mod client;
pub mod parse;

pub use client::{FRENCH_LIBRARY_URL, FrenchLibraryClient, PERCENT_SCALE};
pub use parse::{extract_csv, parse_factor_csv};

use crate::types::FactorTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which Fama/French 3-factor research dataset to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorDataset {
    /// Monthly factors, indexed by calendar month.
    #[default]
    Monthly,
    /// Daily factors, indexed by trading day.
    Daily,
}

impl FactorDataset {
    /// Dataset name as published by the library.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Monthly => "F-F_Research_Data_Factors",
            Self::Daily => "F-F_Research_Data_Factors_daily",
        }
    }

    /// Whether `table` has this dataset's layout: calendar months for
    /// [`Monthly`](Self::Monthly), trading days for [`Daily`](Self::Daily).
    pub fn matches(&self, table: &FactorTable) -> bool {
        match self {
            Self::Monthly => table.is_period_indexed(),
            Self::Daily => !table.is_period_indexed(),
        }
    }
}

impl fmt::Display for FactorDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
