//! Active factor exposures of an asset relative to a benchmark.

use crate::regression::{Coefficient, RegressionResult};
use serde::{Deserialize, Serialize};

/// Asset value minus benchmark value for each coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveExposure {
    /// Active market beta.
    pub beta_mkt_rf: f64,
    /// Active size beta.
    pub beta_smb: f64,
    /// Active value beta.
    pub beta_hml: f64,
    /// Difference in alpha.
    pub alpha_diff: f64,
}

impl ActiveExposure {
    /// Difference between two regression results.
    pub fn between(asset: &RegressionResult, benchmark: &RegressionResult) -> Self {
        Self {
            beta_mkt_rf: asset.beta_mkt_rf - benchmark.beta_mkt_rf,
            beta_smb: asset.beta_smb - benchmark.beta_smb,
            beta_hml: asset.beta_hml - benchmark.beta_hml,
            alpha_diff: asset.alpha - benchmark.alpha,
        }
    }

    /// Active value of a coefficient.
    pub const fn get(&self, coefficient: Coefficient) -> f64 {
        match coefficient {
            Coefficient::Alpha => self.alpha_diff,
            Coefficient::MktRf => self.beta_mkt_rf,
            Coefficient::Smb => self.beta_smb,
            Coefficient::Hml => self.beta_hml,
        }
    }

    /// Active betas in `Mkt-RF`, `SMB`, `HML` order.
    pub const fn betas(&self) -> [f64; 3] {
        [self.beta_mkt_rf, self.beta_smb, self.beta_hml]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(alpha: f64, mkt: f64, smb: f64, hml: f64) -> RegressionResult {
        RegressionResult {
            alpha,
            beta_mkt_rf: mkt,
            beta_smb: smb,
            beta_hml: hml,
            r_squared: 0.8,
            observations: 120,
        }
    }

    #[test]
    fn test_active_is_asset_minus_benchmark() {
        let etf = result(0.0012, 1.35, 0.62, -0.48);
        let bm = result(0.0001, 0.99, -0.12, 0.03);

        let active = ActiveExposure::between(&etf, &bm);

        for coefficient in Coefficient::ALL {
            assert_eq!(
                active.get(coefficient),
                etf.get(coefficient) - bm.get(coefficient)
            );
        }
    }

    #[test]
    fn test_identical_results_have_no_active_exposure() {
        let spy = result(0.0001, 1.0, -0.1, 0.02);
        let active = ActiveExposure::between(&spy, &spy);

        assert_eq!(active.betas(), [0.0; 3]);
        assert_eq!(active.alpha_diff, 0.0);
    }

    #[test]
    fn test_betas_order() {
        let active =
            ActiveExposure::between(&result(0.0, 2.0, 3.0, 4.0), &result(0.0, 1.0, 1.0, 1.0));
        assert_eq!(active.betas(), [1.0, 2.0, 3.0]);
    }
}
