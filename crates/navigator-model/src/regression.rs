//! Three-factor OLS regression.
//!
//! Fits `Excess = alpha + b1 * Mkt-RF + b2 * SMB + b3 * HML + e` by minimising
//! the sum of squared residuals. Predictors are centred before solving the
//! normal equations, so the intercept is recovered from the means and the
//! Cholesky factorisation only sees the 3x3 scatter matrix.

use crate::align::MergedFrame;
use crate::error::{ModelError, Result};
use navigator_data::columns::{EXCESS, FACTORS};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Number of predictors in the three-factor model.
pub const PREDICTORS: usize = FACTORS.len();

/// A pivot smaller than this fraction of its column's scatter means the column
/// is (numerically) a linear combination of the previous ones.
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// Fields of a regression result, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coefficient {
    /// Intercept
    Alpha,
    /// Market excess return loading
    MktRf,
    /// Size loading
    Smb,
    /// Value loading
    Hml,
}

impl Coefficient {
    /// All coefficients, intercept first.
    pub const ALL: [Self; 4] = [Self::Alpha, Self::MktRf, Self::Smb, Self::Hml];

    /// Factor loadings only.
    pub const BETAS: [Self; 3] = [Self::MktRf, Self::Smb, Self::Hml];

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Alpha => "Intercept (alpha)",
            Self::MktRf => "Beta Mkt-RF",
            Self::Smb => "Beta SMB",
            Self::Hml => "Beta HML",
        }
    }

    /// Short factor name (`Mkt-RF`, `SMB`, `HML`, or `Alpha`).
    pub const fn factor(&self) -> &'static str {
        match self {
            Self::Alpha => "Alpha",
            Self::MktRf => FACTORS[0],
            Self::Smb => FACTORS[1],
            Self::Hml => FACTORS[2],
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the three-factor regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Intercept: return not explained by the factors.
    pub alpha: f64,
    /// Sensitivity to the market excess return.
    pub beta_mkt_rf: f64,
    /// Sensitivity to small-minus-big.
    pub beta_smb: f64,
    /// Sensitivity to high-minus-low.
    pub beta_hml: f64,
    /// In-sample coefficient of determination.
    pub r_squared: f64,
    /// Number of observations fitted.
    pub observations: usize,
}

impl RegressionResult {
    /// Value of a coefficient.
    pub const fn get(&self, coefficient: Coefficient) -> f64 {
        match coefficient {
            Coefficient::Alpha => self.alpha,
            Coefficient::MktRf => self.beta_mkt_rf,
            Coefficient::Smb => self.beta_smb,
            Coefficient::Hml => self.beta_hml,
        }
    }

    /// Factor loadings in `Mkt-RF`, `SMB`, `HML` order.
    pub const fn betas(&self) -> [f64; 3] {
        [self.beta_mkt_rf, self.beta_smb, self.beta_hml]
    }
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha={:.4} mkt_rf={:.4} smb={:.4} hml={:.4} r2={:.4} (n={})",
            self.alpha,
            self.beta_mkt_rf,
            self.beta_smb,
            self.beta_hml,
            self.r_squared,
            self.observations
        )
    }
}

/// Ordinary least squares fit with an intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    /// Intercept
    pub intercept: f64,
    /// Slope coefficients, one per predictor column
    pub coefficients: Array1<f64>,
    /// In-sample R²
    pub r_squared: f64,
}

/// Fit excess return on the three factors.
///
/// # Errors
/// * [`ModelError::InsufficientData`] with fewer than four rows (this includes
///   an empty merged frame)
/// * [`ModelError::Singular`] when the factors are collinear or constant
/// * [`ModelError::NonFinite`] when an input value is NaN or infinite
pub fn run_factor_regression(merged: &MergedFrame) -> Result<RegressionResult> {
    let n = merged.len();
    if n < PREDICTORS + 1 {
        return Err(ModelError::InsufficientData {
            required: PREDICTORS + 1,
            actual: n,
        });
    }

    let y = Array1::from(checked_column(merged, EXCESS)?);
    let mut x = Array2::<f64>::zeros((n, PREDICTORS));
    for (j, name) in FACTORS.iter().enumerate() {
        x.column_mut(j)
            .assign(&Array1::from(checked_column(merged, name)?));
    }

    let fit = fit_ols(&x, &y)?;
    let result = RegressionResult {
        alpha: fit.intercept,
        beta_mkt_rf: fit.coefficients[0],
        beta_smb: fit.coefficients[1],
        beta_hml: fit.coefficients[2],
        r_squared: fit.r_squared,
        observations: n,
    };

    debug!(asset = merged.asset(), %result, "regression complete");
    Ok(result)
}

fn checked_column(merged: &MergedFrame, name: &str) -> Result<Vec<f64>> {
    let values = merged.column(name)?;
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite(name.to_string()));
    }
    Ok(values)
}

/// Fit `y = intercept + x * b` by least squares.
///
/// `x` holds one predictor per column; an intercept is always included.
pub fn fit_ols(x: &Array2<f64>, y: &Array1<f64>) -> Result<OlsFit> {
    let (n, p) = x.dim();
    if y.len() != n {
        return Err(ModelError::DimensionMismatch {
            expected: n,
            actual: y.len(),
        });
    }
    if n < p + 1 {
        return Err(ModelError::InsufficientData {
            required: p + 1,
            actual: n,
        });
    }

    let x_mean = x.mean_axis(Axis(0)).ok_or(ModelError::InsufficientData {
        required: p + 1,
        actual: n,
    })?;
    let y_mean = y.sum() / n as f64;

    let xc = x - &x_mean.clone().insert_axis(Axis(0));
    let yc = y - y_mean;

    let scatter = xc.t().dot(&xc);
    let cross = xc.t().dot(&yc);
    let coefficients = cholesky_solve(&scatter, &cross)?;

    let intercept = y_mean - x_mean.dot(&coefficients);
    let residuals = &yc - &xc.dot(&coefficients);
    let ssr = residuals.dot(&residuals);
    let sst = yc.dot(&yc);

    let r_squared = if sst > 0.0 {
        (1.0 - ssr / sst).clamp(0.0, 1.0)
    } else if ssr == 0.0 {
        1.0
    } else {
        0.0
    };

    Ok(OlsFit {
        intercept,
        coefficients,
        r_squared,
    })
}

/// Solve `a * b = rhs` for a symmetric positive definite `a`.
fn cholesky_solve(a: &Array2<f64>, rhs: &Array1<f64>) -> Result<Array1<f64>> {
    let p = a.nrows();
    let mut l = Array2::<f64>::zeros((p, p));

    for j in 0..p {
        let diag = a[[j, j]];
        let pivot = diag - (0..j).map(|k| l[[j, k]] * l[[j, k]]).sum::<f64>();
        // Also rejects NaN.
        if !(diag > 0.0 && pivot > SINGULAR_TOLERANCE * diag) {
            return Err(ModelError::Singular);
        }
        l[[j, j]] = pivot.sqrt();

        for i in (j + 1)..p {
            let dot: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            l[[i, j]] = (a[[i, j]] - dot) / l[[j, j]];
        }
    }

    // L z = rhs
    let mut z = Array1::<f64>::zeros(p);
    for i in 0..p {
        let dot: f64 = (0..i).map(|k| l[[i, k]] * z[k]).sum();
        z[i] = (rhs[i] - dot) / l[[i, i]];
    }

    // L^T b = z
    let mut b = Array1::<f64>::zeros(p);
    for i in (0..p).rev() {
        let dot: f64 = ((i + 1)..p).map(|k| l[[k, i]] * b[k]).sum();
        b[i] = (z[i] - dot) / l[[i, i]];
    }

    Ok(b)
}
