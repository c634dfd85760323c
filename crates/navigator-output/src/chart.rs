//! Backend-neutral chart descriptions.
//!
//! A [`Figure`] carries everything a plotting frontend needs (title, axis
//! labels and one or more traces) without tying the crate to a renderer.
//! [`Figure::default`] is the empty figure shown when there is nothing to
//! plot.

use navigator_model::{ActiveExposure, Coefficient, CumulativeReturns, RegressionResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    /// Categorical bars
    Bar,
    /// Connected points over time
    Line,
}

/// One data series of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Legend name.
    pub name: String,
    /// Drawing style.
    pub kind: TraceKind,
    /// Category labels or ISO dates.
    pub x: Vec<String>,
    /// Values.
    pub y: Vec<f64>,
}

/// A titled chart with labelled axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Chart title.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Data series.
    pub traces: Vec<Trace>,
}

impl Figure {
    /// Empty figure with a title and axis labels.
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            traces: Vec::new(),
        }
    }

    /// Add a trace.
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(|t| t.y.is_empty())
    }

    /// Plain-text rendering: horizontal bars for bar traces, first and last
    /// points for line traces.
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        let _ = writeln!(output, "{}", self.title);
        output.push_str(&"=".repeat(self.title.len().max(20)));
        output.push('\n');

        for trace in &self.traces {
            match trace.kind {
                TraceKind::Bar => render_bars(&mut output, trace),
                TraceKind::Line => render_line(&mut output, trace, &self.y_label),
            }
        }
        output
    }
}

fn render_bars(output: &mut String, trace: &Trace) {
    let scale = trace.y.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let label_width = trace.x.iter().map(String::len).max().unwrap_or(0);

    for (label, value) in trace.x.iter().zip(&trace.y) {
        let len = if scale > 0.0 {
            ((value.abs() / scale) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = if *value < 0.0 { "░" } else { "█" };
        let _ = writeln!(
            output,
            "{:<label_width$}  {:>8.4}  {}",
            label,
            value,
            bar.repeat(len)
        );
    }
}

fn render_line(output: &mut String, trace: &Trace, y_label: &str) {
    if let (Some(first_x), Some(last_x), Some(last_y)) =
        (trace.x.first(), trace.x.last(), trace.y.last())
    {
        let _ = writeln!(
            output,
            "{:<8} {} {} -> {}: {:.2}%",
            trace.name,
            y_label,
            first_x,
            last_x,
            last_y * 100.0
        );
    }
}

/// Bars of a single asset's betas, titled `Factor Exposures for <TICKER>`.
pub fn exposure_figure(ticker: &str, result: &RegressionResult) -> Figure {
    let ticker = ticker.to_uppercase();

    Figure::new(format!("Factor Exposures for {ticker}"), "Factor", "Beta").with_trace(Trace {
        name: ticker,
        kind: TraceKind::Bar,
        x: Coefficient::BETAS.iter().map(|c| c.factor().to_string()).collect(),
        y: result.betas().to_vec(),
    })
}

/// Bars of active betas (asset minus benchmark).
pub fn active_exposure_figure(active: &ActiveExposure) -> Figure {
    Figure::new("Active Factor Exposures", "Factor", "Active Beta").with_trace(Trace {
        name: "Active Exposures".to_string(),
        kind: TraceKind::Bar,
        x: Coefficient::BETAS.iter().map(|c| c.label().to_string()).collect(),
        y: active.betas().to_vec(),
    })
}

/// Two cumulative return lines over the common dates.
pub fn cumulative_figure(cumulative: &CumulativeReturns) -> Figure {
    let dates: Vec<String> = cumulative
        .dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    Figure::new("Cumulative Returns", "Date", "Return")
        .with_trace(Trace {
            name: cumulative.asset_name.to_uppercase(),
            kind: TraceKind::Line,
            x: dates.clone(),
            y: cumulative.asset.clone(),
        })
        .with_trace(Trace {
            name: cumulative.benchmark_name.to_uppercase(),
            kind: TraceKind::Line,
            x: dates,
            y: cumulative.benchmark.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn result() -> RegressionResult {
        RegressionResult {
            alpha: 0.0004,
            beta_mkt_rf: 1.25,
            beta_smb: 0.5,
            beta_hml: -0.4,
            r_squared: 0.8,
            observations: 100,
        }
    }

    #[test]
    fn test_default_figure_is_empty() {
        let figure = Figure::default();
        assert!(figure.is_empty());
        assert_eq!(figure.to_text(), "");
    }

    #[test]
    fn test_exposure_figure() {
        let figure = exposure_figure("arkk", &result());

        assert_eq!(figure.title, "Factor Exposures for ARKK");
        assert_eq!(figure.x_label, "Factor");
        assert_eq!(figure.y_label, "Beta");
        assert_eq!(figure.traces.len(), 1);
        assert_eq!(figure.traces[0].name, "ARKK");
        assert_eq!(figure.traces[0].x, vec!["Mkt-RF", "SMB", "HML"]);
        assert_eq!(figure.traces[0].y, vec![1.25, 0.5, -0.4]);
    }

    #[test]
    fn test_active_exposure_figure() {
        let bm = RegressionResult {
            beta_mkt_rf: 1.0,
            beta_smb: 0.0,
            beta_hml: 0.1,
            ..result()
        };
        let figure = active_exposure_figure(&ActiveExposure::between(&result(), &bm));

        assert_eq!(figure.title, "Active Factor Exposures");
        assert_eq!(figure.y_label, "Active Beta");
        assert_eq!(figure.traces[0].x, vec!["Beta Mkt-RF", "Beta SMB", "Beta HML"]);
        assert_eq!(figure.traces[0].y, vec![0.25, 0.5, -0.4 - 0.1]);
    }

    #[test]
    fn test_cumulative_figure() {
        let cumulative = CumulativeReturns {
            asset_name: "arkk".to_string(),
            benchmark_name: "spy".to_string(),
            dates: vec![
                NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
                NaiveDate::from_ymd_opt(2021, 1, 5).unwrap(),
            ],
            asset: vec![0.01, 0.03],
            benchmark: vec![0.0, 0.01],
        };

        let figure = cumulative_figure(&cumulative);

        assert_eq!(figure.title, "Cumulative Returns");
        assert_eq!(figure.x_label, "Date");
        assert_eq!(figure.traces[0].name, "ARKK");
        assert_eq!(figure.traces[1].name, "SPY");
        assert_eq!(figure.traces[1].x, vec!["2021-01-04", "2021-01-05"]);
        assert!(figure.traces.iter().all(|t| t.kind == TraceKind::Line));

        let text = figure.to_text();
        assert!(text.contains("ARKK"));
        assert!(text.contains("3.00%"));
    }

    #[test]
    fn test_bar_text_rendering() {
        let text = exposure_figure("SPY", &result()).to_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Factor Exposures for SPY");
        assert!(lines[2].starts_with("Mkt-RF"));
        assert!(lines[2].ends_with(&"█".repeat(BAR_WIDTH)));
        assert!(lines[4].contains("-0.4000"));
        assert!(lines[4].contains('░'));
    }

    #[test]
    fn test_figure_serializes_kind_lowercase() {
        let json = serde_json::to_value(exposure_figure("SPY", &result())).unwrap();
        assert_eq!(json["traces"][0]["kind"], "bar");
    }
}
