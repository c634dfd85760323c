//! Text summaries of a regression and of relative performance.

use navigator_model::{Coefficient, CumulativeReturns, RegressionResult};
use std::cmp::Ordering;

/// The five result lines (`name: value`, four decimals), newline separated.
pub fn regression_summary_text(result: &RegressionResult) -> String {
    let mut lines: Vec<String> = Coefficient::ALL
        .iter()
        .map(|c| format!("{}: {:.4}", c.label(), result.get(*c)))
        .collect();
    lines.push(format!("R-squared: {:.4}", result.r_squared));
    lines.join("\n")
}

/// One-sentence comparison of final cumulative returns.
///
/// Returns an empty string when there are no common dates.
pub fn summarize_cumulative_returns(cumulative: &CumulativeReturns) -> String {
    let Some(outperformance) = cumulative.outperformance() else {
        return String::new();
    };

    let etf = cumulative.asset_name.to_uppercase();
    let benchmark = cumulative.benchmark_name.to_uppercase();

    let (direction, strength) = match outperformance.partial_cmp(&0.0) {
        Some(Ordering::Greater) => ("outperformed", "stronger"),
        Some(Ordering::Less) => ("underperformed", "weaker"),
        _ => ("performed similarly to", "comparable"),
    };

    format!(
        "From the selected start date to the present, {etf} has {direction} {benchmark} \
         by a cumulative margin of {:.2}%. This suggests that {etf} has delivered {strength} \
         performance relative to the benchmark over the observed period.",
        outperformance * 100.0
    )
}

/// `Analysis Portfolio: <name>`, plus a benchmark line when one is given.
pub fn portfolio_label(asset_name: &str, benchmark_name: Option<&str>) -> String {
    match benchmark_name.filter(|name| !name.is_empty()) {
        Some(benchmark) => {
            format!("Analysis Portfolio: {asset_name}\nBenchmark Portfolio: {benchmark}")
        }
        None => format!("Analysis Portfolio: {asset_name}"),
    }
}
