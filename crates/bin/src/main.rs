//! Navigator CLI binary.
//!
//! Runs a Fama-French three-factor exposure analysis for an ETF, optionally
//! against a benchmark, and prints or exports the results.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use navigator::data::columns::{HML, MKT_RF, RF, SMB};
use navigator::data::{FactorDataset, FrenchLibraryClient};
use navigator::narrative::LlmConfig;
use navigator::{
    AnalysisRequest, AnalysisResponse, DefaultNavigator, FactorLoader, FactorSource,
    NavigatorConfig, build_report, write_exports,
};
use serde_json::json;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::warn;

const DEFAULT_LOG_FILTER: &str = "navigator=info,navigator_data=info,navigator_model=info,\
                                  navigator_narrative=info,navigator_output=info";

#[derive(Parser)]
#[command(name = "navigator")]
#[command(about = "Navigator: Fama-French factor exposure analyzer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regress an ETF's excess returns on the Fama-French factors
    Analyze {
        /// ETF ticker
        ticker: String,

        /// Benchmark ticker to compare against
        #[arg(long)]
        benchmark: Option<String>,

        /// First day of history (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Factor frequency
        #[arg(long, value_enum, default_value_t = Frequency::Monthly)]
        frequency: Frequency,

        /// Local copy of the factor dataset (.zip or .csv)
        #[arg(long)]
        factors_file: Option<PathBuf>,

        /// Compound daily returns to calendar months before joining monthly factors
        #[arg(long)]
        compound: bool,

        /// Skip the generated summary
        #[arg(long)]
        no_narrative: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write merged data and coefficients as CSV into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show the latest Fama-French factor values
    Factors {
        /// First day of history (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Factor frequency
        #[arg(long, value_enum, default_value_t = Frequency::Monthly)]
        frequency: Frequency,

        /// Local copy of the factor dataset (.zip or .csv)
        #[arg(long)]
        factors_file: Option<PathBuf>,

        /// Number of most recent rows to show
        #[arg(long, default_value = "12")]
        tail: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Frequency {
    Monthly,
    Daily,
}

impl From<Frequency> for FactorDataset {
    fn from(frequency: Frequency) -> Self {
        match frequency {
            Frequency::Monthly => Self::Monthly,
            Frequency::Daily => Self::Daily,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            ticker,
            benchmark,
            start,
            frequency,
            factors_file,
            compound,
            no_narrative,
            format,
            export,
        } => {
            let mut config = NavigatorConfig::default()
                .with_dataset(frequency.into())
                .with_compound_monthly(compound);
            if let Some(start) = start {
                config = config.with_start(start);
            }
            if let Some(path) = factors_file {
                config = config.with_factors_file(path);
            }
            config = if no_narrative {
                config.without_narrative()
            } else {
                config.with_llm(narrative_config())
            };

            let mut request = AnalysisRequest::new(ticker);
            if let Some(benchmark) = benchmark {
                request = request.with_benchmark(benchmark);
            }

            analyze(request, config, format, export).await?;
        }
        Commands::Factors {
            start,
            frequency,
            factors_file,
            tail,
            format,
        } => {
            show_factors(start, frequency.into(), factors_file, tail, format).await?;
        }
    }

    Ok(())
}

fn narrative_config() -> Option<LlmConfig> {
    match LlmConfig::from_env() {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "narratives disabled");
            None
        }
    }
}

fn spinner(message: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    Ok(pb)
}

async fn analyze(
    request: AnalysisRequest,
    config: NavigatorConfig,
    format: OutputFormat,
    export: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let navigator = DefaultNavigator::from_config(config.clone())?;

    let pb = match format {
        OutputFormat::Text => Some(spinner(&format!(
            "Analyzing {}...",
            request.ticker.trim().to_uppercase()
        ))?),
        OutputFormat::Json => None,
    };

    let response = navigator.handle(&request).await;

    if let Some(pb) = pb {
        if response.is_error() {
            pb.finish_with_message("Failed!");
        } else {
            pb.finish_and_clear();
        }
    }

    if let Some(error) = &response.error {
        return Err(error.clone().into());
    }

    match format {
        OutputFormat::Text => print_analysis(&response),
        OutputFormat::Json => {
            println!("{}", build_report(&response, &config)?.to_json()?);
        }
    }

    if let Some(dir) = export {
        let paths = write_exports(&response, &dir)?;
        if format == OutputFormat::Text {
            println!("\nExported:");
            for path in paths {
                println!("  {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_analysis(response: &AnalysisResponse) {
    let title = response
        .analysis
        .as_ref()
        .map(|a| a.asset.ticker.clone())
        .unwrap_or_default();

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", format!("FACTOR EXPOSURE ANALYSIS: {}", title));
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("{}\n", response.portfolio_label);

    if let Some(result) = &response.result {
        println!("Regression ({} observations)", result.observations);
    }
    println!("{}", "-".repeat(40));
    println!("{}\n", response.summary_text);

    print!("{}", response.exposure_figure.to_text());
    if !response.cumulative_figure.is_empty() {
        println!();
        print!("{}", response.cumulative_figure.to_text());
    }

    if !response.narrative.is_empty() {
        println!("\nSummary");
        println!("{}", "-".repeat(40));
        println!("{}", response.narrative);
    }
    if !response.cumulative_narrative.is_empty() {
        println!("\n{}", response.cumulative_narrative);
    }

    if !response.notes.is_empty() {
        println!("\nNotes:");
        for note in &response.notes {
            println!("  ⚠ {}", note);
        }
    }
}

async fn show_factors(
    start: Option<NaiveDate>,
    dataset: FactorDataset,
    factors_file: Option<PathBuf>,
    tail: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = start.unwrap_or_else(|| NavigatorConfig::default().start);
    let loader = match factors_file {
        Some(path) => FactorLoader::File(path),
        None => FactorLoader::Remote(FrenchLibraryClient::new()?),
    };

    let pb = match format {
        OutputFormat::Text => Some(spinner(&format!("Loading {}...", dataset))?),
        OutputFormat::Json => None,
    };
    let table = loader.factors(dataset, start).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let table = table?;

    let mkt_rf = table.column(MKT_RF)?;
    let smb = table.column(SMB)?;
    let hml = table.column(HML)?;
    let rf = table.column(RF)?;

    let first = table.len().saturating_sub(tail);
    let rows = first..table.len();

    match format {
        OutputFormat::Text => {
            println!("\n{} ({} rows, showing {})\n", dataset, table.len(), rows.len());
            println!(
                "{:<12} {:>10} {:>10} {:>10} {:>10}",
                "Period", MKT_RF, SMB, HML, RF
            );
            println!("{}", "-".repeat(56));
            for i in rows {
                println!(
                    "{:<12} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
                    table.periods()[i].to_string(),
                    mkt_rf[i],
                    smb[i],
                    hml[i],
                    rf[i]
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = rows
                .map(|i| {
                    json!({
                        "period": table.periods()[i].to_string(),
                        "date": table.periods()[i].end_date(),
                        "Mkt-RF": mkt_rf[i],
                        "SMB": smb[i],
                        "HML": hml[i],
                        "RF": rf[i],
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "dataset": dataset.name(),
                    "rows": output,
                }))?
            );
        }
    }

    Ok(())
}
