//! Project Economics CLI
//!
//! Evaluates cost comparison and financial metric requests read as JSON from
//! a file or stdin. Missing request fields take their documented defaults.
//!
//! Usage:
//!   economics compare request.json
//!   echo '{"initial_investment": 50000}' | economics metrics
//!   economics variance --csv budget.csv
//!   economics batch requests.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use project_economics::{
    budget_file::{load_budget_csv, write_forecast_csv},
    request::{BudgetVarianceRequest, ForecastRequest},
    CostComparisonRequest, CostEstimationEngine, EstimationConfig, FinancialConfig,
    FinancialMetricsEngine, FinancialMetricsRequest,
};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "economics", version, about = "Software project cost estimation and financial metrics")]
struct Cli {
    /// JSON file overriding engine rates and solver settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare COCOMO, Function Points, PERT and regression estimates
    Compare { input: Option<PathBuf> },

    /// NPV, IRR, ROI and payback period
    Metrics { input: Option<PathBuf> },

    /// Metrics plus profitability index and a scored investment decision
    Analyze { input: Option<PathBuf> },

    /// Budget variance per phase
    Variance {
        input: Option<PathBuf>,

        /// Read phases from a phase,planned,actual CSV instead of JSON
        #[arg(long, conflicts_with = "input")]
        csv: Option<PathBuf>,
    },

    /// Monthly cash-flow forecast
    Forecast {
        input: Option<PathBuf>,

        /// Also write the monthly rows to this CSV file
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },

    /// Evaluate a JSON array of comparison requests in parallel
    Batch { input: Option<PathBuf> },
}

/// Empty request bodies mean "all defaults" for single requests
const EMPTY_OBJECT: &str = "{}";
/// and "no requests" for a batch
const EMPTY_ARRAY: &str = "[]";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EngineConfig {
    financial: FinancialConfig,
    estimation: EstimationConfig,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config: EngineConfig = match &cli.config {
        Some(path) => read_json(Some(path.as_path()), EMPTY_OBJECT).context("Failed to load engine config")?,
        None => EngineConfig::default(),
    };

    let start = Instant::now();

    match &cli.command {
        Command::Compare { input } => {
            let request: CostComparisonRequest = read_json(input.as_deref(), EMPTY_OBJECT)?;
            let engine = CostEstimationEngine::with_config(config.estimation)?;
            emit(&engine.compare_all_methods(&request), cli.compact)?;
        }
        Command::Metrics { input } => {
            let request: FinancialMetricsRequest = read_json(input.as_deref(), EMPTY_OBJECT)?;
            let engine = FinancialMetricsEngine::with_config(config.financial);
            let result = engine.financial_metrics(
                request.initial_investment,
                &request.cash_flows,
                Some(request.discount_rate),
            );
            emit(&result, cli.compact)?;
        }
        Command::Analyze { input } => {
            let request: FinancialMetricsRequest = read_json(input.as_deref(), EMPTY_OBJECT)?;
            let engine = FinancialMetricsEngine::with_config(config.financial);
            let result = engine.analyze_investment(
                request.initial_investment,
                &request.cash_flows,
                Some(request.discount_rate),
            );
            emit(&result, cli.compact)?;
        }
        Command::Variance { input, csv } => {
            let request: BudgetVarianceRequest = match csv {
                Some(path) => load_budget_csv(path)
                    .with_context(|| format!("Failed to load budget CSV {}", path.display()))?,
                None => read_json(input.as_deref(), EMPTY_OBJECT)?,
            };
            let engine = FinancialMetricsEngine::with_config(config.financial);
            emit(&engine.track_budget_variance(&request.planned, &request.actual), cli.compact)?;
        }
        Command::Forecast { input, csv_out } => {
            let request: ForecastRequest = read_json(input.as_deref(), EMPTY_OBJECT)?;
            let engine = FinancialMetricsEngine::with_config(config.financial);
            let result = engine.forecast_cash_flow(
                request.initial_revenue,
                request.growth_rate,
                &request.expenses,
                request.months,
            );

            if let Some(path) = csv_out {
                let file = File::create(path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                write_forecast_csv(file, &result.forecast)?;
                info!("Forecast rows written to {}", path.display());
            }
            emit(&result, cli.compact)?;
        }
        Command::Batch { input } => {
            let requests: Vec<CostComparisonRequest> = read_json(input.as_deref(), EMPTY_ARRAY)?;
            let engine = CostEstimationEngine::with_config(config.estimation)?;

            // One trained model, read concurrently by every request
            let results: Vec<_> = requests
                .par_iter()
                .map(|request| engine.compare_all_methods(request))
                .collect();

            info!("Evaluated {} comparison requests", results.len());
            emit(&results, cli.compact)?;
        }
    }

    info!("Completed in {:?}", start.elapsed());
    Ok(())
}

/// Read and parse JSON from a file, or from stdin when no path is given.
///
/// An empty body parses as `empty_default`.
fn read_json<T: DeserializeOwned>(path: Option<&Path>, empty_default: &str) -> Result<T> {
    let mut text = String::new();
    match path {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("Unable to open {}", path.display()))?
                .read_to_string(&mut text)?;
        }
        None => {
            io::stdin().read_to_string(&mut text).context("Unable to read stdin")?;
        }
    }

    parse_json(&text, empty_default)
}

fn parse_json<T: DeserializeOwned>(text: &str, empty_default: &str) -> Result<T> {
    let body = if text.trim().is_empty() { empty_default } else { text };
    serde_json::from_str(body).context("Invalid JSON request")
}

fn emit<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
