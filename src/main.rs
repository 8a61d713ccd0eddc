use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use surrosel::{
    format_general, render_report, run_selection, EmbeddingTable, Linkage, SelectionRequest,
    SelectorConfig, SimulationConfig, SimulationPlan, Strategy, DEFAULT_REFERENCE_FRACTIONS,
    DEFAULT_REPETITIONS, DEFAULT_SIZE,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Pick representative surrogates from an embedding and compare them against chance
#[derive(Parser, Debug)]
#[command(name = "surrosel")]
#[command(about = "Surrogate selection for embedded chemical datasets", long_about = None)]
struct Args {
    /// Path to the embedding table (JSON: {"columns": [...], "rows": [{"id", "values"}]})
    #[arg(short, long)]
    input: PathBuf,

    /// Feature columns used for selection and scoring (default: all columns)
    #[arg(long, value_delimiter = ',')]
    features: Vec<String>,

    /// Number of surrogates; values below 1 are a fraction of the dataset
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIZE)]
    size: f64,

    /// Selection strategies
    #[arg(long, value_delimiter = ',', default_value = "hierarchical")]
    strategies: Vec<String>,

    /// Skip automated selection
    #[arg(long)]
    no_auto: bool,

    /// File of user selected surrogate IDs, one per line
    #[arg(long)]
    user_ids: Option<PathBuf>,

    /// Random trials per size in the baseline simulation
    #[arg(long, default_value_t = DEFAULT_REPETITIONS)]
    repetitions: usize,

    /// Reference fractions always covered by the baseline simulation
    #[arg(long, value_delimiter = ',')]
    reference_fractions: Option<Vec<f64>>,

    /// Linkage for hierarchical selection
    #[arg(long, default_value = "ward")]
    linkage: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting surrosel v{}", env!("CARGO_PKG_VERSION"));

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let table: EmbeddingTable = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.input.display()))?;
    let population = table.population(&args.features)?;
    info!(
        "Loaded {} entities with {} feature dimensions",
        population.len(),
        population.dim()
    );

    let strategies = args
        .strategies
        .iter()
        .map(|s| s.parse::<Strategy>())
        .collect::<Result<Vec<_>, _>>()?;

    let user_ids = match &args.user_ids {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(raw.lines().map(str::to_string).collect())
        }
        None => None,
    };

    let request = SelectionRequest {
        size: (!args.no_auto).then_some(args.size),
        strategies,
        user_ids,
        selector: SelectorConfig {
            linkage: args.linkage.parse::<Linkage>()?,
        },
        simulation: SimulationConfig {
            repetitions: args.repetitions,
            ..Default::default()
        },
        plan: SimulationPlan::new(
            args.reference_fractions
                .clone()
                .unwrap_or_else(|| DEFAULT_REFERENCE_FRACTIONS.to_vec()),
        ),
    };

    let outcome = run_selection(population.clone(), &request)?;

    match args.format {
        OutputFormat::Text => {
            println!("{}", render_report(&population, &outcome.selections));
            println!();
            for (label, percentile) in outcome.percentiles() {
                if let Some(p) = percentile {
                    println!(
                        "{} beats {}% of random selections of the same size",
                        label,
                        format_general((1.0 - p) * 100.0, 3)
                    );
                }
            }
        }
        OutputFormat::Json => {
            let ids: Vec<&str> = population.ids().iter().map(String::as_str).collect();
            let body = json!({
                "ids": ids,
                "selections": outcome.selections,
                "simulation": outcome.simulation,
                "summary": outcome.summary,
                "labels": outcome.labels,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
