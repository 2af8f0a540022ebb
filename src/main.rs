use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use sanctions_refiner::infra::{read_raw_records, CsvDatasetWriter, JsonSummaryWriter};
use sanctions_refiner::observability::init_logging;
use sanctions_refiner::pipeline::orchestrator::{run_pipeline, PipelineOrchestrator};

#[derive(Parser)]
#[command(name = "sanctions-refiner")]
#[command(about = "Cleans and consolidates flat sanctions-list exports")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: read, enrich, group, assess, write both artifacts
    Process {
        /// Path to the input CSV export
        #[arg(long, default_value = "data/ConList.csv")]
        input: PathBuf,
        /// Path for the consolidated dataset CSV
        #[arg(long, default_value = "data/outputs/sanctions_dataset.csv")]
        output_dataset: PathBuf,
        /// Path for the data-quality summary JSON
        #[arg(long, default_value = "data/outputs/data_quality_assessment.json")]
        output_summary: PathBuf,
    },
    /// Compute the quality summary only and print it to stdout
    Quality {
        /// Path to the input CSV export
        #[arg(long, default_value = "data/ConList.csv")]
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging();

    match cli.command {
        Commands::Process {
            input,
            output_dataset,
            output_summary,
        } => {
            println!("🔄 Processing sanctions export: {}", input.display());

            let rows = read_raw_records(&input)
                .with_context(|| format!("Failed to read input file {}", input.display()))?;

            let mut orchestrator = PipelineOrchestrator::new(
                Box::new(CsvDatasetWriter::new(&output_dataset)),
                Box::new(JsonSummaryWriter::new(&output_summary)),
            );
            let outcome = orchestrator.run(rows)?;

            println!("\n📊 Run results:");
            println!("   Records read: {}", outcome.summary.record_count);
            println!("   Records processed: {}", outcome.summary.processed_entries);
            println!("   Entities written: {}", outcome.entities.len());
            println!(
                "   Exact duplicate rows: {}",
                outcome.summary.duplicates.exact_duplicates
            );
            println!("   Dataset: {}", output_dataset.display());
            println!("   Quality summary: {}", output_summary.display());
            println!("✅ Processing completed");
        }
        Commands::Quality { input } => {
            info!("Computing quality summary for {}", input.display());

            let rows = read_raw_records(&input)
                .with_context(|| format!("Failed to read input file {}", input.display()))?;
            let outcome = run_pipeline(rows);

            println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
        }
    }

    Ok(())
}
