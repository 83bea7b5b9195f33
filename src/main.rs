use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use policylens::config::Config;
use policylens::corpus::provider::DirectoryProvider;
use policylens::model::lda::LdaTrainer;
use policylens::output::json::JsonSink;
use policylens::output::terminal::TerminalSink;
use policylens::output::ReportSink;
use policylens::pipeline::analysis::{self, Analysis};
use policylens::pipeline::view::Selection;

/// policylens: topic trends in climate policy documents.
///
/// Fits a topic model over a folder of `<year>_<name>.txt` files, tags each
/// document with a sector, and charts how topics move across years.
#[derive(Parser)]
#[command(name = "policylens", version, about)]
struct Cli {
    /// Corpus directory (overrides POLICYLENS_CORPUS_DIR)
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the model and list its topics
    Topics,

    /// Show how many documents landed in each sector, and their years
    Sectors,

    /// Chart topic probabilities for one sector across years
    Trends {
        /// Sector to chart (see `policylens sectors`)
        #[arg(long)]
        sector: String,

        /// Year to include; repeat for several. Omit for all years.
        #[arg(long = "year")]
        years: Vec<String>,

        /// Topic id to chart, or -1 for all topics
        #[arg(long, default_value = "-1", allow_negative_numbers = true)]
        topic: i64,

        /// Print the view as JSON instead of charts
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging on stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("policylens=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.corpus {
        config.corpus_dir = dir;
    }

    match cli.command {
        Commands::Topics => {
            let analysis = train(&config)?;
            println!(
                "\n{}",
                format!(
                    "=== Topics ({} documents, {} topics) ===",
                    analysis.document_count, analysis.model.num_topics
                )
                .bold()
            );
            for topic in &analysis.model.topics {
                println!("  {}", topic.label);
            }
        }

        Commands::Sectors => {
            let analysis = train(&config)?;
            println!("\n{}", "=== Sectors ===".bold());
            for (sector, count) in analysis.sector_counts() {
                let years = analysis.years_for(&sector);
                let years = if years.is_empty() {
                    "-".to_string()
                } else {
                    years.join(", ")
                };
                println!("  {:<20} {:>4} docs  {}", sector, count, years.dimmed());
            }
        }

        Commands::Trends {
            sector,
            years,
            topic,
            json,
        } => {
            let table = config.sector_table()?;
            // Reject a bad sector before spending time on training
            table.resolve(&sector)?;

            let analysis = train(&config)?;
            let view = analysis.select(&Selection {
                sector,
                years,
                topic,
            })?;

            if json {
                JsonSink::new(std::io::stdout().lock()).render(&view)?;
            } else {
                TerminalSink.render(&view)?;
            }
        }
    }

    Ok(())
}

/// Read the corpus and fit the topic model with the configured settings.
fn train(config: &Config) -> Result<Analysis> {
    config.require_corpus()?;
    let table = config.sector_table()?;

    eprintln!("Reading corpus from {}...", config.corpus_dir.display());
    let provider = DirectoryProvider::new(&config.corpus_dir);

    let mut trainer = LdaTrainer::new(config.trainer.clone());
    trainer.show_progress = true;

    let analysis = analysis::run(&provider, table, &trainer)?;
    info!(
        documents = analysis.document_count,
        topics = analysis.model.num_topics,
        "Analysis ready"
    );
    Ok(analysis)
}
