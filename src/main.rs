mod clean;
mod dataset;
mod db;
mod export;
mod lexicon;
mod metrics;
mod settings;
mod stemmer;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use clean::{clean_title, Cleaner};
use lexicon::Lexicon;
use metrics::{new_run_id, RunTracker};
use settings::Settings;
use stemmer::IndonesianStemmer;

#[derive(Parser)]
#[command(name = "hoax_corpus", about = "Labeled Indonesian hoax/fact news corpus builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, label, merge and shuffle every scraped source into one dataset
    Build {
        /// Directory holding the scraper CSV exports
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Combined CSV output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// SQLite copy of the dataset and run statistics
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show statistics of the last build
    Stats {
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Print the cleaned form of a single text
    Preview {
        /// Treat the text as a headline
        #[arg(long)]
        title: bool,
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(settings = ?settings, "settings loaded");

    let stemmer = IndonesianStemmer;
    let cleaner = Cleaner::new(Lexicon::global(), &stemmer);

    match cli.command {
        Commands::Build {
            data_dir,
            output,
            db,
        } => {
            let data_dir = data_dir.unwrap_or(settings.data_dir);
            let output = output.unwrap_or(settings.output_csv);
            let db_path = db.unwrap_or(settings.db_path);

            println!(
                "Building corpus from {} source files in {}",
                dataset::SOURCE_FILES.len(),
                data_dir.display()
            );
            let mut tracker = RunTracker::new(new_run_id());
            let ds = dataset::assemble(
                &data_dir,
                dataset::SOURCE_FILES,
                dataset::SHUFFLE_SEED,
                &cleaner,
                &mut tracker,
            )?;

            if ds.is_empty() {
                warn!("no rows survived cleaning");
            }
            export::write_csv(&ds, &output)?;

            let conn = db::connect(&db_path)?;
            db::init_schema(&conn)?;
            db::save_dataset(&conn, tracker.run_id(), &ds)?;
            tracker.persist(&conn)?;

            print_sources(tracker.sources());
            let hoax = ds.records.iter().filter(|r| r.label == 1).count();
            println!(
                "\nTotal data: {} ({} hoax, {} fact) -> {}",
                ds.len(),
                hoax,
                ds.len() - hoax,
                output.display()
            );
            for r in ds.records.iter().take(5) {
                println!("  [{}] {}", r.label, truncate(&r.clean_title, 72));
            }
        }
        Commands::Stats { db } => {
            let db_path = db.unwrap_or(settings.db_path);
            let conn = db::connect(&db_path)?;
            db::init_schema(&conn)?;
            let Some(run_id) = db::latest_run(&conn)? else {
                println!("No builds recorded. Run 'build' first.");
                return Ok(());
            };
            println!("Run: {}", run_id);
            print_sources(&db::fetch_source_stats(&conn, &run_id)?);
            let c = db::label_counts(&conn)?;
            println!("\nRows:  {}", c.total);
            println!("Hoax:  {}", c.hoax);
            println!("Fact:  {}", c.fact);
        }
        Commands::Preview { title, text } => {
            if title {
                println!("{}", clean_title(&text));
            } else {
                println!("{}", cleaner.clean_body(&text));
            }
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn print_sources(sources: &[metrics::SourceStats]) {
    println!(
        "{:<28} | {:>6} | {:>7} | {:>5} | {:>5} | {:>4} | {:>4}",
        "Source", "Loaded", "Missing", "Weird", "Kept", "Hoax", "Fact"
    );
    println!("{}", "-".repeat(80));
    for s in sources {
        println!(
            "{:<28} | {:>6} | {:>7} | {:>5} | {:>5} | {:>4} | {:>4}",
            truncate(&s.source, 28),
            s.loaded,
            s.dropped_missing,
            s.dropped_weird,
            s.kept,
            s.hoax,
            s.fact()
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
