//! Copylens command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use copylens::application::{CorrectionUseCases, ScrapeUseCases};
use copylens::infrastructure::{init_logging, AppConfig};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "copylens", version, about = "UI copy extraction and review pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape an HTML file or directory and export review artifacts
    Scan {
        /// HTML file or directory of HTML files
        path: PathBuf,
        /// Classify items with the configured analyzer
        #[arg(long)]
        analyze: bool,
    },
    /// Fetch and scrape a Figma document
    Figma {
        /// Figma file key
        file_key: String,
        /// Classify items with the configured analyzer
        #[arg(long)]
        analyze: bool,
    },
    /// Apply corrections from an edited CSV back into an HTML file
    Apply {
        /// Edited correction CSV
        corrections: PathBuf,
        /// HTML file to patch
        html: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }

    if let Err(e) = run(Cli::parse()).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env();

    match cli.command {
        Commands::Scan { path, analyze } => {
            let use_cases = ScrapeUseCases::new(&config, analyze)?;
            let summary = use_cases.scrape_html(&path).await?;
            report_scrape(&summary);
        }
        Commands::Figma { file_key, analyze } => {
            let use_cases = ScrapeUseCases::new(&config, analyze)?;
            let summary = use_cases.scrape_figma(&file_key).await?;
            report_scrape(&summary);
        }
        Commands::Apply { corrections, html } => {
            let use_cases = CorrectionUseCases::new(&config)?;
            let stats = use_cases.apply_corrections(&corrections, &html).await?;
            info!(
                "Corrections applied: {} applied, {} skipped, {} total",
                stats.applied, stats.skipped, stats.total
            );
        }
    }

    Ok(())
}

fn report_scrape(summary: &copylens::application::ScrapeSummary) {
    info!(
        "Scrape of \"{}\" complete: {} items, {} with issues",
        summary.source_name, summary.total_items, summary.items_with_issues
    );
    info!("Edit the CSV, then run: copylens apply {} <file.html>", summary.csv_path.display());
    info!("Report: {}", summary.report_path.display());
}
