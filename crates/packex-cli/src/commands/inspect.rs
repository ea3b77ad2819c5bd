//! Inspect command - show which format indicators fire for a document.
//!
//! Dispatch debugging surface: prints every specialized format's
//! indicator hits against the acquired text, then the committed format.

use std::path::PathBuf;

use clap::Args;
use console::style;

use packex_core::models::PageSource;
use packex_core::pdf::acquire_text;
use packex_core::{detect_format, indicator_hits};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Skip OCR and use only the embedded text layer
    #[arg(long)]
    text_only: bool,
}

pub fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let ocr = super::ocr_engine(&config, args.text_only);
    let acquired = acquire_text(&args.input, ocr.as_ref(), &config.pdf)?;

    println!(
        "{} {} pages acquired ({} via OCR), {} chars",
        style("ℹ").blue(),
        acquired.pages.len(),
        acquired
            .pages
            .iter()
            .filter(|p| p.source == PageSource::Ocr)
            .count(),
        acquired.text.len()
    );
    println!();

    for score in indicator_hits(&acquired.text) {
        let status = if score.matched.len() >= score.threshold {
            style("match").green()
        } else {
            style("no match").dim()
        };
        println!(
            "{} [{}/{}] {}",
            score.format,
            score.matched.len(),
            score.threshold,
            status
        );
        for label in &score.matched {
            println!("    + {label}");
        }
    }

    println!();
    println!(
        "{} Selected format: {}",
        style("✓").green(),
        detect_format(&acquired.text)
    );

    Ok(())
}
