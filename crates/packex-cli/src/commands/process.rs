//! Process command - extract assets from a single delivery document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use packex_core::models::{AcquiredText, ExtractionResult, PageSource};
use packex_core::process_file;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip OCR and use only the embedded text layer
    #[arg(long)]
    text_only: bool,

    /// Show the per-page acquisition report
    #[arg(long)]
    show_report: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per asset)
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Acquiring text...");
    pb.set_position(20);

    let ocr = super::ocr_engine(&config, args.text_only);
    let (result, acquired) = process_file(&args.input, ocr.as_ref(), &config)?;

    pb.set_message("Extraction done");
    pb.set_position(90);
    pb.finish_with_message("Done");

    let output = format_result(&result, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{output}");
    }

    if args.show_report {
        print_report(&acquired);
    }

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {warning}");
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

fn print_report(acquired: &AcquiredText) {
    println!();
    println!("{}", style("Acquisition report:").blue());
    for page in &acquired.pages {
        let source = match page.source {
            PageSource::TextLayer => "text layer",
            PageSource::Ocr => "ocr",
            PageSource::Empty => "empty",
        };
        println!("  page {:>3}  {:<10}  {} chars", page.number, source, page.chars);
    }
}

pub(crate) fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "serial",
        "name",
        "model_identifier",
        "manufacturer",
        "category",
        "cpu_type",
        "memory_gb",
        "storage_gb",
        "condition",
        "po_number",
        "do_number",
    ])?;

    for asset in &result.assets {
        wtr.write_record([
            asset.serial.as_str(),
            asset.name.as_str(),
            asset.model_identifier.as_deref().unwrap_or_default(),
            asset.manufacturer.as_str(),
            asset.category.as_str(),
            asset.cpu_type.as_deref().unwrap_or_default(),
            &asset.memory_gb.map(|v| v.to_string()).unwrap_or_default(),
            &asset.storage_gb.map(|v| v.to_string()).unwrap_or_default(),
            asset.condition.as_str(),
            result.po_number.as_deref().unwrap_or_default(),
            result.do_number.as_deref().unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Format: {}\n", result.format));
    if let Some(po) = &result.po_number {
        output.push_str(&format!("PO number: {po}\n"));
    }
    if let Some(doc) = &result.do_number {
        output.push_str(&format!("DO number: {doc}\n"));
    }
    if let Some(date) = &result.ship_date {
        output.push_str(&format!("Ship date: {date}\n"));
    }
    if let Some(supplier) = &result.supplier {
        output.push_str(&format!("Supplier: {supplier}\n"));
    }
    if let Some(receiver) = &result.receiver {
        output.push_str(&format!("Receiver: {receiver}\n"));
    }
    if let Some(qty) = result.total_quantity {
        output.push_str(&format!("Stated quantity: {qty}\n"));
    }

    output.push_str(&format!("\nAssets ({}):\n", result.assets.len()));
    for asset in &result.assets {
        output.push_str(&format!(
            "  {}  {}  {}\n",
            asset.serial,
            asset.model_identifier.as_deref().unwrap_or("-"),
            asset.name
        ));
    }

    if !result.breakdown.is_empty() {
        output.push_str("\nBreakdown:\n");
        for (name, entry) in &result.breakdown {
            output.push_str(&format!("  {:>3} x {name}\n", entry.count));
        }
    }

    output
}
