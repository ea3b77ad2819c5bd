//! Batch command - extract assets from a directory of documents.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use packex_core::models::ExtractionResult;
use packex_core::process_file;

use super::process::{OutputFormat, format_result};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input PDFs (e.g. "incoming/*.pdf")
    #[arg(required = true)]
    pattern: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format; JSON emits one document object per line
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip OCR and use only embedded text layers
    #[arg(long)]
    text_only: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let inputs: Vec<PathBuf> = glob::glob(&args.pattern)?
        .filter_map(|entry| entry.ok())
        .collect();

    if inputs.is_empty() {
        anyhow::bail!("No files match pattern: {}", args.pattern);
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let ocr = super::ocr_engine(&config, args.text_only);

    let mut outputs: Vec<String> = Vec::new();
    let mut processed = 0usize;
    let mut failed = 0usize;
    let mut total_assets = 0usize;

    for input in &inputs {
        pb.set_message(
            input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );

        match process_file(input, ocr.as_ref(), &config) {
            Ok((result, _acquired)) => {
                processed += 1;
                total_assets += result.assets.len();
                outputs.push(render_one(input, &result, args.format)?);
            }
            Err(e) => {
                failed += 1;
                warn!(file = %input.display(), error = %e, "Document failed");
                pb.println(format!(
                    "{} {}: {e}",
                    style("✗").red(),
                    input.display()
                ));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done");

    let combined = outputs.join("\n");
    if let Some(output_path) = &args.output {
        fs::write(output_path, &combined)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else if !combined.is_empty() {
        println!("{combined}");
    }

    println!(
        "{} {processed} processed, {failed} failed, {total_assets} assets extracted",
        style("ℹ").blue()
    );

    Ok(())
}

fn render_one(
    input: &std::path::Path,
    result: &ExtractionResult,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        // One compact JSON object per document for line-oriented tooling.
        OutputFormat::Json => {
            let mut value = serde_json::to_value(result)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert(
                    "source_file".to_string(),
                    serde_json::Value::String(input.display().to_string()),
                );
            }
            Ok(serde_json::to_string(&value)?)
        }
        _ => format_result(result, format),
    }
}
