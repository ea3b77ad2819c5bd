//! CLI subcommands.

pub mod batch;
pub mod inspect;
pub mod process;

use std::path::Path;

use tracing::warn;

use packex_core::ocr::{NullOcr, OcrEngine, TesseractOcr};
use packex_core::models::PackexConfig;

/// Load the pipeline configuration, defaulting when no file is given.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<PackexConfig> {
    match config_path {
        Some(path) => Ok(PackexConfig::from_file(Path::new(path))?),
        None => Ok(PackexConfig::default()),
    }
}

/// Pick the OCR engine: tesseract when requested and present, otherwise
/// the null engine (text-layer extraction still works; scanned pages
/// degrade to empty with a warning in the logs).
pub(crate) fn ocr_engine(config: &PackexConfig, text_only: bool) -> Box<dyn OcrEngine> {
    if text_only {
        return Box::new(NullOcr);
    }

    let engine = TesseractOcr::new(&config.ocr);
    if engine.is_available() {
        Box::new(engine)
    } else {
        warn!(
            command = %config.ocr.command,
            "OCR backend not available; scanned pages will yield no text"
        );
        Box::new(NullOcr)
    }
}
