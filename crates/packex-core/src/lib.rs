//! Core library for delivery-document asset extraction.
//!
//! This crate provides:
//! - Text acquisition from PDFs (embedded text layer with OCR fallback)
//! - Vendor format dispatch (indicator-counting classifier)
//! - Per-format field extraction (header metadata + serial-to-part-number
//!   association with a static model lookup table)
//!
//! The pipeline is synchronous and stateless per document; results are
//! handed to the caller for review before anything touches an inventory
//! store.

pub mod dispatch;
pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pdf;

pub use dispatch::{DocumentFormat, detect_format, indicator_hits};
pub use error::{OcrError, PackexError, PdfError, Result};
pub use extract::{FormatParser, extract_document};
pub use models::{
    AcquiredText, AssetRecord, ExtractionConfig, ExtractionResult, OcrConfig, PackexConfig,
    PageSource, PdfConfig,
};
pub use ocr::{NullOcr, OcrEngine, TesseractOcr};
pub use pdf::{DocumentReader, acquire_text};

/// Process a document end to end: acquire text, dispatch, extract.
///
/// Fails only when the PDF cannot be opened at all; everything
/// recoverable degrades into warnings on the result.
pub fn process_file(
    path: &std::path::Path,
    ocr: &dyn OcrEngine,
    config: &PackexConfig,
) -> Result<(ExtractionResult, AcquiredText)> {
    let acquired = acquire_text(path, ocr, &config.pdf)?;
    let result = extract_document(&acquired.text, &config.extraction);
    Ok((result, acquired))
}
