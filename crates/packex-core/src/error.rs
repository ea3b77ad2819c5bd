//! Error types for the packex-core library.

use thiserror::Error;

/// Main error type for the packex library.
#[derive(Error, Debug)]
pub enum PackexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
///
/// `Parse` and `Encrypted` are the only hard failures in the pipeline:
/// a document that cannot be opened cannot proceed to extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Failed to render a page to a bitmap.
    #[error("failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },
}

/// Errors related to OCR processing.
///
/// These never abort a document; the acquisition layer catches them per
/// page and substitutes an empty string.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR backend is not installed or cannot be spawned.
    #[error("OCR backend unavailable: {0}")]
    Unavailable(String),

    /// The OCR process ran but failed.
    #[error("OCR failed: {0}")]
    Recognition(String),

    /// Invalid image handed to the engine.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the packex library.
pub type Result<T> = std::result::Result<T, PackexError>;
