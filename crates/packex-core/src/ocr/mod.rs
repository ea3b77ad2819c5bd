//! OCR engines behind a trait seam.
//!
//! The acquisition layer only needs "bitmap in, text out"; which engine
//! does the recognizing is a deployment decision (and a test seam — the
//! acquisition tests count invocations through this trait).

mod tesseract;

pub use tesseract::TesseractOcr;

use image::DynamicImage;

use crate::error::OcrError;

/// Text recognition over a rendered page bitmap.
pub trait OcrEngine {
    /// Engine name for logs and reports.
    fn name(&self) -> &str;

    /// Recognize text in the bitmap.
    ///
    /// Errors are absorbed per page by the caller; implementations
    /// should not panic on unreadable input.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Engine that refuses every page; used for text-only operation.
pub struct NullOcr;

impl OcrEngine for NullOcr {
    fn name(&self) -> &str {
        "null"
    }

    fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        Err(OcrError::Unavailable("OCR disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_engine_always_fails() {
        let img = DynamicImage::new_luma8(4, 4);
        assert!(NullOcr.recognize(&img).is_err());
    }
}
