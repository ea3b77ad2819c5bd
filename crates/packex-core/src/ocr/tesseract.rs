//! Tesseract subprocess OCR engine.
//!
//! The bitmap is written to a scratch PNG and handed to the `tesseract`
//! binary with output on stdout. CPU-bound and blocking; a multi-page
//! scan takes seconds per page and the caller is expected to block for
//! the duration.

use std::process::Command;

use image::DynamicImage;
use tracing::{debug, warn};

use super::OcrEngine;
use crate::error::OcrError;
use crate::models::OcrConfig;

/// OCR engine shelling out to `tesseract`.
pub struct TesseractOcr {
    command: String,
    language: String,
    psm: u8,
}

impl TesseractOcr {
    /// Engine from the OCR config section.
    pub fn new(cfg: &OcrConfig) -> Self {
        Self {
            command: cfg.command.clone(),
            language: cfg.language.clone(),
            psm: cfg.psm,
        }
    }

    /// Whether the backend binary can be spawned at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new(&OcrConfig::default())
    }
}

impl OcrEngine for TesseractOcr {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(OcrError::InvalidImage("zero-sized bitmap".to_string()));
        }

        let dir = tempfile::tempdir()
            .map_err(|e| OcrError::Recognition(format!("scratch dir: {e}")))?;
        let img_path = dir.path().join("page.png");
        image
            .save(&img_path)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let output = Command::new(&self.command)
            .arg(&img_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .args(["--psm", &self.psm.to_string()])
            .output()
            .map_err(|e| OcrError::Unavailable(format!("{}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = ?output.status.code(), "tesseract exited with failure");
            return Err(OcrError::Recognition(stderr.trim().to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            chars = text.len(),
            width = image.width(),
            height = image.height(),
            "OCR page recognized"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_sized_image() {
        let engine = TesseractOcr::default();
        let img = DynamicImage::new_luma8(0, 0);
        assert!(matches!(
            engine.recognize(&img),
            Err(OcrError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let engine = TesseractOcr::new(&OcrConfig {
            command: "definitely-not-a-real-ocr-binary".to_string(),
            ..OcrConfig::default()
        });
        assert!(!engine.is_available());
    }
}
