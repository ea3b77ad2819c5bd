//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the packex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackexConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR backend configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// DPI for rendering pages handed to OCR. Kept low enough that a
    /// multi-page scan stays tractable on constrained hosting, high
    /// enough that tabular layouts survive recognition.
    pub render_dpi: u32,

    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Minimum non-whitespace characters for a page's text layer to be
    /// accepted without OCR.
    pub min_page_text_chars: usize,

    /// External renderer used when a page has no usable embedded scan
    /// image.
    pub render_command: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            render_dpi: 200,
            max_pages: 0,
            min_page_text_chars: 1,
            render_command: "pdftoppm".to_string(),
        }
    }
}

/// OCR backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// OCR executable.
    pub command: String,

    /// Recognition language passed to the backend.
    pub language: String,

    /// Page segmentation mode; 6 assumes a uniform block of text, which
    /// matches packing-list tables better than full auto.
    pub psm: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
            psm: 6,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum serial token length.
    pub min_serial_len: usize,

    /// Maximum serial token length.
    pub max_serial_len: usize,

    /// Size of the text window after a part number scanned for
    /// specification clues.
    pub spec_window_chars: usize,

    /// Condition assigned to extracted units.
    pub default_condition: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_serial_len: 10,
            max_serial_len: 12,
            spec_window_chars: 200,
            default_condition: "New".to_string(),
        }
    }
}

impl PackexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PackexConfig::default();
        assert_eq!(config.pdf.render_dpi, 200);
        assert_eq!(config.ocr.command, "tesseract");
        assert_eq!(config.extraction.default_condition, "New");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PackexConfig =
            serde_json::from_str(r#"{"pdf": {"render_dpi": 300}}"#).unwrap();
        assert_eq!(config.pdf.render_dpi, 300);
        assert_eq!(config.pdf.render_command, "pdftoppm");
        assert_eq!(config.ocr.language, "eng");
    }
}
