//! Data models: extraction results, asset records, configuration.

pub mod asset;
pub mod config;

pub use asset::{AcquiredText, AssetRecord, BreakdownEntry, ExtractionResult, PageSource, PageText};
pub use config::{ExtractionConfig, OcrConfig, PackexConfig, PdfConfig};
