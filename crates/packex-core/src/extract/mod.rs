//! Field extraction: per-format parsers over acquired document text.
//!
//! Dispatch commits to exactly one parser per document. Header fields
//! are pulled with keyword-anchored regex cascades (ordered pattern
//! lists, first capture wins); the asset list comes from the shared
//! serial-to-part-number association pipeline.

pub mod associate;
pub mod generic;
pub mod lookup;
pub mod partno;
pub mod patterns;
pub mod serial;
pub mod specs;
pub mod success_tech;
pub mod synnex;

use regex::Regex;
use tracing::info;

use crate::dispatch::{DocumentFormat, detect_format};
use crate::models::{ExtractionConfig, ExtractionResult};

pub use associate::build_assets;
pub use generic::GenericParser;
pub use success_tech::SuccessTechParser;
pub use synnex::SynnexParser;

/// Trait for per-format document parsers.
///
/// Parsers absorb malformed input: they return a structurally valid but
/// possibly empty result rather than an error, and a specialized parser
/// never falls back to the generic one mid-stream.
pub trait FormatParser {
    /// Which format this parser handles.
    fn format(&self) -> DocumentFormat;

    /// Extract header metadata and asset records from classified text.
    fn parse(&self, text: &str, cfg: &ExtractionConfig) -> ExtractionResult;
}

/// Classify a text blob and run exactly one parser on it.
pub fn extract_document(text: &str, cfg: &ExtractionConfig) -> ExtractionResult {
    let format = detect_format(text);
    info!(format = %format, chars = text.len(), "Dispatching document");

    let result = match format {
        DocumentFormat::SuccessTech => SuccessTechParser.parse(text, cfg),
        DocumentFormat::Synnex => SynnexParser.parse(text, cfg),
        DocumentFormat::Generic => GenericParser.parse(text, cfg),
    };

    let (filled, total) = result.coverage();
    info!(
        assets = result.assets.len(),
        header_fields = filled,
        header_total = total,
        warnings = result.warnings.len(),
        "Extraction finished"
    );
    result
}

/// First capture of the first pattern that matches, trimmed.
pub(crate) fn first_capture(text: &str, patterns: &[&Regex]) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .map(|caps| caps[1].trim().to_string())
}

/// First numeric capture of the first pattern that matches.
pub(crate) fn first_quantity(text: &str, patterns: &[&Regex]) -> Option<u32> {
    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps[1].parse().ok())
}

/// Shared post-processing: breakdown, zero-serial and quantity-mismatch
/// warnings. Counted serials win over the stated total; the discrepancy
/// is surfaced for the review screen, never raised as an error.
pub(crate) fn finalize(result: &mut ExtractionResult) {
    result.rebuild_breakdown();

    if result.assets.is_empty() {
        result
            .warnings
            .push("no serial numbers found; document needs manual handling".to_string());
        return;
    }

    if let Some(stated) = result.total_quantity {
        let counted = result.assets.len() as u32;
        if counted != stated {
            result.warnings.push(format!(
                "counted {counted} serials but document states quantity {stated}; counted serials kept"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_document_generic_end_to_end() {
        let text = "PACKING LIST\n\
                    PO nr: 100010948\n\
                    Deconsolidated quantity: 3\n\
                    C02XG1FAJG5H\n\
                    C02XG1FBJG5H\n\
                    G6VXH20GQ6L4\n";
        let cfg = ExtractionConfig::default();
        let result = extract_document(text, &cfg);

        assert_eq!(result.format, DocumentFormat::Generic);
        assert_eq!(result.po_number.as_deref(), Some("100010948"));
        assert_eq!(result.total_quantity, Some(3));
        assert_eq!(result.assets.len(), 3);
    }

    #[test]
    fn test_extract_document_routes_to_success_tech() {
        let text = "SUCCESS TECH CO., LTD.\n\
                    DELIVERY ORDER\n\
                    D/O No. : DO2024110712\n";
        let cfg = ExtractionConfig::default();
        let result = extract_document(text, &cfg);
        assert_eq!(result.format, DocumentFormat::SuccessTech);
    }

    #[test]
    fn test_finalize_quantity_mismatch_warning() {
        let mut result = ExtractionResult::empty(DocumentFormat::Generic);
        result.total_quantity = Some(2);
        let (assets, _) = build_assets(
            "C02XG1FAJG5H C02XG1FBJG5H G6VXH20GQ6L4",
            &ExtractionConfig::default(),
        );
        result.assets = assets;
        finalize(&mut result);

        assert_eq!(result.assets.len(), 3);
        assert!(result.warnings.iter().any(|w| w.contains("counted 3")));
    }

    #[test]
    fn test_finalize_zero_serials_warning() {
        let mut result = ExtractionResult::empty(DocumentFormat::Generic);
        finalize(&mut result);
        assert!(result.warnings[0].contains("no serial numbers"));
    }
}
