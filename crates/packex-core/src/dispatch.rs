//! Vendor format classification.
//!
//! Each known vendor format carries a small set of case-insensitive
//! indicators. A format is selected only when at least two indicators
//! are present, which keeps incidental keyword collisions from picking
//! a specialized parser. Formats are tested in fixed priority order and
//! the first hit wins exclusively; anything else falls through to the
//! generic packing-list parser.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A classified document format. Exactly one parser runs per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Success Tech delivery orders.
    SuccessTech,
    /// Synnex delivery orders / tax invoices.
    Synnex,
    /// Generic packing list; never fails to match.
    Generic,
}

impl DocumentFormat {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::SuccessTech => "Success Tech delivery order",
            DocumentFormat::Synnex => "Synnex delivery order",
            DocumentFormat::Generic => "generic packing list",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One classification clue for a format.
enum Indicator {
    /// Case-insensitive literal phrase.
    Phrase(&'static str),
    /// Regex over the uppercased text.
    Pattern(&'static str, Regex),
}

impl Indicator {
    fn matches(&self, upper: &str) -> bool {
        match self {
            Indicator::Phrase(p) => upper.contains(p),
            Indicator::Pattern(_, re) => re.is_match(upper),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Indicator::Phrase(p) => p,
            Indicator::Pattern(label, _) => label,
        }
    }
}

/// A format must match at least this many of its indicators.
const INDICATOR_THRESHOLD: usize = 2;

struct Signature {
    format: DocumentFormat,
    indicators: Vec<Indicator>,
}

lazy_static! {
    /// Specialized formats in priority order. Generic is the fallback
    /// and carries no signature.
    static ref SIGNATURES: Vec<Signature> = vec![
        Signature {
            format: DocumentFormat::SuccessTech,
            indicators: vec![
                Indicator::Phrase("SUCCESS TECH"),
                Indicator::Phrase("DELIVERY ORDER"),
                Indicator::Pattern(
                    "DO number",
                    Regex::new(r"\bD\.?/?O\.?\s*(?:NO\.?|#)?\s*[:.]?\s*[A-Z]{0,2}\d{6,}").unwrap(),
                ),
            ],
        },
        Signature {
            format: DocumentFormat::Synnex,
            indicators: vec![
                Indicator::Phrase("SYNNEX"),
                Indicator::Phrase("DELIVERY ORDER"),
                Indicator::Phrase("TAX INVOICE"),
                Indicator::Pattern(
                    "invoice number",
                    Regex::new(r"\b(?:INV|IV|DO)[-/]?\d{6,}\b").unwrap(),
                ),
            ],
        },
    ];
}

/// Classify a text blob into a document format.
///
/// Pure function with no failure mode: unmatched input is `Generic`.
pub fn detect_format(text: &str) -> DocumentFormat {
    let upper = text.to_uppercase();

    for sig in SIGNATURES.iter() {
        let hits = sig
            .indicators
            .iter()
            .filter(|ind| ind.matches(&upper))
            .count();
        if hits >= INDICATOR_THRESHOLD {
            tracing::debug!(format = %sig.format, hits, "Format signature matched");
            return sig.format;
        }
    }

    DocumentFormat::Generic
}

/// Indicator hits per specialized format, for the `inspect` surface.
#[derive(Debug, Clone, Serialize)]
pub struct FormatScore {
    /// Format the indicators belong to.
    pub format: DocumentFormat,
    /// Labels of the indicators that matched.
    pub matched: Vec<String>,
    /// Required hit count.
    pub threshold: usize,
}

/// Evaluate every signature against the text without committing to one.
pub fn indicator_hits(text: &str) -> Vec<FormatScore> {
    let upper = text.to_uppercase();

    SIGNATURES
        .iter()
        .map(|sig| FormatScore {
            format: sig.format,
            matched: sig
                .indicators
                .iter()
                .filter(|ind| ind.matches(&upper))
                .map(|ind| ind.label().to_string())
                .collect(),
            threshold: INDICATOR_THRESHOLD,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_tech_selected_over_generic() {
        let text = "Success Tech Co., Ltd.\nDELIVERY ORDER\nD/O No. : DO2024110712\n";
        assert_eq!(detect_format(text), DocumentFormat::SuccessTech);
    }

    #[test]
    fn test_single_indicator_is_not_enough() {
        // Vendor name alone must not select the specialized parser.
        let text = "Invoice from Success Tech for services rendered.";
        assert_eq!(detect_format(text), DocumentFormat::Generic);
    }

    #[test]
    fn test_synnex_tax_invoice() {
        let text = "SYNNEX (THAILAND) PUBLIC CO., LTD.\nTAX INVOICE / DELIVERY ORDER\nIV2024-001234";
        assert_eq!(detect_format(text), DocumentFormat::Synnex);
    }

    #[test]
    fn test_priority_order_is_exclusive() {
        // Both signatures pass their thresholds; the first in priority
        // order wins and no blending happens.
        let text = "SUCCESS TECH\nDELIVERY ORDER\nSYNNEX\nTAX INVOICE\n";
        assert_eq!(detect_format(text), DocumentFormat::SuccessTech);
    }

    #[test]
    fn test_unmatched_falls_through_to_generic() {
        assert_eq!(detect_format("random unrelated text"), DocumentFormat::Generic);
        assert_eq!(detect_format(""), DocumentFormat::Generic);
    }

    #[test]
    fn test_indicator_hits_reports_partial_matches() {
        let scores = indicator_hits("DELIVERY ORDER with no vendor name");
        let st = scores
            .iter()
            .find(|s| s.format == DocumentFormat::SuccessTech)
            .unwrap();
        assert_eq!(st.matched, vec!["DELIVERY ORDER"]);
        assert!(st.matched.len() < st.threshold);
    }
}
