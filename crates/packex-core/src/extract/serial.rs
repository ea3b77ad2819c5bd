//! Serial-number scanning.
//!
//! Serials are length-bounded alphanumeric tokens with a required mix
//! of letters and digits; all-letter tokens pass only when they match
//! the whitelisted factory-code shape. Tokens matching a deny-list of
//! known non-serial shapes (order references, dimension strings, jammed
//! color/product words) are rejected. Duplicates are suppressed
//! first-wins so a token matched at multiple offsets yields one record,
//! and document order is preserved.

use std::collections::HashSet;

use super::patterns::{
    DENY_DIMENSIONS, DENY_MEASURE, DENY_ORDER_REF, DENY_TAX_REF, DENY_WORDS, FACTORY_CODE,
    SERIAL_TOKEN,
};
use crate::models::ExtractionConfig;

/// A serial-number occurrence with its byte offsets in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialMatch {
    /// The serial number. Never altered by later stages.
    pub value: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Serial-number scanner.
pub struct SerialScanner {
    min_len: usize,
    max_len: usize,
}

impl SerialScanner {
    /// Scanner with the configured length bounds.
    pub fn new(cfg: &ExtractionConfig) -> Self {
        Self {
            min_len: cfg.min_serial_len,
            max_len: cfg.max_serial_len,
        }
    }

    /// All serial occurrences in document order, first occurrence wins
    /// on duplicates.
    pub fn scan(&self, text: &str) -> Vec<SerialMatch> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut results = Vec::new();

        for m in SERIAL_TOKEN.find_iter(text) {
            let token = m.as_str();

            if token.len() < self.min_len || token.len() > self.max_len {
                continue;
            }
            if !serial_shaped(token) {
                continue;
            }
            if denied(token) {
                continue;
            }
            if !seen.insert(token.to_string()) {
                continue;
            }

            results.push(SerialMatch {
                value: token.to_string(),
                start: m.start(),
                end: m.end(),
            });
        }

        results
    }
}

impl Default for SerialScanner {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// Required letter/digit mix, with the all-letter factory-code escape.
fn serial_shaped(token: &str) -> bool {
    let has_letter = token.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = token.chars().any(|c| c.is_ascii_digit());

    if has_letter && has_digit {
        return true;
    }

    // All-letter serials exist for a handful of factory codes only.
    has_letter && FACTORY_CODE.is_match(token)
}

/// Deny-list of shapes that pass the mix check but are never serials.
fn denied(token: &str) -> bool {
    if DENY_DIMENSIONS.is_match(token)
        || DENY_ORDER_REF.is_match(token)
        || DENY_TAX_REF.is_match(token)
        || DENY_MEASURE.is_match(token)
    {
        return true;
    }

    DENY_WORDS.iter().any(|w| token.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(matches: &[SerialMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.value.as_str()).collect()
    }

    #[test]
    fn test_scan_basic_serials() {
        let scanner = SerialScanner::default();
        let text = "S/N: C02XG1FAJG5H and W1GXK2L9MNPQ shipped together";
        assert_eq!(values(&scanner.scan(text)), vec!["C02XG1FAJG5H", "W1GXK2L9MNPQ"]);
    }

    #[test]
    fn test_duplicates_first_wins() {
        let scanner = SerialScanner::default();
        let text = "S/N: C02XG1FAJG5H ... repeated later C02XG1FAJG5H";
        let matches = scanner.scan(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 5);
    }

    #[test]
    fn test_order_is_document_order() {
        let scanner = SerialScanner::default();
        let text = "W1GXK2L9MNPQ then C02XG1FAJG5H then G6VXH20GQ6L4";
        assert_eq!(
            values(&scanner.scan(text)),
            vec!["W1GXK2L9MNPQ", "C02XG1FAJG5H", "G6VXH20GQ6L4"]
        );
    }

    #[test]
    fn test_pure_digits_rejected() {
        let scanner = SerialScanner::default();
        // PO numbers and tax registrations are digit runs.
        assert!(scanner.scan("PO 1000109482 TAX 0105536041711").is_empty());
    }

    #[test]
    fn test_all_letter_needs_factory_prefix() {
        let scanner = SerialScanner::default();
        assert_eq!(values(&scanner.scan("FVFGHJKLMNPQ")), vec!["FVFGHJKLMNPQ"]);
        assert!(scanner.scan("ABCDEFGHIJKL").is_empty());
    }

    #[test]
    fn test_deny_list() {
        let scanner = SerialScanner::default();
        assert!(scanner.scan("carton 59X25X20CM").is_empty());
        assert!(scanner.scan("carton 120X100X185CM").is_empty());
        assert!(scanner.scan("ref DO2024110712").is_empty());
        assert!(scanner.scan("color SPACEGRAY14").is_empty());
    }
}
