//! Part-number (order code) scanning.
//!
//! Vendor documents print Apple order codes such as `MW0Y3ZP/A` next
//! to the product description; the device serials follow further down.
//! Every occurrence is recorded with its byte offsets so serials can be
//! associated with the nearest preceding code.

use super::lookup::model_for_prefix;
use super::patterns::PART_NUMBER;

/// A part-number occurrence with its byte offsets in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartMatch {
    /// Full order code as printed, e.g. "MW0Y3ZP/A".
    pub code: String,
    /// The 5-character lookup prefix, e.g. "MW0Y3".
    pub prefix: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl PartMatch {
    /// Model identifier for this code, when the prefix is known.
    pub fn model_identifier(&self) -> Option<&'static str> {
        model_for_prefix(&self.prefix)
    }
}

/// All part-number occurrences in document order.
pub fn scan_part_numbers(text: &str) -> Vec<PartMatch> {
    PART_NUMBER
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let prefix = caps.get(1)?;
            Some(PartMatch {
                code: full.as_str().to_string(),
                prefix: prefix.as_str().to_string(),
                start: full.start(),
                end: full.end(),
            })
        })
        .collect()
}
