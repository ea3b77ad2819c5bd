//! Serial-to-part-number association.
//!
//! Serials and order codes are scanned independently; each serial is
//! then paired with the nearest *preceding* part-number occurrence,
//! because vendor documents print the order code and description above
//! the serial block it covers. A serial appearing before any part
//! number falls back to the first part number in the document.

use std::collections::HashSet;

use tracing::debug;

use super::lookup::model_for_prefix;
use super::partno::{PartMatch, scan_part_numbers};
use super::serial::{SerialMatch, SerialScanner};
use super::specs::{SpecClues, scan_specs};
use crate::models::{AssetRecord, ExtractionConfig};

/// Scan a document and build asset records in serial document order.
///
/// Returns the records plus non-fatal warnings (unknown part-number
/// prefixes).
pub fn build_assets(text: &str, cfg: &ExtractionConfig) -> (Vec<AssetRecord>, Vec<String>) {
    let serials = SerialScanner::new(cfg).scan(text);
    let parts = scan_part_numbers(text);

    debug!(
        serials = serials.len(),
        part_numbers = parts.len(),
        "Association scan"
    );

    let mut warnings = Vec::new();
    let mut unknown_prefixes: HashSet<String> = HashSet::new();
    let mut assets = Vec::with_capacity(serials.len());

    for serial in &serials {
        let part = nearest_preceding(&parts, serial);

        if let Some(part) = part {
            if part.model_identifier().is_none() && unknown_prefixes.insert(part.prefix.clone()) {
                warnings.push(format!(
                    "unknown part-number prefix {} (model not resolved)",
                    part.prefix
                ));
            }
        }

        assets.push(build_record(text, serial, part, cfg));
    }

    (assets, warnings)
}

/// The part number whose end position is closest to, but before, the
/// serial's start; first part in the document as a best-effort fallback.
fn nearest_preceding<'a>(parts: &'a [PartMatch], serial: &SerialMatch) -> Option<&'a PartMatch> {
    parts
        .iter()
        .filter(|p| p.end <= serial.start)
        .max_by_key(|p| p.end)
        .or_else(|| parts.first())
}

fn build_record(
    text: &str,
    serial: &SerialMatch,
    part: Option<&PartMatch>,
    cfg: &ExtractionConfig,
) -> AssetRecord {
    // Specs are printed adjacent to the order code, not the serial, so
    // the clue window follows the part-number occurrence.
    let clues = match part {
        Some(p) => scan_specs(window_after(text, p.end, cfg.spec_window_chars)),
        None => SpecClues::default(),
    };

    let name = clues
        .display_name()
        .or_else(|| part.and_then(|p| description_line(text, p)))
        .unwrap_or_else(|| "Unknown device".to_string());

    let (category, hardware_type) = classify(clues.product_line.as_deref());

    AssetRecord {
        serial: serial.value.clone(),
        name,
        model_identifier: part
            .and_then(|p| model_for_prefix(&p.prefix))
            .map(str::to_string),
        manufacturer: if part.is_some() {
            "Apple".to_string()
        } else {
            "Unknown".to_string()
        },
        category,
        cpu_type: clues.chip,
        cpu_cores: clues.cpu_cores,
        gpu_cores: clues.gpu_cores,
        memory_gb: clues.memory_gb,
        storage_gb: clues.storage_gb,
        hardware_type,
        condition: cfg.default_condition.clone(),
        notes: part.map(|p| format!("Order code {}", p.code)),
    }
}

/// Window of text following a byte offset, clamped to a char boundary.
fn window_after(text: &str, from: usize, len: usize) -> &str {
    let mut end = (from + len).min(text.len());
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    &text[from..end]
}

/// The rest of the line the part number sits on, as a name fallback.
fn description_line(text: &str, part: &PartMatch) -> Option<String> {
    let line_start = text[..part.start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[part.start..]
        .find('\n')
        .map_or(text.len(), |i| part.start + i);

    let stripped = text[line_start..line_end]
        .replace(&part.code, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let alpha = stripped.chars().filter(|c| c.is_alphabetic()).count();
    if alpha >= 3 {
        Some(stripped.chars().take(60).collect())
    } else {
        None
    }
}

fn classify(product_line: Option<&str>) -> (String, String) {
    let (category, hardware_type) = match product_line {
        Some("MacBook Pro") | Some("MacBook Air") => ("Laptop", "Computer"),
        Some("Mac mini") | Some("Mac Studio") | Some("Mac Pro") | Some("iMac") => {
            ("Desktop", "Computer")
        }
        Some("iPad") => ("Tablet", "Mobile Device"),
        Some("iPhone") => ("Phone", "Mobile Device"),
        _ => ("Unknown", "Computer"),
    };
    (category.to_string(), hardware_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cfg() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    #[test]
    fn test_serials_pair_with_nearest_preceding_part() {
        let text = "MW0Y3ZP/A 14\" MacBook Pro M4 16GB/512GB\n\
                    S/N C02XG1FAJG5H\n\
                    S/N C02XG1FBJG5H\n\
                    MXCR3ZP/A MacBook Air 13\" M3 8GB/256GB\n\
                    S/N G6VXH20GQ6L4\n";
        let (assets, warnings) = build_assets(text, &cfg());

        assert!(warnings.is_empty());
        assert_eq!(assets.len(), 3);
        assert_eq!(assets[0].model_identifier.as_deref(), Some("A3240"));
        assert_eq!(assets[1].model_identifier.as_deref(), Some("A3240"));
        assert_eq!(assets[2].model_identifier.as_deref(), Some("A3113"));
        assert_eq!(assets[0].name, "14\" MacBook Pro");
        assert_eq!(assets[2].name, "13\" MacBook Air");
    }

    #[test]
    fn test_serial_before_any_part_uses_first_part() {
        let text = "S/N C02XG1FAJG5H appears first\n\
                    MW0Y3ZP/A 14\" MacBook Pro\n\
                    S/N C02XG1FBJG5H\n";
        let (assets, _) = build_assets(text, &cfg());

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].model_identifier.as_deref(), Some("A3240"));
        assert_eq!(assets[1].model_identifier.as_deref(), Some("A3240"));
    }

    #[test]
    fn test_no_parts_at_all() {
        let text = "C02XG1FAJG5H\nC02XG1FBJG5H\n";
        let (assets, warnings) = build_assets(text, &cfg());

        assert_eq!(assets.len(), 2);
        assert!(warnings.is_empty());
        assert_eq!(assets[0].model_identifier, None);
        assert_eq!(assets[0].name, "Unknown device");
        assert_eq!(assets[0].condition, "New");
    }

    #[test]
    fn test_unknown_prefix_warns_once() {
        let text = "QQQQ1ZP/A widget\nC02XG1FAJG5H\nC02XG1FBJG5H\n";
        let (assets, warnings) = build_assets(text, &cfg());

        assert_eq!(assets.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("QQQQ1"));
    }

    #[test]
    fn test_specs_come_from_part_window_not_serial_window() {
        // The spec text sits between the part number and the serials;
        // text after the serial must not override it.
        let text = "MX2H3ZP/A MacBook Pro 14\" M4 Pro 12-Core CPU 24GB/1TB\n\
                    C02XG1FAJG5H 96GB/8TB bogus trailing row\n";
        let (assets, _) = build_assets(text, &cfg());

        assert_eq!(assets[0].memory_gb, Some(24));
        assert_eq!(assets[0].storage_gb, Some(1024));
        assert_eq!(assets[0].cpu_cores, Some(12));
    }
}
