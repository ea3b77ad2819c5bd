//! Free-text specification clues.
//!
//! Descriptive specs (chip generation, core counts, RAM/storage pair,
//! screen size) are printed adjacent to the order code, not the serial,
//! so callers hand this module the text window following a part-number
//! occurrence.

use tracing::debug;

use super::lookup::min_storage_for_memory;
use super::patterns::{
    CHIP_GENERATION, CPU_CORES, GPU_CORES, MEM_LABELED, MEM_STORAGE_PAIR, PRODUCT_LINE,
    SCREEN_SIZE, STORAGE_LABELED,
};

/// Specification clues recovered from a description window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecClues {
    /// Chip description, e.g. "Apple M4 Pro".
    pub chip: Option<String>,
    /// CPU core count.
    pub cpu_cores: Option<u32>,
    /// GPU core count.
    pub gpu_cores: Option<u32>,
    /// Unified memory in GB.
    pub memory_gb: Option<u32>,
    /// Storage in GB.
    pub storage_gb: Option<u32>,
    /// Screen size in inches.
    pub screen_inches: Option<u32>,
    /// Product line, e.g. "MacBook Pro".
    pub product_line: Option<String>,
}

impl SpecClues {
    /// Display name in the intake convention, e.g. `14" MacBook Pro`.
    pub fn display_name(&self) -> Option<String> {
        match (&self.product_line, self.screen_inches) {
            (Some(product), Some(inches)) => Some(format!("{inches}\" {product}")),
            (Some(product), None) => Some(product.clone()),
            _ => None,
        }
    }
}

/// Scan a description window for specification clues.
pub fn scan_specs(window: &str) -> SpecClues {
    let upper = window.to_uppercase();
    let mut clues = SpecClues::default();

    if let Some(caps) = CHIP_GENERATION.captures(&upper) {
        let mut chip = format!("Apple M{}", &caps[1]);
        if let Some(tier) = caps.get(2) {
            chip.push(' ');
            chip.push_str(&title_case(tier.as_str()));
        }
        clues.chip = Some(chip);
    }

    clues.cpu_cores = first_numeric_group(&CPU_CORES.captures(&upper));
    clues.gpu_cores = first_numeric_group(&GPU_CORES.captures(&upper));

    if let Some(caps) = MEM_STORAGE_PAIR.captures(&upper) {
        clues.memory_gb = caps[1].parse().ok();
        clues.storage_gb = parse_storage(&caps[2], &caps[3]);
    } else {
        if let Some(caps) = MEM_LABELED.captures(&upper) {
            clues.memory_gb = caps[1].parse().ok();
        }
        if let Some(caps) = STORAGE_LABELED.captures(&upper) {
            clues.storage_gb = parse_storage(&caps[1], &caps[2]);
        }
    }

    if let Some(caps) = SCREEN_SIZE.captures(&upper) {
        clues.screen_inches = caps[1].parse().ok();
    }

    if let Some(caps) = PRODUCT_LINE.captures(&upper) {
        clues.product_line = Some(canonical_product(&caps[1]));
    }

    correct_storage(&mut clues);
    clues
}

/// Numeric sanity correction for RAM/storage pairs: a storage value
/// smaller than memory is physically implausible for this product line,
/// so the pair is assumed OCR-reversed or corrupted and storage is
/// re-derived from the valid configuration table for that memory size.
fn correct_storage(clues: &mut SpecClues) {
    let (Some(mem), Some(storage)) = (clues.memory_gb, clues.storage_gb) else {
        return;
    };
    if storage >= mem {
        return;
    }

    match min_storage_for_memory(mem) {
        Some(corrected) => {
            debug!(
                memory_gb = mem,
                raw_storage_gb = storage,
                corrected_storage_gb = corrected,
                "Implausible storage/memory pair corrected"
            );
            clues.storage_gb = Some(corrected);
        }
        None => {
            debug!(
                memory_gb = mem,
                raw_storage_gb = storage,
                "Implausible storage with unknown memory size, dropping storage"
            );
            clues.storage_gb = None;
        }
    }
}

fn parse_storage(value: &str, unit: &str) -> Option<u32> {
    let n: u32 = value.parse().ok()?;
    Some(if unit == "TB" { n * 1024 } else { n })
}

/// Regex alternations put the count in different capture groups; take
/// whichever one matched.
fn first_numeric_group(caps: &Option<regex::Captures<'_>>) -> Option<u32> {
    let caps = caps.as_ref()?;
    (1..caps.len())
        .filter_map(|i| caps.get(i))
        .find_map(|m| m.as_str().parse().ok())
}

fn canonical_product(raw: &str) -> String {
    let squashed: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    match squashed.as_str() {
        "MACBOOKPRO" => "MacBook Pro",
        "MACBOOKAIR" => "MacBook Air",
        "MACMINI" => "Mac mini",
        "MACSTUDIO" => "Mac Studio",
        "MACPRO" => "Mac Pro",
        "IMAC" => "iMac",
        "IPAD" => "iPad",
        "IPHONE" => "iPhone",
        "APPLETV" => "Apple TV",
        _ => return raw.to_string(),
    }
    .to_string()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_description() {
        let clues = scan_specs("14\" MacBook Pro M4 Pro 12-Core CPU 16-Core GPU 24GB/1TB Space Black");
        assert_eq!(clues.chip.as_deref(), Some("Apple M4 Pro"));
        assert_eq!(clues.cpu_cores, Some(12));
        assert_eq!(clues.gpu_cores, Some(16));
        assert_eq!(clues.memory_gb, Some(24));
        assert_eq!(clues.storage_gb, Some(1024));
        assert_eq!(clues.screen_inches, Some(14));
        assert_eq!(clues.display_name().as_deref(), Some("14\" MacBook Pro"));
    }

    #[test]
    fn test_labeled_ram_and_ssd() {
        let clues = scan_specs("MacBook Air RAM: 16GB SSD: 512GB");
        assert_eq!(clues.memory_gb, Some(16));
        assert_eq!(clues.storage_gb, Some(512));
    }

    #[test]
    fn test_storage_below_memory_is_rederived() {
        // OCR read "512GB" as "12GB"; the table says 48GB memory never
        // ships with less than 512GB storage.
        let clues = scan_specs("M4 Max 48GB/12GB");
        assert_eq!(clues.memory_gb, Some(48));
        assert!(clues.storage_gb.unwrap() >= 48);
        assert_eq!(clues.storage_gb, Some(512));
    }

    #[test]
    fn test_unknown_memory_size_drops_storage() {
        let clues = scan_specs("12GB/8GB");
        assert_eq!(clues.memory_gb, Some(12));
        assert_eq!(clues.storage_gb, None);
    }

    #[test]
    fn test_compact_core_notation() {
        let clues = scan_specs("M4 10C CPU 10C GPU 16GB/512GB");
        assert_eq!(clues.cpu_cores, Some(10));
        assert_eq!(clues.gpu_cores, Some(10));
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(scan_specs(""), SpecClues::default());
    }
}
