//! Result models for delivery-document extraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dispatch::DocumentFormat;

/// One physical unit inferred from the document.
///
/// The serial number is the only field treated as near-unique; the
/// extractor does not enforce uniqueness against any inventory store.
/// Records are immutable once built — deduplication against existing
/// inventory is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Device serial number as printed on the document.
    pub serial: String,

    /// Free-text name, e.g. `14" MacBook Pro`.
    pub name: String,

    /// Manufacturer model identifier (e.g. "A3240"), resolved from the
    /// part-number lookup table when the prefix is known.
    pub model_identifier: Option<String>,

    /// Manufacturer name.
    pub manufacturer: String,

    /// Inventory category, e.g. "Laptop".
    pub category: String,

    /// Chip/CPU description, e.g. "Apple M4 Pro".
    pub cpu_type: Option<String>,

    /// CPU core count.
    pub cpu_cores: Option<u32>,

    /// GPU core count.
    pub gpu_cores: Option<u32>,

    /// Unified memory size in GB.
    pub memory_gb: Option<u32>,

    /// Storage size in GB.
    pub storage_gb: Option<u32>,

    /// Hardware type for the intake workflow, e.g. "Computer".
    pub hardware_type: String,

    /// Condition; delivery documents describe new stock.
    pub condition: String,

    /// Free-text notes, e.g. the source order code.
    pub notes: Option<String>,
}

/// Per-description tally used by the human review screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakdownEntry {
    /// Number of units with this description.
    pub count: u32,
    /// Serial numbers counted under this description.
    pub serials: Vec<String>,
}

/// Outcome of processing one document.
///
/// Created once per document, never mutated after return, owned by the
/// caller. The asset count may legitimately exceed `total_quantity`
/// (counted serials win over a stated total; a warning records the
/// discrepancy for review).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Which parser produced this result.
    pub format: DocumentFormat,

    /// Purchase-order number.
    pub po_number: Option<String>,

    /// Shipment reference / delivery-order number.
    pub do_number: Option<String>,

    /// Ship date as printed; not normalized to a calendar type.
    pub ship_date: Option<String>,

    /// Supplier name.
    pub supplier: Option<String>,

    /// Receiver / customer name.
    pub receiver: Option<String>,

    /// Quantity the document claims to contain.
    pub total_quantity: Option<u32>,

    /// Extracted units, in document order of their serials.
    pub assets: Vec<AssetRecord>,

    /// Description → count + serials, for the review screen.
    pub breakdown: BTreeMap<String, BreakdownEntry>,

    /// Non-fatal observations (quantity mismatch, unknown part prefixes,
    /// zero serials found).
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    /// Empty result for a format; parsers fill it in.
    pub fn empty(format: DocumentFormat) -> Self {
        Self {
            format,
            po_number: None,
            do_number: None,
            ship_date: None,
            supplier: None,
            receiver: None,
            total_quantity: None,
            assets: Vec::new(),
            breakdown: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// How many header fields were successfully extracted (out of the
    /// scalar ones).
    pub fn coverage(&self) -> (usize, usize) {
        let total = 6;
        let filled = [
            self.po_number.is_some(),
            self.do_number.is_some(),
            self.ship_date.is_some(),
            self.supplier.is_some(),
            self.receiver.is_some(),
            self.total_quantity.is_some(),
        ]
        .iter()
        .filter(|&&v| v)
        .count();
        (filled, total)
    }

    /// Rebuild the description breakdown from the asset list.
    pub fn rebuild_breakdown(&mut self) {
        self.breakdown.clear();
        for asset in &self.assets {
            let entry = self.breakdown.entry(asset.name.clone()).or_default();
            entry.count += 1;
            entry.serials.push(asset.serial.clone());
        }
    }
}

/// How a page's text was obtained during acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSource {
    /// The PDF had an extractable text layer for this page.
    TextLayer,
    /// The page was rasterized and recognized with OCR.
    Ocr,
    /// Neither path produced text; the page contributed an empty string.
    Empty,
}

/// Per-page acquisition record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed).
    pub number: u32,
    /// Which path produced the text.
    pub source: PageSource,
    /// Non-whitespace characters seen by the text-layer probe or
    /// produced by OCR for this page.
    pub chars: usize,
}

/// Full text of a document plus the per-page acquisition report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquiredText {
    /// Document text in page order. Pages are concatenated with
    /// newlines; when every page has a text layer the whole-document
    /// extraction is used instead (better column handling).
    pub text: String,
    /// One record per page.
    pub pages: Vec<PageText>,
}

impl AcquiredText {
    /// Number of pages that went through OCR.
    pub fn ocr_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.source == PageSource::Ocr)
            .count()
    }
}
