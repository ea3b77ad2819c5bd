//! Success Tech delivery-order parser.
//!
//! Layout: letterhead with the vendor name, a "DELIVERY ORDER" banner,
//! D/O number and date on the right, a "Deliver To" block, then an item
//! table of order codes with descriptions followed by serial blocks.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{
    COMPANY_NAME, DATE_LABELED, DO_COLON, DO_NO_LABELED, PO_LABELED, QTY_TOTAL_LABELED,
    QTY_TOTAL_PCS, RECEIVER_LABELED, SHIP_DATE_LABELED,
};
use super::{FormatParser, build_assets, finalize, first_capture, first_quantity};
use crate::dispatch::DocumentFormat;
use crate::models::{ExtractionConfig, ExtractionResult};

lazy_static! {
    // "Your PO No." is the customer's purchase order on this template.
    static ref YOUR_PO: Regex = Regex::new(
        r"(?i)\bYOUR\s+P\.?O\.?\s*(?:NO\.?|NUMBER|#)?\s*[:.]?\s*([0-9][0-9A-Z/-]{4,15})"
    ).unwrap();

    static ref DO_DATE: Regex = Regex::new(
        r"(?i)\bD\s?/?\s?O\s+DATE\s*[:.]?\s*(\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9},?\s+\d{4})"
    ).unwrap();
}

/// Success Tech delivery-order parser.
pub struct SuccessTechParser;

impl FormatParser for SuccessTechParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::SuccessTech
    }

    fn parse(&self, text: &str, cfg: &ExtractionConfig) -> ExtractionResult {
        let mut result = ExtractionResult::empty(DocumentFormat::SuccessTech);

        result.do_number = first_capture(text, &[&DO_NO_LABELED, &DO_COLON]);
        result.po_number = first_capture(text, &[&YOUR_PO, &PO_LABELED]);
        result.ship_date = first_capture(text, &[&DO_DATE, &SHIP_DATE_LABELED, &DATE_LABELED]);
        result.total_quantity = first_quantity(text, &[&QTY_TOTAL_LABELED, &QTY_TOTAL_PCS]);

        result.supplier = vendor_company(text);
        result.receiver = first_capture(text, &[&RECEIVER_LABELED])
            .map(|line| line.chars().take(60).collect::<String>().trim().to_string());

        let (assets, warnings) = build_assets(text, cfg);
        result.assets = assets;
        result.warnings.extend(warnings);

        finalize(&mut result);
        result
    }
}

/// The vendor's registered company line from the letterhead.
fn vendor_company(text: &str) -> Option<String> {
    COMPANY_NAME
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|name| name.to_uppercase().contains("SUCCESS TECH"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "SUCCESS TECH CO., LTD.\n\
                       123 Industry Road, Bangkok\n\
                       DELIVERY ORDER\n\
                       D/O No. : DO2024110712\n\
                       D/O Date : 12/11/2024\n\
                       Your PO No. : 100010948\n\
                       Deliver To : ACME SYSTEMS PTE LTD\n\
                       Item  Description\n\
                       MW0Y3ZP/A 14\" MacBook Pro M4 10-Core CPU 10-Core GPU 16GB/512GB\n\
                       S/N: C02XG1FAJG5H\n\
                       S/N: C02XG1FBJG5H\n\
                       Total Quantity : 2\n";

    #[test]
    fn test_full_delivery_order() {
        let result = SuccessTechParser.parse(DOC, &ExtractionConfig::default());

        assert_eq!(result.do_number.as_deref(), Some("DO2024110712"));
        assert_eq!(result.po_number.as_deref(), Some("100010948"));
        assert_eq!(result.ship_date.as_deref(), Some("12/11/2024"));
        assert_eq!(result.total_quantity, Some(2));
        assert_eq!(result.supplier.as_deref(), Some("SUCCESS TECH CO., LTD."));
        assert_eq!(result.receiver.as_deref(), Some("ACME SYSTEMS PTE LTD"));

        assert_eq!(result.assets.len(), 2);
        assert_eq!(result.assets[0].serial, "C02XG1FAJG5H");
        assert_eq!(result.assets[0].model_identifier.as_deref(), Some("A3240"));
        assert_eq!(result.assets[0].cpu_cores, Some(10));
        assert_eq!(result.assets[0].memory_gb, Some(16));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_zero_serials_keeps_header() {
        // A specialized parser reports header metadata with an empty
        // asset list; it does not fall back to the generic parser.
        let text = "SUCCESS TECH CO., LTD.\nDELIVERY ORDER\nD/O No. : DO2024110799\n";
        let result = SuccessTechParser.parse(text, &ExtractionConfig::default());

        assert_eq!(result.format, DocumentFormat::SuccessTech);
        assert_eq!(result.do_number.as_deref(), Some("DO2024110799"));
        assert!(result.assets.is_empty());
        assert!(result.warnings.iter().any(|w| w.contains("no serial numbers")));
    }
}
