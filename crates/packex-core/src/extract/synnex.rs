//! Synnex delivery-order / tax-invoice parser.
//!
//! Layout: combined "TAX INVOICE / DELIVERY ORDER" header, invoice
//! number in the `IVyyyy-nnnnnn` series, customer PO, "Sold To" block,
//! then item rows carrying order codes with serial listings underneath.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{
    COMPANY_NAME, DATE_LABELED, DO_COLON, DO_NO_LABELED, PO_LABELED, QTY_TOTAL_LABELED,
    QTY_TOTAL_PCS, RECEIVER_LABELED,
};
use super::{FormatParser, build_assets, finalize, first_capture, first_quantity};
use crate::dispatch::DocumentFormat;
use crate::models::{ExtractionConfig, ExtractionResult};

lazy_static! {
    static ref INVOICE_NO: Regex = Regex::new(
        r"(?i)\b(?:TAX\s+)?INVOICE\s*(?:NO\.?|NUMBER|#)?\s*[:.]?\s*([A-Z]{0,3}\d[A-Z0-9/-]{4,17})"
    ).unwrap();

    static ref CUST_PO: Regex = Regex::new(
        r"(?i)\bCUST(?:OMER)?\.?\s+P\.?O\.?\s*(?:NO\.?|NUMBER|#)?\s*[:.]?\s*([0-9][0-9A-Z/-]{4,15})"
    ).unwrap();

    static ref INVOICE_DATE: Regex = Regex::new(
        r"(?i)\bINVOICE\s+DATE\s*[:.]?\s*(\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9},?\s+\d{4})"
    ).unwrap();
}

/// Synnex delivery-order parser.
pub struct SynnexParser;

impl FormatParser for SynnexParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Synnex
    }

    fn parse(&self, text: &str, cfg: &ExtractionConfig) -> ExtractionResult {
        let mut result = ExtractionResult::empty(DocumentFormat::Synnex);

        result.do_number = first_capture(text, &[&DO_NO_LABELED, &DO_COLON, &INVOICE_NO]);
        result.po_number = first_capture(text, &[&CUST_PO, &PO_LABELED]);
        result.ship_date = first_capture(text, &[&INVOICE_DATE, &DATE_LABELED]);
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

/// The Synnex company line from the letterhead.
fn vendor_company(text: &str) -> Option<String> {
    COMPANY_NAME
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|name| name.to_uppercase().contains("SYNNEX"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "SYNNEX (THAILAND) PUBLIC CO., LTD.\n\
                       TAX INVOICE / DELIVERY ORDER\n\
                       Invoice No. : IV2024-001234\n\
                       Invoice Date : 05/12/2024\n\
                       Cust. PO No. : 200220344\n\
                       Sold To : ACME SYSTEMS PTE LTD\n\
                       MXCR3ZP/A MacBook Air 13\" M3 8-Core CPU 8GB/256GB Midnight\n\
                       Serial: G6VXH20GQ6L4\n\
                       Total Qty : 1\n";

    #[test]
    fn test_full_invoice() {
        let result = SynnexParser.parse(DOC, &ExtractionConfig::default());

        assert_eq!(result.do_number.as_deref(), Some("IV2024-001234"));
        assert_eq!(result.po_number.as_deref(), Some("200220344"));
        assert_eq!(result.ship_date.as_deref(), Some("05/12/2024"));
        assert_eq!(result.total_quantity, Some(1));
        assert_eq!(
            result.supplier.as_deref(),
            Some("SYNNEX (THAILAND) PUBLIC CO., LTD.")
        );
        assert_eq!(result.receiver.as_deref(), Some("ACME SYSTEMS PTE LTD"));

        assert_eq!(result.assets.len(), 1);
        let asset = &result.assets[0];
        assert_eq!(asset.serial, "G6VXH20GQ6L4");
        assert_eq!(asset.model_identifier.as_deref(), Some("A3113"));
        assert_eq!(asset.name, "13\" MacBook Air");
        assert_eq!(asset.category, "Laptop");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_headers_degrade_to_none() {
        let result = SynnexParser.parse("SYNNEX\nSerial: G6VXH20GQ6L4\n", &ExtractionConfig::default());
        assert_eq!(result.do_number, None);
        assert_eq!(result.po_number, None);
        assert_eq!(result.assets.len(), 1);
    }
}
