//! Generic packing-list parser.
//!
//! The unconditional fallback: it never fails to match and returns a
//! result even when nothing usable is found. Labels cover the common
//! forwarder and vendor phrasings rather than any one template.

use super::patterns::{
    COMPANY_NAME, DATE_LABELED, DELIVERY_ORDER_LABELED, DO_COLON, DO_NO_LABELED, PO_LABELED,
    QTY_DECONSOLIDATED, QTY_PCS_TRAILING, QTY_TOTAL_LABELED, QTY_TOTAL_PCS, RECEIVER_LABELED,
    SHIPMENT_REF, SHIP_DATE_LABELED,
};
use super::{FormatParser, build_assets, finalize, first_capture, first_quantity};
use crate::dispatch::DocumentFormat;
use crate::models::{ExtractionConfig, ExtractionResult};

/// Generic packing-list parser.
pub struct GenericParser;

impl FormatParser for GenericParser {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Generic
    }

    fn parse(&self, text: &str, cfg: &ExtractionConfig) -> ExtractionResult {
        let mut result = ExtractionResult::empty(DocumentFormat::Generic);

        result.po_number = first_capture(text, &[&PO_LABELED]);
        result.do_number = first_capture(
            text,
            &[&DO_NO_LABELED, &DO_COLON, &DELIVERY_ORDER_LABELED, &SHIPMENT_REF],
        );
        result.ship_date = first_capture(text, &[&SHIP_DATE_LABELED, &DATE_LABELED]);
        result.total_quantity = first_quantity(
            text,
            &[
                &QTY_DECONSOLIDATED,
                &QTY_TOTAL_LABELED,
                &QTY_TOTAL_PCS,
                &QTY_PCS_TRAILING,
            ],
        );

        result.receiver = extract_receiver(text);
        result.supplier = extract_supplier(text, result.receiver.as_deref());

        let (assets, warnings) = build_assets(text, cfg);
        result.assets = assets;
        result.warnings.extend(warnings);

        finalize(&mut result);
        result
    }
}

/// Receiver from a labeled block; prefer a company-shaped name on the
/// captured line.
fn extract_receiver(text: &str) -> Option<String> {
    let line = first_capture(text, &[&RECEIVER_LABELED])?;
    match COMPANY_NAME.captures(&line) {
        Some(caps) => Some(caps[1].trim().to_string()),
        None => Some(line.chars().take(60).collect::<String>().trim().to_string()),
    }
}

/// Supplier: the first company-shaped name that is not the receiver.
fn extract_supplier(text: &str, receiver: Option<&str>) -> Option<String> {
    let receiver_upper = receiver.map(str::to_uppercase);

    for caps in COMPANY_NAME.captures_iter(text) {
        let company = caps[1].trim().to_string();
        match &receiver_upper {
            Some(r) if company.to_uppercase().contains(r.as_str()) || r.contains(&company.to_uppercase()) => {
                continue;
            }
            _ => return Some(company),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> ExtractionResult {
        GenericParser.parse(text, &ExtractionConfig::default())
    }

    #[test]
    fn test_forwarder_packing_list() {
        let text = "DECONSOLIDATION PACKING LIST\n\
                    PO nr: 100010948\n\
                    Shipment no.: SH2024-0042\n\
                    Shipped date: 12/11/2024\n\
                    Deconsolidated quantity: 3\n\
                    MW0Y3ZP/A 14\" MacBook Pro M4 16GB/512GB\n\
                    C02XG1FAJG5H\n\
                    C02XG1FBJG5H\n\
                    C02XG1FCJG5H\n";
        let result = parse(text);

        assert_eq!(result.po_number.as_deref(), Some("100010948"));
        assert_eq!(result.ship_date.as_deref(), Some("12/11/2024"));
        assert_eq!(result.total_quantity, Some(3));
        assert_eq!(result.assets.len(), 3);
        assert!(result.warnings.is_empty());
        assert_eq!(result.breakdown["14\" MacBook Pro"].count, 3);
    }

    #[test]
    fn test_supplier_and_receiver_companies() {
        let text = "SOFT SOURCE PTE LTD\n\
                    Deliver To: MAXWELL TRADING CO., LTD\n\
                    Total Qty: 1\n\
                    C02XG1FAJG5H\n";
        let result = parse(text);

        assert_eq!(result.receiver.as_deref(), Some("MAXWELL TRADING CO., LTD"));
        assert_eq!(result.supplier.as_deref(), Some("SOFT SOURCE PTE LTD"));
    }

    #[test]
    fn test_empty_text_yields_empty_result() {
        let result = parse("");
        assert_eq!(result.assets.len(), 0);
        assert_eq!(result.po_number, None);
        assert!(result.warnings.iter().any(|w| w.contains("no serial numbers")));
    }

    #[test]
    fn test_total_pcs_fallback() {
        let result = parse("TOTAL: 12 PCS\nC02XG1FAJG5H\n");
        assert_eq!(result.total_quantity, Some(12));
        // 1 counted vs 12 stated: counted wins, warning recorded.
        assert_eq!(result.assets.len(), 1);
        assert!(result.warnings.iter().any(|w| w.contains("counted 1")));
    }
}
