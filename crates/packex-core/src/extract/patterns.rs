//! Common regex patterns for delivery-document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Serial-number shapes. Apple unit serials are 10-12 uppercase
    // alphanumeric characters; a real serial mixes letters and digits
    // except for the whitelisted all-letter factory codes below.
    pub static ref SERIAL_TOKEN: Regex = Regex::new(
        r"\b[A-Z0-9]{10,12}\b"
    ).unwrap();

    // All-letter tokens accepted as serials only with a known factory
    // prefix.
    pub static ref FACTORY_CODE: Regex = Regex::new(
        r"^(?:FVF|DMP|GQW|WQV)[A-Z]{7,9}$"
    ).unwrap();

    // Known non-serial shapes that survive the length and mix checks.
    pub static ref DENY_DIMENSIONS: Regex = Regex::new(
        r"^\d{1,4}X\d{1,4}X\d{1,4}(?:CM|MM|M)?$"
    ).unwrap();

    pub static ref DENY_ORDER_REF: Regex = Regex::new(
        r"^(?:PO|DO|SO|INV|IV|GR)\d+$"
    ).unwrap();

    pub static ref DENY_TAX_REF: Regex = Regex::new(
        r"^(?:TAX|GST|VAT|UEN)\d+$"
    ).unwrap();

    pub static ref DENY_MEASURE: Regex = Regex::new(
        r"^\d+(?:CM|MM|KG|GB|TB|PCS|CTNS)$"
    ).unwrap();

    // Apple order codes, e.g. "MW0Y3ZP/A". Capture 1 is the 5-char
    // prefix used for the model lookup.
    pub static ref PART_NUMBER: Regex = Regex::new(
        r"\b([A-Z][A-Z0-9]{4})(?:[A-Z]{1,3})?/[A-Z]\b"
    ).unwrap();

    // Header metadata labels. Cascades are ordered most-specific first;
    // the first pattern that captures wins.
    pub static ref PO_LABELED: Regex = Regex::new(
        r"(?i)\b(?:P\.?O\.?|PURCHASE\s+ORDER)\s*(?:NO\.?|NR\.?|NUMBER|#)?\s*[:.]?\s*([0-9][0-9A-Z/-]{4,15})"
    ).unwrap();

    // DO-number forms. The captured value must reach a digit within its
    // first characters so a stray "DO"/"REFERENCE" token never swallows
    // the following word.
    pub static ref DO_NO_LABELED: Regex = Regex::new(
        r"(?i)\bD\.?\s?/?\s?O\.?\s*(?:NO\.?|NUMBER|#)\s*[:.]?\s*([A-Z]{0,3}\d[A-Z0-9/-]{4,17})"
    ).unwrap();

    pub static ref DO_COLON: Regex = Regex::new(
        r"(?i)\bD/?O\s*:\s*([A-Z]{0,3}\d[A-Z0-9/-]{4,17})"
    ).unwrap();

    pub static ref DELIVERY_ORDER_LABELED: Regex = Regex::new(
        r"(?i)\bDELIVERY\s+ORDER\s*(?:NO\.?|NUMBER|#)?\s*[:.]?\s*([A-Z]{0,3}\d[A-Z0-9/-]{4,17})"
    ).unwrap();

    pub static ref SHIPMENT_REF: Regex = Regex::new(
        r"(?i)\b(?:SHIPMENT|REF(?:ERENCE)?)\s*(?:NO\.?|#)?\s*[:.]?\s*([A-Z]{0,3}\d[A-Z0-9/-]{4,17})"
    ).unwrap();

    pub static ref SHIP_DATE_LABELED: Regex = Regex::new(
        r"(?i)\b(?:SHIP(?:PING|PED)?\s+DATE|DATE\s+SHIPPED|DELIVERY\s+DATE|D\s?/?\s?O\s+DATE|INVOICE\s+DATE)\s*[:.]?\s*(\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9},?\s+\d{4}|[A-Za-z]{3,9}\s+\d{1,2},?\s+\d{4})"
    ).unwrap();

    pub static ref DATE_LABELED: Regex = Regex::new(
        r"(?i)\bDATE\s*[:.]?\s*(\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d{1,2}\s+[A-Za-z]{3,9},?\s+\d{4}|[A-Za-z]{3,9}\s+\d{1,2},?\s+\d{4})"
    ).unwrap();

    // Stated quantities. "Deconsolidated quantity" shows up on
    // forwarder packing lists, the PCS forms on vendor documents.
    pub static ref QTY_DECONSOLIDATED: Regex = Regex::new(
        r"(?i)\bDECONSOLIDATED\s+QUANTITY\s*[:.]?\s*(\d{1,5})"
    ).unwrap();

    pub static ref QTY_TOTAL_LABELED: Regex = Regex::new(
        r"(?i)\bTOTAL\s+(?:QUANTITY|QTY)\s*[:.]?\s*(\d{1,5})"
    ).unwrap();

    pub static ref QTY_TOTAL_PCS: Regex = Regex::new(
        r"(?i)\bTOTAL\s*[:.]?\s*(\d{1,5})\s*(?:PCS|PC|UNITS?|SETS?)\b"
    ).unwrap();

    pub static ref QTY_PCS_TRAILING: Regex = Regex::new(
        r"(?i)\b(\d{1,5})\s*(?:PCS|UNITS?)\s+(?:TOTAL|IN\s+TOTAL)\b"
    ).unwrap();

    // Company-like names (X PTE LTD, X CO., LTD, X PUBLIC CO., LTD...).
    pub static ref COMPANY_NAME: Regex = Regex::new(
        r"([A-Z][A-Z0-9.'&()\- ]{2,50}(?:PTE\.?\s*LTD\.?|PUBLIC\s+CO\.?,?\s*LTD\.?|CO\.?,?\s*LTD\.?|LIMITED|CORPORATION|CORP\.?|INC\.?|LLC))"
    ).unwrap();

    pub static ref RECEIVER_LABELED: Regex = Regex::new(
        r"(?i)\b(?:SHIP\s+TO|DELIVER(?:Y)?\s+TO|SOLD\s+TO|BILL\s+TO|CONSIGNEE|CUSTOMER(?:\s+NAME)?)\s*[:.]?[ \t]*\n?[ \t]*(.+)"
    ).unwrap();

    // Specification clues printed adjacent to the order code.
    pub static ref CHIP_GENERATION: Regex = Regex::new(
        r"\bM([1-4])[ -]?(PRO|MAX|ULTRA)?\b"
    ).unwrap();

    pub static ref CPU_CORES: Regex = Regex::new(
        r"(?:(\d{1,2})\s*-?\s*CORE\s*CPU|(\d{1,2})\s*C\s*CPU|CPU\s*[:.]?\s*(\d{1,2})\s*-?\s*C(?:ORE)?\b)"
    ).unwrap();

    pub static ref GPU_CORES: Regex = Regex::new(
        r"(?:(\d{1,2})\s*-?\s*CORE\s*GPU|(\d{1,2})\s*C\s*GPU|GPU\s*[:.]?\s*(\d{1,2})\s*-?\s*C(?:ORE)?\b)"
    ).unwrap();

    // RAM/storage pairs like "16GB/512GB", "48GB, 1TB".
    pub static ref MEM_STORAGE_PAIR: Regex = Regex::new(
        r"(\d{1,3})\s*GB\s*[/,+]\s*(\d{1,4})\s*(GB|TB)"
    ).unwrap();

    pub static ref MEM_LABELED: Regex = Regex::new(
        r"(?:RAM|MEMORY)\s*[:.]?\s*(\d{1,3})\s*GB"
    ).unwrap();

    pub static ref STORAGE_LABELED: Regex = Regex::new(
        r"(?:SSD|STORAGE|HDD)\s*[:.]?\s*(\d{1,4})\s*(GB|TB)"
    ).unwrap();

    pub static ref SCREEN_SIZE: Regex = Regex::new(
        r#"\b(1[1-6])(?:\.\d)?\s*(?:["”]|-?\s?INCH\b|-?\s?IN\b)"#
    ).unwrap();

    pub static ref PRODUCT_LINE: Regex = Regex::new(
        r"\b(MACBOOK\s?PRO|MACBOOK\s?AIR|MAC\s?MINI|MAC\s?STUDIO|MAC\s?PRO|IMAC|IPAD|IPHONE|APPLE\s?TV)\b"
    ).unwrap();
}

/// Tokens consisting of color/product words that otherwise pass the
/// serial shape checks (OCR tends to jam them together).
pub const DENY_WORDS: &[&str] = &[
    "SPACEGRAY",
    "SPACEGREY",
    "SPACEBLACK",
    "MIDNIGHT",
    "STARLIGHT",
    "SILVER",
    "MACBOOK",
    "DELIVERY",
    "QUANTITY",
    "WARRANTY",
    "SINGAPORE",
    "THAILAND",
    "MALAYSIA",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_number_captures_prefix() {
        let caps = PART_NUMBER.captures("1 x MW0Y3ZP/A MacBook Pro").unwrap();
        assert_eq!(&caps[1], "MW0Y3");
    }

    #[test]
    fn test_part_number_without_region_code() {
        let caps = PART_NUMBER.captures("MXCR3/A").unwrap();
        assert_eq!(&caps[1], "MXCR3");
    }

    #[test]
    fn test_po_labeled_matches_po_nr() {
        let caps = PO_LABELED.captures("PO nr: 100010948").unwrap();
        assert_eq!(&caps[1], "100010948");
    }

    #[test]
    fn test_deny_dimensions() {
        assert!(DENY_DIMENSIONS.is_match("120X100X185CM"));
        assert!(DENY_DIMENSIONS.is_match("59X25X20"));
        assert!(!DENY_DIMENSIONS.is_match("C02XG1FAJG5H"));
    }

    #[test]
    fn test_screen_size_forms() {
        assert!(SCREEN_SIZE.is_match("14\" MACBOOK PRO"));
        assert!(SCREEN_SIZE.is_match("16-INCH"));
        assert!(SCREEN_SIZE.is_match("13.6\""));
    }

    #[test]
    fn test_mem_storage_pair() {
        let caps = MEM_STORAGE_PAIR.captures("48GB/512GB").unwrap();
        assert_eq!(&caps[1], "48");
        assert_eq!(&caps[2], "512");
        assert_eq!(&caps[3], "GB");
    }
}
