//! Static lookup tables shared by the per-format parsers.

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    /// Apple order-code prefix (first 5 characters) → model identifier.
    ///
    /// Read-only process-wide table. Some keys are deliberate duplicates
    /// for OCR misreads observed in scanned documents (0↔O confusion,
    /// character transpositions); both spellings resolve to the same
    /// model so the lookup is invariant to those confusions.
    pub static ref PART_MODELS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();

        // MacBook Pro 14" (M4)
        m.insert("MW0Y3", "A3240");
        m.insert("MWOY3", "A3240"); // OCR: 0 read as O
        m.insert("MW2U3", "A3240");
        m.insert("MW2W3", "A3240");
        m.insert("MW2X3", "A3240");

        // MacBook Pro 14" (M4 Pro / M4 Max)
        m.insert("MX2H3", "A3241");
        m.insert("MX2J3", "A3241");
        m.insert("MX2K3", "A3241");
        m.insert("MX2HE", "A3241"); // OCR: 3 read as E

        // MacBook Pro 16" (M4 Pro / M4 Max)
        m.insert("MX2T3", "A3186");
        m.insert("MX2V3", "A3186");
        m.insert("MX2Y3", "A3186");
        m.insert("MX2T8", "A3186"); // OCR: 3 read as 8

        // MacBook Air 13" (M3)
        m.insert("MW0W3", "A3113");
        m.insert("MWOW3", "A3113"); // OCR: 0 read as O
        m.insert("MXCR3", "A3113");
        m.insert("MXCV3", "A3113");
        m.insert("MRXV3", "A3113");
        m.insert("MXRV3", "A3113"); // OCR: transposed RX

        // MacBook Air 15" (M3)
        m.insert("MXD13", "A3114");
        m.insert("MXD23", "A3114");
        m.insert("MRYM3", "A3114");
        m.insert("MRYN3", "A3114");

        // MacBook Pro 14" (M3)
        m.insert("MTL73", "A2918");
        m.insert("MTL83", "A2918");
        m.insert("MTLC3", "A2918");

        // MacBook Pro 14" (M3 Pro)
        m.insert("MRX33", "A2992");
        m.insert("MRX43", "A2992");
        m.insert("MRX63", "A2992");

        // MacBook Pro 16" (M3 Pro / M3 Max)
        m.insert("MRW13", "A2991");
        m.insert("MRW23", "A2991");
        m.insert("MRW33", "A2991");

        // Mac mini (M4)
        m.insert("MU9D3", "A3238");
        m.insert("MU9E3", "A3238");
        m.insert("MCX44", "A3238");

        // Mac Studio (M4 Max)
        m.insert("MU973", "A3281");
        m.insert("MU963", "A3281");

        // iMac 24" (M4)
        m.insert("MWUC3", "A3266");
        m.insert("MWUE3", "A3266");
        m.insert("MWUF3", "A3266");

        m
    };
}

/// Resolve an order-code prefix to a model identifier.
pub fn model_for_prefix(prefix: &str) -> Option<&'static str> {
    PART_MODELS.get(prefix).copied()
}

/// Valid storage configurations per unified-memory size, smallest
/// first. Used to re-derive an OCR-corrupted storage value: the modeled
/// product line never ships with storage smaller than memory.
pub const VALID_STORAGE_GB: &[(u32, &[u32])] = &[
    (8, &[256, 512, 1024, 2048]),
    (16, &[256, 512, 1024, 2048]),
    (18, &[512, 1024, 2048]),
    (24, &[512, 1024, 2048]),
    (32, &[512, 1024, 2048]),
    (36, &[512, 1024, 2048, 4096]),
    (48, &[512, 1024, 2048, 4096]),
    (64, &[1024, 2048, 4096, 8192]),
    (96, &[1024, 2048, 4096, 8192]),
    (128, &[2048, 4096, 8192]),
];

/// Smallest valid storage size for a memory size, if the memory size is
/// a known configuration.
pub fn min_storage_for_memory(memory_gb: u32) -> Option<u32> {
    VALID_STORAGE_GB
        .iter()
        .find(|(mem, _)| *mem == memory_gb)
        .and_then(|(_, sizes)| sizes.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_prefix() {
        assert_eq!(model_for_prefix("MW0Y3"), Some("A3240"));
        assert_eq!(model_for_prefix("MU9D3"), Some("A3238"));
    }

    #[test]
    fn test_ocr_variants_resolve_identically() {
        assert_eq!(model_for_prefix("MW0W3"), model_for_prefix("MWOW3"));
        assert_eq!(model_for_prefix("MW0Y3"), model_for_prefix("MWOY3"));
        assert_eq!(model_for_prefix("MRXV3"), model_for_prefix("MXRV3"));
    }

    #[test]
    fn test_unknown_prefix() {
        assert_eq!(model_for_prefix("ZZZZZ"), None);
    }

    #[test]
    fn test_min_storage_never_below_memory() {
        for (mem, sizes) in VALID_STORAGE_GB {
            assert!(sizes.first().copied().unwrap() >= *mem);
        }
        assert_eq!(min_storage_for_memory(48), Some(512));
        assert_eq!(min_storage_for_memory(7), None);
    }
}
