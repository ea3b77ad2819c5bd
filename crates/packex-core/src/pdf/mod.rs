//! Text acquisition: one text blob per document, whether or not the
//! source PDF carries a text layer.

mod reader;

pub use reader::DocumentReader;

use tracing::{info, warn};

use crate::error::PdfError;
use crate::models::{AcquiredText, PageSource, PageText, PdfConfig};
use crate::ocr::OcrEngine;

/// Acquire the full text of a document.
///
/// Per page: the text layer is probed first (fast path); a page with no
/// non-whitespace text is rasterized at the configured DPI and run
/// through OCR. Page outputs are concatenated with newlines in page
/// order. OCR and render failures are logged and degrade that page to
/// an empty string; only a file that cannot be opened at all fails.
pub fn acquire_text(
    path: &std::path::Path,
    ocr: &dyn OcrEngine,
    cfg: &PdfConfig,
) -> Result<AcquiredText, PdfError> {
    let reader = DocumentReader::open(path)?;

    let mut page_numbers = reader.page_numbers();
    if cfg.max_pages > 0 && page_numbers.len() > cfg.max_pages {
        warn!(
            pages = page_numbers.len(),
            max_pages = cfg.max_pages,
            "Page limit reached, remaining pages dropped"
        );
        page_numbers.truncate(cfg.max_pages);
    }

    let mut parts: Vec<String> = Vec::with_capacity(page_numbers.len());
    let mut pages: Vec<PageText> = Vec::with_capacity(page_numbers.len());
    let mut all_text_layer = true;

    for page in page_numbers {
        // A page whose resources show a bare scan image skips the probe.
        let probed = if reader.page_is_image_only(page) {
            String::new()
        } else {
            reader.page_text(page)
        };

        let probed_chars = non_whitespace(&probed);
        if probed_chars >= cfg.min_page_text_chars {
            pages.push(PageText {
                number: page,
                source: PageSource::TextLayer,
                chars: probed_chars,
            });
            parts.push(probed);
            continue;
        }

        all_text_layer = false;
        let (source, text) = ocr_page(&reader, page, ocr, cfg);
        pages.push(PageText {
            number: page,
            source,
            chars: non_whitespace(&text),
        });
        parts.push(text);
    }

    let mut text = parts.join("\n");

    // When every page passed the probe, prefer the whole-document
    // extraction: its column and spacing handling is better than the
    // per-page decoder's.
    if all_text_layer {
        if let Some(full) = reader.full_text() {
            if non_whitespace(&full) >= non_whitespace(&text) {
                text = full;
            }
        }
    }

    info!(
        pages = pages.len(),
        ocr_pages = pages.iter().filter(|p| p.source == PageSource::Ocr).count(),
        chars = text.len(),
        "Text acquisition finished"
    );

    Ok(AcquiredText { text, pages })
}

/// Rasterize one page and run OCR on it, absorbing failures.
fn ocr_page(
    reader: &DocumentReader,
    page: u32,
    ocr: &dyn OcrEngine,
    cfg: &PdfConfig,
) -> (PageSource, String) {
    let bitmap = match reader.page_bitmap(page, cfg.render_dpi, &cfg.render_command) {
        Ok(img) => img,
        Err(e) => {
            warn!(page, error = %e, "Page rasterization failed, page contributes no text");
            return (PageSource::Empty, String::new());
        }
    };

    match ocr.recognize(&bitmap) {
        Ok(text) => (PageSource::Ocr, text),
        Err(e) => {
            warn!(page, engine = ocr.name(), error = %e, "OCR failed, page contributes no text");
            (PageSource::Empty, String::new())
        }
    }
}

fn non_whitespace(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_whitespace() {
        assert_eq!(non_whitespace("  a b\nc  "), 3);
        assert_eq!(non_whitespace(" \n\t"), 0);
    }
}
