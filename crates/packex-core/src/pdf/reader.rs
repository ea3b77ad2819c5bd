//! PDF loading, per-page text probing, and page rasterization using
//! lopdf, with pdf-extract for whole-document text.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::{DynamicImage, ImageBuffer, Rgba};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, trace, warn};

use crate::error::PdfError;

/// A loaded delivery document.
pub struct DocumentReader {
    document: Document,
    raw_data: Vec<u8>,
    path: PathBuf,
}

impl DocumentReader {
    /// Open a PDF from disk.
    ///
    /// This is the pipeline's only hard failure: a file that cannot be
    /// read or parsed cannot proceed to extraction. Encrypted files are
    /// tried with an empty password first.
    pub fn open(path: &Path) -> Result<Self, PdfError> {
        let data = std::fs::read(path).map_err(|e| PdfError::Parse(e.to_string()))?;

        let mut doc = Document::load_mem(&data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
            decrypted
        } else {
            data
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!(pages = page_count, "Loaded PDF");

        Ok(Self {
            document: doc,
            raw_data,
            path: path.to_path_buf(),
        })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Page numbers in document order (1-indexed).
    pub fn page_numbers(&self) -> Vec<u32> {
        self.document.get_pages().keys().copied().collect()
    }

    /// Text-layer content of one page; empty when the page has none or
    /// lopdf cannot decode it.
    pub fn page_text(&self, page: u32) -> String {
        match self.document.extract_text(&[page]) {
            Ok(text) => text,
            Err(e) => {
                trace!(page, error = %e, "Page text extraction failed");
                String::new()
            }
        }
    }

    /// Whole-document text via pdf-extract, used as the final text when
    /// every page passed the text-layer probe (its layout handling is
    /// better than per-page decoding).
    pub fn full_text(&self) -> Option<String> {
        match pdf_extract::extract_text_from_mem(&self.raw_data) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "pdf-extract failed on full document");
                None
            }
        }
    }

    /// Inspect a page's resources for signs that it is a bare scan: an
    /// image XObject but no Font resources means the text probe can be
    /// skipped.
    pub fn page_is_image_only(&self, page: u32) -> bool {
        let pages = self.document.get_pages();
        let Some(page_id) = pages.get(&page) else {
            return false;
        };

        let Some(resources) = self.page_resources(*page_id) else {
            return false;
        };

        let has_fonts = resources
            .get(b"Font")
            .ok()
            .and_then(|f| self.document.dereference(f).ok())
            .and_then(|(_, resolved)| resolved.as_dict().ok())
            .is_some_and(|fonts| !fonts.is_empty());

        let has_images = resources
            .get(b"XObject")
            .ok()
            .and_then(|x| self.document.dereference(x).ok())
            .and_then(|(_, resolved)| resolved.as_dict().ok())
            .is_some_and(|xobjs| !xobjs.is_empty());

        has_images && !has_fonts
    }

    /// Bitmap for a page, for OCR. The embedded scan image is the fast
    /// path (scanned delivery orders are one full-page image); rendering
    /// through the external command is the fallback.
    pub fn page_bitmap(
        &self,
        page: u32,
        dpi: u32,
        render_command: &str,
    ) -> Result<DynamicImage, PdfError> {
        if let Some(img) = self.page_embedded_image(page) {
            debug!(page, width = img.width(), height = img.height(), "Using embedded page image");
            return Ok(img);
        }

        self.render_page_with_command(page, dpi, render_command)
    }

    /// Largest image XObject on the page, decoded.
    fn page_embedded_image(&self, page: u32) -> Option<DynamicImage> {
        let pages = self.document.get_pages();
        let page_id = pages.get(&page)?;
        let resources = self.page_resources(*page_id)?;

        let xobjects = resources.get(b"XObject").ok()?;
        let (_, resolved) = self.document.dereference(xobjects).ok()?;
        let xobj_dict = resolved.as_dict().ok()?;

        let mut best: Option<DynamicImage> = None;
        for (_name, obj_ref) in xobj_dict.iter() {
            let Ok((_, obj)) = self.document.dereference(obj_ref) else {
                continue;
            };
            if let Some(img) = self.decode_image_object(obj) {
                let keep = match &best {
                    Some(current) => img.width() * img.height() > current.width() * current.height(),
                    None => true,
                };
                if keep {
                    best = Some(img);
                }
            }
        }
        best
    }

    fn decode_image_object(&self, obj: &Object) -> Option<DynamicImage> {
        let Object::Stream(stream) = obj else {
            return None;
        };
        let dict = &stream.dict;

        let subtype = dict.get(b"Subtype").ok()?;
        if subtype.as_name().ok()? != b"Image" {
            return None;
        }

        let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
        let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
        trace!(width, height, "Found image object");

        let data = match stream.decompressed_content() {
            Ok(d) => d,
            Err(_) => stream.content.clone(),
        };

        if let Ok(filter) = dict.get(b"Filter") {
            let filter_name = match filter {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) if !arr.is_empty() => {
                    arr.first().and_then(|o| o.as_name().ok())
                }
                _ => None,
            };

            match filter_name {
                Some(b"DCTDecode") => {
                    trace!("Decoding JPEG scan");
                    return image::load_from_memory_with_format(
                        &stream.content,
                        image::ImageFormat::Jpeg,
                    )
                    .ok();
                }
                Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                    trace!("Unsupported image filter, leaving to the renderer");
                    return None;
                }
                _ => {}
            }
        }

        let color_space = dict
            .get(b"ColorSpace")
            .ok()
            .and_then(|o| match o {
                Object::Name(name) => Some(name.as_slice()),
                Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
                Object::Reference(r) => self
                    .document
                    .get_object(*r)
                    .ok()
                    .and_then(|o| o.as_name().ok()),
                _ => None,
            })
            .unwrap_or(b"DeviceRGB");

        let bits = dict
            .get(b"BitsPerComponent")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(8) as u8;

        raw_image(&data, width, height, color_space, bits)
    }

    /// Resources dictionary for a page, walking up the page tree for
    /// inherited resources.
    fn page_resources(&self, page_id: ObjectId) -> Option<lopdf::Dictionary> {
        let mut node_id = page_id;
        loop {
            let node = self.document.get_object(node_id).ok()?;
            let Object::Dictionary(dict) = node else {
                return None;
            };

            if let Ok(resources) = dict.get(b"Resources") {
                if let Ok((_, Object::Dictionary(res_dict))) = self.document.dereference(resources)
                {
                    return Some(res_dict.clone());
                }
            }

            match dict.get(b"Parent") {
                Ok(Object::Reference(parent_id)) => node_id = *parent_id,
                _ => return None,
            }
        }
    }

    /// Render a page through an external `pdftoppm`-compatible command.
    fn render_page_with_command(
        &self,
        page: u32,
        dpi: u32,
        render_command: &str,
    ) -> Result<DynamicImage, PdfError> {
        let dir = tempfile::tempdir().map_err(|e| PdfError::Render {
            page,
            reason: format!("scratch dir: {e}"),
        })?;
        let prefix = dir.path().join("page");

        let output = Command::new(render_command)
            .args(["-r", &dpi.to_string()])
            .args(["-f", &page.to_string(), "-l", &page.to_string()])
            .arg("-png")
            .arg(&self.path)
            .arg(&prefix)
            .output()
            .map_err(|e| PdfError::Render {
                page,
                reason: format!("{render_command}: {e}"),
            })?;

        if !output.status.success() {
            return Err(PdfError::Render {
                page,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // pdftoppm names the file page-N.png with zero padding that
        // depends on the page count; take whatever landed in the dir.
        let rendered = std::fs::read_dir(dir.path())
            .map_err(|e| PdfError::Render {
                page,
                reason: e.to_string(),
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .find(|p| p.extension().is_some_and(|ext| ext == "png"))
            .ok_or_else(|| PdfError::Render {
                page,
                reason: "renderer produced no output".to_string(),
            })?;

        image::open(&rendered).map_err(|e| PdfError::Render {
            page,
            reason: e.to_string(),
        })
    }
}

/// Decode raw (unfiltered) image samples into a bitmap.
fn raw_image(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
    bits_per_component: u8,
) -> Option<DynamicImage> {
    if bits_per_component != 8 {
        trace!(bits_per_component, "Unsupported bits per component");
        return None;
    }

    let expected_rgb = (width * height * 3) as usize;
    let expected_gray = (width * height) as usize;

    if (color_space == b"DeviceRGB" || color_space == b"RGB") && data.len() >= expected_rgb {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for chunk in data[..expected_rgb].chunks(3) {
            rgba.extend_from_slice(chunk);
            rgba.push(255);
        }
        return ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba)
            .map(DynamicImage::ImageRgba8);
    }

    if (color_space == b"DeviceGray" || color_space == b"G") && data.len() >= expected_gray {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for &gray in &data[..expected_gray] {
            rgba.extend_from_slice(&[gray, gray, gray, 255]);
        }
        return ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba)
            .map(DynamicImage::ImageRgba8);
    }

    trace!(
        data_len = data.len(),
        expected_rgb,
        expected_gray,
        "Could not decode raw image data"
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_garbage_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-pdf.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        assert!(matches!(
            DocumentReader::open(&path),
            Err(PdfError::Parse(_))
        ));
    }

    #[test]
    fn test_open_missing_file_fails_to_parse() {
        assert!(matches!(
            DocumentReader::open(Path::new("/no/such/file.pdf")),
            Err(PdfError::Parse(_))
        ));
    }

    #[test]
    fn test_raw_image_gray() {
        let data = vec![128u8; 16];
        let img = raw_image(&data, 4, 4, b"DeviceGray", 8).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 4);
    }

    #[test]
    fn test_raw_image_rejects_short_buffer() {
        assert!(raw_image(&[0u8; 4], 4, 4, b"DeviceRGB", 8).is_none());
        assert!(raw_image(&[0u8; 16], 4, 4, b"DeviceGray", 1).is_none());
    }
}
