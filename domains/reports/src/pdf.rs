//! PDF rendering
//!
//! Writes laid-out pages with the built-in Helvetica faces, so no font files
//! are needed at runtime. The built-in faces use WinAnsi encoding: only Latin
//! text renders. Sinhala or Tamil names come out as unmapped glyphs.

use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::layout::{Page, PageGeometry};
use crate::ReportError;

/// Render pages to PDF bytes
pub fn render_pdf(
    title: &str,
    pages: &[Page],
    geometry: &PageGeometry,
) -> Result<Vec<u8>, ReportError> {
    let width = Mm(geometry.width_mm);
    let height = Mm(geometry.height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Page 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(format!("Failed to load Helvetica: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(format!("Failed to load Helvetica-Bold: {}", e)))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, format!("Page {}", page.number))
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for run in &page.runs {
            let font: &IndirectFontRef = if run.bold { &bold } else { &regular };
            layer.use_text(
                run.text.clone(),
                run.size_pt,
                Mm(run.x_mm),
                Mm(run.y_mm),
                font,
            );
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ReportError::Render(format!("Failed to serialize PDF: {}", e)))?;

    tracing::debug!(pages = pages.len(), bytes = bytes.len(), "PDF rendered");
    Ok(bytes)
}

/// Write rendered bytes to `path`, creating parent directories as needed
pub fn save_pdf(bytes: &[u8], path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Report saved");
    Ok(())
}
