//! Page layout
//!
//! Places a `ReportDocument` onto fixed-size pages as positioned text runs.
//! Coordinates are millimetres from the bottom-left corner, as PDF expects.
//! A table continued onto a new page repeats its header row.

use serde::Serialize;

use crate::document::{Block, ReportDocument, Table};

/// Helvetica averages roughly half an em per glyph
const AVERAGE_GLYPH_EM: f32 = 0.5;
const MM_PER_PT: f32 = 0.3528;

const TITLE_PT: f32 = 18.0;
const SUBTITLE_PT: f32 = 11.0;
const HEADING_PT: f32 = 13.0;
const BODY_PT: f32 = 9.0;
const FOOTER_PT: f32 = 8.0;

const TITLE_LINE_MM: f32 = 10.0;
const SUBTITLE_LINE_MM: f32 = 6.0;
const HEADING_LINE_MM: f32 = 8.0;
const ROW_LINE_MM: f32 = 5.5;
const SECTION_GAP_MM: f32 = 6.0;
const BLOCK_GAP_MM: f32 = 3.0;
const FOOTER_SPACE_MM: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 15.0,
    };

    fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    fn top(&self) -> f32 {
        self.height_mm - self.margin_mm
    }

    /// Lowest baseline body text may use; below it is the footer
    fn bottom(&self) -> f32 {
        self.margin_mm + FOOTER_SPACE_MM
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub number: usize,
    pub runs: Vec<TextRun>,
}

struct Cursor<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<Page>,
    y: f32,
}

impl<'g> Cursor<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page {
                number: 1,
                runs: Vec::new(),
            }],
            y: geometry.top(),
        }
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= self.geometry.bottom()
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            runs: Vec::new(),
        });
        self.y = self.geometry.top();
    }

    /// Start a new page unless `height` still fits on this one
    fn reserve(&mut self, height: f32) -> bool {
        if self.fits(height) {
            false
        } else {
            self.new_page();
            true
        }
    }

    fn at_top(&self) -> bool {
        self.y >= self.geometry.top()
    }

    fn put(&mut self, text: &str, x_mm: f32, size_pt: f32, bold: bool) {
        let run = TextRun {
            text: text.to_string(),
            x_mm,
            y_mm: self.y,
            size_pt,
            bold,
        };
        if let Some(page) = self.pages.last_mut() {
            page.runs.push(run);
        }
    }

    fn line(&mut self, text: &str, size_pt: f32, bold: bool, height: f32) {
        self.reserve(height);
        self.y -= height;
        let x = self.geometry.margin_mm;
        let fitted = fit_to_width(text, self.geometry.content_width(), size_pt);
        self.put(&fitted, x, size_pt, bold);
    }

    fn gap(&mut self, height: f32) {
        if !self.at_top() {
            self.y -= height;
        }
    }

    fn table_row(&mut self, cells: &[String], bold: bool) {
        self.y -= ROW_LINE_MM;
        let column_width = self.geometry.content_width() / cells.len().max(1) as f32;
        for (i, cell) in cells.iter().enumerate() {
            let x = self.geometry.margin_mm + i as f32 * column_width;
            let fitted = fit_to_width(cell, column_width - 2.0, BODY_PT);
            self.put(&fitted, x, BODY_PT, bold);
        }
    }

    fn table(&mut self, table: &Table) {
        // keep the header with at least one data row
        self.reserve(2.0 * ROW_LINE_MM);
        self.table_row(&table.headers, true);
        for row in &table.rows {
            if self.reserve(ROW_LINE_MM) {
                self.table_row(&table.headers, true);
            }
            self.table_row(row, false);
        }
    }

    fn finish(mut self) -> Vec<Page> {
        let total = self.pages.len();
        let x = self.geometry.width_mm - self.geometry.margin_mm - 25.0;
        let y = self.geometry.margin_mm;
        for page in &mut self.pages {
            page.runs.push(TextRun {
                text: format!("Page {} of {}", page.number, total),
                x_mm: x,
                y_mm: y,
                size_pt: FOOTER_PT,
                bold: false,
            });
        }
        self.pages
    }
}

/// Lay the document out on pages. Always yields at least one page.
pub fn paginate(document: &ReportDocument, geometry: &PageGeometry) -> Vec<Page> {
    let mut cursor = Cursor::new(geometry);

    cursor.line(&document.title, TITLE_PT, true, TITLE_LINE_MM);
    cursor.line(
        &format!("Report period: {}", document.period_label),
        SUBTITLE_PT,
        false,
        SUBTITLE_LINE_MM,
    );
    cursor.line(
        &format!("Generated: {}", document.generated_at),
        SUBTITLE_PT,
        false,
        SUBTITLE_LINE_MM,
    );

    for section in &document.sections {
        cursor.gap(SECTION_GAP_MM);
        // a heading never ends a page on its own
        cursor.reserve(HEADING_LINE_MM + 2.0 * ROW_LINE_MM);
        cursor.line(&section.heading, HEADING_PT, true, HEADING_LINE_MM);

        for block in &section.blocks {
            cursor.gap(BLOCK_GAP_MM);
            match block {
                Block::Table(table) => cursor.table(table),
                Block::Note { text } => cursor.line(text, BODY_PT, false, ROW_LINE_MM),
            }
        }
    }

    let pages = cursor.finish();
    tracing::debug!(pages = pages.len(), "Report laid out");
    pages
}

/// Truncate `text` with "..." so it fits `width_mm` at `size_pt`
fn fit_to_width(text: &str, width_mm: f32, size_pt: f32) -> String {
    let glyph_mm = size_pt * AVERAGE_GLYPH_EM * MM_PER_PT;
    let max_chars = (width_mm / glyph_mm).floor().max(4.0) as usize;

    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", kept.trim_end())
}
