//! # PDF Writer
//!
//! Draws a [`Document`] on A4 pages with the builtin Helvetica fonts.
//!
//! ## Page Geometry
//! ```text
//!  ┌──────────────── 210 mm ────────────────┐
//!  │  ┌── 12.7 mm margin (0.5 in) ───────┐  │
//!  │  │ cursor starts here, moves down   │  │
//!  │  │                                  │  │  297 mm
//!  │  │ block doesn't fit? ──► new page  │  │
//!  │  └──────────────────────────────────┘  │
//!  └────────────────────────────────────────┘
//! ```
//!
//! Builtin fonts carry no metrics in printpdf, so text widths are
//! estimated from an average glyph width. Good enough for wrapping and
//! centering short lines.

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use std::io::BufWriter;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::layout::{Align, Block, Document, Paragraph, Table};

const MM_PER_INCH: f32 = 25.4;
const MM_PER_PT: f32 = 0.352_778;
/// Average Helvetica glyph width, in em.
const AVG_GLYPH_EM: f32 = 0.52;
const LINE_SPACING: f32 = 1.25;
const PARAGRAPH_GAP_MM: f32 = 2.0;
const SPACER_MM: f32 = 6.0;
const CELL_PAD_MM: f32 = 1.2;
const TABLE_TEXT_SIZE: f32 = 9.0;

/// The bytes of a written PDF.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// A4 writer with uniform margins.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
}

impl Default for PdfWriter {
    fn default() -> Self {
        PdfWriter {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 0.5 * MM_PER_INCH,
        }
    }
}

impl PdfWriter {
    pub fn printable_width(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Column widths in mm: inches converted, then shrunk proportionally
    /// if the table is wider than the printable width.
    pub fn column_widths_mm(&self, table: &Table) -> Vec<f32> {
        let natural = table.width() * MM_PER_INCH;
        let scale = if natural > self.printable_width() && natural > 0.0 {
            self.printable_width() / natural
        } else {
            1.0
        };
        table
            .column_widths
            .iter()
            .map(|w| w * MM_PER_INCH * scale)
            .collect()
    }

    pub fn write(&self, document: &Document) -> RenderResult<RenderedPdf> {
        let (doc, page, layer) = PdfDocument::new(
            document.title.as_str(),
            Mm(self.page_width_mm),
            Mm(self.page_height_mm),
            "Page 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let pages = {
            let mut canvas = Canvas {
                doc: &doc,
                layer: doc.get_page(page).get_layer(layer),
                regular: &regular,
                bold: &bold,
                writer: self,
                y: self.page_height_mm - self.margin_mm,
                pages: 1,
            };
            for block in &document.blocks {
                match block {
                    Block::Paragraph(paragraph) => canvas.paragraph(paragraph),
                    Block::Table(table) => canvas.table(table),
                    Block::Rule => canvas.rule(),
                    Block::Spacer => canvas.advance(SPACER_MM),
                }
            }
            canvas.pages
        };

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        debug!(pages, bytes = bytes.len(), "PDF serialized");
        Ok(RenderedPdf { bytes, pages })
    }
}

// =============================================================================
// Text Measurement
// =============================================================================

fn line_height(size: f32) -> f32 {
    size * MM_PER_PT * LINE_SPACING
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * MM_PER_PT * AVG_GLYPH_EM
}

/// Greedy word wrap to `width` mm. Always returns at least one line.
fn wrap(text: &str, size: f32, width: f32) -> Vec<String> {
    let max_chars = ((width / (size * MM_PER_PT * AVG_GLYPH_EM)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();

        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Canvas
// =============================================================================

struct Canvas<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    writer: &'a PdfWriter,
    /// Distance of the cursor from the bottom edge, in mm.
    y: f32,
    pages: usize,
}

impl Canvas<'_> {
    fn left(&self) -> f32 {
        self.writer.margin_mm
    }

    fn right(&self) -> f32 {
        self.writer.page_width_mm - self.writer.margin_mm
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(self.writer.page_width_mm),
            Mm(self.writer.page_height_mm),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.writer.page_height_mm - self.writer.margin_mm;
    }

    /// Starts a new page when `height` mm don't fit above the bottom margin.
    fn reserve(&mut self, height: f32) -> bool {
        if self.y - height < self.writer.margin_mm {
            self.new_page();
            return true;
        }
        false
    }

    fn advance(&mut self, height: f32) {
        if !self.reserve(height) {
            self.y -= height;
        }
    }

    fn text(&self, text: &str, size: f32, bold: bool, x: f32, baseline: f32) {
        let font = if bold { self.bold } else { self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(baseline), font);
    }

    fn hline(&self, x1: f32, x2: f32, y: f32) {
        self.line((x1, y), (x2, y));
    }

    fn line(&self, from: (f32, f32), to: (f32, f32)) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from.0), Mm(from.1)), false),
                (Point::new(Mm(to.0), Mm(to.1)), false),
            ],
            is_closed: false,
        });
    }

    fn aligned_x(&self, align: Align, text: &str, size: f32, x: f32, width: f32) -> f32 {
        match align {
            Align::Left => x,
            Align::Center => x + ((width - text_width(text, size)) / 2.0).max(0.0),
            Align::Right => x + (width - text_width(text, size)).max(0.0),
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let width = self.writer.printable_width();
        for run in &paragraph.lines {
            let height = line_height(run.size);
            for line in wrap(&run.text, run.size, width) {
                self.reserve(height);
                self.y -= height;
                let x = self.aligned_x(paragraph.align, &line, run.size, self.left(), width);
                self.text(&line, run.size, run.bold, x, self.y + height * 0.2);
            }
        }
        self.y -= PARAGRAPH_GAP_MM;
    }

    fn rule(&mut self) {
        self.reserve(PARAGRAPH_GAP_MM * 2.0);
        self.y -= PARAGRAPH_GAP_MM;
        self.hline(self.left(), self.right(), self.y);
        self.y -= PARAGRAPH_GAP_MM;
    }

    fn table(&mut self, table: &Table) {
        let widths = self.writer.column_widths_mm(table);
        let total: f32 = widths.iter().sum();
        let x0 = self.left();
        let height = line_height(TABLE_TEXT_SIZE);

        self.reserve(height + 2.0 * CELL_PAD_MM);
        self.hline(x0, x0 + total, self.y);

        for row in &table.rows {
            let cells: Vec<Vec<String>> = widths
                .iter()
                .enumerate()
                .map(|(col, w)| {
                    let text = row.cells.get(col).map(String::as_str).unwrap_or("");
                    wrap(text, TABLE_TEXT_SIZE, w - 2.0 * CELL_PAD_MM)
                })
                .collect();
            let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
            let row_height = lines as f32 * height + 2.0 * CELL_PAD_MM;

            if self.reserve(row_height) {
                self.hline(x0, x0 + total, self.y);
            }
            let top = self.y;
            let bottom = top - row_height;

            let mut x = x0;
            for (col, (width, cell_lines)) in widths.iter().zip(&cells).enumerate() {
                for (i, line) in cell_lines.iter().enumerate() {
                    let baseline = top - CELL_PAD_MM - (i as f32 + 1.0) * height + height * 0.2;
                    let tx = self.aligned_x(
                        table.align_of(col),
                        line,
                        TABLE_TEXT_SIZE,
                        x + CELL_PAD_MM,
                        width - 2.0 * CELL_PAD_MM,
                    );
                    self.text(line, TABLE_TEXT_SIZE, row.bold, tx, baseline);
                }
                self.line((x, top), (x, bottom));
                x += width;
            }
            self.line((x, top), (x, bottom));
            self.hline(x0, x0 + total, bottom);
            self.y = bottom;
        }
        self.y -= PARAGRAPH_GAP_MM;
    }
}
