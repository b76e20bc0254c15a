//! # Layout Model
//!
//! Backend-independent description of a rendered document.
//!
//! ```text
//! Document
//! ├── Block::Paragraph ── lines: [TextRun { text, bold, size }], align
//! ├── Block::Rule
//! ├── Block::Table ────── column widths (inches), column alignment
//! │                       rows: [TableRow { cells, bold }]
//! └── Block::Spacer
//! ```
//!
//! The renderer builds this tree; [`crate::pdf::PdfWriter`] draws it.
//! Tests inspect the tree instead of parsing PDF bytes.

use serde::Serialize;

/// Default body text size in points.
pub const BODY_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One line of text with uniform style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub size: f32,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            bold: false,
            size: BODY_SIZE,
        }
    }

    pub fn bold(text: impl Into<String>, size: f32) -> Self {
        TextRun {
            text: text.into(),
            bold: true,
            size,
        }
    }
}

/// Lines stacked vertically, each wrapped to the printable width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub lines: Vec<TextRun>,
    pub align: Align,
}

impl Paragraph {
    pub fn new(lines: Vec<TextRun>) -> Self {
        Paragraph {
            lines,
            align: Align::Left,
        }
    }

    pub fn centered(lines: Vec<TextRun>) -> Self {
        Paragraph {
            lines,
            align: Align::Center,
        }
    }

    /// Paragraph of plain lines.
    pub fn plain<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Paragraph::new(lines.into_iter().map(TextRun::plain).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub bold: bool,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        TableRow { cells, bold: false }
    }

    pub fn bold(cells: Vec<String>) -> Self {
        TableRow { cells, bold: true }
    }
}

/// Grid table with fixed column widths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Column widths in inches, before any scaling to the page.
    pub column_widths: Vec<f32>,
    pub column_align: Vec<Align>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(column_widths: Vec<f32>, column_align: Vec<Align>) -> Self {
        Table {
            column_widths,
            column_align,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn align_of(&self, column: usize) -> Align {
        self.column_align.get(column).copied().unwrap_or(Align::Left)
    }

    /// Total width in inches.
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    /// Horizontal separator across the printable width.
    Rule,
    /// Blank vertical space.
    Spacer,
}

/// A laid-out document, ready for a backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Metadata title of the output file.
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Document {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        })
    }

    /// Plain-text dump: one line per text run or table row
    /// (cells joined with " | ").
    pub fn text(&self) -> String {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(paragraph) => {
                    out.extend(paragraph.lines.iter().map(|run| run.text.clone()));
                }
                Block::Table(table) => {
                    out.extend(table.rows.iter().map(|row| row.cells.join(" | ")));
                }
                Block::Rule => out.push("-".repeat(40)),
                Block::Spacer => out.push(String::new()),
            }
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_dump() {
        let mut doc = Document::new("t");
        doc.push(Block::Paragraph(Paragraph::plain(["Ligne 1", "Ligne 2"])));
        let mut table = Table::new(vec![3.0, 2.0], vec![Align::Left, Align::Right]);
        table.push(TableRow::new(vec!["TOTAL HT".to_string(), "525,00".to_string()]));
        doc.push(Block::Table(table));

        assert_eq!(doc.text(), "Ligne 1\nLigne 2\nTOTAL HT | 525,00");
        assert_eq!(doc.tables().count(), 1);
        assert_eq!(doc.tables().next().map(Table::width), Some(5.0));
    }

    #[test]
    fn test_align_defaults_to_left() {
        let table = Table::new(vec![1.0, 1.0], vec![Align::Right]);
        assert_eq!(table.align_of(0), Align::Right);
        assert_eq!(table.align_of(1), Align::Left);
    }
}
