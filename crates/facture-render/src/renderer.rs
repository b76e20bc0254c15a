//! # Document Renderer
//!
//! Turns a resolved request and its summary into a [`Document`].
//!
//! ## Layout (top to bottom)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ 1. Letterhead: name, contact, bank, ─────── rule, legal numbers         │
//! │ 2. Title: "FACTURE FA24/03/1405" (centered, bold)                       │
//! │ 3. Client: payment method, name, address, IF / AI / RC                  │
//! │ 4. Items: N° │ CODE │ DÉSIGNATION │ QUANTITÉ │ PU HT │ RIS.% │ MONTANT  │
//! │ 5. NB. UV : <qty> | VARIÉ                                               │
//! │ 6. Arrêtée la présente facture à la somme de : <WORDS> DINARS           │
//! │ 7. Summary: TOTAL HT, [REMISE], NET HT, [TVA], TIMBRE, NET A PAYER      │
//! │ 8. Footer: signature, warranty (centered)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use facture_core::words::amount_in_words_or_figures;
use facture_core::{Client, DocumentRequest, FinancialSummary, FormatConfig, Money};

use crate::error::{RenderError, RenderResult};
use crate::layout::{Align, Block, Document, Paragraph, Table, TableRow, TextRun};
use crate::letterhead::CompanyInfo;
use crate::numbering::DocumentNumber;
use crate::pdf::PdfWriter;

/// Item table column widths in inches.
pub const ITEM_COLUMN_WIDTHS: [f32; 7] = [0.5, 1.5, 4.0, 1.0, 1.0, 1.0, 1.0];

/// Summary table column widths in inches.
pub const SUMMARY_COLUMN_WIDTHS: [f32; 2] = [3.0, 2.0];

pub const ITEM_HEADERS: [&str; 7] = [
    "N°",
    "CODE",
    "DÉSIGNATION",
    "QUANTITÉ",
    "PU HT",
    "RIS.%",
    "MONTANT HT",
];

const TITLE_SIZE: f32 = 14.0;
const SIGNATURE_SIZE: f32 = 12.0;

/// Unit note value when several lines are printed.
const VARIED_UNITS: &str = "VARIÉ";

/// Lays out and writes documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    company: CompanyInfo,
    format: FormatConfig,
    pdf: PdfWriter,
}

impl DocumentRenderer {
    pub fn new(company: CompanyInfo, format: FormatConfig) -> Self {
        DocumentRenderer {
            company,
            format,
            pdf: PdfWriter::default(),
        }
    }

    pub fn company(&self) -> &CompanyInfo {
        &self.company
    }

    pub fn format(&self) -> &FormatConfig {
        &self.format
    }

    /// Builds the layout of one document.
    ///
    /// ## Errors
    /// - [`RenderError::MissingClientField`] for a blank client name or address
    /// - [`RenderError::NoLineItems`] for an empty request
    /// - [`RenderError::Amount`] when a line total overflows
    pub fn render(
        &self,
        request: &DocumentRequest,
        summary: &FinancialSummary,
        client: &Client,
        number: &DocumentNumber,
    ) -> RenderResult<Document> {
        if client.name.trim().is_empty() {
            return Err(RenderError::missing_client_field("name"));
        }
        if client.address.trim().is_empty() {
            return Err(RenderError::missing_client_field("address"));
        }
        if request.items.is_empty() {
            return Err(RenderError::NoLineItems);
        }
        if request.client_id != client.id {
            warn!(
                request_client = request.client_id,
                client = client.id,
                "Rendering for a client other than the requested one"
            );
        }

        let title = request.kind.title();
        let mut doc = Document::new(format!("{} {}", title, number));

        self.push_letterhead(&mut doc);

        doc.push(Block::Paragraph(Paragraph::centered(vec![TextRun::bold(
            format!("{} {}", title, number),
            TITLE_SIZE,
        )])));

        doc.push(Block::Paragraph(Paragraph::plain([
            format!("Mode de Paiement : {}", request.payment_method),
            client.name.clone(),
            format!("par : {}", client.address),
            format!(
                "IF : {} AI: {} RC : {}",
                client.fiscal_id, client.ai_number, client.rc_number
            ),
        ])));

        doc.push(Block::Table(self.item_table(request)?));

        let units = match request.items.as_slice() {
            [only] => self.format.format_quantity(only.quantity),
            _ => VARIED_UNITS.to_string(),
        };
        doc.push(Block::Paragraph(Paragraph::plain([format!("NB. UV : {}", units)])));

        let words = amount_in_words_or_figures(summary.grand_total, &self.format.currency);
        doc.push(Block::Paragraph(Paragraph::plain([format!(
            "Arrêtée la présente {} à la somme de : {}",
            title.to_lowercase(),
            words
        )])));

        doc.push(Block::Table(self.summary_table(request, summary)));

        doc.push(Block::Spacer);
        doc.push(Block::Paragraph(Paragraph::new(vec![TextRun::bold(
            self.company.signature.clone(),
            SIGNATURE_SIZE,
        )])));
        doc.push(Block::Paragraph(Paragraph::centered(vec![TextRun::plain(
            self.company.warranty.clone(),
        )])));

        debug!(number = %number, blocks = doc.blocks.len(), "Document laid out");
        Ok(doc)
    }

    /// Renders and writes the PDF into `dir`, returning the file path.
    ///
    /// The PDF is produced in memory first; a failed write removes the
    /// partially written file.
    pub fn generate_to(
        &self,
        dir: &Path,
        request: &DocumentRequest,
        summary: &FinancialSummary,
        client: &Client,
        number: &DocumentNumber,
    ) -> RenderResult<PathBuf> {
        let document = self.render(request, summary, client, number)?;
        let pdf = self.pdf.write(&document)?;

        fs::create_dir_all(dir)?;
        let path = dir.join(number.file_name(request.kind, "pdf"));
        if let Err(err) = fs::write(&path, &pdf.bytes) {
            let _ = fs::remove_file(&path);
            return Err(err.into());
        }

        info!(
            path = %path.display(),
            pages = pdf.pages,
            bytes = pdf.bytes.len(),
            "Document written"
        );
        Ok(path)
    }

    fn push_letterhead(&self, doc: &mut Document) {
        let mut header = vec![TextRun::bold(self.company.name.clone(), TITLE_SIZE)];
        header.extend(self.company.contact_lines().into_iter().map(TextRun::plain));
        doc.push(Block::Paragraph(Paragraph::new(header)));
        doc.push(Block::Paragraph(Paragraph::plain(self.company.bank_lines())));
        doc.push(Block::Rule);
        doc.push(Block::Paragraph(Paragraph::plain(self.company.legal_lines())));
    }

    fn item_table(&self, request: &DocumentRequest) -> RenderResult<Table> {
        let mut table = Table::new(
            ITEM_COLUMN_WIDTHS.to_vec(),
            vec![
                Align::Center,
                Align::Left,
                Align::Left,
                Align::Right,
                Align::Right,
                Align::Right,
                Align::Right,
            ],
        );
        table.push(TableRow::bold(
            ITEM_HEADERS.iter().map(|h| h.to_string()).collect(),
        ));

        for (idx, item) in request.items.iter().enumerate() {
            let discount = if item.discount.is_zero() {
                "-".to_string()
            } else {
                self.format.format_percentage(item.discount)
            };
            table.push(TableRow::new(vec![
                (idx + 1).to_string(),
                item.code.clone(),
                item.description.clone(),
                self.format.format_quantity(item.quantity),
                self.format.format_amount(item.unit_price),
                discount,
                self.format.format_amount(item.line_total()?),
            ]));
        }
        Ok(table)
    }

    fn summary_table(&self, request: &DocumentRequest, summary: &FinancialSummary) -> Table {
        let mut table = Table::new(SUMMARY_COLUMN_WIDTHS.to_vec(), vec![Align::Left, Align::Right]);
        let row = |label: String, amount: Money| {
            TableRow::new(vec![label, self.format.format_amount(amount)])
        };

        table.push(row("TOTAL HT".to_string(), summary.subtotal));
        if summary.has_discount() {
            table.push(row(
                format!("REMISE {}%", self.format.format_percentage(summary.global_discount)),
                summary.discount_amount,
            ));
        }
        table.push(row("NET HT".to_string(), summary.net_subtotal));
        if !request.kind.is_tax_exempt() {
            table.push(row(
                format!("TVA {}%", self.format.format_percentage(summary.tax_rate)),
                summary.tax_amount,
            ));
        }
        table.push(row("TIMBRE".to_string(), Money::zero()));
        table.push(TableRow::bold(vec![
            "NET A PAYER".to_string(),
            self.format.format_amount(summary.grand_total),
        ]));
        table
    }
}
