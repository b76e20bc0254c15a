//! # facture-render: Document Renderer for Facture
//!
//! Lays out a commercial document and writes it as a PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DocumentRequest + FinancialSummary + Client + DocumentNumber           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DocumentRenderer::render ──► layout::Document (paragraphs, tables)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PdfWriter::write ──► bytes in memory                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <out>/INVOICE_FA24_03_1405.pdf                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`renderer`] - Layout of the eight document sections
//! - [`layout`] - Backend-independent document tree
//! - [`pdf`] - printpdf backend with pagination
//! - [`numbering`] - Document numbers and file names
//! - [`letterhead`] - Company constants
//! - [`error`] - Render error types

pub mod error;
pub mod layout;
pub mod letterhead;
pub mod numbering;
pub mod pdf;
pub mod renderer;

pub use error::{RenderError, RenderResult};
pub use layout::Document;
pub use letterhead::CompanyInfo;
pub use numbering::DocumentNumber;
pub use pdf::{PdfWriter, RenderedPdf};
pub use renderer::DocumentRenderer;
