//! # facture-core: Pure Business Logic for Facture
//!
//! This crate is the **heart** of Facture. It turns line items and discount
//! parameters into a fully resolved financial summary, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Facture Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    facture-app (request boundary)               │   │
//! │  │    generate_document, add_client, delete_item, ...             │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼───────────────┐ ┌───────────▼───────────────────┐   │
//! │  │ facture-store (xlsx records)  │ │ facture-render (layout + PDF) │   │
//! │  └───────────────┬───────────────┘ └───────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼─────────────────────────────▼───────────────────┐   │
//! │  │               ★ facture-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ calculator │  │   words   │  │   │
//! │  │   │ LineItem  │  │   Money   │  │  Summary   │  │  "mille"  │  │   │
//! │  │   │ DocKind   │  │ Percentage│  │ TVA rules  │  │  format   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCALE • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (DocumentKind, LineItem, Client, Item, ...)
//! - [`money`] - Money and Percentage over exact decimals
//! - [`calculator`] - Line items → FinancialSummary
//! - [`format`] - Explicit number formatting (separators, currency)
//! - [`words`] - Amounts in French words
//! - [`error`] - Domain error types
//! - [`validation`] - Input parsing and business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use facture_core::calculator::calculate;
//! use facture_core::{DocumentKind, LineItem, Money, Percentage};
//!
//! let items = vec![LineItem::new("A1", "Onduleur", 3.into(), Money::from_units(100), Percentage::zero())];
//! let summary = calculate(&items, Percentage::zero(), DocumentKind::Invoice).unwrap();
//!
//! // 300 HT + 19% TVA
//! assert_eq!(summary.grand_total, Money::from_units(357));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod format;
pub mod money;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{calculate, FinancialSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::FormatConfig;
pub use money::{Money, Percentage};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// TVA applied to every document kind except [`DocumentKind::TaxExempt`].
pub const STANDARD_VAT_PERCENT: u32 = 19;

/// Payment method printed when the request does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "ESPÈCES";

/// Currency suffix used on amounts in words.
pub const DEFAULT_CURRENCY: &str = "DINARS";
