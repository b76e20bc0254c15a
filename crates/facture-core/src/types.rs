//! # Domain Types
//!
//! Core domain types used throughout Facture.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │      Item       │   │  DocumentKind   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  Proforma       │       │
//! │  │  name, address  │   │  code           │   │  Invoice        │       │
//! │  │  fiscal_id      │   │  description    │   │  Quote          │       │
//! │  │  ai / rc number │   │  unit_price     │   │  DiscountedInv. │       │
//! │  └─────────────────┘   └────────┬────────┘   │  TaxExempt      │       │
//! │                                 │ snapshot   └─────────────────┘       │
//! │                                 ▼                                       │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │ DocumentRequest { kind, client_id, items: Vec<LineItem>,      │     │
//! │  │                   payment_method, global_discount }           │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`LineItem`] copies code, description and unit price out of the
//! [`Item`] record when the request is built. Later edits to the item
//! spreadsheet never change a document already generated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::{Money, Percentage};
use crate::validation;
use crate::DEFAULT_PAYMENT_METHOD;

/// Identifier of a client or item row in the record store.
pub type RecordId = u32;

// =============================================================================
// Document Kind
// =============================================================================

/// The invoice-like document category.
///
/// Closed set: every kind has a title, a 2-letter numbering code and a
/// tax behavior. An unknown kind fails at parse time, never at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Proforma,
    Invoice,
    Quote,
    DiscountedInvoice,
    /// Invoice without TVA.
    TaxExempt,
}

impl DocumentKind {
    /// Every kind, in the order offered to the user.
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Proforma,
        DocumentKind::Invoice,
        DocumentKind::Quote,
        DocumentKind::DiscountedInvoice,
        DocumentKind::TaxExempt,
    ];

    /// Identifier used in requests and config (`tax_exempt`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Proforma => "proforma",
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quote => "quote",
            DocumentKind::DiscountedInvoice => "discounted_invoice",
            DocumentKind::TaxExempt => "tax_exempt",
        }
    }

    /// Title printed on the document.
    pub const fn title(&self) -> &'static str {
        match self {
            DocumentKind::Proforma => "PROFORMA",
            DocumentKind::Invoice => "FACTURE",
            DocumentKind::Quote => "DEVIS",
            DocumentKind::DiscountedInvoice => "FACTURE AVEC REMISE",
            DocumentKind::TaxExempt => "FACTURE HORS TAXE",
        }
    }

    /// Human label for selection lists.
    pub const fn label(&self) -> &'static str {
        match self {
            DocumentKind::Proforma => "Proforma",
            DocumentKind::Invoice => "Facture",
            DocumentKind::Quote => "Devis",
            DocumentKind::DiscountedInvoice => "Facture avec remise",
            DocumentKind::TaxExempt => "Facture hors taxe",
        }
    }

    /// Two-letter prefix of the document number.
    pub const fn type_code(&self) -> &'static str {
        match self {
            DocumentKind::Proforma => "FP",
            DocumentKind::Invoice => "FA",
            DocumentKind::Quote => "DV",
            DocumentKind::DiscountedInvoice => "FR",
            DocumentKind::TaxExempt => "FH",
        }
    }

    /// Prefix of the output file name (`TAX_EXEMPT`).
    pub fn file_prefix(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// True when no TVA applies.
    pub const fn is_tax_exempt(&self) -> bool {
        matches!(self, DocumentKind::TaxExempt)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DocumentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "document kind".to_string(),
                allowed: DocumentKind::ALL
                    .iter()
                    .map(|k| k.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Client
// =============================================================================

/// A customer the documents are addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Identifiant fiscal (IF).
    #[serde(default)]
    pub fiscal_id: String,
    /// Article d'imposition (AI).
    #[serde(default)]
    pub ai_number: String,
    /// Registre du commerce (RC).
    #[serde(default)]
    pub rc_number: String,
}

/// A client about to be appended to the store (no id yet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub fiscal_id: String,
    #[serde(default)]
    pub ai_number: String,
    #[serde(default)]
    pub rc_number: String,
}

impl NewClient {
    /// Name and address are mandatory; everything else may stay blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_required("name", &self.name)?;
        validation::validate_required("address", &self.address)?;
        Ok(())
    }

    /// Assigns the id allocated by the store.
    pub fn into_client(self, id: RecordId) -> Client {
        Client {
            id,
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            fiscal_id: self.fiscal_id.trim().to_string(),
            ai_number: self.ai_number.trim().to_string(),
            rc_number: self.rc_number.trim().to_string(),
        }
    }
}

// =============================================================================
// Item
// =============================================================================

/// A catalogue article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: RecordId,
    pub code: String,
    pub description: String,
    pub unit_price: Money,
    #[serde(default)]
    pub category: String,
}

impl Item {
    /// Code given to items saved without one (`ITEM007`).
    pub fn default_code(id: RecordId) -> String {
        format!("ITEM{:03}", id)
    }
}

/// An item about to be appended to the store.
///
/// `unit_price` is kept as typed by the user; it is parsed in
/// [`NewItem::validate`] so "1500,00" and "1500.00" both work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub code: String,
    pub description: String,
    pub unit_price: String,
    #[serde(default)]
    pub category: String,
}

impl NewItem {
    /// Checks required fields and returns the parsed unit price.
    pub fn validate(&self) -> Result<Money, ValidationError> {
        validation::validate_required("description", &self.description)?;
        validation::validate_required("unit_price", &self.unit_price)?;
        let price = validation::parse_decimal("unit_price", &self.unit_price)?;
        validation::validate_non_negative("unit_price", price)?;
        Ok(Money::new(price))
    }

    /// Assigns the id allocated by the store, defaulting a blank code.
    pub fn into_item(self, id: RecordId) -> Result<Item, ValidationError> {
        let unit_price = self.validate()?;
        let code = match self.code.trim() {
            "" => Item::default_code(id),
            code => code.to_string(),
        };
        Ok(Item {
            id,
            code,
            description: self.description.trim().to_string(),
            unit_price,
            category: self.category.trim().to_string(),
        })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of the itemized table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub code: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Money,
    /// Per-line discount ("RIS.%").
    pub discount: Percentage,
}

impl LineItem {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Money,
        discount: Percentage,
    ) -> Self {
        LineItem {
            code: code.into(),
            description: description.into(),
            quantity,
            unit_price,
            discount,
        }
    }

    /// Builds a line from a catalogue item (snapshot of code, description, price).
    pub fn from_item(item: &Item, quantity: Decimal, discount: Percentage) -> Self {
        LineItem::new(
            item.code.clone(),
            item.description.clone(),
            quantity,
            item.unit_price,
            discount,
        )
    }

    /// quantity × unit_price × (1 − discount/100), unrounded.
    ///
    /// Fails when quantity × unit_price does not fit in a decimal.
    pub fn line_total(&self) -> Result<Money, ValidationError> {
        self.unit_price
            .times(self.quantity)
            .map(|gross| gross.less_percent(self.discount))
            .ok_or_else(|| ValidationError::too_large("line total"))
    }
}

// =============================================================================
// Document Request
// =============================================================================

/// Everything needed to produce one document, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    pub client_id: RecordId,
    pub items: Vec<LineItem>,
    pub payment_method: String,
    pub global_discount: Percentage,
}

impl DocumentRequest {
    pub fn new(kind: DocumentKind, client_id: RecordId, items: Vec<LineItem>) -> Self {
        DocumentRequest {
            kind,
            client_id,
            items,
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            global_discount: Percentage::zero(),
        }
    }

    /// Sets the payment method label; blank keeps the default.
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        let method = method.into();
        if !method.trim().is_empty() {
            self.payment_method = method.trim().to_string();
        }
        self
    }

    pub fn with_global_discount(mut self, discount: Percentage) -> Self {
        self.global_discount = discount;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_document_kind_parsing() {
        assert_eq!("proforma".parse::<DocumentKind>().unwrap(), DocumentKind::Proforma);
        assert_eq!(
            " Tax_Exempt ".parse::<DocumentKind>().unwrap(),
            DocumentKind::TaxExempt
        );
        let err = "receipt".parse::<DocumentKind>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { ref allowed, .. } if allowed.len() == 5));
    }

    #[test]
    fn test_document_kind_tables() {
        assert_eq!(DocumentKind::TaxExempt.title(), "FACTURE HORS TAXE");
        assert_eq!(DocumentKind::Proforma.title(), "PROFORMA");
        assert_eq!(DocumentKind::DiscountedInvoice.file_prefix(), "DISCOUNTED_INVOICE");
        assert!(DocumentKind::TaxExempt.is_tax_exempt());
        assert!(!DocumentKind::Invoice.is_tax_exempt());

        for kind in DocumentKind::ALL {
            assert_eq!(kind.type_code().len(), 2);
            assert_eq!(kind.as_str().parse::<DocumentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_document_kind_serde_uses_identifier() {
        let json = serde_json::to_string(&DocumentKind::DiscountedInvoice).unwrap();
        assert_eq!(json, "\"discounted_invoice\"");
    }

    #[test]
    fn test_line_total() {
        let line = LineItem::new(
            "B2",
            "Batterie",
            dec!(1),
            Money::from_units(250),
            Percentage::from_units(10).unwrap(),
        );
        assert_eq!(line.line_total(), Ok(Money::from_units(225)));

        let fractional = LineItem::new("C", "Câble", dec!(2.5), Money::new(dec!(12.40)), Percentage::zero());
        assert_eq!(fractional.line_total(), Ok(Money::new(dec!(31))));
    }

    #[test]
    fn test_line_total_overflow_is_out_of_range() {
        let line = LineItem::new(
            "A1",
            "Onduleur",
            Decimal::MAX,
            Money::from_units(100),
            Percentage::zero(),
        );
        assert!(matches!(
            line.line_total(),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "line total"
        ));
    }

    #[test]
    fn test_new_client_validation() {
        let mut draft = NewClient {
            name: "Sonelgaz".to_string(),
            address: "Alger".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        draft.address = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::required("address")));
    }

    #[test]
    fn test_new_item_defaults_code() {
        let draft = NewItem {
            code: "  ".to_string(),
            description: "Onduleur 1KVA".to_string(),
            unit_price: "1500,50".to_string(),
            category: String::new(),
        };
        let item = draft.into_item(7).unwrap();
        assert_eq!(item.code, "ITEM007");
        assert_eq!(item.unit_price, Money::new(dec!(1500.50)));
    }

    #[test]
    fn test_new_item_rejects_bad_price() {
        let draft = NewItem {
            description: "Onduleur".to_string(),
            unit_price: "abc".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let negative = NewItem {
            description: "Onduleur".to_string(),
            unit_price: "-3".to_string(),
            ..Default::default()
        };
        assert_eq!(negative.validate(), Err(ValidationError::negative("unit_price")));
    }

    #[test]
    fn test_request_payment_method_default() {
        let request = DocumentRequest::new(DocumentKind::Quote, 1, Vec::new())
            .with_payment_method("   ");
        assert_eq!(request.payment_method, DEFAULT_PAYMENT_METHOD);

        let request = request.with_payment_method("CHÈQUE");
        assert_eq!(request.payment_method, "CHÈQUE");
    }
}
