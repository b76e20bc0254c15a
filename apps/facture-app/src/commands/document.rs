//! # Document Commands
//!
//! Document generation, from raw user input to a file on disk.
//!
//! ## Generation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Generation Flow                             │
//! │                                                                         │
//! │  GenerateDocumentInput { kind: "invoice", client_id: 1,                 │
//! │                          items: ["3:2", "5:1:10"], .. }                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Parse kind ─────────────────────────► VALIDATION_ERROR if unknown   │
//! │  2. Resolve client ─────────────────────► NOT_FOUND                     │
//! │  3. Resolve each item, parse qty/disc ──► NOT_FOUND / VALIDATION_ERROR  │
//! │  4. calculate() ────────────────────────► FinancialSummary              │
//! │  5. DocumentNumber::generate(kind, timestamp)                           │
//! │  6. DocumentRenderer::generate_to(output_dir, ..)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GeneratedDocumentDto { file name, path, summary }                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use facture_core::validation::{parse_decimal, parse_percentage, validate_quantity};
use facture_core::words::amount_in_words_or_figures;
use facture_core::{
    calculate, DocumentKind, DocumentRequest, FinancialSummary, FormatConfig, LineItem, RecordId,
    ValidationError,
};
use facture_render::DocumentNumber;
use facture_store::RecordRepository;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::state::AppState;

/// One selected catalogue item with its quantity and line discount,
/// both as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSelection {
    pub item_id: RecordId,
    pub quantity: String,
    /// Blank means no discount.
    #[serde(default)]
    pub discount: String,
}

impl ItemSelection {
    pub fn new(item_id: RecordId, quantity: impl Into<String>) -> Self {
        ItemSelection {
            item_id,
            quantity: quantity.into(),
            discount: String::new(),
        }
    }

    pub fn with_discount(mut self, discount: impl Into<String>) -> Self {
        self.discount = discount.into();
        self
    }
}

/// Parses the CLI form `<id>:<quantity>[:<discount>]`.
impl FromStr for ItemSelection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "item".to_string(),
            reason: format!("expected <id>:<quantity>[:<discount>], got '{}'", s),
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        let (id, quantity, discount) = match parts.as_slice() {
            [id, quantity] => (id, quantity, ""),
            [id, quantity, discount] => (id, quantity, *discount),
            _ => return Err(invalid()),
        };
        let item_id = id.trim().parse::<RecordId>().map_err(|_| invalid())?;

        Ok(ItemSelection::new(item_id, quantity.trim()).with_discount(discount.trim()))
    }
}

/// A document request as it arrives from the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentInput {
    pub kind: String,
    pub client_id: RecordId,
    pub items: Vec<ItemSelection>,
    /// Blank falls back to the configured default.
    #[serde(default)]
    pub payment_method: String,
    /// Global discount percentage; blank means none.
    #[serde(default)]
    pub global_discount: String,
}

/// Result of a successful generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocumentDto {
    pub document_number: DocumentNumber,
    pub kind: DocumentKind,
    pub file_name: String,
    pub path: PathBuf,
    pub client_id: RecordId,
    pub line_count: usize,
    pub summary: FinancialSummary,
    pub amount_in_words: String,
}

impl GeneratedDocumentDto {
    /// Text summary printed by the CLI, with the same rows as the
    /// document's totals block.
    pub fn summary_lines(&self, fmt: &FormatConfig) -> Vec<String> {
        let s = &self.summary;
        let mut lines = vec![
            format!("{} {}", self.kind.title(), self.document_number),
            format!("  TOTAL HT     {}", fmt.format_amount(s.subtotal)),
        ];
        if s.has_discount() {
            lines.push(format!(
                "  {:<12} {}",
                format!("REMISE {}%", fmt.format_percentage(s.global_discount)),
                fmt.format_amount(s.discount_amount)
            ));
        }
        lines.push(format!("  NET HT       {}", fmt.format_amount(s.net_subtotal)));
        if !self.kind.is_tax_exempt() {
            lines.push(format!(
                "  {:<12} {}",
                format!("TVA {}%", fmt.format_percentage(s.tax_rate)),
                fmt.format_amount(s.tax_amount)
            ));
        }
        lines.push(format!("  NET A PAYER  {}", fmt.format_amount(s.grand_total)));
        lines.push(format!("  {}", self.amount_in_words));
        lines.push(format!("Fichier : {}", self.path.display()));
        lines
    }
}

/// Selectable document kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentKindDto {
    pub id: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub type_code: &'static str,
}

impl From<DocumentKind> for DocumentKindDto {
    fn from(kind: DocumentKind) -> Self {
        DocumentKindDto {
            id: kind.as_str(),
            label: kind.label(),
            title: kind.title(),
            type_code: kind.type_code(),
        }
    }
}

pub fn list_document_kinds() -> Vec<DocumentKindDto> {
    DocumentKind::ALL.into_iter().map(DocumentKindDto::from).collect()
}

/// Generates a document numbered with the current local time.
pub fn generate_document(
    state: &AppState,
    input: GenerateDocumentInput,
) -> ApiResult<GeneratedDocumentDto> {
    generate_document_at(state, input, Local::now().naive_local())
}

/// Generates a document numbered with `timestamp`.
///
/// Nothing is written unless every reference resolves and every
/// number parses.
pub fn generate_document_at(
    state: &AppState,
    input: GenerateDocumentInput,
    timestamp: NaiveDateTime,
) -> ApiResult<GeneratedDocumentDto> {
    let kind = DocumentKind::from_str(&input.kind)?;
    let client = state.store.clients().find_by_id(input.client_id)?;

    let mut lines = Vec::with_capacity(input.items.len());
    for selection in &input.items {
        let item = state.store.items().find_by_id(selection.item_id)?;
        let quantity = parse_decimal("quantity", &selection.quantity)?;
        validate_quantity(quantity)?;
        let discount = parse_percentage("discount", &selection.discount)?;
        lines.push(LineItem::from_item(&item, quantity, discount));
    }

    let payment_method = match input.payment_method.trim() {
        "" => state.config.default_payment_method.clone(),
        method => method.to_string(),
    };
    let global_discount = parse_percentage("global discount", &input.global_discount)?;
    let request = DocumentRequest::new(kind, client.id, lines)
        .with_payment_method(payment_method)
        .with_global_discount(global_discount);

    let summary = calculate(&request.items, request.global_discount, kind)?;
    debug!(
        kind = %kind,
        client_id = client.id,
        grand_total = %summary.grand_total,
        "Document calculated"
    );

    let number = DocumentNumber::generate(kind, timestamp);
    let path = state.renderer.generate_to(
        &state.config.paths.output_dir,
        &request,
        &summary,
        &client,
        &number,
    )?;

    info!(number = %number, path = %path.display(), "Document generated");
    Ok(GeneratedDocumentDto {
        file_name: number.file_name(kind, "pdf"),
        amount_in_words: amount_in_words_or_figures(
            summary.grand_total,
            &state.config.format.currency,
        ),
        document_number: number,
        kind,
        path,
        client_id: client.id,
        line_count: request.items.len(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::client::add_client;
    use crate::commands::item::add_item;
    use crate::error::ErrorCode;
    use crate::state::test_support::temp_state;
    use chrono::NaiveDate;
    use facture_core::{Money, NewClient, NewItem};
    use rust_decimal_macros::dec;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    /// One client (id 1) and two items: id 1 at 100, id 2 at 250.
    fn seeded() -> (tempfile::TempDir, AppState) {
        let (dir, state) = temp_state();
        add_client(
            &state,
            NewClient {
                name: "SARL ALPHA".to_string(),
                address: "Alger".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        for (code, price) in [("A1", "100"), ("B2", "250")] {
            add_item(
                &state,
                NewItem {
                    code: code.to_string(),
                    description: format!("Article {}", code),
                    unit_price: price.to_string(),
                    category: String::new(),
                },
            )
            .unwrap();
        }
        (dir, state)
    }

    fn input(kind: &str, items: Vec<ItemSelection>) -> GenerateDocumentInput {
        GenerateDocumentInput {
            kind: kind.to_string(),
            client_id: 1,
            items,
            payment_method: String::new(),
            global_discount: "10".to_string(),
        }
    }

    #[test]
    fn test_parse_item_selection() {
        let plain: ItemSelection = "3:2".parse().unwrap();
        assert_eq!(plain, ItemSelection::new(3, "2"));

        let discounted: ItemSelection = " 5:1,5:10 ".parse().unwrap();
        assert_eq!(discounted, ItemSelection::new(5, "1,5").with_discount("10"));

        assert!("5".parse::<ItemSelection>().is_err());
        assert!("x:1".parse::<ItemSelection>().is_err());
        assert!("1:2:3:4".parse::<ItemSelection>().is_err());
    }

    #[test]
    fn test_generate_invoice() {
        let (dir, state) = seeded();
        let selections = vec![
            ItemSelection::new(1, "3"),
            ItemSelection::new(2, "1").with_discount("10"),
        ];

        let dto = generate_document_at(&state, input("invoice", selections), timestamp()).unwrap();

        assert_eq!(dto.document_number.as_str(), "FA24/03/1405");
        assert_eq!(dto.file_name, "INVOICE_FA24_03_1405.pdf");
        assert_eq!(dto.path, dir.path().join("out").join("INVOICE_FA24_03_1405.pdf"));
        assert!(dto.path.exists());
        assert_eq!(dto.line_count, 2);
        assert_eq!(dto.summary.subtotal, Money::new(dec!(525)));
        assert_eq!(dto.summary.net_subtotal, Money::new(dec!(472.5)));
        assert_eq!(dto.summary.grand_total, Money::new(dec!(562.275)));
    }

    #[test]
    fn test_tax_exempt_has_no_tax() {
        let (_dir, state) = seeded();
        let dto = generate_document_at(
            &state,
            input("tax_exempt", vec![ItemSelection::new(2, "2")]),
            timestamp(),
        )
        .unwrap();

        assert_eq!(dto.summary.tax_amount, Money::zero());
        assert_eq!(dto.summary.grand_total, Money::new(dec!(450)));
        assert_eq!(dto.file_name, "TAX_EXEMPT_FH24_03_1405.pdf");
    }

    #[test]
    fn test_summary_lines_match_totals_block() {
        let (_dir, state) = seeded();
        let fmt = &state.config.format;
        let labels = |dto: &GeneratedDocumentDto| -> Vec<String> {
            dto.summary_lines(fmt)
                .iter()
                .filter_map(|line| line.strip_prefix("  "))
                .filter_map(|row| row.split("  ").next())
                .map(|label| label.trim().to_string())
                .collect()
        };

        let invoice = generate_document_at(
            &state,
            input("invoice", vec![ItemSelection::new(1, "1")]),
            timestamp(),
        )
        .unwrap();
        let rows = labels(&invoice);
        assert!(rows.contains(&"REMISE 10%".to_string()));
        assert!(rows.contains(&"TVA 19%".to_string()));

        let exempt = generate_document_at(
            &state,
            input("tax_exempt", vec![ItemSelection::new(1, "1")]),
            timestamp(),
        )
        .unwrap();
        let rows = labels(&exempt);
        assert!(rows.contains(&"REMISE 10%".to_string()));
        assert!(!rows.iter().any(|row| row.starts_with("TVA")));
    }

    #[test]
    fn test_unknown_kind_is_validation_error() {
        let (dir, state) = seeded();
        let err = generate_document_at(
            &state,
            input("receipt", vec![ItemSelection::new(1, "1")]),
            timestamp(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_missing_references_are_not_found() {
        let (_dir, state) = seeded();

        let mut request = input("invoice", vec![ItemSelection::new(1, "1")]);
        request.client_id = 42;
        let err = generate_document_at(&state, request, timestamp()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let request = input("invoice", vec![ItemSelection::new(99, "1")]);
        let err = generate_document_at(&state, request, timestamp()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: 99");
    }

    #[test]
    fn test_bad_numbers_are_validation_errors() {
        let (_dir, state) = seeded();
        for selection in [
            ItemSelection::new(1, "deux"),
            ItemSelection::new(1, "-1"),
            ItemSelection::new(1, "1").with_discount("150"),
        ] {
            let err = generate_document_at(&state, input("quote", vec![selection]), timestamp())
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
    }

    #[test]
    fn test_empty_selection_is_validation_error() {
        let (dir, state) = seeded();
        let err = generate_document_at(&state, input("proforma", Vec::new()), timestamp())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_huge_quantity_is_validation_error() {
        let (dir, state) = seeded();
        let selection = ItemSelection::new(1, "79228162514264337593543950335");
        let err = generate_document_at(&state, input("invoice", vec![selection]), timestamp())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("line total"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_list_document_kinds() {
        let kinds = list_document_kinds();
        assert_eq!(kinds.len(), 5);
        assert_eq!(kinds[0].id, "proforma");
        assert_eq!(kinds[4].type_code, "FH");
    }
}
