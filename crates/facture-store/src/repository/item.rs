//! # Item Repository
//!
//! Row layout of `items.xlsx`:
//!
//! | A       | B    | C           | D          | E        |
//! |---------|------|-------------|------------|----------|
//! | Item ID | Code | Description | Unit Price | Category |
//!
//! Prices are stored as numbers. A price cell that does not parse reads
//! as zero with a warning instead of hiding the whole catalogue.

use facture_core::validation::parse_decimal;
use facture_core::{Item, Money, NewItem, RecordId};
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

use super::{cell, SheetRecord, SheetRepository};
use crate::error::StoreResult;
use crate::sheet::CellValue;

/// Repository over `items.xlsx`.
pub type ItemRepository = SheetRepository<Item>;

impl SheetRecord for Item {
    type Draft = NewItem;

    const ENTITY: &'static str = "Item";
    const FILE_NAME: &'static str = "items.xlsx";
    const SHEET_NAME: &'static str = "Items";
    const HEADERS: &'static [&'static str] =
        &["Item ID", "Code", "Description", "Unit Price", "Category"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_row(id: RecordId, cells: &[String]) -> Self {
        let raw_price = cell(cells, 3);
        let unit_price = match parse_decimal("unit_price", &raw_price) {
            Ok(price) => Money::new(price),
            Err(err) => {
                warn!(item_id = id, price = %raw_price, error = %err, "Unreadable unit price, using 0");
                Money::zero()
            }
        };

        let code = match cell(cells, 1) {
            code if code.is_empty() => Item::default_code(id),
            code => code,
        };

        Item {
            id,
            code,
            description: cell(cells, 2),
            unit_price,
            category: cell(cells, 4),
        }
    }

    fn to_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::Number(f64::from(self.id)),
            CellValue::Text(self.code.clone()),
            CellValue::Text(self.description.clone()),
            CellValue::Number(self.unit_price.amount().to_f64().unwrap_or(0.0)),
            CellValue::Text(self.category.clone()),
        ]
    }

    fn from_draft(draft: NewItem, id: RecordId) -> StoreResult<Self> {
        Ok(draft.into_item(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RecordRepository;
    use crate::sheet::SheetFile;
    use rust_decimal_macros::dec;

    fn draft(code: &str, price: &str) -> NewItem {
        NewItem {
            code: code.to_string(),
            description: "Onduleur 2KVA".to_string(),
            unit_price: price.to_string(),
            category: "Energie".to_string(),
        }
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ItemRepository::new(dir.path());

        let added = repo.append(draft("OND-2K", "45000,50")).unwrap();
        assert_eq!(added.id, 1);

        let loaded = repo.find_by_id(1).unwrap();
        assert_eq!(loaded.code, "OND-2K");
        assert_eq!(loaded.unit_price, Money::new(dec!(45000.5)));
        assert_eq!(loaded.category, "Energie");
    }

    #[test]
    fn test_blank_code_defaults_to_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ItemRepository::new(dir.path());
        repo.append(draft("X", "1")).unwrap();

        let second = repo.append(draft("", "2")).unwrap();
        assert_eq!(second.code, "ITEM002");
    }

    #[test]
    fn test_bad_price_rejected_on_append() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ItemRepository::new(dir.path());
        assert!(repo.append(draft("X", "cher")).is_err());
    }

    #[test]
    fn test_tolerant_read_of_foreign_rows() {
        let dir = tempfile::tempdir().unwrap();
        let file = SheetFile::new(dir.path().join("items.xlsx"), "Sheet", Item::HEADERS);
        file.write_rows(&[
            vec![
                CellValue::Number(1.0),
                "A1".into(),
                "Câble".into(),
                "sur devis".into(),
                "".into(),
            ],
            vec![
                CellValue::Text(String::new()),
                "ORPHAN".into(),
                "Ligne sans id".into(),
                CellValue::Number(5.0),
            ],
            vec![
                CellValue::Number(7.0),
                "B7".into(),
                "Batterie".into(),
                CellValue::Number(250.0),
            ],
        ])
        .unwrap();

        let repo = ItemRepository::new(dir.path());
        let items = repo.list_all().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].unit_price, Money::zero());
        assert_eq!(items[1].id, 7);
        assert_eq!(items[1].unit_price, Money::from_units(250));

        assert_eq!(repo.append(draft("C", "10")).unwrap().id, 8);
    }
}
