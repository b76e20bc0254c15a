//! # Item Commands
//!
//! Listing and editing the item catalogue.

use facture_core::{Item, NewItem, RecordId};
use facture_store::RecordRepository;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn list_items(state: &AppState) -> ApiResult<Vec<Item>> {
    Ok(state.store.items().list_all()?)
}

/// Appends an item. The price may use a comma or a dot; a blank code
/// becomes `ITEM<id>`.
pub fn add_item(state: &AppState, draft: NewItem) -> ApiResult<Item> {
    let item = state.store.items().append(draft)?;
    info!(id = item.id, code = %item.code, "Item added");
    Ok(item)
}

pub fn delete_item(state: &AppState, id: RecordId) -> ApiResult<()> {
    state.store.items().delete_by_id(id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_support::temp_state;
    use facture_core::Money;
    use rust_decimal_macros::dec;

    fn draft(code: &str, price: &str) -> NewItem {
        NewItem {
            code: code.to_string(),
            description: "Onduleur 1000VA".to_string(),
            unit_price: price.to_string(),
            category: "Energie".to_string(),
        }
    }

    #[test]
    fn test_add_with_comma_price_and_default_code() {
        let (_dir, state) = temp_state();
        let item = add_item(&state, draft("", "1500,50")).unwrap();
        assert_eq!(item.code, "ITEM001");
        assert_eq!(item.unit_price, Money::new(dec!(1500.50)));

        let listed = list_items(&state).unwrap();
        assert_eq!(listed, vec![item]);
    }

    #[test]
    fn test_bad_price_is_validation_error() {
        let (_dir, state) = temp_state();
        let err = add_item(&state, draft("OND-1", "mille")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_item(&state, draft("OND-1", "-3")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_delete_item() {
        let (_dir, state) = temp_state();
        let item = add_item(&state, draft("OND-1", "100")).unwrap();
        delete_item(&state, item.id).unwrap();
        assert!(list_items(&state).unwrap().is_empty());
        assert_eq!(
            delete_item(&state, item.id).unwrap_err().code,
            ErrorCode::NotFound
        );
    }
}
