//! # Financial Calculator
//!
//! Turns a list of line items plus the global discount into every figure
//! printed in the summary table.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line_total  = quantity × unit_price × (1 − line_discount/100)          │
//! │       │                                                                 │
//! │       ▼  Σ                                                              │
//! │  subtotal (TOTAL HT)                                                   │
//! │       │                                                                 │
//! │       ├──► discount_amount = subtotal × global_discount/100  (REMISE)   │
//! │       ▼                                                                 │
//! │  net_subtotal = subtotal − discount_amount                  (NET HT)    │
//! │       │                                                                 │
//! │       ├──► tax_amount = net_subtotal × tax_rate/100           (TVA)     │
//! │       ▼                                                                 │
//! │  grand_total = net_subtotal + tax_amount               (NET A PAYER)    │
//! │                                                                         │
//! │  Tax is ALWAYS computed after the global discount.                      │
//! │  Nothing is rounded here; the renderer rounds when it prints.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Percentage};
use crate::types::{DocumentKind, LineItem};
use crate::validation;
use crate::STANDARD_VAT_PERCENT;

// =============================================================================
// Financial Summary
// =============================================================================

/// Every amount of one document, unrounded.
///
/// ## Invariants
/// - `net_subtotal == subtotal - discount_amount`
/// - `grand_total == net_subtotal + tax_amount`
/// - `tax_rate` is zero for [`DocumentKind::TaxExempt`], 19 otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub subtotal: Money,
    pub global_discount: Percentage,
    pub discount_amount: Money,
    pub net_subtotal: Money,
    pub tax_rate: Percentage,
    pub tax_amount: Money,
    pub grand_total: Money,
}

impl FinancialSummary {
    /// True when a REMISE row is printed.
    pub fn has_discount(&self) -> bool {
        !self.global_discount.is_zero()
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Tax rate that applies to a document kind.
///
/// Fixed at [`STANDARD_VAT_PERCENT`]; there is no per-request override.
pub fn tax_rate_for(kind: DocumentKind) -> Percentage {
    if kind.is_tax_exempt() {
        Percentage::zero()
    } else {
        // STANDARD_VAT_PERCENT is a constant inside 0..=100
        Percentage::from_units(STANDARD_VAT_PERCENT).unwrap_or_default()
    }
}

/// Computes the financial summary of a document.
///
/// ## Errors
/// - [`CoreError::EmptyDocument`] when `items` is empty
/// - [`CoreError::Validation`] when a line has a negative quantity or price,
///   or when an amount does not fit in a decimal
///
/// ## Example
/// ```rust
/// use facture_core::calculator::calculate;
/// use facture_core::{DocumentKind, LineItem, Money, Percentage};
/// use rust_decimal::Decimal;
///
/// let items = vec![
///     LineItem::new("A", "Onduleur", Decimal::from(3), Money::from_units(100), Percentage::zero()),
///     LineItem::new("B", "Batterie", Decimal::ONE, Money::from_units(250), Percentage::from_units(10).unwrap()),
/// ];
/// let summary = calculate(&items, Percentage::from_units(10).unwrap(), DocumentKind::Invoice).unwrap();
///
/// assert_eq!(summary.subtotal, Money::from_units(525));
/// assert_eq!(summary.grand_total.to_string(), "562.28");
/// ```
pub fn calculate(
    items: &[LineItem],
    global_discount: Percentage,
    kind: DocumentKind,
) -> CoreResult<FinancialSummary> {
    if items.is_empty() {
        return Err(CoreError::EmptyDocument);
    }

    for item in items {
        validation::validate_quantity(item.quantity)?;
        validation::validate_unit_price(item.unit_price.amount())?;
    }

    let line_totals = items
        .iter()
        .map(LineItem::line_total)
        .collect::<Result<Vec<_>, _>>()?;
    let subtotal = Money::checked_sum(line_totals)
        .ok_or_else(|| ValidationError::too_large("subtotal"))?;
    // Discount and tax are fractions of their base; only the final sum can overflow.
    let discount_amount = subtotal.percent(global_discount);
    let net_subtotal = subtotal - discount_amount;

    let tax_rate = tax_rate_for(kind);
    let tax_amount = net_subtotal.percent(tax_rate);
    let grand_total = net_subtotal
        .checked_add(tax_amount)
        .ok_or_else(|| ValidationError::too_large("grand total"))?;

    debug!(
        kind = %kind,
        lines = items.len(),
        subtotal = %subtotal,
        grand_total = %grand_total,
        "Calculated document totals"
    );

    Ok(FinancialSummary {
        subtotal,
        global_discount,
        discount_amount,
        net_subtotal,
        tax_rate,
        tax_amount,
        grand_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn pct(value: u32) -> Percentage {
        Percentage::from_units(value).unwrap()
    }

    fn two_lines() -> Vec<LineItem> {
        vec![
            LineItem::new("A", "Onduleur", dec!(3), Money::from_units(100), Percentage::zero()),
            LineItem::new("B", "Batterie", dec!(1), Money::from_units(250), pct(10)),
        ]
    }

    #[test]
    fn test_discounted_invoice_example() {
        let summary = calculate(&two_lines(), pct(10), DocumentKind::DiscountedInvoice).unwrap();

        assert_eq!(summary.subtotal.amount(), dec!(525));
        assert_eq!(summary.discount_amount.amount(), dec!(52.5));
        assert_eq!(summary.net_subtotal.amount(), dec!(472.5));
        assert_eq!(summary.tax_rate, pct(19));
        assert_eq!(summary.tax_amount.amount(), dec!(89.775));
        assert_eq!(summary.grand_total.amount(), dec!(562.275));
        assert_eq!(summary.grand_total.rounded(), dec!(562.28));
        assert!(summary.has_discount());
    }

    #[test]
    fn test_tax_exempt_has_no_tva() {
        let summary = calculate(&two_lines(), pct(10), DocumentKind::TaxExempt).unwrap();

        assert!(summary.tax_rate.is_zero());
        assert!(summary.tax_amount.is_zero());
        assert_eq!(summary.grand_total, summary.net_subtotal);
        assert_eq!(summary.grand_total.amount(), dec!(472.5));
    }

    #[test]
    fn test_no_discount() {
        let summary = calculate(&two_lines(), Percentage::zero(), DocumentKind::Quote).unwrap();

        assert!(!summary.has_discount());
        assert!(summary.discount_amount.is_zero());
        assert_eq!(summary.net_subtotal, summary.subtotal);
        assert_eq!(summary.tax_amount.amount(), dec!(99.75));
        assert_eq!(summary.grand_total.amount(), dec!(624.75));
    }

    #[test]
    fn test_full_discount_gives_zero_total() {
        let summary = calculate(&two_lines(), pct(100), DocumentKind::Invoice).unwrap();
        assert!(summary.net_subtotal.is_zero());
        assert!(summary.grand_total.is_zero());
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let items = vec![
            LineItem::new("X", "Câble", dec!(2.5), Money::new(dec!(12.40)), pct(5)),
            LineItem::new("Y", "Prise", dec!(7), Money::new(dec!(3.33)), Percentage::zero()),
            LineItem::new("Z", "Disjoncteur", dec!(0), Money::from_units(80), Percentage::zero()),
        ];
        let summary = calculate(&items, Percentage::zero(), DocumentKind::Proforma).unwrap();
        let expected = Money::checked_sum(items.iter().map(|i| i.line_total().unwrap()));
        assert_eq!(Some(summary.subtotal), expected);
        assert_eq!(summary.net_subtotal + summary.tax_amount, summary.grand_total);
    }

    #[test]
    fn test_empty_document_rejected() {
        let err = calculate(&[], Percentage::zero(), DocumentKind::Invoice).unwrap_err();
        assert!(matches!(err, CoreError::EmptyDocument));
    }

    #[test]
    fn test_negative_values_rejected() {
        let items = vec![LineItem::new(
            "A",
            "Onduleur",
            dec!(-1),
            Money::from_units(100),
            Percentage::zero(),
        )];
        let err = calculate(&items, Percentage::zero(), DocumentKind::Invoice).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Negative { ref field }) if field == "quantity"
        ));

        let items = vec![LineItem::new(
            "A",
            "Onduleur",
            dec!(1),
            Money::from_units(-100),
            Percentage::zero(),
        )];
        assert!(calculate(&items, Percentage::zero(), DocumentKind::Invoice).is_err());
    }

    #[test]
    fn test_huge_quantity_is_out_of_range() {
        let items = vec![LineItem::new(
            "A",
            "Onduleur",
            Decimal::MAX,
            Money::from_units(100),
            Percentage::zero(),
        )];
        let err = calculate(&items, Percentage::zero(), DocumentKind::Invoice).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "line total"
        ));
    }

    #[test]
    fn test_overflowing_subtotal_is_out_of_range() {
        let line = LineItem::new("A", "Onduleur", Decimal::ONE, Money::new(Decimal::MAX), Percentage::zero());
        let err = calculate(&[line.clone(), line], Percentage::zero(), DocumentKind::Quote).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "subtotal"
        ));
    }

    #[test]
    fn test_overflowing_tax_is_out_of_range() {
        let line = LineItem::new("A", "Onduleur", Decimal::ONE, Money::new(Decimal::MAX), Percentage::zero());
        let err = calculate(&[line.clone()], Percentage::zero(), DocumentKind::Invoice).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "grand total"
        ));

        let summary = calculate(&[line], Percentage::zero(), DocumentKind::TaxExempt).unwrap();
        assert_eq!(summary.grand_total, Money::new(Decimal::MAX));
    }

    #[test]
    fn test_tax_rate_for_kinds() {
        for kind in DocumentKind::ALL {
            let expected = if kind == DocumentKind::TaxExempt { 0 } else { 19 };
            assert_eq!(tax_rate_for(kind), pct(expected));
        }
    }
}
