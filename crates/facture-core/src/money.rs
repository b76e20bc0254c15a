//! # Money Module
//!
//! Provides the `Money` and `Percentage` types for handling amounts safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    472.5 × 0.19 = 89.77499999999999  ❌ rounds to 89.77                 │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals, rounded only when printed              │
//! │    472.5 × 0.19 = 89.775 exactly     ✅ rounds to 89.78                 │
//! │                                                                         │
//! │  NET HT + TVA == NET A PAYER holds exactly, not "almost".               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use facture_core::money::{Money, Percentage};
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_units(250);
//! let line = price.times(Decimal::ONE).unwrap().less_percent(Percentage::from_units(10).unwrap());
//! assert_eq!(line, Money::from_units(225));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::ValidationError;

/// Number of decimals printed for every amount.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the document currency (dinars).
///
/// ## Design Decisions
/// - **Decimal inside**: exact for every value typed on a form
/// - **Unrounded**: intermediate results keep full precision
/// - **Rounded on display**: see [`Money::rounded`]
///
/// ## Where Money is Used
/// ```text
/// Item.unit_price ──► LineItem.line_total ──► subtotal ──► discount_amount
///                                                   │
///                                                   ▼
///                         net_subtotal ──► tax_amount ──► grand_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(1500).to_string(), "1500.00");
    /// ```
    #[inline]
    pub fn from_units(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies money by a (possibly fractional) quantity.
    ///
    /// Returns `None` when the product does not fit in a `Decimal`.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let unit_price = Money::from_units(100);
    /// assert_eq!(unit_price.times(Decimal::from(3)), Some(Money::from_units(300)));
    /// assert_eq!(unit_price.times(Decimal::MAX), None);
    /// ```
    #[inline]
    pub fn times(&self, quantity: Decimal) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Sums amounts, `None` as soon as the running total overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }

    /// Returns `rate` percent of this amount, unrounded.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::{Money, Percentage};
    /// use rust_decimal::Decimal;
    ///
    /// let net = Money::new(Decimal::new(4725, 1)); // 472.5
    /// let tva = net.percent(Percentage::from_units(19).unwrap());
    /// assert_eq!(tva.amount(), Decimal::new(89775, 3)); // 89.775
    /// ```
    pub fn percent(&self, rate: Percentage) -> Money {
        // fraction is within 0..=1, the product never exceeds self
        Money(self.0 * rate.fraction())
    }

    /// Returns this amount reduced by `rate` percent.
    pub fn less_percent(&self, rate: Percentage) -> Money {
        Money(self.0 * (Decimal::ONE - rate.fraction()))
    }

    /// Rounds to centimes, midpoint away from zero (89.775 → 89.78).
    ///
    /// Only the presentation layer calls this; stored totals stay exact.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `1234.50` rendering (no grouping, dot separator).
///
/// ## Note
/// Documents use [`crate::format::FormatConfig`] instead; this is the
/// locale-free fallback and debugging form.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage between 0 and 100 inclusive.
///
/// Used for per-line discounts, the global discount and the TVA rate.
/// The range is checked once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Creates a percentage, rejecting values outside 0–100.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::OutOfRange {
                field: "percentage".to_string(),
                min: "0".to_string(),
                max: "100".to_string(),
            });
        }
        Ok(Percentage(value))
    }

    /// Creates a percentage from a whole number of percent.
    pub fn from_units(percent: u32) -> Result<Self, ValidationError> {
        Percentage::new(Decimal::from(percent))
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(Decimal::ZERO)
    }

    /// Returns the percentage value (10 for 10%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the multiplier (0.10 for 10%).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

/// Prints without trailing zeros: `10`, `12.5`.
impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Percentage::new(value).map_err(serde::de::Error::custom)
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
    fn test_from_units() {
        let money = Money::from_units(1500);
        assert_eq!(money.amount(), dec!(1500));
        assert!(!money.is_zero());
        assert!(!money.is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(10.5)).to_string(), "10.50");
        assert_eq!(Money::new(dec!(562.275)).to_string(), "562.28");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!(a + b, Money::from_units(1500));
        assert_eq!(a - b, Money::from_units(500));

        let mut c = a;
        c += b;
        c -= Money::from_units(100);
        assert_eq!(c, Money::from_units(1400));

        assert_eq!(Money::checked_sum([a, b]), Some(Money::from_units(1500)));
    }

    #[test]
    fn test_overflow_is_reported() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.times(dec!(2)), None);
        assert_eq!(max.checked_add(Money::from_units(1)), None);
        assert_eq!(Money::checked_sum([max, max]), None);
        assert_eq!(max.times(Decimal::ONE), Some(max));
    }

    #[test]
    fn test_percent_of_max_does_not_overflow() {
        let max = Money::new(Decimal::MAX);
        assert!(max.percent(Percentage::from_units(19).unwrap()) < max);
        assert_eq!(max.less_percent(Percentage::zero()), max);
    }

    #[test]
    fn test_percent_is_exact() {
        let net = Money::new(dec!(472.5));
        let tva = net.percent(Percentage::from_units(19).unwrap());
        assert_eq!(tva.amount(), dec!(89.775));
    }

    #[test]
    fn test_less_percent() {
        let gross = Money::from_units(250);
        let net = gross.less_percent(Percentage::from_units(10).unwrap());
        assert_eq!(net, Money::from_units(225));
    }

    #[test]
    fn test_rounding_midpoint_away_from_zero() {
        assert_eq!(Money::new(dec!(89.775)).rounded(), dec!(89.78));
        assert_eq!(Money::new(dec!(89.774)).rounded(), dec!(89.77));
        assert_eq!(Money::new(dec!(0.005)).rounded(), dec!(0.01));
    }

    #[test]
    fn test_negative_check() {
        assert!(Money::new(dec!(-0.01)).is_negative());
        assert!(!Money::zero().is_negative());
    }

    #[test]
    fn test_percentage_range() {
        assert!(Percentage::new(dec!(0)).is_ok());
        assert!(Percentage::new(dec!(100)).is_ok());
        assert!(Percentage::new(dec!(12.5)).is_ok());
        assert!(Percentage::new(dec!(-1)).is_err());
        assert!(Percentage::new(dec!(100.01)).is_err());
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::new(dec!(10.00)).unwrap().to_string(), "10");
        assert_eq!(Percentage::new(dec!(12.50)).unwrap().to_string(), "12.5");
        assert_eq!(Percentage::zero().to_string(), "0");
    }

    #[test]
    fn test_percentage_fraction() {
        assert_eq!(Percentage::from_units(19).unwrap().fraction(), dec!(0.19));
    }

    #[test]
    fn test_percentage_deserialize_rejects_out_of_range() {
        let ok: Percentage = serde_json::from_str("\"15\"").unwrap();
        assert_eq!(ok.value(), dec!(15));
        assert!(serde_json::from_str::<Percentage>("\"150\"").is_err());
    }
}
