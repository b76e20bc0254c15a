//! # Number Formatting
//!
//! Explicit formatting configuration handed to the renderer.
//!
//! Nothing here reads the process locale: two renderers with different
//! configs can run side by side and always print the same thing.
//!
//! ```rust
//! use facture_core::{FormatConfig, Money};
//! use rust_decimal::Decimal;
//!
//! let fmt = FormatConfig::default();
//! assert_eq!(fmt.format_amount(Money::new(Decimal::new(123456789, 2))), "1 234 567,89");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{Money, Percentage};
use crate::DEFAULT_CURRENCY;

/// Separators and currency used when printing numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub decimal_separator: String,
    pub thousands_separator: String,
    /// Suffix of the amount in words ("DINARS").
    pub currency: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            decimal_separator: ",".to_string(),
            thousands_separator: " ".to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl FormatConfig {
    /// Two decimals, grouped thousands, rounded half away from zero.
    pub fn format_amount(&self, money: Money) -> String {
        let rounded = money.rounded();
        let plain = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{}{}{}{}",
            sign,
            self.group_thousands(int_part),
            self.decimal_separator,
            frac_part
        )
    }

    /// Quantities print as typed, without trailing zeros ("5", "2,5").
    pub fn format_quantity(&self, quantity: Decimal) -> String {
        self.format_plain(quantity)
    }

    /// Percentages print without trailing zeros ("10", "12,5").
    pub fn format_percentage(&self, percentage: Percentage) -> String {
        self.format_plain(percentage.value())
    }

    fn format_plain(&self, value: Decimal) -> String {
        value
            .normalize()
            .to_string()
            .replace('.', &self.decimal_separator)
    }

    fn group_thousands(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3 * self.thousands_separator.len());
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(&self.thousands_separator);
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount_grouping() {
        let fmt = FormatConfig::default();
        assert_eq!(fmt.format_amount(Money::new(dec!(1234567.891))), "1 234 567,89");
        assert_eq!(fmt.format_amount(Money::new(dec!(562.275))), "562,28");
        assert_eq!(fmt.format_amount(Money::from_units(1000)), "1 000,00");
        assert_eq!(fmt.format_amount(Money::from_units(100000)), "100 000,00");
        assert_eq!(fmt.format_amount(Money::zero()), "0,00");
    }

    #[test]
    fn test_format_amount_negative() {
        let fmt = FormatConfig::default();
        assert_eq!(fmt.format_amount(Money::new(dec!(-1500.5))), "-1 500,50");
        assert_eq!(fmt.format_amount(Money::new(dec!(-0.001))), "0,00");
    }

    #[test]
    fn test_custom_separators() {
        let fmt = FormatConfig {
            decimal_separator: ".".to_string(),
            thousands_separator: ",".to_string(),
            currency: "DZD".to_string(),
        };
        assert_eq!(fmt.format_amount(Money::new(dec!(1234.5))), "1,234.50");
        assert_eq!(fmt.format_quantity(dec!(2.50)), "2.5");
    }

    #[test]
    fn test_format_quantity_and_percentage() {
        let fmt = FormatConfig::default();
        assert_eq!(fmt.format_quantity(dec!(5)), "5");
        assert_eq!(fmt.format_quantity(dec!(5.0)), "5");
        assert_eq!(fmt.format_quantity(dec!(2.50)), "2,5");
        assert_eq!(fmt.format_percentage(Percentage::new(dec!(12.50)).unwrap()), "12,5");
        assert_eq!(fmt.format_percentage(Percentage::from_units(19).unwrap()), "19");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let fmt: FormatConfig = serde_json::from_str(r#"{"currency":"EUROS"}"#).unwrap();
        assert_eq!(fmt.currency, "EUROS");
        assert_eq!(fmt.decimal_separator, ",");
    }
}
