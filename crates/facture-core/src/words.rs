//! # Amounts in French Words
//!
//! Spells the grand total on the "Arrêtée la présente ..." line.
//!
//! ## Orthography
//! ```text
//! 21   vingt et un          71   soixante et onze
//! 80   quatre-vingts        81   quatre-vingt-un       91  quatre-vingt-onze
//! 200  deux cents           201  deux cent un
//! 1000 mille                2000 deux mille            80 000 quatre-vingt mille
//! 10⁶  un million           2·10⁶ deux millions        10⁹ un milliard
//! ```
//! "vingts" and "cents" keep their plural only when they end the number
//! or precede million/milliard, never before "mille".

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::Money;

/// Amounts from this value up cannot be spelled.
pub const MAX_SPELLED_AMOUNT: u64 = 1_000_000_000_000;

/// An amount that cannot be written in words.
///
/// Never fatal: the renderer prints the figure instead
/// (see [`amount_in_words_or_figures`]).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("cannot spell negative amount {amount}")]
    Negative { amount: String },

    #[error("amount {amount} is too large to spell")]
    TooLarge { amount: String },
}

const UNITS: [&str; 20] = [
    "zéro", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix", "onze",
    "douze", "treize", "quatorze", "quinze", "seize", "dix-sept", "dix-huit", "dix-neuf",
];

const TENS: [&str; 7] = ["", "", "vingt", "trente", "quarante", "cinquante", "soixante"];

/// Long-scale nouns, largest first. They take an "s" in the plural.
const SCALES: [(u64, &str); 5] = [
    (1_000_000_000_000_000_000, "trillion"),
    (1_000_000_000_000_000, "billiard"),
    (1_000_000_000_000, "billion"),
    (1_000_000_000, "milliard"),
    (1_000_000, "million"),
];

// =============================================================================
// Cardinal Numbers
// =============================================================================

/// Writes `n` in French words, lower-case.
///
/// ```rust
/// use facture_core::words::cardinal;
///
/// assert_eq!(cardinal(71), "soixante et onze");
/// assert_eq!(cardinal(280_000), "deux cent quatre-vingt mille");
/// assert_eq!(cardinal(2_000_000), "deux millions");
/// ```
pub fn cardinal(n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rest = n;

    for (scale, noun) in SCALES {
        let count = rest / scale;
        rest %= scale;
        if count == 0 {
            continue;
        }
        let plural = if count > 1 { "s" } else { "" };
        parts.push(format!("{} {}{}", below_thousand(count, true), noun, plural));
    }

    let thousands = rest / 1000;
    rest %= 1000;
    match thousands {
        0 => {}
        1 => parts.push("mille".to_string()),
        _ => parts.push(format!("{} mille", below_thousand(thousands, false))),
    }

    if rest > 0 {
        parts.push(below_thousand(rest, true));
    }

    parts.join(" ")
}

/// 1..=999. `plural_ok` is false when "mille" follows.
fn below_thousand(n: u64, plural_ok: bool) -> String {
    let hundreds = n / 100;
    let rest = n % 100;

    let head = match hundreds {
        0 => return below_hundred(rest, plural_ok),
        1 => "cent".to_string(),
        h => format!("{} cent", UNITS[h as usize]),
    };

    if rest == 0 {
        if hundreds > 1 && plural_ok {
            format!("{}s", head)
        } else {
            head
        }
    } else {
        format!("{} {}", head, below_hundred(rest, plural_ok))
    }
}

/// 0..=99.
fn below_hundred(n: u64, plural_ok: bool) -> String {
    let n = n as usize;
    match n {
        0..=19 => UNITS[n].to_string(),
        20..=69 => {
            let (tens, unit) = (TENS[n / 10], n % 10);
            match unit {
                0 => tens.to_string(),
                1 => format!("{} et un", tens),
                u => format!("{}-{}", tens, UNITS[u]),
            }
        }
        70..=79 => {
            let unit = n - 60;
            if unit == 11 {
                "soixante et onze".to_string()
            } else {
                format!("soixante-{}", UNITS[unit])
            }
        }
        80 if plural_ok => "quatre-vingts".to_string(),
        80 => "quatre-vingt".to_string(),
        _ => format!("quatre-vingt-{}", UNITS[n - 80]),
    }
}

// =============================================================================
// Amounts
// =============================================================================

/// Spells an amount rounded to centimes, upper-cased, with the currency.
///
/// ```rust
/// use facture_core::words::amount_in_words;
/// use facture_core::Money;
/// use rust_decimal::Decimal;
///
/// let total = Money::new(Decimal::new(562275, 3)); // 562.275
/// assert_eq!(
///     amount_in_words(total, "DINARS").unwrap(),
///     "CINQ CENT SOIXANTE-DEUX VIRGULE VINGT-HUIT DINARS"
/// );
/// ```
pub fn amount_in_words(money: Money, currency: &str) -> Result<String, ConversionError> {
    let rounded = money.rounded();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        return Err(ConversionError::Negative {
            amount: money.to_string(),
        });
    }

    let too_large = || ConversionError::TooLarge {
        amount: money.to_string(),
    };
    let units = rounded.trunc().to_u64().ok_or_else(too_large)?;
    if units >= MAX_SPELLED_AMOUNT {
        return Err(too_large());
    }
    let centimes = ((rounded.abs() - rounded.trunc().abs()) * Decimal::ONE_HUNDRED)
        .to_u64()
        .unwrap_or(0);

    let mut words = cardinal(units);
    if centimes != 0 {
        words.push_str(" virgule ");
        words.push_str(&cardinal(centimes));
    }
    if !currency.trim().is_empty() {
        words.push(' ');
        words.push_str(currency.trim());
    }
    Ok(words.to_uppercase())
}

/// Plain figure used when the words cannot be produced ("562.28 DINARS").
pub fn amount_in_figures(money: Money, currency: &str) -> String {
    format!("{} {}", money, currency.trim().to_uppercase())
}

/// [`amount_in_words`], falling back to [`amount_in_figures`].
pub fn amount_in_words_or_figures(money: Money, currency: &str) -> String {
    amount_in_words(money, currency).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Falling back to figures for amount in words");
        amount_in_figures(money, currency)
    })
}
