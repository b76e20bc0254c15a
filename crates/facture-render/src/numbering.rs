//! # Document Numbers
//!
//! ```text
//!   FA 24 / 03 / 1405
//!   ── ──   ──   ────
//!   │  │    │    └── hour + minute of generation
//!   │  │    └─────── month
//!   │  └──────────── 2-digit year
//!   └─────────────── DocumentKind::type_code()
//! ```
//!
//! Two documents of the same kind generated in the same minute get the
//! same number. The caller supplies the timestamp; nothing here reads
//! the clock.

use chrono::NaiveDateTime;
use facture_core::DocumentKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A generated document number such as `FA24/03/1405`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Builds the number of a `kind` document generated at `timestamp`.
    pub fn generate(kind: DocumentKind, timestamp: NaiveDateTime) -> Self {
        DocumentNumber(format!(
            "{}{}",
            kind.type_code(),
            timestamp.format("%y/%m/%H%M")
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Output file name: `<KIND>_<number with '/' → '_'>.<ext>`.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use facture_core::DocumentKind;
    /// use facture_render::DocumentNumber;
    ///
    /// let at = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap().and_hms_opt(14, 5, 0).unwrap();
    /// let number = DocumentNumber::generate(DocumentKind::TaxExempt, at);
    /// assert_eq!(number.file_name(DocumentKind::TaxExempt, "pdf"), "TAX_EXEMPT_FH24_03_1405.pdf");
    /// ```
    pub fn file_name(&self, kind: DocumentKind, ext: &str) -> String {
        format!(
            "{}_{}.{}",
            kind.file_prefix(),
            self.0.replace('/', "_"),
            ext.trim_start_matches('.')
        )
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
