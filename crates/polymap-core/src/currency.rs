//! Price formatting for polygon labels and list views.
//!
//! Prices are shown as whole currency units with thousands grouping,
//! matching an en-US currency format with zero fraction digits
//! (`1500` → `$1,500`). A missing price renders as zero.

use serde::{Deserialize, Serialize};

/// Currency presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Symbol placed before the amount
    pub symbol: String,
    /// Separator between groups of three digits
    pub grouping_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            grouping_separator: ',',
        }
    }
}

impl CurrencyFormat {
    /// Formats a price with zero decimal places.
    ///
    /// Rounds half away from zero. `None` and non-finite values render as zero.
    pub fn format(&self, price: Option<f64>) -> String {
        let value = price.filter(|p| p.is_finite()).unwrap_or(0.0).round();
        let digits = format!("{:.0}", value.abs());
        let grouped = group_digits(&digits, self.grouping_separator);

        if value < 0.0 {
            format!("-{}{}", self.symbol, grouped)
        } else {
            format!("{}{}", self.symbol, grouped)
        }
    }
}

/// Formats a price using the default (USD) currency format.
pub fn format_price(price: Option<f64>) -> String {
    CurrencyFormat::default().format(price)
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
