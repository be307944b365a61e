use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// how money amounts are shown to staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// ISO 4217 code
    pub code: String,
    pub symbol: String,
    pub decimal_places: u32,
    pub thousands_separator: char,
}

impl CurrencyFormat {
    /// Ghana cedi, as rendered by the en-GH locale
    pub fn ghana_cedi() -> Self {
        Self {
            code: "GHS".to_string(),
            symbol: "GH₵".to_string(),
            decimal_places: 2,
            thousands_separator: ',',
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::ghana_cedi()
    }
}

/// format an amount with symbol, grouping and fixed decimals, e.g. `GH₵1,234.50`
pub fn format_money(amount: Money, format: &CurrencyFormat) -> String {
    let rounded = amount.as_decimal().round_dp(format.decimal_places);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let digits = format!("{:.*}", format.decimal_places as usize, rounded.abs());

    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(format.thousands_separator);
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{sign}{}{grouped}.{f}", format.symbol),
        None => format!("{sign}{}{grouped}", format.symbol),
    }
}

/// format a rate as a percentage with the given decimals, e.g. `15.00%`
pub fn format_percentage(rate: Rate, decimal_places: u32) -> String {
    let value = rate.as_percentage().round_dp(decimal_places);
    format!("{:.*}%", decimal_places as usize, value)
}
