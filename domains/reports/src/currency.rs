//! Currency formatting for report amounts
//!
//! Amounts render as `LKR 1,234.56`. Raw backend values that cannot be read
//! as a number fall back to whatever digits they contain, so a single bad
//! value never aborts a report.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use artmart_common::config::DEFAULT_REPORT_CURRENCY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    code: String,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_CURRENCY)
    }
}

impl CurrencyFormatter {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into().trim().to_uppercase();
        Self {
            code: if code.is_empty() {
                DEFAULT_REPORT_CURRENCY.to_string()
            } else {
                code
            },
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// `LKR 1,234.56`; negative amounts as `-LKR 1,234.56`
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        format!("{}{} {}.{}", sign, self.code, group_thousands(whole), fraction)
    }

    /// Format a raw backend amount, falling back to a best-effort string
    pub fn format_value(&self, value: &Value) -> String {
        match parse_amount(value) {
            Some(amount) => self.format(amount),
            None => {
                tracing::warn!(value = %value, "Unreadable amount in report input");
                self.best_effort(value)
            }
        }
    }

    fn best_effort(&self, value: &Value) -> String {
        let raw = match value {
            Value::String(text) => text.trim(),
            _ => "",
        };
        let negative = raw.starts_with('-');
        let digits: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        match Decimal::from_str(&digits) {
            Ok(amount) if negative => self.format(-amount),
            Ok(amount) => self.format(amount),
            Err(_) if digits.chars().any(|c| c.is_ascii_digit()) => {
                format!("{} {}", self.code, digits)
            }
            Err(_) => self.format(Decimal::ZERO),
        }
    }
}

/// Read a raw backend amount. Missing values count as zero.
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Null => Some(Decimal::ZERO),
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => {
            let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                Some(Decimal::ZERO)
            } else {
                parse_decimal(&cleaned)
            }
        }
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
