//! Monetary parsing, rounding and formatting shared by extraction and journals.
//!
//! Amounts use the regional format found on the invoices: dot or space as
//! thousands separator, comma as decimal separator ("1.234,50", "377 600").

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Keep only the characters that can belong to an amount (digits, comma, dot).
///
/// Drops spaces, non-breaking spaces and currency symbols.
pub fn clean_amount_token(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect()
}

/// Parse a regional amount such as "1.234,50" or "57 600 FCFA".
///
/// Dots are thousands separators and the first comma is the decimal separator.
/// Returns `None` when nothing numeric is left, never zero.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = clean_amount_token(s).chars().filter(|c| *c != '.').collect();

    let mut parts = cleaned.split(',');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    let normalized = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    };

    Decimal::from_str(&normalized).ok()
}

/// Round to the nearest whole currency unit, halves away from zero.
pub fn round_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with space-grouped thousands ("377 600", "1 234,50").
///
/// Decimals are only shown when the amount has a fractional part.
pub fn format_amount(amount: Decimal) -> String {
    let amount = round_cents(amount);
    let negative = amount.is_sign_negative() && !amount.is_zero();
    let s = if amount.fract().is_zero() {
        format!("{}", amount.abs().trunc())
    } else {
        format!("{:.2}", amount.abs())
    };

    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (s.as_str(), None),
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if negative {
        formatted.push('-');
    }
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    match decimal_part {
        Some(d) => format!("{},{}", formatted, d),
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.234,50"), Some(dec("1234.50")));
        assert_eq!(parse_amount("377 600"), Some(dec("377600")));
        assert_eq!(parse_amount("57\u{00a0}600 FCFA"), Some(dec("57600")));
        assert_eq!(parse_amount("118.000"), Some(dec("118000")));
        assert_eq!(parse_amount("12,5"), Some(dec("12.5")));
        assert_eq!(parse_amount(",50"), Some(dec("0.50")));
    }

    #[test]
    fn test_parse_amount_rejects_non_numbers() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("FCFA"), None);
        assert_eq!(parse_amount(". ,"), None);
        assert_eq!(parse_amount("99999999999999999999999999999999"), None);
    }

    #[test]
    fn test_round_unit() {
        assert_eq!(round_unit(dec("100000.4")), dec("100000"));
        assert_eq!(round_unit(dec("17999.5")), dec("18000"));
        assert_eq!(round_cents(dec("0.125")), dec("0.13"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("377600")), "377 600");
        assert_eq!(format_amount(dec("1234.5")), "1 234,50");
        assert_eq!(format_amount(dec("12345678.90")), "12 345 678,90");
        assert_eq!(format_amount(dec("-600")), "-600");
        assert_eq!(format_amount(Decimal::ZERO), "0");
    }
}
