//! Utility functions and helpers

use rust_decimal::Decimal;

/// Placeholder shown instead of a masked amount
pub const MASK: &str = "••••••";

/// Number formatting rules for money values
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyFormat {
    pub symbol: String,
    pub decimal_places: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl Default for MoneyFormat {
    /// Brazilian real, e.g. `R$ 1.234,56`
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_places: 2,
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
        }
    }
}

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;
    for c in s.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a money amount, e.g. `-R$ 1.234,50`
pub fn format_money(value: Decimal, format: &MoneyFormat) -> String {
    let places = format.decimal_places as usize;
    let rounded = value.round_dp(format.decimal_places).abs();
    let plain = format!("{:.*}", places, rounded);

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (plain.clone(), None),
    };

    let mut out = String::new();
    if value.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    if !format.symbol.is_empty() {
        out.push_str(&format.symbol);
        out.push(' ');
    }
    out.push_str(&format_number(int_part, &format.thousands_separator));
    if let Some(frac) = frac_part {
        out.push_str(&format.decimal_separator);
        out.push_str(&frac);
    }
    out
}

/// Generate a unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567, ","), "1,234,567");
        assert_eq!(format_number(123, "."), "123");
        assert_eq!(format_number(1000, "."), "1.000");
    }

    #[test]
    fn test_format_money_brl() {
        let format = MoneyFormat::default();
        assert_eq!(format_money(Decimal::new(17696810, 2), &format), "R$ 176.968,10");
        assert_eq!(format_money(Decimal::new(5, 1), &format), "R$ 0,50");
        assert_eq!(format_money(Decimal::ZERO, &format), "R$ 0,00");
    }

    #[test]
    fn test_format_money_negative() {
        let format = MoneyFormat::default();
        assert_eq!(format_money(Decimal::new(-123450, 2), &format), "-R$ 1.234,50");
    }

    #[test]
    fn test_format_money_rounds_to_places() {
        let format = MoneyFormat {
            symbol: "$".to_string(),
            decimal_places: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        };
        assert_eq!(format_money(Decimal::new(1234567, 3), &format), "$ 1,234.57");
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
