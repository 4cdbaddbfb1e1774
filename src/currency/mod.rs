//! Currency codes and amount rendering. Amounts are integers in minor units.

use serde::{Deserialize, Serialize};

use crate::format::Locale;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> String {
        symbol_for(self.as_str())
    }

    pub fn minor_units(&self) -> u8 {
        minor_units_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("KRW")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub locale: Locale,
    pub currency: CurrencyCode,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub currency_display: CurrencyDisplay,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Ko,
            currency: CurrencyCode::default(),
            decimal_separator: '.',
            grouping_separator: ',',
            currency_display: CurrencyDisplay::Symbol,
        }
    }
}

impl LocaleConfig {
    pub fn new(locale: Locale, currency: CurrencyCode) -> Self {
        Self {
            locale,
            currency,
            ..Self::default()
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "KRW" => "₩".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "KRW" | "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Groups the integer part of `amount` and inserts the decimal separator
/// according to the currency's minor units.
pub fn format_number(locale: &LocaleConfig, amount: u64) -> String {
    let precision = u32::from(locale.currency.minor_units());
    let divisor = 10u64.pow(precision);
    let whole = group_digits(&(amount / divisor).to_string(), locale.grouping_separator);
    if precision == 0 {
        return whole;
    }
    format!(
        "{}{}{:0width$}",
        whole,
        locale.decimal_separator,
        amount % divisor,
        width = precision as usize
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// `₩1,234,500`, or `KRW 1,234,500` with code display.
pub fn format_amount(amount: u64, locale: &LocaleConfig) -> String {
    let body = format_number(locale, amount);
    match locale.currency_display {
        CurrencyDisplay::Symbol => format!("{}{}", locale.currency.symbol(), body),
        CurrencyDisplay::Code => format!("{} {}", locale.currency.as_str(), body),
    }
}

/// Describes the move from `previous` to `current`, e.g. `₩156,500 감소`.
pub fn format_difference(current: u64, previous: u64, locale: &LocaleConfig) -> String {
    let increased = current >= previous;
    let amount = format_amount(current.abs_diff(previous), locale);
    match (locale.locale, increased) {
        (Locale::Ko, true) => format!("{amount} 증가"),
        (Locale::Ko, false) => format!("{amount} 감소"),
        (Locale::En, true) => format!("up {amount}"),
        (Locale::En, false) => format!("down {amount}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_won_without_decimals() {
        let locale = LocaleConfig::default();
        assert_eq!(format_amount(1_234_500, &locale), "₩1,234,500");
        assert_eq!(format_amount(0, &locale), "₩0");
        assert_eq!(format_amount(999, &locale), "₩999");
    }

    #[test]
    fn formats_dollars_from_cents() {
        let locale = LocaleConfig::new(Locale::En, CurrencyCode::new("usd"));
        assert_eq!(format_amount(1_234_567, &locale), "$12,345.67");
        assert_eq!(format_amount(5, &locale), "$0.05");
    }

    #[test]
    fn code_display_prefixes_iso_code() {
        let mut locale = LocaleConfig::default();
        locale.currency_display = CurrencyDisplay::Code;
        assert_eq!(format_amount(45_000, &locale), "KRW 45,000");
    }

    #[test]
    fn difference_reports_direction() {
        let locale = LocaleConfig::default();
        assert_eq!(
            format_difference(1_234_500, 1_391_000, &locale),
            "₩156,500 감소"
        );
        let english = LocaleConfig::new(Locale::En, CurrencyCode::default());
        assert_eq!(format_difference(200, 100, &english), "up ₩100");
    }
}
