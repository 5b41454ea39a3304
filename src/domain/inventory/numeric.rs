//! Locale-tolerant numeric parsing for spreadsheet cells.

use serde_json::Value;

/// Outcome of reading a numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericField {
    /// A finite number was read.
    Present(f64),
    /// The cell is absent, null or blank.
    Missing,
    /// The cell holds something that is not a number.
    Invalid,
}

impl NumericField {
    /// Reads a JSON cell. Booleans, arrays and objects are invalid.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => NumericField::Missing,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() => NumericField::Present(v),
                _ => NumericField::Invalid,
            },
            Some(Value::String(s)) if s.trim().is_empty() => NumericField::Missing,
            Some(Value::String(s)) => match parse_locale_number(s) {
                Some(v) => NumericField::Present(v),
                None => NumericField::Invalid,
            },
            Some(_) => NumericField::Invalid,
        }
    }

}

/// Parses numbers written with either decimal convention.
///
/// Accepts `1234.5`, `1234,5`, `1.234,50`, `1,234.50`, `$ 1 234` and
/// similar. When both separators appear the last one is the decimal mark;
/// a separator that repeats is a thousands separator. Returns `None` for
/// anything that does not end up as a finite number.
pub fn parse_locale_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ' ' | '\u{a0}' | '\'' | '_'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let commas = cleaned.matches(',').count();
    let dots = cleaned.matches('.').count();

    let normalized = match (commas, dots) {
        (0, 0) => cleaned,
        (_, 0) if commas == 1 => cleaned.replace(',', "."),
        (_, 0) => cleaned.replace(',', ""),
        (0, 1) => cleaned,
        (0, _) => cleaned.replace('.', ""),
        _ => {
            let last_comma = cleaned.rfind(',')?;
            let last_dot = cleaned.rfind('.')?;
            if last_comma > last_dot {
                cleaned.replace('.', "").replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
