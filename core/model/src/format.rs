//! FILENAME: core/model/src/format.rs
//! PURPOSE: Value formatting for table display.
//! CONTEXT: The core hands renderers raw values plus a per-column hint; this
//! module is the reference implementation of those hints for text renderers.

use serde::{Deserialize, Serialize};

use crate::record::FieldValue;

/// Per-column formatting hint carried in the table metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatHint {
    /// General formatting: integers without decimals, text as-is.
    Plain,
    /// Dollar amount with thousands separators.
    Currency,
    /// Fixed number of decimal places.
    FixedDecimal(u8),
}

/// Formats a single value according to a column hint.
///
/// Missing values render as the empty string in every format.
pub fn format_value(value: &FieldValue, hint: FormatHint) -> String {
    let number = match value {
        FieldValue::Empty => return String::new(),
        FieldValue::Text(s) => return s.clone(),
        FieldValue::Number(n) => *n,
    };

    match hint {
        FormatHint::Plain => format_general(number),
        FormatHint::Currency => format_currency(number),
        FormatHint::FixedDecimal(places) => {
            format!("{:.prec$}", number, prec = places as usize)
        }
    }
}

/// Format a number in general format (no unnecessary decimal places).
fn format_general(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Format a number as a whole-dollar amount.
fn format_currency(value: f64) -> String {
    let formatted = add_thousands_separator(&format!("{:.0}", value.abs()));
    if value < 0.0 {
        format!("(${})", formatted)
    } else {
        format!("${}", formatted)
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let parts: Vec<&str> = s.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1);

    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
