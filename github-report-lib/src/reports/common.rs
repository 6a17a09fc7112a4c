use crate::fields::{Projection, Value};
use std::borrow::Cow;

/// The text shown for a value in text layouts; `null` shows as nothing.
pub fn cell_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::Str(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Number of characters `text` occupies when printed.
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Whether every non-null value of `column` is a number, with at least one number present.
pub fn is_numeric_column(rows: &[Projection], column: &str) -> bool {
    let mut values = rows.iter().filter_map(|row| row.get(column)).filter(|value| !value.is_null()).peekable();
    values.peek().is_some() && values.all(Value::is_numeric)
}

/// Pad `text` with spaces to `width` characters.
pub fn pad(text: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}
