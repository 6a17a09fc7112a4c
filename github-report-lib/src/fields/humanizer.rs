use super::Value;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local};
use core::fmt::Write;
use ohno::bail;

const BYTE_SIZE_FIELDS: &[&str] = &["size", "lfs"];
const COUNT_FIELDS: &[&str] = &[
    "forks_count",
    "stargazers_count",
    "watchers_count",
    "subscribers_count",
    "open_issues_count",
];
const TIMESTAMP_FIELDS: &[&str] = &["created_at", "updated_at", "pushed_at"];

/// GitHub reports `size` in KiB while LFS sizes are summed in bytes.
const KIB_FIELD: &str = "size";

const BINARY_UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Turns raw field values into text meant for people.
#[derive(Debug, Clone)]
pub struct Humanizer {
    thousands_separator: char,
    datetime_format: String,
    offset: Option<FixedOffset>,
}

impl Humanizer {
    /// Create a humanizer, checking that `datetime_format` is a valid strftime pattern.
    pub fn new(thousands_separator: char, datetime_format: &str) -> crate::Result<Self> {
        if datetime_format.is_empty() {
            bail!("the datetime format cannot be empty");
        }

        if StrftimeItems::new(datetime_format).any(|item| matches!(item, Item::Error)) {
            bail!("invalid datetime format '{datetime_format}'");
        }

        Ok(Self {
            thousands_separator,
            datetime_format: datetime_format.to_string(),
            offset: None,
        })
    }

    /// Show timestamps at a fixed offset instead of in the local time zone.
    #[must_use]
    pub const fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The display text for `value`, or `None` when `canonical` has no transform or the value
    /// does not have the type the transform expects.
    #[must_use]
    pub fn humanize(&self, canonical: &str, value: &Value) -> Option<String> {
        if BYTE_SIZE_FIELDS.contains(&canonical) {
            let bytes = value.as_f64()?;
            Some(natural_size(if canonical == KIB_FIELD { bytes * 1024.0 } else { bytes }))
        } else if COUNT_FIELDS.contains(&canonical) {
            value.is_numeric().then(|| group_thousands(&value.to_string(), self.thousands_separator))
        } else if TIMESTAMP_FIELDS.contains(&canonical) {
            self.timestamp(value.as_str()?)
        } else {
            None
        }
    }

    fn timestamp(&self, text: &str) -> Option<String> {
        let parsed = DateTime::parse_from_rfc3339(text).ok()?;
        let items = StrftimeItems::new(&self.datetime_format);

        let mut out = String::new();
        let written = match self.offset {
            Some(offset) => write!(out, "{}", parsed.with_timezone(&offset).format_with_items(items)),
            None => write!(out, "{}", parsed.with_timezone(&Local).format_with_items(items)),
        };

        written.ok().map(|()| out)
    }
}

fn natural_size(bytes: f64) -> String {
    if bytes.abs() < 1024.0 {
        return if (bytes - 1.0).abs() < f64::EPSILON {
            "1 Byte".to_string()
        } else {
            format!("{bytes} Bytes")
        };
    }

    let mut scaled = bytes / 1024.0;
    let mut unit = BINARY_UNITS[0];
    for &next in &BINARY_UNITS[1..] {
        if scaled.abs() < 1024.0 {
            break;
        }
        scaled /= 1024.0;
        unit = next;
    }

    format!("{scaled:.2} {unit}")
}

/// Insert `separator` between groups of three digits in the integer part of a decimal number.
fn group_thousands(number: &str, separator: char) -> String {
    let (sign, unsigned) = number.strip_prefix('-').map_or(("", number), |rest| ("-", rest));
    let (integer, fraction) = unsigned.split_once('.').map_or((unsigned, None), |(i, f)| (i, Some(f)));

    if !integer.bytes().all(|b| b.is_ascii_digit()) {
        return number.to_string();
    }

    let mut grouped = String::with_capacity(number.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    grouped
}
