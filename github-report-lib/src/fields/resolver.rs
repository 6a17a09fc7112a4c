use super::{FieldPath, Record, Value, aliases};
use std::borrow::Cow;

/// Outcome of resolving a field path against a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    /// Some key along the path was missing or was not a record.
    Absent,

    /// The path led to this value, which may itself be `Null`.
    Present(&'a Value),
}

impl<'a> Resolved<'a> {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The value, if present and not `Null`.
    #[must_use]
    pub const fn non_null(self) -> Option<&'a Value> {
        match self {
            Self::Present(Value::Null) | Self::Absent => None,
            Self::Present(value) => Some(value),
        }
    }

    /// An owned copy, with absence mapped to `Null`.
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Absent => Value::Null,
            Self::Present(value) => value.clone(),
        }
    }
}

/// Resolve `path` against `record`.
///
/// `structured` is set for output formats that can represent nested records, in which case
/// a key holding a record is returned as-is rather than being redirected through its alias.
#[must_use]
pub fn resolve<'a>(record: &'a Record, path: &FieldPath, structured: bool) -> Resolved<'a> {
    traverse(record, &expand(record, path, structured))
}

/// Replace an alias with its canonical path when the record calls for it.
///
/// A simple name is redirected when the record lacks that key, or when the key holds a nested
/// record and the output cannot show records.
#[must_use]
pub fn expand<'p>(record: &Record, path: &'p FieldPath, structured: bool) -> Cow<'p, FieldPath> {
    if let FieldPath::Simple(name) = path
        && let Some(target) = aliases::expand(name)
    {
        let substitute = match record.get(name.as_str()) {
            None => true,
            Some(Value::Record(_)) => !structured,
            Some(_) => false,
        };

        if substitute {
            return Cow::Owned(target);
        }
    }

    Cow::Borrowed(path)
}

fn traverse<'a>(record: &'a Record, path: &FieldPath) -> Resolved<'a> {
    let mut keys = path.keys();
    let Some(mut current) = keys.next().and_then(|key| record.get(key)) else {
        return Resolved::Absent;
    };

    for key in keys {
        match current.as_record().and_then(|nested| nested.get(key)) {
            Some(value) => current = value,
            None => return Resolved::Absent,
        }
    }

    Resolved::Present(current)
}
