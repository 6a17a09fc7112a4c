use compact_str::CompactString;
use core::fmt::{Display, Formatter};
use ohno::bail;

/// Separator between keys of a dotted field path, e.g. `owner__login`.
pub const PATH_SEPARATOR: &str = "__";

/// Where to read a value from in a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// A single top-level key, possibly an alias.
    Simple(CompactString),

    /// A sequence of keys walked through nested records. Never subject to alias lookup.
    Dotted(Vec<CompactString>),
}

impl FieldPath {
    /// Parse a field path, rejecting empty names and empty path segments.
    pub fn parse(text: &str) -> crate::Result<Self> {
        if text.is_empty() {
            bail!("field names cannot be empty");
        }

        if !text.contains(PATH_SEPARATOR) {
            return Ok(Self::Simple(text.into()));
        }

        let keys: Vec<CompactString> = text.split(PATH_SEPARATOR).map(CompactString::from).collect();
        if keys.iter().any(CompactString::is_empty) {
            bail!("invalid field path '{text}': every segment between '{PATH_SEPARATOR}' separators must be non-empty");
        }

        Ok(Self::Dotted(keys))
    }

    /// Build a path from a built-in name, which is known to be well formed.
    pub(super) fn from_static(target: &'static str) -> Self {
        if target.contains(PATH_SEPARATOR) {
            Self::Dotted(target.split(PATH_SEPARATOR).map(CompactString::from).collect())
        } else {
            Self::Simple(target.into())
        }
    }

    /// The keys to walk, outermost first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let keys = match self {
            Self::Simple(name) => core::slice::from_ref(name),
            Self::Dotted(keys) => keys.as_slice(),
        };

        keys.iter().map(CompactString::as_str)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for (index, key) in self.keys().enumerate() {
            if index > 0 {
                f.write_str(PATH_SEPARATOR)?;
            }
            f.write_str(key)?;
        }
        Ok(())
    }
}
