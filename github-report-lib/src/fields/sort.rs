use super::{FieldPath, Record, Resolved, Value, resolve};
use core::cmp::Ordering;
use core::fmt::{Display, Formatter};
use core::str::FromStr;

static NULL: Value = Value::Null;

/// The field repositories are ordered by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    path: FieldPath,
    descending: bool,
}

impl SortSpec {
    /// Parse a field path, with a leading `-` for descending order.
    pub fn parse(text: &str) -> crate::Result<Self> {
        let (descending, field) = text.strip_prefix('-').map_or((false, text), |rest| (true, rest));
        Ok(Self {
            path: FieldPath::parse(field)?,
            descending,
        })
    }

    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    #[must_use]
    pub const fn is_descending(&self) -> bool {
        self.descending
    }

    /// The value `record` is ordered by; missing fields sort as `Null`.
    #[must_use]
    pub fn key<'a>(&self, record: &'a Record) -> &'a Value {
        match resolve(record, &self.path, false) {
            Resolved::Present(value) => value,
            Resolved::Absent => &NULL,
        }
    }

    #[must_use]
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = self.key(a).sort_cmp(self.key(b));
        if self.descending { ordering.reverse() } else { ordering }
    }

    /// Reorder `records`, keeping the original order of records with equal keys.
    pub fn sort(&self, records: &mut [Record]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(|e| e.to_string())
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        write!(f, "{}", self.path)
    }
}
