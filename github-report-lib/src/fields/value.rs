use compact_str::CompactString;
use core::cmp::Ordering;
use core::fmt::{Display, Formatter};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// One repository's metadata, keys in the order the source produced them.
pub type Record = IndexMap<String, Value>;

/// A value found in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(CompactString),
    Record(Record),
    Sequence(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "numbers are only compared and displayed, not stored back")]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Coerce to the text used by flat-text output; `Null` becomes the empty string.
    #[must_use]
    pub fn into_text(self) -> Self {
        match self {
            Self::Str(_) => self,
            Self::Null => Self::Str(CompactString::default()),
            other => Self::Str(other.to_string().into()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Str(_) => 3,
            Self::Sequence(_) => 4,
            Self::Record(_) => 5,
        }
    }

    /// Total order used when sorting records.
    ///
    /// `Null` sorts first, then booleans, numbers (integers and floats compare numerically),
    /// strings, sequences (element by element), and records, which all compare equal.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Sequence(a), Self::Sequence(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.sort_cmp(y))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }
}

/// Convert a JSON document to a record; `None` unless the document is an object.
#[must_use]
pub fn record_from_json(value: serde_json::Value) -> Option<Record> {
    match Value::from(value) {
        Value::Record(record) => Some(record),
        _ => None,
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_i64().map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(s) => Self::Str(s.into()),
            serde_json::Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => Self::Record(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::Record(_) | Self::Sequence(_) => {
                let json = serde_json::to_string(self).map_err(|_err| core::fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Record(record) => {
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order() {
        let value = Value::from(json!({"zebra": 1, "apple": 2, "mango": 3}));
        let record = value.as_record().unwrap();
        let keys: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(42)), Value::Int(42));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn test_from_json_nested() {
        let value = Value::from(json!({"owner": {"login": "alice"}, "topics": ["a", "b"]}));
        let record = value.as_record().unwrap();
        assert_eq!(record["owner"].as_record().unwrap()["login"], Value::from("alice"));
        assert_eq!(record["topics"], Value::Sequence(vec![Value::from("a"), Value::from("b")]));
    }

    #[test]
    fn test_record_from_json() {
        let record = record_from_json(json!({"name": "widget"})).unwrap();
        assert_eq!(record["name"], Value::from("widget"));
        assert!(record_from_json(json!([1, 2])).is_none());
        assert!(record_from_json(json!("text")).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::from("text").to_string(), "text");
        assert_eq!(Value::from(json!({"a": [1, null]})).to_string(), r#"{"a":[1,null]}"#);
    }

    #[test]
    fn test_into_text() {
        assert_eq!(Value::Null.into_text(), Value::from(""));
        assert_eq!(Value::Int(5).into_text(), Value::from("5"));
        assert_eq!(Value::Bool(false).into_text(), Value::from("false"));
        assert_eq!(Value::from("x").into_text(), Value::from("x"));
    }

    #[test]
    fn test_serialize_roundtrips_through_json() {
        let source = json!({"b": 1, "a": {"c": [true, 2.5, "s", null]}});
        let value = Value::from(source.clone());
        assert_eq!(serde_json::to_value(&value).unwrap(), source);
    }

    #[test]
    fn test_sort_cmp_null_first() {
        assert_eq!(Value::Null.sort_cmp(&Value::Bool(false)), Ordering::Less);
        assert_eq!(Value::Null.sort_cmp(&Value::Int(i64::MIN)), Ordering::Less);
        assert_eq!(Value::Null.sort_cmp(&Value::from("")), Ordering::Less);
        assert_eq!(Value::Null.sort_cmp(&Value::Null), Ordering::Equal);
    }

    #[test]
    fn test_sort_cmp_mixed_numbers() {
        assert_eq!(Value::Int(2).sort_cmp(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(Value::Float(3.0).sort_cmp(&Value::Int(3)), Ordering::Equal);
        assert_eq!(Value::Int(10).sort_cmp(&Value::Int(9)), Ordering::Greater);
    }

    #[test]
    fn test_sort_cmp_type_rank() {
        assert_eq!(Value::Int(1_000).sort_cmp(&Value::from("1")), Ordering::Less);
        assert_eq!(Value::from("z").sort_cmp(&Value::Sequence(vec![])), Ordering::Less);
        assert_eq!(Value::Sequence(vec![]).sort_cmp(&Value::Record(Record::new())), Ordering::Less);
        assert_eq!(Value::Bool(true).sort_cmp(&Value::Int(0)), Ordering::Less);
    }

    #[test]
    fn test_sort_cmp_sequences() {
        let short = Value::Sequence(vec![Value::Int(1)]);
        let long = Value::Sequence(vec![Value::Int(1), Value::Int(0)]);
        let bigger = Value::Sequence(vec![Value::Int(2)]);
        assert_eq!(short.sort_cmp(&long), Ordering::Less);
        assert_eq!(long.sort_cmp(&bigger), Ordering::Less);
    }
}
