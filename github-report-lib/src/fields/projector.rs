use super::{FieldPath, FieldSelection, Humanizer, OutputFormat, Record, Totals, Value, aliases, resolve};
use compact_str::CompactString;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One report row: field name to rendered value, in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    values: IndexMap<CompactString, Value>,
}

impl Projection {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(CompactString::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add a field; returns `false` and keeps the first value if the field is already present.
    pub fn insert(&mut self, field: &str, value: Value) -> bool {
        if self.values.contains_key(field) {
            return false;
        }

        let _ = self.values.insert(field.into(), value);
        true
    }
}

impl<K: Into<CompactString>> FromIterator<(K, Value)> for Projection {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in &self.values {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// Turns raw records into projections for one output format.
#[derive(Debug, Clone)]
pub struct Projector {
    format: OutputFormat,
    humanizer: Option<Humanizer>,
}

impl Projector {
    #[must_use]
    pub const fn new(format: OutputFormat, humanizer: Option<Humanizer>) -> Self {
        Self { format, humanizer }
    }

    /// Project `record` onto the selected fields, feeding raw values to `totals` along the way.
    pub fn project(&self, record: &Record, selection: &FieldSelection, mut totals: Option<&mut Totals>) -> Projection {
        let mut projection = Projection::default();

        match selection {
            FieldSelection::AllFields => {
                for key in record.keys() {
                    let path = FieldPath::Simple(key.into());
                    self.project_field(record, key, &path, &mut projection, totals.as_deref_mut());
                }
            }
            FieldSelection::Fields(fields) => {
                for field in fields {
                    self.project_field(record, field.name(), field.path(), &mut projection, totals.as_deref_mut());
                }
            }
        }

        projection
    }

    fn project_field(&self, record: &Record, name: &str, path: &FieldPath, projection: &mut Projection, totals: Option<&mut Totals>) {
        if projection.get(name).is_some() {
            return;
        }

        let raw = resolve(record, path, self.format.is_structured()).to_value();
        if let Some(totals) = totals {
            totals.accumulate(name, &raw);
        }

        let _ = projection.insert(name, self.render(name, raw));
    }

    /// Apply humanization and the format's coercion rules to a raw value.
    pub(super) fn render(&self, field: &str, value: Value) -> Value {
        let value = match &self.humanizer {
            Some(humanizer) if !value.is_null() => {
                let humanized = humanizer.humanize(aliases::canonical_name(field), &value);
                humanized.map_or(value, Value::from)
            }
            _ => value,
        };

        if self.format.is_flat_text() { value.into_text() } else { value }
    }
}
