use super::{Field, Projection, Projector, Value};
use compact_str::CompactString;
use indexmap::IndexMap;

/// The label placed in the id column of the totals row.
pub const TOTALS_LABEL: &str = "Totals";

/// Running sums of numeric field values, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct Totals {
    sums: IndexMap<CompactString, Value>,
}

impl Totals {
    /// Add `value` to the sum for `field`; values that are not numbers are ignored.
    pub fn accumulate(&mut self, field: &str, value: &Value) {
        if !value.is_numeric() {
            return;
        }

        match self.sums.get_mut(field) {
            Some(sum) => *sum = add(sum, value),
            None => {
                let _ = self.sums.insert(field.into(), value.clone());
            }
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.sums.get(field)
    }

    #[must_use]
    pub fn finalize(self) -> IndexMap<CompactString, Value> {
        self.sums
    }

    /// Build the synthetic row shown after all repositories.
    #[must_use]
    pub fn into_projection(self, fields: &[Field], id_field: &str, projector: &Projector) -> Projection {
        let mut sums = self.sums;
        let mut projection = Projection::default();

        for field in fields {
            let name = field.name();
            let value = if name == id_field {
                Value::from(TOTALS_LABEL)
            } else {
                sums.swap_remove(name).unwrap_or(Value::Null)
            };

            let _ = projection.insert(name, projector.render(name, value));
        }

        projection
    }
}

fn add(sum: &Value, value: &Value) -> Value {
    match (sum, value) {
        (Value::Int(a), Value::Int(b)) => a.checked_add(*b).map_or_else(|| float_sum(sum, value), Value::Int),
        _ => float_sum(sum, value),
    }
}

fn float_sum(a: &Value, b: &Value) -> Value {
    Value::Float(a.as_f64().unwrap_or_default() + b.as_f64().unwrap_or_default())
}
