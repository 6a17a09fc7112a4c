use super::{Diagnostics, FieldPath, OutputFormat, Record, resolve};
use compact_str::CompactString;
use core::str::FromStr;
use std::collections::HashSet;

/// The field filled in by the optional LFS enrichment.
pub const ENRICHMENT_FIELD: &str = "lfs";

const NAME: &str = "name";
const FULL_NAME: &str = "full_name";
const OWNER: &str = "owner";

const LIST_DEFAULTS: &[&str] = &[NAME, "size", ENRICHMENT_FIELD];

const CSV_DEFAULTS: &[&str] = &[
    OWNER,
    NAME,
    "description",
    "created",
    "updated",
    "pushed",
    "forks",
    "stars",
    "watchers",
    "subscribers",
    "size",
    ENRICHMENT_FIELD,
];

/// A field as the caller named it, plus where to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: CompactString,
    path: FieldPath,
}

impl Field {
    pub fn parse(text: &str) -> crate::Result<Self> {
        let text = text.trim();
        Ok(Self {
            name: text.into(),
            path: FieldPath::parse(text)?,
        })
    }

    fn builtin(name: &'static str) -> Self {
        Self {
            name: name.into(),
            path: FieldPath::from_static(name),
        }
    }

    /// The literal text the field was requested with; used as the projection key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(|e| e.to_string())
    }
}

/// Parse a comma-separated list of fields.
pub fn parse_field_list(text: &str) -> crate::Result<Vec<Field>> {
    text.split(',').map(Field::parse).collect()
}

/// Which fields end up in each projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    /// These fields, in this order.
    Fields(Vec<Field>),

    /// Every top-level key of each record, in the record's own order.
    AllFields,
}

impl FieldSelection {
    /// The fixed field list, if there is one.
    #[must_use]
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            Self::Fields(fields) => Some(fields),
            Self::AllFields => None,
        }
    }

    /// Pick the field that identifies each repository, adding it up front if the list lacks one.
    pub fn ensure_id_field(&mut self, multi_owner: bool) -> &'static str {
        let default = if multi_owner { FULL_NAME } else { NAME };
        let Self::Fields(fields) = self else {
            return default;
        };

        for candidate in [FULL_NAME, NAME] {
            if fields.iter().any(|field| field.name() == candidate) {
                return candidate;
            }
        }

        fields.insert(0, Field::builtin(default));
        default
    }
}

/// Decide which fields to show.
///
/// Explicit fields win. Without them JSON shows everything and the other formats use a fixed
/// default list, trimmed of `lfs` when enrichment is off and naming repositories by `full_name`
/// when they span several owners.
pub fn select_fields(
    explicit: Option<Vec<Field>>,
    format: OutputFormat,
    multi_owner: bool,
    enrichment_enabled: bool,
    diagnostics: &mut dyn Diagnostics,
) -> FieldSelection {
    if let Some(fields) = explicit.filter(|fields| !fields.is_empty()) {
        if !enrichment_enabled && fields.iter().any(|field| field.name() == ENRICHMENT_FIELD) {
            diagnostics.warn("the 'lfs' field was requested but LFS sizes are only collected with --lfs, so it will be empty");
        }
        return FieldSelection::Fields(fields);
    }

    let defaults = match format {
        OutputFormat::Json => return FieldSelection::AllFields,
        OutputFormat::Csv => CSV_DEFAULTS,
        OutputFormat::List | OutputFormat::Table => LIST_DEFAULTS,
    };

    let owner_shown = defaults.contains(&OWNER) || defaults.contains(&FULL_NAME);
    let fields = defaults
        .iter()
        .copied()
        .filter(|name| enrichment_enabled || *name != ENRICHMENT_FIELD)
        .map(|name| if multi_owner && !owner_shown && name == NAME { FULL_NAME } else { name })
        .map(Field::builtin)
        .collect();

    FieldSelection::Fields(fields)
}

/// Whether the records belong to more than one owner.
#[must_use]
pub fn has_multiple_owners(records: &[Record]) -> bool {
    let owner = FieldPath::from_static(OWNER);
    let mut seen = HashSet::new();

    for record in records {
        if let Some(login) = resolve(record, &owner, false).non_null() {
            let _ = seen.insert(login.to_string());
            if seen.len() > 1 {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::record_from_json;
    use serde_json::json;

    fn names(selection: &FieldSelection) -> Vec<&str> {
        selection.fields().unwrap().iter().map(Field::name).collect()
    }

    fn select(format: OutputFormat, multi_owner: bool, enrichment: bool) -> FieldSelection {
        let mut warnings: Vec<String> = Vec::new();
        let selection = select_fields(None, format, multi_owner, enrichment, &mut warnings);
        assert!(warnings.is_empty());
        selection
    }

    #[test]
    fn test_field_keeps_literal_name() {
        let field = Field::parse("stars").unwrap();
        assert_eq!(field.name(), "stars");
        assert_eq!(field.path(), &FieldPath::Simple("stars".into()));

        let field = Field::parse(" owner__login ").unwrap();
        assert_eq!(field.name(), "owner__login");
        assert_eq!(field.path(), &FieldPath::Dotted(vec!["owner".into(), "login".into()]));
    }

    #[test]
    fn test_field_from_str_reports_message() {
        let err = "owner__".parse::<Field>().unwrap_err();
        assert!(err.contains("non-empty"), "{err}");
    }

    #[test]
    fn test_parse_field_list() {
        let fields = parse_field_list("name,stars, owner__login").unwrap();
        let names: Vec<_> = fields.iter().map(Field::name).collect();
        assert_eq!(names, ["name", "stars", "owner__login"]);

        let _ = parse_field_list("name,,size").unwrap_err();
    }

    #[test]
    fn test_list_and_table_defaults() {
        for format in [OutputFormat::List, OutputFormat::Table] {
            assert_eq!(names(&select(format, false, true)), ["name", "size", "lfs"]);
            assert_eq!(names(&select(format, false, false)), ["name", "size"]);
        }
    }

    #[test]
    fn test_csv_defaults() {
        assert_eq!(
            names(&select(OutputFormat::Csv, false, true)),
            [
                "owner",
                "name",
                "description",
                "created",
                "updated",
                "pushed",
                "forks",
                "stars",
                "watchers",
                "subscribers",
                "size",
                "lfs"
            ]
        );
        assert!(!names(&select(OutputFormat::Csv, false, false)).contains(&"lfs"));
    }

    #[test]
    fn test_json_defaults_to_all_fields() {
        assert_eq!(select(OutputFormat::Json, false, false), FieldSelection::AllFields);
        assert_eq!(select(OutputFormat::Json, true, true), FieldSelection::AllFields);
    }

    #[test]
    fn test_multi_owner_uses_full_name() {
        assert_eq!(names(&select(OutputFormat::Table, true, false)), ["full_name", "size"]);
    }

    #[test]
    fn test_multi_owner_csv_keeps_name_since_owner_is_shown() {
        let selection = select(OutputFormat::Csv, true, false);
        let names = names(&selection);
        assert!(names.contains(&"name"));
        assert!(!names.contains(&"full_name"));
    }

    #[test]
    fn test_explicit_fields_are_verbatim() {
        let explicit = parse_field_list("stars,name,stars").unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let selection = select_fields(Some(explicit), OutputFormat::Json, true, false, &mut warnings);
        assert_eq!(names(&selection), ["stars", "name", "stars"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_explicit_fields_fall_back_to_defaults() {
        let mut warnings: Vec<String> = Vec::new();
        let selection = select_fields(Some(Vec::new()), OutputFormat::List, false, false, &mut warnings);
        assert_eq!(names(&selection), ["name", "size"]);
    }

    #[test]
    fn test_explicit_lfs_without_enrichment_warns_and_keeps_field() {
        let explicit = parse_field_list("name,lfs").unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let selection = select_fields(Some(explicit), OutputFormat::List, false, false, &mut warnings);
        assert_eq!(names(&selection), ["name", "lfs"]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("lfs"));
    }

    #[test]
    fn test_explicit_lfs_with_enrichment_does_not_warn() {
        let explicit = parse_field_list("name,lfs").unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let _ = select_fields(Some(explicit), OutputFormat::List, false, true, &mut warnings);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_ensure_id_field_prefers_full_name() {
        let mut selection = FieldSelection::Fields(parse_field_list("size,name,full_name").unwrap());
        assert_eq!(selection.ensure_id_field(false), "full_name");
        assert_eq!(names(&selection), ["size", "name", "full_name"]);
    }

    #[test]
    fn test_ensure_id_field_uses_existing_name() {
        let mut selection = FieldSelection::Fields(parse_field_list("size,name").unwrap());
        assert_eq!(selection.ensure_id_field(true), "name");
        assert_eq!(names(&selection), ["size", "name"]);
    }

    #[test]
    fn test_ensure_id_field_inserts_default() {
        let mut selection = FieldSelection::Fields(parse_field_list("size").unwrap());
        assert_eq!(selection.ensure_id_field(false), "name");
        assert_eq!(names(&selection), ["name", "size"]);

        let mut selection = FieldSelection::Fields(parse_field_list("size").unwrap());
        assert_eq!(selection.ensure_id_field(true), "full_name");
        assert_eq!(names(&selection), ["full_name", "size"]);
    }

    #[test]
    fn test_ensure_id_field_all_fields() {
        let mut selection = FieldSelection::AllFields;
        assert_eq!(selection.ensure_id_field(true), "full_name");
        assert_eq!(selection, FieldSelection::AllFields);
    }

    #[test]
    fn test_has_multiple_owners() {
        let alice = record_from_json(json!({"owner": {"login": "alice"}})).unwrap();
        let alice_again = record_from_json(json!({"owner": {"login": "alice"}, "name": "x"})).unwrap();
        let bob = record_from_json(json!({"owner": {"login": "bob"}})).unwrap();
        let orphan = record_from_json(json!({"name": "orphan"})).unwrap();

        assert!(!has_multiple_owners(&[]));
        assert!(!has_multiple_owners(&[alice.clone(), alice_again, orphan.clone()]));
        assert!(has_multiple_owners(&[alice, orphan, bob]));
    }
}
