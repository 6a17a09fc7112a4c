use clap::ValueEnum;
use strum::{Display, EnumIter};

/// The shape of the generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// One repository per line, or one block per repository when showing several fields
    #[default]
    List,

    /// Aligned columns under a header row
    Table,

    /// Comma-separated values with a header row
    Csv,

    /// A JSON array with one object per repository
    Json,
}

impl OutputFormat {
    /// Whether the format can represent nested records and sequences as they are.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Whether every value must be text.
    #[must_use]
    pub const fn is_flat_text(self) -> bool {
        matches!(self, Self::Csv)
    }
}
