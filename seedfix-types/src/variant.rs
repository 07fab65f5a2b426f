use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural dialect a seed document follows.
///
/// - nested: an outer keyed collection whose values are keyed collections; the group is the outer key
/// - flat: a single keyed collection; the group is one value per document
/// - unrecognized: neither shape was found; only the defect repair may touch the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Nested,
    Flat,
    Unrecognized,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Nested => "nested",
            Variant::Flat => "flat",
            Variant::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
