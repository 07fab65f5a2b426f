use crate::patterns::SLUG_LITERAL;
use seedfix_types::Variant;

/// Per-document values computed once, before any rule runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    pub variant: Variant,

    /// Capitalized form of the document's first `slug:` literal (flat documents only).
    pub default_label: Option<String>,

    /// Line terminator used when a rule inserts lines.
    pub line_ending: &'static str,
}

impl RuleContext {
    pub fn derive(text: &str, variant: Variant) -> Self {
        let default_label = match variant {
            Variant::Flat => derive_default_label(text),
            _ => None,
        };
        Self {
            variant,
            default_label,
            line_ending: if text.contains("\r\n") { "\r\n" } else { "\n" },
        }
    }
}

/// Read the first `slug: '<word>'` literal and capitalize it (`python` -> `Python`).
pub fn derive_default_label(text: &str) -> Option<String> {
    let caps = SLUG_LITERAL.captures(text)?;
    Some(capitalize(&caps["slug"]))
}

/// Upper-case the first character, lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
