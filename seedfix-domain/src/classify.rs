use crate::patterns::{FLAT_LOOP, NESTED_LOOP};
use seedfix_types::Variant;

/// Determine which structural dialect a document follows.
///
/// Nested is tested first: the body of a nested document's outer loop contains an inner
/// single-level loop, and classification must anchor on the outermost enumeration.
pub fn classify(text: &str) -> Variant {
    if NESTED_LOOP.is_match(text) {
        Variant::Nested
    } else if FLAT_LOOP.is_match(text) {
        Variant::Flat
    } else {
        Variant::Unrecognized
    }
}
