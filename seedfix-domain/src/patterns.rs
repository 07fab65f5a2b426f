//! Textual signatures shared by the classifier and the rules.
//!
//! Every pattern here is matched against raw document text. The classifier and the rule that edits a
//! construct use the same signature so a document classified as a dialect always exposes the anchor
//! that dialect's rules expect (or the rule reports the mismatch).

use once_cell::sync::Lazy;
use regex::Regex;

/// `assignGroup(...)` with one level of nested parentheses in its argument list.
const ASSIGN_GROUP_CALL: &str = r"assignGroup\((?:[^()]|\([^()]*\))*\)";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid built-in pattern")
}

/// Outer enumeration of a nested document: `for (const [mainKey, mainValue] of Object.entries(x))`.
pub(crate) static NESTED_LOOP: Lazy<Regex> = Lazy::new(|| {
    compile(r"for\s*\(\s*const\s*\[\s*mainKey\s*,\s*mainValue\s*\]\s*of\s+Object\.entries\([^)]+\)\s*\)")
});

/// The nested loop header as a whole line ending in the opening brace.
///
/// Captures: `indent`.
pub(crate) static NESTED_LOOP_OPENING: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?m)^(?P<indent>[ \t]*)for\s*\(\s*const\s*\[\s*mainKey\s*,\s*mainValue\s*\]\s*of\s+Object\.entries\([^)]+\)\s*\)\s*\{[ \t]*(?://[^\r\n]*)?\r?\n",
    )
});

/// Single-level enumeration over a `...Data...` collection.
pub(crate) static FLAT_LOOP: Lazy<Regex> = Lazy::new(|| {
    compile(r"for\s*\(\s*const\s*\[\s*key\s*,\s*value\s*\]\s*of\s+Object\.entries\([^)]*Data[^)]*\)\s*\)")
});

pub(crate) static GROUP_BINDING: Lazy<Regex> =
    Lazy::new(|| compile(r"const\s+groupName\s*=\s*formatName\(\s*mainKey\s*\)"));

/// `group: await assignGroup(...)` call-sites in a nested document.
pub(crate) static AWAITED_ASSIGN_GROUP: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"group:\s*await\s+{ASSIGN_GROUP_CALL}")));

/// Any group reference a flat document should route to its constant.
pub(crate) static FLAT_GROUP_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"group:\s*(?:await\s+)?(?:{ASSIGN_GROUP_CALL}|groupName\b)"
    ))
});

/// A `const <something>Group = "<label>"` string constant.
///
/// Only string literals count; `const categoriesByGroup = {}` is bookkeeping, not a group.
///
/// Captures: `name`.
pub(crate) static GROUP_CONSTANT: Lazy<Regex> =
    Lazy::new(|| compile(r#"\bconst\s+(?P<name>\w+Group)\s*=\s*['"]"#));

/// Captures: `slug`.
pub(crate) static SLUG_LITERAL: Lazy<Regex> =
    Lazy::new(|| compile(r#"slug:\s*['"](?P<slug>\w+)['"]"#));

/// Captures: `indent`.
pub(crate) static ORDER_COUNTER_INIT: Lazy<Regex> =
    Lazy::new(|| compile(r"(?m)^(?P<indent>[ \t]*)let\s+order\s*=\s*1\s*;[ \t]*\r?\n"));

/// An `order: order++` assignment glued onto the end of a line comment after a `group:` field.
///
/// The group expression may nest parentheses one level deep, like `ASSIGN_GROUP_CALL`.
///
/// Captures: `indent`, `expr`, `comment`.
pub(crate) static FUSED_ORDER_FIELD: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?m)^(?P<indent>[ \t]*)group:[ \t]*(?P<expr>(?:[^,\n()]|\((?:[^()\n]|\([^()\n]*\))*\))+),[ \t]*(?P<comment>//[^\n]*?)[ \t]*order:[ \t]*order\+\+",
    )
});
