//! Rule explanations for the `seedfix explain` command.
//!
//! Provides detailed explanations of each rule including:
//! - What the rule rewrites
//! - How it stays idempotent
//! - When it asks for manual attention

use seedfix_types::Variant;

/// Information about a seedfix rule.
#[derive(Debug, Clone)]
pub struct RuleExplanation {
    /// Stable rule id (e.g., "nested.inject_group_binding").
    pub id: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Document variants the rule is eligible for.
    pub variants: &'static [Variant],
    /// Detailed description of what the rule does.
    pub description: &'static str,
    /// Why a second run leaves the document alone.
    pub idempotence: &'static str,
    /// Situations where the rule declines and reports attention instead.
    pub failure_modes: &'static str,
    /// Remediation guidance for manual fixes.
    pub remediation: &'static str,
}

/// Registry of all rule explanations, in execution order.
pub static RULE_REGISTRY: &[RuleExplanation] = &[
    // 1) Nested: bind groupName
    RuleExplanation {
        id: "nested.inject_group_binding",
        title: "Bind groupName from the outer loop key",
        variants: &[Variant::Nested],
        description: r#"Inserts `const groupName = formatName(mainKey);` followed by a blank line as the
first statement inside every outer `for (const [mainKey, mainValue] of Object.entries(...))`
loop. The indentation is one level deeper than the loop header."#,
        idempotence: r#"A loop is skipped when its body, up to the next outer loop header, already
declares `const groupName = formatName(mainKey)`."#,
        failure_modes: r#"None. If the loop header is not a whole line ending in `{`, the rule does
not match and the document is left as is."#,
        remediation: r#"Add the binding by hand at the top of the outer loop body:

    for (const [mainKey, mainValue] of Object.entries(seedData)) {
        const groupName = formatName(mainKey);
"#,
    },
    // 2) Flat: declare the default group constant
    RuleExplanation {
        id: "flat.inject_default_group",
        title: "Declare a default group constant from the topic slug",
        variants: &[Variant::Flat],
        description: r#"Inserts `const defaultGroup = "<Label>";` after the `let order = 1;` line.
The label is the first `slug: '<word>'` literal in the document with its first
letter upper-cased (`python` becomes `Python`)."#,
        idempotence: r#"Skipped when any `const <name>Group = "<label>"` string constant is already
declared."#,
        failure_modes: r#"missing_slug when no quoted `slug:` literal exists, so no label can be derived.
insert_anchor_missing when a label exists but there is no `let order = 1;` line to
place the constant after. In both cases the document is left unchanged."#,
        remediation: r#"Declare the constant yourself, next to the order counter:

    let order = 1;
    const defaultGroup = "Python";
"#,
    },
    // 3) Nested: redirect to groupName
    RuleExplanation {
        id: "nested.redirect_group_assignment",
        title: "Point group assignments at groupName",
        variants: &[Variant::Nested],
        description: r#"Replaces every `group: await assignGroup(...)` call-site with
`group: groupName`. Arguments may contain one level of nested parentheses."#,
        idempotence: r#"After the rewrite no awaited `assignGroup` call-site remains, so the pattern
no longer matches."#,
        failure_modes: r#"binding_anchor_missing when a call-site's outer loop declares no `groupName`
binding (for example because `nested.inject_group_binding` was denied). Redirecting would
reference an undefined name, so nothing is replaced."#,
        remediation: r#"Declare `const groupName = formatName(mainKey);` inside the outer loop, or
allow `nested.inject_group_binding`, and run again."#,
    },
    // 4) Flat: redirect to the default group constant
    RuleExplanation {
        id: "flat.redirect_group_assignment",
        title: "Point group assignments at the default group constant",
        variants: &[Variant::Flat],
        description: r#"Replaces `group: assignGroup(...)`, `group: await assignGroup(...)` and
`group: groupName` with `group: <constant>`, where `<constant>` is the name of the
first `const <name>Group = "<label>"` declaration in the document."#,
        idempotence: r#"After the rewrite every group field names the constant, which the pattern
does not match."#,
        failure_modes: r#"None reported. Without a group constant the rule does nothing; the missing
constant is already reported by `flat.inject_default_group`."#,
        remediation: r#"Add a `slug: '<word>'` literal (or the constant itself) and run again."#,
    },
    // 5) Repair: split fused order field
    RuleExplanation {
        id: "repair.split_fused_order_field",
        title: "Move an order field out of a trailing comment",
        variants: &[Variant::Nested, Variant::Flat, Variant::Unrecognized],
        description: r#"Finds `group: <expr>, // <comment>order: order++` where an earlier rewrite
glued the order field onto a line comment. The comment is kept and
`order: order++` moves to its own line at the indentation of the `group:` line."#,
        idempotence: r#"Once split, no `order: order++` follows a comment on a `group:` line."#,
        failure_modes: r#"None. Runs on every variant, including unrecognized documents, and only
touches lines that match the defect."#,
        remediation: r#"Insert a line break before `order: order++` and indent it like the
`group:` field above it."#,
    },
];

/// Look up a rule by id. Matching is case-insensitive.
pub fn lookup_rule(id: &str) -> Option<&'static RuleExplanation> {
    RULE_REGISTRY
        .iter()
        .find(|r| r.id.eq_ignore_ascii_case(id))
}

/// All rule ids, for "did you mean" style errors.
pub fn list_rule_ids() -> Vec<&'static str> {
    RULE_REGISTRY.iter().map(|r| r.id).collect()
}

/// Variants as a comma separated list.
pub fn format_variants(variants: &[Variant]) -> String {
    variants
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
