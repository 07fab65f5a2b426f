//! End-to-end rewrite scenarios for each dialect, checked at the level of fired rules and
//! attention items rather than exact text.

use pretty_assertions::assert_eq;
use seedfix_domain::{RulePolicy, RuleSet, builtin_rule_metas};
use seedfix_types::{AttentionKind, RuleId, Variant};

const NESTED: &str = "\
let topic = await Topic.findOne({ slug: 'python' });
let order = 1;
for (const [mainKey, mainValue] of Object.entries(pythonData)) {
    for (const [key, value] of Object.entries(mainValue)) {
        await Category.create({
            group: await assignGroup(categoryName, 'python'),
            order: order++
        });
        await Category.create({
            group: await assignGroup(formatName(key), topicSlug),
            order: order++
        });
    }
}
";

const FLAT: &str = "\
let topic = await Topic.findOne({ slug: 'python' });
let order = 1;
for (const [key, value] of Object.entries(pythonData)) {
    await Category.create({
        group: await assignGroup(categoryName, 'python'),
        order: order++
    });
}
";

fn ids(v: &[RuleId]) -> Vec<&str> {
    v.iter().map(|r| r.as_str()).collect()
}

#[test]
fn nested_first_run_binds_and_redirects() {
    let rw = RuleSet::new().rewrite(NESTED);
    assert_eq!(rw.variant, Variant::Nested);
    assert_eq!(
        ids(&rw.fired),
        vec!["nested.inject_group_binding", "nested.redirect_group_assignment"]
    );
    assert!(rw.attention.is_empty());
    assert_eq!(rw.text.matches("const groupName = formatName(mainKey);").count(), 1);
    assert_eq!(rw.text.matches("group: groupName,").count(), 2);
    assert!(!rw.text.contains("assignGroup"));
}

#[test]
fn flat_python_gets_capitalized_default_group() {
    let rw = RuleSet::new().rewrite(FLAT);
    assert_eq!(rw.variant, Variant::Flat);
    assert_eq!(
        ids(&rw.fired),
        vec!["flat.inject_default_group", "flat.redirect_group_assignment"]
    );
    assert!(rw.text.contains("let order = 1;\nconst defaultGroup = \"Python\";\n\n"));
    assert!(rw.text.contains("group: defaultGroup,"));
}

#[test]
fn flat_without_slug_is_left_alone_and_flagged() {
    let doc = FLAT.replace("slug: 'python'", "slug: topicSlug");
    let rw = RuleSet::new().rewrite(&doc);
    assert_eq!(rw.variant, Variant::Flat);
    assert_eq!(rw.text, doc);
    assert!(rw.fired.is_empty());
    assert_eq!(rw.attention.len(), 1);
    assert_eq!(rw.attention[0].kind, AttentionKind::MissingSlug);
    assert_eq!(rw.attention[0].rule_id.as_str(), "flat.inject_default_group");
}

#[test]
fn nested_without_loop_line_reports_missing_binding() {
    let doc = NESTED.replace(
        "for (const [mainKey, mainValue] of Object.entries(pythonData)) {\n",
        "for (const [mainKey, mainValue] of Object.entries(pythonData)) { log(mainKey);\n",
    );
    let rw = RuleSet::new().rewrite(&doc);
    assert_eq!(rw.variant, Variant::Nested);
    assert_eq!(rw.text, doc);
    assert_eq!(rw.attention.len(), 1);
    assert_eq!(rw.attention[0].kind, AttentionKind::BindingAnchorMissing);
}

#[test]
fn allowlist_limits_rules_to_one_dialect() {
    let rules = RuleSet::new().with_policy(RulePolicy::new(vec!["flat.*".to_string()], vec![]));
    assert_eq!(rules.rewrite(NESTED).text, NESTED);
    assert_ne!(rules.rewrite(FLAT).text, FLAT);
}

#[test]
fn denying_insert_leaves_redirect_without_target() {
    let rules = RuleSet::new().with_policy(RulePolicy::new(
        vec![],
        vec!["nested.inject_group_binding".to_string()],
    ));
    let rw = rules.rewrite(NESTED);
    assert_eq!(rw.text, NESTED);
    assert_eq!(rw.attention[0].kind, AttentionKind::BindingAnchorMissing);
}

#[test]
fn unrecognized_document_is_untouched() {
    let doc = "for (const [key, value] of Object.entries(data)) {\n    group: await assignGroup(a, b),\n}\n";
    let rw = RuleSet::new().rewrite(doc);
    assert_eq!(rw.variant, Variant::Unrecognized);
    assert_eq!(rw.text, doc);
    assert!(rw.fired.is_empty());
    assert!(rw.attention.is_empty());
}

#[test]
fn rule_ids_are_unique_and_sorted_by_phase() {
    let metas = builtin_rule_metas();
    let mut seen: Vec<&str> = metas.iter().map(|m| m.id).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), metas.len());
    assert!(metas.windows(2).all(|w| w[0].phase <= w[1].phase));
}
