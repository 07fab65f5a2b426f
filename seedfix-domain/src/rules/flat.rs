//! Rules for flat documents: one group per document, derived from the topic slug.

use crate::context::RuleContext;
use crate::patterns::{FLAT_GROUP_REFERENCE, GROUP_CONSTANT, ORDER_COUNTER_INIT};
use crate::rules::{Phase, Rule, RuleOutcome};
use regex::Captures;
use seedfix_types::{AttentionKind, Variant};

const DEFAULT_GROUP: &str = "defaultGroup";

/// Declare `const defaultGroup = "<Slug>";` right after `let order = 1;`.
///
/// Never guesses: without a slug literal the document is left alone and flagged.
pub struct InjectDefaultGroup;

impl Rule for InjectDefaultGroup {
    fn id(&self) -> &'static str {
        "flat.inject_default_group"
    }

    fn title(&self) -> &'static str {
        "Declare a default group constant from the topic slug"
    }

    fn phase(&self) -> Phase {
        Phase::Insert
    }

    fn variants(&self) -> &'static [Variant] {
        &[Variant::Flat]
    }

    fn marker(&self) -> &'static str {
        "const <name>Group ="
    }

    fn apply(&self, text: &str, ctx: &RuleContext) -> RuleOutcome {
        if GROUP_CONSTANT.is_match(text) {
            return RuleOutcome::AlreadyApplied;
        }
        let Some(label) = ctx.default_label.as_deref() else {
            return RuleOutcome::Attention {
                kind: AttentionKind::MissingSlug,
                message: "no `slug: '<word>'` literal found; default group left unset".to_string(),
            };
        };
        if !ORDER_COUNTER_INIT.is_match(text) {
            return RuleOutcome::Attention {
                kind: AttentionKind::InsertAnchorMissing,
                message: format!(
                    "slug gives default group \"{label}\" but no `let order = 1;` line to anchor it"
                ),
            };
        }

        let eol = ctx.line_ending;
        let out = ORDER_COUNTER_INIT.replacen(text, 1, |caps: &Captures| {
            let indent = &caps["indent"];
            format!(
                "{}{indent}const {DEFAULT_GROUP} = \"{label}\";{eol}{eol}",
                &caps[0]
            )
        });
        RuleOutcome::Rewritten(out.into_owned())
    }
}

/// Route every group reference to the document's group constant.
pub struct RedirectToDefaultGroup;

impl Rule for RedirectToDefaultGroup {
    fn id(&self) -> &'static str {
        "flat.redirect_group_assignment"
    }

    fn title(&self) -> &'static str {
        "Point group assignments at the default group constant"
    }

    fn phase(&self) -> Phase {
        Phase::Redirect
    }

    fn variants(&self) -> &'static [Variant] {
        &[Variant::Flat]
    }

    fn marker(&self) -> &'static str {
        "group: <name>Group"
    }

    fn apply(&self, text: &str, _ctx: &RuleContext) -> RuleOutcome {
        if !FLAT_GROUP_REFERENCE.is_match(text) {
            return RuleOutcome::NoMatch;
        }
        // No constant means the insertion rule already reported why.
        let Some(caps) = GROUP_CONSTANT.captures(text) else {
            return RuleOutcome::NoMatch;
        };

        let replacement = format!("group: {}", &caps["name"]);
        let out = FLAT_GROUP_REFERENCE.replace_all(text, replacement.as_str());
        RuleOutcome::Rewritten(out.into_owned())
    }
}
