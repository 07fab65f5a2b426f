use crate::context::RuleContext;
use crate::patterns::FUSED_ORDER_FIELD;
use crate::rules::{ALL_VARIANTS, Phase, Rule, RuleOutcome};
use regex::Captures;
use seedfix_types::Variant;

/// Split `group: x, // note!order: order++` back into two lines.
///
/// An earlier rewrite appended a comment to `group:` lines and swallowed the line break before the
/// next field. The comment is kept; `order: order++` moves to its own line at the `group:` indent.
pub struct SplitFusedOrderField;

impl Rule for SplitFusedOrderField {
    fn id(&self) -> &'static str {
        "repair.split_fused_order_field"
    }

    fn title(&self) -> &'static str {
        "Move an order field out of a trailing comment"
    }

    fn phase(&self) -> Phase {
        Phase::Repair
    }

    fn variants(&self) -> &'static [Variant] {
        ALL_VARIANTS
    }

    fn marker(&self) -> &'static str {
        "// ...order: order++"
    }

    fn apply(&self, text: &str, ctx: &RuleContext) -> RuleOutcome {
        if !FUSED_ORDER_FIELD.is_match(text) {
            return RuleOutcome::NoMatch;
        }

        let eol = ctx.line_ending;
        let out = FUSED_ORDER_FIELD.replace_all(text, |caps: &Captures| {
            let indent = &caps["indent"];
            format!(
                "{indent}group: {}, {}{eol}{indent}order: order++",
                caps["expr"].trim(),
                caps["comment"].trim_end()
            )
        });
        RuleOutcome::Rewritten(out.into_owned())
    }
}
