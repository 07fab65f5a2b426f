//! Rules for nested documents: the group is the outer loop key.

use crate::context::RuleContext;
use crate::patterns::{AWAITED_ASSIGN_GROUP, GROUP_BINDING, NESTED_LOOP, NESTED_LOOP_OPENING};
use crate::rules::{Phase, Rule, RuleOutcome};
use seedfix_types::{AttentionKind, Variant};
use std::ops::Range;

const GROUP_BINDING_DECL: &str = "const groupName = formatName(mainKey);";

/// Insert `const groupName = formatName(mainKey);` as the first statement of every outer loop
/// that does not declare it yet.
pub struct InjectGroupBinding;

impl Rule for InjectGroupBinding {
    fn id(&self) -> &'static str {
        "nested.inject_group_binding"
    }

    fn title(&self) -> &'static str {
        "Bind groupName from the outer loop key"
    }

    fn phase(&self) -> Phase {
        Phase::Insert
    }

    fn variants(&self) -> &'static [Variant] {
        &[Variant::Nested]
    }

    fn marker(&self) -> &'static str {
        GROUP_BINDING_DECL
    }

    fn apply(&self, text: &str, ctx: &RuleContext) -> RuleOutcome {
        let eol = ctx.line_ending;
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut openings = 0;
        let mut inserted = 0;

        for caps in NESTED_LOOP_OPENING.captures_iter(text) {
            let Some(header) = caps.get(0) else {
                continue;
            };
            openings += 1;
            if GROUP_BINDING.is_match(&text[loop_body(text, header.end())]) {
                continue;
            }
            out.push_str(&text[last..header.end()]);
            out.push_str(&format!(
                "{}    {GROUP_BINDING_DECL}{eol}{eol}",
                &caps["indent"]
            ));
            last = header.end();
            inserted += 1;
        }

        match (openings, inserted) {
            // Reported by the redirect rule if anything depends on the binding.
            (0, _) => RuleOutcome::NoMatch,
            (_, 0) => RuleOutcome::AlreadyApplied,
            _ => {
                out.push_str(&text[last..]);
                RuleOutcome::Rewritten(out)
            }
        }
    }
}

/// Replace `group: await assignGroup(...)` with `group: groupName`.
pub struct RedirectToGroupBinding;

impl Rule for RedirectToGroupBinding {
    fn id(&self) -> &'static str {
        "nested.redirect_group_assignment"
    }

    fn title(&self) -> &'static str {
        "Point group assignments at groupName"
    }

    fn phase(&self) -> Phase {
        Phase::Redirect
    }

    fn variants(&self) -> &'static [Variant] {
        &[Variant::Nested]
    }

    fn marker(&self) -> &'static str {
        "group: groupName"
    }

    fn apply(&self, text: &str, _ctx: &RuleContext) -> RuleOutcome {
        if !AWAITED_ASSIGN_GROUP.is_match(text) {
            return RuleOutcome::NoMatch;
        }
        let unbound = AWAITED_ASSIGN_GROUP
            .find_iter(text)
            .filter(|m| !GROUP_BINDING.is_match(&text[scope_of(text, m.start())]))
            .count();
        if unbound > 0 {
            return RuleOutcome::Attention {
                kind: AttentionKind::BindingAnchorMissing,
                message: format!(
                    "{unbound} assignGroup call-site(s) have no groupName declared in their \
                     outer mainKey loop"
                ),
            };
        }

        let out = AWAITED_ASSIGN_GROUP.replace_all(text, "group: groupName");
        RuleOutcome::Rewritten(out.into_owned())
    }
}

/// Body of the outer loop whose header ends at `body_start`: up to the next outer loop header.
fn loop_body(text: &str, body_start: usize) -> Range<usize> {
    let end = NESTED_LOOP
        .find_at(text, body_start)
        .map_or(text.len(), |m| m.start());
    body_start..end
}

/// The outer loop enclosing `pos`, or the whole document when it has no outer loop header.
fn scope_of(text: &str, pos: usize) -> Range<usize> {
    let headers: Vec<_> = NESTED_LOOP.find_iter(text).collect();
    if headers.is_empty() {
        return 0..text.len();
    }
    match headers.iter().rposition(|h| h.start() <= pos) {
        Some(i) => loop_body(text, headers[i].end()),
        // Before the first loop: only a binding declared earlier is in scope.
        None => 0..headers[0].start(),
    }
}
