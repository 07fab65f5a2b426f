use crate::context::RuleContext;
use seedfix_types::{AttentionKind, Variant};

mod flat;
mod nested;
mod repair;

pub use flat::{InjectDefaultGroup, RedirectToDefaultGroup};
pub use nested::{InjectGroupBinding, RedirectToGroupBinding};
pub use repair::SplitFusedOrderField;

/// Execution phase. Rules run phase by phase; within a phase, in registration order.
///
/// Insertions come before redirects because a redirect's replacement names the binding an
/// insertion introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Insert,
    Redirect,
    Repair,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Insert => "insert",
            Phase::Redirect => "redirect",
            Phase::Repair => "repair",
        }
    }
}

/// What a single rule did to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Rewritten(String),
    /// The idempotence marker is present.
    AlreadyApplied,
    /// Nothing in the document matches the rule's pattern.
    NoMatch,
    /// A precondition is unmet and someone has to look at the document.
    Attention { kind: AttentionKind, message: String },
}

pub trait Rule: Send + Sync {
    /// Stable dotted id, e.g. `nested.inject_group_binding`.
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn phase(&self) -> Phase;

    /// Variants this rule is eligible for.
    fn variants(&self) -> &'static [Variant];

    /// Textual marker whose presence means the rule has nothing left to do.
    fn marker(&self) -> &'static str;

    fn applies_to(&self, variant: Variant) -> bool {
        self.variants().contains(&variant)
    }

    fn apply(&self, text: &str, ctx: &RuleContext) -> RuleOutcome;
}

/// Static description of a rule, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    pub id: &'static str,
    pub title: &'static str,
    pub phase: Phase,
    pub variants: &'static [Variant],
    pub marker: &'static str,
}

impl RuleMeta {
    pub fn of(rule: &dyn Rule) -> Self {
        Self {
            id: rule.id(),
            title: rule.title(),
            phase: rule.phase(),
            variants: rule.variants(),
            marker: rule.marker(),
        }
    }
}

pub const ALL_VARIANTS: &[Variant] = &[Variant::Nested, Variant::Flat, Variant::Unrecognized];

pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(InjectGroupBinding),
        Box::new(InjectDefaultGroup),
        Box::new(RedirectToGroupBinding),
        Box::new(RedirectToDefaultGroup),
        Box::new(SplitFusedOrderField),
    ]
}

pub fn builtin_rule_metas() -> Vec<RuleMeta> {
    builtin_rules().iter().map(|r| RuleMeta::of(r.as_ref())).collect()
}
