use crate::classify::classify;
use crate::context::RuleContext;
use crate::policy::RulePolicy;
use crate::rules::{self, Rule, RuleMeta, RuleOutcome};
use seedfix_types::{Attention, AttentionKind, RuleId, Variant};
use tracing::{debug, warn};

/// Result of running the rule set over one document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub variant: Variant,
    pub text: String,
    /// Rules that changed the text, in application order.
    pub fired: Vec<RuleId>,
    pub attention: Vec<Attention>,
}

/// Ordered collection of rules plus the policy that gates them.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    policy: RulePolicy,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    pub fn new() -> Self {
        Self::with_rules(rules::builtin_rules())
    }

    /// Build from custom rules. Rules are stably ordered by phase so insertions always precede
    /// redirects, and repairs run last.
    pub fn with_rules(mut rules: Vec<Box<dyn Rule>>) -> Self {
        rules.sort_by_key(|r| r.phase());
        Self {
            rules,
            policy: RulePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RulePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn metas(&self) -> Vec<RuleMeta> {
        self.rules.iter().map(|r| RuleMeta::of(r.as_ref())).collect()
    }

    /// Classify and rewrite in one step.
    pub fn rewrite(&self, text: &str) -> Rewrite {
        self.apply(text, classify(text))
    }

    /// Apply every eligible rule, in order, to `text` already classified as `variant`.
    pub fn apply(&self, text: &str, variant: Variant) -> Rewrite {
        let ctx = RuleContext::derive(text, variant);
        let mut current = text.to_string();
        let mut fired = Vec::new();
        let mut attention = Vec::new();

        for rule in &self.rules {
            let id = rule.id();
            if !rule.applies_to(variant) {
                continue;
            }
            if !self.policy.allows(id) {
                debug!(rule = id, "rule denied by policy");
                continue;
            }

            match rule.apply(&current, &ctx) {
                RuleOutcome::Rewritten(next) => {
                    if next == current {
                        continue;
                    }
                    if let RuleOutcome::Rewritten(again) = rule.apply(&next, &ctx)
                        && again != next
                    {
                        warn!(rule = id, "rewrite is not stable; discarding");
                        attention.push(Attention {
                            rule_id: RuleId::new(id),
                            kind: AttentionKind::UnstableRewrite,
                            message: "applying the rule to its own output changed the text again"
                                .to_string(),
                        });
                        continue;
                    }
                    debug!(rule = id, "rule fired");
                    fired.push(RuleId::new(id));
                    current = next;
                }
                RuleOutcome::AlreadyApplied => {
                    debug!(rule = id, "already applied");
                }
                RuleOutcome::NoMatch => {}
                RuleOutcome::Attention { kind, message } => {
                    debug!(rule = id, kind = kind.token(), "needs attention");
                    attention.push(Attention {
                        rule_id: RuleId::new(id),
                        kind,
                        message,
                    });
                }
            }
        }

        Rewrite {
            variant,
            text: current,
            fired,
            attention,
        }
    }
}
