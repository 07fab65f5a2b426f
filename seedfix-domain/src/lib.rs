//! Domain logic: classify a seed document and rewrite its group assignments.
//!
//! This crate owns *what* text changes and why. It never touches the filesystem; reading,
//! backing up and writing documents is the job of `seedfix-core` and `seedfix-edit`.

mod classify;
mod context;
mod engine;
mod patterns;
mod policy;
mod rules;

pub use classify::classify;
pub use context::{RuleContext, capitalize, derive_default_label};
pub use engine::{Rewrite, RuleSet};
pub use policy::{RulePolicy, glob_match};
pub use rules::{
    ALL_VARIANTS, InjectDefaultGroup, InjectGroupBinding, Phase, RedirectToDefaultGroup,
    RedirectToGroupBinding, Rule, RuleMeta, RuleOutcome, SplitFusedOrderField, builtin_rule_metas,
    builtin_rules,
};
