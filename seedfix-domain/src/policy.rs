/// Allow/deny filter over rule ids.
///
/// Patterns support `*` and `?`. An empty allowlist allows everything; deny always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulePolicy {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
}

impl RulePolicy {
    pub fn new(allow: Vec<String>, deny: Vec<String>) -> Self {
        Self { allow, deny }
    }

    pub fn allows(&self, rule_id: &str) -> bool {
        if !self.allow.is_empty() && !self.allow.iter().any(|p| glob_match(p, rule_id)) {
            return false;
        }
        !self.deny.iter().any(|p| glob_match(p, rule_id))
    }
}

/// Simple wildcard matcher: '*' and '?'.
pub fn glob_match(pat: &str, text: &str) -> bool {
    // DP implementation to avoid recursion.
    let p = pat.as_bytes();
    let t = text.as_bytes();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == b'*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                b'*' => dp[i - 1][j] || dp[i][j - 1],
                b'?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_wildcards() {
        assert!(glob_match("flat.*", "flat.inject_default_group"));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("repair.split_fused_order_fiel?", "repair.split_fused_order_field"));
        assert!(!glob_match("nested.*", "flat.redirect_group_assignment"));
        assert!(glob_match("", ""));
        assert!(!glob_match("", "x"));
    }

    #[test]
    fn empty_policy_allows_all() {
        assert!(RulePolicy::default().allows("nested.inject_group_binding"));
    }

    #[test]
    fn allowlist_restricts() {
        let policy = RulePolicy::new(vec!["nested.*".to_string()], vec![]);
        assert!(policy.allows("nested.redirect_group_assignment"));
        assert!(!policy.allows("flat.redirect_group_assignment"));
    }

    #[test]
    fn deny_wins_over_allow() {
        let policy = RulePolicy::new(vec!["*".to_string()], vec!["repair.*".to_string()]);
        assert!(!policy.allows("repair.split_fused_order_field"));
        assert!(policy.allows("flat.inject_default_group"));
    }
}
