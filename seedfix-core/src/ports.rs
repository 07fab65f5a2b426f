//! Port traits abstracting all I/O away from the pipeline.

use camino::{Utf8Path, Utf8PathBuf};
use seedfix_edit::EditResult;

/// Name predicate for candidate documents: `<prefix>*<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    pub prefix: String,
    pub suffix: String,
}

impl CandidateFilter {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() >= self.prefix.len() + self.suffix.len()
            && file_name.starts_with(&self.prefix)
            && file_name.ends_with(&self.suffix)
    }
}

/// Where seed documents live.
///
/// Read, write and backup failures are scoped to one document; only listing can fail a batch.
pub trait FileStore {
    /// Candidate documents directly inside `dir`, sorted lexicographically.
    fn list_candidates(
        &self,
        dir: &Utf8Path,
        filter: &CandidateFilter,
    ) -> anyhow::Result<Vec<Utf8PathBuf>>;

    fn read(&self, path: &Utf8Path) -> EditResult<String>;

    /// Replace the whole document in one step.
    fn write(&self, path: &Utf8Path, contents: &str) -> EditResult<()>;

    /// Store `original` at `<path><suffix>`, overwriting an older backup.
    fn write_backup(&self, path: &Utf8Path, original: &str, suffix: &str)
    -> EditResult<Utf8PathBuf>;
}

/// File-system write operations for report artifacts.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::CandidateFilter;

    #[test]
    fn filter_matches_prefix_and_suffix() {
        let f = CandidateFilter::new("seed-", ".js");
        assert!(f.matches("seed-python-topic.js"));
        assert!(!f.matches("seed-python-topic.js.backup"));
        assert!(!f.matches("python-topic.js"));
        assert!(!f.matches("seed-python-topic.ts"));
    }

    #[test]
    fn filter_does_not_let_prefix_and_suffix_overlap() {
        let f = CandidateFilter::new("seed-", "-.js");
        assert!(!f.matches("seed-.js"));
        assert!(f.matches("seed--.js"));
    }
}
