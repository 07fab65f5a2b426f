//! Clap-free settings for the batch pipeline.

use crate::ports::CandidateFilter;
use camino::Utf8PathBuf;
use seedfix_domain::RulePolicy;
use seedfix_edit::DEFAULT_BACKUP_SUFFIX;

pub const DEFAULT_DIR: &str = "src/seeds/topics";
pub const DEFAULT_PREFIX: &str = "seed-";
pub const DEFAULT_SUFFIX: &str = ".js";

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub root: Utf8PathBuf,

    // Discovery
    /// Directory holding the documents, relative to `root`.
    pub dir: Utf8PathBuf,
    pub prefix: String,
    pub suffix: String,
    /// Explicit documents (relative to `root`). Discovery is skipped when non-empty.
    pub files: Vec<Utf8PathBuf>,

    // Policy
    pub allow: Vec<String>,
    pub deny: Vec<String>,

    // Backups
    pub backup_enabled: bool,
    pub backup_suffix: String,

    pub dry_run: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("."),
            dir: Utf8PathBuf::from(DEFAULT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            files: Vec::new(),
            allow: Vec::new(),
            deny: Vec::new(),
            backup_enabled: true,
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            dry_run: false,
        }
    }
}

impl RunSettings {
    pub fn search_dir(&self) -> Utf8PathBuf {
        self.root.join(&self.dir)
    }

    pub fn filter(&self) -> CandidateFilter {
        CandidateFilter::new(self.prefix.clone(), self.suffix.clone())
    }

    pub fn policy(&self) -> RulePolicy {
        RulePolicy::new(self.allow.clone(), self.deny.clone())
    }

    /// Backups are taken only for real runs with backups enabled.
    pub fn backups_active(&self) -> bool {
        self.backup_enabled && !self.dry_run
    }
}
