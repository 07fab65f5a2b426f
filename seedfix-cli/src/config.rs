//! Configuration file loading for seedfix.
//!
//! Discovers and loads `seedfix.toml` from the root directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use seedfix_core::settings::{DEFAULT_DIR, DEFAULT_PREFIX, DEFAULT_SUFFIX, RunSettings};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "seedfix.toml";

/// Top-level configuration from seedfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedfixConfig {
    /// Where candidate documents live.
    pub discovery: DiscoveryConfig,

    /// Backup settings.
    pub backups: BackupsConfig,

    /// Rule allow/deny lists.
    pub rules: RulesConfig,
}

/// Discovery section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directory relative to the root.
    pub dir: Utf8PathBuf,

    /// File name prefix of candidate documents.
    pub prefix: String,

    /// File name suffix of candidate documents.
    pub suffix: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from(DEFAULT_DIR),
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// Backups section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupsConfig {
    /// Whether to copy each document before rewriting it.
    pub enabled: bool,

    /// Suffix for backup files.
    pub suffix: String,
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            suffix: ".backup".to_string(),
        }
    }
}

/// Rules section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Allowlist patterns for rule ids. If non-empty, only matching rules run.
    pub allow: Vec<String>,

    /// Denylist patterns for rule ids.
    pub deny: Vec<String>,
}

/// Discover the seedfix.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a seedfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<SeedfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<SeedfixConfig> {
    let config: SeedfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the root, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<SeedfixConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(SeedfixConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub dir: Utf8PathBuf,
    pub prefix: String,
    pub suffix: String,

    /// Allow patterns (from config file, extended by CLI).
    pub allow: Vec<String>,

    /// Deny patterns (from config file, extended by CLI).
    pub deny: Vec<String>,

    pub backups: BackupsConfig,
}

impl MergedConfig {
    /// Settings for one batch rooted at `root`.
    pub fn into_settings(
        self,
        root: Utf8PathBuf,
        files: Vec<Utf8PathBuf>,
        dry_run: bool,
    ) -> RunSettings {
        RunSettings {
            root,
            dir: self.dir,
            prefix: self.prefix,
            suffix: self.suffix,
            files,
            allow: self.allow,
            deny: self.deny,
            backup_enabled: self.backups.enabled,
            backup_suffix: self.backups.suffix,
            dry_run,
        }
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: SeedfixConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: SeedfixConfig) -> Self {
        Self { config }
    }

    /// Merge with `run`/`classify` CLI arguments.
    ///
    /// `--dir` replaces the configured directory. CLI `allow` and `deny` lists extend the config
    /// file lists. `--no-backup` wins over `[backups].enabled`.
    pub fn merge_run_args(
        self,
        cli_dir: Option<&Utf8Path>,
        cli_allow: &[String],
        cli_deny: &[String],
        no_backup: bool,
    ) -> MergedConfig {
        let mut allow = self.config.rules.allow.clone();
        let mut deny = self.config.rules.deny.clone();

        // CLI extends the config file lists
        for pattern in cli_allow {
            if !allow.contains(pattern) {
                allow.push(pattern.clone());
            }
        }
        for pattern in cli_deny {
            if !deny.contains(pattern) {
                deny.push(pattern.clone());
            }
        }

        let mut backups = self.config.backups.clone();
        backups.enabled = backups.enabled && !no_backup;

        MergedConfig {
            dir: cli_dir
                .map(Utf8Path::to_owned)
                .unwrap_or(self.config.discovery.dir),
            prefix: self.config.discovery.prefix,
            suffix: self.config.discovery.suffix,
            allow,
            deny,
            backups,
        }
    }
}
