mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use seedfix_core::adapters::{FsFileStore, FsWritePort};
use seedfix_core::pipeline::{ToolError, classify_documents, run_batch, write_report_artifacts};
use seedfix_core::settings::RunSettings;
use seedfix_domain::{RuleSet, builtin_rule_metas};
use seedfix_render::render_run_text;
use seedfix_types::ToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "seedfix",
    version,
    about = "Idempotent rewriter that makes seed files take their group from their own structure."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite every candidate seed document (backs up first unless disabled).
    Run(RunArgs),
    /// Print the detected variant of each candidate without changing anything.
    Classify(ClassifyArgs),
    /// Explain what a rule does, how it stays idempotent, and when it asks for attention.
    Explain(ExplainArgs),
    /// List all rules in execution order.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Root directory (default: current directory). seedfix.toml is read from here.
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Directory holding the seed documents, relative to the root.
    #[arg(long)]
    dir: Option<Utf8PathBuf>,

    /// Run every rule but write nothing; print a unified diff of what would change.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Do not write `<document>.backup` copies before rewriting.
    #[arg(long, default_value_t = false)]
    no_backup: bool,

    /// Allowlist patterns for rule ids.
    #[arg(long)]
    allow: Vec<String>,

    /// Denylist patterns for rule ids.
    #[arg(long)]
    deny: Vec<String>,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    /// Write a markdown run summary to this path.
    #[arg(long)]
    markdown: Option<Utf8PathBuf>,

    /// Write the unified diff of all changes to this path.
    #[arg(long)]
    patch: Option<Utf8PathBuf>,

    /// Exit with code 2 when any document needs manual attention or failed.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Explicit documents (relative to the root). Discovery is skipped when given.
    files: Vec<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ClassifyArgs {
    /// Root directory (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Directory holding the seed documents, relative to the root.
    #[arg(long)]
    dir: Option<Utf8PathBuf>,

    /// Explicit documents (relative to the root).
    files: Vec<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule id to explain (e.g., "flat.inject_default_group").
    rule_id: String,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{}", e);
        return ExitCode::from(e.exit_code());
    }
    ExitCode::from(0)
}

fn real_main() -> Result<(), ToolError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Classify(args) => Ok(cmd_classify(args)?),
        Command::Explain(args) => Ok(cmd_explain(args)?),
        Command::ListRules(args) => Ok(cmd_list_rules(args)?),
    }
}

fn load_settings(
    root: Utf8PathBuf,
    dir: Option<&Utf8Path>,
    allow: &[String],
    deny: &[String],
    no_backup: bool,
    files: Vec<Utf8PathBuf>,
    dry_run: bool,
) -> anyhow::Result<RunSettings> {
    // Load config file and merge with CLI arguments
    let file_config = config::load_or_default(&root).context("load seedfix.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_run_args(dir, allow, deny, no_backup);

    debug!(
        "merged config: dir={}, allow={:?}, deny={:?}, backups={}",
        merged.dir, merged.allow, merged.deny, merged.backups.enabled
    );

    Ok(merged.into_settings(root, files, dry_run))
}

fn cmd_run(args: RunArgs) -> Result<(), ToolError> {
    let settings = load_settings(
        args.root,
        args.dir.as_deref(),
        &args.allow,
        &args.deny,
        args.no_backup,
        args.files,
        args.dry_run,
    )?;

    let rules = RuleSet::new().with_policy(settings.policy());
    let outcome = run_batch(&settings, &FsFileStore, &rules, tool_info())?;

    if settings.dry_run && !outcome.patch.is_empty() {
        print!("{}", outcome.patch);
        println!();
    }
    print!("{}", render_run_text(&outcome.report));

    write_report_artifacts(
        &outcome,
        args.report.as_deref(),
        args.markdown.as_deref(),
        args.patch.as_deref(),
        &FsWritePort,
    )
    .context("write report artifacts")?;

    if settings.backups_active() && outcome.report.summary.changed > 0 {
        info!(
            "original documents saved with suffix {}",
            settings.backup_suffix
        );
    }

    if args.strict && outcome.needs_attention() {
        return Err(ToolError::AttentionRequired);
    }
    Ok(())
}

fn cmd_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let settings = load_settings(
        args.root,
        args.dir.as_deref(),
        &[],
        &[],
        true,
        args.files,
        true,
    )?;

    let classified = classify_documents(&settings, &FsFileStore)?;
    for doc in &classified {
        match &doc.variant {
            Ok(variant) => println!("{}: {}", doc.path, variant),
            Err(message) => println!("{}: unreadable ({})", doc.path, message),
        }
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{format_variants, list_rule_ids, lookup_rule};

    let Some(rule) = lookup_rule(&args.rule_id) else {
        let available = list_rule_ids().join(", ");
        anyhow::bail!(
            "Unknown rule id: '{}'\n\nAvailable rules: {}",
            args.rule_id,
            available
        );
    };
    let meta = builtin_rule_metas().into_iter().find(|m| m.id == rule.id);

    // Title and basic info
    println!("================================================================================");
    println!("RULE: {}", rule.title);
    println!("================================================================================");
    println!();
    println!("Id:       {}", rule.id);
    println!("Variants: {}", format_variants(rule.variants));
    if let Some(meta) = &meta {
        println!("Phase:    {}", meta.phase.as_str());
        println!("Marker:   {}", meta.marker);
    }
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.description);
    println!();

    println!("IDEMPOTENCE");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.idempotence);
    println!();

    println!("FAILURE MODES");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.failure_modes);
    println!();

    println!("REMEDIATION GUIDANCE");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.remediation);
    println!();

    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    use explain::format_variants;

    let metas = builtin_rule_metas();
    match args.format {
        OutputFormat::Text => {
            println!("Available rules:\n");
            println!("  {:<34} {:<9} {:<28} TITLE", "ID", "PHASE", "VARIANTS");
            println!("  {:<34} {:<9} {:<28} -----", "--", "-----", "--------");
            for meta in &metas {
                println!(
                    "  {:<34} {:<9} {:<28} {}",
                    meta.id,
                    meta.phase.as_str(),
                    format_variants(meta.variants),
                    meta.title
                );
            }
            println!();
            println!("Use 'seedfix explain <id>' for details.");
        }
        OutputFormat::Json => {
            let rules: Vec<_> = metas
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "id": m.id,
                        "title": m.title,
                        "phase": m.phase.as_str(),
                        "variants": m.variants.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
                        "marker": m.marker,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "seedfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
