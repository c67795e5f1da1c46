// Catalog consistency check

use crate::config::AuditConfig;
use crate::snapshot::SnapshotFileSource;
use anyhow::Context;
use badge_catalog::{Report, ValuePolicy};
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

/// Report rendering on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Operator-readable text
    #[default]
    Text,
    /// Structured JSON
    Json,
}

/// Arguments for `badge-audit check`.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Catalog snapshot (JSON array of rows, or `{ "data": [...] }`)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Audit configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Additional required criteria type (repeatable)
    #[arg(long = "require", value_name = "TYPE")]
    pub require: Vec<String>,

    /// Additional deprecated criteria type (repeatable)
    #[arg(long = "deprecate", value_name = "TYPE")]
    pub deprecate: Vec<String>,

    /// Override the value comparison policy (exact, numeric)
    #[arg(long)]
    pub value_policy: Option<ValuePolicy>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit non-zero when the report has findings
    #[arg(long)]
    pub fail_on_findings: bool,
}

/// What the caller should do with the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Run completed and either was clean or findings are tolerated.
    Passed,
    /// Run completed with findings and `--fail-on-findings` was set.
    FindingsPresent,
}

/// Resolve configuration from the file and flags.
pub fn resolve_config(args: &CheckArgs) -> anyhow::Result<AuditConfig> {
    let config = match &args.config {
        Some(path) => AuditConfig::load(path)?,
        None => AuditConfig::default(),
    };
    config.with_overrides(&args.require, &args.deprecate, args.value_policy)
}

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")
        }
    }
}

/// Run the check and write the report to `out`.
pub async fn run(args: &CheckArgs, out: &mut impl Write) -> anyhow::Result<CheckOutcome> {
    // Configuration is resolved before the snapshot is touched.
    let config = resolve_config(args)?;
    tracing::debug!(
        required = config.taxonomy.required_types().len(),
        deprecated = config.taxonomy.deprecated_types().len(),
        policy = %config.normalization.value_policy,
        "Audit configuration resolved"
    );

    let source = SnapshotFileSource::new(&args.snapshot);
    let report = config
        .engine()
        .check_source(&source)
        .await
        .context("Catalog check failed")?;

    writeln!(out, "{}", render(&report, args.format)?).context("Failed to write report")?;

    if args.fail_on_findings && !report.is_clean() {
        Ok(CheckOutcome::FindingsPresent)
    } else {
        Ok(CheckOutcome::Passed)
    }
}
