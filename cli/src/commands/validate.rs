//! Validate command - check bound values against the catalog
//!
//! Values are layered with precedence: value files (in order) < environment
//! variables (`--env`) < `--set` overrides. Errors fail the command; warnings
//! fail it only with `--strict`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use metadata::{
    BoundValue, BoundValues, ValidationIssue, ValidationReport, load_from_env, load_values,
    merge_bound_values, validate
};

use super::CatalogArgs;
use crate::output;

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Bound-value files (.properties, .toml, .yaml, .yml, .json); later files win
    #[arg(short = 'v', long = "values", value_name = "FILE")]
    pub values: Vec<PathBuf>,

    /// Also bind properties from environment variables
    #[arg(long)]
    pub env: bool,

    /// Prefix for environment variable names
    #[arg(long, env = "CONFMETA_ENV_PREFIX", value_name = "PREFIX")]
    pub env_prefix: Option<String>,

    /// Explicit value, PATH=VALUE (highest precedence)
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub overrides: Vec<String>,

    /// Fail on warnings (exit code 1)
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let catalog = args.catalog.load_catalog()?;

    let mut file_values = BoundValues::new();
    for path in &args.values {
        file_values.extend(load_values(path)?);
    }

    let env_values = if args.env {
        load_from_env(&catalog, args.env_prefix.as_deref())
    } else {
        BoundValues::new()
    };

    let overrides = parse_overrides(&args.overrides)?;
    let values = merge_bound_values(
        file_values,
        "file",
        env_values,
        "env",
        (!overrides.is_empty()).then_some(overrides),
        "cli"
    );

    let report = validate(&catalog, &values);
    let failed = !report.is_valid() || (args.strict && report.warnings().next().is_some());

    if args.json {
        let output = serde_json::json!({
            "success": !failed,
            "valid": report.is_valid(),
            "strict": args.strict,
            "issues": report.issues(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report);
    }

    if failed {
        if !args.json {
            if report.is_valid() {
                output::warn("Validation failed (strict mode) with warnings");
            } else {
                output::error("Validation failed with errors");
            }
        }
        std::process::exit(1);
    }

    if !args.json {
        output::success("Configuration is valid");
    }

    Ok(())
}

fn parse_overrides(overrides: &[String]) -> Result<BoundValues> {
    overrides
        .iter()
        .map(|entry| {
            let (path, value) = entry
                .split_once('=')
                .with_context(|| format!("Invalid --set {:?}, expected PATH=VALUE", entry))?;
            Ok((path.trim().to_string(), BoundValue::Text(value.to_string())))
        })
        .collect()
}

fn print_report(report: &ValidationReport) {
    output::header("Configuration Validation");
    println!();

    let errors: Vec<_> = report.errors().collect();
    let warnings: Vec<_> = report.warnings().collect();

    if !errors.is_empty() {
        output::subheader("Errors");
        for issue in &errors {
            print_issue(issue);
        }
        println!();
    }

    if !warnings.is_empty() {
        output::subheader("Warnings");
        for issue in &warnings {
            print_issue(issue);
        }
        println!();
    }

    output::subheader("Summary");
    println!();
    println!(
        "  {} {} errors",
        if errors.is_empty() {
            "✓".green()
        } else {
            "✗".red()
        },
        errors.len()
    );
    println!(
        "  {} {} warnings",
        if warnings.is_empty() {
            "✓".green()
        } else {
            "⚠".yellow()
        },
        warnings.len()
    );
    println!();
}

fn print_issue(issue: &ValidationIssue) {
    println!(
        "  {} {} {}",
        format!("[{}]", issue.kind.as_str()).dimmed(),
        issue.path.cyan(),
        issue.detail
    );
}
