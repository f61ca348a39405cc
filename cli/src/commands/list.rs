//! List command - print the catalog as a table grouped by prefix

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CatalogArgs;
use crate::output;

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Show only required properties
    #[arg(long)]
    pub required_only: bool
}

pub fn run(args: ListArgs) -> Result<()> {
    let catalog = args.catalog.load_catalog()?;

    output::header("Configuration Properties");
    println!();

    for group in catalog.groups() {
        let descriptors: Vec<_> = group
            .descriptors
            .iter()
            .filter(|d| d.required || !args.required_only)
            .collect();
        if descriptors.is_empty() {
            continue;
        }

        output::subheader(&group.prefix);
        for descriptor in descriptors {
            let marker = if descriptor.required {
                "*".red().bold()
            } else {
                " ".normal()
            };
            println!(
                "  {} {:<40} {:<10} {}",
                marker,
                descriptor.path.cyan(),
                descriptor.semantic_type.to_string().dimmed(),
                descriptor.label_or_default()
            );
        }
        println!();
    }

    println!(
        "  {} properties in {} groups ({} marks required)",
        catalog.len(),
        catalog.groups().len(),
        "*".red().bold()
    );

    Ok(())
}
