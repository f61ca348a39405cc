//! Docs command - render property documentation
//!
//! Markdown output is grouped by prefix; JSON output is the flat table of
//! `{path, label, semantic_type, required}` rows in catalog order.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use metadata::{render_json, render_markdown};

use super::CatalogArgs;
use crate::output;

#[derive(Args)]
pub struct DocsArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    #[arg(long, value_enum, default_value = "markdown")]
    pub format: DocsFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocsFormat {
    Markdown,
    Json
}

pub fn run(args: DocsArgs) -> Result<()> {
    let catalog = args.catalog.load_catalog()?;

    let rendered = match args.format {
        DocsFormat::Markdown => render_markdown(&catalog),
        DocsFormat::Json => {
            let mut json = render_json(&catalog)?;
            json.push('\n');
            json
        }
    };

    output::emit(&rendered, args.output.as_deref())
}
