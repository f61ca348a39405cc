//! Example command - render an example properties file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use metadata::render_example_properties;

use super::CatalogArgs;
use crate::output;

#[derive(Args)]
pub struct ExampleArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>
}

pub fn run(args: ExampleArgs) -> Result<()> {
    let catalog = args.catalog.load_catalog()?;
    output::emit(&render_example_properties(&catalog), args.output.as_deref())
}
