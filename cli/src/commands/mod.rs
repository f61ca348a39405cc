pub mod docs;
pub mod example;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use metadata::{
    Catalog, RequiredPolicy, ScanPolicy, Scanner, SemanticType, TypeRegistry,
    load_declaration_files, scan_and_build,
};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "confmeta",
    author,
    version,
    about = "confmeta - configuration metadata catalog",
    long_about = "Scans configuration group declarations, builds a catalog of every \
                  configurable property,\nvalidates bound values against it and renders example \
                  files and documentation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List every property in the catalog")]
    List(list::ListArgs),

    #[command(about = "Render an example properties file")]
    Example(example::ExampleArgs),

    #[command(about = "Render property documentation (markdown, json)")]
    Docs(docs::DocsArgs),

    #[command(about = "Validate bound values against the catalog")]
    Validate(validate::ValidateArgs)
}

/// Options shared by every command that builds a catalog.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Declaration files (.toml, .yaml, .yml, .json)
    #[arg(short = 'd', long = "declarations", value_name = "FILE", required = true)]
    pub declarations: Vec<PathBuf>,

    /// Mark properties required only when declared so
    #[arg(long)]
    pub explicit_required: bool,

    /// Extra type alias, NAME=TYPE (e.g. Port=integer)
    #[arg(long = "alias", value_name = "NAME=TYPE")]
    pub aliases: Vec<String>
}

impl CatalogArgs {
    pub fn scanner(&self) -> Result<Scanner> {
        let mut registry = TypeRegistry::default();
        for alias in &self.aliases {
            let (name, semantic) = alias
                .split_once('=')
                .with_context(|| format!("Invalid alias {:?}, expected NAME=TYPE", alias))?;
            let semantic_type = semantic
                .trim()
                .parse::<SemanticType>()
                .with_context(|| format!("Unknown semantic type {:?}", semantic.trim()))?;
            registry.alias(name.trim(), semantic_type);
        }

        let required = if self.explicit_required {
            RequiredPolicy::ExplicitOnly
        } else {
            RequiredPolicy::InferFromDefault
        };

        Ok(Scanner::new(ScanPolicy { required, registry }))
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        let declarations = load_declaration_files(&self.declarations)?;
        let catalog = scan_and_build(&self.scanner()?, &declarations)
            .context("Failed to build configuration catalog")?;
        debug!(
            "Catalog from {} declaration files: {} properties",
            self.declarations.len(),
            catalog.len()
        );
        Ok(catalog)
    }
}
