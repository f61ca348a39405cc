//! # Configuration Metadata Engine
//!
//! Builds a documented, validated catalog of every configurable property a
//! deployment may set.
//!
//! This crate provides:
//! - Group scanning: declarations to property descriptors
//! - Label resolution (explicit or derived from the property path)
//! - Catalog building with duplicate-path detection
//! - Validation of runtime-bound values against the catalog
//! - Rendering to example-properties text and documentation tables
//! - Loading declarations and bound values from TOML/YAML/JSON/properties
//!   files and from environment variables
//!
//! # Pipeline
//! Scanner -> label resolver -> catalog builder -> {validator, renderer}.
//! Every stage is a pure, synchronous transformation; the finished
//! [`Catalog`] is immutable and can be shared freely between readers.

pub mod catalog;
pub mod descriptor;
pub mod env_loader;
pub mod file_loader;
pub mod label;
pub mod precedence;
pub mod render;
pub mod scanner;
pub mod validation;
pub mod value;

pub use catalog::{Catalog, build_catalog, scan_and_build};
pub use descriptor::{
    ConfigGroup, DeclarationSource, DescribeGroup, FieldDeclaration, GroupDeclaration,
    PropertyDescriptor, SemanticType,
};
pub use env_loader::{env_var_name, load_from_env};
pub use errors::{CatalogError, LoadError, MetadataError, ScanError};
pub use file_loader::{
    DeclarationDocument, FileFormat, load_declaration_files, load_declarations, load_values,
};
pub use label::{default_label, resolve_labels};
pub use precedence::merge_bound_values;
pub use render::{
    DocRow, documentation_table, render_example_properties, render_json, render_markdown,
};
pub use scanner::{RequiredPolicy, ScanPolicy, Scanner, TypeMapping, TypeRegistry, scan};
pub use validation::{IssueKind, Severity, ValidationIssue, ValidationReport, validate};
pub use value::{BoundValue, BoundValues};
