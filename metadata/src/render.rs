//! # Catalog Rendering
//!
//! Serializes a catalog into external forms:
//! - example-properties text (`path=<placeholder>` per property)
//! - documentation table rows, plus Markdown and JSON renderings of them
//!
//! Every function here is a pure function of the catalog, so identical
//! catalogs render byte-identical output.

use crate::catalog::Catalog;
use crate::descriptor::SemanticType;
use serde::Serialize;
use std::fmt::Write;

/// One row of the documentation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRow {
    pub path: String,
    pub label: String,
    pub semantic_type: SemanticType,
    pub required: bool,
}

/// Render example-properties text.
///
/// ```text
/// # example.abc
/// example.abc.address=
/// example.abc.path=
/// ```
///
/// One block per group in catalog order, separated by a blank line.
pub fn render_example_properties(catalog: &Catalog) -> String {
    let mut out = String::new();

    for (i, group) in catalog.groups().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "# {}", group.prefix);
        for descriptor in &group.descriptors {
            let _ = writeln!(out, "{}={}", descriptor.path, descriptor.placeholder());
        }
    }

    out
}

/// Documentation rows in catalog order.
pub fn documentation_table(catalog: &Catalog) -> Vec<DocRow> {
    catalog
        .descriptors()
        .map(|descriptor| DocRow {
            path: descriptor.path.clone(),
            label: descriptor.label_or_default(),
            semantic_type: descriptor.semantic_type,
            required: descriptor.required,
        })
        .collect()
}

/// Render the documentation table as Markdown, one section per group.
pub fn render_markdown(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("# Configuration Properties\n");

    for group in catalog.groups() {
        let _ = writeln!(out, "\n## `{}`\n", group.prefix);
        if let Some(description) = group.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                let _ = writeln!(out, "{}\n", description);
            }
        }
        out.push_str("| Path | Label | Type | Required | Default |\n");
        out.push_str("|------|-------|------|----------|---------|\n");
        for descriptor in &group.descriptors {
            let type_cell = match descriptor.semantic_type {
                SemanticType::Enum => format!("enum ({})", descriptor.allowed_values.join(" \\| ")),
                SemanticType::Group => match &descriptor.group_reference {
                    Some(reference) => format!("group (`{}`)", reference),
                    None => "group".to_string(),
                },
                other => other.to_string(),
            };
            let _ = writeln!(
                out,
                "| `{}` | {} | {} | {} | {} |",
                descriptor.path,
                escape_cell(&descriptor.label_or_default()),
                type_cell,
                if descriptor.required { "yes" } else { "no" },
                descriptor
                    .default_value
                    .as_deref()
                    .map(|d| format!("`{}`", d))
                    .unwrap_or_default()
            );
        }
    }

    out
}

/// Render the documentation table as pretty-printed JSON.
pub fn render_json(catalog: &Catalog) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&documentation_table(catalog))
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
