//! # Value Precedence
//!
//! Merges bound values from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. Explicit overrides (highest priority)
//! 2. Environment variables
//! 3. Configuration file (lowest priority)

use crate::value::BoundValues;

/// Merge bound-value sources with precedence.
///
/// ## Usage
/// ```rust,no_run
/// use metadata::{BoundValues, merge_bound_values};
///
/// let from_file = BoundValues::new();
/// let from_env = BoundValues::new();
/// let merged = merge_bound_values(from_file, "file", from_env, "env", None, "cli");
/// assert!(merged.is_empty());
/// ```
///
/// Later sources replace earlier values path by path; paths only one source
/// sets are kept.
pub fn merge_bound_values(
    file_values: BoundValues,
    file_source_name: &str,
    env_values: BoundValues,
    env_source_name: &str,
    overrides: Option<BoundValues>,
    overrides_source_name: &str,
) -> BoundValues {
    let mut values = BoundValues::new();

    values = merge_with_logging(values, file_values, file_source_name);
    values = merge_with_logging(values, env_values, env_source_name);

    if let Some(overrides) = overrides {
        values = merge_with_logging(values, overrides, overrides_source_name);
    }

    values
}

fn merge_with_logging(
    mut base: BoundValues,
    override_values: BoundValues,
    source_name: &str,
) -> BoundValues {
    let mut changes = Vec::new();

    for (path, value) in override_values {
        match base.insert(path.clone(), value) {
            Some(previous) if base.get(&path) != Some(&previous) => changes.push(path),
            _ => {}
        }
    }

    if !changes.is_empty() {
        tracing::info!("Configuration from {}: {:?}", source_name, changes);
    }

    base
}
