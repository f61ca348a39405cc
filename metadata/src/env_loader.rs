//! # Environment Variable Loader
//!
//! Binds catalog properties from environment variables following 12-factor
//! app principles.
//!
//! # Naming Convention
//! The variable for a property is its path upper-cased with `.` and `-`
//! replaced by `_`, optionally behind a prefix:
//! - `example.abc.address` -> `EXAMPLE_ABC_ADDRESS`
//! - with prefix `APP`: `example.abc.max-size` -> `APP_EXAMPLE_ABC_MAX_SIZE`

use crate::catalog::Catalog;
use crate::value::{BoundValue, BoundValues};
use std::env;
use tracing::debug;

/// Environment variable name for a property path.
pub fn env_var_name(path: &str, prefix: Option<&str>) -> String {
    let name: String = path
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect();

    match prefix.map(str::trim).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}_{}", prefix.trim_end_matches('_').to_ascii_uppercase(), name),
        None => name,
    }
}

/// Load bound values for every catalog property that has an environment
/// variable set.
///
/// Values are bound as text; coercion happens during validation.
pub fn load_from_env(catalog: &Catalog, prefix: Option<&str>) -> BoundValues {
    let mut values = BoundValues::new();

    for descriptor in catalog.descriptors() {
        let name = env_var_name(&descriptor.path, prefix);
        if let Ok(value) = env::var(&name) {
            debug!("Bound {} from environment variable {}", descriptor.path, name);
            values.insert(descriptor.path.clone(), BoundValue::Text(value));
        }
    }

    values
}
