//! # Catalog
//!
//! The complete, deduplicated and ordered set of property descriptors
//! across all scanned groups.
//!
//! Groups are ordered by prefix so that output does not depend on discovery
//! order. Once built a catalog cannot be changed; a new scan builds a new
//! catalog.

use crate::descriptor::{ConfigGroup, DeclarationSource, GroupDeclaration, PropertyDescriptor};
use crate::label::resolve_labels;
use crate::scanner::Scanner;
use errors::{CatalogError, MetadataError};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Immutable catalog of configuration metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    groups: Vec<ConfigGroup>,
    /// path -> (group index, descriptor index)
    index: BTreeMap<String, (usize, usize)>,
}

impl Catalog {
    /// Merge groups into a catalog.
    ///
    /// Groups are sorted by prefix, then by their descriptor paths, then by
    /// description, so any permutation of the same groups builds the same
    /// catalog. Descriptor order inside a group is kept. Fails on the first
    /// path declared twice.
    pub fn build(mut groups: Vec<ConfigGroup>) -> Result<Self, CatalogError> {
        groups.sort_by(|a, b| {
            a.prefix
                .cmp(&b.prefix)
                .then_with(|| paths(a).cmp(paths(b)))
                .then_with(|| a.description.cmp(&b.description))
        });

        let mut index = BTreeMap::new();
        for (group_idx, group) in groups.iter().enumerate() {
            for (descriptor_idx, descriptor) in group.descriptors.iter().enumerate() {
                if index
                    .insert(descriptor.path.clone(), (group_idx, descriptor_idx))
                    .is_some()
                {
                    warn!(
                        "Duplicate property path {} in group {}",
                        descriptor.path, group.prefix
                    );
                    return Err(CatalogError::DuplicatePath {
                        path: descriptor.path.clone(),
                    });
                }
            }
        }

        info!(
            "Built configuration catalog: {} groups, {} properties",
            groups.len(),
            index.len()
        );

        Ok(Self { groups, index })
    }

    /// Groups in catalog order.
    pub fn groups(&self) -> &[ConfigGroup] {
        &self.groups
    }

    /// Every descriptor in catalog order (group order, then declaration
    /// order).
    pub fn descriptors(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.groups.iter().flat_map(|group| group.descriptors.iter())
    }

    pub fn get(&self, path: &str) -> Option<&PropertyDescriptor> {
        self.index
            .get(path)
            .map(|&(group_idx, descriptor_idx)| {
                &self.groups[group_idx].descriptors[descriptor_idx]
            })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn paths(group: &ConfigGroup) -> impl Iterator<Item = &str> {
    group.descriptors.iter().map(|d| d.path.as_str())
}

/// Scan, resolve labels and build in one pass.
///
/// # Usage
/// ```rust,no_run
/// use metadata::{FieldDeclaration, GroupDeclaration, Scanner, scan_and_build};
///
/// let declarations = vec![
///     GroupDeclaration::new("example.abc")
///         .field(FieldDeclaration::new("address", "String").required(true)),
/// ];
/// let catalog = scan_and_build(&Scanner::default(), &declarations).unwrap();
/// assert_eq!(catalog.len(), 1);
/// ```
pub fn scan_and_build<S: DeclarationSource + ?Sized>(
    scanner: &Scanner,
    source: &S,
) -> Result<Catalog, MetadataError> {
    let groups = scanner.scan_source(source)?;
    let catalog = Catalog::build(resolve_labels(groups))?;
    Ok(catalog)
}

/// [`scan_and_build`] with the default scan policy.
pub fn build_catalog(declarations: &[GroupDeclaration]) -> Result<Catalog, MetadataError> {
    scan_and_build(&Scanner::default(), declarations)
}
