//! # Group Scanner
//!
//! Turns group declarations into configuration groups of property
//! descriptors.
//!
//! Scanning is a pure transformation: no I/O, no shared state. The first
//! malformed declaration aborts the scan with a [`ScanError`].
//!
//! Which type names are recognised, and how the `required` flag is inferred,
//! are policy points captured by [`ScanPolicy`].

use crate::descriptor::{
    ConfigGroup, DeclarationSource, FieldDeclaration, GroupDeclaration, PropertyDescriptor,
    SemanticType,
};
use crate::value::text_coerces_to;
use errors::ScanError;
use std::collections::BTreeMap;
use tracing::debug;

/// Prefix marking a declared type as a reference to another group.
pub const GROUP_TYPE_PREFIX: &str = "group:";

/// How the `required` flag of a descriptor is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiredPolicy {
    /// Explicit flag wins; otherwise required unless a default is declared
    /// or the type is `Option<T>`.
    #[default]
    InferFromDefault,

    /// Required only when the declaration says so.
    ExplicitOnly,
}

/// What a declared type name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMapping {
    Semantic(SemanticType),
    /// Nested group living under the given prefix
    Group(String),
}

/// Maps declared type names to semantic types.
///
/// # Example
/// ```rust,no_run
/// use metadata::{SemanticType, TypeRegistry};
///
/// let mut registry = TypeRegistry::default();
/// registry.alias("Port", SemanticType::Integer);
/// registry.group("DatabaseProperties", "app.db");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    mappings: BTreeMap<String, TypeMapping>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();

        let builtins: &[(SemanticType, &[&str])] = &[
            (
                SemanticType::String,
                &["String", "str", "&str", "char", "string", "text"],
            ),
            (SemanticType::Path, &["Path", "PathBuf", "File", "path"]),
            (
                SemanticType::Integer,
                &[
                    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
                    "usize", "int", "integer", "long", "short",
                ],
            ),
            (SemanticType::Boolean, &["bool", "boolean"]),
            (SemanticType::Duration, &["Duration", "duration"]),
            (SemanticType::Enum, &["enum"]),
        ];

        for (semantic_type, names) in builtins {
            for name in *names {
                registry.alias(name, *semantic_type);
            }
        }

        registry
    }
}

impl TypeRegistry {
    /// A registry that recognises nothing but `group:<prefix>` references.
    pub fn empty() -> Self {
        Self {
            mappings: BTreeMap::new(),
        }
    }

    pub fn alias(&mut self, type_name: &str, semantic_type: SemanticType) -> &mut Self {
        self.mappings
            .insert(type_name.to_string(), TypeMapping::Semantic(semantic_type));
        self
    }

    /// Register a host type name as a reference to the group at `prefix`.
    pub fn group(&mut self, type_name: &str, prefix: &str) -> &mut Self {
        self.mappings
            .insert(type_name.to_string(), TypeMapping::Group(prefix.to_string()));
        self
    }

    pub fn resolve(&self, type_name: &str) -> Option<TypeMapping> {
        let type_name = type_name.trim();
        if let Some(prefix) = type_name.strip_prefix(GROUP_TYPE_PREFIX) {
            let prefix = prefix.trim();
            return is_valid_prefix(prefix).then(|| TypeMapping::Group(prefix.to_string()));
        }
        self.mappings.get(type_name).cloned()
    }
}

/// Scanner configuration.
#[derive(Debug, Clone, Default)]
pub struct ScanPolicy {
    pub required: RequiredPolicy,
    pub registry: TypeRegistry,
}

/// Produces configuration groups from declarations.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    policy: ScanPolicy,
}

impl Scanner {
    pub fn new(policy: ScanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScanPolicy {
        &self.policy
    }

    /// Scan every declaration the source enumerates.
    pub fn scan_source<S: DeclarationSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<Vec<ConfigGroup>, ScanError> {
        self.scan(&source.declarations())
    }

    /// Scan declarations into groups, one group per declaration.
    ///
    /// Descriptor order follows field declaration order.
    pub fn scan(&self, declarations: &[GroupDeclaration]) -> Result<Vec<ConfigGroup>, ScanError> {
        let groups = declarations
            .iter()
            .enumerate()
            .map(|(index, declaration)| self.scan_group(index, declaration))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Scanned {} groups with {} properties",
            groups.len(),
            groups.iter().map(|g| g.descriptors.len()).sum::<usize>()
        );

        Ok(groups)
    }

    fn scan_group(
        &self,
        index: usize,
        declaration: &GroupDeclaration,
    ) -> Result<ConfigGroup, ScanError> {
        let prefix = declaration.prefix.trim();
        if !is_valid_prefix(prefix) {
            return Err(ScanError::InvalidPrefix {
                index,
                prefix: declaration.prefix.clone(),
            });
        }
        if declaration.fields.is_empty() {
            return Err(ScanError::EmptyGroup {
                prefix: prefix.to_string(),
            });
        }

        let descriptors = declaration
            .fields
            .iter()
            .map(|field| self.scan_field(prefix, field))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ConfigGroup {
            prefix: prefix.to_string(),
            description: declaration.description.clone(),
            descriptors,
        })
    }

    fn scan_field(
        &self,
        prefix: &str,
        field: &FieldDeclaration,
    ) -> Result<PropertyDescriptor, ScanError> {
        let name = field.name.trim();
        if !is_valid_prefix(name) {
            return Err(ScanError::InvalidField {
                prefix: prefix.to_string(),
                name: field.name.clone(),
            });
        }
        let path = format!("{}.{}", prefix, name);

        let unsupported = || ScanError::UnsupportedType {
            path: path.clone(),
            declared_type: field.declared_type.clone(),
        };

        let (type_name, optional) = unwrap_option(field.declared_type.trim());
        let (semantic_type, group_reference) = match self.policy.registry.resolve(type_name) {
            Some(TypeMapping::Semantic(semantic_type)) => (semantic_type, None),
            Some(TypeMapping::Group(reference)) => (SemanticType::Group, Some(reference)),
            None => return Err(unsupported()),
        };

        let allowed_values: Vec<String> = field
            .values
            .iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if semantic_type == SemanticType::Enum && allowed_values.is_empty() {
            return Err(unsupported());
        }

        let default_value = field.default.clone();
        if let Some(default) = &default_value {
            // Example files hold one property per line.
            if default.contains(['\n', '\r']) {
                return Err(ScanError::InvalidDefault {
                    path,
                    value: default.clone(),
                    expected: format!("single-line {}", semantic_type),
                });
            }
            if semantic_type == SemanticType::Group
                || !text_coerces_to(default, semantic_type, &allowed_values)
            {
                return Err(ScanError::InvalidDefault {
                    path,
                    value: default.clone(),
                    expected: semantic_type.to_string(),
                });
            }
        }

        let required = match (self.policy.required, field.required) {
            (_, Some(explicit)) => explicit,
            (RequiredPolicy::InferFromDefault, None) => default_value.is_none() && !optional,
            (RequiredPolicy::ExplicitOnly, None) => false,
        };

        Ok(PropertyDescriptor {
            path,
            semantic_type,
            label: field.label.clone(),
            required,
            group_prefix: prefix.to_string(),
            default_value,
            allowed_values: if semantic_type == SemanticType::Enum {
                allowed_values
            } else {
                Vec::new()
            },
            group_reference,
        })
    }
}

/// Scan with the default policy.
pub fn scan(declarations: &[GroupDeclaration]) -> Result<Vec<ConfigGroup>, ScanError> {
    Scanner::default().scan(declarations)
}

/// A dotted path whose segments are all non-blank.
fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty()
        && prefix
            .split('.')
            .all(|segment| !segment.is_empty() && !segment.chars().any(char::is_whitespace))
}

fn unwrap_option(type_name: &str) -> (&str, bool) {
    match type_name
        .strip_prefix("Option<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        Some(inner) => (inner.trim(), true),
        None => (type_name, false),
    }
}
