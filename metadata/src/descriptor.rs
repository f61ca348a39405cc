//! # Metadata Model
//!
//! Declarations supplied by the host and the descriptors the scanner
//! derives from them.
//!
//! Declarations are the input boundary: a host either builds them directly,
//! loads them from a declaration file, or implements [`DescribeGroup`] on its
//! own configuration types. Descriptors and groups are the scanner's output
//! and are never mutated once a catalog owns them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Meaning-bearing classification of a property value.
///
/// Drives both validation (coercion rules) and placeholder rendering.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SemanticType {
    String,
    Path,
    Integer,
    Boolean,
    Duration,
    Enum,
    /// Reference to a nested configuration group
    Group,
}

impl SemanticType {
    /// Placeholder written to example files when no default is declared.
    pub fn placeholder(&self) -> &'static str {
        match self {
            SemanticType::Integer => "0",
            SemanticType::Boolean => "false",
            SemanticType::Duration => "0s",
            SemanticType::String
            | SemanticType::Path
            | SemanticType::Enum
            | SemanticType::Group => "",
        }
    }
}

/// One field of a group declaration, as described by the host.
///
/// # Example
/// ```rust,no_run
/// use metadata::FieldDeclaration;
///
/// let field = FieldDeclaration::new("path", "Path")
///     .with_label("application-test.properties path");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FieldDeclaration {
    /// Path segment relative to the group prefix
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Declared type name, resolved through the scanner's type registry
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255))]
    pub declared_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Explicit required flag; `None` defers to the scan policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Members of an `enum` type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            label: None,
            required: None,
            default: None,
            values: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// A configuration group as declared by the host: a prefix and its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GroupDeclaration {
    pub prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1), nested)]
    pub fields: Vec<FieldDeclaration>,
}

impl GroupDeclaration {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }
}

/// Implemented by host configuration types that describe themselves.
///
/// This replaces annotation scanning: the type states its prefix and fields
/// explicitly.
pub trait DescribeGroup {
    fn describe() -> GroupDeclaration;
}

/// Anything that can enumerate group declarations for a scan pass.
pub trait DeclarationSource {
    fn declarations(&self) -> Vec<GroupDeclaration>;
}

impl DeclarationSource for [GroupDeclaration] {
    fn declarations(&self) -> Vec<GroupDeclaration> {
        self.to_vec()
    }
}

impl DeclarationSource for Vec<GroupDeclaration> {
    fn declarations(&self) -> Vec<GroupDeclaration> {
        self.clone()
    }
}

impl<const N: usize> DeclarationSource for [GroupDeclaration; N] {
    fn declarations(&self) -> Vec<GroupDeclaration> {
        self.to_vec()
    }
}

/// Metadata record for one configurable field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    /// Full dotted path, `<group_prefix>.<field>`
    pub path: String,
    pub semantic_type: SemanticType,
    /// Human-readable label.
    ///
    /// The scanner copies the declared label as-is, so it may be `None`
    /// there. After
    /// [`resolve_labels`](crate::label::resolve_labels), and therefore in
    /// every [`Catalog`](crate::catalog::Catalog) built by
    /// [`scan_and_build`](crate::catalog::scan_and_build), it is always
    /// `Some`. Read it through [`label_or_default`](Self::label_or_default).
    pub label: Option<String>,
    pub required: bool,
    pub group_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    /// Prefix of the referenced group when `semantic_type` is `Group`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_reference: Option<String>,
}

impl PropertyDescriptor {
    /// Final dotted segment of the path.
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// The resolved label, or one derived from the path when none was
    /// attached.
    pub fn label_or_default(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => crate::label::default_label(&self.path),
        }
    }

    /// Value written to example files for this property.
    pub fn placeholder(&self) -> &str {
        self.default_value
            .as_deref()
            .unwrap_or_else(|| self.semantic_type.placeholder())
    }
}

/// Descriptors sharing one prefix, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigGroup {
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub descriptors: Vec<PropertyDescriptor>,
}
