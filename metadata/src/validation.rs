//! # Bound Value Validation
//!
//! Checks runtime-bound values against a catalog.
//!
//! Validation never fails: every finding is collected into a
//! [`ValidationReport`] so a host sees all problems in one pass and decides
//! itself whether to block startup.

use crate::catalog::Catalog;
use crate::descriptor::{PropertyDescriptor, SemanticType};
use crate::value::{BoundValues, coerces_to};
use serde::Serialize;
use strum::Display;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IssueKind {
    MissingRequired,
    TypeMismatch { expected: SemanticType },
    UnknownProperty,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::MissingRequired | IssueKind::TypeMismatch { .. } => Severity::Error,
            IssueKind::UnknownProperty => Severity::Warning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingRequired => "missing-required",
            IssueKind::TypeMismatch { .. } => "type-mismatch",
            IssueKind::UnknownProperty => "unknown-property",
        }
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: IssueKind,
    pub path: String,
    pub detail: String,
}

impl ValidationIssue {
    fn new(kind: IssueKind, path: &str, detail: String) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            path: path.to_string(),
            detail,
        }
    }
}

/// Ordered findings: errors first, then warnings, each sorted by path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// True when no error-severity issue was found.
    pub fn is_valid(&self) -> bool {
        self.issues.iter().all(|i| i.severity != Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate bound values against the catalog.
///
/// ## Rules
/// - required descriptor without a bound value: `MissingRequired` (error)
/// - bound value that does not coerce to the descriptor type:
///   `TypeMismatch` (error)
/// - bound path unknown to the catalog: `UnknownProperty` (warning)
///
/// A nested-group reference counts as bound when any bound path lies
/// beneath it.
pub fn validate(catalog: &Catalog, values: &BoundValues) -> ValidationReport {
    let mut issues = Vec::new();

    for descriptor in catalog.descriptors() {
        if descriptor.required && !is_bound(descriptor, values) {
            issues.push(ValidationIssue::new(
                IssueKind::MissingRequired,
                &descriptor.path,
                format!("{} is required but has no value", descriptor.path),
            ));
        }
    }

    for (path, value) in values {
        match catalog.get(path) {
            Some(descriptor) => {
                if !coerces_to(value, descriptor.semantic_type, &descriptor.allowed_values) {
                    issues.push(ValidationIssue::new(
                        IssueKind::TypeMismatch {
                            expected: descriptor.semantic_type,
                        },
                        path,
                        mismatch_detail(descriptor, &value.to_string()),
                    ));
                }
            }
            None => issues.push(ValidationIssue::new(
                IssueKind::UnknownProperty,
                path,
                format!("{} is not a known configuration property", path),
            )),
        }
    }

    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.path.cmp(&b.path))
            .then_with(|| a.kind.cmp(&b.kind))
    });

    let report = ValidationReport { issues };
    debug!(
        "Validated {} bound values: {} errors, {} warnings",
        values.len(),
        report.errors().count(),
        report.warnings().count()
    );
    report
}

fn is_bound(descriptor: &PropertyDescriptor, values: &BoundValues) -> bool {
    if values.contains_key(&descriptor.path) {
        return true;
    }
    if descriptor.semantic_type != SemanticType::Group {
        return false;
    }
    let nested = format!("{}.", descriptor.path);
    values
        .range(nested.clone()..)
        .next()
        .is_some_and(|(path, _)| path.starts_with(&nested))
}

fn mismatch_detail(descriptor: &PropertyDescriptor, value: &str) -> String {
    match descriptor.semantic_type {
        SemanticType::Enum => format!(
            "{:?} is not one of [{}]",
            value,
            descriptor.allowed_values.join(", ")
        ),
        SemanticType::Group => format!(
            "{} is a group and cannot hold a value; set its properties instead",
            descriptor.path
        ),
        expected => format!("{:?} is not a valid {}", value, expected),
    }
}
