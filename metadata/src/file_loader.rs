//! # Declaration and Value Files
//!
//! Loads group declarations and bound values from TOML, YAML or JSON files.
//! Bound values may also come from `.properties` files.
//!
//! The format is detected from the file extension.

use crate::descriptor::{DeclarationSource, GroupDeclaration};
use crate::value::{BoundValue, BoundValues};
use errors::LoadError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Yaml,
    Json,
    Properties,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| LoadError::NoExtension {
                path: path.display().to_string(),
            })?;

        match extension.to_ascii_lowercase().as_str() {
            "toml" => Ok(FileFormat::Toml),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "json" => Ok(FileFormat::Json),
            "properties" => Ok(FileFormat::Properties),
            other => Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FileFormat::Toml => "TOML",
            FileFormat::Yaml => "YAML",
            FileFormat::Json => "JSON",
            FileFormat::Properties => "properties",
        }
    }
}

/// A declaration file: the list of groups a host declares.
///
/// ```toml
/// [[groups]]
/// prefix = "example.abc"
///
/// [[groups.fields]]
/// name = "address"
/// type = "String"
/// required = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DeclarationDocument {
    #[validate(length(min = 1), nested)]
    pub groups: Vec<GroupDeclaration>,
}

impl DeclarationSource for DeclarationDocument {
    fn declarations(&self) -> Vec<GroupDeclaration> {
        self.groups.clone()
    }
}

/// Load and structurally check a declaration file.
///
/// ## Error Handling
/// Returns `LoadError` for:
/// - File not found
/// - Missing or unsupported extension (`.properties` holds no declarations)
/// - Invalid TOML / YAML / JSON syntax
/// - A document without groups, a group without fields, or a field without
///   a name or type
pub fn load_declarations(path: &Path) -> Result<DeclarationDocument, LoadError> {
    let format = FileFormat::from_path(path)?;
    if format == FileFormat::Properties {
        return Err(LoadError::UnsupportedFormat {
            extension: "properties".to_string(),
        });
    }
    let contents = read(path)?;

    let document: DeclarationDocument = parse_document(format, path, &contents)?;

    document
        .validate()
        .map_err(|e| LoadError::InvalidDocument {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    debug!(
        "Loaded {} group declarations from {}",
        document.groups.len(),
        path.display()
    );

    Ok(document)
}

/// Load several declaration files into one list, in argument order.
pub fn load_declaration_files(paths: &[PathBuf]) -> Result<Vec<GroupDeclaration>, LoadError> {
    let mut declarations = Vec::new();
    for path in paths {
        declarations.extend(load_declarations(path)?.groups);
    }
    Ok(declarations)
}

/// Load bound values from a configuration file.
///
/// Nested tables are flattened into dotted paths: `[server] port = 8080`
/// binds `server.port`.
pub fn load_values(path: &Path) -> Result<BoundValues, LoadError> {
    let format = FileFormat::from_path(path)?;
    let contents = read(path)?;

    let values = match format {
        FileFormat::Properties => parse_properties(&contents),
        FileFormat::Toml => {
            let table: toml::Table = parse_document(format, path, &contents)?;
            flatten(&toml_tree(toml::Value::Table(table)))
        }
        _ => flatten(&parse_document::<Value>(format, path, &contents)?),
    };

    debug!("Loaded {} bound values from {}", values.len(), path.display());
    Ok(values)
}

/// Parse `.properties` text: `key=value` or `key: value` lines, `#` and `!`
/// comments.
pub fn parse_properties(contents: &str) -> BoundValues {
    let mut values = BoundValues::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let (key, value) = match line.find(['=', ':']) {
            Some(idx) => (&line[..idx], &line[idx + 1..]),
            None => (line, ""),
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        values.insert(key.to_string(), BoundValue::Text(value.trim().to_string()));
    }

    values
}

/// Flatten a document tree into dotted paths.
pub fn flatten(tree: &Value) -> BoundValues {
    let mut values = BoundValues::new();
    flatten_into(tree, String::new(), &mut values);
    values
}

fn flatten_into(node: &Value, path: String, values: &mut BoundValues) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_into(child, child_path, values);
            }
        }
        Value::Null => {}
        _ if path.is_empty() => {}
        Value::Bool(b) => {
            values.insert(path, BoundValue::Boolean(*b));
        }
        Value::Number(n) => {
            let value = match n.as_i64() {
                Some(i) => BoundValue::Integer(i),
                None => BoundValue::Text(n.to_string()),
            };
            values.insert(path, value);
        }
        Value::String(s) => {
            values.insert(path, BoundValue::Text(s.clone()));
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            values.insert(path, BoundValue::Text(joined));
        }
    }
}

/// Convert a TOML tree into the common document tree. Datetimes become their
/// TOML text, e.g. `1979-05-27` or `1979-05-27T07:32:00Z`.
fn toml_tree(node: toml::Value) -> Value {
    match node {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map_or_else(|| Value::String(f.to_string()), Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_tree).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, child)| (key, toml_tree(child)))
                .collect(),
        ),
    }
}

fn parse_document<T: DeserializeOwned>(
    format: FileFormat,
    path: &Path,
    contents: &str,
) -> Result<T, LoadError> {
    match format {
        FileFormat::Toml => toml::from_str(contents).map_err(|e| parse_error(format, path, e)),
        FileFormat::Yaml => {
            serde_yaml::from_str(contents).map_err(|e| parse_error(format, path, e))
        }
        FileFormat::Json => {
            serde_json::from_str(contents).map_err(|e| parse_error(format, path, e))
        }
        FileFormat::Properties => Err(LoadError::UnsupportedFormat {
            extension: "properties".to_string(),
        }),
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_error(format: FileFormat, path: &Path, error: impl std::fmt::Display) -> LoadError {
    LoadError::Parse {
        format: format.name().to_string(),
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;
    use crate::descriptor::FieldDeclaration;
    use crate::validation::validate;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_declarations_toml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "groups.toml",
            r#"
[[groups]]
prefix = "example.abc"

[[groups.fields]]
name = "address"
type = "String"
required = true

[[groups.fields]]
name = "path"
type = "Path"
label = "application-test.properties path"
"#,
        );

        let document = load_declarations(&path).unwrap();
        assert_eq!(document.groups.len(), 1);
        assert_eq!(document.groups[0].fields.len(), 2);
        assert_eq!(document.groups[0].fields[0].required, Some(true));
        assert_eq!(
            document.groups[0].fields[1].label.as_deref(),
            Some("application-test.properties path")
        );
    }

    #[test]
    fn test_load_declarations_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "groups.yml",
            r#"
groups:
  - prefix: sync
    description: Sync settings
    fields:
      - name: mode
        type: enum
        values: [local, remote]
        default: local
"#,
        );

        let document = load_declarations(&path).unwrap();
        assert_eq!(document.groups[0].description.as_deref(), Some("Sync settings"));
        assert_eq!(document.groups[0].fields[0].values, vec!["local", "remote"]);
    }

    #[test]
    fn test_load_declarations_json() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "groups.json",
            r#"{"groups":[{"prefix":"a","fields":[{"name":"b","type":"bool"}]}]}"#,
        );
        let document = load_declarations(&path).unwrap();
        assert_eq!(document.groups[0].fields[0].declared_type, "bool");
    }

    #[test]
    fn test_load_declarations_rejects_empty_group() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "groups.yaml", "groups:\n  - prefix: a\n    fields: []\n");
        assert!(matches!(
            load_declarations(&path),
            Err(LoadError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_load_declarations_rejects_no_groups() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "groups.json", r#"{"groups":[]}"#);
        assert!(matches!(
            load_declarations(&path),
            Err(LoadError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_load_declarations_invalid_syntax() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "groups.toml", "[[groups]\n");
        assert!(matches!(load_declarations(&path), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_load_declarations_not_found() {
        let result = load_declarations(Path::new("/nonexistent/groups.toml"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_unsupported_and_missing_extensions() {
        assert!(matches!(
            FileFormat::from_path(Path::new("groups.ini")),
            Err(LoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            FileFormat::from_path(Path::new("groups")),
            Err(LoadError::NoExtension { .. })
        ));
        assert!(matches!(
            load_declarations(Path::new("groups.properties")),
            Err(LoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_load_values_toml_flattens_tables() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "app.toml",
            r#"
[server]
host = "localhost"
port = 8080
tls = true
ratio = 0.5
tags = ["a", "b"]
"#,
        );

        let values = load_values(&path).unwrap();
        assert_eq!(values["server.host"], BoundValue::Text("localhost".to_string()));
        assert_eq!(values["server.port"], BoundValue::Integer(8080));
        assert_eq!(values["server.tls"], BoundValue::Boolean(true));
        assert_eq!(values["server.ratio"], BoundValue::Text("0.5".to_string()));
        assert_eq!(values["server.tags"], BoundValue::Text("a,b".to_string()));
    }

    #[test]
    fn test_load_values_toml_datetimes_bind_as_text() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "app.toml",
            "[app]\nstart = 1979-05-27\nstamp = 1979-05-27T07:32:00Z\nwindows = [07:32:00]\n",
        );

        let values = load_values(&path).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values["app.start"], BoundValue::from("1979-05-27"));
        assert_eq!(values["app.stamp"], BoundValue::from("1979-05-27T07:32:00Z"));
        assert_eq!(values["app.windows"], BoundValue::from("07:32:00"));

        let catalog = build_catalog(&[GroupDeclaration::new("app")
            .field(FieldDeclaration::new("start", "String"))
            .field(FieldDeclaration::new("stamp", "String"))
            .field(FieldDeclaration::new("windows", "String"))])
        .unwrap();
        assert!(validate(&catalog, &values).is_empty());
    }

    #[test]
    fn test_load_values_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "app.yaml",
            "example:\n  abc:\n    address: here\n    missing: ~\n",
        );
        let values = load_values(&path).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values["example.abc.address"], BoundValue::from("here"));
    }

    #[test]
    fn test_parse_properties() {
        let values = parse_properties(
            "# comment\n! other comment\n\n\
             example.abc.address = here\nexample.abc.path: /tmp/x\nflag\n",
        );
        assert_eq!(values.len(), 3);
        assert_eq!(values["example.abc.address"], BoundValue::from("here"));
        assert_eq!(values["example.abc.path"], BoundValue::from("/tmp/x"));
        assert_eq!(values["flag"], BoundValue::from(""));
    }

    #[test]
    fn test_load_declaration_files_concatenates() {
        let dir = TempDir::new().unwrap();
        let a = write(
            &dir,
            "a.json",
            r#"{"groups":[{"prefix":"a","fields":[{"name":"x","type":"int"}]}]}"#,
        );
        let b = write(
            &dir,
            "b.json",
            r#"{"groups":[{"prefix":"b","fields":[{"name":"y","type":"int"}]}]}"#,
        );
        let declarations = load_declaration_files(&[a, b]).unwrap();
        let prefixes: Vec<_> = declarations.iter().map(|d| d.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["a", "b"]);
    }
}
