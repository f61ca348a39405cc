use assert_cmd::{Command, cargo_bin_cmd};
use predicates::prelude::predicate;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn confmeta() -> Command {
    cargo_bin_cmd!("confmeta")
}

const DECLARATIONS: &str = r#"
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
"#;

fn fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

mod help_and_version {
    use super::*;

    #[test]
    fn test_help_flag() {
        confmeta()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("Commands:"));
    }

    #[test]
    fn test_version_flag() {
        confmeta()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("confmeta"));
    }

    #[test]
    fn test_no_args_shows_help() {
        confmeta()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage:"));
    }

    #[test]
    fn test_declarations_are_required() {
        confmeta()
            .arg("example")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--declarations"));
    }
}

mod example_subcommand {
    use super::*;

    #[test]
    fn test_example_renders_properties() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);

        confmeta()
            .arg("example")
            .arg("-d")
            .arg(&declarations)
            .assert()
            .success()
            .stdout("# example.abc\nexample.abc.address=\nexample.abc.path=\n");
    }

    #[test]
    fn test_example_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);
        let out = dir.path().join("application.properties");

        confmeta()
            .arg("example")
            .arg("-d")
            .arg(&declarations)
            .arg("-o")
            .arg(&out)
            .assert()
            .success();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "# example.abc\nexample.abc.address=\nexample.abc.path=\n"
        );
    }

    #[test]
    fn test_duplicate_path_fails() {
        let dir = TempDir::new().unwrap();
        let first = fixture(&dir, "a.toml", DECLARATIONS);
        let second = fixture(&dir, "b.toml", DECLARATIONS);

        confmeta()
            .arg("example")
            .arg("-d")
            .arg(&first)
            .arg("-d")
            .arg(&second)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Duplicate property path: example.abc.address"));
    }

    #[test]
    fn test_unsupported_type_fails() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(
            &dir,
            "groups.yaml",
            "groups:\n  - prefix: net\n    fields:\n      - name: socket\n        type: Socket\n",
        );

        confmeta()
            .arg("example")
            .arg("-d")
            .arg(&declarations)
            .assert()
            .failure()
            .stderr(predicate::str::contains("net.socket"));
    }
}

mod docs_subcommand {
    use super::*;

    #[test]
    fn test_docs_markdown() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);

        confmeta()
            .arg("docs")
            .arg("-d")
            .arg(&declarations)
            .assert()
            .success()
            .stdout(predicate::str::contains("## `example.abc`"))
            .stdout(predicate::str::contains("| `example.abc.address` | Address | string | yes |"));
    }

    #[test]
    fn test_docs_json() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);

        let output = confmeta()
            .arg("docs")
            .arg("-d")
            .arg(&declarations)
            .arg("--format")
            .arg("json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(rows[0]["path"], "example.abc.address");
        assert_eq!(rows[0]["label"], "Address");
        assert_eq!(rows[1]["semantic_type"], "path");
        assert_eq!(rows[1]["required"], true);
    }
}

mod validate_subcommand {
    use super::*;

    #[test]
    fn test_validate_missing_required_fails() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);

        confmeta()
            .arg("validate")
            .arg("-d")
            .arg(&declarations)
            .assert()
            .failure()
            .stdout(predicate::str::contains("missing-required"))
            .stdout(predicate::str::contains("example.abc.address"));
    }

    #[test]
    fn test_validate_with_values_file() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);
        let values = fixture(
            &dir,
            "application.properties",
            "example.abc.address=here\nexample.abc.path=/tmp/x\n",
        );

        confmeta()
            .arg("validate")
            .arg("-d")
            .arg(&declarations)
            .arg("-v")
            .arg(&values)
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn test_validate_unknown_property_only_fails_in_strict_mode() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);

        let base = || {
            let mut cmd = confmeta();
            cmd.arg("validate")
                .arg("-d")
                .arg(&declarations)
                .arg("--set")
                .arg("example.abc.address=here")
                .arg("--set")
                .arg("example.abc.path=/tmp/x")
                .arg("--set")
                .arg("example.abc.future=1");
            cmd
        };

        base()
            .assert()
            .success()
            .stdout(predicate::str::contains("unknown-property"));
        base().arg("--strict").assert().failure();
    }

    #[test]
    fn test_validate_json_output() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);

        let output = confmeta()
            .arg("validate")
            .arg("-d")
            .arg(&declarations)
            .arg("--set")
            .arg("example.abc.path=/tmp/x")
            .arg("--json")
            .output()
            .unwrap();
        assert!(!output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["valid"], false);
        assert_eq!(report["issues"][0]["kind"], "missing-required");
        assert_eq!(report["issues"][0]["severity"], "error");
        assert_eq!(report["issues"][0]["path"], "example.abc.address");
    }

    #[test]
    fn test_validate_from_env() {
        let dir = TempDir::new().unwrap();
        let declarations = fixture(&dir, "groups.toml", DECLARATIONS);

        confmeta()
            .arg("validate")
            .arg("-d")
            .arg(&declarations)
            .arg("--env")
            .env("CONFMETA_ENV_PREFIX", "E2E")
            .env("E2E_EXAMPLE_ABC_ADDRESS", "from-env")
            .env("E2E_EXAMPLE_ABC_PATH", "/tmp/x")
            .assert()
            .success();
    }
}
