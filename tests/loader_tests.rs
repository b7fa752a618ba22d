//! Integration tests for loading layered figure documents from disk.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xyplot::config::{ConfigLoader, ConfigPaths, ConfigTier, LoadError, load_document, load_documents};
use xyplot::director::Director;
use xyplot::error::ErrorCode;

/// Write `content` to `name` inside `dir` and return the path.
fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const STYLE: &str = r#"
subplot:
  init: [121, 122]
  axes:
    - {grid: true}
    - {grid: true}
set_fig:
  width: 10
"#;

#[test]
fn test_style_sheet_layered_under_figure() {
    let temp = TempDir::new().unwrap();
    let style = write(temp.path(), "style.yaml", STYLE);
    let figure = write(
        temp.path(),
        "figure.json",
        r#"{"subplot": {"axes": [{"title": "left"}, {"title": "right"}]}, "set_fig": {"height": 3}}"#,
    );

    let document = load_documents(&[&style, &figure]).unwrap();
    // Sequences are replaced, not merged.
    assert_eq!(document["subplot"]["axes"][0], serde_json::json!({"title": "left"}));

    let figure = Director::from_document(&Value::Object(document))
        .unwrap()
        .into_figure()
        .unwrap();
    assert_eq!((figure.width, figure.height), (10.0, 3.0));
    assert_eq!(figure.axes.len(), 2);
    assert_eq!(figure.axes[1].title.as_ref().unwrap().text, "right");
    assert!(figure.axes[1].grid.is_none());
}

#[test]
fn test_empty_document_needs_container() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "empty.yaml", "");

    let document = load_document(&path).unwrap();
    assert!(document.is_empty());
    let err = Director::from_document(&Value::Object(document)).unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingContainer);
}

#[test]
fn test_parse_error_names_file() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "broken.json", "{\"axes\": ");

    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_config_tiers_report_sources() {
    let temp = TempDir::new().unwrap();
    let project = write(temp.path(), "xyplot.yaml", "style_sheets: [house.yaml]\n");
    let explicit = write(temp.path(), "explicit.yaml", "output:\n  pretty: false\n");

    let loader = ConfigLoader::load_with_paths(ConfigPaths {
        project_file: Some(project.clone()),
        user_file: Some(temp.path().join("missing.yaml")),
        explicit_file: Some(explicit.clone()),
    })
    .unwrap();

    assert_eq!(
        loader.sources(),
        &[(ConfigTier::Project, project), (ConfigTier::Environment, explicit)]
    );
    assert_eq!(loader.config().style_sheets, vec![PathBuf::from("house.yaml")]);
    assert!(!loader.config().output.pretty);
}
