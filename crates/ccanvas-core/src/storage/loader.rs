//! Validation and loading of previously saved documents.

use super::PersistedDocument;
use crate::config::MAX_LINES;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Structural problems in a document, reported with the offending key.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Top-level value must be an object")]
    RootNotObject,
    #[error("Invalid key '{0}', expected line_1 to line_{max}", max = MAX_LINES)]
    InvalidKey(String),
    #[error("Value of '{0}' must be an object")]
    EntryNotObject(String),
    #[error("'{key}' must have exactly the fields x and y, found [{}]", .fields.join(", "))]
    InvalidFields { key: String, fields: Vec<String> },
    #[error("'{key}.{field}' must be a list")]
    NotAList { key: String, field: &'static str },
    #[error("'{key}.{field}[{index}]' must be a floating-point number, got {value}")]
    NotAFloat {
        key: String,
        field: &'static str,
        index: usize,
        value: String,
    },
    #[error("'{key}' has {x} x values but {y} y values")]
    LengthMismatch { key: String, x: usize, y: usize },
}

/// Errors from loading a seed document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
    #[error("Unsupported file type: {path} (expected {expected})")]
    UnsupportedExtension { path: PathBuf, expected: String },
    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("Invalid document {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
}

/// Accepted extensions plus a structural check on the parsed value.
#[derive(Debug, Clone, Copy)]
pub struct FileSchema {
    pub extensions: &'static [&'static str],
    pub validate: fn(&Value) -> Result<(), SchemaError>,
}

impl FileSchema {
    fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Schema of the coordinates document written by [`FileStorage`](super::FileStorage).
pub const COORDINATES_SCHEMA: FileSchema = FileSchema {
    extensions: &["json"],
    validate: validate_coordinates_document,
};

/// Read `path` and check it against `schema`, returning the parsed value.
pub fn validate_file(path: &Path, schema: &FileSchema) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|e| LoadError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !schema.accepts(path) {
        return Err(LoadError::UnsupportedExtension {
            path: path.to_path_buf(),
            expected: schema
                .extensions
                .iter()
                .map(|e| format!(".{}", e))
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    let value: Value = serde_json::from_str(&contents).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    (schema.validate)(&value).map_err(|source| LoadError::Schema {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(value)
}

/// Validate and parse a coordinates document.
pub fn load_document(path: &Path) -> Result<PersistedDocument, LoadError> {
    let value = validate_file(path, &COORDINATES_SCHEMA)?;
    let document = serde_json::from_value(value).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    log::info!("Loaded coordinates from {}", path.display());
    Ok(document)
}

/// Structural check for a coordinates document.
pub fn validate_coordinates_document(value: &Value) -> Result<(), SchemaError> {
    let root = value.as_object().ok_or(SchemaError::RootNotObject)?;

    for (key, entry) in root {
        if !is_line_key(key) {
            return Err(SchemaError::InvalidKey(key.clone()));
        }
        let entry = entry
            .as_object()
            .ok_or_else(|| SchemaError::EntryNotObject(key.clone()))?;
        check_fields(key, entry)?;

        let x = float_list(key, "x", &entry["x"])?;
        let y = float_list(key, "y", &entry["y"])?;
        if x != y {
            return Err(SchemaError::LengthMismatch {
                key: key.clone(),
                x,
                y,
            });
        }
    }
    Ok(())
}

/// `line_1` through `line_9`.
fn is_line_key(key: &str) -> bool {
    let Some(digit) = key.strip_prefix("line_") else {
        return false;
    };
    let mut chars = digit.chars();
    matches!((chars.next(), chars.next()), (Some('1'..='9'), None))
}

fn check_fields(key: &str, entry: &Map<String, Value>) -> Result<(), SchemaError> {
    if entry.len() == 2 && entry.contains_key("x") && entry.contains_key("y") {
        return Ok(());
    }
    Err(SchemaError::InvalidFields {
        key: key.to_string(),
        fields: entry.keys().cloned().collect(),
    })
}

/// Length of a list whose elements are all JSON floats. Integers are rejected.
fn float_list(key: &str, field: &'static str, value: &Value) -> Result<usize, SchemaError> {
    let items = value.as_array().ok_or_else(|| SchemaError::NotAList {
        key: key.to_string(),
        field,
    })?;

    if let Some((index, item)) = items.iter().enumerate().find(|(_, v)| !v.is_f64()) {
        return Err(SchemaError::NotAFloat {
            key: key.to_string(),
            field,
            index,
            value: item.to_string(),
        });
    }
    Ok(items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineId;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_valid_document() {
        let value = json!({
            "line_1": { "x": [0.0, 1.2], "y": [0.5, 0.9] },
            "line_3": { "x": [], "y": [] }
        });
        assert_eq!(validate_coordinates_document(&value), Ok(()));
    }

    #[test]
    fn test_line_keys() {
        assert!(is_line_key("line_1"));
        assert!(is_line_key("line_9"));
        assert!(!is_line_key("line_0"));
        assert!(!is_line_key("line_10"));
        assert!(!is_line_key("line_X"));
        assert!(!is_line_key("Line_1"));
        assert!(!is_line_key("line_"));
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert_eq!(
            validate_coordinates_document(&json!([1.0, 2.0])),
            Err(SchemaError::RootNotObject)
        );
    }

    #[test]
    fn test_rejects_malformed_key() {
        let value = json!({ "line_X": { "x": [], "y": [] } });
        assert_eq!(
            validate_coordinates_document(&value),
            Err(SchemaError::InvalidKey("line_X".to_string()))
        );
    }

    #[test]
    fn test_rejects_extra_or_missing_fields() {
        let extra = json!({ "line_1": { "x": [], "y": [], "z": [] } });
        assert!(matches!(
            validate_coordinates_document(&extra),
            Err(SchemaError::InvalidFields { .. })
        ));
        let missing = json!({ "line_1": { "x": [] } });
        assert!(matches!(
            validate_coordinates_document(&missing),
            Err(SchemaError::InvalidFields { .. })
        ));
        let not_object = json!({ "line_1": [1.0] });
        assert_eq!(
            validate_coordinates_document(&not_object),
            Err(SchemaError::EntryNotObject("line_1".to_string()))
        );
    }

    #[test]
    fn test_rejects_non_list_and_integers() {
        let scalar = json!({ "line_1": { "x": 1.0, "y": [] } });
        assert_eq!(
            validate_coordinates_document(&scalar),
            Err(SchemaError::NotAList {
                key: "line_1".to_string(),
                field: "x"
            })
        );

        let integer = json!({ "line_1": { "x": [1.0], "y": [2] } });
        assert_eq!(
            validate_coordinates_document(&integer),
            Err(SchemaError::NotAFloat {
                key: "line_1".to_string(),
                field: "y",
                index: 0,
                value: "2".to_string(),
            })
        );
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let value = json!({ "line_2": { "x": [1.0, 2.0], "y": [2.0] } });
        assert_eq!(
            validate_coordinates_document(&value),
            Err(SchemaError::LengthMismatch {
                key: "line_2".to_string(),
                x: 2,
                y: 1
            })
        );
    }

    #[test]
    fn test_validate_file_checks_existence_then_extension() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            validate_file(&missing, &COORDINATES_SCHEMA),
            Err(LoadError::NotFound(_))
        ));

        let txt = write(&dir, "coords.txt", "{}");
        assert!(matches!(
            validate_file(&txt, &COORDINATES_SCHEMA),
            Err(LoadError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn test_validate_file_reports_parse_errors() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "{ \"line_1\": ");
        assert!(matches!(
            validate_file(&path, &COORDINATES_SCHEMA),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_document_with_malformed_key_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "seed.json", r#"{ "line_X": { "x": [1.0], "y": [1.0] } }"#);
        match load_document(&path) {
            Err(LoadError::Schema { source, .. }) => {
                assert_eq!(source, SchemaError::InvalidKey("line_X".to_string()))
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_document() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "seed.JSON",
            r#"{ "line_2": { "x": [1.5, 2.5], "y": [3.0, 4.0] } }"#,
        );
        let doc = load_document(&path).unwrap();
        assert_eq!(doc.len(), 1);
        let record = doc.get(LineId::new(2).unwrap()).unwrap();
        assert_eq!(record.x, vec![1.5, 2.5]);
        assert_eq!(record.y, vec![3.0, 4.0]);
        assert!(doc.get(LineId::new(1).unwrap()).is_none());
    }

    #[test]
    fn test_load_document_preserves_float_bits() {
        use crate::storage::document::tests::random_finite_values;
        use crate::storage::LineRecord;

        let dir = TempDir::new().unwrap();
        let values = random_finite_values(2000);
        let (x, y) = values.split_at(values.len() / 2);
        let mut doc = PersistedDocument::default();
        doc.insert(
            LineId::from_index(3),
            LineRecord {
                x: x.to_vec(),
                y: y.to_vec(),
            },
        );
        let path = write(&dir, "seed.json", &doc.to_json().unwrap());

        let loaded = load_document(&path).unwrap();
        let record = loaded.get(LineId::from_index(3)).unwrap();
        let saved_bits: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
        let loaded_bits: Vec<u64> = record.x.iter().chain(&record.y).map(|v| v.to_bits()).collect();
        assert_eq!(saved_bits, loaded_bits);
    }
}
