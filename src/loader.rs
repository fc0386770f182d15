//! Reads translation and daily-verse JSON files from disk.

use crate::error::ProbeError;
use crate::record::VerseRecord;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// A decoded Bible translation file: `{"metadata": {...}, "verses": [...]}`.
#[derive(Debug, Clone)]
pub struct Translation {
    pub path: PathBuf,
    pub top_level_keys: Vec<String>,
    pub metadata: Option<Value>,
    pub verses: Vec<VerseRecord>,
    /// Entries of `verses` that were not objects.
    pub skipped: usize,
}

/// Coarse structure of a JSON document, used for introspection output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentShape {
    Array { len: usize, first: Option<Value> },
    Object { keys: Vec<String> },
    Scalar { type_name: &'static str },
}

impl DocumentShape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(items) => DocumentShape::Array {
                len: items.len(),
                first: items.first().cloned(),
            },
            Value::Object(obj) => DocumentShape::Object { keys: obj.keys().cloned().collect() },
            other => DocumentShape::Scalar { type_name: type_name(other) },
        }
    }
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[instrument(target = "scripture_probe::loader", skip(path), fields(path = %path.display()))]
pub fn load_json(path: &Path) -> Result<Value, ProbeError> {
    let raw = fs::read_to_string(path).map_err(|source| ProbeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&raw).map_err(|source| ProbeError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(target = "scripture_probe::loader", bytes = raw.len(), "loaded json");
    Ok(value)
}

pub fn load_translation(path: &Path) -> Result<Translation, ProbeError> {
    let value = load_json(path)?;
    translation_from_value(path, value)
}

/// Decode an already-parsed translation document.
pub fn translation_from_value(path: &Path, value: Value) -> Result<Translation, ProbeError> {
    let mut obj = match value {
        Value::Object(obj) => obj,
        other => {
            return Err(ProbeError::NotAnObject {
                path: path.to_path_buf(),
                found: type_name(&other),
            })
        }
    };
    let top_level_keys: Vec<String> = obj.keys().cloned().collect();

    let verses = match obj.remove("verses") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ProbeError::VersesNotArray {
                path: path.to_path_buf(),
                found: type_name(&other),
            })
        }
        None => return Err(ProbeError::MissingVerses { path: path.to_path_buf() }),
    };

    let decoded: Vec<VerseRecord> = verses.iter().filter_map(VerseRecord::from_value).collect();
    let skipped = verses.len() - decoded.len();
    if skipped > 0 {
        warn!(target = "scripture_probe::loader", skipped, path = %path.display(), "non-object verse entries ignored");
    }

    Ok(Translation {
        path: path.to_path_buf(),
        top_level_keys,
        metadata: obj.remove("metadata"),
        verses: decoded,
        skipped,
    })
}

/// Find an input file: the path as given, else the same path under
/// `assets_dir`.
pub fn locate(path: &Path, assets_dir: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    let under_assets = assets_dir.join(path);
    if under_assets.exists() {
        debug!(target = "scripture_probe::loader", path = %under_assets.display(), "found under assets dir");
        return Some(under_assets);
    }
    None
}
