use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} is not a JSON object (found {found})")]
    NotAnObject { path: PathBuf, found: &'static str },
    #[error("'verses' key not found in {path}")]
    MissingVerses { path: PathBuf },
    #[error("'verses' in {path} is not an array (found {found})")]
    VersesNotArray { path: PathBuf, found: &'static str },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryParseError {
    #[error("reference is empty")]
    Empty,
    #[error("missing book name in '{0}'")]
    MissingBook(String),
    #[error("expected 'chapter:verse' in '{0}'")]
    MissingChapterVerse(String),
    #[error("'{value}' is not a valid {part} number")]
    InvalidNumber { part: &'static str, value: String },
}
