//! Human-readable renderings of the structured findings.

use crate::brace_scan::BraceReport;
use crate::loader::{DocumentShape, Translation};
use crate::reconcile::SyncPlan;
use crate::record::ReferenceQuery;
use crate::resolver::{BookCensus, Resolution};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// A resolution paired with the query that produced it.
#[derive(Debug)]
pub struct QueryReport<'q, 'r> {
    pub query: &'q ReferenceQuery,
    pub resolution: &'q Resolution<'r>,
}

impl fmt::Display for QueryReport<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.query;
        match self.resolution {
            Resolution::ExactMatch { record } => {
                let json = serde_json::to_string(record).map_err(|_| fmt::Error)?;
                write!(f, "Found {}: {}", q, json)
            }
            Resolution::ChapterFound { book_records, chapter_records, verses } => {
                writeln!(f, "Found book '{}' with {} verses", q.book, book_records)?;
                writeln!(f, "Found chapter {} with {} verses", q.chapter, chapter_records)?;
                write!(f, "Available verses in {} {}: {:?}", q.book, q.chapter, verses)
            }
            Resolution::BookFoundNoChapter { book_records, chapters } => {
                writeln!(f, "Found book '{}' with {} verses", q.book, book_records)?;
                writeln!(f, "No verses found for chapter {}", q.chapter)?;
                write!(f, "Available chapters in {}: {:?}", q.book, chapters)
            }
            Resolution::PartialBookMatch { candidates } => {
                write!(f, "No exact match for '{}', but found similar books: {:?}", q.book, candidates)
            }
            Resolution::NoMatch { available } => {
                write!(f, "No match for '{}'. Available books: {:?}", q.book, available)
            }
        }
    }
}

impl fmt::Display for BookCensus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Book name variations and verse counts:")?;
        for (name, count) in &self.entries {
            write!(f, "\n  {}: {} verses", name, count)?;
        }
        Ok(())
    }
}

impl fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentShape::Array { len, first } => {
                write!(f, "Type: array\nLength: {}", len)?;
                if let Some(first) = first {
                    write!(f, "\nFirst item: {}", first)?;
                }
                Ok(())
            }
            DocumentShape::Object { keys } => write!(f, "Type: object\nKeys: {:?}", keys),
            DocumentShape::Scalar { type_name } => write!(f, "Type: {}", type_name),
        }
    }
}

/// Summary of a decoded translation file, without per-query results.
#[derive(Debug)]
pub struct TranslationSummary<'a>(pub &'a Translation);

impl fmt::Display for TranslationSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        writeln!(f, "Top-level keys: {:?}", t.top_level_keys)?;
        if let Some(name) = t.metadata.as_ref().and_then(|m| m.get("name")).and_then(Value::as_str) {
            writeln!(f, "Translation: {}", name)?;
        }
        write!(f, "Number of verses: {}", t.verses.len())?;
        if t.skipped > 0 {
            write!(f, " ({} non-object entries skipped)", t.skipped)?;
        }
        if let Some(first) = t.verses.first() {
            let mut keys: Vec<&str> = first.extra.keys().map(String::as_str).collect();
            if first.book_name.is_some() {
                keys.push("book_name");
            }
            if first.chapter.is_some() {
                keys.push("chapter");
            }
            if first.verse.is_some() {
                keys.push("verse");
            }
            keys.sort_unstable();
            write!(f, "\nFirst verse structure: {:?}", keys)?;
            let json = serde_json::to_string(first).map_err(|_| fmt::Error)?;
            write!(f, "\nFirst verse: {}", json)?;
        }
        Ok(())
    }
}

fn key_list(keys: &BTreeSet<String>) -> String {
    keys.iter().cloned().collect::<Vec<_>>().join(", ")
}

impl fmt::Display for SyncPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPlan::NotArrays => write!(f, "Both files must be JSON arrays. No conversion attempted."),
            SyncPlan::Empty => write!(f, "At least one file is empty. No conversion attempted."),
            SyncPlan::Aligned { keys } => {
                write!(f, "Structures are the same ({}). No conversion needed.", key_list(keys))
            }
            SyncPlan::Convert { source_keys, target_keys, records } => {
                writeln!(f, "Source keys: {{{}}}", key_list(source_keys))?;
                writeln!(f, "Target keys: {{{}}}", key_list(target_keys))?;
                write!(f, "Structures are different. {} records converted to target format.", records.len())
            }
        }
    }
}

impl fmt::Display for BraceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Some(body) => {
                writeln!(f, "Found function: {}", self.signature)?;
                writeln!(f, "Opening braces: {}", body.opening)?;
                writeln!(f, "Closing braces: {}", body.closing)?;
                if body.is_balanced() {
                    writeln!(f, "Braces are balanced.")?;
                } else {
                    writeln!(f, "Braces are not balanced!")?;
                }
            }
            None => writeln!(f, "Could not find function: {}", self.signature)?,
        }
        write!(f, "\nLast {} lines of the file:", self.tail.len())?;
        for line in &self.tail {
            write!(f, "\n{}: {}", line.number, line.text)?;
        }
        Ok(())
    }
}
