//! Brace-balance check for a single function in a source file, plus the
//! file's trailing lines. Used to debug hand-edited front-end components.

use serde::Serialize;
use tracing::{debug, instrument};

pub const DEFAULT_SIGNATURE: &str = "const handleVerseSelect = async (verse: BibleVerse) => {";
pub const DEFAULT_TARGET: &str = "src/app/bible-search/page.tsx";
const BODY_TERMINATOR: &str = "};";

/// Brace counts for the text between a signature and the first `};` after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BodyBalance {
    /// Byte offset of the body start (just past the signature).
    pub start: usize,
    /// Byte offset of the terminating `};`.
    pub end: usize,
    pub opening: usize,
    pub closing: usize,
}

impl BodyBalance {
    pub fn is_balanced(&self) -> bool {
        self.opening == self.closing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TailLine {
    /// 1-based position within the tail, not within the file.
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BraceReport {
    pub signature: String,
    pub body: Option<BodyBalance>,
    pub tail: Vec<TailLine>,
}

/// Locate the body following `signature`, ending at the first `};`.
/// Braces are counted raw; string literals and comments are not skipped.
pub fn body_balance(source: &str, signature: &str) -> Option<BodyBalance> {
    let start = source.find(signature)? + signature.len();
    let end = start + source[start..].find(BODY_TERMINATOR)?;

    let (mut opening, mut closing) = (0usize, 0usize);
    for &b in source[start..end].as_bytes() {
        match b {
            b'{' => opening += 1,
            b'}' => closing += 1,
            _ => {}
        }
    }
    Some(BodyBalance { start, end, opening, closing })
}

/// Last `count` lines of `source`, splitting on `\n`. A trailing newline
/// yields a final empty line.
pub fn tail_lines(source: &str, count: usize) -> Vec<TailLine> {
    let lines: Vec<&str> = source.split('\n').collect();
    lines[lines.len().saturating_sub(count)..]
        .iter()
        .enumerate()
        .map(|(i, &line)| TailLine {
            number: i + 1,
            text: line.strip_suffix('\r').unwrap_or(line).to_string(),
        })
        .collect()
}

#[instrument(target = "scripture_probe::brace_scan", skip(source), fields(bytes = source.len()))]
pub fn scan(source: &str, signature: &str, tail: usize) -> BraceReport {
    let body = body_balance(source, signature);
    debug!(target = "scripture_probe::brace_scan", found = body.is_some(), "scanned for signature");
    BraceReport {
        signature: signature.to_string(),
        body,
        tail: tail_lines(source, tail),
    }
}
