//! Verse records as decoded from translation files, and reference queries
//! against them.

use crate::error::QueryParseError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// One scripture verse. Identifier fields are optional because translation
/// files are not consistent; a missing `book_name` reads as the empty book.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerseRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse: Option<i64>,
    /// Remaining keys (verse text, book number, ids) carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerseRecord {
    pub fn new(book_name: impl Into<String>, chapter: i64, verse: i64) -> Self {
        Self {
            book_name: Some(book_name.into()),
            chapter: Some(chapter),
            verse: Some(verse),
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Decode a record from a JSON value. Returns `None` when the value is
    /// not an object. Identifier keys holding the wrong JSON type are treated
    /// as absent rather than rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut extra = obj.clone();
        let book_name = match extra.remove("book_name") {
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                extra.insert("book_name".to_string(), other);
                None
            }
            None => None,
        };
        let chapter = take_integer(&mut extra, "chapter");
        let verse = take_integer(&mut extra, "verse");
        Some(Self { book_name, chapter, verse, extra })
    }

    /// Book name as compared by lookups; absent names are the empty book.
    pub fn book(&self) -> &str {
        self.book_name.as_deref().unwrap_or("")
    }
}

fn take_integer(obj: &mut Map<String, Value>, key: &str) -> Option<i64> {
    let n = obj.get(key).and_then(integer_of)?;
    obj.remove(key);
    Some(n)
}

fn integer_of(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    // 10.0 compares equal to 10
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
}

/// A (book, chapter, verse) lookup target. Book comparison is
/// case-insensitive; chapter and verse compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceQuery {
    pub book: String,
    pub chapter: i64,
    pub verse: i64,
}

impl ReferenceQuery {
    pub fn new(book: impl Into<String>, chapter: i64, verse: i64) -> Self {
        Self { book: book.into(), chapter, verse }
    }
}

impl fmt::Display for ReferenceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Parses references like `Amsal 10:17` or `1 Raja-raja 3:4`. The last
/// whitespace-separated token is `chapter:verse`; everything before it is
/// the book name.
impl FromStr for ReferenceQuery {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QueryParseError::Empty);
        }
        let (book, location) = s
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| QueryParseError::MissingBook(s.to_string()))?;
        let book = book.trim();
        if book.is_empty() {
            return Err(QueryParseError::MissingBook(s.to_string()));
        }
        let (chapter, verse) = location
            .split_once(':')
            .ok_or_else(|| QueryParseError::MissingChapterVerse(s.to_string()))?;

        Ok(Self {
            book: book.to_string(),
            chapter: parse_number("chapter", chapter)?,
            verse: parse_number("verse", verse)?,
        })
    }
}

fn parse_number(part: &'static str, value: &str) -> Result<i64, QueryParseError> {
    value.trim().parse().map_err(|_| QueryParseError::InvalidNumber {
        part,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_simple_reference() {
        let q: ReferenceQuery = "Amsal 10:17".parse().unwrap();
        assert_eq!(q, ReferenceQuery::new("Amsal", 10, 17));
    }

    #[test]
    fn parses_multi_word_book() {
        let q: ReferenceQuery = "  1 Raja-raja 3:4 ".parse().unwrap();
        assert_eq!(q.book, "1 Raja-raja");
        assert_eq!((q.chapter, q.verse), (3, 4));
    }

    #[test]
    fn rejects_malformed_references() {
        assert_eq!("".parse::<ReferenceQuery>(), Err(QueryParseError::Empty));
        assert!(matches!("10:17".parse::<ReferenceQuery>(), Err(QueryParseError::MissingBook(_))));
        assert!(matches!("Amsal 10".parse::<ReferenceQuery>(), Err(QueryParseError::MissingChapterVerse(_))));
        assert_eq!(
            "Amsal x:17".parse::<ReferenceQuery>(),
            Err(QueryParseError::InvalidNumber { part: "chapter", value: "x".to_string() })
        );
    }

    #[test]
    fn from_value_keeps_extra_fields_and_tolerates_bad_types() {
        let v = json!({"book_name": 7, "chapter": 10.0, "verse": "17", "text": "Siapa"});
        let r = VerseRecord::from_value(&v).unwrap();
        assert_eq!(r.book_name, None);
        assert_eq!(r.book(), "");
        assert_eq!(r.chapter, Some(10));
        assert_eq!(r.verse, None);
        assert_eq!(r.extra["verse"], json!("17"));
        assert_eq!(r.extra["book_name"], json!(7));
        assert_eq!(r.extra["text"], json!("Siapa"));
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(VerseRecord::from_value(&json!([1, 2])).is_none());
        assert!(VerseRecord::from_value(&json!("Amsal")).is_none());
    }
}
