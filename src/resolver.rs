//! Reference lookup over an unindexed list of verses.
//!
//! Book-name spellings drift between translations, so a failed lookup is
//! narrowed to the most specific level a human can act on:
//! - exact `book chapter:verse`
//! - the chapter exists but not the verse
//! - the book exists but not the chapter
//! - the query is a substring of some book name
//! - nothing matches, in which case every known book name is reported

use crate::record::{ReferenceQuery, VerseRecord};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument};

/// Outcome of a single lookup. Exactly one tier applies, tried in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution<'a> {
    /// First record (in input order) matching book, chapter and verse.
    ExactMatch { record: &'a VerseRecord },
    /// Book and chapter matched; `verses` is sorted and deduplicated.
    ChapterFound {
        book_records: usize,
        chapter_records: usize,
        verses: Vec<i64>,
    },
    /// Book matched; `chapters` is sorted and deduplicated.
    BookFoundNoChapter { book_records: usize, chapters: Vec<i64> },
    /// Book names (original casing) containing the query book.
    PartialBookMatch { candidates: Vec<String> },
    /// Every distinct book name present; `""` stands for unnamed records.
    NoMatch { available: Vec<String> },
}

impl Resolution<'_> {
    pub fn tier(&self) -> &'static str {
        match self {
            Resolution::ExactMatch { .. } => "exact_match",
            Resolution::ChapterFound { .. } => "chapter_found",
            Resolution::BookFoundNoChapter { .. } => "book_found_no_chapter",
            Resolution::PartialBookMatch { .. } => "partial_book_match",
            Resolution::NoMatch { .. } => "no_match",
        }
    }
}

/// Lookup helper holding an index from lower-cased book name to record
/// positions. Positions keep input order so "first match" semantics hold.
#[derive(Debug)]
pub struct ReferenceResolver<'a> {
    records: &'a [VerseRecord],
    by_book: HashMap<String, Vec<usize>>,
    /// Distinct non-empty book names in encounter order, original casing.
    names: Vec<&'a str>,
    /// Some record has a missing or empty book name.
    has_unnamed: bool,
}

impl<'a> ReferenceResolver<'a> {
    #[instrument(target = "scripture_probe::resolver", skip(records), fields(records = records.len()))]
    pub fn new(records: &'a [VerseRecord]) -> Self {
        let mut by_book: HashMap<String, Vec<usize>> = HashMap::new();
        let mut names = Vec::new();
        let mut seen = BTreeSet::new();
        let mut has_unnamed = false;

        for (i, record) in records.iter().enumerate() {
            let name = record.book();
            by_book.entry(name.to_lowercase()).or_default().push(i);
            if name.is_empty() {
                has_unnamed = true;
            } else if seen.insert(name) {
                names.push(name);
            }
        }

        debug!(target = "scripture_probe::resolver", books = names.len(), has_unnamed, "built book index");
        Self { records, by_book, names, has_unnamed }
    }

    /// Distinct book names in the order they first appear.
    pub fn book_names(&self) -> &[&'a str] {
        &self.names
    }

    #[instrument(target = "scripture_probe::resolver", skip(self, query), fields(query = %query))]
    pub fn resolve(&self, query: &ReferenceQuery) -> Resolution<'a> {
        let resolution = self.resolve_inner(query);
        debug!(target = "scripture_probe::resolver", tier = resolution.tier(), "resolved");
        resolution
    }

    fn resolve_inner(&self, query: &ReferenceQuery) -> Resolution<'a> {
        let needle = query.book.to_lowercase();

        let Some(positions) = self.by_book.get(&needle) else {
            return self.fallback_by_name(&needle);
        };
        let book: Vec<&'a VerseRecord> = positions.iter().map(|&i| &self.records[i]).collect();

        if let Some(record) = book
            .iter()
            .copied()
            .find(|r| r.chapter == Some(query.chapter) && r.verse == Some(query.verse))
        {
            return Resolution::ExactMatch { record };
        }

        let chapter: Vec<&VerseRecord> = book
            .iter()
            .copied()
            .filter(|r| r.chapter == Some(query.chapter))
            .collect();

        if !chapter.is_empty() {
            return Resolution::ChapterFound {
                book_records: book.len(),
                chapter_records: chapter.len(),
                verses: sorted_distinct(chapter.iter().filter_map(|r| r.verse)),
            };
        }

        Resolution::BookFoundNoChapter {
            book_records: book.len(),
            chapters: sorted_distinct(book.iter().filter_map(|r| r.chapter)),
        }
    }

    fn fallback_by_name(&self, needle: &str) -> Resolution<'a> {
        let mut candidates: Vec<String> = self
            .names
            .iter()
            .filter(|name| name.to_lowercase().contains(needle))
            .map(|name| name.to_string())
            .collect();

        if !candidates.is_empty() {
            candidates.sort();
            return Resolution::PartialBookMatch { candidates };
        }

        // unnamed records belong to the empty book, which is still a book
        let unnamed = self.has_unnamed.then(String::new);
        let mut available: Vec<String> = unnamed
            .into_iter()
            .chain(self.names.iter().map(|name| name.to_string()))
            .collect();
        available.sort();
        Resolution::NoMatch { available }
    }
}

/// Resolve a single query with a throwaway index.
pub fn resolve<'a>(records: &'a [VerseRecord], query: &ReferenceQuery) -> Resolution<'a> {
    ReferenceResolver::new(records).resolve(query)
}

fn sorted_distinct(values: impl Iterator<Item = i64>) -> Vec<i64> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}

/// Record counts per distinct book name, most frequent first. Ties keep
/// the order in which names were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookCensus {
    pub entries: Vec<(String, usize)>,
}

impl BookCensus {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, book_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name == book_name)
            .map(|(_, count)| *count)
    }
}

/// Count records per book name. Records without a name are left out.
#[instrument(target = "scripture_probe::resolver", skip(records), fields(records = records.len()))]
pub fn book_census(records: &[VerseRecord]) -> BookCensus {
    let (mut entries, _) = records
        .iter()
        .filter_map(|r| r.book_name.as_deref().filter(|name| !name.is_empty()))
        .fold(
            (Vec::<(String, usize)>::new(), HashMap::<&str, usize>::new()),
            |(mut entries, mut slots), name| {
                match slots.get(name) {
                    Some(&slot) => entries[slot].1 += 1,
                    None => {
                        slots.insert(name, entries.len());
                        entries.push((name.to_string(), 1));
                    }
                }
                (entries, slots)
            },
        );

    // stable: ties stay in encounter order
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    BookCensus { entries }
}
