//! Converts daily-verse records from ad-hoc key names into the canonical
//! `{id, ayat, content}` shape.
//!
//! Whether two collections disagree is decided from their first elements'
//! key sets only. Heterogeneous collections are not checked further.

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Canonical daily-verse record. Values are copied from the source record
/// as-is, so they keep whatever JSON type the source used.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[schemars(title = "Daily Verse", description = "Canonical daily-verse record")]
pub struct ReconciledRecord {
    /// Source `id`, or the 1-based position of the source record.
    pub id: Value,
    /// Verse reference label, e.g. `Yohanes 3:16`.
    pub ayat: Value,
    /// Verse body text.
    pub content: Value,
}

enum Fallback {
    Position,
    Literal(&'static str),
}

/// Candidate source keys for one output field, tried in order.
struct FieldRule {
    candidates: &'static [&'static str],
    fallback: Fallback,
}

impl FieldRule {
    fn apply(&self, obj: &Map<String, Value>, index: usize) -> Value {
        self.candidates
            .iter()
            .find_map(|key| obj.get(*key))
            .cloned()
            .unwrap_or_else(|| match self.fallback {
                Fallback::Position => Value::from(index + 1),
                Fallback::Literal(s) => Value::from(s),
            })
    }
}

const ID_RULE: FieldRule = FieldRule { candidates: &["id"], fallback: Fallback::Position };
const AYAT_RULE: FieldRule = FieldRule {
    candidates: &["ayat", "reference"],
    fallback: Fallback::Literal("Unknown"),
};
const CONTENT_RULE: FieldRule = FieldRule {
    candidates: &["content", "text"],
    fallback: Fallback::Literal(""),
};

/// Key set of a record; non-objects have no keys.
pub fn first_keys(record: &Value) -> BTreeSet<String> {
    record
        .as_object()
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default()
}

/// True when the two records' key sets differ.
pub fn needs_reconciliation(source_first: &Value, target_first: &Value) -> bool {
    first_keys(source_first) != first_keys(target_first)
}

/// Map every object in `source` to the canonical shape. Non-object entries
/// are dropped; `id` fallback uses the position in `source`, counting dropped
/// entries.
#[instrument(target = "scripture_probe::reconcile", skip(source), fields(records = source.len()))]
pub fn reconcile(source: &[Value]) -> Vec<ReconciledRecord> {
    let out: Vec<ReconciledRecord> = source
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let Some(obj) = item.as_object() else {
                warn!(target = "scripture_probe::reconcile", index = i, "skipping non-object record");
                return None;
            };
            Some(ReconciledRecord {
                id: ID_RULE.apply(obj, i),
                ayat: AYAT_RULE.apply(obj, i),
                content: CONTENT_RULE.apply(obj, i),
            })
        })
        .collect();

    debug!(target = "scripture_probe::reconcile", converted = out.len(), "reconciled");
    out
}

/// What to do with a (source, target) document pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum SyncPlan {
    /// At least one document is not a JSON array.
    NotArrays,
    /// At least one array is empty, so there is no shape to compare.
    Empty,
    /// First elements share a key set.
    Aligned { keys: BTreeSet<String> },
    /// Shapes differ; `records` is the converted source.
    Convert {
        source_keys: BTreeSet<String>,
        target_keys: BTreeSet<String>,
        records: Vec<ReconciledRecord>,
    },
}

#[instrument(target = "scripture_probe::reconcile", skip_all)]
pub fn plan(source: &Value, target: &Value) -> SyncPlan {
    let (Some(source), Some(target)) = (source.as_array(), target.as_array()) else {
        return SyncPlan::NotArrays;
    };
    let (Some(source_first), Some(target_first)) = (source.first(), target.first()) else {
        return SyncPlan::Empty;
    };

    if !needs_reconciliation(source_first, target_first) {
        return SyncPlan::Aligned { keys: first_keys(source_first) };
    }

    let source_keys = first_keys(source_first);
    let target_keys = first_keys(target_first);
    info!(
        target = "scripture_probe::reconcile",
        ?source_keys,
        ?target_keys,
        "record shapes differ"
    );
    SyncPlan::Convert { source_keys, target_keys, records: reconcile(source) }
}
