use crate::error::ProbeError;
use crate::reconcile::ReconciledRecord;
use std::fmt::Debug;

/// Destination for a reconciled collection.
pub trait RecordSink: Debug {
    fn persist(&self, records: &[ReconciledRecord]) -> Result<(), ProbeError>;
}

pub mod file;
pub use file::JsonFileSink;
