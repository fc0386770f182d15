pub mod brace_scan;
pub mod config;
pub mod error;
pub mod loader;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod resolver;
pub mod sink;

// Convenient re-exports
pub use error::ProbeError;
pub use reconcile::{needs_reconciliation, reconcile, ReconciledRecord};
pub use record::{ReferenceQuery, VerseRecord};
pub use resolver::{book_census, resolve, BookCensus, ReferenceResolver, Resolution};
