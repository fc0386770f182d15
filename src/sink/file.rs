use super::RecordSink;
use crate::error::ProbeError;
use crate::reconcile::ReconciledRecord;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Writes records as a pretty-printed JSON array, optionally keeping a
/// timestamped copy of the file it replaces.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    backup: bool,
}

impl JsonFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path, backup: false }
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `verses.json` -> `verses.json.20240101_120000_123.bak`
    pub fn backup_path_at(&self, at: DateTime<Utc>) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!("{}.{}.bak", name, at.format("%Y%m%d_%H%M%S_%3f")))
    }

    fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ProbeError + '_ {
        move |source| ProbeError::Io { path: path.to_path_buf(), source }
    }
}

impl RecordSink for JsonFileSink {
    #[instrument(target = "scripture_probe::sink", skip(self, records), fields(path = %self.path.display(), records = records.len()))]
    fn persist(&self, records: &[ReconciledRecord]) -> Result<(), ProbeError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(Self::io_err(parent))?;
        }

        if self.backup && self.path.exists() {
            let backup = self.backup_path_at(Utc::now());
            fs::copy(&self.path, &backup).map_err(Self::io_err(&backup))?;
            info!(target = "scripture_probe::sink", backup = %backup.display(), "previous file backed up");
        }

        let body = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, body).map_err(Self::io_err(&self.path))?;
        info!(target = "scripture_probe::sink", "records written");
        Ok(())
    }
}
