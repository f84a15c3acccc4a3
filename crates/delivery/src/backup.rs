use std::fs;
use std::path::{Path, PathBuf};

use pixy_core::lead::LeadRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("could not read backup file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write backup file `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("backup file `{path}` holds invalid json: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("could not serialize backup leads: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Write-only local fallback for leads that failed remote submission.
pub trait BackupStore: Send + Sync {
    fn append(&self, lead: &LeadRecord) -> Result<(), BackupError>;
}

/// JSON array file holding every lead that failed submission. No eviction,
/// no size cap; the file is only ever appended to.
#[derive(Clone, Debug)]
pub struct FileBackupStore {
    path: PathBuf,
}

impl FileBackupStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing(&self) -> Result<Vec<LeadRecord>, BackupError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|source| BackupError::Read { path: self.path.clone(), source })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw)
            .map_err(|source| BackupError::Parse { path: self.path.clone(), source })
    }
}

impl BackupStore for FileBackupStore {
    fn append(&self, lead: &LeadRecord) -> Result<(), BackupError> {
        let mut leads = self.read_existing()?;
        leads.push(lead.clone());

        let serialized =
            serde_json::to_string_pretty(&leads).map_err(BackupError::Serialize)?;
        fs::write(&self.path, serialized)
            .map_err(|source| BackupError::Write { path: self.path.clone(), source })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use pixy_core::lead::LeadRecord;
    use pixy_core::pricing::Estimate;
    use pixy_core::session::ServiceBranch;

    use crate::backup::{BackupStore, FileBackupStore};

    fn lead_fixture(name: &str) -> LeadRecord {
        LeadRecord {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            service: ServiceBranch::WebDev,
            requirements: BTreeMap::new(),
            estimate: Some(Estimate::Range { min: 15_000, max: 35_000 }),
            transcript: Vec::new(),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn append_creates_file_and_accumulates_leads() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileBackupStore::new(dir.path().join("pixy_backup_leads.json"));

        store.append(&lead_fixture("Asha")).expect("first append");
        store.append(&lead_fixture("Ravi")).expect("second append");

        let raw = std::fs::read_to_string(store.path()).expect("backup file should exist");
        let leads: Vec<LeadRecord> = serde_json::from_str(&raw).expect("valid json array");
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Asha");
        assert_eq!(leads[1].name, "Ravi");
    }

    #[test]
    fn append_fails_when_directory_is_missing() {
        let store = FileBackupStore::new("/nonexistent/pixy/pixy_backup_leads.json");
        let result = store.append(&lead_fixture("Asha"));
        assert!(result.is_err());
    }

    #[test]
    fn corrupt_backup_file_is_reported_not_clobbered() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pixy_backup_leads.json");
        std::fs::write(&path, "{ not json").expect("write corrupt file");

        let store = FileBackupStore::new(&path);
        let result = store.append(&lead_fixture("Asha"));

        assert!(result.is_err());
        let raw = std::fs::read_to_string(&path).expect("file still present");
        assert_eq!(raw, "{ not json");
    }
}
