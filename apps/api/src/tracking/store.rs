//! File-backed application store: a JSON array on disk, loaded at startup,
//! guarded by an async RwLock, rewritten atomically after every mutation.
//! History is bounded; inserting past the bound evicts the oldest records.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::RwLock;

use crate::tracking::models::{
    ApplicationRecord, ApplicationStatus, ExportDocument, ImportMode, ImportSummary,
    NewApplication, EXPORT_FORMAT_VERSION,
};

pub struct ApplicationStore {
    path: PathBuf,
    limit: usize,
    // Records are kept oldest-first; ids only ever grow.
    records: RwLock<Vec<ApplicationRecord>>,
}

impl ApplicationStore {
    /// Opens the store at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open(path: &Path, limit: usize) -> Result<Self> {
        let records = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading store {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing store {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            limit,
            records: RwLock::new(records),
        })
    }

    /// All records, newest first.
    pub async fn list(&self) -> Vec<ApplicationRecord> {
        let records = self.records.read().await;
        records.iter().rev().cloned().collect()
    }

    pub async fn insert(&self, new: NewApplication) -> Result<ApplicationRecord> {
        let mut records = self.records.write().await;
        let now = Utc::now();
        let record = ApplicationRecord {
            id: records.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            company: new.company,
            role: new.role,
            location: new.location,
            jd_excerpt: new.jd_excerpt,
            cover_letter: new.cover_letter,
            cv_summary: new.cv_summary,
            ats: new.ats,
            status: ApplicationStatus::Generated,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        records.push(record.clone());
        evict_oldest(&mut records, self.limit);
        self.persist(&records)?;
        Ok(record)
    }

    /// Updates status and/or notes. Returns `None` for an unknown id.
    pub async fn update(
        &self,
        id: u64,
        status: Option<ApplicationStatus>,
        notes: Option<String>,
    ) -> Result<Option<ApplicationRecord>> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(status) = status {
            record.status = status;
        }
        if let Some(notes) = notes {
            record.notes = Some(notes);
        }
        record.updated_at = Utc::now();
        let updated = record.clone();
        self.persist(&records)?;
        Ok(Some(updated))
    }

    /// Removes a record; `false` for an unknown id.
    pub async fn remove(&self, id: u64) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.persist(&records)?;
        Ok(true)
    }

    pub async fn export(&self) -> ExportDocument {
        let records = self.records.read().await;
        ExportDocument {
            format_version: EXPORT_FORMAT_VERSION,
            exported_at: Utc::now(),
            records: records.clone(),
        }
    }

    pub async fn import(&self, doc: ExportDocument, mode: ImportMode) -> Result<ImportSummary> {
        let mut records = self.records.write().await;
        let incoming = doc.records.len();

        let added = match mode {
            ImportMode::Overwrite => {
                *records = doc.records;
                records.sort_by_key(|r| r.id);
                records.len()
            }
            ImportMode::Merge => {
                let existing: std::collections::HashSet<u64> =
                    records.iter().map(|r| r.id).collect();
                let mut added = 0;
                for record in doc.records {
                    if !existing.contains(&record.id) {
                        records.push(record);
                        added += 1;
                    }
                }
                records.sort_by_key(|r| r.id);
                added
            }
        };

        evict_oldest(&mut records, self.limit);
        self.persist(&records)?;

        Ok(ImportSummary {
            added,
            skipped: incoming - added,
            total: records.len(),
        })
    }

    /// Write-temp-then-persist so a crash mid-write never corrupts the file.
    fn persist(&self, records: &[ApplicationRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
            .context("creating temp store file")?;
        tmp.write_all(&bytes).context("writing store")?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("replacing store {}", self.path.display()))?;
        Ok(())
    }
}

fn evict_oldest(records: &mut Vec<ApplicationRecord>, limit: usize) {
    while records.len() > limit {
        records.remove(0);
    }
}
