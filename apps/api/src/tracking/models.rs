//! Application-tracking data shapes: stored records, lifecycle status, and
//! the import/export document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::MatchResult;

/// Lifecycle of a tracked application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Generated,
    Sent,
    Interview,
    Offer,
    Rejected,
    NoReply,
}

/// One tracked application, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: u64,
    pub company: String,
    pub role: String,
    pub location: Option<String>,
    pub jd_excerpt: String,
    pub cover_letter: String,
    pub cv_summary: String,
    /// ATS snapshot at generation time.
    pub ats: MatchResult,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the caller supplies when saving a record; the store assigns the
/// id, status and timestamps.
#[derive(Debug, Clone, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub role: String,
    pub location: Option<String>,
    pub jd_excerpt: String,
    pub cover_letter: String,
    pub cv_summary: String,
    pub ats: MatchResult,
}

pub const EXPORT_FORMAT_VERSION: u32 = 1;

/// Export/import envelope: a single self-describing JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    pub records: Vec<ApplicationRecord>,
}

/// Import must state its intent explicitly; there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Keep existing records on id collision, append the rest.
    Merge,
    /// Replace the whole store with the imported records.
    Overwrite,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::NoReply).unwrap(),
            "\"no_reply\""
        );
        let status: ApplicationStatus = serde_json::from_str("\"interview\"").unwrap();
        assert_eq!(status, ApplicationStatus::Interview);
    }

    #[test]
    fn test_import_mode_parses_lowercase() {
        let mode: ImportMode = serde_json::from_str("\"merge\"").unwrap();
        assert_eq!(mode, ImportMode::Merge);
        let mode: ImportMode = serde_json::from_str("\"overwrite\"").unwrap();
        assert_eq!(mode, ImportMode::Overwrite);
        assert!(serde_json::from_str::<ImportMode>("\"replace\"").is_err());
    }
}
