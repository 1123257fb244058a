//! Medical analysis records
//!
//! An analysis is a dated lab result or imaging study the user uploaded.
//! The file blob itself lives in external storage; this core only carries
//! the reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of medical analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Blood,
    Urine,
    Ultrasound,
    XRay,
    Other,
}

/// Kind of the attached result file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Pdf,
}

/// A medical analysis record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: AnalysisKind,
    /// Human-readable name, e.g. "Complete blood count"
    pub name: String,
    /// When the sample was taken or the study performed
    pub date_taken: DateTime<Utc>,
    /// Reference into external file storage
    pub file_url: String,
    pub file_kind: FileKind,
    /// Date the analysis should next be repeated, if the user set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_reminder: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for an analysis; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct AnalysisPatch {
    pub kind: Option<AnalysisKind>,
    pub name: Option<String>,
    pub date_taken: Option<DateTime<Utc>>,
    pub file_url: Option<String>,
    pub file_kind: Option<FileKind>,
    pub next_reminder: Option<DateTime<Utc>>,
}

impl Analysis {
    /// Create a new analysis record with current audit timestamps
    pub fn new(
        user_id: Uuid,
        kind: AnalysisKind,
        name: String,
        date_taken: DateTime<Utc>,
        file_url: String,
        file_kind: FileKind,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            name,
            date_taken,
            file_url,
            file_kind,
            next_reminder: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: AnalysisPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(date_taken) = patch.date_taken {
            self.date_taken = date_taken;
        }
        if let Some(file_url) = patch.file_url {
            self.file_url = file_url;
        }
        if let Some(file_kind) = patch.file_kind {
            self.file_kind = file_kind;
        }
        if let Some(next_reminder) = patch.next_reminder {
            self.next_reminder = Some(next_reminder);
        }
        self.updated_at = Utc::now();
    }

    /// Stable tag used when the analysis is embedded in a report
    pub fn kind_tag(&self) -> &'static str {
        match self.kind {
            AnalysisKind::Blood => "blood",
            AnalysisKind::Urine => "urine",
            AnalysisKind::Ultrasound => "ultrasound",
            AnalysisKind::XRay => "xray",
            AnalysisKind::Other => "other",
        }
    }
}
