//! Doctor visits and the persisted report snapshot
//!
//! The visit is the anchor record a generated report is bound to. It owns
//! the `ReportData` snapshot: `report_data` and `report_generated_at` are
//! set together or both absent, and regeneration replaces the snapshot
//! wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;

/// Inclusive date range a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether the instant falls inside the range, inclusive at both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Persisted pointer-snapshot of a generated report
///
/// Identifiers only, captured in query order at generation time. This is
/// a read-model optimization, not a copy: edits or deletions of the
/// source records after generation are not reflected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub period: DateRange,
    pub symptom_ids: Vec<Uuid>,
    pub analysis_ids: Vec<Uuid>,
    pub medication_ids: Vec<Uuid>,
}

/// A scheduled or past doctor visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub visit_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Questions the user wants to ask at the visit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<String>,
    /// Snapshot of the last generated report; absent until first generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_data: Option<ReportData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_generated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for visit metadata; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct VisitPatch {
    pub visit_date: Option<DateTime<Utc>>,
    pub doctor_name: Option<String>,
    pub specialty: Option<String>,
    pub questions: Option<String>,
}

impl Visit {
    /// Create a new visit with no report
    pub fn new(user_id: Uuid, visit_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            visit_date,
            doctor_name: None,
            specialty: None,
            questions: None,
            report_data: None,
            report_generated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial metadata update
    pub fn apply(&mut self, patch: VisitPatch) {
        if let Some(visit_date) = patch.visit_date {
            self.visit_date = visit_date;
        }
        if let Some(doctor_name) = patch.doctor_name {
            self.doctor_name = Some(doctor_name);
        }
        if let Some(specialty) = patch.specialty {
            self.specialty = Some(specialty);
        }
        if let Some(questions) = patch.questions {
            self.questions = Some(questions);
        }
        self.updated_at = Utc::now();
    }

    /// Whether a report has been generated for this visit
    pub fn has_report(&self) -> bool {
        self.report_data.is_some()
    }

    /// Store a freshly generated report snapshot.
    ///
    /// Stamps `report_generated_at` and `updated_at` together with the
    /// data; a previous snapshot is replaced wholesale. Total under valid
    /// input; the `Result` is reserved for future validation.
    pub fn set_report_data(&mut self, data: ReportData) -> AppResult<()> {
        let now = Utc::now();
        self.report_data = Some(data);
        self.report_generated_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Serialize the report snapshot, `None` when no report exists
    pub fn report_data_json(&self) -> serde_json::Result<Option<String>> {
        self.report_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
    }
}
