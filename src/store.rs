//! Collaborator store contracts
//!
//! The reporting core reads diary records through these traits and writes
//! nothing back except the visit. Implementations own persistence,
//! per-visit write serialization, and any retry policy; errors cross this
//! boundary opaquely as `anyhow::Error`. Absence is data (`Option`), not
//! an error.
//!
//! Implementations must be safe to share across tasks (`Send + Sync`);
//! the same store handles are used by every concurrent report generation.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::analysis::Analysis;
use crate::medication::{Medication, MedicationIntake};
use crate::report::WellbeingPoint;
use crate::symptom::SymptomEntry;
use crate::visit::Visit;

/// Persistence for doctor visits
#[async_trait]
pub trait VisitStore: Send + Sync {
    async fn create(&self, visit: &Visit) -> Result<()>;

    /// Fetch a visit by id; `None` when it does not exist
    async fn get(&self, id: Uuid) -> Result<Option<Visit>>;

    /// Persist a mutated visit wholesale
    async fn update(&self, visit: &Visit) -> Result<()>;
}

/// Persistence for symptom diary entries
#[async_trait]
pub trait SymptomStore: Send + Sync {
    async fn create(&self, entry: &SymptomEntry) -> Result<()>;

    /// Entries for a user inside `[start, end]`, newest first, paged.
    /// Returns the page plus the total match count before pagination.
    async fn find_by_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<SymptomEntry>, usize)>;

    /// Wellbeing samples for a user inside `[start, end]`, ascending by date
    async fn wellbeing_points(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WellbeingPoint>>;
}

/// Persistence for medical analyses
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn create(&self, analysis: &Analysis) -> Result<()>;

    /// Analyses for a user taken inside `[start, end]`, newest first, paged
    async fn find_by_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Analysis>, usize)>;
}

/// Persistence for medications
#[async_trait]
pub trait MedicationStore: Send + Sync {
    async fn create(&self, medication: &Medication) -> Result<()>;

    /// All of a user's medications, optionally only the active ones
    async fn find_by_user(&self, user_id: Uuid, active_only: bool) -> Result<Vec<Medication>>;
}

/// Persistence for medication intake slots
#[async_trait]
pub trait IntakeStore: Send + Sync {
    async fn create(&self, intake: &MedicationIntake) -> Result<()>;

    async fn update(&self, intake: &MedicationIntake) -> Result<()>;

    /// Compliance percentage for one medication over `[start, end]`
    async fn compliance_rate(
        &self,
        medication_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64>;
}
