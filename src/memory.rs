//! In-memory store implementation
//!
//! Reference implementation of every collaborator contract, backed by
//! `tokio::sync::RwLock`-guarded tables. Used by tests, the demo data
//! generator, and embedders that do not need durable persistence.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use tokio::sync::RwLock;

use crate::adherence;
use crate::analysis::Analysis;
use crate::medication::{Medication, MedicationIntake};
use crate::report::WellbeingPoint;
use crate::store::{AnalysisStore, IntakeStore, MedicationStore, SymptomStore, VisitStore};
use crate::symptom::SymptomEntry;
use crate::visit::Visit;

/// In-memory tables for all diary domains
#[derive(Debug, Default)]
pub struct MemoryStore {
    visits: RwLock<Vec<Visit>>,
    symptoms: RwLock<Vec<SymptomEntry>>,
    analyses: RwLock<Vec<Analysis>>,
    medications: RwLock<Vec<Medication>>,
    intakes: RwLock<Vec<MedicationIntake>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        info!("Initializing in-memory store");
        Self::default()
    }

    /// Total number of symptom entries across all users (diagnostics)
    pub async fn symptom_count(&self) -> usize {
        self.symptoms.read().await.len()
    }

    /// Total number of intake slots across all medications (diagnostics)
    pub async fn intake_count(&self) -> usize {
        self.intakes.read().await.len()
    }
}

/// Page a filtered, sorted result set; returns the page and the total
fn paginate<T>(mut matches: Vec<T>, limit: usize, offset: usize) -> (Vec<T>, usize) {
    let total = matches.len();
    let page = if offset < total {
        let end = (offset + limit).min(total);
        matches.drain(offset..end).collect()
    } else {
        Vec::new()
    };
    (page, total)
}

#[async_trait]
impl VisitStore for MemoryStore {
    async fn create(&self, visit: &Visit) -> Result<()> {
        debug!(visit_id = %visit.id, "Storing visit");
        self.visits.write().await.push(visit.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Visit>> {
        Ok(self
            .visits
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn update(&self, visit: &Visit) -> Result<()> {
        let mut visits = self.visits.write().await;
        match visits.iter_mut().find(|v| v.id == visit.id) {
            Some(slot) => {
                *slot = visit.clone();
                Ok(())
            }
            None => bail!("visit {} not found", visit.id),
        }
    }
}

#[async_trait]
impl SymptomStore for MemoryStore {
    async fn create(&self, entry: &SymptomEntry) -> Result<()> {
        debug!(entry_id = %entry.id, "Storing symptom entry");
        self.symptoms.write().await.push(entry.clone());
        Ok(())
    }

    async fn find_by_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<SymptomEntry>, usize)> {
        let mut matches: Vec<SymptomEntry> = self
            .symptoms
            .read()
            .await
            .iter()
            .filter(|s| s.user_id == user_id && s.date_time >= start && s.date_time <= end)
            .cloned()
            .collect();
        // Newest first, the order reports present diary entries in
        matches.sort_by(|a, b| b.date_time.cmp(&a.date_time));

        Ok(paginate(matches, limit, offset))
    }

    async fn wellbeing_points(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WellbeingPoint>> {
        let mut points: Vec<WellbeingPoint> = self
            .symptoms
            .read()
            .await
            .iter()
            .filter(|s| s.user_id == user_id && s.date_time >= start && s.date_time <= end)
            .map(|s| WellbeingPoint {
                date: s.date_time,
                value: s.wellbeing_scale,
            })
            .collect();
        points.sort_by_key(|p| p.date);

        Ok(points)
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn create(&self, analysis: &Analysis) -> Result<()> {
        debug!(analysis_id = %analysis.id, "Storing analysis");
        self.analyses.write().await.push(analysis.clone());
        Ok(())
    }

    async fn find_by_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
        offset: usize,
    ) -> Result<(Vec<Analysis>, usize)> {
        let mut matches: Vec<Analysis> = self
            .analyses
            .read()
            .await
            .iter()
            .filter(|a| a.user_id == user_id && a.date_taken >= start && a.date_taken <= end)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.date_taken.cmp(&a.date_taken));

        Ok(paginate(matches, limit, offset))
    }
}

#[async_trait]
impl MedicationStore for MemoryStore {
    async fn create(&self, medication: &Medication) -> Result<()> {
        debug!(medication_id = %medication.id, "Storing medication");
        self.medications.write().await.push(medication.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: Uuid, active_only: bool) -> Result<Vec<Medication>> {
        Ok(self
            .medications
            .read()
            .await
            .iter()
            .filter(|m| m.user_id == user_id && (!active_only || m.is_active))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IntakeStore for MemoryStore {
    async fn create(&self, intake: &MedicationIntake) -> Result<()> {
        self.intakes.write().await.push(intake.clone());
        Ok(())
    }

    async fn update(&self, intake: &MedicationIntake) -> Result<()> {
        let mut intakes = self.intakes.write().await;
        match intakes.iter_mut().find(|i| i.id == intake.id) {
            Some(slot) => {
                *slot = intake.clone();
                Ok(())
            }
            None => bail!("intake {} not found", intake.id),
        }
    }

    async fn compliance_rate(
        &self,
        medication_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64> {
        let intakes = self.intakes.read().await;
        let in_range = intakes.iter().filter(|i| {
            i.medication_id == medication_id
                && i.scheduled_time >= start
                && i.scheduled_time <= end
        });

        let mut scheduled = 0u64;
        let mut taken = 0u64;
        for intake in in_range {
            scheduled += 1;
            if intake.is_taken {
                taken += 1;
            }
        }

        Ok(adherence::compliance_rate(scheduled, taken))
    }
}
