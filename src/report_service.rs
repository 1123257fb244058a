//! Report assembly service
//!
//! Orchestrates report generation: loads the visit, gates on ownership,
//! pulls the diary slices for the requested period, computes the
//! wellbeing trend, and persists the identifier snapshot back onto the
//! visit. The whole pipeline is sequential; any failure aborts it with
//! no partial report and no partial persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::report::{Report, ReportAnalysis, ReportMedication, ReportSymptom, WellbeingTrend};
use crate::store::{AnalysisStore, MedicationStore, SymptomStore, VisitStore};
use crate::validation::validate_date_range;
use crate::visit::{DateRange, ReportData};

/// Input for one report generation
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub visit_id: Uuid,
    /// The requesting user; must own the visit
    pub user_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Questions for the doctor; when present, also stored on the visit
    pub questions: Option<String>,
}

/// Assembles doctor-visit reports from the injected diary stores
pub struct ReportService {
    visits: Arc<dyn VisitStore>,
    symptoms: Arc<dyn SymptomStore>,
    analyses: Arc<dyn AnalysisStore>,
    medications: Arc<dyn MedicationStore>,
    /// Upper bound on records fetched per category
    page_limit: usize,
}

impl ReportService {
    pub fn new(
        visits: Arc<dyn VisitStore>,
        symptoms: Arc<dyn SymptomStore>,
        analyses: Arc<dyn AnalysisStore>,
        medications: Arc<dyn MedicationStore>,
        page_limit: usize,
    ) -> Self {
        Self {
            visits,
            symptoms,
            analyses,
            medications,
            page_limit,
        }
    }

    /// Construct with the page limit taken from configuration
    pub fn with_settings(
        visits: Arc<dyn VisitStore>,
        symptoms: Arc<dyn SymptomStore>,
        analyses: Arc<dyn AnalysisStore>,
        medications: Arc<dyn MedicationStore>,
        settings: &Settings,
    ) -> Self {
        Self::new(
            visits,
            symptoms,
            analyses,
            medications,
            settings.report.page_limit,
        )
    }

    /// Generate a report for a visit over the requested period.
    ///
    /// The visit must exist and belong to the requesting user; the
    /// ownership check runs before any diary data is touched. On success
    /// the visit carries a fresh `ReportData` snapshot and, if questions
    /// were supplied, the new questions text.
    pub async fn generate(&self, request: ReportRequest) -> AppResult<Report> {
        validate_date_range(request.start, request.end)?;

        info!(
            visit_id = %request.visit_id,
            user_id = %request.user_id,
            start = %request.start,
            end = %request.end,
            "Generating doctor-visit report"
        );

        let mut visit = self
            .visits
            .get(request.visit_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("visit {}", request.visit_id)))?;

        // The only access-control gate in the core; nothing is fetched
        // for a visit the requester does not own.
        if visit.user_id != request.user_id {
            return Err(AppError::Unauthorized(format!(
                "visit {} does not belong to user {}",
                request.visit_id, request.user_id
            )));
        }

        let period = DateRange::new(request.start, request.end);
        let mut report = Report::new(visit.id, visit.visit_date, period);

        let (symptoms, symptom_total) = self
            .symptoms
            .find_by_range(
                request.user_id,
                request.start,
                request.end,
                self.page_limit,
                0,
            )
            .await?;
        debug!(count = symptoms.len(), total = symptom_total, "Fetched symptom entries");
        for entry in &symptoms {
            report.add_symptom(ReportSymptom {
                id: entry.id,
                date_time: entry.date_time,
                description: entry.description.clone(),
                wellbeing_scale: entry.wellbeing_scale,
            });
        }

        let trend_points = self
            .symptoms
            .wellbeing_points(request.user_id, request.start, request.end)
            .await?;
        let trend = WellbeingTrend::from_points(&trend_points);
        if !trend.is_empty() {
            report.set_trend(trend);
        }

        let (analyses, analysis_total) = self
            .analyses
            .find_by_range(
                request.user_id,
                request.start,
                request.end,
                self.page_limit,
                0,
            )
            .await?;
        debug!(count = analyses.len(), total = analysis_total, "Fetched analyses");
        for analysis in &analyses {
            report.add_analysis(ReportAnalysis {
                id: analysis.id,
                kind: analysis.kind_tag().to_string(),
                name: analysis.name.clone(),
                date_taken: analysis.date_taken,
            });
        }

        // Active medications are evaluated at generation time, not
        // filtered by the report window.
        let medications = self
            .medications
            .find_by_user(request.user_id, true)
            .await?;
        for medication in &medications {
            report.add_medication(ReportMedication {
                id: medication.id,
                name: medication.name.clone(),
                dosage: medication.dosage.clone(),
                is_active: medication.is_active,
            });
        }

        if let Some(questions) = request.questions {
            report.set_questions(questions.clone());
            visit.questions = Some(questions);
        }

        let report_data = ReportData {
            period,
            symptom_ids: symptoms.iter().map(|s| s.id).collect(),
            analysis_ids: analyses.iter().map(|a| a.id).collect(),
            medication_ids: medications.iter().map(|m| m.id).collect(),
        };
        visit.set_report_data(report_data)?;

        self.visits.update(&visit).await?;

        info!(
            visit_id = %visit.id,
            symptoms = report.symptoms.len(),
            analyses = report.analyses.len(),
            medications = report.medications.len(),
            "Report generated"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::analysis::{Analysis, AnalysisKind, FileKind};
    use crate::medication::{Medication, Schedule};
    use crate::memory::MemoryStore;
    use crate::symptom::SymptomEntry;
    use crate::visit::Visit;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: ReportService,
        user: Uuid,
        visit: Visit,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let service = ReportService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            1000,
        );

        let user = Uuid::new_v4();
        let end = Utc::now();
        let start = end - Duration::days(14);

        let visit = Visit::new(user, end + Duration::days(3));
        VisitStore::create(store.as_ref(), &visit).await.unwrap();

        Fixture {
            store,
            service,
            user,
            visit,
            start,
            end,
        }
    }

    fn request(f: &Fixture) -> ReportRequest {
        ReportRequest {
            visit_id: f.visit.id,
            user_id: f.user,
            start: f.start,
            end: f.end,
            questions: None,
        }
    }

    async fn seed_entry(f: &Fixture, days_ago: i64, scale: i32) -> SymptomEntry {
        let entry = SymptomEntry::new(
            f.user,
            f.end - Duration::days(days_ago),
            format!("entry -{}d", days_ago),
            scale,
        )
        .unwrap();
        SymptomStore::create(f.store.as_ref(), &entry).await.unwrap();
        entry
    }

    async fn seed_analysis(f: &Fixture, days_ago: i64) -> Analysis {
        let analysis = Analysis::new(
            f.user,
            AnalysisKind::Blood,
            "CBC".to_string(),
            f.end - Duration::days(days_ago),
            "files/cbc.pdf".to_string(),
            FileKind::Pdf,
        );
        AnalysisStore::create(f.store.as_ref(), &analysis)
            .await
            .unwrap();
        analysis
    }

    async fn seed_medication(f: &Fixture, name: &str, active: bool) -> Medication {
        let mut medication = Medication::new(
            f.user,
            name.to_string(),
            "5 mg".to_string(),
            Schedule::daily(&["09:00"]),
            f.end - Duration::days(90),
        );
        if !active {
            medication.deactivate();
        }
        MedicationStore::create(f.store.as_ref(), &medication)
            .await
            .unwrap();
        medication
    }

    #[tokio::test]
    async fn test_report_counts_match_store_queries() {
        let f = fixture().await;
        seed_entry(&f, 1, 6).await;
        seed_entry(&f, 3, 4).await;
        seed_analysis(&f, 2).await;
        seed_medication(&f, "Lisinopril", true).await;
        seed_medication(&f, "Old med", false).await;

        let report = f.service.generate(request(&f)).await.unwrap();

        assert_eq!(report.symptoms.len(), 2);
        assert_eq!(report.analyses.len(), 1);
        // Only the active medication is listed
        assert_eq!(report.medications.len(), 1);
        assert_eq!(report.medications[0].name, "Lisinopril");
    }

    #[tokio::test]
    async fn test_trend_statistics_over_period() {
        let f = fixture().await;
        seed_entry(&f, 5, 3).await;
        seed_entry(&f, 3, 7).await;
        seed_entry(&f, 1, 5).await;

        let report = f.service.generate(request(&f)).await.unwrap();
        let trend = &report.wellbeing_trend;

        assert_eq!(trend.average, 5.0);
        assert_eq!(trend.min, 3);
        assert_eq!(trend.max, 7);
        assert_eq!(trend.points.len(), 3);
        // Trend points come back oldest first
        assert!(trend.points.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[tokio::test]
    async fn test_empty_period_yields_zero_trend_not_error() {
        let f = fixture().await;

        let report = f.service.generate(request(&f)).await.unwrap();

        assert!(report.symptoms.is_empty());
        assert!(report.wellbeing_trend.is_empty());
        assert_eq!(report.wellbeing_trend.average, 0.0);

        // The snapshot is still persisted, just empty
        let visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        let data = visit.report_data.unwrap();
        assert!(data.symptom_ids.is_empty());
        assert!(visit.report_generated_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_visit_is_not_found() {
        let f = fixture().await;
        let mut req = request(&f);
        req.visit_id = Uuid::new_v4();

        let result = f.service.generate(req).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_foreign_visit_is_unauthorized_and_unpersisted() {
        let f = fixture().await;
        seed_entry(&f, 1, 6).await;

        let mut req = request(&f);
        req.user_id = Uuid::new_v4();
        req.questions = Some("should not stick".to_string());

        let result = f.service.generate(req).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));

        // No mutation reached the store
        let visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        assert!(visit.report_data.is_none());
        assert!(visit.report_generated_at.is_none());
        assert!(visit.questions.is_none());
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected_before_store_access() {
        let f = fixture().await;
        let mut req = request(&f);
        req.start = f.end;
        req.end = f.start;

        let result = f.service.generate(req).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        assert!(visit.report_data.is_none());
    }

    #[tokio::test]
    async fn test_questions_set_on_report_and_visit() {
        let f = fixture().await;
        let mut req = request(&f);
        req.questions = Some("Is the dosage still right?".to_string());

        let report = f.service.generate(req).await.unwrap();

        assert_eq!(report.questions.as_deref(), Some("Is the dosage still right?"));
        let visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        assert_eq!(visit.questions.as_deref(), Some("Is the dosage still right?"));
    }

    #[tokio::test]
    async fn test_omitted_questions_leave_visit_untouched() {
        let f = fixture().await;

        // Pre-existing questions on the visit
        let mut visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        visit.questions = Some("old questions".to_string());
        VisitStore::update(f.store.as_ref(), &visit).await.unwrap();

        let report = f.service.generate(request(&f)).await.unwrap();

        assert!(report.questions.is_none());
        let visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        assert_eq!(visit.questions.as_deref(), Some("old questions"));
    }

    #[tokio::test]
    async fn test_snapshot_ids_follow_query_order() {
        let f = fixture().await;
        seed_entry(&f, 4, 5).await;
        seed_entry(&f, 2, 6).await;
        seed_entry(&f, 6, 7).await;

        let report = f.service.generate(request(&f)).await.unwrap();
        let visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        let data = visit.report_data.unwrap();

        let report_ids: Vec<Uuid> = report.symptoms.iter().map(|s| s.id).collect();
        assert_eq!(data.symptom_ids, report_ids);
        // Store order is newest first
        assert!(report.symptoms.windows(2).all(|w| w[0].date_time >= w[1].date_time));
        assert_eq!(data.period, DateRange::new(f.start, f.end));
    }

    #[tokio::test]
    async fn test_regeneration_is_idempotent() {
        let f = fixture().await;
        seed_entry(&f, 1, 6).await;
        seed_analysis(&f, 2).await;
        seed_medication(&f, "Lisinopril", true).await;

        let first = f.service.generate(request(&f)).await.unwrap();
        let second = f.service.generate(request(&f)).await.unwrap();

        // Identical content except the generation timestamp
        let mut aligned = second.clone();
        aligned.generated_at = first.generated_at;
        assert_eq!(first, aligned);
    }

    #[tokio::test]
    async fn test_regeneration_leaves_no_residue() {
        let f = fixture().await;
        seed_entry(&f, 3, 4).await;

        f.service.generate(request(&f)).await.unwrap();

        // Diary grows between generations
        let new_entry = seed_entry(&f, 1, 8).await;
        f.service.generate(request(&f)).await.unwrap();

        let visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        let data = visit.report_data.unwrap();

        assert_eq!(data.symptom_ids.len(), 2);
        assert!(data.symptom_ids.contains(&new_entry.id));
    }

    #[tokio::test]
    async fn test_page_limit_caps_fetched_records() {
        let f = fixture().await;
        let capped = ReportService::new(
            f.store.clone(),
            f.store.clone(),
            f.store.clone(),
            f.store.clone(),
            2,
        );
        seed_entry(&f, 1, 5).await;
        seed_entry(&f, 2, 5).await;
        seed_entry(&f, 3, 5).await;

        let report = capped.generate(request(&f)).await.unwrap();

        assert_eq!(report.symptoms.len(), 2);
        let visit = f.store.get(f.visit.id).await.unwrap().unwrap();
        assert_eq!(visit.report_data.unwrap().symptom_ids.len(), 2);
    }

    #[tokio::test]
    async fn test_active_medications_ignore_report_window() {
        let f = fixture().await;
        // Started long before the window, still active
        let medication = seed_medication(&f, "Metformin", true).await;
        assert!(medication.start_date < f.start);

        let report = f.service.generate(request(&f)).await.unwrap();

        assert_eq!(report.medications.len(), 1);
        assert!(report.medications[0].is_active);
    }
}
