//! Fake Diary Data Generator
//!
//! Generates a plausible health diary for testing and development:
//! daily symptom entries whose wellbeing score follows a noisy drift,
//! a small medication cabinet with scheduled intakes (mostly taken),
//! and periodic lab analyses.
//!
//! This is the single source of demo data in the system. When a real
//! ingestion path exists (bot, mobile client), this module stays behind
//! for tests only.

use chrono::{Duration, TimeZone, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::{Analysis, AnalysisKind, FileKind};
use crate::medication::{Medication, MedicationIntake, Schedule};
use crate::memory::MemoryStore;
use crate::store::{AnalysisStore, IntakeStore, MedicationStore, SymptomStore};
use crate::symptom::SymptomEntry;
use crate::validation::DiaryConstraints;

/// Symptom descriptions sampled for generated entries
const DESCRIPTIONS: &[&str] = &[
    "mild headache",
    "fatigue in the afternoon",
    "slept poorly",
    "felt fine",
    "dizzy after standing up",
    "lower back pain",
    "no appetite",
];

/// Probability that a scheduled dose was actually taken
const TAKEN_PROBABILITY: f64 = 0.85;

/// What the generator seeded, for callers that want to query it back
#[derive(Debug, Clone)]
pub struct SeededDiary {
    pub user_id: Uuid,
    pub medication_ids: Vec<Uuid>,
    pub entry_count: usize,
    pub analysis_count: usize,
    pub intake_count: usize,
}

/// Fake diary generator producing realistic daily records
pub struct FakeDiaryGenerator {
    /// Number of past days to cover, ending yesterday
    days: u32,
    /// Baseline wellbeing the noisy walk drifts around
    base_wellbeing: f64,
}

impl FakeDiaryGenerator {
    pub fn new(days: u32) -> Self {
        info!(days = days, "Initializing fake diary generator");

        Self {
            days,
            base_wellbeing: 7.0,
        }
    }

    /// Construct with the day span taken from configuration
    pub fn with_settings(settings: &crate::config::Settings) -> Self {
        Self::new(settings.demo.days)
    }

    /// Seed a store with one user's diary covering the configured span
    pub async fn seed(&self, store: &MemoryStore, user_id: Uuid) -> anyhow::Result<SeededDiary> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();

        let wellbeing_noise = Normal::new(0.0, 1.5).unwrap();
        let temperature_noise = Normal::new(36.8, 0.4).unwrap();
        let pulse_noise = Normal::new(72.0, 8.0).unwrap();

        let medications = vec![
            Medication::new(
                user_id,
                "Lisinopril".to_string(),
                "5 mg".to_string(),
                Schedule::daily(&["08:00", "20:00"]),
                now - Duration::days(i64::from(self.days)),
            ),
            Medication::new(
                user_id,
                "Vitamin D".to_string(),
                "2000 IU".to_string(),
                Schedule::daily(&["09:00"]),
                now - Duration::days(i64::from(self.days)),
            ),
        ];
        for medication in &medications {
            MedicationStore::create(store, medication).await?;
        }

        let mut entry_count = 0;
        let mut analysis_count = 0;
        let mut intake_count = 0;

        for days_ago in (1..=i64::from(self.days)).rev() {
            let day = now - Duration::days(days_ago);

            let drift = wellbeing_noise.sample(&mut rng);
            let value = (self.base_wellbeing + drift).round() as i32;
            let value = value.clamp(
                DiaryConstraints::WELLBEING_MIN,
                DiaryConstraints::WELLBEING_MAX,
            );

            let description = DESCRIPTIONS[rng.gen_range(0..DESCRIPTIONS.len())];
            let mut entry = SymptomEntry::new(user_id, day, description.to_string(), value)?;
            if rng.gen_bool(0.3) {
                entry.temperature = Some(temperature_noise.sample(&mut rng));
            }
            if rng.gen_bool(0.25) {
                entry.pulse = Some(pulse_noise.sample(&mut rng) as i32);
            }
            SymptomStore::create(store, &entry).await?;
            entry_count += 1;

            for medication in &medications {
                for time in &medication.schedule.times {
                    let hour = time
                        .get(..2)
                        .and_then(|h| h.parse::<u32>().ok())
                        .unwrap_or(8)
                        .min(23);
                    let scheduled = Utc.from_utc_datetime(
                        &day.date_naive().and_hms_opt(hour, 0, 0).unwrap(),
                    );
                    let mut intake = MedicationIntake::new(medication.id, scheduled);
                    if rng.gen_bool(TAKEN_PROBABILITY) {
                        intake.mark_taken(None);
                    }
                    IntakeStore::create(store, &intake).await?;
                    intake_count += 1;
                }
            }

            // A lab result roughly every ten days
            if days_ago % 10 == 0 {
                let kind = if rng.gen_bool(0.5) {
                    AnalysisKind::Blood
                } else {
                    AnalysisKind::Urine
                };
                let analysis = Analysis::new(
                    user_id,
                    kind,
                    "Routine panel".to_string(),
                    day,
                    format!("files/panel-{}.pdf", days_ago),
                    FileKind::Pdf,
                );
                AnalysisStore::create(store, &analysis).await?;
                analysis_count += 1;
            }
        }

        debug!(
            entries = entry_count,
            intakes = intake_count,
            analyses = analysis_count,
            "Fake diary seeded"
        );

        Ok(SeededDiary {
            user_id,
            medication_ids: medications.iter().map(|m| m.id).collect(),
            entry_count,
            analysis_count,
            intake_count,
        })
    }
}
