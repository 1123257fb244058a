//! Doctor-visit reports
//!
//! The report is the transient aggregation returned to the caller: the
//! materialized diary slices for the requested period plus the wellbeing
//! trend. It is rebuilt on every generation and never persisted itself;
//! only the identifier snapshot (`ReportData`) lands on the visit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::visit::DateRange;

/// A symptom entry as embedded in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSymptom {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub description: String,
    pub wellbeing_scale: i32,
}

/// An analysis as embedded in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub id: Uuid,
    /// Stable kind tag, e.g. "blood"
    pub kind: String,
    pub name: String,
    pub date_taken: DateTime<Utc>,
}

/// A medication as embedded in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMedication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub is_active: bool,
}

/// One point of the wellbeing chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellbeingPoint {
    pub date: DateTime<Utc>,
    pub value: i32,
}

/// Aggregate wellbeing statistics over a period
///
/// The zero value (average 0, min/max 0, no points) means "no data for
/// the period" and is deliberately not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WellbeingTrend {
    pub average: f64,
    pub min: i32,
    pub max: i32,
    pub points: Vec<WellbeingPoint>,
}

impl WellbeingTrend {
    /// Reduce a pre-ordered sample series into trend statistics.
    ///
    /// Single pass: min/max are seeded from the first sample, the average
    /// uses real division. Points are carried over 1:1 in input order; no
    /// re-sorting happens here. Empty input yields the zero-value trend.
    pub fn from_points(samples: &[WellbeingPoint]) -> Self {
        let Some(first) = samples.first() else {
            return Self::default();
        };

        let mut sum = 0i64;
        let mut min = first.value;
        let mut max = first.value;

        for point in samples {
            sum += i64::from(point.value);
            if point.value < min {
                min = point.value;
            }
            if point.value > max {
                max = point.value;
            }
        }

        Self {
            average: sum as f64 / samples.len() as f64,
            min,
            max,
            points: samples.to_vec(),
        }
    }

    /// Whether the trend carries any data
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The assembled doctor-visit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub visit_id: Uuid,
    pub visit_date: DateTime<Utc>,
    pub period: DateRange,
    pub symptoms: Vec<ReportSymptom>,
    pub wellbeing_trend: WellbeingTrend,
    pub analyses: Vec<ReportAnalysis>,
    /// Currently active medications at generation time
    pub medications: Vec<ReportMedication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Create an empty report for a visit and period
    pub fn new(visit_id: Uuid, visit_date: DateTime<Utc>, period: DateRange) -> Self {
        Self {
            visit_id,
            visit_date,
            period,
            symptoms: Vec::new(),
            wellbeing_trend: WellbeingTrend::default(),
            analyses: Vec::new(),
            medications: Vec::new(),
            questions: None,
            generated_at: Utc::now(),
        }
    }

    pub fn add_symptom(&mut self, symptom: ReportSymptom) {
        self.symptoms.push(symptom);
    }

    pub fn add_analysis(&mut self, analysis: ReportAnalysis) {
        self.analyses.push(analysis);
    }

    pub fn add_medication(&mut self, medication: ReportMedication) {
        self.medications.push(medication);
    }

    pub fn set_trend(&mut self, trend: WellbeingTrend) {
        self.wellbeing_trend = trend;
    }

    pub fn set_questions(&mut self, questions: String) {
        self.questions = Some(questions);
    }
}
