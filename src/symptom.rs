//! Symptom diary entries
//!
//! A symptom entry is one dated observation in the user's diary: free-text
//! description plus a self-reported wellbeing score and optional vitals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::validation::validate_wellbeing_scale;

/// A single symptom diary entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SymptomEntry {
    /// Unique identifier for this entry
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// When the symptom was observed
    pub date_time: DateTime<Utc>,

    /// Free-text description of the symptom
    pub description: String,

    /// Self-reported wellbeing score
    #[validate(range(min = 1, max = 10, message = "Wellbeing scale must be between 1 and 10"))]
    pub wellbeing_scale: i32,

    /// Body temperature in Celsius, if measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Systolic blood pressure (mmHg), if measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure_systolic: Option<i32>,

    /// Diastolic blood pressure (mmHg), if measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure_diastolic: Option<i32>,

    /// Pulse (beats per minute), if measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<i32>,

    /// URL of an attached photo, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a symptom entry; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct SymptomPatch {
    pub date_time: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub wellbeing_scale: Option<i32>,
    pub temperature: Option<f64>,
    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,
    pub pulse: Option<i32>,
    pub photo_url: Option<String>,
}

impl SymptomEntry {
    /// Create a new symptom entry with current audit timestamps
    pub fn new(
        user_id: Uuid,
        date_time: DateTime<Utc>,
        description: String,
        wellbeing_scale: i32,
    ) -> AppResult<Self> {
        validate_wellbeing_scale(wellbeing_scale)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            date_time,
            description,
            wellbeing_scale,
            temperature: None,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            pulse: None,
            photo_url: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update; the wellbeing scale is re-validated
    pub fn apply(&mut self, patch: SymptomPatch) -> AppResult<()> {
        if let Some(scale) = patch.wellbeing_scale {
            validate_wellbeing_scale(scale)?;
            self.wellbeing_scale = scale;
        }
        if let Some(date_time) = patch.date_time {
            self.date_time = date_time;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = Some(temperature);
        }
        if let Some(systolic) = patch.blood_pressure_systolic {
            self.blood_pressure_systolic = Some(systolic);
        }
        if let Some(diastolic) = patch.blood_pressure_diastolic {
            self.blood_pressure_diastolic = Some(diastolic);
        }
        if let Some(pulse) = patch.pulse {
            self.pulse = Some(pulse);
        }
        if let Some(photo_url) = patch.photo_url {
            self.photo_url = Some(photo_url);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
