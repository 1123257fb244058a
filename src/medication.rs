//! Medications and intake tracking
//!
//! A medication carries its dosing schedule; every scheduled slot becomes
//! an intake record that is either marked taken or left open. Adherence
//! statistics are computed over those intake records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often the medication is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    Daily,
    Weekly,
    AsNeeded,
}

/// Dosing schedule details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub kind: ScheduleKind,
    /// Times of day, e.g. ["09:00", "21:00"]
    pub times: Vec<String>,
    /// Days of week for weekly schedules (1 = Monday .. 7 = Sunday)
    pub days: Vec<u8>,
}

impl Schedule {
    /// Convenience constructor for a daily schedule at the given times
    pub fn daily(times: &[&str]) -> Self {
        Self {
            kind: ScheduleKind::Daily,
            times: times.iter().map(|t| t.to_string()).collect(),
            days: Vec::new(),
        }
    }
}

/// A medication the user is (or was) taking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Free-form dosage description, e.g. "5 mg"
    pub dosage: String,
    pub schedule: Schedule,
    pub start_date: DateTime<Utc>,
    /// End of the course; open-ended when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Medication {
    /// Create a new, active medication
    pub fn new(
        user_id: Uuid,
        name: String,
        dosage: String,
        schedule: Schedule,
        start_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            dosage,
            schedule,
            start_date,
            end_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the medication as no longer taken
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Whether the course's end date has passed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.end_date {
            Some(end) => now > end,
            None => false,
        }
    }
}

/// One scheduled intake slot for a medication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationIntake {
    pub id: Uuid,
    pub medication_id: Uuid,
    pub scheduled_time: DateTime<Utc>,
    /// When the dose was actually taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<DateTime<Utc>>,
    pub is_taken: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MedicationIntake {
    /// Create a new, not-yet-taken intake slot
    pub fn new(medication_id: Uuid, scheduled_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            medication_id,
            scheduled_time,
            taken_at: None,
            is_taken: false,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the dose as taken now
    pub fn mark_taken(&mut self, notes: Option<String>) {
        self.is_taken = true;
        self.taken_at = Some(Utc::now());
        if notes.is_some() {
            self.notes = notes;
        }
    }

    /// Revert the slot to not taken
    pub fn mark_not_taken(&mut self) {
        self.is_taken = false;
        self.taken_at = None;
        self.notes = None;
    }
}
