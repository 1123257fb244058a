//! HealthHub Reporting Core
//!
//! Aggregation engine for a personal health diary: pulls time-stamped
//! symptom, analysis, medication and intake records, computes wellbeing
//! trend and adherence statistics, and assembles immutable doctor-visit
//! reports bound to a visit and period.
//!
//! This crate is a library boundary only. Persistence, transport, and
//! authentication live in collaborating services behind the traits in
//! [`store`].
//!
//! ⚠️ DISCLAIMER:
//! This system is NOT a medical diagnostic tool.

pub mod adherence;
pub mod analysis;
pub mod config;
pub mod error;
pub mod fake_diary;
pub mod medication;
pub mod memory;
pub mod report;
pub mod report_service;
pub mod store;
pub mod symptom;
pub mod validation;
pub mod visit;

pub use crate::config::Settings;
pub use crate::error::{AppError, AppResult};
pub use crate::memory::MemoryStore;
pub use crate::report::{Report, WellbeingPoint, WellbeingTrend};
pub use crate::report_service::{ReportRequest, ReportService};
pub use crate::visit::{DateRange, ReportData, Visit};
