//! Input validation module
//!
//! Primitive range checks for diary inputs. Anything richer than a range
//! check belongs to the record-owning collaborator, not this core.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::{AppError, AppResult};

/// Diary value constraints
pub struct DiaryConstraints;

impl DiaryConstraints {
    /// Self-reported wellbeing scale bounds
    pub const WELLBEING_MIN: i32 = 1;
    pub const WELLBEING_MAX: i32 = 10;

    /// Pagination bounds for range queries
    pub const PAGE_LIMIT_MAX: usize = 1000;
}

/// Validate a self-reported wellbeing scale value
pub fn validate_wellbeing_scale(value: i32) -> AppResult<()> {
    if value < DiaryConstraints::WELLBEING_MIN || value > DiaryConstraints::WELLBEING_MAX {
        warn!(value = value, "Wellbeing scale out of range");
        return Err(AppError::Validation(format!(
            "Wellbeing scale {} out of valid range [{}, {}]",
            value,
            DiaryConstraints::WELLBEING_MIN,
            DiaryConstraints::WELLBEING_MAX
        )));
    }

    Ok(())
}

/// Validate an inclusive date range
pub fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
    if start > end {
        warn!(start = %start, end = %end, "Inverted date range");
        return Err(AppError::Validation(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }

    Ok(())
}

/// Validate pagination parameters
pub fn validate_pagination(limit: usize, offset: usize) -> AppResult<(usize, usize)> {
    if limit == 0 || limit > DiaryConstraints::PAGE_LIMIT_MAX {
        return Err(AppError::Validation(format!(
            "Limit must be between 1 and {}",
            DiaryConstraints::PAGE_LIMIT_MAX
        )));
    }

    Ok((limit, offset))
}
