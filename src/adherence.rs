//! Medication adherence statistics
//!
//! Reduces intake counts over a period into a compliance percentage.
//! Callers invoke this per medication; nothing here batches across the
//! whole cabinet.

use tracing::debug;

/// Compliance percentage in `[0, 100]` from scheduled/taken counts.
///
/// `taken` never exceeds `scheduled` by construction of the upstream
/// query (each intake slot is counted once); that is not re-checked here.
/// No scheduled slots means a rate of 0, not a division fault.
pub fn compliance_rate(scheduled: u64, taken: u64) -> f64 {
    if scheduled == 0 {
        return 0.0;
    }

    let rate = taken as f64 / scheduled as f64 * 100.0;
    debug!(scheduled, taken, rate, "Computed compliance rate");
    rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_scheduled_is_zero_rate() {
        assert_eq!(compliance_rate(0, 0), 0.0);
    }

    #[test]
    fn test_partial_compliance() {
        assert_eq!(compliance_rate(10, 7), 70.0);
    }

    #[test]
    fn test_full_compliance() {
        assert_eq!(compliance_rate(4, 4), 100.0);
    }

    #[test]
    fn test_no_doses_taken() {
        assert_eq!(compliance_rate(12, 0), 0.0);
    }

    #[test]
    fn test_fractional_rate() {
        let rate = compliance_rate(3, 2);
        assert!((rate - 66.666_666).abs() < 0.001);
    }
}
