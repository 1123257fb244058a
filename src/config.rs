//! Configuration management module
//!
//! Loads and validates environment-based configuration.
//! Designed to be production-ready and easily extensible.

use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid number format in environment variable")]
    ParseError,
}

/// Report generation settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// Upper bound on records fetched per category when assembling a report
    pub page_limit: usize,
}

/// Demo data generation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DemoSettings {
    /// Number of diary days the fake generator seeds
    pub days: u32,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub report: ReportSettings,
    pub demo: DemoSettings,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self, SettingsError> {
        let page_limit = env::var("REPORT_PAGE_LIMIT")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .map_err(|_| SettingsError::ParseError)?;

        let demo_days = env::var("DEMO_DIARY_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .map_err(|_| SettingsError::ParseError)?;

        Ok(Self {
            report: ReportSettings { page_limit },
            demo: DemoSettings { days: demo_days },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so the env-var mutations never race under the parallel runner
    #[test]
    fn test_settings_from_env() {
        env::remove_var("REPORT_PAGE_LIMIT");
        env::remove_var("DEMO_DIARY_DAYS");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.report.page_limit, 1000);
        assert_eq!(settings.demo.days, 30);

        env::set_var("REPORT_PAGE_LIMIT", "250");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.report.page_limit, 250);

        env::set_var("REPORT_PAGE_LIMIT", "plenty");
        assert!(Settings::from_env().is_err());

        env::remove_var("REPORT_PAGE_LIMIT");
    }
}
