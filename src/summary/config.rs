use anyhow::{Context, Result, ensure};

use crate::dataset::Period;

/// Minimum score for a slot to count as a highlight in the default deployment.
pub const DEFAULT_THRESHOLD: f64 = 60.0;

/// Stricter cut-off used by the poster view.
pub const STRICT_THRESHOLD: f64 = 70.0;

/// Environment variable overriding [`DEFAULT_THRESHOLD`].
pub const THRESHOLD_ENV: &str = "SUMMARY_THRESHOLD";

/// Knobs of the summary builder.
///
/// Two deployments disagree on the qualifying score (60 vs 70), so the
/// threshold lives here instead of being baked into the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    /// Slots scoring strictly below this are not highlights.
    pub threshold: f64,
    pub morning_label: String,
    pub afternoon_label: String,
    /// Shown instead of an empty event name.
    pub empty_event_label: String,
}

/// Parses a qualifying score. `NaN` and infinities are rejected since no
/// slot could be compared against them.
pub fn parse_threshold(raw: &str) -> Result<f64> {
    let threshold: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("threshold is not a number: '{raw}'"))?;
    ensure!(threshold.is_finite(), "threshold must be finite, got '{raw}'");
    Ok(threshold)
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            morning_label: "上午".to_string(),
            afternoon_label: "下午".to_string(),
            empty_event_label: "无".to_string(),
        }
    }
}

impl SummaryConfig {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    /// Builds the default config, taking the threshold from
    /// `SUMMARY_THRESHOLD` when set.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but not a finite number.
    pub fn from_env() -> Result<Self> {
        match std::env::var(THRESHOLD_ENV) {
            Ok(raw) => {
                let threshold = parse_threshold(&raw)
                    .with_context(|| format!("invalid {THRESHOLD_ENV}"))?;
                Ok(Self::with_threshold(threshold))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn period_label(&self, period: Period) -> &str {
        match period {
            Period::Am => &self.morning_label,
            Period::Pm => &self.afternoon_label,
        }
    }

    pub fn event_label<'a>(&'a self, event: &'a str) -> &'a str {
        if event.is_empty() {
            &self.empty_event_label
        } else {
            event
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(SummaryConfig::default().threshold, 60.0);
        assert_eq!(SummaryConfig::with_threshold(STRICT_THRESHOLD).threshold, 70.0);
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("70").unwrap(), 70.0);
        assert_eq!(parse_threshold(" 62.5 ").unwrap(), 62.5);
        assert!(parse_threshold("high").is_err());
    }

    #[test]
    fn test_parse_threshold_rejects_non_finite() {
        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("inf").is_err());
        assert!(parse_threshold("-infinity").is_err());
    }

    #[test]
    fn test_from_env_threshold() {
        // Only test in the crate touching SUMMARY_THRESHOLD.
        unsafe { std::env::set_var(THRESHOLD_ENV, "NaN") };
        assert!(SummaryConfig::from_env().is_err());

        unsafe { std::env::set_var(THRESHOLD_ENV, "70") };
        assert_eq!(SummaryConfig::from_env().unwrap().threshold, STRICT_THRESHOLD);

        unsafe { std::env::remove_var(THRESHOLD_ENV) };
        assert_eq!(SummaryConfig::from_env().unwrap().threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_period_labels() {
        let config = SummaryConfig::default();
        assert_eq!(config.period_label(Period::Am), "上午");
        assert_eq!(config.period_label(Period::Pm), "下午");
    }

    #[test]
    fn test_event_label_fallback() {
        let config = SummaryConfig::default();
        assert_eq!(config.event_label(""), "无");
        assert_eq!(config.event_label("观星"), "观星");
    }
}
