//! Analytics configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::AnalyticsSettings;
use crate::domain::analysis::{AbcClassifier, AbcThresholds, AlertEngine, AlertRules};
use crate::domain::inventory::{Normalizer, DEFAULT_VALUE_TOLERANCE};

/// Analytics configuration
///
/// Every field has a default, so an empty environment yields the standard
/// 80/95 ABC split and the default alert rules.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Cumulative value share closing class A
    #[serde(default = "default_abc_a")]
    pub abc_a_threshold: f64,

    /// Cumulative value share closing class B
    #[serde(default = "default_abc_b")]
    pub abc_b_threshold: f64,

    /// Overstock when quantity exceeds this multiple of the category median
    #[serde(default = "default_overstock_multiple")]
    pub overstock_multiple: f64,

    /// Stockout risk below this fraction of the expected level
    #[serde(default = "default_stockout_fraction")]
    pub stockout_fraction: f64,

    /// Minimum value for dead-capital alerts
    #[serde(default = "default_dead_capital_min_value")]
    pub dead_capital_min_value: f64,

    /// Share of total value for `Alta` dead-capital severity
    #[serde(default = "default_high_share")]
    pub high_share: f64,

    /// Share of total value for `Media` dead-capital severity
    #[serde(default = "default_medium_share")]
    pub medium_share: f64,

    /// Relative tolerance before an imported total is recomputed
    #[serde(default = "default_value_tolerance")]
    pub value_tolerance: f64,

    /// Alerts returned when a request passes no `top` (0 = all, the default)
    #[serde(default = "default_alert_limit")]
    pub default_alert_limit: usize,
}

impl AnalyticsConfig {
    /// ABC thresholds
    pub fn abc_thresholds(&self) -> Result<AbcThresholds, ValidationError> {
        AbcThresholds::new(self.abc_a_threshold, self.abc_b_threshold)
            .map_err(|e| ValidationError::InvalidAbcThresholds(e.to_string()))
    }

    /// Alert rules
    pub fn alert_rules(&self) -> AlertRules {
        AlertRules {
            overstock_multiple: self.overstock_multiple,
            stockout_fraction: self.stockout_fraction,
            dead_capital_min_value: self.dead_capital_min_value,
            high_share: self.high_share,
            medium_share: self.medium_share,
        }
    }

    /// Build the analytics services used by the handlers
    pub fn settings(&self) -> Result<AnalyticsSettings, ValidationError> {
        self.validate()?;
        Ok(AnalyticsSettings {
            normalizer: Normalizer::new(self.value_tolerance),
            classifier: AbcClassifier::new(self.abc_thresholds()?),
            alert_engine: AlertEngine::new(self.alert_rules()),
            default_alert_limit: (self.default_alert_limit > 0).then_some(self.default_alert_limit),
        })
    }

    /// Validate analytics configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.abc_thresholds()?;
        self.alert_rules()
            .validate()
            .map_err(|e| ValidationError::InvalidAlertRules(e.to_string()))?;
        if !(self.value_tolerance.is_finite() && self.value_tolerance >= 0.0) {
            return Err(ValidationError::InvalidValueTolerance);
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            abc_a_threshold: default_abc_a(),
            abc_b_threshold: default_abc_b(),
            overstock_multiple: default_overstock_multiple(),
            stockout_fraction: default_stockout_fraction(),
            dead_capital_min_value: default_dead_capital_min_value(),
            high_share: default_high_share(),
            medium_share: default_medium_share(),
            value_tolerance: default_value_tolerance(),
            default_alert_limit: default_alert_limit(),
        }
    }
}

fn default_abc_a() -> f64 {
    AbcThresholds::default().a()
}

fn default_abc_b() -> f64 {
    AbcThresholds::default().b()
}

fn default_overstock_multiple() -> f64 {
    AlertRules::default().overstock_multiple
}

fn default_stockout_fraction() -> f64 {
    AlertRules::default().stockout_fraction
}

fn default_dead_capital_min_value() -> f64 {
    AlertRules::default().dead_capital_min_value
}

fn default_high_share() -> f64 {
    AlertRules::default().high_share
}

fn default_medium_share() -> f64 {
    AlertRules::default().medium_share
}

fn default_value_tolerance() -> f64 {
    DEFAULT_VALUE_TOLERANCE
}

fn default_alert_limit() -> usize {
    0
}
