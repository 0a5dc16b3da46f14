//! Configuration loading and management.
//!
//! The break policy can be tuned from a TOML file or `GOHOME_*` environment
//! variables. Without any configuration the statutory policy applies.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveTime};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::policy::{BreakPolicy, BreakTier, BusinessHours};

/// Break policy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Daily maximum of accounted work, in minutes.
    pub max_work_minutes: i64,

    /// Break tiers in ascending order of their threshold.
    pub tiers: Vec<TierConfig>,

    /// Optional opening hours for solved leave times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<BusinessHoursConfig>,
}

/// One break tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Work time in minutes above which the tier applies.
    pub after_minutes: i64,
    /// Minimum break in minutes once the tier applies.
    pub break_minutes: i64,
}

/// Opening hours as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHoursConfig {
    pub open: String,
    pub close: String,
}

impl Default for Config {
    fn default() -> Self {
        let policy = BreakPolicy::statutory();
        Self {
            max_work_minutes: policy.max_work().num_minutes(),
            tiers: policy
                .tiers()
                .iter()
                .map(|tier| TierConfig {
                    after_minutes: tier.after.num_minutes(),
                    break_minutes: tier.min_break.num_minutes(),
                })
                .collect(),
            business_hours: None,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (GOHOME_*)
        figment = figment.merge(Env::prefixed("GOHOME_").split("__"));

        let config: Self = figment.extract()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Builds the validated break policy described by this configuration.
    pub fn policy(&self) -> Result<BreakPolicy, PolicyError> {
        let tiers = self
            .tiers
            .iter()
            .map(|tier| {
                Ok(BreakTier::new(
                    minutes(tier.after_minutes)?,
                    minutes(tier.break_minutes)?,
                ))
            })
            .collect::<Result<_, PolicyError>>()?;
        let policy = BreakPolicy::new(tiers, minutes(self.max_work_minutes)?)?;

        match &self.business_hours {
            Some(hours) => {
                let open = parse_time_of_day(&hours.open)?;
                let close = parse_time_of_day(&hours.close)?;
                Ok(policy.with_business_hours(BusinessHours::new(open, close)?))
            }
            None => Ok(policy),
        }
    }
}

fn minutes(value: i64) -> Result<Duration, PolicyError> {
    Duration::try_minutes(value).ok_or(PolicyError::MinutesOutOfRange { value })
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime, PolicyError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| PolicyError::InvalidTimeOfDay {
        value: value.to_string(),
    })
}

/// Returns the platform-specific config directory for gohome.
///
/// On Linux: `~/.config/gohome`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gohome"))
}
