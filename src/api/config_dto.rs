use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{Capacity, LoaderConfig, OutputFormat, SchedulerConfig};
use crate::error::{Error, Result};
use crate::loader::time_zone::parse_time_zone;

/// Run configuration as read from a JSON file or assembled from CLI flags.
/// Every field is optional; unset fields take the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RunConfigDto {
    pub utilization: Option<f64>,

    /// Agents per hour; 0 means unlimited.
    pub capacity: Option<i64>,

    pub format: Option<String>,
    pub default_time_zone: Option<String>,

    /// `YYYY-MM-DD`.
    pub reference_date: Option<String>,

    pub stats_file: Option<String>,
}

/// Validated configuration of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub scheduler: SchedulerConfig,
    pub loader: LoaderConfig,
    pub format: OutputFormat,
    pub stats_file: Option<String>,
}

impl RunConfigDto {
    /// Fields set in `overrides` win over the ones in `self`.
    pub fn merge(self, overrides: RunConfigDto) -> RunConfigDto {
        RunConfigDto {
            utilization: overrides.utilization.or(self.utilization),
            capacity: overrides.capacity.or(self.capacity),
            format: overrides.format.or(self.format),
            default_time_zone: overrides.default_time_zone.or(self.default_time_zone),
            reference_date: overrides.reference_date.or(self.reference_date),
            stats_file: overrides.stats_file.or(self.stats_file),
        }
    }

    pub fn into_config(self) -> Result<RunConfig> {
        let scheduler = SchedulerConfig::new(self.utilization.unwrap_or(1.0), Capacity::from_limit(self.capacity.unwrap_or(0)))?;

        let mut loader = LoaderConfig::default();
        if let Some(zone) = &self.default_time_zone {
            loader.default_time_zone = parse_time_zone(zone)?;
        }
        if let Some(date) = &self.reference_date {
            loader.reference_date =
                Some(NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(date.to_string()))?);
        }

        let format = match &self.format {
            Some(format) => format.parse::<OutputFormat>()?,
            None => OutputFormat::default(),
        };

        Ok(RunConfig { scheduler, loader, format, stats_file: self.stats_file })
    }
}
