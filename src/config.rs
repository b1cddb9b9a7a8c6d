use chrono::NaiveDate;
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Zone assumed for input rows until a header names another one.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Los_Angeles;

/// Maximum number of agents that can be staffed within any single hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capacity {
    #[default]
    Unlimited,
    Limited(i64),
}

impl Capacity {
    /// A limit of zero or less means no ceiling.
    pub fn from_limit(limit: i64) -> Self {
        if limit > 0 { Capacity::Limited(limit) } else { Capacity::Unlimited }
    }
}

/// Parameters of a scheduling run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Fraction of an hour an agent spends on calls, in (0, 1].
    pub utilization: f64,
    pub capacity: Capacity,
}

impl SchedulerConfig {
    pub fn new(utilization: f64, capacity: Capacity) -> Result<Self> {
        let config = SchedulerConfig { utilization, capacity };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_utilization(self.utilization)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig { utilization: 1.0, capacity: Capacity::Unlimited }
    }
}

pub fn validate_utilization(utilization: f64) -> Result<()> {
    if utilization > 0.0 && utilization <= 1.0 { Ok(()) } else { Err(Error::InvalidUtilization(utilization)) }
}

/// How input rows are turned into instants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaderConfig {
    pub default_time_zone: Tz,

    /// Calendar day the wall-clock times of the input refer to. Today in the
    /// active zone when unset.
    pub reference_date: Option<NaiveDate>,
}

impl LoaderConfig {
    pub fn new(default_time_zone: Tz, reference_date: Option<NaiveDate>) -> Self {
        LoaderConfig { default_time_zone, reference_date }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig { default_time_zone: DEFAULT_TIME_ZONE, reference_date: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_limit_means_unlimited() {
        assert_eq!(Capacity::from_limit(0), Capacity::Unlimited);
        assert_eq!(Capacity::from_limit(-3), Capacity::Unlimited);
        assert_eq!(Capacity::from_limit(15), Capacity::Limited(15));
    }

    #[test]
    fn utilization_must_be_a_positive_fraction() {
        assert!(SchedulerConfig::new(1.0, Capacity::Unlimited).is_ok());
        assert!(SchedulerConfig::new(0.25, Capacity::Unlimited).is_ok());
        assert!(matches!(SchedulerConfig::new(0.0, Capacity::Unlimited), Err(Error::InvalidUtilization(_))));
        assert!(matches!(SchedulerConfig::new(1.2, Capacity::Unlimited), Err(Error::InvalidUtilization(_))));
        assert!(SchedulerConfig::new(f64::NAN, Capacity::Unlimited).is_err());
    }

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!("xml".parse::<OutputFormat>(), Err(Error::InvalidFormat(_))));
    }
}
