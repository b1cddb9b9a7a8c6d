//! Turns forecasted call-volume windows into an hour-by-hour agent staffing
//! plan, then rations agents by priority when a per-hour capacity ceiling is
//! set.
//!
//! The pipeline is: [`loader`] reads demand records, [`domain::decomposer`]
//! splits each window into local-hour slots, [`domain::aggregator`] groups them
//! into 24 buckets, [`domain::allocator`] applies the capacity ceiling per hour,
//! and [`formatter`] renders the resulting [`Schedule`].

use std::path::Path;

use crate::api::config_dto::RunConfig;
use crate::domain::observer::ScheduleObserver;
use crate::error::Result;
use crate::loader::csv_parser::parse_demand_file;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod loader;
pub mod logger;

pub use crate::config::{Capacity, LoaderConfig, OutputFormat, SchedulerConfig};
pub use crate::domain::demand::{DemandRecord, HourlyDemand};
pub use crate::domain::schedule::{HOURS_PER_DAY, ImpactedClient, Schedule, UnmetDemand};
pub use crate::domain::scheduler::{generate_schedule, generate_schedule_with_observer};

/// Loads the demand file at `file_path` and schedules it with `config`.
pub fn generate_schedule_from_file(file_path: impl AsRef<Path>, config: &RunConfig, observer: &mut dyn ScheduleObserver) -> Result<Schedule> {
    let records = parse_demand_file(file_path, &config.loader)?;
    log::info!("Demand file parsed successfully.");

    generate_schedule_with_observer(&records, &config.scheduler, observer)
}
