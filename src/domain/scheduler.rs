use crate::config::{Capacity, SchedulerConfig};
use crate::domain::aggregator::HourlyBuckets;
use crate::domain::allocator::allocate;
use crate::domain::decomposer::decompose;
use crate::domain::demand::DemandRecord;
use crate::domain::observer::{NoopObserver, ScheduleObserver};
use crate::domain::schedule::Schedule;
use crate::error::Result;

/// Builds the hour-by-hour staffing plan for `records`.
///
/// Fails only when the utilization is outside (0, 1].
pub fn generate_schedule(records: &[DemandRecord], config: &SchedulerConfig) -> Result<Schedule> {
    generate_schedule_with_observer(records, config, &mut NoopObserver)
}

/// Same as [`generate_schedule`], reporting skipped records and every
/// allocated hour to `observer`.
pub fn generate_schedule_with_observer(
    records: &[DemandRecord],
    config: &SchedulerConfig,
    observer: &mut dyn ScheduleObserver,
) -> Result<Schedule> {
    config.validate()?;

    log::info!("Generating schedule for {} demand records (utilization {}, capacity {:?}).", records.len(), config.utilization, config.capacity);

    let mut buckets = HourlyBuckets::new();
    for record in records {
        let slots = decompose(record, config.utilization);
        if slots.is_empty() {
            observer.record_skipped(record);
        }
        buckets.extend(slots);
    }

    let mut hourly_requirements = buckets.into_buckets();
    let mut unmet_demands = Vec::new();

    if let Capacity::Limited(limit) = config.capacity {
        if limit > 0 {
            for (hour, requirements) in hourly_requirements.iter_mut().enumerate() {
                let allocation = allocate(std::mem::take(requirements), config.capacity);
                *requirements = allocation.allocated;

                let unmet = allocation.unmet.map(|mut unmet| {
                    unmet.hour = hour;
                    unmet
                });
                observer.hour_allocated(hour, requirements, unmet.as_ref());

                if let Some(unmet) = unmet {
                    log::debug!("Hour {:02}: demand {} exceeds capacity {} by {}.", hour, unmet.total_demand, limit, unmet.unmet_agents);
                    unmet_demands.push(unmet);
                }
            }
        }
    }

    let schedule = Schedule::new(hourly_requirements, unmet_demands);
    observer.schedule_completed(records.len(), &schedule);

    log::info!("Schedule generated with {} hours exceeding capacity.", schedule.unmet_demands.len());

    Ok(schedule)
}
