use chrono::{DateTime, TimeDelta, Timelike};
use chrono_tz::Tz;

use crate::domain::demand::{DemandRecord, HourlyDemand};

const SECONDS_PER_HOUR: f64 = 3600.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Slack below a whole number that still counts as that number when rounding
/// agents up. Proportional call shares pick up errors around 1e-15.
const ROUNDING_TOLERANCE: f64 = 1e-9;

/// Demand of one elapsed-hour step, labelled with the local clock hour it starts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourSlot {
    pub hour: usize,
    pub demand: HourlyDemand,
}

/// Splits a call window into per-local-hour agent demands.
///
/// Calls are spread evenly over the elapsed duration of the window. The window
/// is walked one real hour at a time from the local hour containing the start
/// to the local hour containing the end, and each step receives the share of
/// calls it overlaps. Steps are labelled by the clock hour of their start
/// instant in the record's home zone, so a repeated hour (DST fall-back) is
/// emitted twice and a skipped hour (DST spring-forward) never appears.
///
/// An end before the start means the window runs into the next day. Windows
/// with no positive duration produce nothing.
///
/// `utilization` must be in (0, 1]; the assembler checks this before calling.
pub fn decompose(record: &DemandRecord, utilization: f64) -> Vec<HourSlot> {
    debug_assert!(utilization > 0.0 && utilization <= 1.0, "utilization must be validated by the caller");

    let start = record.start_time;
    let mut end = record.end_time;

    if end < start {
        end = end + TimeDelta::hours(24);
    }

    let duration_hours = elapsed_hours(end - start);
    if duration_hours <= 0.0 {
        log::debug!("Skipping demand of {} with empty window {} - {}.", record.customer_name, start, end);
        return Vec::new();
    }

    let calls_per_hour = record.number_of_calls as f64 / duration_hours;
    let label_zone = record.home_time_zone.unwrap_or_else(|| start.timezone());

    let window_start = floor_to_local_hour(start);
    let mut window_end = floor_to_local_hour(end);
    if end > window_end {
        window_end = window_end + TimeDelta::hours(1);
    }

    let mut slots = Vec::new();
    let mut hour_start = window_start;

    while hour_start < window_end {
        let hour_end = hour_start + TimeDelta::hours(1);

        let overlap_start = if start > hour_start { start } else { hour_start };
        let overlap_end = if end < hour_end { end } else { hour_end };
        let overlap_hours = elapsed_hours(overlap_end - overlap_start);

        if overlap_hours > 0.0 {
            let calls_this_hour = calls_per_hour * overlap_hours;
            let agents_needed = agents_needed(calls_this_hour, record.average_call_duration_seconds, utilization);

            slots.push(HourSlot {
                hour: hour_start.with_timezone(&label_zone).hour() as usize,
                demand: HourlyDemand {
                    name: record.customer_name.clone(),
                    agents_needed,
                    home_time_zone: record.home_time_zone,
                    priority: record.priority,
                },
            });
        }

        hour_start = hour_end;
    }

    log::trace!("Decomposed demand of {} into {} hourly slots.", record.customer_name, slots.len());

    slots
}

/// Agents required to handle `calls` of `average_call_duration_seconds` each
/// within one hour, inflated by the utilization target.
///
/// Both rounding steps ignore floating-point residue within
/// a billionth of a whole number, so an exact share of 15 agents
/// computed as 15.000000000000002 stays 15.
pub fn agents_needed(calls: f64, average_call_duration_seconds: i64, utilization: f64) -> i64 {
    let raw_agents = ceil_with_tolerance(calls.max(0.0) * average_call_duration_seconds as f64 / SECONDS_PER_HOUR);
    ceil_with_tolerance(raw_agents / utilization).max(0.0) as i64
}

fn ceil_with_tolerance(value: f64) -> f64 {
    (value - ROUNDING_TOLERANCE).ceil()
}

/// Start of the local clock hour containing `instant`, found by stepping back
/// the elapsed minutes and seconds rather than rebuilding a wall-clock time,
/// which would be ambiguous inside a repeated hour.
fn floor_to_local_hour(instant: DateTime<Tz>) -> DateTime<Tz> {
    let into_hour = TimeDelta::seconds(i64::from(instant.minute()) * 60 + i64::from(instant.second()))
        + TimeDelta::nanoseconds(i64::from(instant.nanosecond() % 1_000_000_000));
    instant - into_hour
}

fn elapsed_hours(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / MILLIS_PER_HOUR
}
