#![allow(dead_code)]

use agent_scheduler::{DemandRecord, Schedule};
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

pub fn at(zone: Tz, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
    zone.with_ymd_and_hms(year, month, day, hour, minute, 0).earliest().expect("valid local time")
}

/// A record on 2024-06-12, a day without DST transitions in any zone used here.
pub fn summer_record(name: &str, zone: Tz, start_hour: u32, end_hour: u32, calls: i64, priority: u32) -> DemandRecord {
    DemandRecord::new(name, 3600, at(zone, 2024, 6, 12, start_hour, 0), at(zone, 2024, 6, 12, end_hour, 0), calls, priority)
}

/// Asserts the total of every hour: listed hours must match, all others must be empty.
pub fn assert_hour_totals(schedule: &Schedule, expected: &[(usize, i64)]) {
    for hour in 0..24 {
        let expected_total = expected.iter().find(|(h, _)| *h == hour).map(|(_, total)| *total).unwrap_or(0);
        assert_eq!(schedule.total_agents(hour), expected_total, "hour {} agents mismatch", hour);
    }
}
