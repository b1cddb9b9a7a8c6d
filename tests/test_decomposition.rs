mod common;

use agent_scheduler::domain::aggregator::HourlyBuckets;
use agent_scheduler::domain::decomposer::decompose;
use agent_scheduler::error::Error;
use agent_scheduler::{DemandRecord, SchedulerConfig, generate_schedule};
use chrono_tz::America::{Los_Angeles, New_York};
use chrono_tz::Asia::Tokyo;
use chrono_tz::UTC;
use common::{assert_hour_totals, at, summer_record};

fn unconstrained() -> SchedulerConfig {
    SchedulerConfig::default()
}

#[test]
fn test_simple_same_day_utc() {
    let records = vec![summer_record("Cust1", UTC, 10, 12, 10, 1)];

    let schedule = generate_schedule(&records, &unconstrained()).unwrap();

    // 2 hours, 5 calls per hour of 3600s each.
    assert_hour_totals(&schedule, &[(10, 5), (11, 5)]);
    assert_eq!(schedule.agents_for(10, "Cust1"), 5);
    assert!(schedule.unmet_demands.is_empty());
}

#[test]
fn test_overnight_window_wraps_to_next_day() {
    let records = vec![summer_record("Cust2", Los_Angeles, 22, 2, 20, 1)];

    let schedule = generate_schedule(&records, &unconstrained()).unwrap();

    assert_hour_totals(&schedule, &[(22, 5), (23, 5), (0, 5), (1, 5)]);
}

#[test]
fn test_mixed_time_zones_label_by_home_zone() {
    let records = vec![summer_record("CustPST", Los_Angeles, 9, 11, 10, 1), summer_record("CustEST", New_York, 12, 14, 10, 1)];

    let schedule = generate_schedule(&records, &unconstrained()).unwrap();

    assert_hour_totals(&schedule, &[(9, 5), (10, 5), (12, 5), (13, 5)]);
    assert_eq!(schedule.agents_for(9, "CustPST"), 5);
    assert_eq!(schedule.agents_for(12, "CustEST"), 5);
}

#[test]
fn test_partial_hours_get_proportional_share() {
    let record = DemandRecord::new("PartialHourCustomer", 1800, at(New_York, 2024, 6, 12, 9, 30), at(New_York, 2024, 6, 12, 15, 45), 100, 1);

    let schedule = generate_schedule(&[record], &unconstrained()).unwrap();

    // 6.25 hours at 16 calls per hour, half an agent-hour per call.
    assert_hour_totals(&schedule, &[(9, 4), (10, 8), (11, 8), (12, 8), (13, 8), (14, 8), (15, 6)]);
}

#[test]
fn test_dst_spring_forward_skips_missing_hour() {
    // 2024-03-10 01:00 to 04:00 in New York is only 2 elapsed hours.
    let record = DemandRecord::new("SpringForwardTest", 3600, at(New_York, 2024, 3, 10, 1, 0), at(New_York, 2024, 3, 10, 4, 0), 6, 1);

    let schedule = generate_schedule(&[record], &unconstrained()).unwrap();

    assert_hour_totals(&schedule, &[(1, 3), (3, 3)]);
    assert!(schedule.requirements(2).is_empty());
}

#[test]
fn test_dst_fall_back_doubles_repeated_hour() {
    // 2024-11-03 00:00 to 03:00 in New York is 4 elapsed hours, 01:xx happens twice.
    let record = DemandRecord::new("FallBackTest", 3600, at(New_York, 2024, 11, 3, 0, 0), at(New_York, 2024, 11, 3, 3, 0), 12, 1);

    let schedule = generate_schedule(&[record], &unconstrained()).unwrap();

    assert_hour_totals(&schedule, &[(0, 3), (1, 6), (2, 3)]);

    // Both passes through 01:xx stay separate entries.
    let repeated = schedule.requirements(1);
    assert_eq!(repeated.len(), 2);
    assert!(repeated.iter().all(|demand| demand.agents_needed == 3));
}

#[test]
fn test_dst_partial_hours_across_spring_forward() {
    // 01:30 to 03:30 on spring-forward day is a single elapsed hour.
    let record = DemandRecord::new("PartialDSTTest", 1800, at(New_York, 2024, 3, 10, 1, 30), at(New_York, 2024, 3, 10, 3, 30), 10, 1);

    let schedule = generate_schedule(&[record], &unconstrained()).unwrap();

    assert_hour_totals(&schedule, &[(1, 3), (3, 3)]);
}

#[test]
fn test_home_zone_overrides_zone_of_instants() {
    // 14:00-15:00 UTC is 10:00-11:00 in New York during summer time.
    let record = summer_record("Remote", UTC, 14, 15, 4, 1).with_home_time_zone(Some(New_York));

    let schedule = generate_schedule(&[record], &unconstrained()).unwrap();

    assert_hour_totals(&schedule, &[(10, 4)]);
}

#[test]
fn test_missing_home_zone_uses_zone_of_start() {
    let record = summer_record("Tokyo", Tokyo, 9, 10, 2, 1).with_home_time_zone(None);

    let slots = decompose(&record, 1.0);

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].hour, 9);
    assert_eq!(slots[0].demand.home_time_zone, None);
}

#[test]
fn test_utilization_inflates_agents() {
    let records = vec![summer_record("UtilizationTest", UTC, 10, 11, 10, 1)];
    let config = SchedulerConfig::new(0.8, Default::default()).unwrap();

    let schedule = generate_schedule(&records, &config).unwrap();

    // ceil(10 / 0.8)
    assert_eq!(schedule.requirements(10)[0].agents_needed, 13);
}

#[test]
fn test_invalid_utilization_is_rejected() {
    let records = vec![summer_record("Cust", UTC, 10, 11, 10, 1)];

    for utilization in [0.0, -0.5, 1.5, f64::NAN] {
        let config = SchedulerConfig { utilization, ..Default::default() };
        assert!(matches!(generate_schedule(&records, &config), Err(Error::InvalidUtilization(_))), "utilization {} accepted", utilization);
    }
}

#[test]
fn test_zero_and_negative_calls_need_no_agents() {
    let records = vec![summer_record("Quiet", UTC, 8, 10, 0, 1), summer_record("Negative", UTC, 8, 9, -20, 2)];

    let schedule = generate_schedule(&records, &unconstrained()).unwrap();

    assert_hour_totals(&schedule, &[]);
    assert_eq!(schedule.requirements(8).len(), 2);
    assert_eq!(schedule.requirements(9).len(), 1);
}

#[test]
fn test_empty_window_contributes_nothing() {
    let start = at(UTC, 2024, 6, 12, 10, 0);
    let record = DemandRecord::new("Nothing", 300, start, start, 500, 1);

    let schedule = generate_schedule(&[record], &unconstrained()).unwrap();

    assert_hour_totals(&schedule, &[]);
}

#[test]
fn test_buckets_keep_emission_order() {
    let records = vec![summer_record("First", UTC, 10, 12, 2, 3), summer_record("Second", UTC, 11, 12, 1, 1)];

    let buckets = HourlyBuckets::from_records(&records, 1.0);

    let names: Vec<&str> = buckets.bucket(11).iter().map(|demand| demand.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(buckets.total_demand(10), 1);
    assert_eq!(buckets.total_demand(11), 2);
}
