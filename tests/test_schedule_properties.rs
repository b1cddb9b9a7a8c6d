mod common;

use agent_scheduler::{Capacity, DemandRecord, HOURS_PER_DAY, Schedule, SchedulerConfig, generate_schedule};
use chrono::TimeZone;
use chrono_tz::Tz;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ZONES: [Tz; 5] = [chrono_tz::UTC, chrono_tz::America::New_York, chrono_tz::America::Los_Angeles, chrono_tz::Asia::Tokyo, chrono_tz::Asia::Kolkata];

// A plain day, spring-forward and fall-back in the US zones.
const DAYS: [(i32, u32, u32); 3] = [(2024, 6, 12), (2024, 3, 10), (2024, 11, 3)];

fn random_records(rng: &mut StdRng, count: usize) -> Vec<DemandRecord> {
    let mut records = Vec::with_capacity(count);

    while records.len() < count {
        let zone = ZONES[rng.random_range(0..ZONES.len())];
        let (year, month, day) = DAYS[rng.random_range(0..DAYS.len())];

        let start = zone.with_ymd_and_hms(year, month, day, rng.random_range(0..24), [0, 15, 30, 45][rng.random_range(0..4)], 0).earliest();
        let end = zone.with_ymd_and_hms(year, month, day, rng.random_range(0..24), [0, 20, 40][rng.random_range(0..3)], 0).earliest();

        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };

        records.push(DemandRecord::new(
            format!("Customer{}", records.len()),
            rng.random_range(60..900),
            start,
            end,
            rng.random_range(0..2000),
            rng.random_range(1..5),
        ));
    }

    records
}

fn unconstrained_totals(schedule: &Schedule) -> Vec<i64> {
    (0..HOURS_PER_DAY).map(|hour| schedule.total_agents(hour)).collect()
}

#[test]
fn test_allocation_invariants_hold_for_random_input() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let count = rng.random_range(1..12);
        let records = random_records(&mut rng, count);
        let utilization = [1.0, 0.9, 0.75, 0.5][rng.random_range(0..4)];
        let limit = rng.random_range(1..150);

        let unconstrained = generate_schedule(&records, &SchedulerConfig::new(utilization, Capacity::Unlimited).unwrap()).unwrap();
        let constrained = generate_schedule(&records, &SchedulerConfig::new(utilization, Capacity::Limited(limit)).unwrap()).unwrap();
        let demand = unconstrained_totals(&unconstrained);

        for hour in 0..HOURS_PER_DAY {
            let allocated = constrained.total_agents(hour);
            let unmet = constrained.unmet_demand(hour);

            // Conservation.
            assert_eq!(allocated + unmet.map(|u| u.unmet_agents).unwrap_or(0), demand[hour], "hour {}", hour);

            // Capacity boundary.
            assert!(demand[hour] <= limit || allocated <= limit, "hour {} allocated {} over {}", hour, allocated, limit);

            match unmet {
                None => {
                    // Fast path leaves the hour untouched.
                    assert!(demand[hour] <= limit);
                    assert_eq!(constrained.requirements(hour), unconstrained.requirements(hour));
                }
                Some(unmet) => {
                    assert_eq!(unmet.hour, hour);
                    assert_eq!(unmet.total_demand, demand[hour]);
                    assert_eq!(unmet.allocated_agents, limit);
                    assert_eq!(unmet.unmet_agents, unmet.total_demand - unmet.allocated_agents);

                    for client in &unmet.impacted_clients {
                        assert_eq!(client.unmet_agents, client.requested_agents - client.allocated_agents);

                        // Priority monotonicity: nobody less urgent than a short client gets agents.
                        assert!(
                            constrained.requirements(hour).iter().all(|demand| demand.priority <= client.priority || demand.agents_needed == 0),
                            "hour {}: lower priority served while {} was short",
                            hour,
                            client.name
                        );
                    }

                    let priorities: Vec<u32> = unmet.impacted_clients.iter().map(|client| client.priority).collect();
                    assert!(priorities.windows(2).all(|pair| pair[0] <= pair[1]), "impacted clients out of priority order");
                }
            }
        }
    }
}

#[test]
fn test_generating_twice_gives_the_same_schedule() {
    let mut rng = StdRng::seed_from_u64(42);
    let records = random_records(&mut rng, 20);
    let config = SchedulerConfig::new(0.85, Capacity::Limited(60)).unwrap();

    let first = generate_schedule(&records, &config).unwrap();
    let second = generate_schedule(&records, &config).unwrap();

    assert_eq!(first, second);
}
