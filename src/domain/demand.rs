use chrono::DateTime;
use chrono_tz::Tz;

use crate::domain::utils::id::CustomerName;

/// One forecasted call window for a customer, as produced by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandRecord {
    pub customer_name: CustomerName,

    /// Average handle time of a single call in seconds.
    pub average_call_duration_seconds: i64,

    pub start_time: DateTime<Tz>,

    /// May lie before `start_time`, in which case the window ends on the next day.
    pub end_time: DateTime<Tz>,

    /// Zone used to label hour buckets. Without one, the zone of `start_time` is used.
    pub home_time_zone: Option<Tz>,

    pub number_of_calls: i64,

    /// 1 is the most urgent.
    pub priority: u32,
}

impl DemandRecord {
    pub fn new(
        customer_name: impl Into<String>,
        average_call_duration_seconds: i64,
        start_time: DateTime<Tz>,
        end_time: DateTime<Tz>,
        number_of_calls: i64,
        priority: u32,
    ) -> Self {
        let home_time_zone = Some(start_time.timezone());
        DemandRecord {
            customer_name: CustomerName::new(customer_name),
            average_call_duration_seconds,
            start_time,
            end_time,
            home_time_zone,
            number_of_calls,
            priority,
        }
    }

    pub fn with_home_time_zone(mut self, home_time_zone: Option<Tz>) -> Self {
        self.home_time_zone = home_time_zone;
        self
    }
}

/// Agents a customer needs within one local hour.
///
/// A customer may own several entries in the same hour when a wall-clock hour
/// repeats (DST fall-back). They are kept apart and add up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyDemand {
    pub name: CustomerName,
    pub agents_needed: i64,
    pub home_time_zone: Option<Tz>,
    pub priority: u32,
}

impl HourlyDemand {
    /// Copy of this demand with a different agent count, used for partial allocations.
    pub fn with_agents(&self, agents_needed: i64) -> Self {
        HourlyDemand { agents_needed, ..self.clone() }
    }
}
