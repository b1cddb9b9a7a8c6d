use crate::domain::demand::HourlyDemand;
use crate::domain::utils::id::CustomerName;

/// Number of local-hour buckets in a schedule. Schedules cover a single day.
pub const HOURS_PER_DAY: usize = 24;

/// A customer that received fewer agents than requested in a constrained hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactedClient {
    pub name: CustomerName,
    pub requested_agents: i64,
    pub allocated_agents: i64,
    pub unmet_agents: i64,
    pub priority: u32,
}

/// Shortfall of a single hour whose demand exceeded the capacity ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmetDemand {
    pub hour: usize,
    pub total_demand: i64,
    pub allocated_agents: i64,
    pub unmet_agents: i64,

    /// In the order clients were impacted, which is priority order.
    pub impacted_clients: Vec<ImpactedClient>,
}

/// The final staffing plan: allocated demand per local hour plus the hours that
/// ran out of capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub hourly_requirements: [Vec<HourlyDemand>; HOURS_PER_DAY],
    pub unmet_demands: Vec<UnmetDemand>,
}

impl Schedule {
    pub fn new(hourly_requirements: [Vec<HourlyDemand>; HOURS_PER_DAY], unmet_demands: Vec<UnmetDemand>) -> Self {
        Schedule { hourly_requirements, unmet_demands }
    }

    pub fn requirements(&self, hour: usize) -> &[HourlyDemand] {
        &self.hourly_requirements[hour]
    }

    /// Sum of allocated agents in `hour`.
    pub fn total_agents(&self, hour: usize) -> i64 {
        self.hourly_requirements[hour].iter().map(|demand| demand.agents_needed).sum()
    }

    /// Allocated agents for `name` in `hour`, summing repeated entries.
    pub fn agents_for(&self, hour: usize, name: &str) -> i64 {
        self.hourly_requirements[hour].iter().filter(|demand| demand.name == name).map(|demand| demand.agents_needed).sum()
    }

    pub fn unmet_demand(&self, hour: usize) -> Option<&UnmetDemand> {
        self.unmet_demands.iter().find(|unmet| unmet.hour == hour)
    }
}
