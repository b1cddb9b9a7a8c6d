use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::schedule::{HOURS_PER_DAY, ImpactedClient, Schedule, UnmetDemand};

/// Label for demand without a home zone.
pub const NO_ZONE_LABEL: &str = "UTC";

/// One hour of the schedule as rendered by every output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyDataDto {
    pub hour: usize,
    pub total: i64,

    #[serde(rename = "locations", skip_serializing_if = "BTreeMap::is_empty")]
    pub location_data: BTreeMap<String, LocationGroupDto>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmet_demand: Option<UnmetDemandDto>,
}

/// Allocated agents of one time zone within an hour.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LocationGroupDto {
    pub total: i64,
    pub customers: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmetDemandDto {
    pub total_demand: i64,
    pub allocated_agents: i64,
    pub unmet_agents: i64,
    pub impacted_clients: Vec<ImpactedClientDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactedClientDto {
    pub name: String,
    pub requested_agents: i64,
    pub allocated_agents: i64,
    pub unmet_agents: i64,
    pub priority: u32,
}

impl From<&ImpactedClient> for ImpactedClientDto {
    fn from(client: &ImpactedClient) -> Self {
        ImpactedClientDto {
            name: client.name.to_string(),
            requested_agents: client.requested_agents,
            allocated_agents: client.allocated_agents,
            unmet_agents: client.unmet_agents,
            priority: client.priority,
        }
    }
}

impl From<&UnmetDemand> for UnmetDemandDto {
    fn from(unmet: &UnmetDemand) -> Self {
        UnmetDemandDto {
            total_demand: unmet.total_demand,
            allocated_agents: unmet.allocated_agents,
            unmet_agents: unmet.unmet_agents,
            impacted_clients: unmet.impacted_clients.iter().map(ImpactedClientDto::from).collect(),
        }
    }
}

/// Groups every hour of `schedule` by time zone and customer. Repeated entries
/// of a customer within an hour are summed.
pub fn prepare_schedule_data(schedule: &Schedule) -> Vec<HourlyDataDto> {
    (0..HOURS_PER_DAY).map(|hour| prepare_hour(schedule, hour)).collect()
}

fn prepare_hour(schedule: &Schedule, hour: usize) -> HourlyDataDto {
    let mut data = HourlyDataDto { hour, total: 0, location_data: BTreeMap::new(), unmet_demand: None };

    for demand in schedule.requirements(hour) {
        let location = demand.home_time_zone.map(|zone| zone.name().to_string()).unwrap_or_else(|| NO_ZONE_LABEL.to_string());

        let group = data.location_data.entry(location).or_default();
        *group.customers.entry(demand.name.to_string()).or_insert(0) += demand.agents_needed;
        group.total += demand.agents_needed;
        data.total += demand.agents_needed;
    }

    data.unmet_demand = schedule.unmet_demand(hour).map(UnmetDemandDto::from);

    data
}
