use crate::config::Capacity;
use crate::domain::demand::HourlyDemand;
use crate::domain::schedule::{ImpactedClient, UnmetDemand};

/// Result of rationing one hour's demand against the capacity ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allocation {
    pub allocated: Vec<HourlyDemand>,

    /// Present only when at least one client got less than requested. `hour`
    /// is left at 0 for the assembler to fill in.
    pub unmet: Option<UnmetDemand>,
}

/// Allocates one hour of demand under `capacity`.
///
/// When everything fits, or the limit is not positive (no ceiling, as in
/// [`Capacity::from_limit`]), the demand is returned untouched. Otherwise entries
/// are served in priority order (1 first) until capacity runs out: the entry
/// that crosses the limit gets what is left, later entries get nothing.
/// Entries with equal priority keep their incoming order.
pub fn allocate(demands: Vec<HourlyDemand>, capacity: Capacity) -> Allocation {
    if demands.is_empty() {
        return Allocation::default();
    }

    let total_demand: i64 = demands.iter().map(|demand| demand.agents_needed).sum();

    let capacity = match capacity {
        Capacity::Limited(limit) if limit > 0 && limit < total_demand => limit,
        _ => return Allocation { allocated: demands, unmet: None },
    };

    let mut demands = demands;
    // Stable, so ties keep aggregation order.
    demands.sort_by_key(|demand| demand.priority);

    let mut allocated = Vec::with_capacity(demands.len());
    let mut impacted_clients = Vec::new();
    let mut remaining = capacity;

    for demand in demands {
        if remaining >= demand.agents_needed {
            remaining -= demand.agents_needed;
            allocated.push(demand);
        } else if remaining > 0 {
            impacted_clients.push(ImpactedClient {
                name: demand.name.clone(),
                requested_agents: demand.agents_needed,
                allocated_agents: remaining,
                unmet_agents: demand.agents_needed - remaining,
                priority: demand.priority,
            });
            allocated.push(demand.with_agents(remaining));
            remaining = 0;
        } else {
            impacted_clients.push(ImpactedClient {
                name: demand.name,
                requested_agents: demand.agents_needed,
                allocated_agents: 0,
                unmet_agents: demand.agents_needed,
                priority: demand.priority,
            });
        }
    }

    if impacted_clients.is_empty() {
        return Allocation { allocated, unmet: None };
    }

    Allocation {
        allocated,
        unmet: Some(UnmetDemand {
            hour: 0,
            total_demand,
            allocated_agents: capacity,
            unmet_agents: total_demand - capacity,
            impacted_clients,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::utils::id::CustomerName;

    fn demand(name: &str, agents_needed: i64, priority: u32) -> HourlyDemand {
        HourlyDemand { name: CustomerName::new(name), agents_needed, home_time_zone: None, priority }
    }

    #[test]
    fn empty_hour_allocates_nothing() {
        let allocation = allocate(Vec::new(), Capacity::Limited(5));

        assert!(allocation.allocated.is_empty());
        assert!(allocation.unmet.is_none());
    }

    #[test]
    fn fitting_demand_is_returned_unchanged() {
        let demands = vec![demand("B", 4, 2), demand("A", 3, 1)];
        let allocation = allocate(demands.clone(), Capacity::Limited(7));

        assert_eq!(allocation.allocated, demands);
        assert!(allocation.unmet.is_none());
    }

    #[test]
    fn unlimited_capacity_never_rations() {
        let demands = vec![demand("A", 1000, 3)];
        let allocation = allocate(demands.clone(), Capacity::Unlimited);

        assert_eq!(allocation.allocated, demands);
        assert!(allocation.unmet.is_none());
    }

    #[test]
    fn non_positive_limit_is_no_ceiling() {
        let demands = vec![demand("A", 4, 1), demand("B", 2, 2)];

        for limit in [0, -3] {
            let allocation = allocate(demands.clone(), Capacity::Limited(limit));

            assert_eq!(allocation.allocated, demands);
            assert!(allocation.unmet.is_none());
            assert_eq!(allocation.allocated.iter().map(|d| d.agents_needed).sum::<i64>(), 6);
        }
    }

    #[test]
    fn exhausted_capacity_denies_lower_priorities() {
        let demands = vec![demand("Low", 4, 3), demand("High", 6, 1), demand("Mid", 5, 2)];
        let allocation = allocate(demands, Capacity::Limited(8));

        assert_eq!(allocation.allocated, vec![demand("High", 6, 1), demand("Mid", 2, 2)]);

        let unmet = allocation.unmet.expect("capacity was exceeded");
        assert_eq!(unmet.total_demand, 15);
        assert_eq!(unmet.allocated_agents, 8);
        assert_eq!(unmet.unmet_agents, 7);

        let impacted: Vec<(&str, i64, i64, i64)> = unmet
            .impacted_clients
            .iter()
            .map(|client| (client.name.as_str(), client.requested_agents, client.allocated_agents, client.unmet_agents))
            .collect();
        assert_eq!(impacted, vec![("Mid", 5, 2, 3), ("Low", 4, 0, 4)]);
    }

    #[test]
    fn equal_priorities_are_served_in_incoming_order() {
        let demands = vec![demand("Zulu", 3, 1), demand("Alpha", 3, 1)];
        let allocation = allocate(demands, Capacity::Limited(4));

        assert_eq!(allocation.allocated, vec![demand("Zulu", 3, 1), demand("Alpha", 1, 1)]);
        let unmet = allocation.unmet.expect("capacity was exceeded");
        assert_eq!(unmet.impacted_clients[0].name, "Alpha");
    }
}
