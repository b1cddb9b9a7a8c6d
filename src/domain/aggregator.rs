use crate::domain::decomposer::{HourSlot, decompose};
use crate::domain::demand::{DemandRecord, HourlyDemand};
use crate::domain::schedule::HOURS_PER_DAY;

/// Unconstrained demand of every record, grouped by local hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyBuckets {
    buckets: [Vec<HourlyDemand>; HOURS_PER_DAY],
}

impl HourlyBuckets {
    pub fn new() -> Self {
        HourlyBuckets { buckets: std::array::from_fn(|_| Vec::new()) }
    }

    /// Decomposes every record and files its slots in emission order.
    pub fn from_records(records: &[DemandRecord], utilization: f64) -> Self {
        let mut buckets = HourlyBuckets::new();
        for record in records {
            buckets.extend(decompose(record, utilization));
        }
        buckets
    }

    pub fn push(&mut self, slot: HourSlot) {
        self.buckets[slot.hour % HOURS_PER_DAY].push(slot.demand);
    }

    pub fn extend(&mut self, slots: impl IntoIterator<Item = HourSlot>) {
        for slot in slots {
            self.push(slot);
        }
    }

    pub fn bucket(&self, hour: usize) -> &[HourlyDemand] {
        &self.buckets[hour]
    }

    pub fn total_demand(&self, hour: usize) -> i64 {
        self.buckets[hour].iter().map(|demand| demand.agents_needed).sum()
    }

    pub fn into_buckets(self) -> [Vec<HourlyDemand>; HOURS_PER_DAY] {
        self.buckets
    }
}

impl Default for HourlyBuckets {
    fn default() -> Self {
        Self::new()
    }
}
