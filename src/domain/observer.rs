use crate::domain::demand::{DemandRecord, HourlyDemand};
use crate::domain::schedule::{Schedule, UnmetDemand};
use crate::domain::statistics::ScheduleStatistics;

/// Target of the structured analytics events.
pub const ANALYTICS_TARGET: &str = "agent_scheduler::analytics";

/// Receives progress of a scheduling run. All callbacks default to no-ops.
pub trait ScheduleObserver {
    /// `record` covered no positive duration and contributed no demand.
    fn record_skipped(&mut self, _record: &DemandRecord) {}

    /// `hour` went through the capacity allocator.
    fn hour_allocated(&mut self, _hour: usize, _allocated: &[HourlyDemand], _unmet: Option<&UnmetDemand>) {}

    fn schedule_completed(&mut self, _records_processed: usize, _schedule: &Schedule) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScheduleObserver for NoopObserver {}

/// Emits `tracing` events for skipped records and constrained hours, and keeps
/// the statistics of the last completed schedule.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsObserver {
    pub skipped_records: usize,
    pub statistics: Option<ScheduleStatistics>,
}

impl AnalyticsObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleObserver for AnalyticsObserver {
    fn record_skipped(&mut self, record: &DemandRecord) {
        self.skipped_records += 1;
        tracing::warn!(
            target: ANALYTICS_TARGET,
            Customer = %record.customer_name,
            StartTime = %record.start_time,
            EndTime = %record.end_time,
            "Demand record has no positive duration and was skipped"
        );
    }

    fn hour_allocated(&mut self, hour: usize, allocated: &[HourlyDemand], unmet: Option<&UnmetDemand>) {
        let Some(unmet) = unmet else {
            tracing::debug!(target: ANALYTICS_TARGET, Hour = hour, Entries = allocated.len(), "Hour fully staffed");
            return;
        };

        tracing::warn!(
            target: ANALYTICS_TARGET,
            Hour = hour,
            TotalDemand = unmet.total_demand,
            AllocatedAgents = unmet.allocated_agents,
            UnmetAgents = unmet.unmet_agents,
            ImpactedClients = unmet.impacted_clients.len(),
            "Capacity exceeded"
        );
    }

    fn schedule_completed(&mut self, records_processed: usize, schedule: &Schedule) {
        let statistics = ScheduleStatistics::from_schedule(schedule).with_records_processed(records_processed);

        tracing::info!(
            target: ANALYTICS_TARGET,
            RecordsProcessed = statistics.records_processed,
            SkippedRecords = self.skipped_records,
            AgentsDemanded = statistics.agents_demanded,
            AgentsAllocated = statistics.agents_allocated,
            AgentsUnmet = statistics.agents_unmet,
            HoursWithUnmetDemand = statistics.hours_with_unmet_demand,
            HighPriorityFullySatisfied = statistics.high_priority_fully_satisfied,
            HighPriorityPartiallySatisfied = statistics.high_priority_partially_satisfied,
            HighPriorityUnsatisfied = statistics.high_priority_unsatisfied,
            "Schedule completed"
        );

        self.statistics = Some(statistics);
    }
}
