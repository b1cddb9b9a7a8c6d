use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::schedule::Schedule;
use crate::error::Result;

/// Priority whose satisfaction is tracked separately.
pub const HIGH_PRIORITY: u32 = 1;

/// Counters describing a finished schedule.
///
/// Everything except `records_processed` is derived from the [`Schedule`]
/// alone, so the numbers can always be recomputed from the plan itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScheduleStatistics {
    pub records_processed: usize,
    pub agents_demanded: i64,
    pub agents_allocated: i64,
    pub agents_unmet: i64,
    pub hours_with_unmet_demand: usize,

    /// Priority-1 entries that got everything they asked for.
    pub high_priority_fully_satisfied: usize,

    /// Priority-1 entries cut short by the capacity ceiling.
    pub high_priority_partially_satisfied: usize,

    /// Priority-1 entries that got no agents at all.
    pub high_priority_unsatisfied: usize,

    pub unmet_by_priority: BTreeMap<u32, i64>,
}

impl ScheduleStatistics {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut stats = ScheduleStatistics::default();

        for (hour, requirements) in schedule.hourly_requirements.iter().enumerate() {
            stats.agents_allocated += requirements.iter().map(|demand| demand.agents_needed).sum::<i64>();

            let high_priority_entries = requirements.iter().filter(|demand| demand.priority == HIGH_PRIORITY).count();
            let mut high_priority_partial = 0;

            if let Some(unmet) = schedule.unmet_demand(hour) {
                for client in unmet.impacted_clients.iter().filter(|client| client.priority == HIGH_PRIORITY) {
                    if client.allocated_agents > 0 {
                        high_priority_partial += 1;
                    } else {
                        stats.high_priority_unsatisfied += 1;
                    }
                }
            }

            stats.high_priority_partially_satisfied += high_priority_partial;
            stats.high_priority_fully_satisfied += high_priority_entries - high_priority_partial;
        }

        for unmet in &schedule.unmet_demands {
            stats.agents_unmet += unmet.unmet_agents;
            for client in &unmet.impacted_clients {
                *stats.unmet_by_priority.entry(client.priority).or_insert(0) += client.unmet_agents;
            }
        }

        stats.hours_with_unmet_demand = schedule.unmet_demands.len();
        stats.agents_demanded = stats.agents_allocated + stats.agents_unmet;

        stats
    }

    pub fn with_records_processed(mut self, records_processed: usize) -> Self {
        self.records_processed = records_processed;
        self
    }

    /// Flattens the counters into a single statistics row.
    pub fn to_event(&self) -> StatisticEvent {
        let unmet_by_priority =
            self.unmet_by_priority.iter().map(|(priority, unmet)| format!("{}={}", priority, unmet)).collect::<Vec<_>>().join("|");

        let mut event = StatisticEvent::new();
        event
            .set(StatParameter::RecordsProcessed, self.records_processed as i64)
            .set(StatParameter::AgentsDemanded, self.agents_demanded)
            .set(StatParameter::AgentsAllocated, self.agents_allocated)
            .set(StatParameter::AgentsUnmet, self.agents_unmet)
            .set(StatParameter::HoursWithUnmetDemand, self.hours_with_unmet_demand as i64)
            .set(StatParameter::HighPriorityFullySatisfied, self.high_priority_fully_satisfied as i64)
            .set(StatParameter::HighPriorityPartiallySatisfied, self.high_priority_partially_satisfied as i64)
            .set(StatParameter::HighPriorityUnsatisfied, self.high_priority_unsatisfied as i64)
            .set(StatParameter::UnmetByPriority, unmet_by_priority);
        event
    }
}

/// Columns of the statistics file, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatParameter {
    /// Unix time in seconds when the row was written.
    Time,
    RecordsProcessed,
    AgentsDemanded,
    AgentsAllocated,
    AgentsUnmet,
    HoursWithUnmetDemand,
    HighPriorityFullySatisfied,
    HighPriorityPartiallySatisfied,
    HighPriorityUnsatisfied,

    /// `priority=unmet` pairs joined by `|`.
    UnmetByPriority,
}

impl StatParameter {
    pub const ALL: [StatParameter; 10] = [
        StatParameter::Time,
        StatParameter::RecordsProcessed,
        StatParameter::AgentsDemanded,
        StatParameter::AgentsAllocated,
        StatParameter::AgentsUnmet,
        StatParameter::HoursWithUnmetDemand,
        StatParameter::HighPriorityFullySatisfied,
        StatParameter::HighPriorityPartiallySatisfied,
        StatParameter::HighPriorityUnsatisfied,
        StatParameter::UnmetByPriority,
    ];

    pub fn header(self) -> &'static str {
        match self {
            StatParameter::Time => "Time",
            StatParameter::RecordsProcessed => "RecordsProcessed",
            StatParameter::AgentsDemanded => "AgentsDemanded",
            StatParameter::AgentsAllocated => "AgentsAllocated",
            StatParameter::AgentsUnmet => "AgentsUnmet",
            StatParameter::HoursWithUnmetDemand => "HoursWithUnmetDemand",
            StatParameter::HighPriorityFullySatisfied => "HighPriorityFullySatisfied",
            StatParameter::HighPriorityPartiallySatisfied => "HighPriorityPartiallySatisfied",
            StatParameter::HighPriorityUnsatisfied => "HighPriorityUnsatisfied",
            StatParameter::UnmetByPriority => "UnmetByPriority",
        }
    }
}

/// Values are stored natively and only rendered when the row is written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Integer(i64),
    Text(String),
}

impl StatValue {
    fn render(&self) -> String {
        match self {
            StatValue::Integer(i) => i.to_string(),
            StatValue::Text(t) => t.clone(),
        }
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        StatValue::Integer(v)
    }
}

impl From<String> for StatValue {
    fn from(v: String) -> Self {
        StatValue::Text(v)
    }
}

impl From<&str> for StatValue {
    fn from(v: &str) -> Self {
        StatValue::Text(v.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticEvent {
    data: HashMap<StatParameter, StatValue>,
}

impl StatisticEvent {
    pub fn new() -> Self {
        Self { data: HashMap::new() }
    }

    pub fn set<V: Into<StatValue>>(&mut self, param: StatParameter, value: V) -> &mut Self {
        self.data.insert(param, value.into());
        self
    }

    pub fn get(&self, param: StatParameter) -> Option<&StatValue> {
        self.data.get(&param)
    }

    /// One cell per column; missing values become `NA`.
    pub fn row(&self) -> Vec<String> {
        StatParameter::ALL.iter().map(|param| self.data.get(param).map(StatValue::render).unwrap_or_else(|| "NA".to_string())).collect()
    }
}

/// Writes statistics rows as `;`-delimited CSV to a file, or stdout without one.
#[derive(Debug, Clone, Default)]
pub struct StatsWriter {
    path: Option<PathBuf>,
}

impl StatsWriter {
    pub fn new(path: Option<PathBuf>) -> Self {
        StatsWriter { path }
    }

    pub fn write(&self, event: &StatisticEvent) -> Result<()> {
        let writer: Box<dyn Write> = match &self.path {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout()),
        };
        write_event(writer, event)?;

        if let Some(path) = &self.path {
            log::info!("Statistics written to '{}'.", path.display());
        }
        Ok(())
    }
}

/// Writes the header and a single row for `event`, stamping `Time` if unset.
pub fn write_event<W: Write>(writer: W, event: &StatisticEvent) -> Result<()> {
    let mut event = event.clone();
    if event.get(StatParameter::Time).is_none() {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0);
        event.set(StatParameter::Time, now);
    }

    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    csv_wtr.write_record(StatParameter::ALL.iter().map(|param| param.header()))?;
    csv_wtr.write_record(event.row())?;
    csv_wtr.flush()?;

    Ok(())
}
