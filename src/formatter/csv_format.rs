use crate::api::schedule_dto::HourlyDataDto;
use crate::error::Result;

pub const CSV_HEADER: [&str; 9] =
    ["Hour", "Total Agents", "Locations", "Customer Details", "Capacity Warning", "Total Demand", "Allocated", "Unmet", "Impacted Clients"];

/// One row per hour. Customer details read `Name(zone,agents=n)`, impacted
/// clients `Name(priority=p,requested=r,allocated=a,unmet=u)`, both joined by `; `.
pub fn format_csv(hours: &[HourlyDataDto]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for hour in hours {
        writer.write_record(hour_row(hour))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn hour_row(hour: &HourlyDataDto) -> Vec<String> {
    let hour_label = format!("{:02}:00", hour.hour);

    if hour.total == 0 {
        return vec![hour_label, "0".to_string(), String::new(), String::new(), "No".to_string(), String::new(), String::new(), String::new(), String::new()];
    }

    let locations = hour.location_data.keys().cloned().collect::<Vec<_>>().join("; ");
    let customer_details = hour
        .location_data
        .iter()
        .flat_map(|(location, group)| group.customers.iter().map(move |(customer, agents)| format!("{}({},agents={})", customer, location, agents)))
        .collect::<Vec<_>>()
        .join("; ");

    let mut row = vec![hour_label, hour.total.to_string(), locations, customer_details];

    match &hour.unmet_demand {
        Some(unmet) => {
            let impacted = unmet
                .impacted_clients
                .iter()
                .map(|client| {
                    format!(
                        "{}(priority={},requested={},allocated={},unmet={})",
                        client.name, client.priority, client.requested_agents, client.allocated_agents, client.unmet_agents
                    )
                })
                .collect::<Vec<_>>()
                .join("; ");
            row.extend(["Yes".to_string(), unmet.total_demand.to_string(), unmet.allocated_agents.to_string(), unmet.unmet_agents.to_string(), impacted]);
        }
        None => row.extend(["No".to_string(), String::new(), String::new(), String::new(), String::new()]),
    }

    row
}
