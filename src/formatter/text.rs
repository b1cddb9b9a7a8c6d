use crate::api::schedule_dto::HourlyDataDto;

/// One line per hour, followed by a capacity warning for hours that ran short.
pub fn format_text(hours: &[HourlyDataDto]) -> String {
    let mut out = String::new();

    for hour in hours {
        out.push_str(&format_text_line(hour));
        out.push('\n');

        if let Some(unmet) = &hour.unmet_demand {
            out.push_str(&format!(
                "  ⚠️  CAPACITY WARNING: Demand={}, Allocated={}, Unmet={}\n",
                unmet.total_demand, unmet.allocated_agents, unmet.unmet_agents
            ));
            out.push_str("  Impacted clients:\n");
            for client in &unmet.impacted_clients {
                out.push_str(&format!(
                    "    • {} [Priority {}]: Requested={}, Allocated={}, Unmet={}\n",
                    client.name, client.priority, client.requested_agents, client.allocated_agents, client.unmet_agents
                ));
            }
        }
    }

    out
}

fn format_text_line(hour: &HourlyDataDto) -> String {
    if hour.total == 0 {
        return format!("{:02}:00 : total=0 ; none", hour.hour);
    }

    let parts: Vec<String> = hour
        .location_data
        .iter()
        .map(|(location, group)| {
            let mut location_parts = vec![format!("total={}", group.total)];
            location_parts.extend(group.customers.iter().map(|(customer, agents)| format!("{}={}", customer, agents)));
            format!("{}: {}", location, location_parts.join(", "))
        })
        .collect();

    format!("{:02}:00 : total={} ; [{}]", hour.hour, hour.total, parts.join(", "))
}
