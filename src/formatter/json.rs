use crate::api::schedule_dto::HourlyDataDto;
use crate::error::Result;

/// Pretty-printed array of all 24 hours.
pub fn format_json(hours: &[HourlyDataDto]) -> Result<String> {
    Ok(serde_json::to_string_pretty(hours)?)
}
