//! Renders a [`Schedule`] as text, JSON or CSV.

use crate::api::schedule_dto::prepare_schedule_data;
use crate::config::OutputFormat;
use crate::domain::schedule::Schedule;
use crate::error::Result;

pub mod csv_format;
pub mod json;
pub mod text;

pub fn format_schedule(schedule: &Schedule, format: OutputFormat) -> Result<String> {
    let hours = prepare_schedule_data(schedule);
    match format {
        OutputFormat::Text => Ok(text::format_text(&hours)),
        OutputFormat::Json => json::format_json(&hours),
        OutputFormat::Csv => csv_format::format_csv(&hours),
    }
}
