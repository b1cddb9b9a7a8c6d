use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::LoaderConfig;
use crate::domain::demand::DemandRecord;
use crate::error::{Error, ParseErrorKind, Result};
use crate::loader::time_zone::resolve_zone_code;

const FIELDS_PER_RECORD: usize = 6;
const ZONE_HEADER_PREFIX: &str = "StartTime";

/// Reads demand records from a CSV file. See [`parse_demand_records`].
pub fn parse_demand_file(file_path: impl AsRef<Path>, config: &LoaderConfig) -> Result<Vec<DemandRecord>> {
    let file_path = file_path.as_ref();
    log::info!("Loading demand records from '{}'...", file_path.display());
    let file = File::open(file_path)?;
    parse_demand_records(file, config)
}

/// Reads demand records of the form
/// `CustomerName, AverageCallSeconds, Start, End, NumberOfCalls, Priority`.
///
/// Rows whose first field starts with `#` are comments. A comment whose third
/// field reads `StartTime<ZONE>` (e.g. `StartTimeET`, `StartTimeAsia/Tokyo`)
/// switches the zone of every following row; unknown zones fall back to the
/// configured default. Times are 12-hour clock values such as `9AM` or
/// `7:30PM` on the reference date.
pub fn parse_demand_records<R: Read>(reader: R, config: &LoaderConfig) -> Result<Vec<DemandRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).trim(csv::Trim::All).from_reader(reader);

    let mut zone = config.default_time_zone;
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map(|position| position.line()).unwrap_or(0);

        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        if row.get(0).is_some_and(|field| field.starts_with('#')) {
            if let Some(header_zone) = zone_from_header(&row, config.default_time_zone) {
                log::debug!("Line {}: switching time zone to {}.", line, header_zone.name());
                zone = header_zone;
            }
            continue;
        }

        records.push(parse_row(&row, line, zone, config.reference_date)?);
    }

    log::info!("Parsed {} demand records.", records.len());

    Ok(records)
}

fn zone_from_header(row: &StringRecord, fallback: Tz) -> Option<Tz> {
    if row.len() < 4 {
        return None;
    }
    let code = row.get(2)?.strip_prefix(ZONE_HEADER_PREFIX)?;

    match resolve_zone_code(code) {
        Some(zone) => Some(zone),
        None => {
            log::warn!("Unknown time zone '{}' in header, falling back to {}.", code, fallback.name());
            Some(fallback)
        }
    }
}

fn parse_row(row: &StringRecord, line: u64, zone: Tz, reference_date: Option<NaiveDate>) -> Result<DemandRecord> {
    let fail = |kind: ParseErrorKind| Error::ParseError { line, record: row.iter().map(str::to_string).collect(), kind };

    if row.len() != FIELDS_PER_RECORD {
        return Err(fail(ParseErrorKind::InvalidFieldCount(row.len())));
    }

    let customer_name = &row[0];
    if customer_name.is_empty() {
        return Err(fail(ParseErrorKind::EmptyCustomerName));
    }

    let average_call_duration_seconds = match row[1].parse::<i64>() {
        Ok(seconds) if seconds > 0 => seconds,
        Ok(seconds) => return Err(fail(ParseErrorKind::InvalidDuration(format!("{} is not positive", seconds)))),
        Err(e) => return Err(fail(ParseErrorKind::InvalidDuration(format!("'{}': {}", &row[1], e)))),
    };

    let date = reference_date.unwrap_or_else(|| Utc::now().with_timezone(&zone).date_naive());

    let start_time = parse_clock_time(&row[2])
        .and_then(|time| localize(zone, date, time))
        .ok_or_else(|| fail(ParseErrorKind::InvalidStartTime(row[2].to_string())))?;

    let end_time = parse_clock_time(&row[3])
        .and_then(|time| localize(zone, date, time))
        .ok_or_else(|| fail(ParseErrorKind::InvalidEndTime(row[3].to_string())))?;

    let number_of_calls = match row[4].parse::<i64>() {
        Ok(calls) if calls >= 0 => calls,
        Ok(calls) => return Err(fail(ParseErrorKind::InvalidNumberOfCalls(format!("{} is negative", calls)))),
        Err(e) => return Err(fail(ParseErrorKind::InvalidNumberOfCalls(format!("'{}': {}", &row[4], e)))),
    };

    let priority = match row[5].parse::<u32>() {
        Ok(priority) if priority >= 1 => priority,
        Ok(priority) => return Err(fail(ParseErrorKind::InvalidPriority(format!("{} is below 1", priority)))),
        Err(e) => return Err(fail(ParseErrorKind::InvalidPriority(format!("'{}': {}", &row[5], e)))),
    };

    Ok(DemandRecord::new(customer_name, average_call_duration_seconds, start_time, end_time, number_of_calls, priority)
        .with_home_time_zone(Some(zone)))
}

/// Parses `3PM`, `3:04PM` or `03:04 pm`.
fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let upper = value.trim().to_ascii_uppercase();
    let (clock, meridiem) = if let Some(clock) = upper.strip_suffix("AM") {
        (clock, "AM")
    } else if let Some(clock) = upper.strip_suffix("PM") {
        (clock, "PM")
    } else {
        return None;
    };

    let clock = clock.trim();
    let clock = if clock.contains(':') { clock.to_string() } else { format!("{}:00", clock) };

    NaiveTime::parse_from_str(&format!("{}{}", clock, meridiem), "%I:%M%p").ok()
}

/// Places a wall-clock time on `date` in `zone`. A time inside a DST gap is
/// moved forward by one hour, an ambiguous one takes the earlier instant.
fn localize(zone: Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    let naive = date.and_time(time);
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => zone.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest(),
    }
}
