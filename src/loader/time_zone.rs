use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Resolves a zone code used in input headers: `PT`, `ET`, `CT`, `MT`, `UTC`,
/// or any IANA name such as `Asia/Tokyo`.
pub fn resolve_zone_code(code: &str) -> Option<Tz> {
    match code.trim() {
        "PT" => Some(chrono_tz::America::Los_Angeles),
        "ET" => Some(chrono_tz::America::New_York),
        "CT" => Some(chrono_tz::America::Chicago),
        "MT" => Some(chrono_tz::America::Denver),
        "UTC" => Some(chrono_tz::UTC),
        "" => None,
        name => name.parse::<Tz>().ok(),
    }
}

/// Like [`resolve_zone_code`], but an unknown zone is an error.
pub fn parse_time_zone(code: &str) -> Result<Tz> {
    resolve_zone_code(code).ok_or_else(|| Error::UnknownTimeZone(code.to_string()))
}
