//! Clock time and period parsing.

use regex::Regex;
use std::sync::LazyLock;

use super::error::ScheduleError;

static CLOCK_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})\s*([AaPp][Mm])$").unwrap());

/// Converts a 12-hour clock time such as `9:00AM` or `12:30PM` into
/// zero-padded 24-hour `HH:MM`.
///
/// # Arguments
/// * `time` - Hour, minute and an `AM`/`PM` marker, e.g. `"1:15PM"`
///
/// # Returns
/// * `Ok(String)` - The time in `HH:MM` form, e.g. `"13:15"`
/// * `Err` - If the marker is missing or the hour/minute is out of range
pub fn convert_to_24_hour(time: &str) -> Result<String, ScheduleError> {
    let caps = CLOCK_TIME_REGEX
        .captures(time.trim())
        .ok_or_else(|| ScheduleError::malformed_time(time, "expected H:MM followed by AM or PM"))?;

    let mut hours: u32 = caps[1]
        .parse()
        .map_err(|_| ScheduleError::malformed_time(time, "hour is not a number"))?;
    let minutes: u32 = caps[2]
        .parse()
        .map_err(|_| ScheduleError::malformed_time(time, "minute is not a number"))?;

    if !(1..=12).contains(&hours) {
        return Err(ScheduleError::malformed_time(time, "hour must be between 1 and 12"));
    }
    if minutes > 59 {
        return Err(ScheduleError::malformed_time(time, "minute must be below 60"));
    }

    let is_pm = caps[3].eq_ignore_ascii_case("PM");
    if is_pm && hours != 12 {
        hours += 12;
    } else if !is_pm && hours == 12 {
        hours = 0;
    }

    Ok(format!("{hours:02}:{minutes:02}"))
}

/// Extracts the start and end of a period string and converts both to
/// 24-hour time.
///
/// The period has the shape `<label> <start> - <end>`, so the start and end
/// are the second and fourth whitespace-separated tokens.
pub fn parse_period(period: &str) -> Result<(String, String), ScheduleError> {
    let tokens: Vec<&str> = period.split_whitespace().collect();
    let (Some(start), Some(end)) = (tokens.get(1), tokens.get(3)) else {
        return Err(ScheduleError::MalformedPeriod {
            input: period.to_string(),
        });
    };

    Ok((convert_to_24_hour(start)?, convert_to_24_hour(end)?))
}
