//! Selection of the course meetings that are in session at a given moment.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::error::ScheduleError;
use super::time::parse_period;
use super::types::{CourseRecord, CurrentMoment, MatchedCourse};

// Day, month and an optional four-digit year, e.g. "15/03" or "15/03/2025"
static MEETING_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})(?:/(\d{4}))?").unwrap());

/// Returns one [`MatchedCourse`] for every meeting in `records` whose window
/// contains `now`.
///
/// A meeting date token is considered to be today when it textually contains
/// `now`'s `DD/MM`. The window is taken from the record's first period, with
/// the start inclusive and the end exclusive.
///
/// Records without meeting dates or periods never match. Meetings whose
/// period or date cannot be parsed are logged and skipped.
///
/// Output order follows the records, then the meeting date tokens within
/// each record.
pub fn match_course(records: &[CourseRecord], now: &CurrentMoment) -> Vec<MatchedCourse> {
    let mut selected = Vec::new();

    for record in records {
        for token in record.meeting_date_tokens() {
            if !token.contains(now.day_month()) {
                continue;
            }

            match match_meeting(record, token, now) {
                Ok(Some(course)) => selected.push(course),
                Ok(None) => {}
                Err(e) => warn!(
                    "Skipping meeting {:?} of {:?} ({}): {}",
                    token, record.title, record.class_code, e
                ),
            }
        }
    }

    selected
}

/// Checks a single meeting date token, already known to be today, against
/// `now`.
fn match_meeting(
    record: &CourseRecord,
    token: &str,
    now: &CurrentMoment,
) -> Result<Option<MatchedCourse>, ScheduleError> {
    let Some(period) = record.first_period() else {
        return Ok(None);
    };

    let (start, end) = parse_period(period)?;
    let date = meeting_date(token, now)?;
    let start_at = date.and_time(clock_time(&start)?);
    let end_at = date.and_time(clock_time(&end)?);

    debug!(
        "Processing {:?}: meeting_date={}, start={}, end={}, now={}",
        record.title,
        token,
        start_at,
        end_at,
        now.at()
    );

    if is_within(start_at, end_at, now.at()) {
        Ok(Some(MatchedCourse::from_record(record, &start, &end)))
    } else {
        Ok(None)
    }
}

fn is_within(start: NaiveDateTime, end: NaiveDateTime, at: NaiveDateTime) -> bool {
    start <= at && at < end
}

/// Resolves the calendar date a meeting date token refers to.
///
/// When the token holds several dates, the one matching today's day/month
/// wins. The year defaults to the year of `now`.
fn meeting_date(token: &str, now: &CurrentMoment) -> Result<NaiveDate, ScheduleError> {
    let malformed = || ScheduleError::MalformedDate {
        input: token.to_string(),
    };

    let candidates: Vec<Captures> = MEETING_DATE_REGEX.captures_iter(token).collect();
    let caps = candidates
        .iter()
        .find(|caps| caps[0].starts_with(now.day_month()))
        .or_else(|| candidates.first())
        .ok_or_else(malformed)?;

    let day: u32 = caps[1].parse().map_err(|_| malformed())?;
    let month: u32 = caps[2].parse().map_err(|_| malformed())?;
    let year: i32 = match caps.get(3) {
        Some(y) => y.as_str().parse().map_err(|_| malformed())?,
        None => now.year(),
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

fn clock_time(hhmm: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(hhmm, "%H:%M")
        .map_err(|_| ScheduleError::malformed_time(hhmm, "not a 24-hour HH:MM time"))
}
