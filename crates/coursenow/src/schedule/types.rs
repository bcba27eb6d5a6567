/// Types for course schedule data
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// One scheduled course offering, as stored in a course file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "course_title", default, deserialize_with = "null_to_default")]
    pub title: String,

    /// Some exports write the class code as a bare number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_code: String,

    /// Raw entries, each possibly a comma-joined list of dates
    /// (e.g. `"15/03, 22/03"`). See [`CourseRecord::meeting_date_tokens`].
    #[serde(rename = "meeting_date", default, deserialize_with = "null_to_default")]
    pub meeting_dates: Vec<String>,

    /// Period strings such as `"Class 09:00AM - 10:30AM"`. Only the first
    /// one is used for matching.
    #[serde(rename = "period", default, deserialize_with = "null_to_default")]
    pub periods: Vec<String>,

    #[serde(default, deserialize_with = "null_to_default")]
    pub room: Vec<String>,

    #[serde(default)]
    pub staff: Option<String>,

    #[serde(default)]
    pub quota: Option<Number>,

    #[serde(default)]
    pub mode: Option<String>,

    #[serde(default)]
    pub units: Option<Number>,
}

impl CourseRecord {
    /// Splits every meeting date entry on commas and trims each piece.
    /// Empty pieces are dropped.
    pub fn meeting_date_tokens(&self) -> Vec<&str> {
        self.meeting_dates
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// The period consulted for matching, if the record has any.
    pub fn first_period(&self) -> Option<&str> {
        self.periods.first().map(String::as_str)
    }

    /// The room reported as the course location.
    pub fn first_room(&self) -> Option<&str> {
        self.room.first().map(String::as_str)
    }
}

/// A course that is in session right now, in the shape returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedCourse {
    pub title: String,
    #[serde(rename = "course code")]
    pub course_code: String,
    /// `"HH:MM - HH:MM"` in 24-hour time
    pub timeslot: String,
    pub location: Option<String>,
    pub professor: Option<String>,
    pub quota: Option<Number>,
    pub mode: Option<String>,
    pub units: Option<Number>,
}

impl MatchedCourse {
    /// Builds the flattened view of `record` for one matched window.
    pub fn from_record(record: &CourseRecord, start: &str, end: &str) -> Self {
        Self {
            title: record.title.clone(),
            course_code: record.class_code.clone(),
            timeslot: format!("{start} - {end}"),
            location: record.first_room().map(str::to_string),
            professor: record.staff.clone(),
            quota: record.quota.clone(),
            mode: record.mode.clone(),
            units: record.units.clone(),
        }
    }
}

/// The single instant every comparison in a request is made against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentMoment {
    day_month: String,
    at: NaiveDateTime,
}

impl CurrentMoment {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            day_month: at.format("%d/%m").to_string(),
            at,
        }
    }

    /// Zero-padded `DD/MM`, e.g. `"05/03"`.
    pub fn day_month(&self) -> &str {
        &self.day_month
    }

    pub fn at(&self) -> NaiveDateTime {
        self.at
    }

    pub fn year(&self) -> i32 {
        self.at.year()
    }
}

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_meeting_date_tokens_split_and_trim() {
        let record = CourseRecord {
            meeting_dates: vec!["15/03, 22/03".to_string(), " 29/03 ,".to_string()],
            ..Default::default()
        };
        assert_eq!(record.meeting_date_tokens(), vec!["15/03", "22/03", "29/03"]);
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let record: CourseRecord = serde_json::from_value(json!({
            "course_title": "Linear Algebra",
            "class_code": 4021,
            "meeting_date": null,
            "staff": "Dr. Tan"
        }))
        .unwrap();

        assert_eq!(record.title, "Linear Algebra");
        assert_eq!(record.class_code, "4021");
        assert!(record.meeting_dates.is_empty());
        assert!(record.periods.is_empty());
        assert!(record.first_room().is_none());
        assert!(record.quota.is_none());
    }

    #[test]
    fn test_matched_course_wire_keys() {
        let record: CourseRecord = serde_json::from_value(json!({
            "course_title": "Calculus I",
            "class_code": "MATH101-A",
            "room": ["B-204", "B-205"],
            "staff": "Prof. Lee",
            "quota": 40,
            "mode": "F2F",
            "units": 3
        }))
        .unwrap();

        let matched = MatchedCourse::from_record(&record, "09:00", "10:30");
        let value = serde_json::to_value(&matched).unwrap();

        assert_eq!(
            value,
            json!({
                "title": "Calculus I",
                "course code": "MATH101-A",
                "timeslot": "09:00 - 10:30",
                "location": "B-204",
                "professor": "Prof. Lee",
                "quota": 40,
                "mode": "F2F",
                "units": 3
            })
        );
    }

    #[test]
    fn test_current_moment_day_month_is_padded() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let now = CurrentMoment::new(at);
        assert_eq!(now.day_month(), "05/03");
        assert_eq!(now.year(), 2024);
    }
}
