//! Error types for the schedule subsystem.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while loading and matching course schedules.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The course data directory could not be listed
    #[error("Failed to read course directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single course file could not be read
    #[error("Failed to read course file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A course file was read but is not a valid array of course records
    #[error("Failed to parse course file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading a course file took longer than the configured limit
    #[error("Timed out after {}ms reading course file {}", .timeout.as_millis(), .path.display())]
    Timeout { path: PathBuf, timeout: Duration },

    /// A clock time such as `9:00AM` could not be understood
    #[error("Malformed clock time {input:?}: {reason}")]
    MalformedTime { input: String, reason: &'static str },

    /// A period string did not have the `<label> <start> - <end>` shape
    #[error("Malformed period {input:?}")]
    MalformedPeriod { input: String },

    /// A meeting date token does not contain a usable day/month
    #[error("Malformed meeting date {input:?}")]
    MalformedDate { input: String },
}

impl ScheduleError {
    /// Returns true if this error should fail the whole request rather than
    /// just the file or record it came from.
    pub fn is_request_fatal(&self) -> bool {
        matches!(self, ScheduleError::DirectoryRead { .. })
    }

    pub(crate) fn malformed_time(input: &str, reason: &'static str) -> Self {
        ScheduleError::MalformedTime {
            input: input.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_directory_errors_are_fatal() {
        let dir_err = ScheduleError::DirectoryRead {
            path: PathBuf::from("courses"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let file_err = ScheduleError::FileRead {
            path: PathBuf::from("courses/MATH101.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let period_err = ScheduleError::MalformedPeriod {
            input: "Class".to_string(),
        };

        assert!(dir_err.is_request_fatal());
        assert!(!file_err.is_request_fatal());
        assert!(!period_err.is_request_fatal());
    }

    #[test]
    fn test_timeout_message_includes_path() {
        let err = ScheduleError::Timeout {
            path: PathBuf::from("courses/CS50.json"),
            timeout: Duration::from_millis(250),
        };
        let msg = err.to_string();
        assert!(msg.contains("250ms"));
        assert!(msg.contains("CS50.json"));
    }
}
