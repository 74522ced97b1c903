//! Error types for the course model.

use chrono::NaiveTime;
use thiserror::Error;

use crate::section::SectionId;

/// Errors that can occur at the edges of the course model.
///
/// The conflict and availability queries themselves never fail; these only
/// come up when building values or loading data.
#[derive(Debug, Error, Clone)]
pub enum CourseError {
    /// A time range whose start falls after its end
    #[error("Invalid time range: {start} is after {end}")]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    /// Only one of a period's start/end times was given
    #[error("Incomplete time range: both start and end are required (got {start:?} to {end:?})")]
    IncompleteTimeRange {
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
    },

    /// A collection was read before the data layer loaded it in bulk
    #[error("Collection '{field}' was not preloaded")]
    NotPreloaded { field: &'static str },

    /// A section id that is not part of the loaded data
    #[error("Unknown section: {id}")]
    UnknownSection { id: SectionId },

    /// Reading a file failed
    #[error("I/O error: {message}")]
    Io { message: String },

    /// A file could not be parsed
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl CourseError {
    /// Returns true if this error points at bad course data rather than at
    /// the environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CourseError::InvalidTimeRange { .. }
                | CourseError::IncompleteTimeRange { .. }
                | CourseError::UnknownSection { .. }
                | CourseError::Parse { .. }
        )
    }
}

impl From<std::io::Error> for CourseError {
    fn from(err: std::io::Error) -> Self {
        CourseError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CourseError {
    fn from(err: serde_json::Error) -> Self {
        CourseError::Parse {
            message: err.to_string(),
        }
    }
}
