//! Weekly meeting-time conflicts and seat availability for college course
//! sections.
//!
//! The model is pure: every query works on values the data layer has already
//! loaded, and nothing here blocks or performs I/O except the config and
//! snapshot loaders.

pub mod catalog;
pub mod config;
pub mod conflict;
pub mod course;
pub mod error;
pub mod period;
pub mod related;
pub mod schedule;
pub mod section;
pub mod snapshot;

pub use catalog::{Department, Semester};
pub use config::CoursesConfig;
pub use conflict::{conflicting_pairs, is_conflict_free, ConflictIndex, ScheduleGenerator, ScheduleSearch};
pub use course::{Course, CourseTag};
pub use error::CourseError;
pub use period::{DayInput, Period, TimeRange, WeekPattern};
pub use related::Related;
pub use schedule::SectionSchedule;
pub use section::{Crn, MeetingTime, Section, SectionCrosslisting, SectionId};
pub use snapshot::SemesterSnapshot;
