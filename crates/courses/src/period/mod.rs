//! Weekly recurring meeting periods.
//!
//! A [`Period`] is a time-of-day range plus the set of weekdays it repeats
//! on. Periods whose times are not known yet ("TBA") carry no range at all,
//! so a half-specified range cannot be represented.
//!
//! # Conflicts
//! Two periods conflict if they are the same period, or if they share a day
//! and their ranges overlap. Range endpoints are inclusive: a class ending at
//! 11:00 conflicts with one starting at 11:00.

mod week;

pub use week::{DayInput, WeekPattern, DAY_NAMES};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CourseError;

/// Closed time-of-day interval `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    /// Creates a new range, returning an error if `start` is after `end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, CourseError> {
        if start > end {
            return Err(CourseError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from "HH:MM" or "HH:MM:SS" strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, CourseError> {
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether the two ranges share at least one instant, endpoints included.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        // With start <= end on both sides this covers all four containment cases.
        self.start <= other.end && other.start <= self.end
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, CourseError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| CourseError::Parse {
            message: format!("invalid time '{value}': {e}"),
        })
}

/// A weekly meeting time: a range on a set of weekdays.
///
/// Equality and hashing use the `(start, end, days)` triple, so two periods
/// built from the same values are the same period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod", into = "RawPeriod")]
pub struct Period {
    time: Option<TimeRange>,
    days: WeekPattern,
}

impl Period {
    /// A period with a known time range.
    pub fn new(time: TimeRange, days: WeekPattern) -> Self {
        Self {
            time: Some(time),
            days,
        }
    }

    /// A period whose times have not been announced.
    pub fn to_be_announced(days: WeekPattern) -> Self {
        Self { time: None, days }
    }

    /// Builds a period from optional endpoints.
    ///
    /// Both endpoints missing gives a TBA period. Exactly one missing is
    /// rejected.
    pub fn from_times(
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        days: WeekPattern,
    ) -> Result<Self, CourseError> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::new(TimeRange::new(start, end)?, days)),
            (None, None) => Ok(Self::to_be_announced(days)),
            (start, end) => Err(CourseError::IncompleteTimeRange { start, end }),
        }
    }

    pub fn time(&self) -> Option<&TimeRange> {
        self.time.as_ref()
    }

    pub fn start(&self) -> Option<NaiveTime> {
        self.time.map(|t| t.start)
    }

    pub fn end(&self) -> Option<NaiveTime> {
        self.time.map(|t| t.end)
    }

    pub fn days(&self) -> WeekPattern {
        self.days
    }

    /// The natural key of this period.
    pub fn to_tuple(&self) -> (Option<NaiveTime>, Option<NaiveTime>, WeekPattern) {
        (self.start(), self.end(), self.days)
    }

    /// True when the period has no start or end time yet.
    pub fn is_to_be_announced(&self) -> bool {
        self.time.is_none()
    }

    /// Replaces the whole day set. An empty input clears every day.
    pub fn set_days<I, D>(&mut self, days: I)
    where
        I: IntoIterator<Item = D>,
        D: Into<DayInput>,
    {
        self.days = WeekPattern::from_names(days);
    }

    pub fn is_on_day(&self, day: WeekPattern) -> bool {
        self.days.is_on_day(day)
    }

    /// Names of the days this period meets, Monday first.
    pub fn days_of_week(&self) -> Vec<&'static str> {
        self.days.to_names()
    }

    /// Comma-joined day names, e.g. "Monday, Thursday".
    pub fn days_of_the_week(&self) -> String {
        self.days.to_string()
    }

    /// Returns true if the given period conflicts with this one.
    ///
    /// A period always conflicts with itself. TBA periods conflict with
    /// nothing else.
    pub fn conflicts_with(&self, other: &Period) -> bool {
        if self == other {
            return true;
        }
        if !self.days.intersects(other.days) {
            return false;
        }
        match (&self.time, &other.time) {
            (Some(mine), Some(theirs)) => mine.overlaps(theirs),
            _ => false,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.time {
            Some(t) => write!(
                f,
                "{} to {} on {}",
                t.start.format("%H:%M"),
                t.end.format("%H:%M"),
                self.days
            ),
            None if self.days.is_empty() => write!(f, "TBA"),
            None => write!(f, "TBA on {}", self.days),
        }
    }
}

/// Flat form of a period as it appears in data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPeriod {
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    #[serde(default)]
    days: WeekPattern,
}

impl TryFrom<RawPeriod> for Period {
    type Error = CourseError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Period::from_times(raw.start, raw.end, raw.days)
    }
}

impl From<Period> for RawPeriod {
    fn from(period: Period) -> Self {
        RawPeriod {
            start: period.start(),
            end: period.end(),
            days: period.days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(start: &str, end: &str, days: WeekPattern) -> Period {
        Period::new(TimeRange::parse(start, end).unwrap(), days)
    }

    #[test]
    fn test_conflicts_with_itself() {
        let p = period("10:00", "11:00", WeekPattern::MONDAY);
        assert!(p.conflicts_with(&p));
        assert!(p.conflicts_with(&p.clone()));

        let tba = Period::to_be_announced(WeekPattern::NONE);
        assert!(tba.conflicts_with(&tba));
    }

    #[test]
    fn test_touching_boundary_conflicts() {
        let first = period("10:00", "11:00", WeekPattern::MONDAY);
        let second = period("11:00", "12:00", WeekPattern::MONDAY);
        assert!(first.conflicts_with(&second));
        assert!(second.conflicts_with(&first));
    }

    #[test]
    fn test_gap_does_not_conflict() {
        let first = period("10:00", "11:00", WeekPattern::MONDAY);
        let second = period("11:01", "12:00", WeekPattern::MONDAY);
        assert!(!first.conflicts_with(&second));
        assert!(!second.conflicts_with(&first));
    }

    #[test]
    fn test_containment_conflicts() {
        let outer = period("09:00", "12:00", WeekPattern::TUESDAY | WeekPattern::THURSDAY);
        let inner = period("10:00", "10:50", WeekPattern::THURSDAY);
        assert!(outer.conflicts_with(&inner));
        assert!(inner.conflicts_with(&outer));
    }

    #[test]
    fn test_different_days_do_not_conflict() {
        let monday = period("10:00", "11:00", WeekPattern::MONDAY);
        let tuesday = period("10:00", "11:00", WeekPattern::TUESDAY);
        assert!(!monday.conflicts_with(&tuesday));
        assert!(!tuesday.conflicts_with(&monday));
    }

    #[test]
    fn test_tba_only_conflicts_with_equal_period() {
        let tba = Period::to_be_announced(WeekPattern::MONDAY);
        let scheduled = period("10:00", "11:00", WeekPattern::MONDAY);
        assert!(!tba.conflicts_with(&scheduled));
        assert!(!scheduled.conflicts_with(&tba));

        let other_tba = Period::to_be_announced(WeekPattern::MONDAY | WeekPattern::FRIDAY);
        assert!(!tba.conflicts_with(&other_tba));
        assert!(tba.conflicts_with(&Period::to_be_announced(WeekPattern::MONDAY)));
    }

    #[test]
    fn test_set_days_replaces() {
        let mut p = period("08:00", "09:50", WeekPattern::MONDAY | WeekPattern::THURSDAY);
        p.set_days(["friday"]);
        assert_eq!(p.days(), WeekPattern::FRIDAY);
        p.set_days(Vec::<&str>::new());
        assert_eq!(p.days(), WeekPattern::NONE);
        assert!(p.days_of_week().is_empty());
    }

    #[test]
    fn test_from_times() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0);
        let eleven = NaiveTime::from_hms_opt(11, 0, 0);

        assert!(Period::from_times(None, None, WeekPattern::NONE)
            .unwrap()
            .is_to_be_announced());
        assert!(matches!(
            Period::from_times(ten, None, WeekPattern::MONDAY),
            Err(CourseError::IncompleteTimeRange { .. })
        ));
        assert!(matches!(
            Period::from_times(eleven, ten, WeekPattern::MONDAY),
            Err(CourseError::InvalidTimeRange { .. })
        ));
        let p = Period::from_times(ten, eleven, WeekPattern::MONDAY).unwrap();
        assert_eq!(p.to_tuple(), (ten, eleven, WeekPattern::MONDAY));
    }

    #[test]
    fn test_display() {
        let p = period("10:00", "11:50", WeekPattern::MONDAY | WeekPattern::THURSDAY);
        assert_eq!(p.to_string(), "10:00 to 11:50 on Monday, Thursday");
        assert_eq!(p.days_of_the_week(), "Monday, Thursday");
        assert_eq!(Period::to_be_announced(WeekPattern::NONE).to_string(), "TBA");
        assert_eq!(
            Period::to_be_announced(WeekPattern::FRIDAY).to_string(),
            "TBA on Friday"
        );
    }

    #[test]
    fn test_deserialize() {
        let p: Period =
            serde_json::from_str(r#"{"start": "14:00:00", "end": "15:50:00", "days": 9}"#).unwrap();
        assert_eq!(p, period("14:00", "15:50", WeekPattern::MONDAY | WeekPattern::THURSDAY));

        let tba: Period = serde_json::from_str(r#"{"start": null, "end": null}"#).unwrap();
        assert!(tba.is_to_be_announced());

        let bad = serde_json::from_str::<Period>(r#"{"start": "15:00:00", "end": "14:00:00", "days": 1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_days_outside_the_week_do_not_conflict() {
        let a: Period =
            serde_json::from_str(r#"{"start": "10:00:00", "end": "11:00:00", "days": 128}"#).unwrap();
        let b: Period =
            serde_json::from_str(r#"{"start": "10:30:00", "end": "11:30:00", "days": 128}"#).unwrap();
        assert!(a.days().is_empty());
        assert!(a.days_of_week().is_empty());
        assert!(!a.conflicts_with(&b));
    }
}
