//! The distinct periods a section meets in.

use std::collections::HashSet;

use crate::period::{Period, WeekPattern};
use crate::section::MeetingTime;

/// View over the periods of one section.
///
/// Several meeting-time records can share a period (same slot taught by two
/// instructors, for example). Those collapse to a single entry here, keyed on
/// the period's value.
#[derive(Debug, Clone)]
pub struct SectionSchedule<'a> {
    periods: Vec<&'a Period>,
}

impl<'a> SectionSchedule<'a> {
    pub fn from_meeting_times(meeting_times: &'a [MeetingTime]) -> Self {
        let mut seen = HashSet::new();
        let periods = meeting_times
            .iter()
            .map(|mt| &mt.period)
            .filter(|period| seen.insert(*period))
            .collect();
        Self { periods }
    }

    /// Distinct periods, in the order they were first seen.
    pub fn periods(&self) -> &[&'a Period] {
        &self.periods
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Union of the days of every period.
    pub fn days(&self) -> WeekPattern {
        self.periods
            .iter()
            .fold(WeekPattern::NONE, |acc, period| acc | period.days())
    }

    /// Day names across all periods, Monday first.
    pub fn days_of_week(&self) -> Vec<&'static str> {
        self.days().to_names()
    }

    /// True if any period here conflicts with any period of `other`.
    pub fn conflicts_with(&self, other: &SectionSchedule<'_>) -> bool {
        self.periods.iter().any(|mine| {
            other
                .periods
                .iter()
                .any(|theirs| mine == theirs || mine.conflicts_with(theirs))
        })
    }
}
