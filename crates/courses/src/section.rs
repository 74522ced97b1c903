//! Course sections and their meeting times.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::period::Period;
use crate::related::Related;
use crate::schedule::SectionSchedule;

pub type SectionId = i64;
pub type Crn = u32;

/// Section number used for study-abroad placeholders.
pub const STUDY_ABROAD: &str = "-1";
/// Section number used for off-campus placeholders.
pub const OFF_CAMPUS: &str = "-2";

/// One meeting-time record: a section meets in `period`, taught by
/// `instructor` at `location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTime {
    pub id: i64,
    pub period: Period,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub location: String,
    /// Kind of meeting (e.g. "LEC", "LAB", "REC")
    pub kind: String,
}

impl MeetingTime {
    /// Returns true if the two records' periods conflict.
    pub fn conflicts_with(&self, other: &MeetingTime) -> bool {
        self.period.conflicts_with(&other.period)
    }
}

/// Groups sections from different departments that share meeting times
/// (e.g. a graduate and undergraduate version of the same class).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCrosslisting {
    pub id: i64,
    pub semester_id: i64,
    #[serde(rename = "ref")]
    pub reference: String,
}

/// A particular offering of a course a student can sign up for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub crn: Crn,
    pub number: String,
    pub course_id: i64,
    pub semester_id: i64,
    pub seats_taken: i32,
    pub seats_total: i32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub crosslisted: Option<SectionCrosslisting>,
    #[serde(default)]
    pub meeting_times: Related<MeetingTime>,
    /// Conflicting section ids computed ahead of time by the caller. When
    /// set, [`Section::conflicts_with`] trusts it instead of scanning periods.
    #[serde(skip)]
    pub conflicts: Option<BTreeSet<SectionId>>,
}

impl Section {
    /// Seats still open, never negative.
    pub fn seats_left(&self) -> i32 {
        (self.seats_total - self.seats_taken).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.seats_left() <= 0
    }

    pub fn is_study_abroad(&self) -> bool {
        self.number == STUDY_ABROAD
    }

    pub fn is_off_campus(&self) -> bool {
        self.number == OFF_CAMPUS
    }

    /// Meeting-time records of this section.
    pub fn section_times(&self) -> &[MeetingTime] {
        self.meeting_times.all("section_times")
    }

    /// The distinct periods this section meets in.
    pub fn schedule(&self) -> SectionSchedule<'_> {
        SectionSchedule::from_meeting_times(self.meeting_times.all("periods"))
    }

    pub fn periods(&self) -> Vec<&Period> {
        self.schedule().periods().to_vec()
    }

    /// Names of the days this section meets, Monday first.
    pub fn days_of_week(&self) -> Vec<&'static str> {
        self.schedule().days_of_week()
    }

    pub fn instructors(&self) -> BTreeSet<&str> {
        self.section_times()
            .iter()
            .map(|mt| mt.instructor.as_str())
            .collect()
    }

    pub fn kinds(&self) -> BTreeSet<&str> {
        self.section_times()
            .iter()
            .map(|mt| mt.kind.as_str())
            .collect()
    }

    /// Distinct non-empty lines of the section notes.
    pub fn note_lines(&self) -> BTreeSet<&str> {
        self.notes.lines().filter(|line| !line.is_empty()).collect()
    }

    /// Installs a precomputed conflict set, bypassing the period scan.
    pub fn set_conflicts<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = SectionId>,
    {
        self.conflicts = Some(ids.into_iter().collect());
    }

    pub fn clear_conflicts(&mut self) {
        self.conflicts = None;
    }

    /// Returns true if this section conflicts with the given one.
    ///
    /// A section always conflicts with itself. Otherwise a precomputed
    /// conflict set, if present, decides; without one every pair of periods
    /// is compared.
    pub fn conflicts_with(&self, other: &Section) -> bool {
        if self.id == other.id {
            return true;
        }
        if let Some(conflicts) = &self.conflicts {
            return conflicts.contains(&other.id);
        }
        self.schedule().conflicts_with(&other.schedule())
    }
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Section {}

impl std::hash::Hash for Section {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) Seats: {} / {}",
            self.number, self.crn, self.seats_taken, self.seats_total
        )
    }
}
