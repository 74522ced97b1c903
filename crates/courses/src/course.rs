//! Courses and the aggregates computed over their sections.
//!
//! Every aggregate here walks the already-loaded `sections` collection and is
//! recomputed on each call.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::catalog::Department;
use crate::related::Related;
use crate::section::{Crn, MeetingTime, Section, SectionId};

/// A badge describing something notable about a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseTag {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classes: Option<&'static str>,
    pub sort_order: u32,
}

const fn kind_tag(name: &'static str, title: &'static str, sort_order: u32) -> CourseTag {
    CourseTag {
        name,
        title,
        classes: None,
        sort_order,
    }
}

/// Tags for meeting kinds, keyed by the kind code on meeting-time records.
const MEETING_KIND_TAGS: [(&str, CourseTag); 5] = [
    (
        "LEC",
        kind_tag(
            "Lecture",
            "This course has lecture, where the instructor teaches the course.",
            0,
        ),
    ),
    (
        "LAB",
        kind_tag("Lab", "This course has lab, where hands-on activities occur.", 1),
    ),
    (
        "REC",
        kind_tag(
            "Recitation",
            "This course has recitation, where problemsets and quizzes generally occur.",
            2,
        ),
    ),
    ("STU", kind_tag("Studio", "This course has studio", 4)),
    (
        "TES",
        kind_tag(
            "Testing",
            "This course has a testing period outside normal lecture or recitation.",
            5,
        ),
    ),
];

const COMM_INTENSIVE_TAG: CourseTag = CourseTag {
    name: "Comm Intensive",
    title: "This course counts as a communication intensive course.",
    classes: Some("satisfies-requirement"),
    sort_order: 10,
};

const PASS_FAIL_TAG: CourseTag = CourseTag {
    name: "Pass/Fail",
    title: "This course's final grade is pass or fail instead of a GPA.",
    classes: Some("pass_or_fail"),
    sort_order: 11,
};

const PASS_FAIL_GRADE_TYPE: &str = "Satisfactory/Unsatisfactory";

/// A course offered by a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub number: u32,
    pub department: Department,
    #[serde(default)]
    pub description: String,
    pub min_credits: u32,
    pub max_credits: u32,
    #[serde(default)]
    pub grade_type: String,
    #[serde(default)]
    pub prereqs: String,
    #[serde(default)]
    pub is_comm_intense: bool,
    #[serde(default)]
    pub sections: Related<Section>,
}

impl Course {
    /// Department code and course number, e.g. "CSCI 1200".
    pub fn code(&self) -> String {
        format!("{} {}", self.department.code, self.number)
    }

    pub fn sections(&self) -> &[Section] {
        self.sections.all("sections")
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.as_slice().iter().find(|s| s.id == id)
    }

    /// Drops sections that belong to other semesters.
    pub fn restrict_to_semester(&mut self, semester_id: i64) {
        self.sections.retain(|s| s.semester_id == semester_id);
    }

    /// Returns true if any section of this course conflicts with any section
    /// of the given course. A course always conflicts with itself.
    pub fn conflicts_with(&self, other: &Course) -> bool {
        if self.id == other.id {
            return true;
        }
        let theirs = other.sections();
        self.sections()
            .iter()
            .any(|mine| theirs.iter().any(|s| mine.conflicts_with(s)))
    }

    /// Open seats summed over every section.
    pub fn seats_left(&self) -> i32 {
        self.sections().iter().map(Section::seats_left).sum()
    }

    pub fn section_ids(&self) -> BTreeSet<SectionId> {
        self.sections().iter().map(|s| s.id).collect()
    }

    pub fn full_section_ids(&self) -> BTreeSet<SectionId> {
        self.sections()
            .iter()
            .filter(|s| s.is_full())
            .map(|s| s.id)
            .collect()
    }

    pub fn crns(&self) -> BTreeSet<Crn> {
        self.sections().iter().map(|s| s.crn).collect()
    }

    pub fn full_crns(&self) -> BTreeSet<Crn> {
        self.sections()
            .iter()
            .filter(|s| s.is_full())
            .map(|s| s.crn)
            .collect()
    }

    /// Sections that still have seats.
    pub fn available_sections(&self) -> Vec<&Section> {
        self.sections().iter().filter(|s| !s.is_full()).collect()
    }

    /// Splits sections into `(open, full)`.
    pub fn partition_by_availability(&self) -> (Vec<&Section>, Vec<&Section>) {
        self.sections().iter().partition(|s| !s.is_full())
    }

    /// Every meeting-time record across all sections, deduplicated by id.
    pub fn section_times(&self) -> Vec<&MeetingTime> {
        let mut by_id = BTreeMap::new();
        for section in self.sections() {
            for mt in section.section_times() {
                by_id.entry(mt.id).or_insert(mt);
            }
        }
        by_id.into_values().collect()
    }

    pub fn instructors(&self) -> BTreeSet<&str> {
        self.section_times()
            .into_iter()
            .map(|mt| mt.instructor.as_str())
            .collect()
    }

    pub fn kinds(&self) -> BTreeSet<&str> {
        self.section_times()
            .into_iter()
            .map(|mt| mt.kind.as_str())
            .collect()
    }

    /// Distinct note lines across all sections.
    pub fn notes(&self) -> BTreeSet<&str> {
        self.sections()
            .iter()
            .flat_map(|s| s.note_lines())
            .collect()
    }

    /// Tags for the meeting kinds this course has, plus requirement and
    /// grading tags, ordered by sort order.
    pub fn tags(&self) -> Vec<CourseTag> {
        let kinds = self.kinds();
        let mut tags: Vec<CourseTag> = MEETING_KIND_TAGS
            .iter()
            .filter(|(code, _)| kinds.contains(code))
            .map(|(_, tag)| tag.clone())
            .collect();
        if self.is_comm_intense {
            tags.push(COMM_INTENSIVE_TAG);
        }
        if self.grade_type == PASS_FAIL_GRADE_TYPE {
            tags.push(PASS_FAIL_TAG);
        }
        tags.sort_by_key(|t| t.sort_order);
        tags
    }

    /// e.g. "4 credits" or "1 - 4 credits".
    pub fn credits_display(&self) -> String {
        if self.min_credits == self.max_credits {
            pluralize(self.min_credits as i64, "credit")
        } else {
            format!("{} - {} credits", self.min_credits, self.max_credits)
        }
    }

    pub fn num_sections_display(&self) -> String {
        pluralize(self.sections().len() as i64, "section")
    }

    pub fn seats_left_display(&self) -> String {
        pluralize(self.seats_left() as i64, "seat")
    }
}

fn pluralize(count: i64, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code())
    }
}
