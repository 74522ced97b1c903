//! A semester's courses loaded from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::catalog::Semester;
use crate::conflict::ConflictIndex;
use crate::course::Course;
use crate::error::CourseError;
use crate::section::{Crn, Section};

/// Every course offered in one semester, with sections and meeting times
/// attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterSnapshot {
    pub semester: Semester,
    pub courses: Vec<Course>,
}

impl SemesterSnapshot {
    /// Parses a snapshot. Sections from other semesters are dropped.
    pub fn from_json(content: &str) -> Result<Self, CourseError> {
        let mut snapshot: SemesterSnapshot = serde_json::from_str(content)?;
        let semester_id = snapshot.semester.id;
        for course in &mut snapshot.courses {
            course.restrict_to_semester(semester_id);
        }
        Ok(snapshot)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CourseError> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        info!(
            "Loaded {} ({} courses, {} sections) from {}",
            snapshot.semester,
            snapshot.courses.len(),
            snapshot.sections().count(),
            path.display()
        );
        Ok(snapshot)
    }

    pub fn course(&self, id: i64) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.courses.iter().flat_map(|c| c.sections.as_slice())
    }

    /// Finds a section and its course by CRN.
    pub fn find_crn(&self, crn: Crn) -> Option<(&Course, &Section)> {
        self.courses.iter().find_map(|course| {
            course
                .sections
                .as_slice()
                .iter()
                .find(|s| s.crn == crn)
                .map(|s| (course, s))
        })
    }

    /// Computes conflicts across the whole semester and stores them on every
    /// section, so later section and course comparisons skip the period scan.
    pub fn precompute_conflicts(&mut self) -> Result<ConflictIndex, CourseError> {
        let index = ConflictIndex::build(self.sections());
        index.assign(
            self.courses
                .iter_mut()
                .flat_map(|c| c.sections.as_mut_slice().iter_mut()),
        )?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "semester": {"id": 2, "year": 2018, "month": 9, "name": "Fall 2018", "ref": "201809"},
        "courses": [
            {
                "id": 10, "name": "Data Structures", "number": 1200,
                "department": {"code": "CSCI", "name": "Computer Science"},
                "min_credits": 4, "max_credits": 4,
                "sections": [
                    {
                        "id": 100, "crn": 40100, "number": "01", "course_id": 10, "semester_id": 2,
                        "seats_taken": 10, "seats_total": 40,
                        "meeting_times": [
                            {"id": 1, "kind": "LEC", "instructor": "Cutler",
                             "period": {"start": "10:00:00", "end": "11:50:00", "days": 9}}
                        ]
                    },
                    {
                        "id": 101, "crn": 30100, "number": "01", "course_id": 10, "semester_id": 1,
                        "seats_taken": 0, "seats_total": 40
                    }
                ]
            },
            {
                "id": 11, "name": "Calculus II", "number": 1020,
                "department": {"code": "MATH"},
                "min_credits": 4, "max_credits": 4,
                "sections": [
                    {
                        "id": 110, "crn": 40110, "number": "02", "course_id": 11, "semester_id": 2,
                        "seats_taken": 30, "seats_total": 30,
                        "meeting_times": [
                            {"id": 2, "kind": "LEC",
                             "period": {"start": "11:50:00", "end": "12:40:00", "days": 1}}
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_from_json_restricts_semester() {
        let snapshot = SemesterSnapshot::from_json(SNAPSHOT).unwrap();
        assert_eq!(snapshot.sections().count(), 2);
        assert!(snapshot.find_crn(30100).is_none());

        let (course, section) = snapshot.find_crn(40110).unwrap();
        assert_eq!(course.code(), "MATH 1020");
        assert!(section.is_full());
        assert!(course.sections.is_preloaded());
    }

    #[test]
    fn test_precompute_conflicts() {
        let mut snapshot = SemesterSnapshot::from_json(SNAPSHOT).unwrap();
        let index = snapshot.precompute_conflicts().unwrap();
        assert!(index.conflicts(100, 110));

        let ds = snapshot.course(10).unwrap();
        let calc = snapshot.course(11).unwrap();
        assert_eq!(ds.sections()[0].conflicts.as_ref().map(|c| c.len()), Some(1));
        assert!(ds.conflicts_with(calc));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SemesterSnapshot::from_json("{\"semester\": 1}"),
            Err(CourseError::Parse { .. })
        ));
    }
}
