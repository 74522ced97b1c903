//! Enumerates conflict-free schedules for a set of courses.

use tracing::debug;

use super::sections_conflict;
use crate::config::CoursesConfig;
use crate::course::Course;
use crate::section::{Section, SectionId};

/// Builds every combination of one section per course in which no two
/// sections conflict.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    /// Stop after this many schedules
    pub max_schedules: usize,
    /// Whether full sections may be picked
    pub include_full: bool,
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::from_config(&CoursesConfig::default())
    }
}

impl ScheduleGenerator {
    pub fn from_config(config: &CoursesConfig) -> Self {
        Self {
            max_schedules: config.max_schedules,
            include_full: config.include_full_sections,
        }
    }

    /// Returns schedules as lists of section ids, one per course in the
    /// order the courses were given.
    ///
    /// A course without any eligible section makes the result empty.
    pub fn generate(&self, courses: &[&Course]) -> Vec<Vec<SectionId>> {
        self.search(courses).schedules
    }

    /// Like [`ScheduleGenerator::generate`], but also reports whether more
    /// schedules exist beyond `max_schedules`.
    pub fn search(&self, courses: &[&Course]) -> ScheduleSearch {
        let choices: Vec<Vec<&Section>> = courses
            .iter()
            .map(|course| {
                course
                    .sections()
                    .iter()
                    .filter(|s| self.include_full || !s.is_full())
                    .collect()
            })
            .collect();

        let mut search = ScheduleSearch::default();
        if choices.iter().any(Vec::is_empty) {
            return search;
        }

        let mut picked = Vec::with_capacity(choices.len());
        self.extend(&choices, &mut picked, &mut search);

        debug!(
            "Generated {} schedules for {} courses (limit {}, truncated {})",
            search.schedules.len(),
            courses.len(),
            self.max_schedules,
            search.truncated
        );
        search
    }

    fn extend<'a>(
        &self,
        choices: &[Vec<&'a Section>],
        picked: &mut Vec<&'a Section>,
        search: &mut ScheduleSearch,
    ) {
        let Some(options) = choices.get(picked.len()) else {
            if search.schedules.len() >= self.max_schedules {
                search.truncated = true;
            } else {
                search.schedules.push(picked.iter().map(|s| s.id).collect());
            }
            return;
        };

        for candidate in options {
            if picked.iter().any(|s| sections_conflict(s, candidate)) {
                continue;
            }
            picked.push(*candidate);
            self.extend(choices, picked, search);
            picked.pop();
            if search.truncated {
                return;
            }
        }
    }
}

/// Outcome of [`ScheduleGenerator::search`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSearch {
    pub schedules: Vec<Vec<SectionId>>,
    /// True when the limit cut the search short
    pub truncated: bool,
}
