/// Semesters and departments that courses are offered under
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A semester or quarter. Courses may not be offered every semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: i64,
    pub year: i32,
    /// Starting month of the semester
    pub month: u32,
    /// Human-readable name, e.g. "Fall 2018"
    pub name: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Ord for Semester {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.month.cmp(&other.month))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Semester {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub code: String,
    #[serde(default)]
    pub name: String,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} ({})", self.name, self.code)
        }
    }
}
