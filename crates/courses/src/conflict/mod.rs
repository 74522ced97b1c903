//! Bulk conflict computation across many sections.
//!
//! Comparing every pair of sections through [`Section::conflicts_with`] walks
//! every pair of their periods, which gets slow once a semester's worth of
//! sections is involved. [`ConflictIndex`] answers the same question for a
//! whole batch at once:
//! 1. Periods that are equal put their sections in conflict (this is also how
//!    identical TBA periods collide).
//! 2. Timed periods are bucketed per weekday and sorted by start time, then
//!    swept; a period only has to be compared with the ones that start before
//!    it ends.
//!
//! The result can be written back onto the sections as their precomputed
//! conflict set.

mod generate;

pub use generate::{ScheduleGenerator, ScheduleSearch};

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::error::CourseError;
use crate::period::{Period, TimeRange};
use crate::section::{Section, SectionId};

/// Precomputed conflict sets for a batch of sections.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    conflicts: HashMap<SectionId, BTreeSet<SectionId>>,
}

impl ConflictIndex {
    /// Computes conflicts between every pair of the given sections.
    ///
    /// Uses the sections' periods only; any precomputed conflict sets already
    /// on the sections are ignored.
    pub fn build<'a, I>(sections: I) -> Self
    where
        I: IntoIterator<Item = &'a Section>,
    {
        let mut index = ConflictIndex::default();
        let mut by_period: HashMap<&Period, Vec<SectionId>> = HashMap::new();
        let mut by_day: [Vec<(TimeRange, SectionId)>; 7] = Default::default();

        for section in sections {
            index.conflicts.entry(section.id).or_default();
            for period in section.schedule().periods() {
                by_period.entry(*period).or_default().push(section.id);
                if let Some(time) = period.time() {
                    for day in period.days().day_indices() {
                        by_day[day].push((*time, section.id));
                    }
                }
            }
        }

        for ids in by_period.values() {
            for (i, a) in ids.iter().enumerate() {
                for b in &ids[i + 1..] {
                    index.link(*a, *b);
                }
            }
        }

        for bucket in by_day.iter_mut() {
            bucket.sort_by_key(|(time, _)| time.start());
            for (i, (time, a)) in bucket.iter().enumerate() {
                for (other, b) in &bucket[i + 1..] {
                    if other.start() > time.end() {
                        break;
                    }
                    index.link(*a, *b);
                }
            }
        }

        debug!(
            "Built conflict index over {} sections ({} conflicting pairs)",
            index.conflicts.len(),
            index.pair_count()
        );
        index
    }

    fn link(&mut self, a: SectionId, b: SectionId) {
        if a == b {
            return;
        }
        self.conflicts.entry(a).or_default().insert(b);
        self.conflicts.entry(b).or_default().insert(a);
    }

    /// Number of sections covered by the index.
    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Number of unordered pairs of distinct sections that conflict.
    pub fn pair_count(&self) -> usize {
        self.conflicts.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Sections conflicting with `id`, not counting `id` itself.
    pub fn conflicts_for(&self, id: SectionId) -> Option<&BTreeSet<SectionId>> {
        self.conflicts.get(&id)
    }

    /// Whether the two sections conflict. A section conflicts with itself.
    pub fn conflicts(&self, a: SectionId, b: SectionId) -> bool {
        a == b
            || self
                .conflicts
                .get(&a)
                .is_some_and(|ids| ids.contains(&b))
    }

    /// Writes each indexed section's conflict set onto it.
    ///
    /// Fails on the first section that was not part of the build; sections
    /// before it keep their new sets.
    pub fn assign<'a, I>(&self, sections: I) -> Result<(), CourseError>
    where
        I: IntoIterator<Item = &'a mut Section>,
    {
        for section in sections {
            let ids = self
                .conflicts
                .get(&section.id)
                .ok_or(CourseError::UnknownSection { id: section.id })?;
            section.conflicts = Some(ids.clone());
        }
        Ok(())
    }
}

/// Every pair of distinct sections in `sections` that conflict, checked in
/// both directions.
pub fn conflicting_pairs(sections: &[&Section]) -> Vec<(SectionId, SectionId)> {
    let mut pairs = Vec::new();
    for (i, a) in sections.iter().enumerate() {
        for b in &sections[i + 1..] {
            if a.id != b.id && sections_conflict(a, b) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}

/// True when no two distinct sections in the candidate schedule conflict.
pub fn is_conflict_free(sections: &[&Section]) -> bool {
    sections.iter().enumerate().all(|(i, a)| {
        sections[i + 1..]
            .iter()
            .all(|b| a.id == b.id || !sections_conflict(a, b))
    })
}

/// Symmetric section conflict test. A precomputed set on either side is
/// consulted.
pub(crate) fn sections_conflict(a: &Section, b: &Section) -> bool {
    a.conflicts_with(b) || b.conflicts_with(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::WeekPattern;
    use crate::section::tests::{period, section};

    fn sample() -> Vec<Section> {
        let mwf = WeekPattern::MONDAY | WeekPattern::WEDNESDAY | WeekPattern::FRIDAY;
        let tr = WeekPattern::TUESDAY | WeekPattern::THURSDAY;
        vec![
            section(1, vec![period("09:00", "09:50", mwf)]),
            section(2, vec![period("09:50", "10:40", WeekPattern::WEDNESDAY)]),
            section(3, vec![period("09:00", "09:50", tr)]),
            section(4, vec![period("08:00", "12:00", WeekPattern::THURSDAY)]),
            section(5, vec![Period::to_be_announced(WeekPattern::NONE)]),
            section(6, vec![Period::to_be_announced(WeekPattern::NONE)]),
            section(7, vec![Period::to_be_announced(WeekPattern::MONDAY)]),
            section(
                8,
                vec![
                    period("13:00", "13:50", mwf),
                    period("18:00", "20:50", WeekPattern::SATURDAY),
                ],
            ),
            section(9, vec![period("20:50", "21:40", WeekPattern::SATURDAY)]),
        ]
    }

    #[test]
    fn test_index_matches_pairwise_scan() {
        let sections = sample();
        let index = ConflictIndex::build(&sections);
        assert_eq!(index.len(), sections.len());

        for a in &sections {
            for b in &sections {
                assert_eq!(
                    index.conflicts(a.id, b.id),
                    a.conflicts_with(b),
                    "sections {} and {}",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_index_expected_pairs() {
        let index = ConflictIndex::build(&sample());
        assert_eq!(index.conflicts_for(1), Some(&BTreeSet::from([2])));
        assert_eq!(index.conflicts_for(3), Some(&BTreeSet::from([4])));
        assert_eq!(index.conflicts_for(5), Some(&BTreeSet::from([6])));
        assert_eq!(index.conflicts_for(7), Some(&BTreeSet::new()));
        assert_eq!(index.conflicts_for(8), Some(&BTreeSet::from([9])));
        assert_eq!(index.conflicts_for(42), None);
        assert_eq!(index.pair_count(), 4);
    }

    #[test]
    fn test_assign_sets_override() {
        let mut sections = sample();
        let index = ConflictIndex::build(&sections);
        index.assign(sections.iter_mut()).unwrap();

        assert_eq!(sections[0].conflicts, Some(BTreeSet::from([2])));
        assert!(sections[0].conflicts_with(&sections[1]));
        assert!(!sections[0].conflicts_with(&sections[2]));

        let mut stranger = section(99, vec![]);
        assert!(matches!(
            index.assign([&mut stranger]),
            Err(CourseError::UnknownSection { id: 99 })
        ));
    }

    #[test]
    fn test_candidate_schedule_checks() {
        let sections = sample();
        let by_id = |id: SectionId| sections.iter().find(|s| s.id == id).unwrap();

        let good = [by_id(1), by_id(3), by_id(8)];
        assert!(is_conflict_free(&good));
        assert!(conflicting_pairs(&good).is_empty());

        let bad = [by_id(1), by_id(2), by_id(3), by_id(4)];
        assert!(!is_conflict_free(&bad));
        assert_eq!(conflicting_pairs(&bad), vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn test_one_sided_override_counts_for_pair() {
        let mut a = section(1, vec![period("09:00", "09:50", WeekPattern::MONDAY)]);
        let b = section(2, vec![period("15:00", "15:50", WeekPattern::FRIDAY)]);
        a.set_conflicts([2]);
        assert!(!is_conflict_free(&[&b, &a]));
        assert_eq!(conflicting_pairs(&[&b, &a]), vec![(2, 1)]);
    }
}
