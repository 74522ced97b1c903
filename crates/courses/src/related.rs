//! Related collections attached to a model, with a marker for whether the
//! data layer loaded them in bulk.
//!
//! Aggregates such as seat counts and conflict scans walk these collections
//! on every call. When a collection was assembled one row at a time instead
//! of being preloaded, reads emit a warning so the caller can fix its query.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

use crate::error::CourseError;

static WARN_UNLOADED: AtomicBool = AtomicBool::new(cfg!(debug_assertions));

/// Turns the "collection was not preloaded" warning on or off process-wide.
pub fn set_warn_unloaded(enabled: bool) {
    WARN_UNLOADED.store(enabled, Ordering::Relaxed);
}

/// Whether reads of unloaded collections are currently reported.
pub fn warn_unloaded() -> bool {
    WARN_UNLOADED.load(Ordering::Relaxed)
}

/// A collection of related records plus its preload state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Related<T> {
    items: Vec<T>,
    preloaded: bool,
}

impl<T> Related<T> {
    /// Wraps records that were fetched in bulk.
    pub fn preloaded(items: Vec<T>) -> Self {
        Self {
            items,
            preloaded: true,
        }
    }

    /// Wraps records that were gathered without a bulk fetch.
    pub fn deferred(items: Vec<T>) -> Self {
        Self {
            items,
            preloaded: false,
        }
    }

    pub fn is_preloaded(&self) -> bool {
        self.preloaded
    }

    /// Marks the collection as fully materialized.
    pub fn mark_preloaded(&mut self) {
        self.preloaded = true;
    }

    /// Fails unless the collection has been marked as preloaded.
    pub fn assert_preloaded(&self, field: &'static str) -> Result<(), CourseError> {
        if self.preloaded {
            Ok(())
        } else {
            Err(CourseError::NotPreloaded { field })
        }
    }

    /// Returns the records, warning if they were not preloaded.
    pub fn all(&self, field: &'static str) -> &[T] {
        if !self.preloaded && warn_unloaded() {
            warn!(
                "Read of '{}' ({} records) without preloading. Load it in bulk before aggregating.",
                field,
                self.items.len()
            );
        }
        &self.items
    }

    /// Returns the records without any preload check.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keeps only the records matching `keep`. The preload state is unchanged.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.items.retain(keep);
    }
}

impl<T> Default for Related<T> {
    fn default() -> Self {
        Self::preloaded(Vec::new())
    }
}

impl<T> From<Vec<T>> for Related<T> {
    fn from(items: Vec<T>) -> Self {
        Self::preloaded(items)
    }
}

impl<T: Serialize> Serialize for Related<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

// Anything read from a data file arrives fully materialized.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Related<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Related::preloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preload_assertion() {
        let mut rows = Related::deferred(vec![1, 2, 3]);
        assert!(matches!(
            rows.assert_preloaded("rows"),
            Err(CourseError::NotPreloaded { field: "rows" })
        ));

        rows.mark_preloaded();
        assert!(rows.assert_preloaded("rows").is_ok());
        assert_eq!(rows.all("rows"), &[1, 2, 3]);
    }

    #[test]
    fn test_deferred_still_readable() {
        let rows = Related::deferred(vec!["a", "b"]);
        assert_eq!(rows.all("rows").len(), 2);
        assert!(!rows.is_preloaded());
    }

    #[test]
    fn test_retain_keeps_state() {
        let mut rows = Related::deferred(vec![1, 2, 3, 4]);
        rows.retain(|n| n % 2 == 0);
        assert_eq!(rows.as_slice(), &[2, 4]);
        assert!(!rows.is_preloaded());
    }

    #[test]
    fn test_deserialized_is_preloaded() {
        let rows: Related<u32> = serde_json::from_str("[5, 6]").unwrap();
        assert!(rows.is_preloaded());
        assert_eq!(serde_json::to_string(&rows).unwrap(), "[5,6]");
    }

    #[test]
    fn test_warning_switch() {
        let previous = warn_unloaded();

        set_warn_unloaded(false);
        assert!(!warn_unloaded());
        let rows = Related::deferred(vec![7, 8]);
        assert_eq!(rows.all("rows"), &[7, 8]);

        set_warn_unloaded(true);
        assert!(warn_unloaded());
        assert_eq!(rows.all("rows"), &[7, 8]);
        assert!(!rows.is_preloaded());

        set_warn_unloaded(previous);
    }
}
