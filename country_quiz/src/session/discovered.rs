//! Countries found in the current session.

use crate::catalog::CountryId;
use std::collections::HashSet;

/// Grow-only set of discovered ids. Only [`DiscoveredSet::clear`] shrinks it.
#[derive(Clone, Debug, Default)]
pub struct DiscoveredSet {
    ids: HashSet<CountryId>,
}

impl DiscoveredSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the id was already present.
    pub(crate) fn insert(&mut self, id: CountryId) -> bool {
        self.ids.insert(id)
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = DiscoveredSet::new();
        assert!(set.insert(CountryId::new("076")));
        assert!(!set.insert(CountryId::new("076")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_contains_by_str() {
        let mut set = DiscoveredSet::new();
        for id in ["250", "076", "392"] {
            set.insert(CountryId::new(id));
        }
        assert_eq!(set.len(), 3);
        assert!(set.contains("076"));
        assert!(!set.contains("840"));
    }

    #[test]
    fn test_clear_empties_set() {
        let mut set = DiscoveredSet::new();
        set.insert(CountryId::new("076"));
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains("076"));
    }
}
