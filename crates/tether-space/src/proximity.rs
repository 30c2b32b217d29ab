//! Candidates currently inside the attachable's trigger range.
//!
//! Membership is a pure mirror of the enter/exit events the host delivered:
//! duplicates collapse and removing a non-member is a no-op. Enumeration
//! follows first-entry order, and removal keeps the survivors in that order,
//! so selection ties break the same way on every run.

use std::hash::Hash;

use indexmap::IndexSet;

/// Deduplicated set of opaque candidate handles.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProximitySet<H: Hash + Eq> {
    members: IndexSet<H>,
}

impl<H: Hash + Eq> Default for ProximitySet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hash + Eq> ProximitySet<H> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            members: IndexSet::new(),
        }
    }

    /// Record that `candidate` entered range.
    ///
    /// Returns `true` if it was not already a member.
    pub fn register(&mut self, candidate: H) -> bool {
        self.members.insert(candidate)
    }

    /// Record that `candidate` left range.
    ///
    /// Returns `true` if it was a member.
    pub fn unregister(&mut self, candidate: &H) -> bool {
        self.members.shift_remove(candidate)
    }

    pub fn contains(&self, candidate: &H) -> bool {
        self.members.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in first-entry order.
    pub fn iter(&self) -> impl Iterator<Item = &H> + '_ {
        self.members.iter()
    }

    /// Forget every member, e.g. when the host teleports the object.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}

impl<'a, H: Hash + Eq> IntoIterator for &'a ProximitySet<H> {
    type Item = &'a H;
    type IntoIter = indexmap::set::Iter<'a, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<H: Hash + Eq> FromIterator<H> for ProximitySet<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn starts_empty() {
        let set: ProximitySet<u32> = ProximitySet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn register_is_idempotent() {
        let mut set = ProximitySet::new();
        assert!(set.register("socket-a"));
        assert!(!set.register("socket-a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unregister_non_member_is_noop() {
        let mut set = ProximitySet::new();
        set.register(7u32);
        assert!(!set.unregister(&8));
        assert_eq!(set.len(), 1);
        assert!(set.unregister(&7));
        assert!(!set.unregister(&7));
        assert!(set.is_empty());
    }

    #[test]
    fn removal_keeps_entry_order() {
        let mut set: ProximitySet<u32> = [3, 1, 4, 5].into_iter().collect();
        set.unregister(&1);
        let order: Vec<_> = set.iter().copied().collect();
        assert_eq!(order, vec![3, 4, 5]);
    }

    #[test]
    fn reentry_moves_to_back() {
        let mut set = ProximitySet::new();
        set.register('a');
        set.register('b');
        set.unregister(&'a');
        set.register('a');
        let order: Vec<_> = (&set).into_iter().copied().collect();
        assert_eq!(order, vec!['b', 'a']);
    }

    #[test]
    fn clear_drops_everything() {
        let mut set: ProximitySet<u8> = (0..10).collect();
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(&3));
    }

    proptest! {
        #[test]
        fn membership_is_net_effect(
            ops in proptest::collection::vec((any::<bool>(), 0u8..16), 0..64)
        ) {
            let mut set = ProximitySet::new();
            let mut model = HashSet::new();

            for (enter, handle) in ops {
                if enter {
                    prop_assert_eq!(set.register(handle), model.insert(handle));
                } else {
                    prop_assert_eq!(set.unregister(&handle), model.remove(&handle));
                }
            }

            prop_assert_eq!(set.len(), model.len());
            for handle in set.iter() {
                prop_assert!(model.contains(handle));
            }
        }
    }
}
