//! Turning opaque range handles into slots.
//!
//! The host reports whatever entered the trigger volume. Most of those
//! handles are not slots; a resolver returns `None` for them and selection
//! skips them silently. A slot that has been dropped resolves to `None` too.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};

/// Lookup from a range handle to a live slot.
pub trait SlotResolver<H, S> {
    fn resolve(&self, handle: &H) -> Option<Rc<S>>;
}

impl<H, S, F> SlotResolver<H, S> for F
where
    F: Fn(&H) -> Option<Rc<S>>,
{
    fn resolve(&self, handle: &H) -> Option<Rc<S>> {
        self(handle)
    }
}

/// Handle-to-slot table holding only weak references.
///
/// Registering a slot never extends its lifetime. Once the owner drops it,
/// the entry resolves to `None` until [`SlotDirectory::prune`] removes it.
#[derive(Debug)]
pub struct SlotDirectory<H, S> {
    slots: HashMap<H, Weak<S>>,
}

impl<H: Hash + Eq, S> Default for SlotDirectory<H, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hash + Eq, S> SlotDirectory<H, S> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Map `handle` to `slot`, replacing any previous entry.
    pub fn insert(&mut self, handle: H, slot: &Rc<S>) {
        self.slots.insert(handle, Rc::downgrade(slot));
    }

    /// Forget `handle`. Returns `true` if it was mapped.
    pub fn remove(&mut self, handle: &H) -> bool {
        self.slots.remove(handle).is_some()
    }

    /// Drop entries whose slot no longer exists. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.strong_count() > 0);
        before - self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<H: Hash + Eq, S> SlotResolver<H, S> for SlotDirectory<H, S> {
    fn resolve(&self, handle: &H) -> Option<Rc<S>> {
        self.slots.get(handle).and_then(Weak::upgrade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_handle_resolves_none() {
        let directory: SlotDirectory<u32, String> = SlotDirectory::new();
        assert!(directory.resolve(&1).is_none());
    }

    #[test]
    fn registered_slot_resolves() {
        let slot = Rc::new("socket".to_string());
        let mut directory = SlotDirectory::new();
        directory.insert(1u32, &slot);

        let found = directory.resolve(&1).unwrap();
        assert!(Rc::ptr_eq(&found, &slot));
        assert_eq!(Rc::strong_count(&slot), 2);
    }

    #[test]
    fn directory_does_not_own_slots() {
        let slot = Rc::new(5u8);
        let mut directory = SlotDirectory::new();
        directory.insert("a", &slot);
        assert_eq!(Rc::strong_count(&slot), 1);

        drop(slot);
        assert!(directory.resolve(&"a").is_none());
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.prune(), 1);
        assert!(directory.is_empty());
    }

    #[test]
    fn remove_forgets_handle() {
        let slot = Rc::new(0u8);
        let mut directory = SlotDirectory::new();
        directory.insert(3u8, &slot);
        assert!(directory.remove(&3));
        assert!(!directory.remove(&3));
        assert!(directory.resolve(&3).is_none());
    }

    #[test]
    fn closures_are_resolvers() {
        let even = Rc::new(0u8);
        let resolver = |handle: &u32| (handle % 2 == 0).then(|| Rc::clone(&even));
        assert!(resolver.resolve(&4).is_some());
        assert!(resolver.resolve(&3).is_none());
    }
}
