//! Kind compatibility between an attachable and its candidate slots.
//!
//! A policy answers two questions with the same rule:
//! - which kind, if any, selection should filter on
//! - whether a plug into a given slot is allowed
//!
//! [`AnyKind`] accepts everything. [`MatchKind`] narrows both selection and
//! attach eligibility to slots whose kind equals its own.

use tether_space::Kinded;

/// Selection filter and plug check for slots of type `S`.
pub trait Compatibility<S: Kinded> {
    /// Kind to filter candidates on during selection.
    fn kind_filter(&self) -> Option<&S::Kind>;

    /// Whether plugging into `slot` is allowed.
    fn accepts(&self, slot: &S) -> bool;
}

/// No kind restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnyKind;

impl<S: Kinded> Compatibility<S> for AnyKind {
    fn kind_filter(&self) -> Option<&S::Kind> {
        None
    }

    fn accepts(&self, _slot: &S) -> bool {
        true
    }
}

/// Only slots carrying an equal kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchKind<K> {
    kind: K,
}

impl<K> MatchKind<K> {
    pub const fn new(kind: K) -> Self {
        Self { kind }
    }

    /// The attachable's own kind.
    pub fn kind(&self) -> &K {
        &self.kind
    }
}

impl<K: PartialEq, S: Kinded<Kind = K>> Compatibility<S> for MatchKind<K> {
    fn kind_filter(&self) -> Option<&K> {
        Some(&self.kind)
    }

    fn accepts(&self, slot: &S) -> bool {
        slot.kind() == Some(&self.kind)
    }
}
