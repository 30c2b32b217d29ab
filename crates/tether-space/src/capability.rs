//! Capabilities a selectable candidate exposes.
//!
//! Selection only needs two facts about a candidate: where it is, and which
//! kind tag (if any) it carries. Both are blanket-implemented for references
//! and shared pointers so callers can select over `&T`, `Rc<T>` or `Arc<T>`
//! without unwrapping.

use std::rc::Rc;
use std::sync::Arc;

use glam::Vec3;

/// Something with a world-space position.
pub trait Positioned {
    /// Current world position.
    fn position(&self) -> Vec3;
}

/// Something that may carry a compatibility tag.
///
/// Tags are compared by value equality only. A candidate without a tag never
/// matches a kind filter.
pub trait Kinded {
    /// The tag type.
    type Kind: PartialEq;

    /// The tag, if this candidate has one.
    fn kind(&self) -> Option<&Self::Kind>;
}

impl<T: Positioned + ?Sized> Positioned for &T {
    #[inline]
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

impl<T: Positioned + ?Sized> Positioned for Rc<T> {
    #[inline]
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

impl<T: Positioned + ?Sized> Positioned for Arc<T> {
    #[inline]
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

impl<T: Kinded + ?Sized> Kinded for &T {
    type Kind = T::Kind;

    #[inline]
    fn kind(&self) -> Option<&Self::Kind> {
        (**self).kind()
    }
}

impl<T: Kinded + ?Sized> Kinded for Rc<T> {
    type Kind = T::Kind;

    #[inline]
    fn kind(&self) -> Option<&Self::Kind> {
        (**self).kind()
    }
}

impl<T: Kinded + ?Sized> Kinded for Arc<T> {
    type Kind = T::Kind;

    #[inline]
    fn kind(&self) -> Option<&Self::Kind> {
        (**self).kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Peg(Vec3, Option<&'static str>);

    impl Positioned for Peg {
        fn position(&self) -> Vec3 {
            self.0
        }
    }

    impl Kinded for Peg {
        type Kind = &'static str;

        fn kind(&self) -> Option<&Self::Kind> {
            self.1.as_ref()
        }
    }

    #[test]
    fn pointers_forward_position() {
        let peg = Peg(Vec3::new(1.0, 2.0, 3.0), None);
        let shared = Rc::new(Peg(Vec3::X, None));
        let threaded = Arc::new(Peg(Vec3::Y, None));

        assert_eq!((&peg).position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(shared.position(), Vec3::X);
        assert_eq!(threaded.position(), Vec3::Y);
    }

    #[test]
    fn pointers_forward_kind() {
        let shared = Rc::new(Peg(Vec3::ZERO, Some("usb")));
        assert_eq!(shared.kind(), Some(&"usb"));
        assert_eq!((&Peg(Vec3::ZERO, None)).kind(), None);
    }
}
