//! Closest-candidate selection.
//!
//! ```text
//! best = argmin_{c ∈ candidates, kind(c) = filter} |origin - position(c)|
//! ```
//!
//! Ties resolve to the first candidate in enumeration order. Candidates whose
//! distance is not finite (NaN or infinite positions) are never selected.

use glam::Vec3;

use crate::capability::{Kinded, Positioned};

/// Whether `candidate` passes an optional kind filter.
///
/// No filter passes everything; a filter only passes candidates carrying an
/// equal kind.
pub fn passes_filter<C: Kinded>(candidate: &C, filter: Option<&C::Kind>) -> bool {
    match filter {
        None => true,
        Some(wanted) => candidate.kind() == Some(wanted),
    }
}

/// Pick the candidate closest to `origin`.
///
/// Returns `None` when no candidate survives the kind filter.
///
/// # Examples
///
/// ```
/// use tether_space::{find_closest, Kinded, Positioned, Vec3};
///
/// struct Socket(Vec3, u8);
///
/// impl Positioned for Socket {
///     fn position(&self) -> Vec3 { self.0 }
/// }
///
/// impl Kinded for Socket {
///     type Kind = u8;
///     fn kind(&self) -> Option<&u8> { Some(&self.1) }
/// }
///
/// let sockets = [Socket(Vec3::X * 5.0, 1), Socket(Vec3::X * 2.0, 2)];
///
/// let any = find_closest(sockets.iter(), Vec3::ZERO, None);
/// assert_eq!(any.map(|s| s.1), Some(2));
///
/// let only_ones = find_closest(sockets.iter(), Vec3::ZERO, Some(&1));
/// assert_eq!(only_ones.map(|s| s.1), Some(1));
/// ```
pub fn find_closest<C, I>(candidates: I, origin: Vec3, filter: Option<&C::Kind>) -> Option<C>
where
    I: IntoIterator<Item = C>,
    C: Positioned + Kinded,
{
    let mut best: Option<(f32, C)> = None;

    for candidate in candidates {
        if !passes_filter(&candidate, filter) {
            continue;
        }

        let distance = origin.distance(candidate.position());
        if !distance.is_finite() {
            continue;
        }

        // Strict comparison keeps the earliest of equally distant candidates
        match &best {
            Some((closest, _)) if distance >= *closest => {}
            _ => best = Some((distance, candidate)),
        }
    }

    best.map(|(_, candidate)| candidate)
}

/// Every eligible candidate with its distance, nearest first.
///
/// The sort is stable, so equally distant candidates keep enumeration order
/// and the head of the result always agrees with [`find_closest`].
pub fn rank_by_distance<C, I>(
    candidates: I,
    origin: Vec3,
    filter: Option<&C::Kind>,
) -> Vec<(f32, C)>
where
    I: IntoIterator<Item = C>,
    C: Positioned + Kinded,
{
    let mut ranked: Vec<(f32, C)> = candidates
        .into_iter()
        .filter(|c| passes_filter(c, filter))
        .map(|c| (origin.distance(c.position()), c))
        .filter(|(d, _)| d.is_finite())
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
}
