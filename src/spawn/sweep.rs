//! Turning a moving viewport into spawn and unspawn windows.
//!
//! The scanner reads a box through the direction's leading and trailing
//! bounds. For the increasing directions those are the viewport's own near
//! and far edges; for the decreasing ones they are mirrored, so the box
//! handed to the scanner has its horizontal (or vertical) edges swapped.

use std::ops::AddAssign;

use crate::geometry::{Bounds, Direction};

/// Descriptors toggled by one or more sweep steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Descriptors newly spawned.
    pub spawned: usize,
    /// Descriptors newly unspawned.
    pub unspawned: usize,
}

impl AddAssign for SweepReport {
    fn add_assign(&mut self, other: Self) {
        self.spawned += other.spawned;
        self.unspawned += other.unspawned;
    }
}

/// Box that selects, in `direction`'s order, every descriptor whose sort
/// edge lies within the viewport.
#[must_use]
pub const fn leading_window(direction: Direction, viewport: Bounds) -> Bounds {
    match direction {
        Direction::XInc | Direction::YInc => viewport,
        Direction::XDec => Bounds::new(viewport.top, viewport.left, viewport.bottom, viewport.right),
        Direction::YDec => Bounds::new(viewport.bottom, viewport.right, viewport.top, viewport.left),
    }
}

/// Order and box selecting every descriptor left wholly behind a viewport
/// travelling in `direction`.
///
/// Scans the opposite order so the comparison is against the descriptors'
/// far edges: moving right, anything whose right edge is at or before the
/// viewport's left edge is behind it.
#[must_use]
pub fn trailing_window(direction: Direction, viewport: Bounds) -> (Direction, Bounds) {
    let far = f64::INFINITY;
    let bounds = match direction {
        Direction::XInc => Bounds::new(viewport.top, -far, viewport.bottom, viewport.left),
        Direction::XDec => Bounds::new(viewport.top, far, viewport.bottom, viewport.right),
        Direction::YInc => Bounds::new(viewport.top, viewport.right, -far, viewport.left),
        Direction::YDec => Bounds::new(viewport.bottom, viewport.right, far, viewport.left),
    };
    (direction.opposite(), bounds)
}
