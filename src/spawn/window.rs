//! Spawn window scanner.
//!
//! Given one direction-sorted descriptor order and a query box, finds the
//! contiguous run of positions whose sort edge lies between the box's
//! leading and trailing bounds. Both ends are found by a linear walk from the
//! respective end of the order rather than a binary search, so orders that
//! are only almost sorted near the window's edges still produce sensible
//! windows.

use std::ops::Range;

use crate::geometry::{Bounds, Direction};
use crate::prething::{PreThing, PreThingGroup};

/// Box bound compared against the first descriptors of the window.
#[must_use]
pub const fn leading_bound(direction: Direction, bounds: &Bounds) -> f64 {
    bounds.edge(direction.edge())
}

/// Box bound compared against the last descriptors of the window.
#[must_use]
pub const fn trailing_bound(direction: Direction, bounds: &Bounds) -> f64 {
    bounds.edge(direction.opposite().edge())
}

/// First position with an edge at or past `leading`, or `len` if none.
fn find_start(len: usize, edge_at: &impl Fn(usize) -> f64, leading: f64) -> usize {
    (0..len).find(|&i| edge_at(i) >= leading).unwrap_or(len)
}

/// One past the last position with an edge at or before `trailing`, or `0`
/// if none.
fn find_end(len: usize, edge_at: &impl Fn(usize) -> f64, trailing: f64) -> usize {
    (0..len)
        .rev()
        .find(|&i| edge_at(i) <= trailing)
        .map_or(0, |i| i + 1)
}

/// Positions `0..len` of an order whose edges, read through `edge_at`, fall
/// inside the window.
///
/// The result is half-open; it is empty whenever no position satisfies both
/// bounds, including when the start lands past the end.
pub fn find_window(
    direction: Direction,
    len: usize,
    edge_at: impl Fn(usize) -> f64,
    bounds: &Bounds,
) -> Range<usize> {
    let start = find_start(len, &edge_at, leading_bound(direction, bounds));
    let end = find_end(len, &edge_at, trailing_bound(direction, bounds));
    start..end.max(start)
}

/// [`find_window`] over a slice already sorted for `direction`.
///
/// # Examples
///
/// ```
/// use maps_handler::spawn::window::window_for;
/// use maps_handler::{Bounds, Direction, PreThing};
/// use serde_json::Value;
///
/// let row: Vec<PreThing> = [0.0, 5.0, 10.0, 15.0]
///     .into_iter()
///     .map(|left| PreThing::new("Coin", Bounds::new(0.0, left, 0.0, left), Value::Null))
///     .collect();
/// let window = window_for(Direction::XInc, &row, &Bounds::new(0.0, 12.0, 0.0, 4.0));
/// assert_eq!(window, 1..3);
/// ```
#[must_use]
pub fn window_for(direction: Direction, sorted: &[PreThing], bounds: &Bounds) -> Range<usize> {
    let edge = direction.edge();
    find_window(
        direction,
        sorted.len(),
        |i| sorted.get(i).map_or(f64::NAN, |thing| thing.edge(edge)),
        bounds,
    )
}

impl PreThingGroup {
    /// Positions within `direction`'s order that the window covers.
    #[must_use]
    pub fn window(&self, direction: Direction, bounds: &Bounds) -> Range<usize> {
        let edge = direction.edge();
        let things = self.things();
        let order = self.order(direction);
        find_window(
            direction,
            order.len(),
            |i| {
                order
                    .get(i)
                    .and_then(|&index| things.get(index))
                    .map_or(f64::NAN, |thing| thing.edge(edge))
            },
            bounds,
        )
    }
}
