//! Lazy entity placeholders and the per-area containers that group them.
//!
//! A [`PreThing`] is everything needed to instantiate an entity later, plus
//! the `spawned` flag the spawn applier toggles. Descriptors sharing a
//! category live in a [`PreThingGroup`], which keeps one arena of descriptors
//! and four index orders over it, one per [`Direction`]. Toggling a
//! descriptor through any order is therefore visible through all of them.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::geometry::{Bounds, Direction, Edge};

/// A not-yet-materialised entity placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PreThing {
    /// Kind of entity to build, e.g. `"Goomba"`.
    pub title: String,
    /// World-space extent.
    pub bounds: Bounds,
    /// Opaque construction data handed to whoever instantiates the entity.
    pub settings: Value,
    spawned: bool,
}

impl PreThing {
    /// Creates an unspawned descriptor.
    pub fn new(title: impl Into<String>, bounds: Bounds, settings: Value) -> Self {
        Self {
            title: title.into(),
            bounds,
            settings,
            spawned: false,
        }
    }

    /// Whether the descriptor is currently revealed.
    #[must_use]
    pub const fn spawned(&self) -> bool {
        self.spawned
    }

    /// Reads one edge of the descriptor's extent.
    #[must_use]
    pub const fn edge(&self, edge: Edge) -> f64 {
        self.bounds.edge(edge)
    }

    pub(crate) const fn set_spawned(&mut self, spawned: bool) {
        self.spawned = spawned;
    }
}

/// Descriptors of one category with an order per travel direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreThingGroup {
    things: Vec<PreThing>,
    orders: [Vec<usize>; 4],
}

impl PreThingGroup {
    /// Builds a group, sorting each direction's order by its edge.
    ///
    /// Ties keep insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use maps_handler::{Bounds, Direction, PreThing, PreThingGroup};
    /// use serde_json::Value;
    ///
    /// let group = PreThingGroup::sorted(vec![
    ///     PreThing::new("Brick", Bounds::new(0.0, 24.0, 8.0, 16.0), Value::Null),
    ///     PreThing::new("Brick", Bounds::new(0.0, 8.0, 8.0, 0.0), Value::Null),
    /// ]);
    /// let lefts: Vec<f64> = group.iter(Direction::XInc).map(|t| t.bounds.left).collect();
    /// assert_eq!(lefts, vec![0.0, 16.0]);
    /// ```
    #[must_use]
    pub fn sorted(things: Vec<PreThing>) -> Self {
        let orders = Direction::ALL.map(|direction| {
            let edge = direction.edge();
            let mut order: Vec<usize> = (0..things.len()).collect();
            order.sort_by_key(|&index| {
                ordered_float::OrderedFloat(things.get(index).map_or(0.0, |t| t.edge(edge)))
            });
            order
        });
        Self { things, orders }
    }

    /// Builds a group from caller-supplied orders without sorting them.
    ///
    /// Each order must be a permutation of `0..things.len()` and should be
    /// ascending by the direction's edge; the scanner relies on the latter
    /// but never checks it. Out-of-range indices are dropped.
    #[must_use]
    pub fn from_orders(things: Vec<PreThing>, orders: [Vec<usize>; 4]) -> Self {
        let len = things.len();
        let kept = orders.map(|order| order.into_iter().filter(|&i| i < len).collect::<Vec<_>>());
        Self {
            things,
            orders: kept,
        }
    }

    /// Number of descriptors in the group.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.things.len()
    }

    /// Whether the group has no descriptors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// Arena indices in `direction`'s order.
    #[must_use]
    pub fn order(&self, direction: Direction) -> &[usize] {
        self.orders
            .get(direction.index())
            .map_or(&[][..], Vec::as_slice)
    }

    /// Descriptors in `direction`'s order.
    pub fn iter(&self, direction: Direction) -> impl Iterator<Item = &PreThing> + '_ {
        self.order(direction)
            .iter()
            .filter_map(|&index| self.things.get(index))
    }

    /// Descriptors in insertion order.
    #[must_use]
    pub fn things(&self) -> &[PreThing] {
        &self.things
    }

    /// Whether `direction`'s order is ascending by its edge.
    ///
    /// The spawn scan assumes this without checking; callers assembling
    /// groups by hand can use it to validate their input.
    #[must_use]
    pub fn is_sorted(&self, direction: Direction) -> bool {
        let edge = direction.edge();
        let edges: Vec<f64> = self.iter(direction).map(|t| t.edge(edge)).collect();
        edges.windows(2).all(|pair| match pair {
            [a, b] => a <= b,
            _ => true,
        })
    }

    pub(crate) fn parts_mut(&mut self, direction: Direction) -> (&mut [PreThing], &[usize]) {
        let order = self
            .orders
            .get(direction.index())
            .map_or(&[][..], Vec::as_slice);
        (&mut self.things, order)
    }
}

/// Per-area mapping from group name to group.
///
/// Iteration is by group name so spawn callbacks fire in a reproducible
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreThings {
    groups: BTreeMap<String, PreThingGroup>,
}

impl PreThings {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a group.
    pub fn insert(&mut self, name: impl Into<String>, group: PreThingGroup) {
        self.groups.insert(name.into(), group);
    }

    /// Looks up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&PreThingGroup> {
        self.groups.get(name)
    }

    /// Groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &PreThingGroup)> + '_ {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = (&str, &mut PreThingGroup)> + '_ {
        self.groups
            .iter_mut()
            .map(|(name, group)| (name.as_str(), group))
    }

    /// Total number of descriptors across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(PreThingGroup::len).sum()
    }

    /// Whether no group holds any descriptor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every currently spawned descriptor, grouped by name order.
    pub fn spawned(&self) -> impl Iterator<Item = &PreThing> + '_ {
        self.groups
            .values()
            .flat_map(|group| group.things().iter())
            .filter(|thing| thing.spawned())
    }
}

impl FromIterator<(String, PreThingGroup)> for PreThings {
    fn from_iter<I: IntoIterator<Item = (String, PreThingGroup)>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thing_at(left: f64, top: f64) -> PreThing {
        PreThing::new("Block", Bounds::new(top, left + 8.0, top + 8.0, left), Value::Null)
    }

    #[test]
    fn sorted_orders_each_direction_by_its_edge() {
        let group = PreThingGroup::sorted(vec![thing_at(10.0, 0.0), thing_at(0.0, 20.0), thing_at(5.0, 10.0)]);
        for direction in Direction::ALL {
            assert!(group.is_sorted(direction), "{direction} order is not sorted");
        }
        assert_eq!(group.order(Direction::XInc), &[1, 2, 0]);
        assert_eq!(group.order(Direction::YInc), &[0, 2, 1]);
    }

    #[test]
    fn toggling_through_one_order_is_seen_by_all() {
        let mut group = PreThingGroup::sorted(vec![thing_at(10.0, 0.0), thing_at(0.0, 20.0)]);
        {
            let (things, order) = group.parts_mut(Direction::XInc);
            let first = order.first().copied().expect("non-empty order");
            things.get_mut(first).expect("index in range").set_spawned(true);
        }
        let spawned_by_top: Vec<bool> = group.iter(Direction::YDec).map(PreThing::spawned).collect();
        assert_eq!(spawned_by_top, vec![false, true]);
    }

    #[test]
    fn from_orders_keeps_caller_order_and_drops_bad_indices() {
        let group = PreThingGroup::from_orders(
            vec![thing_at(10.0, 0.0), thing_at(0.0, 0.0)],
            [vec![0, 1, 7], vec![], vec![1], vec![0, 1]],
        );
        assert_eq!(group.order(Direction::XInc), &[0, 1]);
        assert!(!group.is_sorted(Direction::XInc));
        assert!(group.order(Direction::XDec).is_empty());
    }

    #[test]
    fn container_iterates_groups_by_name() {
        let container: PreThings = [
            ("Scenery".to_owned(), PreThingGroup::sorted(vec![thing_at(0.0, 0.0)])),
            ("Character".to_owned(), PreThingGroup::default()),
        ]
        .into_iter()
        .collect();
        let names: Vec<&str> = container.groups().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Character", "Scenery"]);
        assert_eq!(container.len(), 1);
        assert_eq!(container.spawned().count(), 0);
    }
}
