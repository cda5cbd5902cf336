//! Applying spawn and unspawn actions across an area's descriptors.
//!
//! [`apply_spawn_action`] walks every group of a [`PreThings`] container in
//! name order, asks the [`window`] scanner which positions of the group's
//! direction order the query box covers, and flips each covered descriptor
//! whose `spawned` flag differs from the requested status. The callback fires
//! once per flip, so repeating an identical call is silent.
//!
//! [`sweep`] derives those windows from a viewport moving through an area.

pub mod sweep;
pub mod window;

use log::trace;

use crate::geometry::{Bounds, Direction};
use crate::prething::{PreThing, PreThings};

/// Sets every descriptor inside the window to `spawned` and reports each
/// change to `callback`.
///
/// Returns the number of descriptors whose flag changed.
pub fn apply_spawn_action<F>(
    pre_things: &mut PreThings,
    mut callback: F,
    spawned: bool,
    direction: Direction,
    bounds: &Bounds,
) -> usize
where
    F: FnMut(&PreThing),
{
    let mut changed = 0;
    for (name, group) in pre_things.groups_mut() {
        if group.order(direction).is_empty() {
            continue;
        }
        let positions = group.window(direction, bounds);
        if positions.is_empty() {
            continue;
        }
        let (things, order) = group.parts_mut(direction);
        let covered = order.get(positions).unwrap_or_default();
        for &index in covered {
            let Some(thing) = things.get_mut(index) else {
                continue;
            };
            if thing.spawned() == spawned {
                continue;
            }
            thing.set_spawned(spawned);
            trace!(
                "{} {name}/{} at ({}, {})",
                if spawned { "spawned" } else { "unspawned" },
                thing.title,
                thing.bounds.left,
                thing.bounds.top
            );
            callback(thing);
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prething::PreThingGroup;
    use serde_json::Value;

    fn container(lefts: &[f64]) -> PreThings {
        let things = lefts
            .iter()
            .map(|&left| PreThing::new("Coin", Bounds::new(0.0, left, 0.0, left), Value::Null))
            .collect();
        let mut pre_things = PreThings::new();
        pre_things.insert("Solid", PreThingGroup::sorted(things));
        pre_things.insert("Scenery", PreThingGroup::default());
        pre_things
    }

    #[test]
    fn spawns_only_the_covered_descriptors() {
        let mut pre_things = container(&[0.0, 5.0, 10.0, 15.0]);
        let mut seen = Vec::new();
        let window = Bounds::new(0.0, 12.0, 0.0, 4.0);
        let changed = apply_spawn_action(
            &mut pre_things,
            |thing| seen.push(thing.bounds.left),
            true,
            Direction::XInc,
            &window,
        );
        assert_eq!(changed, 2);
        assert_eq!(seen, vec![5.0, 10.0]);
        let spawned: Vec<f64> = pre_things.spawned().map(|t| t.bounds.left).collect();
        assert_eq!(spawned, vec![5.0, 10.0]);
    }

    #[test]
    fn repeating_the_action_fires_nothing() {
        let mut pre_things = container(&[0.0, 5.0, 10.0, 15.0]);
        let window = Bounds::new(0.0, 20.0, 0.0, 0.0);
        let mut calls = 0;
        apply_spawn_action(&mut pre_things, |_| calls += 1, true, Direction::XInc, &window);
        apply_spawn_action(&mut pre_things, |_| calls += 1, true, Direction::XInc, &window);
        assert_eq!(calls, 4);
    }

    #[test]
    fn unspawning_reverses_spawning() {
        let mut pre_things = container(&[0.0, 5.0, 10.0, 15.0]);
        let window = Bounds::new(0.0, 12.0, 0.0, 4.0);
        apply_spawn_action(&mut pre_things, |_| {}, true, Direction::XInc, &window);
        let mut unspawned = Vec::new();
        apply_spawn_action(
            &mut pre_things,
            |thing| unspawned.push(thing.bounds.left),
            false,
            Direction::XInc,
            &window,
        );
        assert_eq!(unspawned, vec![5.0, 10.0]);
        assert_eq!(pre_things.spawned().count(), 0);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let mut pre_things = container(&[]);
        let mut calls = 0;
        let changed = apply_spawn_action(
            &mut pre_things,
            |_| calls += 1,
            true,
            Direction::YDec,
            &Bounds::new(-100.0, 100.0, 100.0, -100.0),
        );
        assert_eq!((changed, calls), (0, 0));
    }
}
