//! Utility helpers for tests.
//!
//! World fixtures shared by the integration tests, plus a [`Recorder`] that
//! captures callback invocations so tests can assert on their order.

use std::cell::RefCell;
use std::rc::Rc;

use maps_handler::{
    Area, AreaCommand, Bounds, Location, Map, MapLibrary, PreThing, PreThingGroup, Placement,
};
use serde_json::json;

/// Coin placements with the given left edges, each a unit square at `y = 0`.
#[must_use]
pub fn row_of(lefts: &[f64]) -> Vec<Placement> {
    lefts
        .iter()
        .map(|&left| Placement::new("Coin", left, 0.0, 1.0, 1.0))
        .collect()
}

/// Zero-size descriptors with the given left edges, sorted into a group.
///
/// # Examples
/// ```
/// use maps_handler::Direction;
/// let group = test_utils::group_of(&[10.0, 0.0]);
/// assert!(group.is_sorted(Direction::XInc));
/// ```
#[must_use]
pub fn group_of(lefts: &[f64]) -> PreThingGroup {
    let things = lefts
        .iter()
        .map(|&left| {
            PreThing::new(
                "Coin",
                Bounds::new(0.0, left, 0.0, left),
                serde_json::Value::Null,
            )
        })
        .collect();
    PreThingGroup::sorted(things)
}

/// A two-area map modelled on a classic first level.
///
/// `Overworld` holds a row of coins and blocks plus a stretch and an after
/// command; `Underworld` has a single pipe and no commands. The locations
/// `start` and `pipe` enter them respectively; `lost` points at an area the
/// map does not define.
#[must_use]
pub fn sample_map() -> Map {
    let mut overworld = Area::new("Overworld");
    overworld.boundaries = Bounds::new(0.0, 3584.0, 480.0, 0.0);
    overworld
        .attributes
        .insert("setting".into(), json!("Overworld"));
    overworld.creation = row_of(&[0.0, 64.0, 128.0, 192.0]);
    overworld.creation.extend(
        [96.0, 160.0]
            .into_iter()
            .map(|left| Placement::new("Block", left, 32.0, 8.0, 8.0).in_group("Solid")),
    );
    overworld.stretches = vec![AreaCommand::new("Floor").with_arg("width", 3584)];
    overworld.afters = vec![AreaCommand::new("Castle").with_arg("x", 3200)];

    let mut underworld = Area::new("Underworld");
    underworld
        .attributes
        .insert("setting".into(), json!("Underworld"));
    underworld.creation = vec![Placement::new("Pipe", 16.0, 0.0, 32.0, 32.0).in_group("Solid")];

    let mut pipe = Location::new("pipe", "Underworld");
    pipe.entry = Some("PipeVertical".into());

    Map::new("1-1")
        .with_area(overworld)
        .with_area(underworld)
        .with_location(Location::new("start", "Overworld"))
        .with_location(pipe)
        .with_location(Location::new("lost", "Nowhere"))
}

/// A library holding only [`sample_map`].
///
/// # Panics
/// Panics if the library rejects the map.
#[must_use]
pub fn sample_library() -> MapLibrary {
    MapLibrary::new([sample_map()]).expect("a single map cannot collide")
}

/// Shared log of callback invocations.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A spawn callback logging `"<prefix> <title>@<left>"`.
    pub fn things(&self, prefix: &'static str) -> impl FnMut(&PreThing) + 'static {
        let events = Rc::clone(&self.events);
        move |thing| {
            events
                .borrow_mut()
                .push(format!("{prefix} {}@{}", thing.title, thing.bounds.left));
        }
    }

    /// A command interpreter logging `"<prefix> <kind> <index>/<len>"`.
    pub fn commands(
        &self,
        prefix: &'static str,
    ) -> impl FnMut(&AreaCommand, usize, &[AreaCommand]) + 'static {
        let events = Rc::clone(&self.events);
        move |command, index, all| {
            events
                .borrow_mut()
                .push(format!("{prefix} {} {index}/{}", command.kind, all.len()));
        }
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
