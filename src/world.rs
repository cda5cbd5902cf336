//! Authored world definitions: maps, their areas and locations.
//!
//! These types deserialise straight from world files. An [`Area`] carries
//! the [`Placement`]s a repository turns into descriptors, the command lists
//! dispatched when it is entered and the attributes mirrored into the screen
//! registry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

use crate::geometry::Bounds;

/// Declarative instruction run by a stretch or after interpreter.
///
/// Only `kind` is interpreted here; everything else is passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaCommand {
    /// Which routine the interpreter should run.
    pub kind: String,
    /// Remaining fields of the command.
    #[serde(flatten)]
    pub args: JsonMap<String, Value>,
}

impl AreaCommand {
    /// Creates a command without arguments.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: JsonMap::new(),
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

/// One authored entity inside an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Entity kind.
    pub title: String,
    /// Descriptor group; defaults to the title.
    #[serde(default)]
    pub group: Option<String>,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    #[serde(default)]
    pub width: f64,
    /// Vertical extent.
    #[serde(default)]
    pub height: f64,
    /// Construction data forwarded untouched.
    #[serde(default)]
    pub settings: Value,
}

impl Placement {
    /// Places a `title` entity of the given size with its top-left corner at
    /// `(x, y)`.
    #[must_use]
    pub fn new(title: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            title: title.into(),
            group: None,
            x,
            y,
            width,
            height,
            settings: Value::Null,
        }
    }

    /// Files the placement under `group` instead of its title.
    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Name of the descriptor group this placement belongs to.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.title)
    }

    /// World-space extent.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin(self.x, self.y, self.width, self.height)
    }
}

/// A named region of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Area name, unique within its map.
    pub name: String,
    /// Current boundary box; zeroed every time the area is entered.
    #[serde(default)]
    pub boundaries: Bounds,
    /// Commands dispatched to the stretch interpreter on entry.
    #[serde(default)]
    pub stretches: Vec<AreaCommand>,
    /// Commands dispatched to the after interpreter on entry.
    #[serde(default)]
    pub afters: Vec<AreaCommand>,
    /// Values mirrored into the screen registry, e.g. `"setting"`.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
    /// Entities authored in this area.
    #[serde(default)]
    pub creation: Vec<Placement>,
}

impl Area {
    /// Creates an empty area.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            boundaries: Bounds::ZERO,
            stretches: Vec::new(),
            afters: Vec::new(),
            attributes: BTreeMap::new(),
            creation: Vec::new(),
        }
    }

    /// Reads a mirrored attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// Named entry point into an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Location name, unique within its map.
    pub name: String,
    /// Name of the area entered.
    pub area: String,
    /// Horizontal entry offset.
    #[serde(default)]
    pub x: f64,
    /// Vertical entry offset.
    #[serde(default)]
    pub y: f64,
    /// Routine the game runs on entry, e.g. `"Walking"`.
    #[serde(default)]
    pub entry: Option<String>,
}

impl Location {
    /// Creates a location entering `area` at its origin.
    #[must_use]
    pub fn new(name: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            area: area.into(),
            x: 0.0,
            y: 0.0,
            entry: None,
        }
    }
}

/// A named registry of areas and the locations that enter them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    /// Map name.
    pub name: String,
    /// Areas keyed by name.
    #[serde(default, with = "named")]
    pub areas: BTreeMap<String, Area>,
    /// Locations keyed by name.
    #[serde(default, with = "named")]
    pub locations: BTreeMap<String, Location>,
}

impl Map {
    /// Creates an empty map.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            areas: BTreeMap::new(),
            locations: BTreeMap::new(),
        }
    }

    /// Adds an area, replacing any of the same name.
    #[must_use]
    pub fn with_area(mut self, area: Area) -> Self {
        self.areas.insert(area.name.clone(), area);
        self
    }

    /// Adds a location, replacing any of the same name.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.insert(location.name.clone(), location);
        self
    }

    /// Looks up a location.
    #[must_use]
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.get(name)
    }

    /// Looks up an area.
    #[must_use]
    pub fn area(&self, name: &str) -> Option<&Area> {
        self.areas.get(name)
    }
}

/// Items that carry their own key.
trait Named {
    fn key(&self) -> &str;
}

impl Named for Area {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Named for Location {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Serialises name-keyed maps as plain lists so world files do not repeat
/// each name as a key.
mod named {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Named;

    pub(super) fn serialize<T, S>(items: &BTreeMap<String, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        serializer.collect_seq(items.values())
    }

    pub(super) fn deserialize<'de, T, D>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
    where
        T: Deserialize<'de> + Named,
        D: Deserializer<'de>,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items
            .into_iter()
            .map(|item| (item.key().to_owned(), item))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialises_lists_into_named_maps() {
        let map: Map = serde_json::from_value(json!({
            "name": "1-1",
            "areas": [{
                "name": "Overworld",
                "attributes": { "setting": "Overworld" },
                "stretches": [{ "kind": "Floor", "y": 0 }],
                "creation": [{ "title": "Block", "x": 16, "y": 8, "width": 8, "height": 8 }]
            }],
            "locations": [{ "name": "start", "area": "Overworld", "entry": "Plain" }]
        }))
        .expect("valid map");

        let area = map.area("Overworld").expect("area present");
        assert_eq!(area.boundaries, Bounds::ZERO);
        assert_eq!(area.attribute("setting"), Some(&json!("Overworld")));
        assert_eq!(area.stretches, vec![AreaCommand::new("Floor").with_arg("y", 0)]);
        assert_eq!(area.creation.first().map(Placement::bounds), Some(Bounds::new(8.0, 24.0, 16.0, 16.0)));
        assert_eq!(map.location("start").map(|l| l.area.as_str()), Some("Overworld"));
    }

    #[test]
    fn placement_group_defaults_to_title() {
        let plain = Placement::new("Goomba", 0.0, 0.0, 8.0, 8.0);
        assert_eq!(plain.group_name(), "Goomba");
        assert_eq!(plain.in_group("Character").group_name(), "Character");
    }
}
