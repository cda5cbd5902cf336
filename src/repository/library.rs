//! In-memory [`MapRepository`] built from world definitions.

use std::collections::BTreeMap;
use std::io::Read;

use log::debug;
use serde::{Deserialize, Serialize};

use super::MapRepository;
use crate::prething::{PreThing, PreThingGroup, PreThings};
use crate::settings::HandlerSettings;
use crate::world::{Area, Map};
use crate::MapsError;

/// Contents of a world file: handler settings plus every map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldDefinition {
    /// Handler configuration.
    pub settings: HandlerSettings,
    /// Authored maps.
    pub maps: Vec<Map>,
}

impl WorldDefinition {
    /// Parses a world definition from JSON text.
    ///
    /// # Errors
    /// Returns [`MapsError::WorldFormat`] when the text is not a valid world.
    pub fn from_json_str(text: &str) -> Result<Self, MapsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a world definition from a JSON stream.
    ///
    /// # Errors
    /// Returns [`MapsError::WorldFormat`] when the stream is unreadable or
    /// not a valid world.
    pub fn from_reader(reader: impl Read) -> Result<Self, MapsError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Maps held in memory, producing descriptors from each area's placements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapLibrary {
    maps: BTreeMap<String, Map>,
}

impl MapLibrary {
    /// Builds a library from a list of maps.
    ///
    /// # Errors
    /// Returns [`MapsError::DuplicateMap`] if two maps share a name.
    pub fn new(maps: impl IntoIterator<Item = Map>) -> Result<Self, MapsError> {
        let mut library = BTreeMap::new();
        for map in maps {
            if library.contains_key(&map.name) {
                return Err(MapsError::DuplicateMap { name: map.name });
            }
            library.insert(map.name.clone(), map);
        }
        debug!("map library holds {} maps", library.len());
        Ok(Self { maps: library })
    }

    /// Builds a library from a parsed world definition.
    ///
    /// # Errors
    /// Returns [`MapsError::DuplicateMap`] if two maps share a name.
    pub fn from_world(world: WorldDefinition) -> Result<Self, MapsError> {
        Self::new(world.maps)
    }
}

impl MapRepository for MapLibrary {
    fn map(&self, name: &str) -> Option<&Map> {
        self.maps.get(name)
    }

    fn maps(&self) -> &BTreeMap<String, Map> {
        &self.maps
    }

    fn pre_things(&self, area: &Area) -> PreThings {
        let mut grouped: BTreeMap<&str, Vec<PreThing>> = BTreeMap::new();
        for placement in &area.creation {
            grouped
                .entry(placement.group_name())
                .or_default()
                .push(PreThing::new(
                    placement.title.clone(),
                    placement.bounds(),
                    placement.settings.clone(),
                ));
        }
        debug!(
            "built {} descriptors in {} groups for area {}",
            area.creation.len(),
            grouped.len(),
            area.name
        );
        grouped
            .into_iter()
            .map(|(name, things)| (name.to_owned(), PreThingGroup::sorted(things)))
            .collect()
    }
}
