//! Map and location transitions.

use log::debug;
use serde_json::Value;

use super::{CommandInterpreter, MapsHandler};
use crate::error::CommandKind;
use crate::geometry::Bounds;
use crate::world::{AreaCommand, Location};
use crate::MapsError;

impl MapsHandler {
    /// Makes `name` the current map and, if given, enters `location` in it.
    ///
    /// Without a location the current area and location are left as they
    /// were; call [`MapsHandler::set_location`] afterwards. The bound area
    /// stays readable through [`MapsHandler::area`] until then.
    ///
    /// # Errors
    /// Returns [`MapsError::MapNotFound`] if the repository has no such map,
    /// in which case nothing changes. Any error from entering `location` is
    /// passed through after the map has been switched.
    pub fn set_map(&mut self, name: &str, location: Option<&str>) -> Result<(), MapsError> {
        let found = self
            .repository
            .map(name)
            .cloned()
            .ok_or_else(|| MapsError::map_not_found(name))?;
        debug!("map set to {name}");
        self.map_name = Some(name.to_owned());
        let previous = self.map_current.replace(found);
        if self.area_current.is_some() && self.area_map.is_none() {
            self.area_map = previous;
        }

        if let Some(requested) = location {
            self.set_location(requested)?;
        }
        Ok(())
    }

    /// Enters the named location of the current map.
    ///
    /// In order: records the location and binds its area, zeroes the area's
    /// boundaries, mirrors the configured attributes into the screen
    /// registry, fetches a fresh descriptor container, then dispatches the
    /// area's stretch and after commands. The area is bound in place, so
    /// the current map sees the zeroed boundaries too.
    ///
    /// # Errors
    /// Returns [`MapsError::LocationNotFound`] when no map is set, when the
    /// map has no such location or when the location names an area the map
    /// does not define. Returns [`MapsError::MissingCommandInterpreter`] when
    /// the area declares commands nobody can run; the location and area stay
    /// bound in that case.
    pub fn set_location(&mut self, name: &str) -> Result<&Location, MapsError> {
        let map = self
            .map_current
            .as_mut()
            .ok_or_else(|| MapsError::location_not_found(name))?;
        let entered = map
            .location(name)
            .cloned()
            .ok_or_else(|| MapsError::location_not_found(name))?;
        let area = map
            .areas
            .get_mut(&entered.area)
            .ok_or_else(|| MapsError::location_not_found(name))?;
        debug!("entering location {name} in area {}", area.name);

        area.boundaries = Bounds::ZERO;
        for attribute in &self.settings.screen_attributes {
            let value = area.attribute(attribute).cloned().unwrap_or(Value::Null);
            self.screen.set_attribute(attribute, value);
        }
        self.pre_things = self.repository.pre_things(area);
        let stretches = area.stretches.clone();
        let afters = area.afters.clone();
        self.area_current = Some(entered.area.clone());
        self.area_map = None;
        let bound = self.location_entered.insert(entered);

        self.stretches = stretches;
        dispatch(
            self.stretch_add.as_mut(),
            &self.stretches,
            CommandKind::Stretch,
        )?;
        self.afters = afters;
        dispatch(self.after_add.as_mut(), &self.afters, CommandKind::After)?;
        Ok(bound)
    }

    /// Replaces the current stretch commands and runs each through the
    /// stretch interpreter.
    ///
    /// # Errors
    /// Returns [`MapsError::MissingCommandInterpreter`] if `stretches` is not
    /// empty and no stretch interpreter was configured.
    pub fn set_stretches(&mut self, stretches: Vec<AreaCommand>) -> Result<(), MapsError> {
        self.stretches = stretches;
        dispatch(
            self.stretch_add.as_mut(),
            &self.stretches,
            CommandKind::Stretch,
        )
    }

    /// Replaces the current after commands and runs each through the after
    /// interpreter.
    ///
    /// # Errors
    /// Returns [`MapsError::MissingCommandInterpreter`] if `afters` is not
    /// empty and no after interpreter was configured.
    pub fn set_afters(&mut self, afters: Vec<AreaCommand>) -> Result<(), MapsError> {
        self.afters = afters;
        dispatch(self.after_add.as_mut(), &self.afters, CommandKind::After)
    }
}

fn dispatch(
    configured: Option<&mut CommandInterpreter>,
    commands: &[AreaCommand],
    kind: CommandKind,
) -> Result<(), MapsError> {
    if commands.is_empty() {
        return Ok(());
    }
    let interpreter = configured.ok_or(MapsError::MissingCommandInterpreter { kind })?;
    for (index, command) in commands.iter().enumerate() {
        interpreter(command, index, commands);
    }
    debug!("dispatched {} {kind} commands", commands.len());
    Ok(())
}
