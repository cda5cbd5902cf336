//! Session state: which map, area and location are active, and the spawn
//! entry points that operate on the active area's descriptors.
//!
//! A [`MapsHandler`] is assembled by [`MapsHandlerBuilder`], which insists on
//! a [`MapRepository`] and an [`AttributeRegistry`]. Everything else is
//! optional: without an `on_spawn` handler [`MapsHandler::spawn_area`] does
//! nothing, and without interpreters an area may not declare stretch or after
//! commands.
//!
//! Transitions replace the current area's descriptors wholesale, so spawn
//! state never survives a call to [`MapsHandler::set_location`].

mod transition;

use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::{Bounds, Direction};
use crate::prething::{PreThing, PreThings};
use crate::repository::MapRepository;
use crate::screen::AttributeRegistry;
use crate::settings::HandlerSettings;
use crate::spawn::apply_spawn_action;
use crate::spawn::sweep::{leading_window, trailing_window, SweepReport};
use crate::world::{Area, AreaCommand, Location, Map};
use crate::MapsError;

/// Called once for every descriptor whose spawn status changes.
pub type SpawnCallback = Box<dyn FnMut(&PreThing)>;

/// Runs one command with its position in, and the whole of, its list.
pub type CommandInterpreter = Box<dyn FnMut(&AreaCommand, usize, &[AreaCommand])>;

/// Tracks the active map/area/location and toggles descriptors in and out
/// of existence as a query box sweeps the area.
pub struct MapsHandler {
    repository: Box<dyn MapRepository>,
    screen: Box<dyn AttributeRegistry>,
    settings: HandlerSettings,
    on_spawn: Option<SpawnCallback>,
    on_unspawn: Option<SpawnCallback>,
    stretch_add: Option<CommandInterpreter>,
    after_add: Option<CommandInterpreter>,
    map_name: Option<String>,
    map_current: Option<Map>,
    /// Map still owning the bound area after `set_map` moved on without
    /// entering a location.
    area_map: Option<Map>,
    area_current: Option<String>,
    location_entered: Option<Location>,
    pre_things: PreThings,
    stretches: Vec<AreaCommand>,
    afters: Vec<AreaCommand>,
}

impl MapsHandler {
    /// Starts configuring a handler.
    #[must_use]
    pub fn builder() -> MapsHandlerBuilder {
        MapsHandlerBuilder::default()
    }

    /// The registry area attributes are mirrored into.
    #[must_use]
    pub fn screen_attributes(&self) -> &dyn AttributeRegistry {
        self.screen.as_ref()
    }

    /// Configuration the handler was built with.
    #[must_use]
    pub const fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    /// Name of the current map, if one has been set.
    #[must_use]
    pub fn map_name(&self) -> Option<&str> {
        self.map_name.as_deref()
    }

    /// The named map from the repository, or the current map when `name` is
    /// `None`.
    #[must_use]
    pub fn map(&self, name: Option<&str>) -> Option<&Map> {
        name.map_or_else(
            || self.map_current.as_ref(),
            |requested| self.repository.map(requested),
        )
    }

    /// Every map the repository knows.
    #[must_use]
    pub fn maps(&self) -> &BTreeMap<String, Map> {
        self.repository.maps()
    }

    /// The current area, read from the map that owns it.
    #[must_use]
    pub fn area(&self) -> Option<&Area> {
        let key = self.area_current.as_deref()?;
        self.area_map.as_ref().or(self.map_current.as_ref())?.area(key)
    }

    /// The current area, for callers that grow its boundaries while
    /// scrolling. Edits are visible through [`MapsHandler::map`].
    pub fn area_mut(&mut self) -> Option<&mut Area> {
        let key = self.area_current.as_deref()?;
        self.area_map
            .as_mut()
            .or(self.map_current.as_mut())?
            .areas
            .get_mut(key)
    }

    /// Name of the current area.
    #[must_use]
    pub fn area_name(&self) -> Option<&str> {
        self.area_current.as_deref()
    }

    /// Looks up a location in the current map.
    #[must_use]
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.map_current.as_ref()?.location(name)
    }

    /// The location most recently entered.
    #[must_use]
    pub const fn location_entered(&self) -> Option<&Location> {
        self.location_entered.as_ref()
    }

    /// Descriptors of the current area.
    #[must_use]
    pub const fn pre_things(&self) -> &PreThings {
        &self.pre_things
    }

    /// The stretch commands last dispatched.
    #[must_use]
    pub fn stretches(&self) -> &[AreaCommand] {
        &self.stretches
    }

    /// The after commands last dispatched.
    #[must_use]
    pub fn afters(&self) -> &[AreaCommand] {
        &self.afters
    }

    /// Spawns every unspawned descriptor inside `bounds`, scanning the
    /// `direction` order of each group.
    ///
    /// Returns how many descriptors were spawned; always `0` without an
    /// `on_spawn` handler.
    pub fn spawn_area(&mut self, direction: Direction, bounds: Bounds) -> usize {
        let Some(on_spawn) = self.on_spawn.as_mut() else {
            return 0;
        };
        apply_spawn_action(&mut self.pre_things, on_spawn, true, direction, &bounds)
    }

    /// Unspawns every spawned descriptor inside `bounds`.
    ///
    /// Returns how many descriptors were unspawned; always `0` without an
    /// `on_unspawn` handler.
    pub fn unspawn_area(&mut self, direction: Direction, bounds: Bounds) -> usize {
        let Some(on_unspawn) = self.on_unspawn.as_mut() else {
            return 0;
        };
        apply_spawn_action(&mut self.pre_things, on_unspawn, false, direction, &bounds)
    }

    /// Moves the viewport one step: spawns what is now inside it and
    /// unspawns what it has left wholly behind.
    pub fn sweep(&mut self, direction: Direction, viewport: Bounds) -> SweepReport {
        let spawned = self.spawn_area(direction, leading_window(direction, viewport));
        let (behind, trailing) = trailing_window(direction, viewport);
        let unspawned = self.unspawn_area(behind, trailing);
        SweepReport { spawned, unspawned }
    }
}

impl fmt::Debug for MapsHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsHandler")
            .field("settings", &self.settings)
            .field("map_name", &self.map_name)
            .field("area", &self.area_name())
            .field("location", &self.location_entered.as_ref().map(|l| &l.name))
            .field("pre_things", &self.pre_things.len())
            .finish_non_exhaustive()
    }
}

/// Collects collaborators and callbacks for a [`MapsHandler`].
#[derive(Default)]
pub struct MapsHandlerBuilder {
    repository: Option<Box<dyn MapRepository>>,
    screen: Option<Box<dyn AttributeRegistry>>,
    settings: HandlerSettings,
    on_spawn: Option<SpawnCallback>,
    on_unspawn: Option<SpawnCallback>,
    stretch_add: Option<CommandInterpreter>,
    after_add: Option<CommandInterpreter>,
}

impl MapsHandlerBuilder {
    /// Sets the map repository. Required.
    #[must_use]
    pub fn repository(mut self, repository: impl MapRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Sets the registry area attributes are mirrored into. Required.
    #[must_use]
    pub fn screen(mut self, screen: impl AttributeRegistry + 'static) -> Self {
        self.screen = Some(Box::new(screen));
        self
    }

    /// Replaces the default settings.
    #[must_use]
    pub fn settings(mut self, settings: HandlerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Handler for newly spawned descriptors.
    #[must_use]
    pub fn on_spawn(mut self, callback: impl FnMut(&PreThing) + 'static) -> Self {
        self.on_spawn = Some(Box::new(callback));
        self
    }

    /// Handler for newly unspawned descriptors.
    #[must_use]
    pub fn on_unspawn(mut self, callback: impl FnMut(&PreThing) + 'static) -> Self {
        self.on_unspawn = Some(Box::new(callback));
        self
    }

    /// Interpreter for area stretch commands.
    #[must_use]
    pub fn stretch_add(
        mut self,
        interpreter: impl FnMut(&AreaCommand, usize, &[AreaCommand]) + 'static,
    ) -> Self {
        self.stretch_add = Some(Box::new(interpreter));
        self
    }

    /// Interpreter for area after commands.
    #[must_use]
    pub fn after_add(
        mut self,
        interpreter: impl FnMut(&AreaCommand, usize, &[AreaCommand]) + 'static,
    ) -> Self {
        self.after_add = Some(Box::new(interpreter));
        self
    }

    /// Validates the configuration and builds the handler.
    ///
    /// # Errors
    /// Returns [`MapsError::Configuration`] when the repository or the
    /// screen registry was not supplied.
    pub fn build(self) -> Result<MapsHandler, MapsError> {
        let repository = self.repository.ok_or(MapsError::Configuration {
            missing: "map repository",
        })?;
        let screen = self.screen.ok_or(MapsError::Configuration {
            missing: "screen attribute registry",
        })?;
        Ok(MapsHandler {
            repository,
            screen,
            settings: self.settings,
            on_spawn: self.on_spawn,
            on_unspawn: self.on_unspawn,
            stretch_add: self.stretch_add,
            after_add: self.after_add,
            map_name: None,
            map_current: None,
            area_map: None,
            area_current: None,
            location_entered: None,
            pre_things: PreThings::new(),
            stretches: Vec::new(),
            afters: Vec::new(),
        })
    }
}
