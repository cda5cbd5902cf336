//! Library crate tracking the active map, area and location of a tile world
//! and revealing or hiding lazy entity descriptors as a viewport sweeps it.
//!
//! [`MapsHandler`] is the entry point: build it with a [`MapRepository`] and
//! an [`AttributeRegistry`], bind a map and location, then call
//! [`MapsHandler::spawn_area`] and [`MapsHandler::unspawn_area`] with the
//! travel direction and the window the viewport now covers.
pub mod error;
pub mod geometry;
pub mod handler;
pub mod logging;
pub mod prething;
pub mod repository;
pub mod screen;
pub mod settings;
pub mod spawn;
pub mod world;

// Re-export commonly used items
pub use error::{CommandKind, MapsError};
pub use geometry::{Bounds, Direction, Edge};
pub use handler::{CommandInterpreter, MapsHandler, MapsHandlerBuilder, SpawnCallback};
pub use logging::init as init_logging;
pub use prething::{PreThing, PreThingGroup, PreThings};
pub use repository::{MapLibrary, MapRepository, WorldDefinition};
pub use screen::{AttributeRegistry, ScreenAttributes};
pub use settings::HandlerSettings;
pub use spawn::apply_spawn_action;
pub use spawn::sweep::SweepReport;
pub use world::{Area, AreaCommand, Location, Map, Placement};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use maps_handler::prelude::*;
    //! ```

    pub use crate::AttributeRegistry;
    pub use crate::Bounds;
    pub use crate::Direction;
    pub use crate::MapLibrary;
    pub use crate::MapRepository;
    pub use crate::MapsError;
    pub use crate::MapsHandler;
    pub use crate::PreThing;
    pub use crate::ScreenAttributes;
    pub use crate::SweepReport;
}
