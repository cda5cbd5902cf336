//! Data repository seam: where maps come from and who builds descriptors.

mod library;

pub use library::{MapLibrary, WorldDefinition};

use std::collections::BTreeMap;

use crate::prething::PreThings;
use crate::world::{Area, Map};

/// Source of maps and of the descriptor containers for their areas.
pub trait MapRepository {
    /// Looks up a map by name.
    fn map(&self, name: &str) -> Option<&Map>;

    /// Every known map keyed by name.
    fn maps(&self) -> &BTreeMap<String, Map>;

    /// Builds a fresh container for `area`.
    ///
    /// Each call must return new descriptors; spawn state from an earlier
    /// container for the same area must not leak into the new one.
    fn pre_things(&self, area: &Area) -> PreThings;
}
