//! Error type shared by the handler, the scanner and the map library.

use thiserror::Error;

/// Which command list a missing interpreter was needed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Commands run while an area is stretched to its full extent.
    Stretch,
    /// Commands run after an area's placements are known.
    After,
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stretch => f.write_str("stretch"),
            Self::After => f.write_str("after"),
        }
    }
}

/// Failures surfaced by [`crate::MapsHandler`] and its collaborators.
///
/// Every variant is terminal to the call that produced it; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum MapsError {
    /// A required collaborator was not supplied to the builder.
    #[error("maps handler is missing its {missing}")]
    Configuration {
        /// Name of the missing collaborator.
        missing: &'static str,
    },
    /// No map with this name exists in the repository.
    #[error("no map named `{name}`")]
    MapNotFound {
        /// Requested map name.
        name: String,
    },
    /// The current map has no location with this name.
    #[error("no location named `{name}` in the current map")]
    LocationNotFound {
        /// Requested location name.
        name: String,
    },
    /// Commands were declared but no interpreter was configured for them.
    #[error("{kind} commands present but no {kind} interpreter configured")]
    MissingCommandInterpreter {
        /// Command list that could not be dispatched.
        kind: CommandKind,
    },
    /// A direction token outside `xInc`, `xDec`, `yInc` and `yDec`.
    #[error("invalid direction `{token}`")]
    InvalidDirection {
        /// The rejected token.
        token: String,
    },
    /// A world definition could not be parsed.
    #[error("malformed world definition: {0}")]
    WorldFormat(#[from] serde_json::Error),
    /// Two maps in one library share a name.
    #[error("map `{name}` defined more than once")]
    DuplicateMap {
        /// The repeated map name.
        name: String,
    },
}

impl MapsError {
    /// Shorthand for [`MapsError::MapNotFound`].
    #[must_use]
    pub fn map_not_found(name: impl Into<String>) -> Self {
        Self::MapNotFound { name: name.into() }
    }

    /// Shorthand for [`MapsError::LocationNotFound`].
    #[must_use]
    pub fn location_not_found(name: impl Into<String>) -> Self {
        Self::LocationNotFound { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MapsError::Configuration { missing: "repository" }, "maps handler is missing its repository")]
    #[case(MapsError::map_not_found("1-1"), "no map named `1-1`")]
    #[case(
        MapsError::MissingCommandInterpreter { kind: CommandKind::After },
        "after commands present but no after interpreter configured"
    )]
    #[case(MapsError::InvalidDirection { token: "up".into() }, "invalid direction `up`")]
    fn messages_name_the_offending_input(#[case] error: MapsError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
