//! Travel directions, descriptor edges and the query box they are measured
//! against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MapsError;

/// One of the four sides of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Smallest y.
    Top,
    /// Largest x.
    Right,
    /// Largest y.
    Bottom,
    /// Smallest x.
    Left,
}

/// Direction the viewport is travelling in.
///
/// Each direction owns one descriptor order inside a
/// [`crate::PreThingGroup`], sorted ascending by [`Direction::edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Moving right; ordered by left edge.
    #[serde(rename = "xInc")]
    XInc,
    /// Moving left; ordered by right edge.
    #[serde(rename = "xDec")]
    XDec,
    /// Moving down; ordered by top edge.
    #[serde(rename = "yInc")]
    YInc,
    /// Moving up; ordered by bottom edge.
    #[serde(rename = "yDec")]
    YDec,
}

impl Direction {
    /// All directions in storage order.
    pub const ALL: [Self; 4] = [Self::XInc, Self::XDec, Self::YInc, Self::YDec];

    /// The edge this direction's descriptor order is sorted by.
    ///
    /// # Examples
    ///
    /// ```
    /// use maps_handler::{Direction, Edge};
    /// assert_eq!(Direction::XInc.edge(), Edge::Left);
    /// assert_eq!(Direction::YDec.edge(), Edge::Bottom);
    /// ```
    #[must_use]
    pub const fn edge(self) -> Edge {
        match self {
            Self::XInc => Edge::Left,
            Self::XDec => Edge::Right,
            Self::YInc => Edge::Top,
            Self::YDec => Edge::Bottom,
        }
    }

    /// The direction travelling the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::XInc => Self::XDec,
            Self::XDec => Self::XInc,
            Self::YInc => Self::YDec,
            Self::YDec => Self::YInc,
        }
    }

    /// Position of this direction's order inside a group.
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::XInc => 0,
            Self::XDec => 1,
            Self::YInc => 2,
            Self::YDec => 3,
        }
    }

    /// Offset of one step of `distance` world units in this direction.
    #[must_use]
    pub fn offset(self, distance: f64) -> (f64, f64) {
        match self {
            Self::XInc => (distance, 0.0),
            Self::XDec => (-distance, 0.0),
            Self::YInc => (0.0, distance),
            Self::YDec => (0.0, -distance),
        }
    }

    /// The token used in world files and on the command line.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::XInc => "xInc",
            Self::XDec => "xDec",
            Self::YInc => "yInc",
            Self::YDec => "yDec",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Direction {
    type Err = MapsError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.token() == token)
            .ok_or_else(|| MapsError::InvalidDirection {
                token: token.to_owned(),
            })
    }
}

impl TryFrom<&str> for Direction {
    type Error = MapsError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        token.parse()
    }
}

/// Axis-aligned box in world space.
///
/// Used both for an area's boundaries and for the spawn window swept across
/// it. Only the fields are constrained by convention (`top <= bottom`,
/// `left <= right`); nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest y.
    pub top: f64,
    /// Largest x.
    pub right: f64,
    /// Largest y.
    pub bottom: f64,
    /// Smallest x.
    pub left: f64,
}

impl Bounds {
    /// The all-zero box areas are reset to on entry.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Builds a box from its edges in top, right, bottom, left order.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Builds a box from its top-left corner and size.
    #[must_use]
    pub fn from_origin(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(top, left + width, top + height, left)
    }

    /// Reads one edge.
    #[must_use]
    pub const fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    /// Moves the box by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.top + dy, self.right + dx, self.bottom + dy, self.left + dx)
    }
}
