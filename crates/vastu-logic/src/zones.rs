//! Compass zones of the 3×3 floor grid.
//!
//! Every floor is split into nine cells named after compass directions.
//! Rooms are placed into a [`Zone`], or into the [`Placement::Flexible`]
//! sentinel when no cell has room left.
//!
//! ```text
//!   NW  N   NE        (0,0) (0,1) (0,2)
//!   W  Center E  ==>  (1,0) (1,1) (1,2)
//!   SW  S   SE        (2,0) (2,1) (2,2)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZoneParseError;

/// Distance reported when one side of a comparison is not on the grid.
pub const FAR_DISTANCE: u32 = 99;

/// One cell of the compass grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    NW,
    N,
    NE,
    W,
    Center,
    E,
    SW,
    S,
    SE,
}

impl Zone {
    /// All zones in compass order (N first, clockwise, Center last).
    ///
    /// This is the order used when a low-strictness rule expands to
    /// "everything except the avoid set".
    pub const COMPASS: [Zone; 9] = [
        Zone::N,
        Zone::NE,
        Zone::E,
        Zone::SE,
        Zone::S,
        Zone::SW,
        Zone::W,
        Zone::NW,
        Zone::Center,
    ];

    /// (row, col) on the grid, north-west at the origin.
    pub fn coords(self) -> (u32, u32) {
        match self {
            Zone::NW => (0, 0),
            Zone::N => (0, 1),
            Zone::NE => (0, 2),
            Zone::W => (1, 0),
            Zone::Center => (1, 1),
            Zone::E => (1, 2),
            Zone::SW => (2, 0),
            Zone::S => (2, 1),
            Zone::SE => (2, 2),
        }
    }

    /// Manhattan distance between two cells.
    pub fn distance(self, other: Zone) -> u32 {
        let (r1, c1) = self.coords();
        let (r2, c2) = other.coords();
        r1.abs_diff(r2) + c1.abs_diff(c2)
    }

    pub fn name(self) -> &'static str {
        match self {
            Zone::NW => "NW",
            Zone::N => "N",
            Zone::NE => "NE",
            Zone::W => "W",
            Zone::Center => "Center",
            Zone::E => "E",
            Zone::SW => "SW",
            Zone::S => "S",
            Zone::SE => "SE",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = ZoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::COMPASS
            .iter()
            .copied()
            .find(|z| z.name() == s)
            .ok_or_else(|| ZoneParseError(s.to_string()))
    }
}

/// Where a room ended up on its floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Placement {
    Zone(Zone),
    /// Could not be placed inside the grid; capacity limits do not apply.
    Flexible,
}

impl Placement {
    pub fn zone(self) -> Option<Zone> {
        match self {
            Placement::Zone(z) => Some(z),
            Placement::Flexible => None,
        }
    }

    /// Grid distance to `zone`, or [`FAR_DISTANCE`] for `Flexible`.
    pub fn distance_to(self, zone: Zone) -> u32 {
        match self {
            Placement::Zone(z) => z.distance(zone),
            Placement::Flexible => FAR_DISTANCE,
        }
    }

    pub fn is_flexible(self) -> bool {
        matches!(self, Placement::Flexible)
    }
}

impl From<Zone> for Placement {
    fn from(zone: Zone) -> Self {
        Placement::Zone(zone)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Zone(z) => f.write_str(z.name()),
            Placement::Flexible => f.write_str("Flexible"),
        }
    }
}

impl FromStr for Placement {
    type Err = ZoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Flexible" {
            return Ok(Placement::Flexible);
        }
        s.parse().map(Placement::Zone)
    }
}

impl From<Placement> for String {
    fn from(p: Placement) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for Placement {
    type Error = ZoneParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
