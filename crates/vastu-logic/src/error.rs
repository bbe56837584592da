//! Error types for loading rule tables and parsing textual identifiers.
//!
//! The layout engine itself never fails; these only surface at the edges
//! where configuration or request text is turned into typed values.

use thiserror::Error;

use crate::rooms::RoomKind;
use crate::zones::Zone;

/// A zone name that is not one of the nine grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown zone name: {0:?}")]
pub struct ZoneParseError(pub String);

/// A room identifier that does not name a known room kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomParseError {
    #[error("unknown room kind in identifier {0:?}")]
    UnknownKind(String),

    #[error("room index must be at least 1 in identifier {0:?}")]
    ZeroIndex(String),
}

/// Problems with a rule table loaded from configuration.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule table JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rule for {room} lists zone {zone} in more than one set")]
    OverlappingZones { room: RoomKind, zone: Zone },
}
