//! Room kinds and room instance identifiers.
//!
//! A [`RoomId`] carries its base category and a 1-based index as separate
//! fields, so nothing downstream has to recover the category from a string.
//! The textual form (`master_bedroom`, `bedroom_2`, `bathroom_3`) is only
//! produced for display and serialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RoomParseError;

/// Base category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Parking,
    LivingRoom,
    Kitchen,
    DiningArea,
    PoojaRoom,
    StudyRoom,
    Balcony,
    MasterBedroom,
    Bedroom,
    Bathroom,
    Staircase,
}

impl RoomKind {
    pub const ALL: [RoomKind; 11] = [
        RoomKind::Parking,
        RoomKind::LivingRoom,
        RoomKind::Kitchen,
        RoomKind::DiningArea,
        RoomKind::PoojaRoom,
        RoomKind::StudyRoom,
        RoomKind::Balcony,
        RoomKind::MasterBedroom,
        RoomKind::Bedroom,
        RoomKind::Bathroom,
        RoomKind::Staircase,
    ];

    /// Snake-case key used in identifiers and rule files.
    pub fn key(self) -> &'static str {
        match self {
            RoomKind::Parking => "parking",
            RoomKind::LivingRoom => "living_room",
            RoomKind::Kitchen => "kitchen",
            RoomKind::DiningArea => "dining_area",
            RoomKind::PoojaRoom => "pooja_room",
            RoomKind::StudyRoom => "study_room",
            RoomKind::Balcony => "balcony",
            RoomKind::MasterBedroom => "master_bedroom",
            RoomKind::Bedroom => "bedroom",
            RoomKind::Bathroom => "bathroom",
            RoomKind::Staircase => "staircase",
        }
    }

    pub fn from_key(key: &str) -> Option<RoomKind> {
        RoomKind::ALL.iter().copied().find(|k| k.key() == key)
    }

    /// Any sleeping room, master included.
    pub fn is_bedroom(self) -> bool {
        matches!(self, RoomKind::MasterBedroom | RoomKind::Bedroom)
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One concrete room instance in a design.
///
/// Index 1 displays as the bare key (`kitchen`, `bathroom`); higher indices
/// get a numeric suffix (`bathroom_2`). Bedrooms start at 2 because the
/// master bedroom is the house's first bedroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RoomId {
    pub kind: RoomKind,
    pub index: u32,
}

impl RoomId {
    pub fn new(kind: RoomKind, index: u32) -> Self {
        Self { kind, index }
    }

    /// The first (or only) room of a kind.
    pub fn single(kind: RoomKind) -> Self {
        Self { kind, index: 1 }
    }

    pub fn master_bedroom() -> Self {
        Self::single(RoomKind::MasterBedroom)
    }

    /// `bedroom_n`; `n` counts the master bedroom, so the first call site uses 2.
    pub fn bedroom(n: u32) -> Self {
        Self::new(RoomKind::Bedroom, n)
    }

    pub fn bathroom(n: u32) -> Self {
        Self::new(RoomKind::Bathroom, n)
    }

    pub fn staircase() -> Self {
        Self::single(RoomKind::Staircase)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index <= 1 {
            f.write_str(self.kind.key())
        } else {
            write!(f, "{}_{}", self.kind.key(), self.index)
        }
    }
}

impl FromStr for RoomId {
    type Err = RoomParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = RoomKind::from_key(s) {
            return Ok(RoomId::single(kind));
        }
        let (prefix, suffix) = s
            .rsplit_once('_')
            .ok_or_else(|| RoomParseError::UnknownKind(s.to_string()))?;
        let index: u32 = suffix
            .parse()
            .map_err(|_| RoomParseError::UnknownKind(s.to_string()))?;
        if index == 0 {
            return Err(RoomParseError::ZeroIndex(s.to_string()));
        }
        let kind =
            RoomKind::from_key(prefix).ok_or_else(|| RoomParseError::UnknownKind(s.to_string()))?;
        Ok(RoomId::new(kind, index))
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RoomId {
    type Error = RoomParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(RoomId::master_bedroom().to_string(), "master_bedroom");
        assert_eq!(RoomId::bedroom(3).to_string(), "bedroom_3");
        assert_eq!(RoomId::bathroom(1).to_string(), "bathroom");
        assert_eq!(RoomId::bathroom(2).to_string(), "bathroom_2");
        assert_eq!(RoomId::single(RoomKind::PoojaRoom).to_string(), "pooja_room");
    }

    #[test]
    fn parse_keeps_structure() {
        let id: RoomId = "bedroom_4".parse().unwrap();
        assert_eq!(id.kind, RoomKind::Bedroom);
        assert_eq!(id.index, 4);

        // Underscores inside the key are not mistaken for a suffix.
        let id: RoomId = "living_room".parse().unwrap();
        assert_eq!(id, RoomId::single(RoomKind::LivingRoom));

        let id: RoomId = "master_bedroom".parse().unwrap();
        assert_eq!(id.kind, RoomKind::MasterBedroom);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(
            "garage_2".parse::<RoomId>(),
            Err(RoomParseError::UnknownKind("garage_2".into()))
        );
        assert!("bedroom_x".parse::<RoomId>().is_err());
        assert_eq!(
            "bathroom_0".parse::<RoomId>(),
            Err(RoomParseError::ZeroIndex("bathroom_0".into()))
        );
    }

    #[test]
    fn every_kind_has_a_unique_key() {
        for kind in RoomKind::ALL {
            assert_eq!(RoomKind::from_key(kind.key()), Some(kind));
        }
    }

    #[test]
    fn serde_uses_display_form() {
        let json = serde_json::to_string(&RoomId::bathroom(3)).unwrap();
        assert_eq!(json, "\"bathroom_3\"");
        let kind: RoomKind = serde_json::from_str("\"dining_area\"").unwrap();
        assert_eq!(kind, RoomKind::DiningArea);
    }
}
