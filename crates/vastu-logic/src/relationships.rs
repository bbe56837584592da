//! Adjacency anchors between rooms on one floor.
//!
//! An anchor is a room whose zone pulls another room's placement toward
//! it (a dining area wants to be near the kitchen, a bathroom near the
//! bedroom it serves). Anchors depend on which rooms are actually on the
//! floor, so they are derived fresh for each room set.

use std::collections::BTreeMap;

use crate::rooms::{RoomId, RoomKind};

/// room → anchors, in the order they should be consulted.
pub type AnchorMap = BTreeMap<RoomId, Vec<RoomId>>;

/// Derive the anchor map for the rooms of one floor.
///
/// Static pairings come first; bathroom pairings are then overridden by
/// how many bedrooms and bathrooms the floor actually has:
/// 1. With a master bedroom, the first bathroom is its attached bath.
/// 2. A single bathroom serving two or more bedrooms becomes a common
///    bath near the dining and living areas (master still listed). With
///    none of those on the floor it has no anchor at all.
/// 3. Otherwise, when the other bedrooms and other bathrooms pair up
///    exactly, each bedroom gets its own bathroom.
pub fn derive_anchors(rooms: &[RoomId]) -> AnchorMap {
    let of_kind = |kind: RoomKind| -> Vec<RoomId> {
        rooms.iter().copied().filter(|r| r.kind == kind).collect()
    };
    let masters = of_kind(RoomKind::MasterBedroom);
    let bedrooms = of_kind(RoomKind::Bedroom);
    let bathrooms = of_kind(RoomKind::Bathroom);
    let kitchens = of_kind(RoomKind::Kitchen);
    let living = of_kind(RoomKind::LivingRoom);
    let dining = of_kind(RoomKind::DiningArea);

    let mut anchors = AnchorMap::new();

    // ── Static pairings ──────────────────────────────────────
    for &room in rooms {
        let targets: Vec<RoomId> = match room.kind {
            RoomKind::DiningArea => kitchens.clone(),
            RoomKind::PoojaRoom => living.clone(),
            RoomKind::LivingRoom => dining.clone(),
            RoomKind::Bathroom => masters.iter().chain(bedrooms.iter()).copied().collect(),
            _ => continue,
        };
        if !targets.is_empty() {
            anchors.insert(room, targets);
        }
    }

    // ── Cardinality overrides ────────────────────────────────
    let Some(&primary_bath) = bathrooms.first() else {
        return anchors;
    };
    let other_baths = &bathrooms[1..];

    if !masters.is_empty() {
        anchors.insert(primary_bath, masters.clone());
    }

    if bathrooms.len() == 1 && !bedrooms.is_empty() && masters.len() + bedrooms.len() > 1 {
        let common: Vec<RoomId> = dining
            .iter()
            .chain(living.iter())
            .chain(masters.iter())
            .copied()
            .collect();
        if common.is_empty() {
            anchors.remove(&primary_bath);
        } else {
            anchors.insert(primary_bath, common);
        }
    } else if !bedrooms.is_empty() && bedrooms.len() == other_baths.len() {
        for (&bath, &bed) in other_baths.iter().zip(bedrooms.iter()) {
            anchors.insert(bath, vec![bed]);
        }
    }

    anchors
}
