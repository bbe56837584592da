//! Zone assignment — greedy placement with randomized diversification.
//!
//! Each room on a floor arrives with an ordered list of acceptable zones
//! (preferred first). Rooms claim zones in priority order; a zone holds at
//! most `zone_capacity` rooms. A room with a placed anchor sorts its
//! candidates by grid distance to that anchor.
//!
//! The first attempt is always the plain greedy pass and draws nothing from
//! the rng. Later attempts shuffle the tail of the priority list and,
//! for rooms without an anchor, sometimes shuffle the candidate zones.
//! Attempts that reproduce an already accepted layout are discarded.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use vastu_logic::optimizer::{LayoutOptimizer, ZoneCandidates};
//! use vastu_logic::rooms::{RoomId, RoomKind};
//! use vastu_logic::zones::{Placement, Zone};
//!
//! let mut candidates = ZoneCandidates::new();
//! candidates.insert(RoomId::single(RoomKind::Kitchen), vec![Zone::SE, Zone::NW]);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let variants = LayoutOptimizer::default().generate_variants(&candidates, 1, &mut rng);
//! let kitchen = variants[0].assignment[&RoomId::single(RoomKind::Kitchen)];
//! assert_eq!(kitchen, Placement::Zone(Zone::SE));
//! ```

use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::relationships::{derive_anchors, AnchorMap};
use crate::rooms::{RoomId, RoomKind};
use crate::zones::{Placement, Zone};

/// Room → placement for one floor.
pub type Assignment = BTreeMap<RoomId, Placement>;

/// Tuning for the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Upper bound on attempts per `generate_variants` call.
    pub max_attempts: u32,
    /// Rooms a single zone may hold on one floor.
    pub zone_capacity: u32,
    /// Chance that an anchorless room shuffles its candidates (attempts 2+).
    pub exploration_chance: f64,
    /// Leading entries of `priority` that never get shuffled.
    pub fixed_priority_len: usize,
    /// Claim order by room kind; kinds not listed go last.
    pub priority: Vec<RoomKind>,
    /// Zones tried when none of a room's candidates has capacity left.
    pub fallback: Vec<Zone>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            zone_capacity: 3,
            exploration_chance: 0.3,
            fixed_priority_len: 3,
            priority: vec![
                RoomKind::PoojaRoom,
                RoomKind::Kitchen,
                RoomKind::MasterBedroom,
                RoomKind::LivingRoom,
                RoomKind::Bedroom,
                RoomKind::Bathroom,
                RoomKind::Staircase,
                RoomKind::Balcony,
            ],
            fallback: vec![
                Zone::NW,
                Zone::SE,
                Zone::W,
                Zone::S,
                Zone::E,
                Zone::N,
                Zone::Center,
            ],
        }
    }
}

/// Acceptable zones per room, keeping the order rooms were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCandidates {
    entries: Vec<(RoomId, Vec<Zone>)>,
}

impl ZoneCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build candidates for `rooms`, asking `zones_for` for each one.
    pub fn for_rooms(rooms: &[RoomId], mut zones_for: impl FnMut(RoomId) -> Vec<Zone>) -> Self {
        let mut candidates = Self::new();
        for &room in rooms {
            candidates.insert(room, zones_for(room));
        }
        candidates
    }

    /// Set the zones for a room, replacing any earlier entry in place.
    pub fn insert(&mut self, room: RoomId, zones: Vec<Zone>) {
        match self.entries.iter_mut().find(|(r, _)| *r == room) {
            Some(entry) => entry.1 = zones,
            None => self.entries.push((room, zones)),
        }
    }

    pub fn get(&self, room: RoomId) -> Option<&[Zone]> {
        self.entries
            .iter()
            .find(|(r, _)| *r == room)
            .map(|(_, zones)| zones.as_slice())
    }

    pub fn rooms(&self) -> Vec<RoomId> {
        self.entries.iter().map(|(r, _)| *r).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomId, &[Zone])> {
        self.entries.iter().map(|(r, z)| (*r, z.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(RoomId, Vec<Zone>)> for ZoneCandidates {
    fn from_iter<T: IntoIterator<Item = (RoomId, Vec<Zone>)>>(iter: T) -> Self {
        let mut candidates = Self::new();
        for (room, zones) in iter {
            candidates.insert(room, zones);
        }
        candidates
    }
}

/// One complete layout of a floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub assignment: Assignment,
    /// Advisory notes, e.g. rooms that needed the fallback order.
    pub notes: Vec<String>,
}

impl Variant {
    /// Rooms per zone; `Flexible` rooms are not counted.
    pub fn occupancy(&self) -> BTreeMap<Zone, u32> {
        let mut counts = BTreeMap::new();
        for zone in self.assignment.values().filter_map(|p| p.zone()) {
            *counts.entry(zone).or_insert(0) += 1;
        }
        counts
    }

    pub fn flexible_rooms(&self) -> Vec<RoomId> {
        self.assignment
            .iter()
            .filter(|(_, p)| p.is_flexible())
            .map(|(r, _)| *r)
            .collect()
    }
}

/// Per-floor zone occupancy during one attempt.
struct Occupancy {
    counts: [u32; 9],
    capacity: u32,
}

impl Occupancy {
    fn new(capacity: u32) -> Self {
        Self {
            counts: [0; 9],
            capacity,
        }
    }

    fn has_room(&self, zone: Zone) -> bool {
        self.counts[zone as usize] < self.capacity
    }

    fn claim(&mut self, zone: Zone) {
        self.counts[zone as usize] += 1;
    }
}

/// Assigns rooms to zones. Stateless apart from its configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptimizer {
    config: OptimizerConfig,
}

impl LayoutOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Produce up to `count` distinct layouts for one floor.
    ///
    /// The first entry (when `count >= 1`) is always the deterministic
    /// greedy layout. Output order is acceptance order, not score order.
    pub fn generate_variants(
        &self,
        candidates: &ZoneCandidates,
        count: usize,
        rng: &mut impl Rng,
    ) -> Vec<Variant> {
        let anchors = derive_anchors(&candidates.rooms());
        let mut accepted: Vec<Variant> = Vec::new();
        let mut seen: HashSet<Assignment> = HashSet::new();
        let mut attempts = 0;

        while accepted.len() < count && attempts < self.config.max_attempts {
            attempts += 1;
            let explore = (attempts > 1).then_some(&mut *rng as &mut dyn RngCore);
            let variant = self.attempt(candidates, &anchors, explore);
            if seen.insert(variant.assignment.clone()) {
                accepted.push(variant);
            }
        }

        if accepted.is_empty() && count > 0 {
            accepted.push(self.attempt(candidates, &anchors, None));
        }
        if accepted.len() < count {
            log::debug!(
                "found {} of {} requested variants for {} rooms after {} attempts",
                accepted.len(),
                count,
                candidates.len(),
                attempts
            );
        }

        accepted
    }

    /// The deterministic greedy layout on its own.
    pub fn optimize(&self, candidates: &ZoneCandidates) -> Variant {
        let anchors = derive_anchors(&candidates.rooms());
        self.attempt(candidates, &anchors, None)
    }

    /// One placement pass. `explore` is `None` for the deterministic pass.
    fn attempt(
        &self,
        candidates: &ZoneCandidates,
        anchors: &AnchorMap,
        mut explore: Option<&mut dyn RngCore>,
    ) -> Variant {
        let mut priority = self.config.priority.clone();
        if let Some(rng) = explore.as_deref_mut() {
            let fixed = self.config.fixed_priority_len.min(priority.len());
            priority[fixed..].shuffle(rng);
        }

        let mut order: Vec<(RoomId, &[Zone])> = candidates.iter().collect();
        // Stable: rooms of equal priority keep their candidate order.
        order.sort_by_key(|(room, _)| {
            priority
                .iter()
                .position(|kind| *kind == room.kind)
                .unwrap_or(priority.len())
        });

        let mut assignment = Assignment::new();
        let mut occupancy = Occupancy::new(self.config.zone_capacity);
        let mut notes = Vec::new();

        for (room, zones) in order {
            let anchor = anchors
                .get(&room)
                .and_then(|list| list.iter().find_map(|a| assignment.get(a).copied()));

            let mut options = zones.to_vec();
            if anchor.is_none() {
                if let Some(rng) = explore.as_deref_mut() {
                    if rng.gen_bool(self.config.exploration_chance.clamp(0.0, 1.0)) {
                        options.shuffle(rng);
                    }
                }
            }

            let placement = if let Some(zone) = claim(options, anchor, &occupancy) {
                Placement::Zone(zone)
            } else if let Some(zone) = claim(self.config.fallback.clone(), anchor, &occupancy) {
                log::warn!("{room}: no candidate zone had capacity, fell back to {zone}");
                notes.push(format!("{room} placed in {zone} (Fallback)"));
                Placement::Zone(zone)
            } else {
                Placement::Flexible
            };

            if let Placement::Zone(zone) = placement {
                occupancy.claim(zone);
            }
            assignment.insert(room, placement);
        }

        Variant { assignment, notes }
    }
}

/// Placement policy shared by the candidate list and the fallback order:
/// order by distance to the anchor (stable), then take the first zone
/// with capacity.
fn claim(mut zones: Vec<Zone>, anchor: Option<Placement>, occupancy: &Occupancy) -> Option<Zone> {
    if let Some(anchor) = anchor {
        zones.sort_by_key(|z| anchor.distance_to(*z));
    }
    zones.into_iter().find(|z| occupancy.has_room(*z))
}
