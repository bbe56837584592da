//! Floor allocation — which rooms go on which floor.
//!
//! Shared rooms always sit on the ground floor. Bedrooms and bathrooms
//! are spread across floors with a few household heuristics:
//! - the master bedroom and its attached bathroom go upstairs
//! - one more bedroom joins the master upstairs, the rest spill to ground
//! - extra bathrooms follow the bedrooms they are most likely to serve
//!
//! Every floor of a multi-storey house gets a staircase.

use serde::{Deserialize, Serialize};

use crate::request::RoomRequirements;
use crate::rooms::{RoomId, RoomKind};

/// Floor number, 0 = ground.
pub type FloorIndex = usize;

pub const GROUND: FloorIndex = 0;
pub const FIRST: FloorIndex = 1;
pub const SECOND: FloorIndex = 2;

/// Rooms per floor, in allocation order, plus any advisory notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPlan {
    /// `floors[i]` holds the rooms of floor `i`.
    pub floors: Vec<Vec<RoomId>>,
    pub notes: Vec<String>,
}

impl FloorPlan {
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn rooms_on(&self, floor: FloorIndex) -> &[RoomId] {
        self.floors.get(floor).map_or(&[], Vec::as_slice)
    }

    pub fn total_rooms(&self) -> usize {
        self.floors.iter().map(Vec::len).sum()
    }

    /// Which floor a room was placed on (first match for staircases).
    pub fn floor_of(&self, room: RoomId) -> Option<FloorIndex> {
        self.floors.iter().position(|rooms| rooms.contains(&room))
    }
}

/// Parse a free-text floor descriptor ("G+1", "2 floors", "g+2") into 1..=3.
///
/// Three-floor tokens are checked first so "G+2" does not match the "2"
/// of the two-floor tokens. Anything unrecognized is a single floor.
pub fn floor_count(descriptor: &str) -> usize {
    let text = descriptor.to_lowercase();
    if text.contains("g+2") || text.contains('3') {
        3
    } else if text.contains("g+1") || text.contains('2') {
        2
    } else {
        1
    }
}

/// Distribute the required rooms across floors.
pub fn allocate(requirements: &RoomRequirements, descriptor: &str) -> FloorPlan {
    let count = floor_count(descriptor);
    let mut plan = FloorPlan {
        floors: vec![Vec::new(); count],
        notes: Vec::new(),
    };

    plan.floors[GROUND].extend(shared_rooms(requirements));

    if count == 1 {
        allocate_single_floor(requirements, &mut plan.floors[GROUND]);
    } else {
        allocate_multi_floor(requirements, &mut plan);
    }

    if count > 2 {
        plan.floors[SECOND].push(RoomId::staircase());
        let note = "Only a staircase is placed on the second floor; rooms are distributed across ground and first floor".to_string();
        log::warn!("{note} (descriptor {descriptor:?})");
        plan.notes.push(note);
    }

    plan
}

/// Enabled shared rooms, in their ground-floor order.
fn shared_rooms(req: &RoomRequirements) -> Vec<RoomId> {
    [
        (req.parking, RoomKind::Parking),
        (req.living_room, RoomKind::LivingRoom),
        (req.kitchen, RoomKind::Kitchen),
        (req.dining_area, RoomKind::DiningArea),
        (req.pooja_room, RoomKind::PoojaRoom),
        (req.study_room, RoomKind::StudyRoom),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, kind)| RoomId::single(kind))
    .collect()
}

fn allocate_single_floor(req: &RoomRequirements, ground: &mut Vec<RoomId>) {
    if req.bedrooms > 0 {
        ground.push(RoomId::master_bedroom());
        ground.extend((2..=req.bedrooms).map(RoomId::bedroom));
    }
    ground.extend((1..=req.bathrooms).map(RoomId::bathroom));
    if req.balcony {
        ground.push(RoomId::single(RoomKind::Balcony));
    }
}

fn allocate_multi_floor(req: &RoomRequirements, plan: &mut FloorPlan) {
    for rooms in plan.floors.iter_mut().take(2) {
        rooms.push(RoomId::staircase());
    }

    // ── Bedrooms ─────────────────────────────────────────────
    if req.bedrooms > 0 {
        plan.floors[FIRST].push(RoomId::master_bedroom());
    }
    if req.bedrooms > 1 {
        plan.floors[FIRST].push(RoomId::bedroom(2));
    }
    plan.floors[GROUND].extend((3..=req.bedrooms).map(RoomId::bedroom));

    // ── Bathrooms ────────────────────────────────────────────
    let ground_beds = count_bedrooms(&plan.floors[GROUND]);
    let first_beds = count_bedrooms(&plan.floors[FIRST]);

    let mut targets: Vec<FloorIndex> = Vec::with_capacity(req.bathrooms as usize);
    // Attached to the master bedroom.
    if targets.len() < req.bathrooms as usize {
        targets.push(FIRST);
    }
    if targets.len() < req.bathrooms as usize && ground_beds > 0 {
        targets.push(GROUND);
    }
    if targets.len() < req.bathrooms as usize && first_beds > 1 {
        targets.push(FIRST);
    }
    targets.resize(req.bathrooms as usize, FIRST);

    // Identifiers follow placement order.
    for (i, floor) in targets.into_iter().enumerate() {
        plan.floors[floor].push(RoomId::bathroom(i as u32 + 1));
    }

    if req.balcony {
        plan.floors[FIRST].push(RoomId::single(RoomKind::Balcony));
    }
}

fn count_bedrooms(rooms: &[RoomId]) -> usize {
    rooms.iter().filter(|r| r.kind.is_bedroom()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<RoomId> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    fn requirements(bedrooms: u32, bathrooms: u32) -> RoomRequirements {
        RoomRequirements {
            bedrooms,
            bathrooms,
            ..RoomRequirements::default()
        }
    }

    #[test]
    fn floor_descriptor_parsing() {
        assert_eq!(floor_count("G"), 1);
        assert_eq!(floor_count("single"), 1);
        assert_eq!(floor_count("G+1"), 2);
        assert_eq!(floor_count("2 floors"), 2);
        assert_eq!(floor_count("G+2"), 3);
        assert_eq!(floor_count("3"), 3);
        assert_eq!(floor_count(""), 1);
    }

    #[test]
    fn duplex_scenario() {
        let plan = allocate(&requirements(3, 2), "G+1");
        assert_eq!(plan.floor_count(), 2);
        assert_eq!(
            plan.floors[GROUND],
            ids(&[
                "parking",
                "living_room",
                "kitchen",
                "dining_area",
                "pooja_room",
                "staircase",
                "bedroom_3",
                "bathroom_2",
            ])
        );
        assert_eq!(
            plan.floors[FIRST],
            ids(&["staircase", "master_bedroom", "bedroom_2", "bathroom"])
        );
        assert!(plan.notes.is_empty());
    }

    #[test]
    fn single_floor_puts_everything_on_ground() {
        let plan = allocate(&requirements(2, 2), "G");
        assert_eq!(plan.floor_count(), 1);
        let ground = plan.rooms_on(GROUND);
        assert!(ground.contains(&RoomId::master_bedroom()));
        assert!(ground.contains(&RoomId::bedroom(2)));
        assert!(ground.contains(&RoomId::bathroom(1)));
        assert!(ground.contains(&RoomId::bathroom(2)));
        assert!(!ground.contains(&RoomId::staircase()));
    }

    #[test]
    fn zero_counts_yield_only_shared_rooms() {
        let req = RoomRequirements {
            bedrooms: 0,
            bathrooms: 0,
            kitchen: false,
            living_room: false,
            dining_area: false,
            pooja_room: false,
            study_room: false,
            balcony: false,
            parking: false,
        };
        let plan = allocate(&req, "G");
        assert_eq!(plan.total_rooms(), 0);
    }

    #[test]
    fn bathroom_stays_upstairs_when_ground_has_no_bedroom() {
        let plan = allocate(&requirements(2, 2), "G+1");
        assert_eq!(count_bedrooms(plan.rooms_on(GROUND)), 0);
        // Second bathroom skips ground, joins the two bedrooms upstairs.
        assert_eq!(plan.floor_of(RoomId::bathroom(2)), Some(FIRST));
    }

    #[test]
    fn extra_bathrooms_spill_upstairs_sequentially() {
        let plan = allocate(&requirements(4, 5), "G+1");
        assert_eq!(plan.floor_of(RoomId::bathroom(1)), Some(FIRST));
        assert_eq!(plan.floor_of(RoomId::bathroom(2)), Some(GROUND));
        assert_eq!(plan.floor_of(RoomId::bathroom(3)), Some(FIRST));
        assert_eq!(plan.floor_of(RoomId::bathroom(4)), Some(FIRST));
        assert_eq!(plan.floor_of(RoomId::bathroom(5)), Some(FIRST));
        assert_eq!(plan.floor_of(RoomId::bedroom(4)), Some(GROUND));
    }

    #[test]
    fn every_room_allocated_once() {
        for beds in 0..6 {
            for baths in 0..6 {
                for floors in ["G", "G+1", "G+2"] {
                    let plan = allocate(&requirements(beds, baths), floors);
                    let all: Vec<RoomId> = plan
                        .floors
                        .iter()
                        .flatten()
                        .copied()
                        .filter(|r| r.kind != RoomKind::Staircase)
                        .collect();
                    let unique: std::collections::HashSet<_> = all.iter().collect();
                    assert_eq!(unique.len(), all.len(), "duplicate in {floors} {beds}/{baths}");
                    let bedrooms = all.iter().filter(|r| r.kind.is_bedroom()).count();
                    let bathrooms = all
                        .iter()
                        .filter(|r| r.kind == RoomKind::Bathroom)
                        .count();
                    assert_eq!(bedrooms, beds as usize);
                    assert_eq!(bathrooms, baths as usize);
                }
            }
        }
    }

    #[test]
    fn three_floors_add_staircase_and_note() {
        let plan = allocate(&requirements(3, 2), "G+2");
        assert_eq!(plan.floor_count(), 3);
        assert_eq!(plan.floors[SECOND], vec![RoomId::staircase()]);
        assert_eq!(plan.notes.len(), 1);
        // Ground and first floor match the duplex distribution.
        let duplex = allocate(&requirements(3, 2), "G+1");
        assert_eq!(plan.floors[GROUND], duplex.floors[GROUND]);
        assert_eq!(plan.floors[FIRST], duplex.floors[FIRST]);
    }

    #[test]
    fn balcony_goes_upstairs() {
        let mut req = requirements(2, 1);
        req.balcony = true;
        req.study_room = true;
        let plan = allocate(&req, "G+1");
        assert_eq!(
            plan.floor_of(RoomId::single(RoomKind::Balcony)),
            Some(FIRST)
        );
        assert_eq!(
            plan.floor_of(RoomId::single(RoomKind::StudyRoom)),
            Some(GROUND)
        );
    }

    #[test]
    fn deterministic() {
        let a = allocate(&requirements(4, 3), "G+1");
        let b = allocate(&requirements(4, 3), "G+1");
        assert_eq!(a, b);
    }
}
