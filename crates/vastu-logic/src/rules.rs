//! Zone rule table — which zones suit which room kind.
//!
//! Loaded once at startup (built in, or from `data/vastu_rules.json`) and
//! shared read-only by every request. Each rule names three zone sets; a
//! zone outside all three is neutral.
//!
//! ```
//! use vastu_logic::rooms::RoomKind;
//! use vastu_logic::rules::{RuleTable, Strictness};
//! use vastu_logic::zones::Zone;
//!
//! let rules = RuleTable::builtin();
//! let zones = rules.zones_for(RoomKind::Kitchen, Strictness::Medium);
//! assert_eq!(zones, vec![Zone::SE, Zone::NW]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::rooms::RoomKind;
use crate::zones::Zone;

/// Preferred / allowed / avoid zones for one room kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRule {
    #[serde(default)]
    pub preferred: Vec<Zone>,
    #[serde(default)]
    pub allowed: Vec<Zone>,
    #[serde(default)]
    pub avoid: Vec<Zone>,
}

impl ZoneRule {
    fn new(preferred: &[Zone], allowed: &[Zone], avoid: &[Zone]) -> Self {
        Self {
            preferred: preferred.to_vec(),
            allowed: allowed.to_vec(),
            avoid: avoid.to_vec(),
        }
    }
}

/// How many zones count as acceptable for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Preferred zones only.
    High,
    /// Preferred, then allowed.
    Medium,
    /// Everything that is not explicitly avoided.
    Low,
}

impl Strictness {
    /// Case-insensitive; anything other than "high" or "medium" is `Low`.
    pub fn parse(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "high" => Strictness::High,
            "medium" => Strictness::Medium,
            _ => Strictness::Low,
        }
    }
}

/// The full rule table, keyed by room kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: BTreeMap<RoomKind, ZoneRule>,
}

impl RuleTable {
    /// The default table shipped with the engine.
    pub fn builtin() -> Self {
        use Zone::*;

        let mut rules = BTreeMap::new();
        rules.insert(RoomKind::Kitchen, ZoneRule::new(&[SE], &[NW], &[NE]));
        rules.insert(RoomKind::MasterBedroom, ZoneRule::new(&[SW], &[W, S], &[NE]));
        rules.insert(RoomKind::PoojaRoom, ZoneRule::new(&[NE], &[E, N], &[S, SW]));
        rules.insert(RoomKind::Bathroom, ZoneRule::new(&[NW], &[SE], &[NE, Center]));
        rules.insert(RoomKind::LivingRoom, ZoneRule::new(&[NE, N], &[E, NW], &[SW]));
        rules.insert(RoomKind::Staircase, ZoneRule::new(&[S, SW, W], &[], &[NE]));
        rules.insert(RoomKind::DiningArea, ZoneRule::new(&[W], &[E, N], &[SW]));
        rules.insert(RoomKind::Bedroom, ZoneRule::new(&[W, NW], &[S], &[NE]));
        rules.insert(RoomKind::Parking, ZoneRule::new(&[NW, SE], &[], &[SW, NE]));
        rules.insert(RoomKind::StudyRoom, ZoneRule::new(&[W, NE], &[N, E], &[SW]));
        rules.insert(RoomKind::Balcony, ZoneRule::new(&[N, E, NE], &[NW], &[SW]));
        Self { rules }
    }

    /// Parse a `{"rules": {...}}` document.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_rules(rules: BTreeMap<RoomKind, ZoneRule>) -> Self {
        Self { rules }
    }

    /// Report every zone that a rule lists in more than one set.
    pub fn validate(&self) -> Vec<RuleError> {
        let mut errors = Vec::new();
        for (&room, rule) in &self.rules {
            for zone in Zone::COMPASS {
                let hits = [&rule.preferred, &rule.allowed, &rule.avoid]
                    .iter()
                    .filter(|set| set.contains(&zone))
                    .count();
                if hits > 1 {
                    errors.push(RuleError::OverlappingZones { room, zone });
                }
            }
        }
        errors
    }

    pub fn rule(&self, kind: RoomKind) -> Option<&ZoneRule> {
        self.rules.get(&kind)
    }

    pub fn rules(&self) -> &BTreeMap<RoomKind, ZoneRule> {
        &self.rules
    }

    /// Acceptable zones for a room kind, preferred first.
    ///
    /// A kind with no rule behaves as an empty rule: nothing at high or
    /// medium strictness, every zone at low strictness.
    pub fn zones_for(&self, kind: RoomKind, strictness: Strictness) -> Vec<Zone> {
        let empty = ZoneRule::default();
        let rule = self.rules.get(&kind).unwrap_or(&empty);
        match strictness {
            Strictness::High => rule.preferred.clone(),
            Strictness::Medium => rule
                .preferred
                .iter()
                .chain(rule.allowed.iter())
                .copied()
                .collect(),
            Strictness::Low => Zone::COMPASS
                .iter()
                .copied()
                .filter(|z| !rule.avoid.contains(z))
                .collect(),
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strictness_parsing() {
        assert_eq!(Strictness::parse("high"), Strictness::High);
        assert_eq!(Strictness::parse("High"), Strictness::High);
        assert_eq!(Strictness::parse(" MEDIUM "), Strictness::Medium);
        assert_eq!(Strictness::parse("low"), Strictness::Low);
        assert_eq!(Strictness::parse("whatever"), Strictness::Low);
    }

    #[test]
    fn high_is_preferred_only() {
        let rules = RuleTable::builtin();
        assert_eq!(
            rules.zones_for(RoomKind::MasterBedroom, Strictness::High),
            vec![Zone::SW]
        );
    }

    #[test]
    fn medium_appends_allowed() {
        let rules = RuleTable::builtin();
        assert_eq!(
            rules.zones_for(RoomKind::MasterBedroom, Strictness::Medium),
            vec![Zone::SW, Zone::W, Zone::S]
        );
    }

    #[test]
    fn low_excludes_avoid() {
        let rules = RuleTable::builtin();
        let zones = rules.zones_for(RoomKind::Bathroom, Strictness::Low);
        assert_eq!(zones.len(), 7);
        assert!(!zones.contains(&Zone::NE));
        assert!(!zones.contains(&Zone::Center));
        assert_eq!(zones[0], Zone::N);
    }

    #[test]
    fn missing_rule_behaves_as_empty() {
        let rules = RuleTable::from_rules(BTreeMap::new());
        assert!(rules.zones_for(RoomKind::Kitchen, Strictness::High).is_empty());
        assert!(rules
            .zones_for(RoomKind::Kitchen, Strictness::Medium)
            .is_empty());
        assert_eq!(rules.zones_for(RoomKind::Kitchen, Strictness::Low).len(), 9);
    }

    #[test]
    fn builtin_has_no_overlaps() {
        let errors = RuleTable::builtin().validate();
        assert!(errors.is_empty(), "builtin rules overlap: {errors:?}");
    }

    #[test]
    fn overlap_is_reported() {
        let mut map = BTreeMap::new();
        map.insert(
            RoomKind::Kitchen,
            ZoneRule::new(&[Zone::SE], &[Zone::SE], &[]),
        );
        let errors = RuleTable::from_rules(map).validate();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            RuleError::OverlappingZones {
                room: RoomKind::Kitchen,
                zone: Zone::SE
            }
        ));
    }

    #[test]
    fn json_defaults_missing_sets() {
        let json = r#"{"rules": {"staircase": {"preferred": ["S", "SW"], "avoid": ["NE"]}}}"#;
        let rules = RuleTable::from_json(json).unwrap();
        let rule = rules.rule(RoomKind::Staircase).unwrap();
        assert_eq!(rule.preferred, vec![Zone::S, Zone::SW]);
        assert!(rule.allowed.is_empty());
        assert_eq!(rule.avoid, vec![Zone::NE]);
    }

    #[test]
    fn json_rejects_unknown_zone() {
        let json = r#"{"rules": {"kitchen": {"preferred": ["Middle"]}}}"#;
        assert!(matches!(
            RuleTable::from_json(json),
            Err(RuleError::Parse(_))
        ));
    }

    #[test]
    fn builtin_round_trips_through_json() {
        let rules = RuleTable::builtin();
        let json = serde_json::to_string(&rules).unwrap();
        let back = RuleTable::from_json(&json).unwrap();
        assert_eq!(rules, back);
    }
}
