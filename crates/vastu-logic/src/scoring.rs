//! Compliance scoring — how well a finished layout follows the rule table.
//!
//! Each room contributes its kind's weight to the maximum score and earns:
//! - the full weight in a preferred zone
//! - 70% in an allowed zone
//! - nothing in an avoided zone
//! - 40% anywhere else (neutral, including `Flexible`)
//!
//! The maximum is recomputed from the rooms actually present, so partial
//! layouts still land on a meaningful 0–100 scale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rooms::{RoomId, RoomKind};
use crate::rules::RuleTable;
use crate::zones::Placement;

/// Weight for kinds missing from the weight table.
pub const DEFAULT_WEIGHT: u32 = 5;

const ALLOWED_FACTOR: f64 = 0.7;
const NEUTRAL_FACTOR: f64 = 0.4;

const GENERIC_BENEFIT: &str = "Balances the layout's energy flow.";

/// Explanations shown next to a room's score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rationale {
    pub preferred: Option<String>,
    pub allowed: Option<String>,
    pub avoid: Option<String>,
    pub flexible: Option<String>,
    pub benefit: Option<String>,
}

impl Rationale {
    fn new(
        preferred: &str,
        allowed: Option<&str>,
        avoid: &str,
        flexible: &str,
        benefit: &str,
    ) -> Self {
        Self {
            preferred: Some(preferred.to_string()),
            allowed: allowed.map(str::to_string),
            avoid: Some(avoid.to_string()),
            flexible: Some(flexible.to_string()),
            benefit: Some(benefit.to_string()),
        }
    }
}

/// Which rule set a placement fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Preferred,
    Allowed,
    Avoid,
    Neutral,
}

/// Weights and rationale text per room kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub weights: BTreeMap<RoomKind, u32>,
    pub default_weight: u32,
    pub rationale: BTreeMap<RoomKind, Rationale>,
}

impl ScoringTable {
    pub fn builtin() -> Self {
        let weights = BTreeMap::from([
            (RoomKind::PoojaRoom, 20),
            (RoomKind::Kitchen, 20),
            (RoomKind::MasterBedroom, 15),
            (RoomKind::LivingRoom, 10),
            (RoomKind::Bathroom, 10),
            (RoomKind::Staircase, 10),
            (RoomKind::Bedroom, 10),
        ]);

        let mut rationale = BTreeMap::new();
        rationale.insert(
            RoomKind::Kitchen,
            Rationale::new(
                "The South-East (SE) is the Agni (fire) corner, ideal for cooking.",
                Some("North-West (NW) is a supportive alternative for the kitchen."),
                "North-East (NE) clashes water with fire and should not hold the kitchen.",
                "Placement is neutral but not optimal.",
                "SE placement harnesses the fire element, supporting health, digestion and family prosperity.",
            ),
        );
        rationale.insert(
            RoomKind::MasterBedroom,
            Rationale::new(
                "South-West (SW) brings stability, strength and leadership.",
                Some("West or South zones are acceptable for the master bedroom."),
                "North-East (NE) should be avoided for the master bedroom.",
                "Passable, though SW is strongly recommended.",
                "SW placement gives the head of the family stability, confidence and sound sleep.",
            ),
        );
        rationale.insert(
            RoomKind::PoojaRoom,
            Rationale::new(
                "North-East (NE) is the Ishan corner, suited to prayer and meditation.",
                Some("East or North walls are good alternatives."),
                "South (S) or South-West (SW) should not hold the pooja room.",
                "Placement is neutral.",
                "NE placement supports spiritual growth, calm and mental clarity.",
            ),
        );
        rationale.insert(
            RoomKind::Bathroom,
            Rationale::new(
                "North-West (NW) suits waste disposal and cleanliness.",
                Some("South-East (SE) is also acceptable."),
                "Bathrooms never belong in the North-East (NE) or the centre (Brahmasthan).",
                "Placement is neutral.",
                "NW placement helps waste leave the house and keeps negative energy from settling.",
            ),
        );
        rationale.insert(
            RoomKind::LivingRoom,
            Rationale::new(
                "North-East (NE) or North (N) lets positive morning energy into the house.",
                Some("East and North-West are also good locations."),
                "South-West (SW) is best kept away from the main living space.",
                "Placement is generally flexible.",
                "NE/N placement invites fresh prana and easy social life for the family.",
            ),
        );
        rationale.insert(
            RoomKind::Staircase,
            Rationale::new(
                "South (S), South-West (SW) or West (W) suit heavy structures like stairs.",
                None,
                "North-East (NE) should stay light and open, not carry a staircase.",
                "Placement is neutral.",
                "Heavy zones (S/SW) give structural stability and block negative energy from those directions.",
            ),
        );
        rationale.insert(
            RoomKind::DiningArea,
            Rationale::new(
                "West (W) is the best zone for dining and nourishment.",
                Some("East (E) or North (N) are decent alternatives."),
                "South-West (SW) is not recommended for dining.",
                "Placement is neutral.",
                "West placement keeps meals relaxed and supports prosperity.",
            ),
        );
        rationale.insert(
            RoomKind::Bedroom,
            Rationale::new(
                "West (W) or North-West (NW) suits children or guests.",
                Some("South (S) is also stable."),
                "North-East (NE) is best avoided for bedrooms.",
                "Placement is neutral.",
                "West placement helps study and gains; NW supports guests and movement.",
            ),
        );
        rationale.insert(
            RoomKind::Parking,
            Rationale::new(
                "North-West (NW) or South-East (SE) supports movement and mobility.",
                None,
                "South-West (SW) or North-East (NE) should not hold parking.",
                "Placement is neutral.",
                "NW placement keeps vehicles in regular use and lowers maintenance.",
            ),
        );

        Self {
            weights,
            default_weight: DEFAULT_WEIGHT,
            rationale,
        }
    }

    pub fn weight(&self, kind: RoomKind) -> u32 {
        self.weights
            .get(&kind)
            .copied()
            .unwrap_or(self.default_weight)
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Score and explanation for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomScore {
    pub room: RoomId,
    pub placement: Placement,
    pub verdict: Verdict,
    pub score: f64,
    pub max: u32,
    pub reason: String,
    pub benefit: String,
}

/// Result of scoring a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// 0–100, two decimals.
    pub percentage: f64,
    pub total: f64,
    pub max_score: u32,
    pub breakdown: Vec<RoomScore>,
}

impl ScoreReport {
    pub fn room(&self, room: RoomId) -> Option<&RoomScore> {
        self.breakdown.iter().find(|s| s.room == room)
    }
}

/// Scores layouts against a rule table.
#[derive(Debug, Clone, Default)]
pub struct ComplianceScorer {
    table: ScoringTable,
}

impl ComplianceScorer {
    pub fn new(table: ScoringTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Score every `(room, placement)` entry. Entries may span several
    /// floors; each one counts toward the maximum.
    pub fn calculate_score<'a>(
        &self,
        layout: impl IntoIterator<Item = (&'a RoomId, &'a Placement)>,
        rules: &RuleTable,
    ) -> ScoreReport {
        let mut total = 0.0;
        let mut max_score = 0;
        let mut breakdown = Vec::new();

        for (&room, &placement) in layout {
            let kind = room.kind;
            let weight = self.table.weight(kind);
            max_score += weight;

            let verdict = verdict(rules, kind, placement);
            let score = match verdict {
                Verdict::Preferred => weight as f64,
                Verdict::Allowed => weight as f64 * ALLOWED_FACTOR,
                Verdict::Avoid => 0.0,
                Verdict::Neutral => weight as f64 * NEUTRAL_FACTOR,
            };
            total += score;

            let text = self.table.rationale.get(&kind);
            let reason = reason_text(text, verdict, placement, kind);
            let benefit = text
                .and_then(|t| t.benefit.clone())
                .unwrap_or_else(|| GENERIC_BENEFIT.to_string());

            breakdown.push(RoomScore {
                room,
                placement,
                verdict,
                score: round2(score),
                max: weight,
                reason,
                benefit,
            });
        }

        let percentage = if max_score == 0 {
            0.0
        } else {
            round2(total / max_score as f64 * 100.0)
        };

        ScoreReport {
            percentage,
            total: round2(total),
            max_score,
            breakdown,
        }
    }
}

fn verdict(rules: &RuleTable, kind: RoomKind, placement: Placement) -> Verdict {
    let (Some(rule), Some(zone)) = (rules.rule(kind), placement.zone()) else {
        return Verdict::Neutral;
    };
    if rule.preferred.contains(&zone) {
        Verdict::Preferred
    } else if rule.allowed.contains(&zone) {
        Verdict::Allowed
    } else if rule.avoid.contains(&zone) {
        Verdict::Avoid
    } else {
        Verdict::Neutral
    }
}

fn reason_text(
    text: Option<&Rationale>,
    verdict: Verdict,
    placement: Placement,
    kind: RoomKind,
) -> String {
    let specific = text.and_then(|t| match verdict {
        Verdict::Preferred => t.preferred.clone(),
        Verdict::Allowed => t.allowed.clone(),
        Verdict::Avoid => t.avoid.clone(),
        Verdict::Neutral => t.flexible.clone(),
    });
    specific.unwrap_or_else(|| match verdict {
        Verdict::Preferred => format!("{placement} is the best zone for {kind}."),
        Verdict::Allowed => format!("{placement} is an allowed zone for {kind}."),
        Verdict::Avoid => format!("{placement} should be avoided for {kind}."),
        Verdict::Neutral => format!("{placement} is a neutral placement for {kind}."),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::Assignment;
    use crate::zones::Zone;

    fn layout(entries: &[(&str, Placement)]) -> Assignment {
        entries
            .iter()
            .map(|(name, p)| (name.parse().unwrap(), *p))
            .collect()
    }

    fn score(entries: &[(&str, Placement)]) -> ScoreReport {
        ComplianceScorer::default().calculate_score(&layout(entries), &RuleTable::builtin())
    }

    #[test]
    fn preferred_zones_score_full_marks() {
        let report = score(&[
            ("kitchen", Zone::SE.into()),
            ("master_bedroom", Zone::SW.into()),
        ]);
        assert_eq!(report.percentage, 100.0);
        assert_eq!(report.max_score, 35);
        let kitchen = report.room("kitchen".parse().unwrap()).unwrap();
        assert_eq!(kitchen.score, 20.0);
        assert_eq!(kitchen.max, 20);
        let master = report.room(RoomId::master_bedroom()).unwrap();
        assert_eq!(master.score, 15.0);
        assert_eq!(master.max, 15);
    }

    #[test]
    fn avoid_zone_scores_zero() {
        let report = score(&[("kitchen", Zone::NE.into()), ("bathroom", Zone::NW.into())]);
        let kitchen = report.room("kitchen".parse().unwrap()).unwrap();
        assert_eq!(kitchen.score, 0.0);
        assert_eq!(kitchen.verdict, Verdict::Avoid);
        assert_eq!(report.percentage, round2(10.0 / 30.0 * 100.0));
    }

    #[test]
    fn allowed_and_neutral_factors() {
        let report = score(&[("kitchen", Zone::NW.into())]);
        assert_eq!(report.breakdown[0].score, 14.0);
        assert_eq!(report.percentage, 70.0);

        let report = score(&[("kitchen", Zone::W.into())]);
        assert_eq!(report.breakdown[0].score, 8.0);
        assert_eq!(report.breakdown[0].verdict, Verdict::Neutral);
        assert_eq!(report.percentage, 40.0);
    }

    #[test]
    fn flexible_counts_as_neutral() {
        let report = score(&[("bathroom", Placement::Flexible)]);
        assert_eq!(report.breakdown[0].verdict, Verdict::Neutral);
        assert_eq!(report.breakdown[0].score, 4.0);
    }

    #[test]
    fn unknown_weight_defaults() {
        let report = score(&[("dining_area", Zone::W.into())]);
        assert_eq!(report.max_score, DEFAULT_WEIGHT);
        assert_eq!(report.percentage, 100.0);
    }

    #[test]
    fn generic_rationale_fallback() {
        let report = score(&[("study_room", Zone::W.into())]);
        let study = &report.breakdown[0];
        assert_eq!(study.reason, "W is the best zone for study_room.");
        assert_eq!(study.benefit, GENERIC_BENEFIT);
    }

    #[test]
    fn empty_layout_scores_zero() {
        let report = score(&[]);
        assert_eq!(report.percentage, 0.0);
        assert_eq!(report.max_score, 0);
        assert!(report.breakdown.is_empty());
    }

    #[test]
    fn missing_rule_is_neutral() {
        let rules = RuleTable::from_rules(BTreeMap::new());
        let report = ComplianceScorer::default()
            .calculate_score(&layout(&[("kitchen", Zone::NE.into())]), &rules);
        assert_eq!(report.breakdown[0].verdict, Verdict::Neutral);
        assert_eq!(report.percentage, 40.0);
    }

    #[test]
    fn scoring_is_pure() {
        let entries = [
            ("kitchen", Placement::from(Zone::SE)),
            ("bedroom_2", Zone::S.into()),
            ("staircase", Zone::NE.into()),
        ];
        assert_eq!(score(&entries), score(&entries));
    }

    #[test]
    fn multi_floor_entries_all_count() {
        let ground = layout(&[("staircase", Zone::S.into())]);
        let first = layout(&[("staircase", Zone::NE.into())]);
        let report = ComplianceScorer::default()
            .calculate_score(ground.iter().chain(first.iter()), &RuleTable::builtin());
        assert_eq!(report.max_score, 20);
        assert_eq!(report.breakdown.len(), 2);
        assert_eq!(report.percentage, 50.0);
    }
}
