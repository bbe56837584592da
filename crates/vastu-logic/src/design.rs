//! End-to-end design pipeline.
//!
//! `DesignRequest → FloorPlan → per-floor ZoneCandidates → Variant → ScoreReport`
//!
//! A [`DesignEngine`] holds the immutable rule, scoring and optimizer
//! tables. Build it once at startup and share it by reference; every call
//! to [`DesignEngine::plan`] is independent.
//!
//! Options cycle through three strategies so that a request for several
//! plans yields genuinely different layouts:
//!
//! | Strategy | Candidate zones |
//! |----------|-----------------|
//! | `Compliance` | the request's own strictness level |
//! | `Balanced` | medium strictness, first choice moved to the back |
//! | `Experimental` | medium strictness, shuffled |

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::floors::{self, FloorIndex, FloorPlan};
use crate::optimizer::{Assignment, LayoutOptimizer, OptimizerConfig, ZoneCandidates};
use crate::request::DesignRequest;
use crate::rooms::RoomId;
use crate::rules::{RuleTable, Strictness};
use crate::scoring::{ComplianceScorer, ScoreReport, ScoringTable};
use crate::zones::{Placement, Zone};

/// How an option's candidate zones are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Compliance,
    Balanced,
    Experimental,
}

impl Strategy {
    pub const CYCLE: [Strategy; 3] = [
        Strategy::Compliance,
        Strategy::Balanced,
        Strategy::Experimental,
    ];

    /// Strategy for the option at `index` (0-based).
    pub fn for_option(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Compliance => "compliance",
            Strategy::Balanced => "balance",
            Strategy::Experimental => "exploration",
        }
    }
}

/// The layout of one floor within an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub floor: FloorIndex,
    pub assignment: Assignment,
    pub notes: Vec<String>,
}

/// One complete design alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignOption {
    /// 1-based option number.
    pub number: usize,
    pub strategy: Strategy,
    pub floors: Vec<FloorLayout>,
    pub score: ScoreReport,
    pub notes: Vec<String>,
}

impl DesignOption {
    /// Every `(room, placement)` across floors, ground first.
    pub fn entries(&self) -> impl Iterator<Item = (&RoomId, &Placement)> {
        self.floors.iter().flat_map(|f| f.assignment.iter())
    }
}

/// Everything produced for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPlan {
    pub allocation: FloorPlan,
    pub options: Vec<DesignOption>,
}

impl DesignPlan {
    pub fn best_option(&self) -> Option<&DesignOption> {
        self.options
            .iter()
            .max_by(|a, b| a.score.percentage.total_cmp(&b.score.percentage))
    }
}

/// Immutable engine state, shared across requests.
#[derive(Debug, Clone, Default)]
pub struct DesignEngine {
    rules: RuleTable,
    scorer: ComplianceScorer,
    optimizer: LayoutOptimizer,
}

impl DesignEngine {
    pub fn new(rules: RuleTable, scoring: ScoringTable, optimizer: OptimizerConfig) -> Self {
        Self {
            rules,
            scorer: ComplianceScorer::new(scoring),
            optimizer: LayoutOptimizer::new(optimizer),
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn scorer(&self) -> &ComplianceScorer {
        &self.scorer
    }

    pub fn optimizer(&self) -> &LayoutOptimizer {
        &self.optimizer
    }

    /// Candidate zones for a floor's rooms under `strategy`.
    pub fn candidates(
        &self,
        rooms: &[RoomId],
        strategy: Strategy,
        strictness: Strictness,
        rng: &mut impl Rng,
    ) -> ZoneCandidates {
        ZoneCandidates::for_rooms(rooms, |room| {
            let kind = room.kind;
            match strategy {
                Strategy::Compliance => self.rules.zones_for(kind, strictness),
                Strategy::Balanced => {
                    let mut zones = self.rules.zones_for(kind, Strictness::Medium);
                    if zones.len() > 1 {
                        zones.rotate_left(1);
                    }
                    zones
                }
                Strategy::Experimental => {
                    let mut zones: Vec<Zone> = self.rules.zones_for(kind, Strictness::Medium);
                    zones.shuffle(rng);
                    zones
                }
            }
        })
    }

    /// Score any set of placements against this engine's rules.
    pub fn score<'a>(
        &self,
        layout: impl IntoIterator<Item = (&'a RoomId, &'a Placement)>,
    ) -> ScoreReport {
        self.scorer.calculate_score(layout, &self.rules)
    }

    /// Run the whole pipeline for a request.
    pub fn plan(&self, request: &DesignRequest, rng: &mut impl Rng) -> DesignPlan {
        let allocation = floors::allocate(&request.rooms, &request.building.floors);
        let strictness = request.strictness();
        let count = request.output.number_of_plans as usize;

        let options = (0..count)
            .map(|i| {
                let strategy = Strategy::for_option(i);
                self.build_option(i + 1, strategy, strictness, &allocation, rng)
            })
            .collect::<Vec<_>>();

        log::info!(
            "planned {} option(s) over {} floor(s) for {} rooms",
            options.len(),
            allocation.floor_count(),
            allocation.total_rooms()
        );

        DesignPlan {
            allocation,
            options,
        }
    }

    fn build_option(
        &self,
        number: usize,
        strategy: Strategy,
        strictness: Strictness,
        allocation: &FloorPlan,
        rng: &mut impl Rng,
    ) -> DesignOption {
        let mut floors = Vec::with_capacity(allocation.floor_count());
        let mut notes = vec![format!("Option {number} optimized for {}.", strategy.label())];
        notes.extend(allocation.notes.iter().cloned());

        for (floor, rooms) in allocation.floors.iter().enumerate() {
            let candidates = self.candidates(rooms, strategy, strictness, rng);
            let variant = self
                .optimizer
                .generate_variants(&candidates, 1, rng)
                .into_iter()
                .next()
                .unwrap_or_else(|| self.optimizer.optimize(&candidates));
            notes.extend(variant.notes.iter().cloned());
            floors.push(FloorLayout {
                floor,
                assignment: variant.assignment,
                notes: variant.notes,
            });
        }

        let score = self
            .scorer
            .calculate_score(floors.iter().flat_map(|f| f.assignment.iter()), &self.rules);
        log::debug!(
            "option {number} ({}) scored {:.2}",
            strategy.label(),
            score.percentage
        );

        DesignOption {
            number,
            strategy,
            floors,
            score,
            notes,
        }
    }
}
