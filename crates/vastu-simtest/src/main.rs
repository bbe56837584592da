//! Vastu Headless Design Harness
//!
//! Runs the full layout pipeline on a design request and validates the
//! engine's invariants. Runs entirely in-process with no HTTP or rendering.
//!
//! Usage:
//!   cargo run -p vastu-simtest
//!   cargo run -p vastu-simtest -- --verbose --seed 42
//!   cargo run -p vastu-simtest -- path/to/request.json --rules path/to/rules.json
//!   cargo run -p vastu-simtest -- --json

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use vastu_logic::design::{DesignEngine, DesignPlan};
use vastu_logic::floors;
use vastu_logic::optimizer::{LayoutOptimizer, OptimizerConfig, ZoneCandidates};
use vastu_logic::request::{self, DesignRequest, RoomRequirements};
use vastu_logic::rooms::{RoomId, RoomKind};
use vastu_logic::rules::{RuleTable, Strictness};
use vastu_logic::scoring::{ComplianceScorer, ScoringTable};
use vastu_logic::zones::{Placement, Zone};

// ── Bundled data (same JSON the tests use) ──────────────────────────────
const RULES_JSON: &str = include_str!("../../../data/vastu_rules.json");
const REQUEST_JSON: &str = include_str!("../../../data/sample_request.json");

// ── Command line ────────────────────────────────────────────────────────

struct Options {
    verbose: bool,
    json: bool,
    seed: Option<u64>,
    rules_path: Option<String>,
    request_path: Option<String>,
    /// Flags or values that could not be understood.
    errors: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Options {
    let mut options = Options {
        verbose: false,
        json: false,
        seed: None,
        rules_path: None,
        request_path: None,
        errors: Vec::new(),
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--json" => options.json = true,
            "--seed" => match args.next().map(|s| s.parse::<u64>().map_err(|_| s)) {
                Some(Ok(seed)) => options.seed = Some(seed),
                Some(Err(bad)) => options.errors.push(format!("--seed expects a number, got {bad:?}")),
                None => options.errors.push("--seed expects a number".into()),
            },
            "--rules" => match args.next() {
                Some(path) => options.rules_path = Some(path),
                None => options.errors.push("--rules expects a path".into()),
            },
            flag if flag.starts_with("--") => options.errors.push(format!("unknown flag {flag}")),
            _ if options.request_path.is_some() => {
                options.errors.push(format!("unexpected extra argument {arg:?}"))
            }
            _ => options.request_path = Some(arg),
        }
    }
    options
}

fn load_text(path: Option<&str>, bundled: &'static str) -> Result<String, String> {
    match path {
        Some(p) => std::fs::read_to_string(p).map_err(|e| format!("cannot read {p}: {e}")),
        None => Ok(bundled.to_string()),
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let options = parse_args(std::env::args().skip(1));
    let seed = options.seed.unwrap_or_else(rand::random);
    if options.json {
        eprintln!("seed {seed}");
    } else {
        println!("=== Vastu Design Harness (seed {seed}) ===\n");
    }

    let mut results = Vec::new();

    // 0. Arguments
    if !options.errors.is_empty() {
        results.extend(options.errors.iter().map(|e| TestResult {
            name: "args".into(),
            passed: false,
            detail: e.clone(),
        }));
        finish(&results, options.verbose);
    }

    // 1. Rule table
    let rules = match load_rules(&options, &mut results) {
        Some(rules) => rules,
        None => finish(&results, options.verbose),
    };

    // 2. Request
    let request = match load_request(&options, &mut results) {
        Some(request) => request,
        None => finish(&results, options.verbose),
    };

    let engine = DesignEngine::new(rules, ScoringTable::builtin(), OptimizerConfig::default());
    let mut rng = StdRng::seed_from_u64(seed);
    let plan = engine.plan(&request, &mut rng);

    if options.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("cannot serialize plan: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // 3. Floor allocation sweep
    results.extend(validate_allocation(options.verbose));

    // 4. Optimizer invariants on the planned options
    results.extend(validate_plan(&request, &plan));

    // 5. Variant diversity and determinism
    results.extend(validate_variants(engine.rules(), seed));

    // 6. Scoring reference scenarios
    results.extend(validate_scoring(engine.rules()));

    print_plan(&plan, options.verbose);
    finish(&results, options.verbose);
}

fn finish(results: &[TestResult], verbose: bool) -> ! {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    std::process::exit(if failed > 0 { 1 } else { 0 });
}

// ── 1. Rule Table ───────────────────────────────────────────────────────

fn load_rules(options: &Options, results: &mut Vec<TestResult>) -> Option<RuleTable> {
    if !options.json {
        println!("--- Rule Table ---");
    }

    let text = match load_text(options.rules_path.as_deref(), RULES_JSON) {
        Ok(text) => text,
        Err(e) => {
            results.push(TestResult {
                name: "rules_read".into(),
                passed: false,
                detail: e,
            });
            return None;
        }
    };

    let rules = match RuleTable::from_json(&text) {
        Ok(rules) => rules,
        Err(e) => {
            results.push(TestResult {
                name: "rules_parse".into(),
                passed: false,
                detail: e.to_string(),
            });
            return None;
        }
    };

    let overlaps = rules.validate();
    results.push(TestResult {
        name: "rules_no_overlap".into(),
        passed: overlaps.is_empty(),
        detail: if overlaps.is_empty() {
            format!("{} room kinds, no zone in two sets", rules.rules().len())
        } else {
            overlaps
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let unruled: Vec<&str> = RoomKind::ALL
        .iter()
        .filter(|k| rules.rule(**k).is_none())
        .map(|k| k.key())
        .collect();
    results.push(TestResult {
        name: "rules_cover_all_kinds".into(),
        passed: unruled.is_empty(),
        detail: if unruled.is_empty() {
            "every room kind has a rule".into()
        } else {
            format!("no rule for: {}", unruled.join(", "))
        },
    });

    Some(rules)
}

// ── 2. Request ──────────────────────────────────────────────────────────

fn load_request(options: &Options, results: &mut Vec<TestResult>) -> Option<DesignRequest> {
    if !options.json {
        println!("--- Design Request ---");
    }

    let text = match load_text(options.request_path.as_deref(), REQUEST_JSON) {
        Ok(text) => text,
        Err(e) => {
            results.push(TestResult {
                name: "request_read".into(),
                passed: false,
                detail: e,
            });
            return None;
        }
    };

    let request: DesignRequest = match serde_json::from_str(&text) {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult {
                name: "request_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return None;
        }
    };

    let errors = request::validate_request(&request);
    results.push(TestResult {
        name: "request_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!(
                "{} bed / {} bath, floors {:?}, strictness {:?}",
                request.rooms.bedrooms,
                request.rooms.bathrooms,
                request.building.floors,
                request.strictness()
            )
        } else {
            format!("{errors:?}")
        },
    });

    errors.is_empty().then_some(request)
}

// ── 3. Floor Allocation ─────────────────────────────────────────────────

fn validate_allocation(verbose: bool) -> Vec<TestResult> {
    println!("--- Floor Allocation ---");
    let mut results = Vec::new();

    let mut mismatches = Vec::new();
    let mut checked = 0;
    for floors_desc in ["G", "G+1", "G+2"] {
        for bedrooms in 0..=6 {
            for bathrooms in 0..=6 {
                let req = RoomRequirements {
                    bedrooms,
                    bathrooms,
                    ..RoomRequirements::default()
                };
                let plan = floors::allocate(&req, floors_desc);
                checked += 1;

                let rooms: Vec<RoomId> = plan
                    .floors
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|r| r.kind != RoomKind::Staircase)
                    .collect();
                let unique: HashSet<RoomId> = rooms.iter().copied().collect();
                let beds = rooms.iter().filter(|r| r.kind.is_bedroom()).count();
                let baths = rooms
                    .iter()
                    .filter(|r| r.kind == RoomKind::Bathroom)
                    .count();

                if unique.len() != rooms.len()
                    || beds != bedrooms as usize
                    || baths != bathrooms as usize
                {
                    mismatches.push(format!("{floors_desc} {bedrooms}/{bathrooms}"));
                }
                if plan != floors::allocate(&req, floors_desc) {
                    mismatches.push(format!("{floors_desc} {bedrooms}/{bathrooms} nondeterministic"));
                }
            }
        }
    }
    results.push(TestResult {
        name: "allocation_partitions_rooms".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            format!("{checked} requirement sets allocate every room exactly once")
        } else {
            format!("mismatches: {}", mismatches.join(", "))
        },
    });

    let stairs_ok = ["G+1", "G+2"].iter().all(|desc| {
        let plan = floors::allocate(&RoomRequirements::default(), desc);
        plan.floors
            .iter()
            .all(|rooms| rooms.contains(&RoomId::staircase()))
    });
    results.push(TestResult {
        name: "allocation_staircase_every_floor".into(),
        passed: stairs_ok,
        detail: "multi-floor plans have a staircase on each floor".into(),
    });

    if verbose {
        let plan = floors::allocate(&RoomRequirements::default(), "G+1");
        for (i, rooms) in plan.floors.iter().enumerate() {
            let names: Vec<String> = rooms.iter().map(|r| r.to_string()).collect();
            println!("  floor {i}: {}", names.join(", "));
        }
    }

    results
}

// ── 4. Planned Options ──────────────────────────────────────────────────

fn validate_plan(request: &DesignRequest, plan: &DesignPlan) -> Vec<TestResult> {
    println!("--- Planned Options ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "plan_option_count".into(),
        passed: plan.options.len() == request.output.number_of_plans as usize,
        detail: format!(
            "{} options for {} requested",
            plan.options.len(),
            request.output.number_of_plans
        ),
    });

    let mut over_capacity = Vec::new();
    let mut missing = Vec::new();
    for option in &plan.options {
        for floor in &option.floors {
            let mut counts = [0u32; 9];
            for zone in floor.assignment.values().filter_map(|p| p.zone()) {
                counts[zone as usize] += 1;
            }
            if counts.iter().any(|&c| c > OptimizerConfig::default().zone_capacity) {
                over_capacity.push(format!("option {} floor {}", option.number, floor.floor));
            }
            for room in plan.allocation.rooms_on(floor.floor) {
                if !floor.assignment.contains_key(room) {
                    missing.push(format!("option {} {room}", option.number));
                }
            }
        }
    }
    results.push(TestResult {
        name: "plan_zone_capacity".into(),
        passed: over_capacity.is_empty(),
        detail: if over_capacity.is_empty() {
            "no zone holds more than 3 rooms".into()
        } else {
            format!("over capacity: {}", over_capacity.join(", "))
        },
    });
    results.push(TestResult {
        name: "plan_rooms_placed".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            "every allocated room has a placement".into()
        } else {
            format!("missing: {}", missing.join(", "))
        },
    });

    let out_of_range: Vec<_> = plan
        .options
        .iter()
        .filter(|o| !(0.0..=100.0).contains(&o.score.percentage))
        .collect();
    results.push(TestResult {
        name: "plan_scores_in_range".into(),
        passed: out_of_range.is_empty(),
        detail: "all option scores within 0–100".into(),
    });

    results
}

// ── 5. Variants ─────────────────────────────────────────────────────────

fn validate_variants(rules: &RuleTable, seed: u64) -> Vec<TestResult> {
    println!("--- Variants ---");
    let mut results = Vec::new();

    let plan = floors::allocate(&RoomRequirements::default(), "G+1");
    let candidates = ZoneCandidates::for_rooms(plan.rooms_on(floors::GROUND), |r| {
        rules.zones_for(r.kind, Strictness::Low)
    });
    let optimizer = LayoutOptimizer::default();

    let mut rng = StdRng::seed_from_u64(seed);
    let variants = optimizer.generate_variants(&candidates, 5, &mut rng);
    let unique: HashSet<_> = variants.iter().map(|v| v.assignment.clone()).collect();
    results.push(TestResult {
        name: "variants_distinct".into(),
        passed: unique.len() == variants.len() && variants.len() <= 5,
        detail: format!("{} distinct variants of 5 requested", variants.len()),
    });

    let baseline = optimizer.optimize(&candidates);
    let stable = (0..10u64).all(|s| {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(s));
        optimizer
            .generate_variants(&candidates, 1, &mut rng)
            .first()
            .is_some_and(|v| *v == baseline)
    });
    results.push(TestResult {
        name: "variants_first_deterministic".into(),
        passed: stable,
        detail: "attempt #1 matches the greedy layout under 10 seeds".into(),
    });

    let mut single = ZoneCandidates::new();
    single.insert(RoomId::single(RoomKind::Kitchen), vec![Zone::SE, Zone::NW]);
    let kitchen = optimizer
        .generate_variants(&single, 1, &mut rng)
        .first()
        .and_then(|v| v.assignment.get(&RoomId::single(RoomKind::Kitchen)).copied());
    results.push(TestResult {
        name: "variants_kitchen_first_choice".into(),
        passed: kitchen == Some(Placement::Zone(Zone::SE)),
        detail: format!("kitchen placed in {kitchen:?}"),
    });

    results
}

// ── 6. Scoring ──────────────────────────────────────────────────────────

fn validate_scoring(rules: &RuleTable) -> Vec<TestResult> {
    println!("--- Scoring ---");
    let mut results = Vec::new();
    let scorer = ComplianceScorer::default();

    let ideal = [
        (RoomId::single(RoomKind::Kitchen), Placement::Zone(Zone::SE)),
        (RoomId::master_bedroom(), Placement::Zone(Zone::SW)),
    ];
    let report = scorer.calculate_score(ideal.iter().map(|(r, p)| (r, p)), rules);
    results.push(TestResult {
        name: "scoring_ideal_layout".into(),
        passed: report.percentage == 100.0,
        detail: format!("kitchen SE + master SW scored {}", report.percentage),
    });

    let avoid = [(RoomId::single(RoomKind::Kitchen), Placement::Zone(Zone::NE))];
    let report = scorer.calculate_score(avoid.iter().map(|(r, p)| (r, p)), rules);
    results.push(TestResult {
        name: "scoring_avoid_zone".into(),
        passed: report.breakdown.first().is_some_and(|s| s.score == 0.0),
        detail: "kitchen in NE earns nothing".into(),
    });

    let empty: [(RoomId, Placement); 0] = [];
    let report = scorer.calculate_score(empty.iter().map(|(r, p)| (r, p)), rules);
    results.push(TestResult {
        name: "scoring_empty_layout".into(),
        passed: report.percentage == 0.0 && report.breakdown.is_empty(),
        detail: "empty layout scores 0 with no breakdown".into(),
    });

    results
}

// ── Report ──────────────────────────────────────────────────────────────

fn print_plan(plan: &DesignPlan, verbose: bool) {
    println!("\n--- Options ---");
    for option in &plan.options {
        println!(
            "  Option {} ({:?}): {:.2}%",
            option.number, option.strategy, option.score.percentage
        );
        for floor in &option.floors {
            let placed: Vec<String> = floor
                .assignment
                .iter()
                .map(|(room, placement)| format!("{room}={placement}"))
                .collect();
            println!("    floor {}: {}", floor.floor, placed.join(" "));
        }
        if verbose {
            for note in &option.notes {
                println!("    note: {note}");
            }
            for s in &option.score.breakdown {
                println!(
                    "    {:16} {:8} {:5.2}/{:<3} {}",
                    s.room.to_string(),
                    s.placement.to_string(),
                    s.score,
                    s.max,
                    s.reason
                );
            }
        }
    }
    if let Some(best) = plan.best_option() {
        println!("  Best: option {}", best.number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        parse_args(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn accepts_known_flags() {
        let options = parse(&["--verbose", "--seed", "42", "--rules", "r.json", "req.json"]);
        assert!(options.errors.is_empty());
        assert!(options.verbose);
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.rules_path.as_deref(), Some("r.json"));
        assert_eq!(options.request_path.as_deref(), Some("req.json"));
    }

    #[test]
    fn bad_seed_is_reported() {
        let options = parse(&["--seed", "abc"]);
        assert_eq!(options.seed, None);
        assert_eq!(options.errors.len(), 1);
        assert!(options.errors[0].contains("abc"));

        assert_eq!(parse(&["--seed"]).errors.len(), 1);
    }

    #[test]
    fn unknown_flag_is_not_a_request_path() {
        let options = parse(&["--sead", "7"]);
        assert!(options.errors.iter().any(|e| e.contains("--sead")));
        assert_eq!(options.request_path.as_deref(), Some("7"));

        let options = parse(&["a.json", "b.json"]);
        assert_eq!(options.request_path.as_deref(), Some("a.json"));
        assert_eq!(options.errors.len(), 1);
    }
}
