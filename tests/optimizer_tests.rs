use std::collections::HashSet;

use anchorleg::data::events::IndividualEvent;
use anchorleg::data::rankings::{RankingEntry, RankingSet};
use anchorleg::data::records::Gender;
use anchorleg::data::validate::validate_allocation_value;
use anchorleg::optimizer::{
    allocate_tiers, average_points, search_rosters, select_best, AllocationContext,
    OptimizationConfig,
};

fn group_entries(prefix: &str, depth: usize, base: f64, step: f64) -> Vec<RankingEntry> {
    (1..=depth)
        .map(|rank| RankingEntry::new(format!("{prefix}{rank}"), base + rank as f64 * step))
        .collect()
}

/// Disjoint swimmer groups per stroke family, `depth` swimmers each.
fn grouped_rankings(depth: usize) -> RankingSet {
    let mut rankings = RankingSet::new();
    rankings.insert(IndividualEvent::Free50, group_entries("F", depth, 21.5, 0.3));
    rankings.insert(IndividualEvent::Free100, group_entries("G", depth, 47.0, 0.5));
    rankings.insert(IndividualEvent::Free200, group_entries("H", depth, 104.0, 1.0));
    rankings.insert(IndividualEvent::Back50, group_entries("B", depth, 26.0, 0.4));
    rankings.insert(IndividualEvent::Breast50, group_entries("C", depth, 30.0, 0.4));
    rankings.insert(IndividualEvent::Fly50, group_entries("D", depth, 25.0, 0.4));
    rankings.insert(IndividualEvent::Back100, group_entries("B", depth, 57.0, 0.6));
    rankings.insert(IndividualEvent::Breast100, group_entries("C", depth, 63.0, 0.6));
    rankings.insert(IndividualEvent::Fly100, group_entries("D", depth, 54.0, 0.6));
    rankings
}

/// One dominant freestyler whose greedy assignment spans all five relays,
/// forcing the search to branch over cap reductions.
fn star_rankings() -> RankingSet {
    let mut rankings = RankingSet::new();
    let entries = |names: &[(&str, f64)]| {
        names
            .iter()
            .map(|(name, seconds)| RankingEntry::new(*name, *seconds))
            .collect::<Vec<_>>()
    };
    rankings.insert(
        IndividualEvent::Free50,
        entries(&[
            ("Ada", 22.0),
            ("Bix", 22.5),
            ("Cyd", 23.0),
            ("Dov", 23.5),
            ("Edo", 24.0),
            ("Fir", 24.5),
            ("Gio", 25.0),
        ]),
    );
    rankings.insert(
        IndividualEvent::Free100,
        entries(&[
            ("Ada", 48.0),
            ("Bix", 49.0),
            ("Cyd", 50.0),
            ("Dov", 51.0),
            ("Edo", 52.0),
            ("Fir", 53.0),
            ("Gio", 54.0),
        ]),
    );
    rankings.insert(
        IndividualEvent::Free200,
        entries(&[
            ("Ada", 105.0),
            ("Bix", 107.0),
            ("Cyd", 109.0),
            ("Dov", 111.0),
            ("Edo", 113.0),
            ("Fir", 115.0),
            ("Gio", 117.0),
        ]),
    );
    rankings.insert(IndividualEvent::Back50, entries(&[("Edo", 27.0), ("Fir", 28.0)]));
    rankings.insert(IndividualEvent::Breast50, entries(&[("Fir", 31.0), ("Gio", 32.0)]));
    rankings.insert(IndividualEvent::Fly50, entries(&[("Gio", 26.0), ("Edo", 26.5)]));
    rankings.insert(IndividualEvent::Back100, entries(&[("Edo", 58.0), ("Fir", 59.0)]));
    rankings.insert(IndividualEvent::Breast100, entries(&[("Fir", 64.0), ("Gio", 65.0)]));
    rankings.insert(IndividualEvent::Fly100, entries(&[("Gio", 55.0), ("Edo", 56.0)]));
    rankings
}

#[test]
fn three_tier_allocation_respects_every_invariant() {
    let rankings = grouped_rankings(12);
    let config = OptimizationConfig {
        school: "Caltech".to_string(),
        ..OptimizationConfig::default()
    };

    let allocation = allocate_tiers(&rankings, &config);
    assert_eq!(allocation.tiers.len(), 3);
    assert!(allocation.tiers.iter().all(|tier| tier.status == "ok"));

    for tier in &allocation.tiers {
        assert!(tier.average_points > 0.0);
        assert_eq!(tier.lineup.len(), 5);
        for slots in tier.lineup.values() {
            let names: Vec<&str> = slots
                .iter()
                .map(|slot| slot.as_ref().expect("feasible tier has full teams").name.as_str())
                .collect();
            let unique: HashSet<&str> = names.iter().copied().collect();
            assert_eq!(unique.len(), 4, "double-booked team: {names:?}");
        }
    }

    let value = serde_json::to_value(&allocation).unwrap();
    let report = validate_allocation_value(&value, None);
    assert!(!report.has_errors(), "{:?}", report.diagnostics);
}

#[test]
fn selected_roster_is_never_beaten_by_another_discovered_roster() {
    let rankings = star_rankings();
    let ctx = AllocationContext::with_cap(3);

    let solutions = search_rosters(&rankings, &ctx);
    assert!(!solutions.is_empty());

    let best_of_all = solutions
        .iter()
        .map(|candidate| average_points(Gender::Men, candidate))
        .fold(f64::MIN, f64::max);
    let (_, selected_points) = select_best(Gender::Men, solutions).unwrap();
    assert_eq!(selected_points, best_of_all);
}

#[test]
fn branch_reduction_outcome_survives_into_the_persisted_record() {
    let rankings = star_rankings();
    let config = OptimizationConfig {
        tier_count: 1,
        ..OptimizationConfig::default()
    };

    let allocation = allocate_tiers(&rankings, &config);
    assert_eq!(allocation.tiers[0].status, "ok");

    // Ada anchors both medleys in every feasible roster and may keep only
    // one of the three freestyle relays.
    let lineup = &allocation.tiers[0].lineup;
    let in_team = |relay: &str| {
        lineup[relay]
            .iter()
            .any(|slot| slot.as_ref().is_some_and(|entry| entry.name == "Ada"))
    };
    assert!(in_team("4x50mr"));
    assert!(in_team("4x100mr"));
    let freestyle_count = ["4x50fr", "4x100fr", "4x200fr"]
        .iter()
        .filter(|relay| in_team(relay))
        .count();
    assert_eq!(freestyle_count, 1);

    let value = serde_json::to_value(&allocation).unwrap();
    let report = validate_allocation_value(&value, Some(3));
    assert!(!report.has_errors(), "{:?}", report.diagnostics);
}

#[test]
fn thin_rankings_make_every_tier_infeasible() {
    let mut rankings = RankingSet::new();
    rankings.insert(
        IndividualEvent::Free50,
        vec![
            RankingEntry::new("Ada", 22.0),
            RankingEntry::new("Bix", 22.5),
            RankingEntry::new("Cyd", 23.0),
        ],
    );

    let allocation = allocate_tiers(&rankings, &OptimizationConfig::default());
    assert!(allocation
        .tiers
        .iter()
        .all(|tier| tier.status == "infeasible"));
}
