pub mod combinations;
pub mod context;
pub mod lineup;
pub mod scoring;
pub mod search;
pub mod team;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::data::events::RelayEvent;
use crate::data::rankings::{RankingEntry, RankingSet};
use crate::data::records::Gender;

pub use combinations::{enumerate_reductions, ReductionOptions};
pub use context::{AllocationContext, ForcedAssignment, SwimmerEventMap};
pub use lineup::{generate_lineup, Roster, RosterCandidate, RELAY_COUNT};
pub use scoring::{average_points, relay_points, select_best};
pub use search::search_rosters;
pub use team::{build_medley, fill_freestyle, RelayTeam};

/// What the tier loop does when a tier has no feasible roster: record the
/// failure and keep allocating later tiers, or stop there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierFailurePolicy {
    #[default]
    Skip,
    Halt,
}

#[derive(Debug, Clone)]
pub struct OptimizationConfig {
    pub tier_count: usize,
    /// Maximum relays one swimmer may hold across all tiers.
    pub relays_per_swimmer: usize,
    pub gender: Gender,
    /// Pass-through identity recorded on the output; not consumed here.
    pub school: String,
    pub on_tier_failure: TierFailurePolicy,
    /// Minimum relays a named swimmer must hold per tier, clamped to their
    /// remaining cap. Rosters that under-use them are discarded.
    pub required_events: BTreeMap<String, usize>,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tier_count: 3,
            relays_per_swimmer: crate::data::DEFAULT_RELAYS_PER_SWIMMER,
            gender: Gender::Men,
            school: String::new(),
            on_tier_failure: TierFailurePolicy::Skip,
            required_events: BTreeMap::new(),
        }
    }
}

/// One tier's outcome. Infeasible tiers carry no lineup.
#[derive(Debug, Clone, Serialize)]
pub struct TierResult {
    pub tier: String,
    pub status: &'static str,
    pub average_points: f64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub lineup: BTreeMap<String, Vec<Option<RankingEntry>>>,
}

/// The aggregated allocation across tiers, suitable for persisting.
#[derive(Debug, Clone, Serialize)]
pub struct MeetAllocation {
    pub school: String,
    pub gender: &'static str,
    pub relays_per_swimmer: usize,
    pub tier_count: usize,
    pub generated_at: String,
    pub tiers: Vec<TierResult>,
}

/// Allocate every tier in sequence. Each tier draws from swimmers not yet
/// capped out, may not reuse a swimmer for a relay they already swam in an
/// earlier tier, and contributes its assignments to the cumulative counts.
pub fn allocate_tiers(rankings: &RankingSet, config: &OptimizationConfig) -> MeetAllocation {
    let mut used: BTreeMap<String, usize> = BTreeMap::new();
    let mut prior: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
    let mut tiers = Vec::new();

    for tier_index in 0..config.tier_count {
        let maxed: HashSet<String> = used
            .iter()
            .filter(|(_, count)| **count >= config.relays_per_swimmer)
            .map(|(name, _)| name.clone())
            .collect();
        let working = rankings.without(&maxed);

        let mut ctx = AllocationContext::with_cap(config.relays_per_swimmer);
        for (name, count) in &used {
            if *count > 0 {
                ctx.caps.insert(
                    name.clone(),
                    config.relays_per_swimmer.saturating_sub(*count),
                );
            }
        }
        ctx.prior_events = prior.clone();
        for (name, minimum) in &config.required_events {
            let floor = (*minimum).min(ctx.cap_for(name));
            if floor > 0 && !maxed.contains(name) {
                ctx.required.insert(name.clone(), floor);
            }
        }

        let candidates = search_rosters(&working, &ctx);
        match select_best(config.gender, candidates) {
            Some((best, points)) => {
                for (name, assigned) in &best.events {
                    *used.entry(name.clone()).or_insert(0) += assigned.len();
                    prior
                        .entry(name.clone())
                        .or_default()
                        .extend(assigned.iter().copied());
                }
                tiers.push(TierResult {
                    tier: tier_label(tier_index),
                    status: "ok",
                    average_points: points,
                    lineup: lineup_tables(&best),
                });
            }
            None => {
                tiers.push(TierResult {
                    tier: tier_label(tier_index),
                    status: "infeasible",
                    average_points: 0.0,
                    lineup: BTreeMap::new(),
                });
                if config.on_tier_failure == TierFailurePolicy::Halt {
                    break;
                }
            }
        }
    }

    MeetAllocation {
        school: config.school.clone(),
        gender: config.gender.as_str(),
        relays_per_swimmer: config.relays_per_swimmer,
        tier_count: config.tier_count,
        generated_at: chrono::Utc::now().to_rfc3339(),
        tiers,
    }
}

/// Tiers are labeled A, B, C, … in allocation order.
fn tier_label(index: usize) -> String {
    if index < 26 {
        char::from(b'A' + index as u8).to_string()
    } else {
        format!("T{index}")
    }
}

fn lineup_tables(candidate: &RosterCandidate) -> BTreeMap<String, Vec<Option<RankingEntry>>> {
    RelayEvent::ALL
        .iter()
        .enumerate()
        .map(|(index, relay)| {
            let slots = candidate.roster.team(index).slots().to_vec();
            (relay.code().to_string(), slots)
        })
        .collect()
}
