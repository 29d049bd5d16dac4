//! Depth-first search over forced-subset branches. Each branch rebuilds a
//! roster, prunes infeasible or under-used lineups, accepts cap-respecting
//! leaves, and otherwise takes the cartesian product of every over-capped
//! swimmer's keep-subsets. Identical reduced sub-problems reached through
//! different branches are explored once.

use std::collections::{BTreeSet, HashSet};

use crate::data::rankings::RankingSet;
use crate::optimizer::combinations::enumerate_reductions;
use crate::optimizer::context::{AllocationContext, ForcedAssignment};
use crate::optimizer::lineup::{generate_lineup, Roster, RosterCandidate};

/// All feasible, cap-respecting complete rosters reachable from the
/// unconstrained greedy build.
pub fn search_rosters(rankings: &RankingSet, ctx: &AllocationContext) -> Vec<RosterCandidate> {
    let mut search = Search {
        rankings,
        ctx,
        explored: HashSet::new(),
        seen: HashSet::new(),
        solutions: Vec::new(),
    };
    search.explore(&ForcedAssignment::new(), &Roster::empty());
    search.solutions
}

struct Search<'a> {
    rankings: &'a RankingSet,
    ctx: &'a AllocationContext,
    /// Canonical keys of forced assignments already expanded.
    explored: HashSet<String>,
    /// Signatures of solutions already collected.
    seen: HashSet<String>,
    solutions: Vec<RosterCandidate>,
}

impl Search<'_> {
    fn explore(&mut self, forced: &ForcedAssignment, carried: &Roster) {
        let Some(candidate) = generate_lineup(self.rankings, forced, carried, self.ctx) else {
            return;
        };

        // A roster that under-uses a required swimmer can never be optimal.
        for (name, minimum) in &self.ctx.required {
            let held = candidate.events.get(name).map_or(0, BTreeSet::len);
            if held < *minimum {
                return;
            }
        }

        let reductions = enumerate_reductions(&candidate.events, self.ctx);
        if !reductions.any_exceeded() {
            if self.seen.insert(candidate.signature()) {
                self.solutions.push(candidate);
            }
            return;
        }

        let names: Vec<&String> = reductions.options.keys().collect();
        let choices: Vec<&Vec<BTreeSet<usize>>> =
            names.iter().map(|name| &reductions.options[*name]).collect();
        let mut cursor = vec![0usize; names.len()];
        loop {
            let mut next = forced.clone();
            for (slot, name) in names.iter().enumerate() {
                next.insert((*name).clone(), choices[slot][cursor[slot]].clone());
            }
            if self.explored.insert(assignment_key(&next)) {
                self.explore(&next, &candidate.roster);
            }

            let mut position = 0;
            loop {
                if position == cursor.len() {
                    return;
                }
                cursor[position] += 1;
                if cursor[position] < choices[position].len() {
                    break;
                }
                cursor[position] = 0;
                position += 1;
            }
        }
    }
}

/// Canonical, order-independent key for a forced assignment.
fn assignment_key(forced: &ForcedAssignment) -> String {
    let mut key = String::new();
    for (name, allowed) in forced {
        key.push_str(name);
        key.push('=');
        for index in allowed {
            key.push_str(&index.to_string());
            key.push(',');
        }
        key.push(';');
    }
    key
}
