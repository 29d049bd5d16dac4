//! Rebuild a complete five-relay roster under a branch's forced-subset
//! choices: clear slots the branch no longer allows, re-open medley slots
//! held by capped swimmers, then fill every incomplete relay in canonical
//! order. An unfillable relay makes the whole branch infeasible.

use std::collections::HashSet;

use crate::data::events::{RelayEvent, RelayLegs, RELAY_LEGS};
use crate::data::rankings::{RankingEntry, RankingSet};
use crate::optimizer::context::{AllocationContext, ForcedAssignment, SwimmerEventMap};
use crate::optimizer::team::{build_medley, fill_freestyle, RelayTeam};

pub const RELAY_COUNT: usize = RelayEvent::ALL.len();

/// One team per relay event, indexed by canonical relay order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    teams: [RelayTeam; RELAY_COUNT],
}

impl Roster {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn team(&self, index: usize) -> &RelayTeam {
        &self.teams[index]
    }

    pub fn team_mut(&mut self, index: usize) -> &mut RelayTeam {
        &mut self.teams[index]
    }

    pub fn teams(&self) -> &[RelayTeam; RELAY_COUNT] {
        &self.teams
    }

    pub fn is_complete(&self) -> bool {
        self.teams.iter().all(RelayTeam::is_complete)
    }

    /// Swimmer → relay indices currently occupied, derived from the slots.
    pub fn event_map(&self) -> SwimmerEventMap {
        let mut events = SwimmerEventMap::new();
        for (index, team) in self.teams.iter().enumerate() {
            for (_, entry) in team.occupants() {
                events.entry(entry.name.clone()).or_default().insert(index);
            }
        }
        events
    }
}

/// A fully-built solution: the roster plus the swimmer→relays map derived
/// from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterCandidate {
    pub events: SwimmerEventMap,
    pub roster: Roster,
}

impl RosterCandidate {
    /// Canonical order-independent key over the roster's occupancy; used
    /// for solution dedup and as the deterministic score tie-break.
    pub fn signature(&self) -> String {
        let mut signature = String::new();
        for (index, relay) in RelayEvent::ALL.iter().enumerate() {
            signature.push_str(relay.code());
            signature.push('=');
            for slot in self.roster.team(index).slots() {
                match slot {
                    Some(entry) => signature.push_str(&entry.name),
                    None => signature.push('-'),
                }
                signature.push(',');
            }
            signature.push(';');
        }
        signature
    }
}

/// Build a roster consistent with `forced`, starting from the teams carried
/// over from the parent branch. Returns `None` when some relay cannot be
/// completed; the branch is infeasible, not an error.
pub fn generate_lineup(
    rankings: &RankingSet,
    forced: &ForcedAssignment,
    carried: &Roster,
    ctx: &AllocationContext,
) -> Option<RosterCandidate> {
    let mut roster = carried.clone();

    // Clear every slot whose occupant is no longer allowed this relay.
    for index in 0..RELAY_COUNT {
        let team = roster.team_mut(index);
        for leg in 0..RELAY_LEGS {
            let barred = team.slot(leg).is_some_and(|entry| {
                forced
                    .get(&entry.name)
                    .is_some_and(|allowed| !allowed.contains(&index))
            });
            if barred {
                team.clear(leg);
            }
        }
    }

    let mut events = roster.event_map();

    // Partially emptied medley teams are rebuilt without capped swimmers:
    // re-open their slots so conflict resolution is free to rearrange legs.
    let mut displaced: Vec<HashSet<String>> = vec![HashSet::new(); RELAY_COUNT];
    for (index, relay) in RelayEvent::ALL.iter().enumerate() {
        if !matches!(relay.legs(), RelayLegs::Medley(_)) {
            continue;
        }
        if roster.team(index).is_complete() {
            continue;
        }
        let team = roster.team_mut(index);
        for leg in 0..RELAY_LEGS {
            let Some(entry) = team.slot(leg) else { continue };
            let name = entry.name.clone();
            let assigned = events.get(&name).map_or(0, std::collections::BTreeSet::len);
            if assigned >= ctx.cap_for(&name) {
                team.clear(leg);
                let now_empty = events.get_mut(&name).is_some_and(|set| {
                    set.remove(&index);
                    set.is_empty()
                });
                if now_empty {
                    events.remove(&name);
                }
                displaced[index].insert(name);
            }
        }
    }

    // Swimmers at their cap take no further relays this round.
    let capped: HashSet<String> = events
        .iter()
        .filter(|(name, assigned)| assigned.len() >= ctx.cap_for(name))
        .map(|(name, _)| name.clone())
        .collect();

    for (index, relay) in RelayEvent::ALL.iter().enumerate() {
        if roster.team(index).is_complete() {
            continue;
        }

        let mut excluded = capped.clone();
        excluded.extend(displaced[index].iter().cloned());
        for (name, allowed) in forced {
            if !allowed.contains(&index) {
                excluded.insert(name.clone());
            }
        }
        for (name, prior) in &ctx.prior_events {
            if prior.contains(&index) {
                excluded.insert(name.clone());
            }
        }

        match relay.legs() {
            RelayLegs::Freestyle(event) => {
                let team = roster.team_mut(index);
                fill_freestyle(team, rankings.event(event), &excluded);
                if !team.is_complete() {
                    return None;
                }
            }
            RelayLegs::Medley(leg_events) => {
                let leg_rankings: [Vec<RankingEntry>; RELAY_LEGS] =
                    std::array::from_fn(|leg| rankings.event(leg_events[leg]).to_vec());
                let built = build_medley(&leg_rankings, &excluded, roster.team(index))?;
                *roster.team_mut(index) = built;
            }
        }
    }

    let events = roster.event_map();
    Some(RosterCandidate { events, roster })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::events::IndividualEvent;
    use std::collections::BTreeSet;

    /// Eight swimmers with times in every individual event; rank order
    /// varies per stroke so medley conflicts stay manageable.
    fn sample_rankings() -> RankingSet {
        let names = ["Ada", "Bo", "Cy", "Dee", "Eli", "Fay", "Gus", "Hal"];
        let mut rankings = RankingSet::new();
        for event in IndividualEvent::ALL {
            let base = f64::from(event.distance());
            // rotate the leader by event so no single swimmer heads all lists
            let rotation = event.code().len() % names.len();
            let mut entries: Vec<RankingEntry> = names
                .iter()
                .enumerate()
                .map(|(position, name)| {
                    let rank = (position + names.len() - rotation) % names.len();
                    RankingEntry::new(*name, base + rank as f64 * 0.7)
                })
                .collect();
            entries.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
            rankings.insert(event, entries);
        }
        rankings
    }

    #[test]
    fn unconstrained_build_completes_all_relays_without_double_booking() {
        let rankings = sample_rankings();
        let ctx = AllocationContext::with_cap(3);
        let candidate = generate_lineup(
            &rankings,
            &ForcedAssignment::new(),
            &Roster::empty(),
            &ctx,
        )
        .expect("sample rankings are deep enough for every relay");

        assert!(candidate.roster.is_complete());
        for team in candidate.roster.teams() {
            let names = team.names();
            let unique: HashSet<&str> = names.iter().copied().collect();
            assert_eq!(unique.len(), RELAY_LEGS);
        }
    }

    #[test]
    fn forced_subset_clears_and_refills_barred_relay() {
        let rankings = sample_rankings();
        let ctx = AllocationContext::with_cap(3);
        let base = generate_lineup(
            &rankings,
            &ForcedAssignment::new(),
            &Roster::empty(),
            &ctx,
        )
        .unwrap();

        // Bar the first occupant of relay 0 from that relay.
        let barred = base.roster.team(0).slot(0).unwrap().name.clone();
        let mut forced = ForcedAssignment::new();
        let allowed: BTreeSet<usize> = base.events[&barred]
            .iter()
            .copied()
            .filter(|index| *index != 0)
            .collect();
        forced.insert(barred.clone(), allowed);

        let candidate = generate_lineup(&rankings, &forced, &base.roster, &ctx).unwrap();
        assert!(candidate.roster.is_complete());
        assert!(!candidate.roster.team(0).contains(&barred));
    }

    #[test]
    fn prior_tier_assignment_excludes_swimmer_from_that_relay() {
        let rankings = sample_rankings();
        let mut ctx = AllocationContext::with_cap(3);
        let head = rankings.event(IndividualEvent::Free50)[0].name.clone();
        ctx.prior_events
            .entry(head.clone())
            .or_default()
            .insert(0);

        let candidate = generate_lineup(
            &rankings,
            &ForcedAssignment::new(),
            &Roster::empty(),
            &ctx,
        )
        .unwrap();
        assert!(!candidate.roster.team(0).contains(&head));
    }

    #[test]
    fn empty_rankings_are_infeasible() {
        let rankings = RankingSet::new();
        let ctx = AllocationContext::with_cap(3);
        assert!(generate_lineup(
            &rankings,
            &ForcedAssignment::new(),
            &Roster::empty(),
            &ctx,
        )
        .is_none());
    }
}
