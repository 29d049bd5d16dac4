//! Relay teams and the two leg-filling strategies: freestyle (one ranked
//! list walked with a single shared cursor) and medley (four lists with
//! recursive resolution when one swimmer heads more than one leg).

use std::collections::{BTreeMap, HashSet};

use crate::data::events::RELAY_LEGS;
use crate::data::rankings::RankingEntry;

/// An ordered sequence of four leg slots, each empty or holding one ranked
/// swim. No swimmer occupies more than one slot of a complete team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelayTeam {
    slots: [Option<RankingEntry>; RELAY_LEGS],
}

impl RelayTeam {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn slot(&self, leg: usize) -> Option<&RankingEntry> {
        self.slots[leg].as_ref()
    }

    pub fn set(&mut self, leg: usize, entry: RankingEntry) {
        self.slots[leg] = Some(entry);
    }

    pub fn clear(&mut self, leg: usize) {
        self.slots[leg] = None;
    }

    pub fn slots(&self) -> &[Option<RankingEntry>; RELAY_LEGS] {
        &self.slots
    }

    pub fn occupants(&self) -> impl Iterator<Item = (usize, &RankingEntry)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(leg, slot)| slot.as_ref().map(|entry| (leg, entry)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.occupants().any(|(_, entry)| entry.name == name)
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn total_seconds(&self) -> f64 {
        self.occupants().map(|(_, entry)| entry.seconds).sum()
    }

    /// Names of occupied legs, in leg order.
    pub fn names(&self) -> Vec<&str> {
        self.occupants().map(|(_, entry)| entry.name.as_str()).collect()
    }
}

/// Fill the empty legs of a freestyle team from one ranked list, fastest
/// first. A single cursor advances across slots; each empty leg takes the
/// next swimmer that is neither excluded nor already on the team. If the
/// list runs out the team is left partially empty, a feasibility failure
/// the caller detects via [RelayTeam::is_complete], not an error.
pub fn fill_freestyle(team: &mut RelayTeam, rankings: &[RankingEntry], excluded: &HashSet<String>) {
    let mut cursor = rankings.iter();
    for leg in 0..RELAY_LEGS {
        if team.slot(leg).is_some() {
            continue;
        }
        let entry = loop {
            match cursor.next() {
                Some(entry) if excluded.contains(&entry.name) || team.contains(&entry.name) => {
                    continue;
                }
                Some(entry) => break entry,
                None => return,
            }
        };
        team.set(leg, entry.clone());
    }
}

/// Build the minimum-total-time medley team from four leg rankings (leg
/// order: backstroke, breaststroke, butterfly, freestyle). `base` carries
/// slots pre-filled by an earlier pass. Returns `None` when no complete
/// conflict-free team exists.
pub fn build_medley(
    leg_rankings: &[Vec<RankingEntry>; RELAY_LEGS],
    excluded: &HashSet<String>,
    base: &RelayTeam,
) -> Option<RelayTeam> {
    let filtered = filter_legs(leg_rankings, |name| excluded.contains(name));
    let candidates = resolve_conflicts(&filtered, base.clone());
    candidates
        .into_iter()
        .filter(RelayTeam::is_complete)
        .min_by(|a, b| {
            a.total_seconds()
                .total_cmp(&b.total_seconds())
                .then_with(|| a.names().cmp(&b.names()))
        })
}

/// Fill empty legs with the head of each leg's list, then branch on every
/// swimmer occupying two or more legs: for each way of keeping them on
/// exactly one leg, free the rest, drop the swimmer from the lists, and
/// resolve the sub-team again. At most three legs can conflict, so the
/// branch tree stays small.
fn resolve_conflicts(
    leg_rankings: &[Vec<RankingEntry>; RELAY_LEGS],
    mut team: RelayTeam,
) -> Vec<RelayTeam> {
    for leg in 0..RELAY_LEGS {
        if team.slot(leg).is_none() {
            match leg_rankings[leg].first() {
                Some(entry) => team.set(leg, entry.clone()),
                // leg list exhausted: this attempt cannot be completed
                None => return Vec::new(),
            }
        }
    }

    let mut legs_by_name: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (leg, entry) in team.occupants() {
        legs_by_name.entry(entry.name.clone()).or_default().push(leg);
    }
    let conflicts: Vec<(String, Vec<usize>)> = legs_by_name
        .into_iter()
        .filter(|(_, legs)| legs.len() > 1)
        .collect();

    if conflicts.is_empty() {
        return vec![team];
    }

    let mut resolved = Vec::new();
    for (name, legs) in &conflicts {
        let narrowed = filter_legs(leg_rankings, |candidate| candidate == name.as_str());
        for &kept in legs {
            let mut next = team.clone();
            for &leg in legs {
                if leg != kept {
                    next.clear(leg);
                }
            }
            resolved.extend(resolve_conflicts(&narrowed, next));
        }
    }
    resolved
}

fn filter_legs(
    leg_rankings: &[Vec<RankingEntry>; RELAY_LEGS],
    drop: impl Fn(&str) -> bool,
) -> [Vec<RankingEntry>; RELAY_LEGS] {
    std::array::from_fn(|leg| {
        leg_rankings[leg]
            .iter()
            .filter(|entry| !drop(&entry.name))
            .cloned()
            .collect()
    })
}
