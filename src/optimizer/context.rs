//! Allocation state threaded explicitly through every search call: remaining
//! caps, relay indices consumed in earlier tiers, and minimum-use floors.
//! Never process-wide state.

use std::collections::{BTreeMap, BTreeSet};

/// Swimmer name → relay indices (positions in [crate::data::RelayEvent::ALL])
/// the swimmer is assigned to in the roster being built.
pub type SwimmerEventMap = BTreeMap<String, BTreeSet<usize>>;

/// Swimmer name → the exact relay indices a branch decision allows them to
/// keep. Swimmers absent from the map are unconstrained.
pub type ForcedAssignment = BTreeMap<String, BTreeSet<usize>>;

#[derive(Debug, Clone)]
pub struct AllocationContext {
    /// Cap for swimmers with no per-swimmer override.
    pub default_cap: usize,
    /// Remaining cap for swimmers who already used part of theirs in
    /// earlier tiers.
    pub caps: BTreeMap<String, usize>,
    /// Relay indices a swimmer already swam in earlier tiers; they may not
    /// be assigned the same relay again.
    pub prior_events: BTreeMap<String, BTreeSet<usize>>,
    /// Minimum number of relays a named swimmer must hold in any accepted
    /// roster; branches that under-use them are discarded.
    pub required: BTreeMap<String, usize>,
}

impl AllocationContext {
    pub fn with_cap(default_cap: usize) -> Self {
        Self {
            default_cap,
            caps: BTreeMap::new(),
            prior_events: BTreeMap::new(),
            required: BTreeMap::new(),
        }
    }

    pub fn cap_for(&self, name: &str) -> usize {
        self.caps.get(name).copied().unwrap_or(self.default_cap)
    }

    pub fn swam_in_prior_tier(&self, name: &str, relay_index: usize) -> bool {
        self.prior_events
            .get(name)
            .is_some_and(|indices| indices.contains(&relay_index))
    }
}

impl Default for AllocationContext {
    fn default() -> Self {
        Self::with_cap(crate::data::DEFAULT_RELAYS_PER_SWIMMER)
    }
}
