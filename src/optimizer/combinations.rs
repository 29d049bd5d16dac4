//! Enumerate the ways an over-assigned swimmer can be reduced to their cap:
//! every cap-sized subset of the relay indices they currently hold.

use std::collections::{BTreeMap, BTreeSet};

use crate::optimizer::context::{AllocationContext, SwimmerEventMap};

/// Per-swimmer reduction options. Swimmers within their cap are absent;
/// their assignments stand as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReductionOptions {
    pub options: BTreeMap<String, Vec<BTreeSet<usize>>>,
}

impl ReductionOptions {
    pub fn any_exceeded(&self) -> bool {
        !self.options.is_empty()
    }
}

/// Find every swimmer assigned more relays than their cap allows and list
/// all C(n, cap) subsets they could keep, in lexicographic index order.
pub fn enumerate_reductions(
    events: &SwimmerEventMap,
    ctx: &AllocationContext,
) -> ReductionOptions {
    let mut options = BTreeMap::new();
    for (name, assigned) in events {
        let cap = ctx.cap_for(name);
        if assigned.len() <= cap {
            continue;
        }
        let indices: Vec<usize> = assigned.iter().copied().collect();
        let subsets = k_subsets(&indices, cap)
            .into_iter()
            .map(|subset| subset.into_iter().collect::<BTreeSet<usize>>())
            .collect();
        options.insert(name.clone(), subsets);
    }
    ReductionOptions { options }
}

/// All k-element subsets of `items`, preserving item order within each
/// subset, lexicographic by position.
fn k_subsets(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if items.len() < k {
        return Vec::new();
    }
    let mut out = Vec::new();
    for (position, &first) in items.iter().enumerate() {
        if items.len() - position < k {
            break;
        }
        for mut rest in k_subsets(&items[position + 1..], k - 1) {
            let mut subset = Vec::with_capacity(k);
            subset.push(first);
            subset.append(&mut rest);
            out.push(subset);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events_for(name: &str, indices: &[usize]) -> SwimmerEventMap {
        let mut events = SwimmerEventMap::new();
        events.insert(name.to_string(), indices.iter().copied().collect());
        events
    }

    #[test]
    fn four_assignments_with_cap_three_yield_four_subsets() {
        let events = events_for("Ada", &[0, 1, 2, 4]);
        let ctx = AllocationContext::with_cap(3);

        let reductions = enumerate_reductions(&events, &ctx);
        assert!(reductions.any_exceeded());

        let subsets = &reductions.options["Ada"];
        assert_eq!(subsets.len(), 4);
        let expected: Vec<BTreeSet<usize>> = vec![
            [0, 1, 2].into_iter().collect(),
            [0, 1, 4].into_iter().collect(),
            [0, 2, 4].into_iter().collect(),
            [1, 2, 4].into_iter().collect(),
        ];
        assert_eq!(subsets, &expected);
    }

    #[test]
    fn swimmers_at_or_under_cap_are_absent() {
        let mut events = events_for("Ada", &[0, 1, 2]);
        events.insert("Bo".to_string(), [3].into_iter().collect());
        let ctx = AllocationContext::with_cap(3);

        let reductions = enumerate_reductions(&events, &ctx);
        assert!(!reductions.any_exceeded());
    }

    #[test]
    fn per_swimmer_cap_override_applies() {
        let events = events_for("Ada", &[1, 3]);
        let mut ctx = AllocationContext::with_cap(3);
        ctx.caps.insert("Ada".to_string(), 1);

        let reductions = enumerate_reductions(&events, &ctx);
        let subsets = &reductions.options["Ada"];
        assert_eq!(subsets.len(), 2);
        assert!(subsets[0].contains(&1));
        assert!(subsets[1].contains(&3));
    }

    #[test]
    fn zero_cap_keeps_a_single_empty_subset() {
        let events = events_for("Ada", &[0, 2]);
        let mut ctx = AllocationContext::with_cap(3);
        ctx.caps.insert("Ada".to_string(), 0);

        let reductions = enumerate_reductions(&events, &ctx);
        let subsets = &reductions.options["Ada"];
        assert_eq!(subsets.len(), 1);
        assert!(subsets[0].is_empty());
    }
}
