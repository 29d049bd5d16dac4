//! Power-point scoring: normalized performance relative to the fixed record
//! time for each relay and gender, and best-roster selection.

use crate::data::events::RelayEvent;
use crate::data::records::{record_seconds, Gender};
use crate::optimizer::lineup::RosterCandidate;

/// Swimcloud-style power points: `round(1000 × (record / time)³)`.
pub fn relay_points(gender: Gender, relay: RelayEvent, total_seconds: f64) -> u32 {
    let record = record_seconds(gender, relay);
    (1000.0 * (record / total_seconds).powi(3)).round() as u32
}

/// Average points across the five relays. Empty or zero-time teams add
/// nothing but still count toward the divisor.
pub fn average_points(gender: Gender, candidate: &RosterCandidate) -> f64 {
    let mut total = 0.0;
    for (index, relay) in RelayEvent::ALL.iter().enumerate() {
        let team = candidate.roster.team(index);
        if team.is_empty() {
            continue;
        }
        let seconds = team.total_seconds();
        if seconds <= 0.0 {
            continue;
        }
        total += f64::from(relay_points(gender, *relay, seconds));
    }
    total / RelayEvent::ALL.len() as f64
}

/// The highest-averaging roster. Exact ties go to the lexicographically
/// smallest roster signature, so selection never depends on the order the
/// search discovered solutions in.
pub fn select_best(
    gender: Gender,
    candidates: Vec<RosterCandidate>,
) -> Option<(RosterCandidate, f64)> {
    let mut best: Option<(RosterCandidate, f64, String)> = None;
    for candidate in candidates {
        let points = average_points(gender, &candidate);
        let signature = candidate.signature();
        let replace = match &best {
            None => true,
            Some((_, best_points, best_signature)) => {
                points > *best_points
                    || (points == *best_points && signature < *best_signature)
            }
        };
        if replace {
            best = Some((candidate, points, signature));
        }
    }
    best.map(|(candidate, points, _)| (candidate, points))
}
