//! Static event tables: the five relay events, their leg strokes, and the
//! individual stroke events that ranking lists are keyed by.

/// Number of legs in every relay team.
pub const RELAY_LEGS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stroke {
    Backstroke,
    Breaststroke,
    Butterfly,
    Freestyle,
}

/// An individual stroke event with ranked times, e.g. `50fr` or `100ba`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndividualEvent {
    Free50,
    Free100,
    Free200,
    Back50,
    Back100,
    Breast50,
    Breast100,
    Fly50,
    Fly100,
}

impl IndividualEvent {
    pub const ALL: [Self; 9] = [
        Self::Free50,
        Self::Free100,
        Self::Free200,
        Self::Back50,
        Self::Back100,
        Self::Breast50,
        Self::Breast100,
        Self::Fly50,
        Self::Fly100,
    ];

    /// Short code used as the key in canonical rankings files.
    pub fn code(self) -> &'static str {
        match self {
            Self::Free50 => "50fr",
            Self::Free100 => "100fr",
            Self::Free200 => "200fr",
            Self::Back50 => "50ba",
            Self::Back100 => "100ba",
            Self::Breast50 => "50br",
            Self::Breast100 => "100br",
            Self::Fly50 => "50fl",
            Self::Fly100 => "100fl",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|event| event.code() == code)
    }

    pub fn stroke(self) -> Stroke {
        match self {
            Self::Free50 | Self::Free100 | Self::Free200 => Stroke::Freestyle,
            Self::Back50 | Self::Back100 => Stroke::Backstroke,
            Self::Breast50 | Self::Breast100 => Stroke::Breaststroke,
            Self::Fly50 | Self::Fly100 => Stroke::Butterfly,
        }
    }

    pub fn distance(self) -> u32 {
        match self {
            Self::Free200 => 200,
            Self::Free100 | Self::Back100 | Self::Breast100 | Self::Fly100 => 100,
            Self::Free50 | Self::Back50 | Self::Breast50 | Self::Fly50 => 50,
        }
    }
}

/// One of the five relay events a roster is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayEvent {
    Free4x50,
    Free4x100,
    Free4x200,
    Medley4x50,
    Medley4x100,
}

/// Leg composition of a relay: freestyle relays draw all four legs from one
/// stroke event, medley relays from four distinct ones in fixed leg order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayLegs {
    Freestyle(IndividualEvent),
    Medley([IndividualEvent; RELAY_LEGS]),
}

impl RelayEvent {
    /// Canonical relay order. Relay indices used throughout the optimizer
    /// are positions in this array.
    pub const ALL: [Self; 5] = [
        Self::Free4x50,
        Self::Free4x100,
        Self::Free4x200,
        Self::Medley4x50,
        Self::Medley4x100,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Free4x50 => "4x50fr",
            Self::Free4x100 => "4x100fr",
            Self::Free4x200 => "4x200fr",
            Self::Medley4x50 => "4x50mr",
            Self::Medley4x100 => "4x100mr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|event| event.code() == code)
    }

    pub fn index(self) -> usize {
        match self {
            Self::Free4x50 => 0,
            Self::Free4x100 => 1,
            Self::Free4x200 => 2,
            Self::Medley4x50 => 3,
            Self::Medley4x100 => 4,
        }
    }

    /// Medley leg order is backstroke, breaststroke, butterfly, freestyle.
    pub fn legs(self) -> RelayLegs {
        match self {
            Self::Free4x50 => RelayLegs::Freestyle(IndividualEvent::Free50),
            Self::Free4x100 => RelayLegs::Freestyle(IndividualEvent::Free100),
            Self::Free4x200 => RelayLegs::Freestyle(IndividualEvent::Free200),
            Self::Medley4x50 => RelayLegs::Medley([
                IndividualEvent::Back50,
                IndividualEvent::Breast50,
                IndividualEvent::Fly50,
                IndividualEvent::Free50,
            ]),
            Self::Medley4x100 => RelayLegs::Medley([
                IndividualEvent::Back100,
                IndividualEvent::Breast100,
                IndividualEvent::Fly100,
                IndividualEvent::Free100,
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_codes_round_trip() {
        for relay in RelayEvent::ALL {
            assert_eq!(RelayEvent::from_code(relay.code()), Some(relay));
        }
        assert_eq!(RelayEvent::from_code("4x25fr"), None);
    }

    #[test]
    fn relay_indices_match_canonical_order() {
        for (position, relay) in RelayEvent::ALL.iter().enumerate() {
            assert_eq!(relay.index(), position);
        }
    }

    #[test]
    fn medley_legs_use_distinct_strokes_at_matching_distance() {
        for relay in [RelayEvent::Medley4x50, RelayEvent::Medley4x100] {
            let RelayLegs::Medley(legs) = relay.legs() else {
                panic!("medley relay should have medley legs");
            };
            let strokes: Vec<Stroke> = legs.iter().map(|leg| leg.stroke()).collect();
            assert_eq!(
                strokes,
                vec![
                    Stroke::Backstroke,
                    Stroke::Breaststroke,
                    Stroke::Butterfly,
                    Stroke::Freestyle
                ]
            );
            let distance = legs[0].distance();
            assert!(legs.iter().all(|leg| leg.distance() == distance));
        }
    }
}
