//! Relay record tables used by power-point scoring. Static configuration
//! data, one table per gender, keyed by relay event.

use serde::Serialize;

use crate::data::events::RelayEvent;
use crate::data::rankings::format_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "men" | "m" => Some(Self::Men),
            "women" | "w" => Some(Self::Women),
            _ => None,
        }
    }
}

/// Record time in seconds for a relay, by gender.
pub fn record_seconds(gender: Gender, relay: RelayEvent) -> f64 {
    match (gender, relay) {
        (Gender::Men, RelayEvent::Free4x50) => 74.08,
        (Gender::Men, RelayEvent::Free4x100) => 164.31,
        (Gender::Men, RelayEvent::Free4x200) => 363.89,
        (Gender::Men, RelayEvent::Medley4x50) => 81.13,
        (Gender::Men, RelayEvent::Medley4x100) => 179.22,
        (Gender::Women, RelayEvent::Free4x50) => 84.47,
        (Gender::Women, RelayEvent::Free4x100) => 186.96,
        (Gender::Women, RelayEvent::Free4x200) => 405.91,
        (Gender::Women, RelayEvent::Medley4x50) => 92.77,
        (Gender::Women, RelayEvent::Medley4x100) => 202.34,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordListing {
    pub relay: &'static str,
    pub gender: &'static str,
    pub record_seconds: f64,
    pub record_time: String,
}

/// Record table rows for one gender, in canonical relay order.
pub fn record_listings(gender: Gender) -> Vec<RecordListing> {
    RelayEvent::ALL
        .iter()
        .map(|relay| {
            let seconds = record_seconds(gender, *relay);
            RecordListing {
                relay: relay.code(),
                gender: gender.as_str(),
                record_seconds: seconds,
                record_time: format_time(seconds),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_relay_has_a_positive_record_for_both_genders() {
        for gender in [Gender::Men, Gender::Women] {
            for relay in RelayEvent::ALL {
                assert!(record_seconds(gender, relay) > 0.0);
            }
        }
    }

    #[test]
    fn listings_cover_all_relays_in_canonical_order() {
        let listings = record_listings(Gender::Men);
        let codes: Vec<&str> = listings.iter().map(|row| row.relay).collect();
        assert_eq!(codes, vec!["4x50fr", "4x100fr", "4x200fr", "4x50mr", "4x100mr"]);
        assert_eq!(listings[0].record_time, "1:14.08");
    }

    #[test]
    fn gender_parse_accepts_short_forms() {
        assert_eq!(Gender::from_str("Men"), Some(Gender::Men));
        assert_eq!(Gender::from_str("w"), Some(Gender::Women));
        assert_eq!(Gender::from_str("mixed"), None);
    }
}
