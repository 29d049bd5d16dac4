//! Ranked per-stroke time lists: the input contract for lineup optimization.
//! Canonical form is a JSON object keyed by individual-event code, each value
//! an array of `{name, seconds}` entries sorted fastest first with no
//! duplicate names inside one list.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::events::IndividualEvent;

pub const DEFAULT_RANKINGS_PATH: &str = "data/rankings/rankings.canonical.json";

/// One ranked swim: swimmer name and time in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub seconds: f64,
}

impl RankingEntry {
    pub fn new(name: impl Into<String>, seconds: f64) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }
}

/// The full set of ranked lists for a meet, one list per individual event.
/// Lists are immutable once loaded; the optimizer only filters copies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingSet {
    tables: HashMap<IndividualEvent, Vec<RankingEntry>>,
}

impl RankingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: IndividualEvent, entries: Vec<RankingEntry>) {
        self.tables.insert(event, entries);
    }

    /// Ranked list for one event, fastest first. Missing events read as
    /// empty lists (zero eligible swimmers).
    pub fn event(&self, event: IndividualEvent) -> &[RankingEntry] {
        self.tables.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }

    /// Copy of this set with every entry for the given swimmers removed.
    pub fn without(&self, excluded: &HashSet<String>) -> Self {
        let tables = self
            .tables
            .iter()
            .map(|(event, entries)| {
                let kept = entries
                    .iter()
                    .filter(|entry| !excluded.contains(&entry.name))
                    .cloned()
                    .collect();
                (*event, kept)
            })
            .collect();
        Self { tables }
    }
}

/// Load a canonical rankings file. Unknown event codes are an error; entries
/// inside each list keep file order (fastest first per the input contract).
pub fn load_rankings(path: impl AsRef<Path>) -> Result<RankingSet, std::io::Error> {
    let raw = fs::read_to_string(path)?;
    parse_rankings_json(&raw).map_err(std::io::Error::other)
}

pub fn parse_rankings_json(raw: &str) -> Result<RankingSet, String> {
    let parsed: HashMap<String, Vec<RankingEntry>> =
        serde_json::from_str(raw).map_err(|err| format!("invalid rankings JSON: {err}"))?;
    rankings_from_tables(parsed)
}

/// Build a [RankingSet] from code-keyed tables, e.g. a deserialized file or
/// an API request body.
pub fn rankings_from_tables(
    tables: HashMap<String, Vec<RankingEntry>>,
) -> Result<RankingSet, String> {
    let mut rankings = RankingSet::new();
    for (code, entries) in tables {
        let event = IndividualEvent::from_code(&code)
            .ok_or_else(|| format!("unknown individual event code '{code}'"))?;
        rankings.insert(event, entries);
    }
    Ok(rankings)
}

/// Serialize a ranking set back to its canonical code-keyed form; the
/// ordered map keeps file output deterministic.
pub fn rankings_to_tables(rankings: &RankingSet) -> BTreeMap<&'static str, &[RankingEntry]> {
    IndividualEvent::ALL
        .iter()
        .filter(|event| !rankings.event(**event).is_empty())
        .map(|event| (event.code(), rankings.event(*event)))
        .collect()
}

/// Convert a `"M:SS.hh"` or `"SS.hh"` time string to seconds, rounded to
/// two decimals.
pub fn parse_time(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    let (minutes, rest) = match trimmed.split_once(':') {
        Some((minutes, rest)) => {
            let minutes: u32 = minutes
                .parse()
                .map_err(|_| format!("invalid minutes in time '{raw}'"))?;
            (minutes, rest)
        }
        None => (0, trimmed),
    };
    let seconds: f64 = rest
        .parse()
        .map_err(|_| format!("invalid seconds in time '{raw}'"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("invalid seconds in time '{raw}'"));
    }
    let total = f64::from(minutes) * 60.0 + seconds;
    Ok((total * 100.0).round() / 100.0)
}

/// Format seconds as `"M:SS.hh"` (or `"SS.hh"` under a minute).
pub fn format_time(seconds: f64) -> String {
    if seconds < 60.0 {
        return format!("{seconds:.2}");
    }
    let minutes = (seconds / 60.0).floor();
    let rest = seconds - minutes * 60.0;
    format!("{}:{:05.2}", minutes as u64, rest)
}
