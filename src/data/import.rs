//! Import ranked times from CSV (e.g. exported from a results spreadsheet).
//! CSV columns: event, name, time (header row optional). Rows are grouped by
//! individual-event code, validated, sorted fastest first, and written to the
//! canonical rankings JSON.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::data::events::IndividualEvent;
use crate::data::rankings::{
    parse_time, rankings_to_tables, RankingEntry, RankingSet, DEFAULT_RANKINGS_PATH,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row_index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub source_path: String,
    pub output_path: String,
    pub total_rows: usize,
    pub imported_rows: usize,
    pub events_written: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn skipped_rows(&self) -> usize {
        self.skipped.len()
    }
}

#[derive(Debug)]
pub enum ImportError {
    Read(std::io::Error),
    Serialize(serde_json::Error),
    Write(std::io::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read rankings CSV: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize canonical rankings: {err}"),
            Self::Write(err) => write!(f, "failed to persist canonical rankings: {err}"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Parse `event,name,time` rows into a ranking set. Malformed rows are
/// skipped with a reason rather than failing the whole import.
pub fn parse_rankings_csv(content: &str) -> (RankingSet, Vec<SkippedRow>, usize) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut tables: HashMap<IndividualEvent, Vec<RankingEntry>> = HashMap::new();
    let mut seen: HashMap<IndividualEvent, HashSet<String>> = HashMap::new();
    let mut skipped = Vec::new();
    let mut total_rows = 0usize;

    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                total_rows += 1;
                skipped.push(SkippedRow {
                    row_index: index,
                    reason: format!("unreadable row: {err}"),
                });
                continue;
            }
        };

        let code = record.get(0).unwrap_or("").trim();
        if index == 0 && code.eq_ignore_ascii_case("event") {
            continue;
        }
        total_rows += 1;

        let Some(event) = IndividualEvent::from_code(code) else {
            skipped.push(SkippedRow {
                row_index: index,
                reason: format!("unknown event code '{code}'"),
            });
            continue;
        };

        let name = record.get(1).unwrap_or("").trim();
        if name.is_empty() {
            skipped.push(SkippedRow {
                row_index: index,
                reason: "missing swimmer name".to_string(),
            });
            continue;
        }

        let raw_time = record.get(2).unwrap_or("").trim();
        let seconds = match parse_time(raw_time) {
            Ok(seconds) if seconds > 0.0 => seconds,
            Ok(_) => {
                skipped.push(SkippedRow {
                    row_index: index,
                    reason: format!("non-positive time '{raw_time}'"),
                });
                continue;
            }
            Err(reason) => {
                skipped.push(SkippedRow { row_index: index, reason });
                continue;
            }
        };

        if !seen.entry(event).or_default().insert(name.to_string()) {
            skipped.push(SkippedRow {
                row_index: index,
                reason: format!("duplicate name '{name}' for event '{code}'"),
            });
            continue;
        }

        tables
            .entry(event)
            .or_default()
            .push(RankingEntry::new(name, seconds));
    }

    let mut rankings = RankingSet::new();
    for (event, mut entries) in tables {
        entries.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
        rankings.insert(event, entries);
    }

    (rankings, skipped, total_rows)
}

/// Import a rankings CSV file and write the canonical rankings JSON to
/// `output_path` (default [DEFAULT_RANKINGS_PATH]).
pub fn import_rankings_csv(path: &str, output_path: &str) -> Result<ImportReport, ImportError> {
    let content = fs::read_to_string(path).map_err(ImportError::Read)?;
    let (rankings, skipped, total_rows) = parse_rankings_csv(&content);

    let tables = rankings_to_tables(&rankings);

    if let Some(parent) = Path::new(output_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(ImportError::Write)?;
        }
    }
    let serialized = serde_json::to_string_pretty(&tables).map_err(ImportError::Serialize)?;
    fs::write(output_path, serialized).map_err(ImportError::Write)?;

    let imported_rows = total_rows - skipped.len();
    Ok(ImportReport {
        source_path: path.to_string(),
        output_path: output_path.to_string(),
        total_rows,
        imported_rows,
        events_written: tables.len(),
        skipped,
    })
}

pub fn default_output_path() -> &'static str {
    DEFAULT_RANKINGS_PATH
}
