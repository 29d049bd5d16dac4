pub mod events;
pub mod import;
pub mod rankings;
pub mod records;
pub mod validate;

pub use events::{IndividualEvent, RelayEvent, RelayLegs, Stroke, RELAY_LEGS};
pub use import::{import_rankings_csv, parse_rankings_csv, ImportError, ImportReport};
pub use rankings::{
    format_time, load_rankings, parse_rankings_json, parse_time, rankings_from_tables,
    rankings_to_tables, RankingEntry, RankingSet, DEFAULT_RANKINGS_PATH,
};
pub use records::{record_listings, record_seconds, Gender};
pub use validate::{
    validate_allocation_file, validate_allocation_value, ValidationDiagnostic, ValidationReport,
    ValidationSeverity, DEFAULT_RELAYS_PER_SWIMMER,
};
