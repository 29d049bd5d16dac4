use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::json;

use crate::data::rankings::{rankings_from_tables, RankingEntry};
use crate::data::records::{record_listings, Gender};
use crate::data::validate::validate_allocation_value;
use crate::optimizer::{allocate_tiers, OptimizationConfig, TierFailurePolicy};

#[derive(Debug)]
pub enum ApiError {
    Parse(serde_json::Error),
    Validation(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "status": "ok",
        "service": "anchorleg-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Parse `?gender=men|women`; absent means both tables.
fn parse_gender_query(path: &str) -> Result<Option<Gender>, ApiError> {
    let query = path.split('?').nth(1).unwrap_or("");
    for pair in query.split('&') {
        if let Some(value) = pair.trim().strip_prefix("gender=") {
            return Gender::from_str(value)
                .map(Some)
                .ok_or_else(|| ApiError::Validation(format!("unknown gender '{value}'")));
        }
    }
    Ok(None)
}

pub fn records_payload(path: &str) -> Result<String, ApiError> {
    let listings = match parse_gender_query(path)? {
        Some(gender) => record_listings(gender),
        None => {
            let mut listings = record_listings(Gender::Men);
            listings.extend(record_listings(Gender::Women));
            listings
        }
    };
    serde_json::to_string_pretty(&json!({ "records": listings })).map_err(ApiError::Parse)
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequest {
    pub rankings: HashMap<String, Vec<RankingEntry>>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub relays_per_swimmer: Option<usize>,
    #[serde(default)]
    pub tier_count: Option<usize>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub halt_on_infeasible: Option<bool>,
}

pub fn optimize_payload(body: &str) -> Result<String, ApiError> {
    let request: OptimizeRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;

    let rankings = rankings_from_tables(request.rankings).map_err(ApiError::Validation)?;
    if rankings.is_empty() {
        return Err(ApiError::Validation(
            "rankings contain no eligible swimmers".to_string(),
        ));
    }
    let gender = match request.gender.as_deref() {
        None => Gender::Men,
        Some(raw) => Gender::from_str(raw)
            .ok_or_else(|| ApiError::Validation(format!("unknown gender '{raw}'")))?,
    };

    let config = OptimizationConfig {
        tier_count: request.tier_count.unwrap_or(3).max(1),
        relays_per_swimmer: request.relays_per_swimmer.unwrap_or(3).max(1),
        gender,
        school: request.school.unwrap_or_default(),
        on_tier_failure: if request.halt_on_infeasible.unwrap_or(false) {
            TierFailurePolicy::Halt
        } else {
            TierFailurePolicy::Skip
        },
        required_events: Default::default(),
    };

    let allocation = allocate_tiers(&rankings, &config);
    serde_json::to_string_pretty(&allocation).map_err(ApiError::Parse)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateRequest {
    pub allocation: serde_json::Value,
    #[serde(default)]
    pub relays_per_swimmer: Option<usize>,
}

pub fn validate_payload(body: &str) -> Result<String, ApiError> {
    let request: ValidateRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    let report = validate_allocation_value(&request.allocation, request.relays_per_swimmer);

    let diagnostics: Vec<serde_json::Value> = report
        .diagnostics
        .iter()
        .map(|diagnostic| {
            json!({
                "severity": diagnostic.severity.as_str(),
                "context": diagnostic.context,
                "message": diagnostic.message,
            })
        })
        .collect();
    let status = if report.first_over_cap().is_some() {
        "cap_exceeded"
    } else if report.has_errors() {
        "invalid"
    } else {
        "within_limits"
    };

    serde_json::to_string_pretty(&json!({
        "status": status,
        "first_over_cap": report
            .first_over_cap()
            .map(|diagnostic| format!("{}: {}", diagnostic.context, diagnostic.message)),
        "diagnostics": diagnostics,
    }))
    .map_err(ApiError::Parse)
}
