//! Validate a persisted allocation record against the per-swimmer relay cap:
//! count appearances across all tiers and relays, and flag structural
//! problems (duplicate names inside a team, malformed lineup entries).

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;
use std::fs;

use serde_json::Value;

use crate::data::events::{RelayEvent, RELAY_LEGS};

pub const DEFAULT_RELAYS_PER_SWIMMER: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    /// First over-cap diagnostic, if any swimmer exceeded the cap.
    pub fn first_over_cap(&self) -> Option<&ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .find(|diag| diag.context.starts_with("swimmer"))
    }
}

pub fn validate_allocation_file(
    path: &str,
    relays_per_swimmer: Option<usize>,
) -> Result<ValidationReport, String> {
    let raw = fs::read_to_string(path).map_err(|err| format!("unable to read '{path}': {err}"))?;
    let payload: Value = serde_json::from_str(&raw)
        .map_err(|err| format!("unable to parse json '{path}': {err}"))?;
    Ok(validate_allocation_value(&payload, relays_per_swimmer))
}

/// Validate an already-parsed allocation record. The cap comes from the
/// caller when supplied, else from the record itself, else the default.
pub fn validate_allocation_value(
    payload: &Value,
    relays_per_swimmer: Option<usize>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    let cap = relays_per_swimmer
        .or_else(|| {
            payload
                .get("relays_per_swimmer")
                .and_then(Value::as_u64)
                .map(|value| value as usize)
        })
        .unwrap_or(DEFAULT_RELAYS_PER_SWIMMER);

    let Some(tiers) = payload.get("tiers").and_then(Value::as_array) else {
        report.push(
            ValidationSeverity::Error,
            "record",
            "missing 'tiers' array",
        );
        return report;
    };

    let mut appearances: BTreeMap<String, usize> = BTreeMap::new();

    for (tier_index, tier) in tiers.iter().enumerate() {
        let tier_label = tier
            .get("tier")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{tier_index}"));
        let context = format!("tier[{tier_label}]");

        let Some(lineup) = tier.get("lineup").and_then(Value::as_object) else {
            if tier.get("status").and_then(Value::as_str) != Some("infeasible") {
                report.push(
                    ValidationSeverity::Warning,
                    context,
                    "missing 'lineup' object",
                );
            }
            continue;
        };

        for (relay_code, team) in lineup {
            let team_context = format!("{context}.{relay_code}");
            if RelayEvent::from_code(relay_code).is_none() {
                report.push(
                    ValidationSeverity::Warning,
                    team_context.clone(),
                    format!("unknown relay event '{relay_code}'"),
                );
            }

            let Some(slots) = team.as_array() else {
                report.push(ValidationSeverity::Error, team_context, "expected array");
                continue;
            };
            if slots.len() != RELAY_LEGS {
                report.push(
                    ValidationSeverity::Warning,
                    team_context.clone(),
                    format!("expected {RELAY_LEGS} legs, found {}", slots.len()),
                );
            }

            let mut team_names = HashSet::new();
            for (leg, slot) in slots.iter().enumerate() {
                if slot.is_null() {
                    continue;
                }
                let Some(name) = slot.get("name").and_then(Value::as_str) else {
                    report.push(
                        ValidationSeverity::Error,
                        format!("{team_context}[{leg}]"),
                        "occupied slot is missing 'name'",
                    );
                    continue;
                };
                if !team_names.insert(name.to_string()) {
                    report.push(
                        ValidationSeverity::Error,
                        format!("{team_context}[{leg}]"),
                        format!("swimmer '{name}' occupies two legs of one relay"),
                    );
                }
                *appearances.entry(name.to_string()).or_insert(0) += 1;
            }
        }
    }

    for (name, count) in &appearances {
        if *count > cap {
            report.push(
                ValidationSeverity::Error,
                format!("swimmer '{name}'"),
                format!("assigned {count} relays across tiers, cap is {cap}"),
            );
        }
    }

    report
}
