use std::env;
use std::fs;

use crate::data::import::import_rankings_csv;
use crate::data::rankings::load_rankings;
use crate::data::records::{record_listings, Gender};
use crate::data::validate::validate_allocation_file;
use crate::data::DEFAULT_RANKINGS_PATH;
use crate::optimizer::{allocate_tiers, OptimizationConfig, TierFailurePolicy};
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Optimize,
    Validate,
    Import,
    Records,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("optimize") => Some(Command::Optimize),
        Some("validate") => Some(Command::Validate),
        Some("import") => Some(Command::Import),
        Some("records") => Some(Command::Records),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Optimize) => handle_optimize(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Import) => handle_import(args),
        Some(Command::Records) => handle_records(args),
        None => {
            eprintln!("usage: anchorleg <serve|optimize|validate|import|records>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("ANCHORLEG_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

/// `optimize [rankings.json] [gender] [cap] [tiers] [--school=N] [--out=P] [--halt]`
fn handle_optimize(args: &[String]) -> i32 {
    let positional: Vec<&String> = args
        .iter()
        .skip(2)
        .filter(|arg| !arg.starts_with("--"))
        .collect();

    let path = positional
        .first()
        .copied()
        .map(String::as_str)
        .unwrap_or(DEFAULT_RANKINGS_PATH);
    let gender = match positional.get(1).copied().map(String::as_str) {
        None => Gender::Men,
        Some(raw) => match Gender::from_str(raw) {
            Some(gender) => gender,
            None => {
                eprintln!("invalid gender '{raw}', expected men|women");
                return 2;
            }
        },
    };
    let cap = parse_usize_arg(positional.get(2).copied(), "cap", 3).max(1);
    let tiers = parse_usize_arg(positional.get(3).copied(), "tiers", 3).max(1);

    let school = flag_value(args, "--school=").unwrap_or_default();
    let out = flag_value(args, "--out=");
    let on_tier_failure = if args.iter().any(|arg| arg == "--halt") {
        TierFailurePolicy::Halt
    } else {
        TierFailurePolicy::Skip
    };

    let rankings = match load_rankings(path) {
        Ok(rankings) => rankings,
        Err(err) => {
            eprintln!("failed to load rankings '{path}': {err}");
            return 1;
        }
    };
    if rankings.is_empty() {
        eprintln!("rankings '{path}' contain no eligible swimmers");
        return 1;
    }

    let config = OptimizationConfig {
        tier_count: tiers,
        relays_per_swimmer: cap,
        gender,
        school,
        on_tier_failure,
        required_events: Default::default(),
    };
    let allocation = allocate_tiers(&rankings, &config);

    let payload = match serde_json::to_string_pretty(&allocation) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("failed to serialize allocation: {err}");
            return 1;
        }
    };

    match out {
        Some(out_path) => {
            if let Err(err) = fs::write(&out_path, &payload) {
                eprintln!("failed to write '{out_path}': {err}");
                return 1;
            }
            let allocated = allocation
                .tiers
                .iter()
                .filter(|tier| tier.status == "ok")
                .count();
            println!(
                "allocation written to {out_path}: {allocated}/{} tiers feasible",
                allocation.tiers.len()
            );
        }
        None => println!("{payload}"),
    }

    0
}

/// `validate <lineups.json> [cap]`
fn handle_validate(args: &[String]) -> i32 {
    let positional: Vec<&String> = args
        .iter()
        .skip(2)
        .filter(|arg| !arg.starts_with("--"))
        .collect();
    let Some(path) = positional.first() else {
        eprintln!("usage: anchorleg validate <lineups.json> [cap]");
        return 2;
    };
    let cap = positional
        .get(1)
        .and_then(|value| value.parse::<usize>().ok());

    match validate_allocation_file(path, cap) {
        Ok(report) => {
            for diagnostic in &report.diagnostics {
                eprintln!("- {diagnostic}");
            }
            if let Some(over_cap) = report.first_over_cap() {
                println!("cap exceeded: {}: {}", over_cap.context, over_cap.message);
                1
            } else if report.has_errors() {
                eprintln!("validation failed: structural errors in '{path}'");
                1
            } else {
                println!("within limits: {path}");
                0
            }
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

/// `import <rankings.csv> [out.json]`
fn handle_import(args: &[String]) -> i32 {
    let positional: Vec<&String> = args
        .iter()
        .skip(2)
        .filter(|arg| !arg.starts_with("--"))
        .collect();
    let Some(path) = positional.first() else {
        eprintln!("usage: anchorleg import <rankings.csv> [out.json]");
        return 2;
    };
    let out = positional
        .get(1)
        .copied()
        .map(String::as_str)
        .unwrap_or(DEFAULT_RANKINGS_PATH);

    match import_rankings_csv(path, out) {
        Ok(report) => {
            for skipped in &report.skipped {
                eprintln!("- row {}: {}", skipped.row_index, skipped.reason);
            }
            println!(
                "import complete: rows={}, events={}, skipped={}, output='{}'",
                report.imported_rows,
                report.events_written,
                report.skipped_rows(),
                report.output_path
            );
            0
        }
        Err(err) => {
            eprintln!("import failed: {err}");
            1
        }
    }
}

/// `records [gender]`
fn handle_records(args: &[String]) -> i32 {
    let listings = match args.get(2).map(String::as_str) {
        None => {
            let mut listings = record_listings(Gender::Men);
            listings.extend(record_listings(Gender::Women));
            listings
        }
        Some(raw) => match Gender::from_str(raw) {
            Some(gender) => record_listings(gender),
            None => {
                eprintln!("invalid gender '{raw}', expected men|women");
                return 2;
            }
        },
    };

    match serde_json::to_string_pretty(&listings) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize records: {err}");
            1
        }
    }
}

fn flag_value(args: &[String], prefix: &str) -> Option<String> {
    args.iter()
        .find_map(|arg| arg.strip_prefix(prefix))
        .map(str::to_string)
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
