//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `rota_core` linkage by loading a roster and printing a summary.
//! - Accept an optional JSON roster path; fall back to the built-in seed.

use rota_core::{LedgerPolicy, RotaConfig, RotationSession, SystemClock};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match RotaConfig::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("rota: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => RotaConfig::seed(),
    };

    let roster = match config.build_roster() {
        Ok(roster) => roster,
        Err(err) => {
            eprintln!("rota: {err}");
            return ExitCode::FAILURE;
        }
    };
    let session = RotationSession::new(roster, config.ledger_policy, Arc::new(SystemClock));

    println!("rota_core version={}", rota_core::core_version());
    println!(
        "ledger_policy={}",
        match session.policy() {
            LedgerPolicy::Strict => "strict",
            LedgerPolicy::Permissive => "permissive",
        }
    );
    for category in session.roster().categories() {
        let title = session.roster().title(&category.key).unwrap_or("");
        println!("{:<16} {:>3}  {}", category.key.as_str(), category.len(), title);
    }
    ExitCode::SUCCESS
}
