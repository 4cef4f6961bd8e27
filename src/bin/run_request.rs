//! Evaluate a JSON calculation request
//!
//! Reads a `{"calculationType": ..., "parameters": {...}}` document from the
//! file named on the command line (or stdin when none is given) and prints
//! the resulting calculation record as JSON. Failures are reported as
//! `{"error": "..."}` with a non-zero exit code.

use anyhow::{Context, Result};
use financial_calculator::CalculationRequest;
use std::io::Read;
use std::process::ExitCode;

fn read_input() -> Result<String> {
    match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read request file {}", path)),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read request from stdin")?;
            Ok(text)
        }
    }
}

fn run() -> Result<String> {
    let text = read_input()?;
    let request = CalculationRequest::from_json(&text).context("invalid calculation request")?;
    let record = request
        .evaluate()
        .with_context(|| format!("{} calculation failed", request.calculation_type()))?;
    Ok(serde_json::to_string_pretty(&record)?)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            ExitCode::FAILURE
        }
    }
}
