//! Sensitivity table for the retirement funding scenario
//!
//! Sweeps the nominal rate and the inflation rate over their standard ranges
//! and prints the resulting first monthly payment. The base scenario can be
//! overridden through environment variables:
//!
//! NOMINAL_RATE, INITIAL_INVESTMENT, INFLATION_RATE, FIRST_WITHDRAWAL_VALUE,
//! INVESTMENT_YEARS, WITHDRAWAL_YEARS
//!
//! Pass `--json` for machine-readable output.

use anyhow::{Context, Result};
use financial_calculator::retirement::{
    ScenarioParams, SensitivityPoint, SensitivityRunner, SensitivityVariable,
};
use std::env;
use std::str::FromStr;
use std::time::Instant;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");

    let defaults = ScenarioParams::default();
    let base = ScenarioParams {
        nominal_rate: env_or("NOMINAL_RATE", defaults.nominal_rate),
        initial_investment: env_or("INITIAL_INVESTMENT", defaults.initial_investment),
        inflation_rate: env_or("INFLATION_RATE", defaults.inflation_rate),
        first_withdrawal_value: env_or("FIRST_WITHDRAWAL_VALUE", defaults.first_withdrawal_value),
        investment_years: env_or("INVESTMENT_YEARS", defaults.investment_years),
        withdrawal_years: env_or("WITHDRAWAL_YEARS", defaults.withdrawal_years),
    };

    let start = Instant::now();
    let runner = SensitivityRunner::new(base);
    let by_rate = runner
        .run_default(SensitivityVariable::NominalRate)
        .context("nominal rate sweep failed")?;
    let by_inflation = runner
        .run_default(SensitivityVariable::InflationRate)
        .context("inflation rate sweep failed")?;
    log::info!("sweeps complete in {:?}", start.elapsed());

    if json_output {
        let output = serde_json::json!({
            "base": runner.base(),
            "nominalRate": by_rate,
            "inflationRate": by_inflation,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Retirement Scenario Sensitivity");
    println!("===============================\n");
    println!("Base: nominal {:.2}%, inflation {:.2}%, initial ${:.2}, withdrawal ${:.2}/month",
        base.nominal_rate, base.inflation_rate, base.initial_investment, base.first_withdrawal_value);
    println!("      {} years saving, {} years drawing\n", base.investment_years, base.withdrawal_years);

    print_table("Nominal rate", &by_rate);
    println!();
    print_table("Inflation", &by_inflation);

    Ok(())
}

fn print_table(label: &str, points: &[SensitivityPoint]) {
    println!("{:>12} {:>12} {:>16} {:>18} {:>14}",
        label, "Eff. annual", "First payment", "Target fund", "First w/d");
    println!("{}", "-".repeat(76));
    for point in points {
        println!("{:>11.2}% {:>11.4}% {:>16.2} {:>18.2} {:>14.2}",
            point.value,
            point.result.effective_annual_rate,
            point.result.first_payment,
            point.result.target_fund,
            point.result.first_withdrawal,
        );
    }
}
