//! Financial Calculator CLI
//!
//! Command-line interface for running each solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use financial_calculator::annuity::{increasing_annuity, solve_annuity, AnnuityTiming};
use financial_calculator::interest::growth_by_year;
use financial_calculator::rates::{self, RateBasis};
use financial_calculator::retirement::{
    DEFAULT_FIRST_WITHDRAWAL_VALUE, DEFAULT_INFLATION_RATE, DEFAULT_INITIAL_INVESTMENT,
    DEFAULT_INVESTMENT_YEARS, DEFAULT_NOMINAL_RATE, DEFAULT_WITHDRAWAL_YEARS,
};
use financial_calculator::{
    amortization_schedule, amortize, solve_compound, solve_scenario, solve_simple, ScenarioParams,
};

/// Time value of money calculator
#[derive(Parser)]
#[command(name = "financial_calculator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Basis {
    Simple,
    Effective,
    Nominal,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a rate between simple, effective, nominal and continuous bases
    Rates {
        /// Rate in percent
        #[arg(short, long)]
        rate: f64,

        /// Basis the rate is quoted on
        #[arg(short, long, value_enum, default_value = "nominal")]
        basis: Basis,

        /// Source compounding frequency (nominal basis) or target frequency (effective basis)
        #[arg(short, long, default_value_t = 1)]
        freq: u32,

        /// Target compounding frequency (simple and nominal bases)
        #[arg(long, default_value_t = 1)]
        target_freq: u32,

        /// Horizon in years (simple and effective bases)
        #[arg(short, long, default_value_t = 1.0)]
        time: f64,
    },

    /// Solve simple interest for the one value left out
    Simple {
        #[arg(short, long)]
        principal: Option<f64>,
        /// Annual rate in percent
        #[arg(short, long)]
        rate: Option<f64>,
        /// Years
        #[arg(short, long)]
        time: Option<f64>,
        #[arg(short, long)]
        future_value: Option<f64>,
    },

    /// Solve compound interest for the one value left out
    Compound {
        #[arg(short, long)]
        principal: Option<f64>,
        /// Nominal annual rate in percent
        #[arg(short, long)]
        rate: Option<f64>,
        /// Years
        #[arg(short, long)]
        time: Option<f64>,
        /// Compounding periods per year
        #[arg(short = 'n', long, default_value_t = 1)]
        compounding_freq: u32,
        #[arg(short, long)]
        future_value: Option<f64>,
        /// Also print the year-by-year balance
        #[arg(long)]
        growth: bool,
    },

    /// Monthly payment and amortization for a fixed-rate loan
    Loan {
        #[arg(short, long)]
        amount: f64,
        /// Annual rate in percent
        #[arg(short, long)]
        rate: f64,
        /// Term in years
        #[arg(short, long)]
        years: f64,
        /// Print every month instead of yearly totals
        #[arg(long)]
        monthly: bool,
    },

    /// Solve an annuity given its payment, present value or future value
    Annuity {
        #[arg(short, long)]
        payment: Option<f64>,
        /// Rate per period in percent
        #[arg(short, long)]
        rate: f64,
        /// Number of periods
        #[arg(short = 'n', long)]
        periods: f64,
        #[arg(long)]
        present_value: Option<f64>,
        #[arg(long)]
        future_value: Option<f64>,
        /// Payments at the start of each period
        #[arg(long)]
        due: bool,
        /// Escalate the payment by this percent every `step` periods
        #[arg(long)]
        growth: Option<f64>,
        #[arg(long, default_value_t = 1)]
        step: u32,
    },

    /// Inflation-adjusted retirement funding scenario (Problem 6.4)
    Problem64 {
        #[arg(long, default_value_t = DEFAULT_NOMINAL_RATE)]
        nominal_rate: f64,
        #[arg(long, default_value_t = DEFAULT_INITIAL_INVESTMENT)]
        initial_investment: f64,
        #[arg(long, default_value_t = DEFAULT_INFLATION_RATE)]
        inflation_rate: f64,
        #[arg(long, default_value_t = DEFAULT_FIRST_WITHDRAWAL_VALUE)]
        first_withdrawal_value: f64,
        #[arg(long, default_value_t = DEFAULT_INVESTMENT_YEARS)]
        investment_years: u32,
        #[arg(long, default_value_t = DEFAULT_WITHDRAWAL_YEARS)]
        withdrawal_years: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;

    match cli.command {
        Commands::Rates { rate, basis, freq, target_freq, time } => {
            let basis = match basis {
                Basis::Simple => RateBasis::Simple { time, target_freq },
                Basis::Effective => RateBasis::EffectiveAnnual { freq, time },
                Basis::Nominal => RateBasis::Nominal { freq, target_freq },
            };
            let set = rates::convert(rate, basis).context("rate conversion failed")?;
            emit(json, &set, || {
                println!("Simple:             {:>12.6}%", set.simple);
                println!("Effective annual:   {:>12.6}%", set.effective_annual);
                println!("Nominal:            {:>12.6}%", set.nominal);
                println!("Effective periodic: {:>12.6}%", set.effective_periodic);
                println!("Force of interest:  {:>12.6}%", set.force_of_interest);
            })?;
        }

        Commands::Simple { principal, rate, time, future_value } => {
            let result = solve_simple(principal, rate, time, future_value)
                .context("simple interest calculation failed")?;
            emit(json, &result, || {
                println!("Principal:    ${:.2}", result.principal);
                println!("Rate:         {:.6}%", result.rate);
                println!("Time:         {:.6} years", result.time);
                println!("Interest:     ${:.2}", result.interest);
                println!("Future value: ${:.2}", result.future_value);
            })?;
        }

        Commands::Compound { principal, rate, time, compounding_freq, future_value, growth } => {
            let result = solve_compound(principal, rate, time, compounding_freq, future_value)
                .context("compound interest calculation failed")?;
            let series = if growth {
                let years = result.time.ceil().max(0.0) as u32;
                growth_by_year(result.principal, result.rate, years, compounding_freq)?
            } else {
                Vec::new()
            };

            if json {
                print_json(&serde_json::json!({ "result": result, "growth": series }))?;
            } else {
                println!("Principal:    ${:.2}", result.principal);
                println!("Rate:         {:.6}% compounded {} times a year", result.rate, result.compounding_freq);
                println!("Time:         {:.6} years", result.time);
                println!("Interest:     ${:.2}", result.interest);
                println!("Future value: ${:.2}", result.future_value);
                if !series.is_empty() {
                    println!("\n{:>5} {:>16} {:>16}", "Year", "Balance", "Interest");
                    for point in &series {
                        println!("{:>5} {:>16.2} {:>16.2}", point.year, point.balance, point.interest_earned);
                    }
                }
            }
        }

        Commands::Loan { amount, rate, years, monthly } => {
            let loan = amortize(amount, rate, years).context("loan calculation failed")?;
            let schedule = amortization_schedule(&loan);

            if json {
                let rows = if monthly {
                    serde_json::to_value(&schedule.rows)?
                } else {
                    serde_json::to_value(schedule.yearly_summary())?
                };
                print_json(&serde_json::json!({ "loan": loan, "schedule": rows }))?;
            } else {
                println!("Monthly payment: ${:.2}", loan.monthly_payment);
                println!("Total payments:  ${:.2} over {} months", loan.total_payments, loan.term_months);
                println!("Total interest:  ${:.2}", loan.total_interest);
                println!();
                if monthly {
                    println!("{:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "Payment", "Principal", "Interest", "Balance");
                    println!("{}", "-".repeat(59));
                    for row in &schedule.rows {
                        println!("{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                            row.month, row.payment, row.principal_payment, row.interest_payment, row.remaining_balance);
                    }
                } else {
                    println!("{:>4} {:>14} {:>14} {:>14}", "Year", "Principal", "Interest", "Balance");
                    println!("{}", "-".repeat(49));
                    for year in schedule.yearly_summary() {
                        println!("{:>4} {:>14.2} {:>14.2} {:>14.2}",
                            year.year, year.principal_paid, year.interest_paid, year.ending_balance);
                    }
                }
            }
        }

        Commands::Annuity { payment, rate, periods, present_value, future_value, due, growth, step } => {
            let timing = if due { AnnuityTiming::Due } else { AnnuityTiming::Ordinary };
            let result = match growth {
                Some(growth) => {
                    let payment = payment.context("an increasing annuity needs --payment")?;
                    if periods.fract() != 0.0 || periods < 1.0 {
                        anyhow::bail!("an increasing annuity needs a whole number of periods, got {}", periods);
                    }
                    increasing_annuity(timing, payment, rate, periods as u32, growth, step)
                }
                None => solve_annuity(timing, payment, Some(rate), Some(periods), present_value, future_value),
            }
            .context("annuity calculation failed")?;

            emit(json, &result, || {
                println!("Payment:        ${:.2}", result.payment);
                println!("Present value:  ${:.2}", result.present_value);
                println!("Future value:   ${:.2}", result.future_value);
                println!("Total payments: ${:.2}", result.total_payments);
                println!("Total interest: ${:.2}", result.total_interest);
            })?;
        }

        Commands::Problem64 {
            nominal_rate,
            initial_investment,
            inflation_rate,
            first_withdrawal_value,
            investment_years,
            withdrawal_years,
        } => {
            let params = ScenarioParams {
                nominal_rate,
                initial_investment,
                inflation_rate,
                first_withdrawal_value,
                investment_years,
                withdrawal_years,
            };
            let result = solve_scenario(&params).context("retirement scenario failed")?;
            emit(json, &result, || {
                println!("Effective annual rate:   {:.4}%", result.effective_annual_rate);
                println!("Effective monthly rate:  {:.4}%", result.monthly_effective_rate);
                println!("Initial investment FV:   ${:.2}", result.future_value_initial);
                println!("First withdrawal:        ${:.2}", result.first_withdrawal);
                println!("Required fund:           ${:.2}", result.target_fund);
                println!("First monthly payment:   ${:.2}", result.first_payment);
            })?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce()) -> Result<()> {
    if json {
        print_json(value)
    } else {
        text();
        Ok(())
    }
}
