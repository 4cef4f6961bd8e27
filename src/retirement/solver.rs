//! Inflation-adjusted retirement funding solver

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CalcError, Result};
use crate::rates::{effective_to_periodic, nominal_to_effective};

/// Nominal annual rate, compounded monthly (percent)
pub const DEFAULT_NOMINAL_RATE: f64 = 12.0;
pub const DEFAULT_INITIAL_INVESTMENT: f64 = 10_000.0;
/// Annual inflation (percent)
pub const DEFAULT_INFLATION_RATE: f64 = 8.0;
/// First monthly withdrawal in today's money
pub const DEFAULT_FIRST_WITHDRAWAL_VALUE: f64 = 5_000.0;
pub const DEFAULT_INVESTMENT_YEARS: u32 = 40;
pub const DEFAULT_WITHDRAWAL_YEARS: u32 = 20;

/// Inputs to the retirement scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScenarioParams {
    pub nominal_rate: f64,
    pub initial_investment: f64,
    pub inflation_rate: f64,
    pub first_withdrawal_value: f64,
    pub investment_years: u32,
    pub withdrawal_years: u32,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            nominal_rate: DEFAULT_NOMINAL_RATE,
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
            inflation_rate: DEFAULT_INFLATION_RATE,
            first_withdrawal_value: DEFAULT_FIRST_WITHDRAWAL_VALUE,
            investment_years: DEFAULT_INVESTMENT_YEARS,
            withdrawal_years: DEFAULT_WITHDRAWAL_YEARS,
        }
    }
}

/// Solved scenario; rates are percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem64Result {
    /// First monthly contribution; later contributions rise with inflation each year
    pub first_payment: f64,
    pub effective_annual_rate: f64,
    pub monthly_effective_rate: f64,
    /// Initial investment accumulated to the retirement date
    pub future_value_initial: f64,
    /// Present value at retirement of all withdrawals
    pub target_fund: f64,
    /// First monthly withdrawal in retirement-date money
    pub first_withdrawal: f64,
}

/// Contract year (1-indexed) of a 1-indexed month
fn year_of(month: u32) -> u32 {
    month.div_ceil(12)
}

/// Number of months in `years`, bounded so month exponents fit an `i32`
fn months(name: &'static str, years: u32) -> Result<u32> {
    years
        .checked_mul(12)
        .filter(|&months| months <= i32::MAX as u32)
        .ok_or_else(|| CalcError::invalid(name, years as f64, "too many years to count in months"))
}

/// Solve the retirement scenario
///
/// Stages, each feeding the next:
///
/// 1. nominal monthly rate -> effective annual -> effective monthly
/// 2. initial investment accumulated over the investment years
/// 3. first withdrawal inflated to the retirement date
/// 4. present value at retirement of the escalating withdrawals (target fund)
/// 5. shortfall the contributions must cover
/// 6. accumulation factor of escalating monthly contributions
/// 7. first contribution = shortfall / factor
pub fn solve_scenario(params: &ScenarioParams) -> Result<Problem64Result> {
    let nominal_rate = ensure_finite("nominal_rate", params.nominal_rate)?;
    let initial_investment = ensure_finite("initial_investment", params.initial_investment)?;
    let inflation_rate = ensure_finite("inflation_rate", params.inflation_rate)?;
    let first_withdrawal_value =
        ensure_finite("first_withdrawal_value", params.first_withdrawal_value)?;
    if params.investment_years == 0 {
        return Err(CalcError::degenerate(
            "no contribution months, first payment is undefined",
        ));
    }
    let contribution_months = months("investment_years", params.investment_years)?;
    let withdrawal_months = months("withdrawal_years", params.withdrawal_years)?;

    let eff_annual = nominal_to_effective(nominal_rate / 100.0, 12.0).map_err(|_| {
        CalcError::invalid(
            "nominal_rate",
            nominal_rate,
            "monthly accumulation factor must be positive",
        )
    })?;
    let eff_monthly = effective_to_periodic(eff_annual, 12.0);
    let inflation = 1.0 + inflation_rate / 100.0;
    let monthly_growth = 1.0 + eff_monthly;

    let future_value_initial =
        initial_investment * (1.0 + eff_annual).powi(params.investment_years as i32);
    let first_withdrawal =
        first_withdrawal_value * inflation.powi(params.investment_years as i32);

    let target_fund = (1..=withdrawal_months)
        .map(|m| {
            let amount = first_withdrawal * inflation.powi(year_of(m) as i32 - 1);
            amount / monthly_growth.powi(m as i32)
        })
        .fold(0.0, |acc, pv| acc + pv);

    let required_from_payments = target_fund - future_value_initial;

    let annuity_factor = (1..=contribution_months)
        .map(|m| {
            inflation.powi(year_of(m) as i32 - 1)
                * monthly_growth.powi((contribution_months - m) as i32)
        })
        .fold(0.0, |acc, f| acc + f);

    if annuity_factor == 0.0 || !annuity_factor.is_finite() {
        return Err(CalcError::degenerate("contribution accumulation factor is zero"));
    }
    let first_payment = required_from_payments / annuity_factor;

    log::debug!(
        "scenario {:?}: target fund {:.2}, shortfall {:.2}, factor {:.4}",
        params,
        target_fund,
        required_from_payments,
        annuity_factor
    );

    Ok(Problem64Result {
        first_payment,
        effective_annual_rate: eff_annual * 100.0,
        monthly_effective_rate: eff_monthly * 100.0,
        future_value_initial,
        target_fund,
        first_withdrawal,
    })
}
