//! Retirement funding scenario ("Problem 6.4")
//!
//! A saver holds an initial lump sum and makes monthly contributions that
//! rise with inflation each year. At retirement the fund must pay monthly
//! withdrawals for a fixed number of years, also rising with inflation, whose
//! first-year level is a stated amount in today's money. The solver finds the
//! first monthly contribution that makes the plan balance.

mod solver;
mod sensitivity;

pub use solver::{
    solve_scenario, Problem64Result, ScenarioParams, DEFAULT_FIRST_WITHDRAWAL_VALUE,
    DEFAULT_INFLATION_RATE, DEFAULT_INITIAL_INVESTMENT, DEFAULT_INVESTMENT_YEARS,
    DEFAULT_NOMINAL_RATE, DEFAULT_WITHDRAWAL_YEARS,
};
pub use sensitivity::{SensitivityPoint, SensitivityRunner, SensitivityVariable};
