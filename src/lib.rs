//! Financial Calculator - closed-form time-value-of-money solvers
//!
//! This library provides:
//! - Interest rate conversion (simple, effective, nominal, force of interest)
//! - Simple and compound interest solvers for any one missing quantity
//! - Fixed-payment loan amortization with schedules
//! - Ordinary, due and escalating annuities
//! - The inflation-adjusted retirement funding scenario with sensitivity sweeps
//! - JSON calculation requests and records for external storage
//!
//! All rates at the public API are percentages (5.0 means 5%).

pub mod error;
pub mod rates;
pub mod interest;
pub mod loan;
pub mod annuity;
pub mod retirement;
pub mod calculation;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use rates::{from_effective_annual, from_nominal, from_simple, RateSet};
pub use interest::{solve_compound, solve_simple, CompoundInterestResult, SimpleInterestResult};
pub use loan::{amortization_schedule, amortize, AmortizationSchedule, LoanResult};
pub use annuity::{solve_annuity_due, solve_ordinary_annuity, AnnuityResult};
pub use retirement::{solve_scenario, Problem64Result, ScenarioParams};
pub use calculation::{CalculationRecord, CalculationRequest};
