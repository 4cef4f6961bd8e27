//! Simple and compound interest solvers
//!
//! Both solvers accept four optional quantities (principal, rate, time,
//! future value) and solve for the missing one. Which quantity gets solved is
//! decided by [`Knowns::resolve`], a single prioritized match:
//!
//! 1. principal, rate, time      -> future value
//! 2. future value, rate, time   -> principal
//! 3. principal, future value, time -> rate
//! 4. principal, rate, future value -> time
//!
//! The first complete set wins. When all four values are supplied the future
//! value is ignored, not checked for consistency.

mod simple;
mod compound;

pub use simple::{solve_simple, SimpleInterestResult};
pub use compound::{growth_by_year, solve_compound, CompoundInterestResult, GrowthPoint};

use crate::error::{ensure_finite, CalcError, Result};

/// The set of known quantities, tagged by what remains to be solved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Knowns {
    FutureValue { principal: f64, rate: f64, time: f64 },
    Principal { future_value: f64, rate: f64, time: f64 },
    Rate { principal: f64, future_value: f64, time: f64 },
    Time { principal: f64, rate: f64, future_value: f64 },
}

impl Knowns {
    /// Pick the first solvable combination in priority order
    pub fn resolve(
        solver: &'static str,
        principal: Option<f64>,
        rate: Option<f64>,
        time: Option<f64>,
        future_value: Option<f64>,
    ) -> Result<Self> {
        let principal = principal.map(|v| ensure_finite("principal", v)).transpose()?;
        let rate = rate.map(|v| ensure_finite("rate", v)).transpose()?;
        let time = time.map(|v| ensure_finite("time", v)).transpose()?;
        let future_value = future_value.map(|v| ensure_finite("future_value", v)).transpose()?;

        let knowns = match (principal, rate, time, future_value) {
            (Some(principal), Some(rate), Some(time), fv) => {
                if let Some(ignored) = fv {
                    log::debug!("{}: all four values supplied, ignoring future value {}", solver, ignored);
                }
                Knowns::FutureValue { principal, rate, time }
            }
            (_, Some(rate), Some(time), Some(future_value)) => {
                Knowns::Principal { future_value, rate, time }
            }
            (Some(principal), _, Some(time), Some(future_value)) => {
                Knowns::Rate { principal, future_value, time }
            }
            (Some(principal), Some(rate), _, Some(future_value)) => {
                Knowns::Time { principal, rate, future_value }
            }
            _ => {
                return Err(CalcError::insufficient(
                    solver,
                    "three of principal, rate, time, future value are required",
                ))
            }
        };

        log::debug!("{}: solving with {:?}", solver, knowns);
        Ok(knowns)
    }
}
