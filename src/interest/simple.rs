//! Simple (linear) interest: FV = P * (1 + r t)

use serde::{Deserialize, Serialize};

use super::Knowns;
use crate::error::{CalcError, Result};

const SOLVER: &str = "simple interest";

/// Solved simple interest problem; `rate` is a percentage per year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleInterestResult {
    pub principal: f64,
    pub rate: f64,
    pub time: f64,
    pub interest: f64,
    pub future_value: f64,
}

/// Solve the simple interest equation for whichever value is missing
///
/// Exactly one argument should be `None`. See [`Knowns::resolve`] for the
/// order in which combinations are tried.
pub fn solve_simple(
    principal: Option<f64>,
    rate: Option<f64>,
    time: Option<f64>,
    future_value: Option<f64>,
) -> Result<SimpleInterestResult> {
    match Knowns::resolve(SOLVER, principal, rate, time, future_value)? {
        Knowns::FutureValue { principal, rate, time } => {
            let interest = principal * (rate / 100.0) * time;
            Ok(SimpleInterestResult {
                principal,
                rate,
                time,
                interest,
                future_value: principal + interest,
            })
        }
        Knowns::Principal { future_value, rate, time } => {
            let growth = 1.0 + (rate / 100.0) * time;
            if growth == 0.0 {
                return Err(CalcError::degenerate("1 + rate * time is zero, principal is undefined"));
            }
            let principal = future_value / growth;
            Ok(SimpleInterestResult {
                principal,
                rate,
                time,
                interest: future_value - principal,
                future_value,
            })
        }
        Knowns::Rate { principal, future_value, time } => {
            if principal * time == 0.0 {
                return Err(CalcError::degenerate("principal * time is zero, rate is undefined"));
            }
            let interest = future_value - principal;
            Ok(SimpleInterestResult {
                principal,
                rate: interest / (principal * time) * 100.0,
                time,
                interest,
                future_value,
            })
        }
        Knowns::Time { principal, rate, future_value } => {
            if principal * rate == 0.0 {
                return Err(CalcError::degenerate("principal * rate is zero, time is undefined"));
            }
            let interest = future_value - principal;
            Ok(SimpleInterestResult {
                principal,
                rate,
                time: interest / (principal * rate / 100.0),
                interest,
                future_value,
            })
        }
    }
}
