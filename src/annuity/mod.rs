//! Annuity solvers: level ordinary and due annuities, and escalating payment streams
//!
//! Rates here are percentages per payment period, not per year.

mod level;
mod increasing;

pub use level::{solve_annuity, solve_annuity_due, solve_ordinary_annuity};
pub use increasing::increasing_annuity;

use serde::{Deserialize, Serialize};

/// Solved annuity values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnuityResult {
    /// Level payment, or the first payment of an escalating stream
    pub payment: f64,
    pub present_value: f64,
    pub future_value: f64,
    /// Undiscounted sum of all payments
    pub total_payments: f64,
    pub total_interest: f64,
}

/// When in each period payments are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnuityTiming {
    /// End of period
    #[default]
    Ordinary,
    /// Start of period
    Due,
}

impl AnnuityTiming {
    /// Factor applied to end-of-period values for this timing
    pub(crate) fn adjustment(self, rate: f64) -> f64 {
        match self {
            AnnuityTiming::Ordinary => 1.0,
            AnnuityTiming::Due => 1.0 + rate,
        }
    }
}
