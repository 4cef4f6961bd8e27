//! Sensitivity sweeps over the retirement scenario
//!
//! Holds a base scenario once, then re-solves it for a range of values of
//! one input. Each solve is independent so sweeps run in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::solver::{solve_scenario, Problem64Result, ScenarioParams};
use crate::error::Result;

/// Scenario input varied by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensitivityVariable {
    NominalRate,
    InflationRate,
}

impl SensitivityVariable {
    /// Sweep range used by the calculator pages, in percent
    pub fn default_values(self) -> Vec<f64> {
        let (start, end) = match self {
            SensitivityVariable::NominalRate => (8, 16),
            SensitivityVariable::InflationRate => (4, 12),
        };
        (start..=end).map(f64::from).collect()
    }

    fn apply(self, base: &ScenarioParams, value: f64) -> ScenarioParams {
        match self {
            SensitivityVariable::NominalRate => ScenarioParams { nominal_rate: value, ..*base },
            SensitivityVariable::InflationRate => ScenarioParams { inflation_rate: value, ..*base },
        }
    }
}

/// One solved point of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityPoint {
    pub variable: SensitivityVariable,
    pub value: f64,
    pub result: Problem64Result,
}

/// Re-solves a base scenario with one input varied
///
/// # Example
/// ```
/// use financial_calculator::retirement::{ScenarioParams, SensitivityRunner, SensitivityVariable};
///
/// let runner = SensitivityRunner::new(ScenarioParams::default());
/// let points = runner.run(SensitivityVariable::InflationRate, &[6.0, 8.0, 10.0]).unwrap();
/// assert_eq!(points.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SensitivityRunner {
    base: ScenarioParams,
}

impl SensitivityRunner {
    pub fn new(base: ScenarioParams) -> Self {
        Self { base }
    }

    /// Base scenario every sweep starts from
    pub fn base(&self) -> &ScenarioParams {
        &self.base
    }

    /// Solve the base scenario once for each value, keeping input order
    pub fn run(&self, variable: SensitivityVariable, values: &[f64]) -> Result<Vec<SensitivityPoint>> {
        values
            .par_iter()
            .map(|&value| -> Result<SensitivityPoint> {
                let result = solve_scenario(&variable.apply(&self.base, value))?;
                log::trace!("{:?} = {}: first payment {:.4}", variable, value, result.first_payment);
                Ok(SensitivityPoint { variable, value, result })
            })
            .collect()
    }

    /// Sweep over [`SensitivityVariable::default_values`]
    pub fn run_default(&self, variable: SensitivityVariable) -> Result<Vec<SensitivityPoint>> {
        self.run(variable, &variable.default_values())
    }
}
