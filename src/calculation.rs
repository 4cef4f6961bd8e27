//! JSON calculation requests and records
//!
//! External collaborators (the HTTP layer, the calculation store) deal in
//! `{calculationType, parameters}` blobs. This module turns such a blob into
//! a solver call and packages the outcome as a [`CalculationRecord`] the store
//! can keep as opaque text. Absent JSON fields stay `None`; a literal `0` is a
//! real value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::annuity::{
    increasing_annuity, solve_annuity, AnnuityResult, AnnuityTiming,
};
use crate::error::{CalcError, Result};
use crate::interest::{solve_compound, solve_simple};
use crate::loan::{amortization_schedule, amortize, LoanResult, YearlyLoanSummary};
use crate::rates::{convert, RateBasis};
use crate::retirement::{solve_scenario, ScenarioParams, SensitivityRunner, SensitivityVariable};

/// A calculation to run, tagged by `calculationType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculationType", content = "parameters", rename_all = "camelCase")]
pub enum CalculationRequest {
    RateConversion(RateConversionParams),
    SimpleInterest(InterestParams),
    CompoundInterest(CompoundParams),
    Loan(LoanParams),
    Annuity(AnnuityParams),
    Problem64(ScenarioParams),
    Problem64Sensitivity(SensitivityParams),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateConversionParams {
    /// Rate in percent, quoted on `basis`
    pub rate: f64,
    #[serde(flatten)]
    pub basis: RateBasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterestParams {
    pub principal: Option<f64>,
    pub rate: Option<f64>,
    pub time: Option<f64>,
    pub future_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundParams {
    #[serde(default)]
    pub principal: Option<f64>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default = "default_compounding_freq")]
    pub compounding_freq: u32,
    #[serde(default)]
    pub future_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParams {
    pub loan_amount: f64,
    /// Annual rate, percent
    pub interest_rate: f64,
    pub term_years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnuityParams {
    #[serde(default)]
    pub timing: AnnuityTiming,
    #[serde(default)]
    pub payment: Option<f64>,
    /// Percent per period
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub periods: Option<f64>,
    #[serde(default)]
    pub present_value: Option<f64>,
    #[serde(default)]
    pub future_value: Option<f64>,
    /// Escalation per step, percent; makes this an increasing annuity
    #[serde(default)]
    pub growth: Option<f64>,
    /// Periods between escalations
    #[serde(default = "default_escalation_step")]
    pub step: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityParams {
    pub variable: SensitivityVariable,
    /// Values to sweep; the standard range when absent
    #[serde(default)]
    pub values: Option<Vec<f64>>,
    #[serde(flatten)]
    pub base: ScenarioParams,
}

fn default_compounding_freq() -> u32 {
    1
}

fn default_escalation_step() -> u32 {
    1
}

/// Loan payment plus the per-year breakdown shown under the schedule chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanReport {
    #[serde(flatten)]
    pub loan: LoanResult,
    pub yearly_summary: Vec<YearlyLoanSummary>,
}

/// A finished calculation, ready for the external store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub calculation_type: String,
    pub parameters: Value,
    pub results: Value,
    pub computed_at: DateTime<Utc>,
}

impl CalculationRequest {
    /// Parse a request from its JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Wire name of the calculation type
    pub fn calculation_type(&self) -> &'static str {
        match self {
            CalculationRequest::RateConversion(_) => "rateConversion",
            CalculationRequest::SimpleInterest(_) => "simpleInterest",
            CalculationRequest::CompoundInterest(_) => "compoundInterest",
            CalculationRequest::Loan(_) => "loan",
            CalculationRequest::Annuity(_) => "annuity",
            CalculationRequest::Problem64(_) => "problem64",
            CalculationRequest::Problem64Sensitivity(_) => "problem64Sensitivity",
        }
    }

    /// Run the solver and return its result as JSON
    pub fn solve(&self) -> Result<Value> {
        let results = match self {
            CalculationRequest::RateConversion(p) => serde_json::to_value(convert(p.rate, p.basis)?)?,
            CalculationRequest::SimpleInterest(p) => {
                serde_json::to_value(solve_simple(p.principal, p.rate, p.time, p.future_value)?)?
            }
            CalculationRequest::CompoundInterest(p) => serde_json::to_value(solve_compound(
                p.principal,
                p.rate,
                p.time,
                p.compounding_freq,
                p.future_value,
            )?)?,
            CalculationRequest::Loan(p) => {
                let loan = amortize(p.loan_amount, p.interest_rate, p.term_years)?;
                let yearly_summary = amortization_schedule(&loan).yearly_summary();
                serde_json::to_value(LoanReport { loan, yearly_summary })?
            }
            CalculationRequest::Annuity(p) => serde_json::to_value(solve_annuity_request(p)?)?,
            CalculationRequest::Problem64(p) => serde_json::to_value(solve_scenario(p)?)?,
            CalculationRequest::Problem64Sensitivity(p) => {
                let runner = SensitivityRunner::new(p.base);
                let points = match &p.values {
                    Some(values) => runner.run(p.variable, values)?,
                    None => runner.run_default(p.variable)?,
                };
                serde_json::to_value(points)?
            }
        };
        Ok(results)
    }

    /// Solve and wrap the request and result in a timestamped record
    pub fn evaluate(&self) -> Result<CalculationRecord> {
        let results = self.solve()?;
        let parameters = match serde_json::to_value(self)? {
            Value::Object(mut envelope) => envelope.remove("parameters").unwrap_or(Value::Null),
            _ => Value::Null,
        };

        log::info!("evaluated {} calculation", self.calculation_type());
        Ok(CalculationRecord {
            calculation_type: self.calculation_type().to_string(),
            parameters,
            results,
            computed_at: Utc::now(),
        })
    }
}

fn solve_annuity_request(p: &AnnuityParams) -> Result<AnnuityResult> {
    let Some(growth) = p.growth else {
        return solve_annuity(p.timing, p.payment, p.rate, p.periods, p.present_value, p.future_value);
    };

    let (payment, rate, periods) = match (p.payment, p.rate, p.periods) {
        (Some(payment), Some(rate), Some(periods)) => (payment, rate, periods),
        _ => {
            return Err(CalcError::insufficient(
                "increasing annuity",
                "payment, rate and periods are required",
            ))
        }
    };
    if periods.fract() != 0.0 || periods < 1.0 || periods > u32::MAX as f64 {
        return Err(CalcError::invalid("periods", periods, "must be a whole number of periods"));
    }
    increasing_annuity(p.timing, payment, rate, periods as u32, growth, p.step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simple_interest_request() {
        let request = CalculationRequest::from_json(
            r#"{"calculationType":"simpleInterest","parameters":{"principal":1000,"rate":10,"time":5}}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            CalculationRequest::SimpleInterest(InterestParams {
                principal: Some(1000.0),
                rate: Some(10.0),
                time: Some(5.0),
                future_value: None,
            })
        );

        let record = request.evaluate().unwrap();
        assert_eq!(record.calculation_type, "simpleInterest");
        assert_eq!(record.results["futureValue"].as_f64(), Some(1500.0));
        assert_eq!(record.parameters["principal"].as_f64(), Some(1000.0));
    }

    #[test]
    fn test_zero_in_json_is_present() {
        let request = CalculationRequest::from_json(
            r#"{"calculationType":"compoundInterest","parameters":{"principal":500,"rate":0,"time":3,"compoundingFreq":12}}"#,
        )
        .unwrap();
        let results = request.solve().unwrap();
        assert_eq!(results["futureValue"].as_f64(), Some(500.0));
    }

    #[test]
    fn test_insufficient_compound_request() {
        let request = CalculationRequest::from_json(
            r#"{"calculationType":"compoundInterest","parameters":{"time":5,"compoundingFreq":12}}"#,
        )
        .unwrap();
        assert!(matches!(request.solve(), Err(CalcError::InsufficientParameters { .. })));
    }

    #[test]
    fn test_rate_conversion_request() {
        let request = CalculationRequest::from_json(
            r#"{"calculationType":"rateConversion","parameters":{"rate":12,"basis":"nominal","freq":12}}"#,
        )
        .unwrap();
        let results = request.solve().unwrap();
        let effective = results["effectiveAnnual"].as_f64().unwrap();
        assert!((effective - 12.6825).abs() < 1e-4);
    }

    #[test]
    fn test_loan_request_has_yearly_summary() {
        let request = CalculationRequest::Loan(LoanParams {
            loan_amount: 250_000.0,
            interest_rate: 8.5,
            term_years: 20.0,
        });
        let results = request.solve().unwrap();
        assert_eq!(results["termMonths"].as_u64(), Some(240));
        assert_eq!(results["yearlySummary"].as_array().map(|a| a.len()), Some(20));
    }

    #[test]
    fn test_increasing_annuity_request() {
        let request = CalculationRequest::from_json(
            r#"{"calculationType":"annuity","parameters":{"payment":100,"rate":0,"periods":24,"growth":10,"step":12}}"#,
        )
        .unwrap();
        let results = request.solve().unwrap();
        assert_relative_eq!(results["totalPayments"].as_f64().unwrap(), 2520.0, max_relative = 1e-12);

        let request = CalculationRequest::from_json(
            r#"{"calculationType":"annuity","parameters":{"payment":100,"rate":1,"periods":2.5,"growth":10}}"#,
        )
        .unwrap();
        assert!(matches!(request.solve(), Err(CalcError::InvalidArgument { name: "periods", .. })));
    }

    #[test]
    fn test_problem64_defaults_from_empty_parameters() {
        let request =
            CalculationRequest::from_json(r#"{"calculationType":"problem64","parameters":{}}"#).unwrap();
        assert_eq!(request, CalculationRequest::Problem64(ScenarioParams::default()));
        let results = request.solve().unwrap();
        assert!((results["firstPayment"].as_f64().unwrap() - 595.9571).abs() < 1e-3);
    }

    #[test]
    fn test_problem64_oversized_years_is_an_error() {
        let request = CalculationRequest::from_json(
            r#"{"calculationType":"problem64","parameters":{"withdrawalYears":400000000}}"#,
        )
        .unwrap();
        assert!(matches!(
            request.solve(),
            Err(CalcError::InvalidArgument { name: "withdrawal_years", .. })
        ));
        assert!(request.evaluate().is_err());
    }

    #[test]
    fn test_sensitivity_request() {
        let request = CalculationRequest::from_json(
            r#"{"calculationType":"problem64Sensitivity","parameters":{"variable":"nominalRate","values":[10,12],"investmentYears":30}}"#,
        )
        .unwrap();
        let results = request.solve().unwrap();
        let points = results.as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1]["value"].as_f64(), Some(12.0));
    }

    #[test]
    fn test_record_round_trip() {
        let request = CalculationRequest::Problem64(ScenarioParams::default());
        let record = request.evaluate().unwrap();
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains("\"calculationType\":\"problem64\""));
        assert!(text.contains("computedAt"));

        let parsed: CalculationRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.calculation_type, record.calculation_type);
        assert_eq!(parsed.parameters, record.parameters);
        assert_eq!(parsed.computed_at, record.computed_at);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = CalculationRequest::from_json(r#"{"calculationType":"csvExport","parameters":{}}"#)
            .unwrap_err();
        assert!(matches!(err, CalcError::Serialization(_)));
    }
}
