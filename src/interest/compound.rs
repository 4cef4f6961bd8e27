//! Compound interest: FV = P * (1 + r/n)^(n t)

use serde::{Deserialize, Serialize};

use super::Knowns;
use crate::error::{ensure_finite, CalcError, Result};

const SOLVER: &str = "compound interest";

/// Solved compound interest problem; `rate` is a nominal annual percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestResult {
    pub principal: f64,
    pub rate: f64,
    pub time: f64,
    pub compounding_freq: u32,
    pub interest: f64,
    pub future_value: f64,
}

/// Balance at the end of a given year of a growth series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub year: u32,
    pub balance: f64,
    pub interest_earned: f64,
}

/// Per-period growth factor 1 + r/n for a percentage rate; must be positive
fn periodic_growth(rate: f64, n: f64) -> Result<f64> {
    let per_period = 1.0 + rate / 100.0 / n;
    if per_period <= 0.0 {
        return Err(CalcError::invalid("rate", rate, "periodic growth factor must be positive"));
    }
    Ok(per_period)
}

/// Accumulation factor (1 + r/n)^(n t) for a percentage rate
fn accumulation(rate: f64, time: f64, n: f64) -> Result<f64> {
    Ok(periodic_growth(rate, n)?.powf(n * time))
}

/// Solve the compound interest equation for whichever value is missing
///
/// `compounding_freq` is the number of compounding periods per year.
pub fn solve_compound(
    principal: Option<f64>,
    rate: Option<f64>,
    time: Option<f64>,
    compounding_freq: u32,
    future_value: Option<f64>,
) -> Result<CompoundInterestResult> {
    if compounding_freq == 0 {
        return Err(CalcError::invalid(
            "compounding_freq",
            0.0,
            "compounding frequency must be at least 1",
        ));
    }
    let n = compounding_freq as f64;

    let (principal, rate, time, future_value) =
        match Knowns::resolve(SOLVER, principal, rate, time, future_value)? {
            Knowns::FutureValue { principal, rate, time } => {
                (principal, rate, time, principal * accumulation(rate, time, n)?)
            }
            Knowns::Principal { future_value, rate, time } => {
                let factor = accumulation(rate, time, n)?;
                if factor == 0.0 || !factor.is_finite() {
                    return Err(CalcError::degenerate("accumulation factor is zero, principal is undefined"));
                }
                (future_value / factor, rate, time, future_value)
            }
            Knowns::Rate { principal, future_value, time } => {
                if principal == 0.0 || time == 0.0 {
                    return Err(CalcError::degenerate("principal or time is zero, rate is undefined"));
                }
                let ratio = growth_ratio(principal, future_value)?;
                let rate = n * (ratio.powf(1.0 / (n * time)) - 1.0) * 100.0;
                (principal, rate, time, future_value)
            }
            Knowns::Time { principal, rate, future_value } => {
                if principal == 0.0 || rate == 0.0 {
                    return Err(CalcError::degenerate("principal or rate is zero, time is undefined"));
                }
                let ratio = growth_ratio(principal, future_value)?;
                let per_period = periodic_growth(rate, n)?;
                let time = ratio.ln() / (n * per_period.ln());
                (principal, rate, time, future_value)
            }
        };

    Ok(CompoundInterestResult {
        principal,
        rate,
        time,
        compounding_freq,
        interest: future_value - principal,
        future_value,
    })
}

fn growth_ratio(principal: f64, future_value: f64) -> Result<f64> {
    let ratio = future_value / principal;
    if ratio <= 0.0 {
        return Err(CalcError::invalid(
            "future_value",
            future_value,
            "future value and principal must have the same sign",
        ));
    }
    Ok(ratio)
}

/// Year-end balances for years `0..=years`, using the same formula as [`solve_compound`]
pub fn growth_by_year(
    principal: f64,
    rate: f64,
    years: u32,
    compounding_freq: u32,
) -> Result<Vec<GrowthPoint>> {
    let principal = ensure_finite("principal", principal)?;
    let rate = ensure_finite("rate", rate)?;

    (0..=years)
        .map(|year| -> Result<GrowthPoint> {
            let solved = solve_compound(
                Some(principal),
                Some(rate),
                Some(year as f64),
                compounding_freq,
                None,
            )?;
            Ok(GrowthPoint {
                year,
                balance: solved.future_value,
                interest_earned: solved.interest,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_compounding() {
        let result = solve_compound(Some(1000.0), Some(6.0), Some(10.0), 12, None).unwrap();
        let expected = 1000.0 * 1.005_f64.powf(120.0);
        assert_relative_eq!(result.future_value, expected, max_relative = 1e-12);
        assert_relative_eq!(result.interest, expected - 1000.0, max_relative = 1e-12);
        assert_eq!(result.compounding_freq, 12);
    }

    #[test]
    fn test_future_value_inverts_to_principal() {
        for &(p, r, t, n) in &[
            (1000.0, 6.0, 10.0, 12),
            (50_000.0, 3.25, 2.5, 4),
            (10.0, 18.0, 30.0, 365),
            (7_500.0, 0.0, 5.0, 1),
        ] {
            let forward = solve_compound(Some(p), Some(r), Some(t), n, None).unwrap();
            let back = solve_compound(None, Some(r), Some(t), n, Some(forward.future_value)).unwrap();
            assert_relative_eq!(back.principal, p, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_solve_rate() {
        let fv = 1000.0 * 1.02_f64.powf(20.0);
        let result = solve_compound(Some(1000.0), None, Some(5.0), 4, Some(fv)).unwrap();
        assert_relative_eq!(result.rate, 8.0, max_relative = 1e-10);
    }

    #[test]
    fn test_solve_time() {
        let result = solve_compound(Some(1000.0), Some(12.0), None, 12, Some(2000.0)).unwrap();
        let expected = 2.0_f64.ln() / (12.0 * 1.01_f64.ln());
        assert_relative_eq!(result.time, expected, max_relative = 1e-12);
        assert!((result.time - 5.805).abs() < 0.001);
    }

    #[test]
    fn test_only_time_and_frequency() {
        let err = solve_compound(None, None, Some(5.0), 12, None).unwrap_err();
        assert!(matches!(err, CalcError::InsufficientParameters { solver: "compound interest", .. }));
    }

    #[test]
    fn test_degenerate_branches() {
        let err = solve_compound(Some(1000.0), Some(0.0), None, 12, Some(2000.0)).unwrap_err();
        assert!(matches!(err, CalcError::NumericDegeneracy { .. }));

        let err = solve_compound(Some(1000.0), None, Some(0.0), 12, Some(2000.0)).unwrap_err();
        assert!(matches!(err, CalcError::NumericDegeneracy { .. }));

        let err = solve_compound(Some(1000.0), None, Some(5.0), 12, Some(-2000.0)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { name: "future_value", .. }));

        let err = solve_compound(Some(1000.0), Some(5.0), Some(5.0), 0, None).unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { name: "compounding_freq", .. }));
    }

    #[test]
    fn test_rate_below_minus_frequency_rejected() {
        // 1 + r/n < 0: a whole number of periods would otherwise yield a signed balance
        let err = solve_compound(Some(1000.0), Some(-1500.0), Some(1.0), 12, None).unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { name: "rate", .. }));

        let err = solve_compound(Some(1000.0), Some(-1500.0), Some(1.55), 12, None).unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { name: "rate", .. }));

        let err = solve_compound(None, Some(-1500.0), Some(1.5), 12, Some(1000.0)).unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { name: "rate", .. }));

        // Exactly -100% per period wipes the balance
        let err = solve_compound(Some(1000.0), Some(-1200.0), Some(1.0), 12, None).unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { name: "rate", .. }));

        assert!(growth_by_year(1000.0, -1500.0, 3, 12).is_err());
    }

    #[test]
    fn test_growth_by_year_matches_solver() {
        let series = growth_by_year(5000.0, 7.0, 10, 4).unwrap();
        assert_eq!(series.len(), 11);
        assert_eq!(series[0].balance, 5000.0);
        assert_eq!(series[0].interest_earned, 0.0);

        let solved = solve_compound(Some(5000.0), Some(7.0), Some(10.0), 4, None).unwrap();
        assert_eq!(series[10].balance, solved.future_value);
        assert!(series.windows(2).all(|w| w[1].balance > w[0].balance));
    }
}
