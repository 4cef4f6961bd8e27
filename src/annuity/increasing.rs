//! Escalating annuities
//!
//! The payment grows by `growth` percent every `step` periods, so with
//! monthly periods and `step = 12` the payment is level within each year and
//! steps up at each anniversary. Values are accumulated term by term in
//! ascending period order.

use super::{AnnuityResult, AnnuityTiming};
use crate::error::{ensure_finite, CalcError, Result};

/// Value of an escalating annuity
///
/// Payment `k` (1-indexed) is `payment * (1 + g)^(ceil(k / step) - 1)`.
/// `rate` and `growth` are percentages per period and per step respectively.
pub fn increasing_annuity(
    timing: AnnuityTiming,
    payment: f64,
    rate: f64,
    periods: u32,
    growth: f64,
    step: u32,
) -> Result<AnnuityResult> {
    let payment = ensure_finite("payment", payment)?;
    let r = ensure_finite("rate", rate)? / 100.0;
    let g = ensure_finite("growth", growth)? / 100.0;
    if periods == 0 {
        return Err(CalcError::invalid("periods", 0.0, "must be greater than zero"));
    }
    if periods > i32::MAX as u32 {
        return Err(CalcError::invalid("periods", periods as f64, "too many periods"));
    }
    if step == 0 {
        return Err(CalcError::invalid("step", 0.0, "escalation step must be at least one period"));
    }
    if 1.0 + r <= 0.0 {
        return Err(CalcError::invalid("rate", rate, "must be greater than -100%"));
    }

    let amount = |k: u32| payment * (1.0 + g).powi((k.div_ceil(step) - 1) as i32);

    let (total_payments, present_value, future_value) = (1..=periods).fold(
        (0.0, 0.0, 0.0),
        |(total, pv, fv), k| {
            let p = amount(k);
            (
                total + p,
                pv + p * (1.0 + r).powi(-(k as i32)),
                fv + p * (1.0 + r).powi((periods - k) as i32),
            )
        },
    );

    let adjust = timing.adjustment(r);
    let present_value = present_value * adjust;
    let future_value = future_value * adjust;

    Ok(AnnuityResult {
        payment,
        present_value,
        future_value,
        total_payments,
        total_interest: future_value - total_payments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity::{solve_annuity_due, solve_ordinary_annuity};
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_growth_matches_level_annuity() {
        let level = solve_ordinary_annuity(Some(500.0), Some(0.75), Some(36.0), None, None).unwrap();
        let escalating = increasing_annuity(AnnuityTiming::Ordinary, 500.0, 0.75, 36, 0.0, 12).unwrap();
        assert_relative_eq!(escalating.present_value, level.present_value, max_relative = 1e-10);
        assert_relative_eq!(escalating.future_value, level.future_value, max_relative = 1e-10);
        assert_relative_eq!(escalating.total_payments, 18_000.0, max_relative = 1e-12);

        let due = solve_annuity_due(Some(500.0), Some(0.75), Some(36.0), None, None).unwrap();
        let escalating_due = increasing_annuity(AnnuityTiming::Due, 500.0, 0.75, 36, 0.0, 12).unwrap();
        assert_relative_eq!(escalating_due.present_value, due.present_value, max_relative = 1e-10);
    }

    #[test]
    fn test_geometric_growth_every_period() {
        // Growing annuity closed form: PV = P/(r-g) * (1 - ((1+g)/(1+r))^n)
        let (p, r, g, n) = (1000.0, 0.06, 0.03, 20);
        let result = increasing_annuity(AnnuityTiming::Ordinary, p, 6.0, n, 3.0, 1).unwrap();
        let expected = p / (r - g) * (1.0 - ((1.0 + g) / (1.0 + r)).powi(n as i32));
        assert_relative_eq!(result.present_value, expected, max_relative = 1e-10);
        assert_relative_eq!(result.future_value, result.present_value * 1.06_f64.powi(20), max_relative = 1e-10);
    }

    #[test]
    fn test_yearly_steps() {
        let result = increasing_annuity(AnnuityTiming::Ordinary, 100.0, 0.0, 24, 10.0, 12).unwrap();
        // 12 payments of 100 then 12 of 110
        assert_relative_eq!(result.total_payments, 2520.0, max_relative = 1e-12);
        assert_relative_eq!(result.present_value, 2520.0, max_relative = 1e-12);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            increasing_annuity(AnnuityTiming::Ordinary, 100.0, 1.0, 12, 5.0, 0),
            Err(CalcError::InvalidArgument { name: "step", .. })
        ));
        assert!(increasing_annuity(AnnuityTiming::Ordinary, 100.0, 1.0, 0, 5.0, 12).is_err());
        assert!(matches!(
            increasing_annuity(AnnuityTiming::Ordinary, 100.0, 1.0, u32::MAX, 5.0, 12),
            Err(CalcError::InvalidArgument { name: "periods", .. })
        ));
    }
}
