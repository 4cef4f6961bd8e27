//! Level-payment annuities

use super::{AnnuityResult, AnnuityTiming};
use crate::error::{ensure_finite, CalcError, Result};

/// Which value the caller supplied, in priority order
#[derive(Debug, Clone, Copy)]
enum Given {
    Payment(f64),
    PresentValue(f64),
    FutureValue(f64),
}

/// Rates this close to zero use the limit forms; `1 + rate` would round to 1
const ZERO_RATE_TOLERANCE: f64 = 1e-10;

/// Present value of 1 per period for `n` periods (end of period)
fn pv_factor(rate: f64, n: f64) -> f64 {
    if rate.abs() < ZERO_RATE_TOLERANCE {
        n
    } else {
        (1.0 - (1.0 + rate).powf(-n)) / rate
    }
}

/// Accumulated value of 1 per period for `n` periods (end of period)
fn fv_factor(rate: f64, n: f64) -> f64 {
    if rate.abs() < ZERO_RATE_TOLERANCE {
        n
    } else {
        ((1.0 + rate).powf(n) - 1.0) / rate
    }
}

/// Solve an end-of-period annuity
///
/// `rate` and `periods` are required. Of `payment`, `present_value` and
/// `future_value` the first one supplied (in that order) drives the
/// calculation and the other two are derived from it.
pub fn solve_ordinary_annuity(
    payment: Option<f64>,
    rate: Option<f64>,
    periods: Option<f64>,
    present_value: Option<f64>,
    future_value: Option<f64>,
) -> Result<AnnuityResult> {
    solve_annuity(AnnuityTiming::Ordinary, payment, rate, periods, present_value, future_value)
}

/// Solve a start-of-period annuity; PV and FV are the ordinary values times (1 + r)
pub fn solve_annuity_due(
    payment: Option<f64>,
    rate: Option<f64>,
    periods: Option<f64>,
    present_value: Option<f64>,
    future_value: Option<f64>,
) -> Result<AnnuityResult> {
    solve_annuity(AnnuityTiming::Due, payment, rate, periods, present_value, future_value)
}

/// Solve a level annuity with the given payment timing
pub fn solve_annuity(
    timing: AnnuityTiming,
    payment: Option<f64>,
    rate: Option<f64>,
    periods: Option<f64>,
    present_value: Option<f64>,
    future_value: Option<f64>,
) -> Result<AnnuityResult> {
    let (rate, periods) = match (rate, periods) {
        (Some(rate), Some(periods)) => (rate, periods),
        _ => {
            return Err(CalcError::insufficient(
                "annuity",
                "rate and number of periods are required",
            ))
        }
    };
    let r = ensure_finite("rate", rate)? / 100.0;
    let n = ensure_finite("periods", periods)?;
    if n <= 0.0 {
        return Err(CalcError::invalid("periods", n, "must be greater than zero"));
    }
    if 1.0 + r <= 0.0 {
        return Err(CalcError::invalid("rate", rate, "must be greater than -100%"));
    }

    let given = match (payment, present_value, future_value) {
        (Some(pmt), _, _) => Given::Payment(ensure_finite("payment", pmt)?),
        (None, Some(pv), _) => Given::PresentValue(ensure_finite("present_value", pv)?),
        (None, None, Some(fv)) => Given::FutureValue(ensure_finite("future_value", fv)?),
        (None, None, None) => {
            return Err(CalcError::insufficient(
                "annuity",
                "one of payment, present value, future value is required",
            ))
        }
    };

    let adjust = timing.adjustment(r);
    let a_n = pv_factor(r, n) * adjust;
    let s_n = fv_factor(r, n) * adjust;
    log::debug!("annuity {:?}: given {:?}, a_n = {}, s_n = {}", timing, given, a_n, s_n);

    let (payment, present_value, future_value) = match given {
        Given::Payment(pmt) => (pmt, pmt * a_n, pmt * s_n),
        Given::PresentValue(pv) => {
            let pmt = pv / a_n;
            (pmt, pv, pmt * s_n)
        }
        Given::FutureValue(fv) => {
            let pmt = fv / s_n;
            (pmt, pmt * a_n, fv)
        }
    };

    let total_payments = payment * n;
    Ok(AnnuityResult {
        payment,
        present_value,
        future_value,
        total_payments,
        total_interest: future_value - total_payments,
    })
}
