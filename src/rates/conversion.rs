//! Conversions between equivalent interest rate representations
//!
//! Every function takes a percentage (5.0 for 5%) plus its compounding
//! context and returns all five representations of the same growth rate.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CalcError, Result};

/// One growth rate expressed five equivalent ways, all in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSet {
    pub simple: f64,
    pub effective_annual: f64,
    pub nominal: f64,
    pub effective_periodic: f64,
    pub force_of_interest: f64,
}

impl RateSet {
    /// Same set with every rate as a decimal (0.05 instead of 5.0)
    pub fn to_decimal(&self) -> RateSet {
        RateSet {
            simple: self.simple / 100.0,
            effective_annual: self.effective_annual / 100.0,
            nominal: self.nominal / 100.0,
            effective_periodic: self.effective_periodic / 100.0,
            force_of_interest: self.force_of_interest / 100.0,
        }
    }
}

/// The representation a rate is quoted in, with its compounding context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "camelCase")]
pub enum RateBasis {
    /// Simple rate accruing linearly over `time` years
    #[serde(rename_all = "camelCase")]
    Simple {
        time: f64,
        #[serde(default = "default_frequency")]
        target_freq: u32,
    },
    /// Effective annual rate; `freq` is the target compounding frequency
    #[serde(rename_all = "camelCase")]
    EffectiveAnnual {
        #[serde(default = "default_frequency")]
        freq: u32,
        #[serde(default = "default_time")]
        time: f64,
    },
    /// Nominal rate convertible `freq` times per year
    #[serde(rename_all = "camelCase")]
    Nominal {
        freq: u32,
        #[serde(default = "default_frequency")]
        target_freq: u32,
    },
}

fn default_frequency() -> u32 {
    1
}

fn default_time() -> f64 {
    1.0
}

/// Convert a rate quoted on `basis` into a full [`RateSet`]
pub fn convert(rate: f64, basis: RateBasis) -> Result<RateSet> {
    match basis {
        RateBasis::Simple { time, target_freq } => from_simple(rate, time, target_freq),
        RateBasis::EffectiveAnnual { freq, time } => from_effective_annual(rate, freq, time),
        RateBasis::Nominal { freq, target_freq } => from_nominal(rate, freq, target_freq),
    }
}

/// Convert a simple rate over `time` years
///
/// ```text
/// i      = (1 + rt)^(1/t) - 1
/// i(m2)  = m2 * ((1 + rt)^(1/(m2 t)) - 1)
/// delta  = ln(1 + rt) / t
/// ```
pub fn from_simple(rate: f64, time: f64, target_freq: u32) -> Result<RateSet> {
    let r = ensure_finite("rate", rate)? / 100.0;
    let t = positive_time(time)?;
    let m2 = frequency("target_freq", target_freq)?;

    let growth = growth_factor(1.0 + r * t)?;
    let periodic = growth.powf(1.0 / (m2 * t)) - 1.0;

    Ok(RateSet {
        simple: rate,
        effective_annual: (growth.powf(1.0 / t) - 1.0) * 100.0,
        nominal: m2 * periodic * 100.0,
        effective_periodic: periodic * 100.0,
        force_of_interest: growth.ln() / t * 100.0,
    })
}

/// Convert an effective annual rate
///
/// `freq` is the target compounding frequency for the nominal and periodic
/// outputs; `time` is the horizon the equivalent simple rate covers.
pub fn from_effective_annual(rate: f64, freq: u32, time: f64) -> Result<RateSet> {
    let r = ensure_finite("rate", rate)? / 100.0;
    let t = positive_time(time)?;
    let m2 = frequency("freq", freq)?;

    let growth = growth_factor(1.0 + r)?;
    let periodic = growth.powf(1.0 / m2) - 1.0;

    Ok(RateSet {
        simple: (growth.powf(t) - 1.0) / t * 100.0,
        effective_annual: rate,
        nominal: m2 * periodic * 100.0,
        effective_periodic: periodic * 100.0,
        force_of_interest: growth.ln() * 100.0,
    })
}

/// Convert a nominal rate convertible `freq` times per year
///
/// The simple rate reported is the one-year equivalent, so it always equals
/// the effective annual rate.
pub fn from_nominal(rate: f64, freq: u32, target_freq: u32) -> Result<RateSet> {
    let r = ensure_finite("rate", rate)? / 100.0;
    let m = frequency("freq", freq)?;
    let m2 = frequency("target_freq", target_freq)?;

    let per_period = growth_factor(1.0 + r / m)?;
    let effective = per_period.powf(m) - 1.0;
    let periodic = per_period.powf(m / m2) - 1.0;

    Ok(RateSet {
        simple: effective * 100.0,
        effective_annual: effective * 100.0,
        nominal: m2 * periodic * 100.0,
        effective_periodic: periodic * 100.0,
        force_of_interest: m * per_period.ln() * 100.0,
    })
}

/// Effective annual rate (decimal) for a nominal rate (decimal) compounded `m` times
///
/// The per-period factor `1 + nominal/m` must be positive; an even power
/// would otherwise hide a negative base.
pub(crate) fn nominal_to_effective(nominal: f64, m: f64) -> Result<f64> {
    let per_period = growth_factor(1.0 + nominal / m)?;
    Ok(per_period.powf(m) - 1.0)
}

/// Periodic rate (decimal) equivalent to an effective annual rate over `m` periods
pub(crate) fn effective_to_periodic(effective: f64, m: f64) -> f64 {
    (1.0 + effective).powf(1.0 / m) - 1.0
}

fn positive_time(time: f64) -> Result<f64> {
    let t = ensure_finite("time", time)?;
    if t <= 0.0 {
        return Err(CalcError::invalid("time", t, "must be greater than zero"));
    }
    Ok(t)
}

fn frequency(name: &'static str, freq: u32) -> Result<f64> {
    if freq == 0 {
        return Err(CalcError::invalid(name, 0.0, "compounding frequency must be at least 1"));
    }
    Ok(freq as f64)
}

fn growth_factor(value: f64) -> Result<f64> {
    if value <= 0.0 {
        return Err(CalcError::invalid(
            "rate",
            value,
            "accumulation factor must be positive",
        ));
    }
    Ok(value)
}
