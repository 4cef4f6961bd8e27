//! Interest rate conversion between simple, effective, nominal and continuous bases

mod conversion;

pub use conversion::{
    convert, from_effective_annual, from_nominal, from_simple, RateBasis, RateSet,
};
pub(crate) use conversion::{effective_to_periodic, nominal_to_effective};
