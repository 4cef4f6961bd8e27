//! Error types shared by every solver

use thiserror::Error;

/// Errors raised by the financial math solvers
///
/// All errors are local to a single solver call. Retrying with the same
/// inputs always produces the same error.
#[derive(Error, Debug)]
pub enum CalcError {
    /// Not enough inputs were supplied to determine a unique solution
    #[error("{solver}: insufficient parameters ({detail})")]
    InsufficientParameters {
        /// Solver that rejected the call
        solver: &'static str,
        /// Which inputs were expected
        detail: &'static str,
    },

    /// An input was non-finite or outside the formula's domain
    #[error("invalid {name} = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The selected formula would divide by zero
    #[error("numeric degeneracy: {detail}")]
    NumericDegeneracy { detail: &'static str },

    /// A calculation request or record could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CalcError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        CalcError::InvalidArgument { name, value, reason }
    }

    pub(crate) fn insufficient(solver: &'static str, detail: &'static str) -> Self {
        CalcError::InsufficientParameters { solver, detail }
    }

    pub(crate) fn degenerate(detail: &'static str) -> Self {
        CalcError::NumericDegeneracy { detail }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, CalcError>;

/// Reject NaN and infinite inputs
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(name, value, "must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CalcError::insufficient("simple interest", "need three of four values");
        assert!(err.to_string().contains("simple interest"));

        let err = CalcError::invalid("time", 0.0, "must be positive");
        assert_eq!(err.to_string(), "invalid time = 0: must be positive");
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("rate", 5.0).is_ok());
        assert!(matches!(
            ensure_finite("rate", f64::NAN),
            Err(CalcError::InvalidArgument { name: "rate", .. })
        ));
        assert!(ensure_finite("rate", f64::INFINITY).is_err());
    }
}
