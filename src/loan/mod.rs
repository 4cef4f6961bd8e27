//! Fixed-payment loan amortization

mod amortization;

pub use amortization::{
    amortization_schedule, amortize, AmortizationRow, AmortizationSchedule, LoanResult,
    YearlyLoanSummary,
};
