//! Level monthly payment and the month-by-month amortization schedule

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CalcError, Result};

/// Loan terms and the resulting level payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub loan_amount: f64,
    /// Annual rate, percent
    pub interest_rate: f64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_payments: f64,
}

impl LoanResult {
    /// Monthly rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0
    }
}

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    /// Payment number (1-indexed)
    pub month: u32,
    pub payment: f64,
    pub principal_payment: f64,
    pub interest_payment: f64,
    pub remaining_balance: f64,
}

/// Principal and interest paid during one loan year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyLoanSummary {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub ending_balance: f64,
}

/// Complete month-by-month schedule for a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal_payment).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest_payment).sum()
    }

    /// Balance after the last payment (0 for an empty schedule)
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.remaining_balance).unwrap_or(0.0)
    }

    /// Aggregate the monthly rows into loan years
    pub fn yearly_summary(&self) -> Vec<YearlyLoanSummary> {
        let mut years: Vec<YearlyLoanSummary> = Vec::new();

        for row in &self.rows {
            let year = (row.month - 1) / 12 + 1;
            if years.last().map(|y| y.year) != Some(year) {
                years.push(YearlyLoanSummary { year, ..Default::default() });
            }
            if let Some(summary) = years.last_mut() {
                summary.principal_paid += row.principal_payment;
                summary.interest_paid += row.interest_payment;
                summary.ending_balance = row.remaining_balance;
            }
        }

        years
    }
}

/// Compute the level monthly payment for a fixed-rate loan
///
/// ```text
/// PMT = L * i * (1 + i)^n / ((1 + i)^n - 1),   i = rate / 100 / 12, n = years * 12
/// ```
///
/// A zero rate repays the loan in equal slices of `L / n`.
pub fn amortize(loan_amount: f64, annual_rate: f64, term_years: f64) -> Result<LoanResult> {
    let loan_amount = ensure_finite("loan_amount", loan_amount)?;
    let annual_rate = ensure_finite("annual_rate", annual_rate)?;
    let term_years = ensure_finite("term_years", term_years)?;

    if loan_amount < 0.0 {
        return Err(CalcError::invalid("loan_amount", loan_amount, "must not be negative"));
    }
    if annual_rate < 0.0 {
        return Err(CalcError::invalid("annual_rate", annual_rate, "must not be negative"));
    }
    let months = (term_years * 12.0).round();
    if months < 1.0 || months > u32::MAX as f64 {
        return Err(CalcError::invalid("term_years", term_years, "must cover at least one month"));
    }
    let term_months = months as u32;

    let monthly_rate = annual_rate / 100.0 / 12.0;
    // Below this the growth factor rounds to 1 and the annuity formula divides by zero
    let monthly_payment = if monthly_rate.abs() < 1e-10 {
        log::debug!(
            "zero-rate loan (monthly rate {}), repaying {} over {} months",
            monthly_rate,
            loan_amount,
            term_months
        );
        loan_amount / months
    } else {
        let growth = (1.0 + monthly_rate).powf(months);
        loan_amount * monthly_rate * growth / (growth - 1.0)
    };

    let total_payments = monthly_payment * months;
    Ok(LoanResult {
        loan_amount,
        interest_rate: annual_rate,
        term_months,
        monthly_payment,
        total_interest: total_payments - loan_amount,
        total_payments,
    })
}

/// Walk the loan month by month; the balance is clamped at zero
pub fn amortization_schedule(loan: &LoanResult) -> AmortizationSchedule {
    let monthly_rate = loan.monthly_rate();

    let rows = (1..=loan.term_months)
        .scan(loan.loan_amount, |balance, month| {
            let interest_payment = *balance * monthly_rate;
            let principal_payment = loan.monthly_payment - interest_payment;
            *balance = (*balance - principal_payment).max(0.0);
            Some(AmortizationRow {
                month,
                payment: loan.monthly_payment,
                principal_payment,
                interest_payment,
                remaining_balance: *balance,
            })
        })
        .collect();

    AmortizationSchedule { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_mortgage_payment() {
        let loan = amortize(250_000.0, 8.5, 20.0).unwrap();
        assert_eq!(loan.term_months, 240);
        assert_abs_diff_eq!(loan.monthly_payment, 2169.558083, epsilon = 1e-5);
        assert_relative_eq!(loan.total_payments, loan.monthly_payment * 240.0);
        assert_relative_eq!(loan.total_interest, loan.total_payments - 250_000.0);
    }

    #[test]
    fn test_schedule_amortizes_to_zero() {
        let loan = amortize(250_000.0, 8.5, 20.0).unwrap();
        let schedule = amortization_schedule(&loan);

        assert_eq!(schedule.rows.len(), 240);
        assert!(schedule.final_balance().abs() < 1e-2, "final balance {}", schedule.final_balance());
        assert!((schedule.total_principal() - 250_000.0).abs() < 1e-2);
        assert!((schedule.total_interest() - loan.total_interest).abs() < 1e-2);
        assert!(schedule.rows.iter().all(|r| r.remaining_balance >= 0.0));
    }

    #[test]
    fn test_first_month_split() {
        let loan = amortize(120_000.0, 6.0, 30.0).unwrap();
        let schedule = amortization_schedule(&loan);
        let first = schedule.rows[0];
        assert_relative_eq!(first.interest_payment, 600.0, max_relative = 1e-12);
        assert_relative_eq!(first.principal_payment, loan.monthly_payment - 600.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate_loan() {
        let loan = amortize(12_000.0, 0.0, 1.0).unwrap();
        assert_eq!(loan.monthly_payment, 1000.0);
        assert_eq!(loan.total_interest, 0.0);

        let schedule = amortization_schedule(&loan);
        assert_eq!(schedule.final_balance(), 0.0);
    }

    #[test]
    fn test_near_zero_rate_loan() {
        let loan = amortize(12_000.0, 1e-14, 1.0).unwrap();
        assert_abs_diff_eq!(loan.monthly_payment, 1000.0, epsilon = 1e-9);
        assert!(loan.total_interest.is_finite());
        assert_abs_diff_eq!(loan.total_interest, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(loan.total_payments, 12_000.0, epsilon = 1e-6);

        let schedule = amortization_schedule(&loan);
        assert_abs_diff_eq!(schedule.final_balance(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_yearly_summary() {
        let loan = amortize(100_000.0, 5.0, 2.5).unwrap();
        let schedule = amortization_schedule(&loan);
        let years = schedule.yearly_summary();

        assert_eq!(loan.term_months, 30);
        assert_eq!(years.len(), 3);
        assert_eq!(years[2].year, 3);
        let principal: f64 = years.iter().map(|y| y.principal_paid).sum();
        assert_abs_diff_eq!(principal, schedule.total_principal(), epsilon = 1e-6);
        assert_eq!(years[2].ending_balance, schedule.final_balance());
        // Interest share shrinks as the balance falls
        assert!(years[0].interest_paid > years[1].interest_paid);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            amortize(f64::NAN, 5.0, 10.0),
            Err(CalcError::InvalidArgument { name: "loan_amount", .. })
        ));
        assert!(matches!(
            amortize(10_000.0, 5.0, 0.0),
            Err(CalcError::InvalidArgument { name: "term_years", .. })
        ));
        assert!(amortize(10_000.0, -1.0, 10.0).is_err());
    }
}
