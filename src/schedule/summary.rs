use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::generator::ScheduleIter;
use crate::types::LoanTerms;

/// aggregate position in a schedule after a number of periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoanSummary {
    pub current_principal_balance: Money,
    pub aggregate_principal_paid: Money,
    pub aggregate_interest_paid: Money,
}

/// fold the first `through_period` rows of the schedule
///
/// `through_period` past the end of the schedule caps at the final period.
/// zero periods yield the all-zero summary, including a zero balance; the
/// balance before any payment is the principal itself, which callers wanting
/// pre-amortization semantics read from their loan record instead
pub fn summarize(terms: &LoanTerms, through_period: u32) -> Result<LoanSummary> {
    let mut summary = LoanSummary::default();

    for row in ScheduleIter::new(terms)?.take(through_period as usize) {
        summary.current_principal_balance = row.remaining_balance;
        summary.aggregate_principal_paid += row.principal_portion;
        summary.aggregate_interest_paid += row.interest_portion;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::errors::LoanError;
    use crate::types::PaymentFrequency;
    use rust_decimal_macros::dec;

    fn reference_terms() -> LoanTerms {
        LoanTerms::new(
            Money::from_major(1000),
            Rate::from_percentage(dec!(5.0)),
            36,
            PaymentFrequency::Monthly,
        )
    }

    #[test]
    fn test_summary_through_period_fourteen() {
        let summary = summarize(&reference_terms(), 14).unwrap();

        assert_eq!(
            summary.current_principal_balance,
            Money::from_str_exact("628.78").unwrap()
        );
        assert_eq!(
            summary.aggregate_principal_paid,
            Money::from_str_exact("371.22").unwrap()
        );
        assert_eq!(
            summary.aggregate_interest_paid,
            Money::from_str_exact("48.36").unwrap()
        );
    }

    #[test]
    fn test_summary_through_zero_periods() {
        let summary = summarize(&reference_terms(), 0).unwrap();
        assert_eq!(summary, LoanSummary::default());
    }

    #[test]
    fn test_summary_caps_at_schedule_length() {
        let full = summarize(&reference_terms(), 36).unwrap();
        let capped = summarize(&reference_terms(), 500).unwrap();

        assert_eq!(capped, full);
        assert_eq!(full.current_principal_balance, Money::ZERO);
        assert_eq!(full.aggregate_principal_paid, Money::from_major(1000));
    }

    #[test]
    fn test_summary_zero_term_is_rejected() {
        let terms = LoanTerms::new(
            Money::from_major(1000),
            Rate::from_decimal(dec!(0.05)),
            0,
            PaymentFrequency::Monthly,
        );
        assert!(matches!(
            summarize(&terms, 5),
            Err(LoanError::InvalidTerm { periods: 0 })
        ));
    }
}
