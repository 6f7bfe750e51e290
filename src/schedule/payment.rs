use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::types::LoanTerms;

/// calculate the fixed per-period payment
///
/// standard annuity formula: PMT = P * r * (1 + r)^n / ((1 + r)^n - 1),
/// with r the annual rate divided by the frequency's periods per year,
/// rounded to cents
pub fn periodic_payment(terms: &LoanTerms) -> Result<Money> {
    if terms.term_periods == 0 {
        return Err(LoanError::InvalidTerm {
            periods: terms.term_periods,
        });
    }

    let rate = terms.period_rate().as_decimal();
    let principal = terms.principal.as_decimal();

    // both annuity factors collapse at rate zero, take the limit P / n
    if rate.is_zero() {
        return Ok(Money::from_decimal(
            principal / Decimal::from(terms.term_periods),
        ));
    }

    let growth = compound_factor(rate, terms.term_periods);
    Ok(Money::from_decimal(
        principal * (rate * growth) / (growth - Decimal::ONE),
    ))
}

/// (1 + r)^n using iteration
pub(crate) fn compound_factor(rate: Decimal, periods: u32) -> Decimal {
    let mut factor = Decimal::ONE;
    let base = Decimal::ONE + rate;
    for _ in 0..periods {
        factor *= base;
    }
    factor
}
