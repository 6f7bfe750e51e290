use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::schedule::payment::periodic_payment;
use crate::types::LoanTerms;

/// one period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period: u32,
    pub payment_amount: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
}

/// lazy, forward-only walk of a schedule, one row per period
///
/// single-use; regenerate from the same terms for an identical walk
#[derive(Debug, Clone)]
pub struct ScheduleIter {
    fixed_payment: Money,
    period_rate: Decimal,
    balance: Money,
    term_periods: u32,
    next_period: u32,
}

impl ScheduleIter {
    pub fn new(terms: &LoanTerms) -> Result<Self> {
        Ok(Self {
            fixed_payment: periodic_payment(terms)?,
            period_rate: terms.period_rate().as_decimal(),
            balance: terms.principal,
            term_periods: terms.term_periods,
            next_period: 1,
        })
    }

    /// the fixed payment applied to every period but the last
    pub fn fixed_payment(&self) -> Money {
        self.fixed_payment
    }
}

impl Iterator for ScheduleIter {
    type Item = ScheduleRow;

    fn next(&mut self) -> Option<ScheduleRow> {
        if self.next_period > self.term_periods {
            return None;
        }
        let period = self.next_period;
        self.next_period += 1;

        let interest = self.balance * self.period_rate;

        if period == self.term_periods {
            // closing payment retires the balance exactly, absorbing the
            // rounding drift accumulated over the fixed payments
            let row = ScheduleRow {
                period,
                payment_amount: self.balance + interest,
                interest_portion: interest,
                principal_portion: self.balance,
                remaining_balance: Money::ZERO,
            };
            self.balance = Money::ZERO;
            return Some(row);
        }

        let principal = self.fixed_payment - interest;
        self.balance -= principal;
        Some(ScheduleRow {
            period,
            payment_amount: self.fixed_payment,
            interest_portion: interest,
            principal_portion: principal,
            remaining_balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.term_periods as u64 + 1).saturating_sub(self.next_period as u64) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScheduleIter {}

/// materialized amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub periodic_payment: Money,
    pub rows: Vec<ScheduleRow>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate the full schedule
    pub fn generate(terms: LoanTerms) -> Result<Self> {
        let iter = ScheduleIter::new(&terms)?;
        let periodic_payment = iter.fixed_payment();
        let rows: Vec<ScheduleRow> = iter.collect();

        let total_interest = rows
            .iter()
            .map(|r| r.interest_portion)
            .fold(Money::ZERO, |acc, x| acc + x);

        let total_payment = rows
            .iter()
            .map(|r| r.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            terms,
            periodic_payment,
            rows,
            total_interest,
            total_payment,
        })
    }

    /// get row for a specific period
    pub fn row(&self, period: u32) -> Option<&ScheduleRow> {
        if period == 0 {
            return None;
        }
        self.rows.get((period - 1) as usize)
    }

    /// remaining balance after the given period
    pub fn balance_after(&self, period: u32) -> Money {
        self.row(period)
            .map(|r| r.remaining_balance)
            .unwrap_or(self.terms.principal)
    }

    /// serialize to json
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// deserialize from json
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
