use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};

/// unique identifier for a user
pub type UserId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// payment frequency, the divisor applied to an annual rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Daily,
    Biweekly,
    Weekly,
    Semimonthly,
    #[default]
    Monthly,
    Quarterly,
    Semiyearly,
    Yearly,
}

impl PaymentFrequency {
    /// get number of payment periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Daily => 365,
            PaymentFrequency::Biweekly => 104,
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Semimonthly => 24,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Semiyearly => 2,
            PaymentFrequency::Yearly => 1,
        }
    }
}

/// loan terms consumed by a single schedule calculation
///
/// `annual_rate` is the already-normalized fraction (0.10 for 10%); callers
/// holding a percentage convert with [`Rate::from_percentage`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_periods: u32,
    pub frequency: PaymentFrequency,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term_periods: u32,
        frequency: PaymentFrequency,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            term_periods,
            frequency,
        }
    }

    /// per-period rate under this frequency
    pub fn period_rate(&self) -> Rate {
        self.annual_rate.periodic(self.frequency.periods_per_year())
    }
}
