pub mod decimal;
pub mod errors;
pub mod registry;
pub mod schedule;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use registry::{Loan, LoanRegistry, NewLoan, NewUser, User};
pub use schedule::{
    periodic_payment, summarize, AmortizationSchedule, LoanSummary, ScheduleIter, ScheduleRow,
};
pub use types::{LoanId, LoanTerms, PaymentFrequency, UserId};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
