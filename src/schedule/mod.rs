pub mod generator;
pub mod payment;
pub mod summary;

pub use generator::{AmortizationSchedule, ScheduleIter, ScheduleRow};
pub use payment::periodic_payment;
pub use summary::{summarize, LoanSummary};
