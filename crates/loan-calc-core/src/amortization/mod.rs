pub mod engine;
pub mod schedule;
pub mod validation;

pub use engine::{AmortizationEngine, AmortizationResult};
pub use schedule::{amortize, PaymentPlan, PeriodEntry, PREVIEW_PERIODS};
pub use validation::{validate, ValidationOutcome, DEFAULT_LARGE_LOAN_THRESHOLD};
