pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "compliance")]
pub mod compliance;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "report")]
pub mod report;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
