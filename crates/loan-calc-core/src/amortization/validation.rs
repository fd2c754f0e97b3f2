use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::time_value::{checked_annuity_payment, periodic_rate, PERIODS_PER_YEAR};
use crate::types::{Money, Percent};
use crate::LoanCalcResult;

/// Principal above which a loan is flagged as unusually large.
pub const DEFAULT_LARGE_LOAN_THRESHOLD: Money = dec!(10_000_000);

/// Parameters that passed validation, plus the non-blocking advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    pub amount_unusually_large: bool,
}

/// Check raw loan parameters.
///
/// Fields are checked in the order principal, rate, term and the first
/// failure is returned. A principal above `large_loan_threshold` still
/// validates; it only sets `amount_unusually_large`. A loan whose payment or
/// total paid cannot be represented as a decimal is an invalid amount.
pub fn validate(
    principal: Option<Money>,
    annual_rate_percent: Option<Percent>,
    term_months: Option<Decimal>,
    large_loan_threshold: Money,
) -> LoanCalcResult<ValidationOutcome> {
    let principal = match principal {
        None => {
            return Err(LoanCalcError::InvalidAmount {
                reason: "Loan amount is required".into(),
            })
        }
        Some(p) if p <= Decimal::ZERO => {
            return Err(LoanCalcError::InvalidAmount {
                reason: format!("Loan amount must be positive, got {p}"),
            })
        }
        Some(p) => p,
    };

    let annual_rate_percent = match annual_rate_percent {
        None => {
            return Err(LoanCalcError::InvalidRate {
                reason: "Interest rate is required".into(),
            })
        }
        Some(r) if r <= Decimal::ZERO => {
            return Err(LoanCalcError::InvalidRate {
                reason: format!("Interest rate must be positive, got {r}"),
            })
        }
        Some(r) => r,
    };

    let term_months = match term_months {
        None => {
            return Err(LoanCalcError::InvalidTerm {
                reason: "Loan term is required".into(),
            })
        }
        Some(t) if t <= Decimal::ZERO => {
            return Err(LoanCalcError::InvalidTerm {
                reason: format!("Loan term must be positive, got {t}"),
            })
        }
        Some(t) if !t.fract().is_zero() => {
            return Err(LoanCalcError::InvalidTerm {
                reason: format!("Loan term must be a whole number of months, got {t}"),
            })
        }
        Some(t) => t.to_u32().ok_or_else(|| LoanCalcError::InvalidTerm {
            reason: format!("Loan term of {t} months is out of range"),
        })?,
    };

    let rate = periodic_rate(annual_rate_percent, PERIODS_PER_YEAR);
    let representable = checked_annuity_payment(principal, rate, term_months)
        .and_then(|payment| payment.checked_mul(Decimal::from(term_months)))
        .is_some();
    if !representable {
        return Err(LoanCalcError::InvalidAmount {
            reason: format!(
                "Loan of {principal} at {annual_rate_percent}% over {term_months} months is too large to amortize"
            ),
        });
    }

    Ok(ValidationOutcome {
        principal,
        annual_rate_percent,
        term_months,
        amount_unusually_large: principal > large_loan_threshold,
    })
}
