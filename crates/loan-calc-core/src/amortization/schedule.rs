use log::trace;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{annuity_payment, periodic_rate, PERIODS_PER_YEAR};
use crate::types::{Money, Percent, Rate};

/// Number of leading periods reported in the schedule preview.
pub const PREVIEW_PERIODS: u32 = 12;

/// One period of the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEntry {
    pub period: u32,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

/// Payment, totals and preview schedule for a level-payment loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub periodic_rate: Rate,
    pub periodic_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub schedule: Vec<PeriodEntry>,
}

/// Amortize `principal` over `term_months` level monthly payments.
///
/// Inputs are expected to have passed validation; nothing is re-checked here.
/// A zero rate is handled by spreading the principal evenly.
///
/// # Panics
///
/// Panics when the payment or the total paid is outside decimal range,
/// which validation rejects as an invalid amount.
pub fn amortize(principal: Money, annual_rate_percent: Percent, term_months: u32) -> PaymentPlan {
    let rate = periodic_rate(annual_rate_percent, PERIODS_PER_YEAR);
    let payment = annuity_payment(principal, rate, term_months);
    let total_paid = payment * Decimal::from(term_months);
    let total_interest = total_paid - principal;

    PaymentPlan {
        periodic_rate: rate,
        periodic_payment: payment,
        total_paid,
        total_interest,
        schedule: preview_schedule(principal, rate, payment, term_months),
    }
}

/// Build the first `min(term_months, PREVIEW_PERIODS)` schedule rows.
///
/// Reported balances are floored at zero; the running balance carried into
/// the next period is not.
pub fn preview_schedule(
    principal: Money,
    rate: Rate,
    payment: Money,
    term_months: u32,
) -> Vec<PeriodEntry> {
    let periods = term_months.min(PREVIEW_PERIODS);
    let mut schedule = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for period in 1..=periods {
        let interest = balance * rate;
        let principal_portion = payment - interest;
        balance -= principal_portion;

        trace!(
            "period {}, interest {}, principal {}, balance {}",
            period,
            interest,
            principal_portion,
            balance
        );

        schedule.push(PeriodEntry {
            period,
            payment_amount: payment,
            principal_portion,
            interest_portion: interest,
            remaining_balance: balance.max(Decimal::ZERO),
        });
    }

    schedule
}
