use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

/// Monthly payment periods per year.
pub const PERIODS_PER_YEAR: u32 = 12;

/// Convert a nominal annual percentage into the rate for one period.
pub fn periodic_rate(annual_rate_percent: Percent, periods_per_year: u32) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(periods_per_year)
}

/// Compounding factor `(1 + rate)^nper`. `None` when it leaves decimal range.
pub fn compound_factor(rate: Rate, nper: u32) -> Option<Decimal> {
    (Decimal::ONE + rate).checked_powu(u64::from(nper))
}

/// Level annuity payment that amortizes `principal` over `nper` periods.
///
/// A zero rate makes the closed form 0/0, so the principal is spread evenly
/// instead. When the compounding factor overflows, the payment is taken at
/// its limit `principal * rate`.
///
/// # Panics
///
/// Panics if `nper` is zero or the payment is outside decimal range.
/// Validated inputs never hit either case; use [`checked_annuity_payment`]
/// for anything else.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> Money {
    checked_annuity_payment(principal, rate, nper).unwrap_or_else(|| {
        panic!("annuity payment for {principal} at {rate} over {nper} periods is not representable")
    })
}

/// Level annuity payment, or `None` when `nper` is zero or the payment
/// does not fit in a `Decimal`.
///
/// The rate coefficient `r / (1 - (1 + r)^-n)` is formed before scaling by
/// the principal so that only the final product can overflow.
pub fn checked_annuity_payment(principal: Money, rate: Rate, nper: u32) -> Option<Money> {
    if nper == 0 {
        return None;
    }
    let n = Decimal::from(nper);
    if rate.is_zero() {
        return principal.checked_div(n);
    }

    let coefficient = match compound_factor(rate, nper) {
        Some(factor) if factor == Decimal::ONE => return principal.checked_div(n),
        Some(factor) => rate.checked_div(Decimal::ONE - Decimal::ONE / factor)?,
        None => rate,
    };
    principal.checked_mul(coefficient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_periodic_rate_monthly() {
        assert_eq!(periodic_rate(dec!(12), PERIODS_PER_YEAR), dec!(0.01));
        assert_eq!(periodic_rate(dec!(6), PERIODS_PER_YEAR), dec!(0.005));
    }

    #[test]
    fn test_annuity_payment_basic() {
        let pmt = annuity_payment(dec!(100000), dec!(0.01), 12);
        // 100000 * 0.01 * 1.01^12 / (1.01^12 - 1) ≈ 8884.88
        assert!((pmt - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        let pmt = annuity_payment(dec!(1200), Decimal::ZERO, 12);
        assert_eq!(pmt, dec!(100));
    }

    #[test]
    fn test_annuity_payment_single_period() {
        // One period: the whole principal plus one period of interest
        let pmt = annuity_payment(dec!(1000), dec!(0.02), 1);
        assert!((pmt - dec!(1020)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_large_principal_long_term_does_not_overflow() {
        // (1.01)^4630 is about 1e20, so scaling the principal first would
        // exceed decimal range even though the payment itself is ~1e10.
        let pmt = checked_annuity_payment(dec!(1_000_000_000_000), dec!(0.01), 4630).unwrap();
        assert!((pmt - dec!(10_000_000_000)).abs() < dec!(1));
    }

    #[test]
    fn test_checked_payment_rejects_unrepresentable() {
        assert_eq!(checked_annuity_payment(dec!(70_000_000_000_000_000_000_000_000_000), dec!(2), 12), None);
        assert_eq!(checked_annuity_payment(dec!(1000), dec!(0.01), 0), None);
    }

    #[test]
    fn test_annuity_payment_overflowing_factor() {
        let pmt = annuity_payment(dec!(1000), dec!(0.5), u32::MAX);
        assert_eq!(pmt, dec!(500));
    }
}
