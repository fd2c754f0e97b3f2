use loan_calc_core::amortization::{AmortizationEngine, PeriodEntry};
use loan_calc_core::compliance::RegulatoryLimits;
use loan_calc_core::{LoanCalcError, LoanCategory, LoanInput, LoanRequest};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference loan
// ===========================================================================

fn reference_request() -> LoanRequest {
    LoanRequest {
        principal: dec!(100000),
        annual_rate_percent: dec!(12),
        term_months: 12,
        loan_category: LoanCategory::Personal,
    }
}

fn rounded(entry: &PeriodEntry) -> PeriodEntry {
    PeriodEntry {
        period: entry.period,
        payment_amount: entry.payment_amount.round_dp(2),
        principal_portion: entry.principal_portion.round_dp(2),
        interest_portion: entry.interest_portion.round_dp(2),
        remaining_balance: entry.remaining_balance.round_dp(2),
    }
}

#[test]
fn test_reference_loan_totals() {
    let engine = AmortizationEngine::default();
    let r = engine.compute_amortization(&reference_request());

    assert_eq!(r.periodic_rate, dec!(0.01));
    assert_eq!(r.periodic_payment.round_dp(2), dec!(8884.88));
    // Payment carried at full precision: 8884.878867... * 12
    assert!((r.total_paid - dec!(106618.56)).abs() < dec!(0.02));
    assert!((r.total_interest - dec!(6618.56)).abs() < dec!(0.02));
    assert_eq!(r.total_interest, r.total_paid - r.principal);
}

#[test]
fn test_reference_loan_first_periods() {
    let engine = AmortizationEngine::default();
    let r = engine.compute_amortization(&reference_request());

    assert_eq!(
        rounded(&r.schedule[0]),
        PeriodEntry {
            period: 1,
            payment_amount: dec!(8884.88),
            principal_portion: dec!(7884.88),
            interest_portion: dec!(1000.00),
            remaining_balance: dec!(92115.12),
        }
    );
    // Period 2 interest is 1% of 92115.12
    assert_eq!(r.schedule[1].interest_portion.round_dp(2), dec!(921.15));
}

#[test]
fn test_schedule_rows_balance() {
    let engine = AmortizationEngine::default();
    let r = engine.compute_amortization(&LoanRequest {
        principal: dec!(3_500_000),
        annual_rate_percent: dec!(5.75),
        term_months: 300,
        loan_category: LoanCategory::Mortgage,
    });

    assert_eq!(r.schedule.len(), 12);
    let mut previous = r.principal;
    for row in &r.schedule {
        assert!((row.principal_portion + row.interest_portion - row.payment_amount).abs() < dec!(0.0000001));
        assert!(row.remaining_balance <= previous);
        assert!(row.remaining_balance >= Decimal::ZERO);
        previous = row.remaining_balance;
    }
}

// ===========================================================================
// Compliance
// ===========================================================================

#[test]
fn test_credit_card_over_ceiling() {
    let engine = AmortizationEngine::default();
    let c = engine.check_compliance(dec!(20), &LoanCategory::from_label("creditCard"));
    assert!(!c.is_compliant);
    assert_eq!(c.limit_applied, dec!(18));
    assert_eq!(c.supplied_rate, dec!(20));
}

#[test]
fn test_unknown_category_falls_back_to_fifteen() {
    let engine = AmortizationEngine::default();
    let c = engine.check_compliance(dec!(10), &LoanCategory::from_label("unknownCategory"));
    assert!(c.is_compliant);
    assert_eq!(c.limit_applied, dec!(15));
}

#[test]
fn test_compliance_is_attached_not_enforced() {
    let engine = AmortizationEngine::default();
    let over_ceiling = LoanRequest {
        annual_rate_percent: dec!(13),
        loan_category: LoanCategory::Mortgage,
        ..reference_request()
    };
    let r = engine.compute_amortization(&over_ceiling);
    assert!(!r.compliance.is_compliant);
    assert_eq!(r.compliance.limit_applied, dec!(12));
    assert_eq!(r.compliance.supplied_rate, dec!(13));

    // The figures are the same as for a category where 13% is lawful
    let lawful = engine.compute_amortization(&LoanRequest {
        loan_category: LoanCategory::Personal,
        ..over_ceiling.clone()
    });
    assert!(lawful.compliance.is_compliant);
    assert_eq!(r.periodic_payment, lawful.periodic_payment);
    assert_eq!(r.schedule, lawful.schedule);
    assert_eq!(r.schedule.len(), 12);
}

#[test]
fn test_rate_at_ceiling_is_compliant() {
    let engine = AmortizationEngine::default();
    let at_ceiling = LoanRequest {
        loan_category: LoanCategory::Mortgage,
        ..reference_request()
    };
    let r = engine.compute_amortization(&at_ceiling);
    assert!(r.compliance.is_compliant);
    assert_eq!(r.compliance.limit_applied, dec!(12));
}

#[test]
fn test_overridden_table_changes_verdict() {
    let limits = RegulatoryLimits::from_json(r#"{"ceilings": {"mortgage": 20}}"#).unwrap();
    let engine = AmortizationEngine::new(limits);
    let mut req = reference_request();
    req.loan_category = LoanCategory::Mortgage;
    assert!(engine.compute_amortization(&req).compliance.is_compliant);
}

// ===========================================================================
// Validation through the engine
// ===========================================================================

fn raw(p: Option<Decimal>, r: Option<Decimal>, t: Option<Decimal>) -> LoanInput {
    LoanInput {
        principal: p,
        annual_rate_percent: r,
        term_months: t,
        loan_category: LoanCategory::Personal,
    }
}

#[test]
fn test_documented_validation_failures() {
    let engine = AmortizationEngine::default();

    let err = engine.calculate(&raw(Some(dec!(0)), Some(dec!(10)), Some(dec!(12)))).unwrap_err();
    assert_eq!(err.field(), Some("principal"));

    let err = engine.calculate(&raw(Some(dec!(100000)), Some(dec!(0)), Some(dec!(12)))).unwrap_err();
    assert_eq!(err.field(), Some("annual_rate_percent"));

    let err = engine.calculate(&raw(Some(dec!(100000)), Some(dec!(10)), Some(dec!(0)))).unwrap_err();
    assert!(matches!(err, LoanCalcError::InvalidTerm { .. }));
}

#[test]
fn test_calculate_from_json_payload() {
    let engine = AmortizationEngine::default();
    let input: LoanInput = serde_json::from_str(
        r#"{"principal": "100000", "annual_rate_percent": "12", "term_months": 12, "loan_category": "creditCard"}"#,
    )
    .unwrap();
    let out = engine.calculate(&input).unwrap();

    assert_eq!(out.methodology, "Level-payment annuity amortization");
    assert_eq!(out.result.compliance.limit_applied, dec!(18));
    assert_eq!(out.assumptions["preview_periods"], 12);

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["schedule"].as_array().unwrap().len(), 12);
    assert_eq!(json["result"]["compliance"]["loan_category"], "credit_card");
}
