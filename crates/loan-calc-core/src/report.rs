use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationResult;
use crate::types::LoanRequest;

pub const REPORT_KIND: &str = "loan-analysis";

/// A calculation stamped for export or filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReport {
    pub generated_at: DateTime<Utc>,
    pub kind: String,
    pub request: LoanRequest,
    pub result: AmortizationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Wrap a finished calculation in a report. The timestamp is supplied by the
/// caller.
pub fn build_report(
    request: &LoanRequest,
    result: &AmortizationResult,
    generated_at: DateTime<Utc>,
) -> LoanReport {
    let recommendation = (!result.compliance.is_compliant).then(|| {
        format!(
            "Rate of {}% is above the {}% ceiling for {} loans. Negotiate a lower rate or consult a lawyer before signing.",
            result.compliance.supplied_rate, result.compliance.limit_applied, request.loan_category
        )
    });

    LoanReport {
        generated_at,
        kind: REPORT_KIND.to_string(),
        request: request.clone(),
        result: result.clone(),
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::AmortizationEngine;
    use crate::types::LoanCategory;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn request(rate: rust_decimal::Decimal) -> LoanRequest {
        LoanRequest {
            principal: dec!(50000),
            annual_rate_percent: rate,
            term_months: 24,
            loan_category: LoanCategory::CreditCard,
        }
    }

    #[test]
    fn test_report_for_compliant_loan() {
        let engine = AmortizationEngine::default();
        let req = request(dec!(16));
        let result = engine.compute_amortization(&req);
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();

        let report = build_report(&req, &result, at);
        assert_eq!(report.kind, "loan-analysis");
        assert_eq!(report.generated_at, at);
        assert!(report.recommendation.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("recommendation").is_none());
        assert_eq!(json["request"]["loan_category"], "credit_card");
    }

    #[test]
    fn test_report_recommends_action_when_over_ceiling() {
        let engine = AmortizationEngine::default();
        let req = request(dec!(21));
        let result = engine.compute_amortization(&req);
        let report = build_report(&req, &result, Utc::now());
        let rec = report.recommendation.unwrap();
        assert!(rec.contains("21%"));
        assert!(rec.contains("18%"));
    }
}
