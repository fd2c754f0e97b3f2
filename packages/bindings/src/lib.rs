use napi::Result as NapiResult;
use napi_derive::napi;

use loan_calc_core::amortization::AmortizationEngine;
use loan_calc_core::compliance::RegulatoryLimits;
use loan_calc_core::{LoanCategory, LoanInput};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Build an engine over the statutory table, or over `limits_json` merged
/// onto it when the host passes overrides. The threshold arrives as a decimal
/// string so JS numbers never round it.
fn engine(limits_json: Option<String>, large_loan_threshold: Option<String>) -> NapiResult<AmortizationEngine> {
    let threshold = large_loan_threshold
        .map(|t| Decimal::from_str(t.trim()))
        .transpose()
        .map_err(|e| to_napi_error(format!("Invalid large loan threshold: {e}")))?;
    AmortizationEngine::configured(limits_json.as_deref(), threshold).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(
    input_json: String,
    limits_json: Option<String>,
    large_loan_threshold: Option<String>,
) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine(limits_json, large_loan_threshold)?.calculate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_loan(input_json: String, large_loan_threshold: Option<String>) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let outcome = engine(None, large_loan_threshold)?
        .validate(input.principal, input.annual_rate_percent, input.term_months)
        .map_err(to_napi_error)?;
    serde_json::to_string(&outcome).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct ComplianceBindingInput {
    #[serde(alias = "annualRatePercent")]
    annual_rate_percent: Decimal,
    #[serde(default, alias = "loanCategory")]
    loan_category: LoanCategory,
}

#[napi]
pub fn check_compliance(input_json: String, limits_json: Option<String>) -> NapiResult<String> {
    let input: ComplianceBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result = engine(limits_json, None)?.check_compliance(input.annual_rate_percent, &input.loan_category);
    serde_json::to_string(&result).map_err(to_napi_error)
}

#[napi]
pub fn default_limits() -> NapiResult<String> {
    serde_json::to_string(&RegulatoryLimits::default()).map_err(to_napi_error)
}
