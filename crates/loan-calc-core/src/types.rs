use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual rates expressed in percent (12 = 12% p.a.), as entered by a borrower.
pub type Percent = Decimal;

/// Per-period rates expressed as decimals (0.01 = 1% per month).
pub type Rate = Decimal;

/// Loan category used to select the statutory rate ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanCategory {
    #[default]
    Personal,
    Commercial,
    CreditCard,
    Mortgage,
    Other(String),
}

impl LoanCategory {
    pub const KNOWN: [LoanCategory; 4] = [
        LoanCategory::Personal,
        LoanCategory::Commercial,
        LoanCategory::CreditCard,
        LoanCategory::Mortgage,
    ];

    /// Parse a host-supplied label. Unrecognised labels are kept verbatim.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "personal" => LoanCategory::Personal,
            "commercial" => LoanCategory::Commercial,
            "credit_card" | "creditCard" | "credit-card" => LoanCategory::CreditCard,
            "mortgage" => LoanCategory::Mortgage,
            other => LoanCategory::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LoanCategory::Personal => "personal",
            LoanCategory::Commercial => "commercial",
            LoanCategory::CreditCard => "credit_card",
            LoanCategory::Mortgage => "mortgage",
            LoanCategory::Other(label) => label,
        }
    }
}

impl fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for LoanCategory {
    fn from(label: String) -> Self {
        LoanCategory::from_label(&label)
    }
}

impl From<&str> for LoanCategory {
    fn from(label: &str) -> Self {
        LoanCategory::from_label(label)
    }
}

impl From<LoanCategory> for String {
    fn from(category: LoanCategory) -> Self {
        category.label().to_string()
    }
}

/// Loan parameters as received from a host, before validation.
///
/// Numeric fields are optional so that a missing value can be reported
/// against the field it belongs to. The term is a decimal so that
/// fractional month counts are rejected rather than truncated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(default)]
    pub principal: Option<Money>,
    #[serde(default, alias = "annualRatePercent")]
    pub annual_rate_percent: Option<Percent>,
    #[serde(default, alias = "termMonths")]
    pub term_months: Option<Decimal>,
    #[serde(default, alias = "loanCategory")]
    pub loan_category: LoanCategory,
}

/// Validated loan parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    pub loan_category: LoanCategory,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(LoanCategory::from_label("creditCard"), LoanCategory::CreditCard);
        assert_eq!(LoanCategory::from_label("credit_card"), LoanCategory::CreditCard);
        assert_eq!(LoanCategory::from_label("mortgage"), LoanCategory::Mortgage);
        assert_eq!(
            LoanCategory::from_label("payday"),
            LoanCategory::Other("payday".into())
        );
        assert_eq!(LoanCategory::CreditCard.to_string(), "credit_card");
    }

    #[test]
    fn test_category_defaults_to_personal_when_absent() {
        let input: LoanInput =
            serde_json::from_str(r#"{"principal": "1000", "annual_rate_percent": "10", "term_months": 12}"#)
                .unwrap();
        assert_eq!(input.loan_category, LoanCategory::Personal);
    }

    #[test]
    fn test_loan_input_accepts_camel_case() {
        let input: LoanInput = serde_json::from_str(
            r#"{"principal": 5000, "annualRatePercent": 18.5, "termMonths": 24, "loanCategory": "creditCard"}"#,
        )
        .unwrap();
        assert_eq!(input.loan_category, LoanCategory::CreditCard);
        assert_eq!(input.term_months, Some(Decimal::from(24)));
    }
}
