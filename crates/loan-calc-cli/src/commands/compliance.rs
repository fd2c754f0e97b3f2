use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::amortization::AmortizationEngine;
use loan_calc_core::LoanCategory;

/// Arguments for a statutory ceiling check
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ComplianceArgs {
    /// Nominal annual interest rate in percent
    #[arg(long, alias = "annual-rate-percent")]
    pub rate: Decimal,

    /// Loan category: personal, commercial, credit_card, mortgage
    #[arg(long, alias = "loan-category", default_value = "personal")]
    pub category: String,
}

pub fn run_compliance(
    engine: &AmortizationEngine,
    args: ComplianceArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let category = LoanCategory::from_label(&args.category);
    let result = engine.check_compliance(args.rate, &category);
    Ok(serde_json::to_value(result)?)
}

pub fn run_limits(engine: &AmortizationEngine) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(engine.limits())?)
}
