use clap::Args;
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fs;

use loan_calc_core::amortization::AmortizationEngine;
use loan_calc_core::report;
use loan_calc_core::{LoanCategory, LoanInput, LoanRequest};

use crate::input;

/// Loan parameters shared by amortize, validate and report
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate in percent (12 = 12% p.a.)
    #[arg(long, alias = "annual-rate-percent")]
    pub rate: Option<Decimal>,

    /// Term in whole months
    #[arg(long, alias = "term-months")]
    pub term: Option<Decimal>,

    /// Loan category: personal, commercial, credit_card, mortgage
    #[arg(long, alias = "loan-category")]
    pub category: Option<String>,
}

/// Arguments for report generation
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

impl LoanArgs {
    fn has_flags(&self) -> bool {
        self.principal.is_some()
            || self.rate.is_some()
            || self.term.is_some()
            || self.category.is_some()
    }

    /// Resolve the loan input from a file, the flags, or piped stdin, in that order.
    fn into_loan_input(self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if self.has_flags() {
            return Ok(LoanInput {
                principal: self.principal,
                annual_rate_percent: self.rate,
                term_months: self.term,
                loan_category: self
                    .category
                    .as_deref()
                    .map(LoanCategory::from_label)
                    .unwrap_or_default(),
            });
        }
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(data);
        }
        Err("--principal, --rate and --term are required (or provide --input)".into())
    }
}

pub fn run_amortize(
    engine: &AmortizationEngine,
    args: LoanArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = args.into_loan_input()?;
    let result = engine.calculate(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(
    engine: &AmortizationEngine,
    args: LoanArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = args.into_loan_input()?;
    let outcome = engine.validate(
        loan_input.principal,
        loan_input.annual_rate_percent,
        loan_input.term_months,
    )?;
    Ok(serde_json::to_value(outcome)?)
}

pub fn run_report(
    engine: &AmortizationEngine,
    args: ReportArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = args.loan.into_loan_input()?;
    let output = engine.calculate(&loan_input)?;
    let request = LoanRequest {
        principal: output.result.principal,
        annual_rate_percent: output.result.annual_rate_percent,
        term_months: output.result.term_months,
        loan_category: loan_input.loan_category,
    };

    let loan_report = report::build_report(&request, &output.result, chrono::Utc::now());
    let value = serde_json::to_value(&loan_report)?;

    match args.out {
        Some(path) => {
            fs::write(&path, serde_json::to_string_pretty(&value)?)
                .map_err(|e| format!("Failed to write '{}': {}", path, e))?;
            info!("report written to {}", path);
            Ok(serde_json::json!({
                "written": path,
                "generated_at": loan_report.generated_at,
                "kind": loan_report.kind,
            }))
        }
        None => Ok(value),
    }
}
