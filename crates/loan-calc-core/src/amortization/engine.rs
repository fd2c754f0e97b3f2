use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{amortize, PeriodEntry, PREVIEW_PERIODS};
use super::validation::{validate, ValidationOutcome, DEFAULT_LARGE_LOAN_THRESHOLD};
use crate::compliance::{check_compliance, ComplianceResult, RegulatoryLimits};
use crate::types::*;
use crate::{LoanCalcError, LoanCalcResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub principal: Money,
    pub periodic_rate: Rate,
    pub periodic_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    pub schedule: Vec<PeriodEntry>,
    pub compliance: ComplianceResult,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless loan calculator bound to a ceiling table.
///
/// Holds only read-only configuration, so one engine can serve any number
/// of callers concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationEngine {
    limits: RegulatoryLimits,
    large_loan_threshold: Money,
}

impl Default for AmortizationEngine {
    fn default() -> Self {
        Self::new(RegulatoryLimits::default())
    }
}

impl AmortizationEngine {
    pub fn new(limits: RegulatoryLimits) -> Self {
        Self {
            limits,
            large_loan_threshold: DEFAULT_LARGE_LOAN_THRESHOLD,
        }
    }

    /// Build an engine from optional host-supplied settings: a JSON ceiling
    /// override merged over the statutory table, and a large-loan threshold.
    pub fn configured(limits_json: Option<&str>, large_loan_threshold: Option<Money>) -> LoanCalcResult<Self> {
        let limits = match limits_json {
            Some(json) => RegulatoryLimits::from_json(json)?,
            None => RegulatoryLimits::default(),
        };
        let engine = Self::new(limits);
        match large_loan_threshold {
            Some(t) if t <= rust_decimal::Decimal::ZERO => Err(LoanCalcError::InvalidConfig(format!(
                "large loan threshold must be positive, got {t}"
            ))),
            Some(t) => Ok(engine.with_large_loan_threshold(t)),
            None => Ok(engine),
        }
    }

    pub fn with_large_loan_threshold(mut self, threshold: Money) -> Self {
        self.large_loan_threshold = threshold;
        self
    }

    pub fn limits(&self) -> &RegulatoryLimits {
        &self.limits
    }

    pub fn large_loan_threshold(&self) -> Money {
        self.large_loan_threshold
    }

    pub fn validate(
        &self,
        principal: Option<Money>,
        annual_rate_percent: Option<Percent>,
        term_months: Option<rust_decimal::Decimal>,
    ) -> LoanCalcResult<ValidationOutcome> {
        validate(principal, annual_rate_percent, term_months, self.large_loan_threshold)
    }

    pub fn check_compliance(&self, annual_rate_percent: Percent, category: &LoanCategory) -> ComplianceResult {
        check_compliance(&self.limits, annual_rate_percent, category)
    }

    /// Compute payment, totals and preview schedule for a validated request.
    ///
    /// The request is assumed valid; call [`AmortizationEngine::validate`]
    /// (or use [`AmortizationEngine::calculate`]) first. A rate above the
    /// ceiling still produces a full result with `compliance` flagged.
    pub fn compute_amortization(&self, request: &LoanRequest) -> AmortizationResult {
        let plan = amortize(request.principal, request.annual_rate_percent, request.term_months);
        let compliance = self.check_compliance(request.annual_rate_percent, &request.loan_category);

        AmortizationResult {
            principal: request.principal,
            periodic_rate: plan.periodic_rate,
            periodic_payment: plan.periodic_payment,
            total_paid: plan.total_paid,
            total_interest: plan.total_interest,
            annual_rate_percent: request.annual_rate_percent,
            term_months: request.term_months,
            schedule: plan.schedule,
            compliance,
        }
    }

    /// Validate raw input, then compute. Returns the validation error and no
    /// partial result when any field is invalid.
    pub fn calculate(&self, input: &LoanInput) -> LoanCalcResult<ComputationOutput<AmortizationResult>> {
        let start = Instant::now();
        let mut warnings: Vec<String> = Vec::new();

        let outcome = self.validate(input.principal, input.annual_rate_percent, input.term_months)?;
        let request = LoanRequest {
            principal: outcome.principal,
            annual_rate_percent: outcome.annual_rate_percent,
            term_months: outcome.term_months,
            loan_category: input.loan_category.clone(),
        };
        debug!(
            "amortizing {} at {}% over {} months ({})",
            request.principal, request.annual_rate_percent, request.term_months, request.loan_category
        );

        if outcome.amount_unusually_large {
            warnings.push(format!(
                "Loan amount {} exceeds {}; please double-check the principal",
                request.principal, self.large_loan_threshold
            ));
        }

        let result = self.compute_amortization(&request);
        if !result.compliance.is_compliant {
            warnings.push(format!(
                "{}: supplied {}% for {} loans",
                result.compliance.message, result.compliance.supplied_rate, request.loan_category
            ));
        }
        debug!(
            "payment {}, total interest {}, compliant {}",
            result.periodic_payment, result.total_interest, result.compliance.is_compliant
        );

        let elapsed = start.elapsed().as_micros() as u64;
        let assumptions = serde_json::json!({
            "loan_category": request.loan_category,
            "periods_per_year": crate::time_value::PERIODS_PER_YEAR,
            "preview_periods": PREVIEW_PERIODS,
            "ceiling": result.compliance.limit_applied.to_string(),
            "large_loan_threshold": self.large_loan_threshold.to_string(),
        });

        Ok(with_metadata(
            "Level-payment annuity amortization",
            &assumptions,
            warnings,
            elapsed,
            result,
        ))
    }
}
