use serde::{Deserialize, Serialize};

use super::limits::RegulatoryLimits;
use crate::types::{LoanCategory, Percent};

/// Outcome of testing a rate against the statutory ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub is_compliant: bool,
    pub limit_applied: Percent,
    pub supplied_rate: Percent,
    pub loan_category: LoanCategory,
    pub message: String,
}

impl ComplianceResult {
    /// Percentage points above the ceiling; zero when compliant.
    pub fn excess(&self) -> Percent {
        (self.supplied_rate - self.limit_applied).max(Percent::ZERO)
    }
}

/// Test `annual_rate_percent` against the ceiling for `category`.
///
/// Total: an unknown category gets the table's default ceiling. The result
/// is advisory and never stops a calculation.
pub fn check_compliance(
    limits: &RegulatoryLimits,
    annual_rate_percent: Percent,
    category: &LoanCategory,
) -> ComplianceResult {
    let limit_applied = limits.ceiling_for(category);
    let is_compliant = annual_rate_percent <= limit_applied;

    let message = if is_compliant {
        "Interest rate is within the legal limit".to_string()
    } else {
        format!("Interest rate exceeds the legal limit ({limit_applied}% per year)")
    };

    ComplianceResult {
        is_compliant,
        limit_applied,
        supplied_rate: annual_rate_percent,
        loan_category: category.clone(),
        message,
    }
}
