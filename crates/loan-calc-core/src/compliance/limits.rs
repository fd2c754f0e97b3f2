use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::LoanCalcError;
use crate::types::{LoanCategory, Percent};
use crate::LoanCalcResult;

/// Ceiling applied to any category missing from the table.
pub const DEFAULT_CEILING: Percent = dec!(15);

/// Maximum lawful annual rate per loan category.
///
/// Built once and never mutated; an engine borrows it for every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryLimits {
    #[serde(default = "default_ceiling")]
    pub default_ceiling: Percent,
    #[serde(default)]
    pub ceilings: BTreeMap<LoanCategory, Percent>,
}

fn default_ceiling() -> Percent {
    DEFAULT_CEILING
}

/// A partial ceiling table as read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ceiling: Option<Percent>,
    #[serde(default)]
    pub ceilings: BTreeMap<LoanCategory, Percent>,
}

impl Default for RegulatoryLimits {
    fn default() -> Self {
        let ceilings = BTreeMap::from([
            (LoanCategory::Personal, dec!(15)),
            (LoanCategory::Commercial, dec!(15)),
            // Credit cards carry a statutory exception above the general ceiling
            (LoanCategory::CreditCard, dec!(18)),
            (LoanCategory::Mortgage, dec!(12)),
        ]);
        Self {
            default_ceiling: DEFAULT_CEILING,
            ceilings,
        }
    }
}

impl RegulatoryLimits {
    /// Build a table from explicit ceilings, rejecting non-positive values.
    pub fn new(
        default_ceiling: Percent,
        ceilings: BTreeMap<LoanCategory, Percent>,
    ) -> LoanCalcResult<Self> {
        let limits = Self {
            default_ceiling,
            ceilings,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Parse an override table from JSON and merge it over the defaults.
    pub fn from_json(json: &str) -> LoanCalcResult<Self> {
        let overrides: LimitsOverride = serde_json::from_str(json)?;
        Self::default().merged_with(overrides)
    }

    /// Apply `overrides` on top of this table. Categories present in the
    /// override replace ours; everything else is inherited.
    pub fn merged_with(&self, overrides: LimitsOverride) -> LoanCalcResult<Self> {
        let mut ceilings = self.ceilings.clone();
        ceilings.extend(overrides.ceilings);
        Self::new(
            overrides.default_ceiling.unwrap_or(self.default_ceiling),
            ceilings,
        )
    }

    /// The lawful ceiling for `category`, falling back to the default.
    pub fn ceiling_for(&self, category: &LoanCategory) -> Percent {
        self.ceilings
            .get(category)
            .copied()
            .unwrap_or(self.default_ceiling)
    }

    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.default_ceiling <= Decimal::ZERO {
            return Err(LoanCalcError::InvalidConfig(format!(
                "default_ceiling must be positive, got {}",
                self.default_ceiling
            )));
        }
        if let Some((category, ceiling)) = self.ceilings.iter().find(|(_, c)| **c <= Decimal::ZERO) {
            return Err(LoanCalcError::InvalidConfig(format!(
                "ceiling for '{category}' must be positive, got {ceiling}"
            )));
        }
        Ok(())
    }
}
