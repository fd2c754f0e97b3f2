pub mod ceiling;
pub mod limits;

pub use ceiling::{check_compliance, ComplianceResult};
pub use limits::{LimitsOverride, RegulatoryLimits, DEFAULT_CEILING};
