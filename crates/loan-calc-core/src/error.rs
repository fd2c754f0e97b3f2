use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoanCalcError {
    #[error("Invalid principal: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid annual_rate_percent: {reason}")]
    InvalidRate { reason: String },

    #[error("Invalid term_months: {reason}")]
    InvalidTerm { reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanCalcError {
    /// Name of the input field a validation error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            LoanCalcError::InvalidAmount { .. } => Some("principal"),
            LoanCalcError::InvalidRate { .. } => Some("annual_rate_percent"),
            LoanCalcError::InvalidTerm { .. } => Some("term_months"),
            LoanCalcError::InvalidConfig(_) | LoanCalcError::SerializationError(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.field().is_some()
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}
