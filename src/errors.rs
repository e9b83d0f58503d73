use thiserror::Error;

use crate::decimal::Money;
use crate::types::{CreditId, CreditType};

/// failures raised by a credit repository
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
    },

    #[error("storage error: {message}")]
    Storage {
        message: String,
    },
}

/// failures raised by a customer lookup, distinct from "not found"
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("customer service timed out after {timeout_ms}ms")]
    Timeout {
        timeout_ms: u64,
    },

    #[error("customer service rejected the request with status {status}")]
    ClientError {
        status: u16,
    },

    #[error("customer service unavailable, status {status}")]
    ServerError {
        status: u16,
    },

    #[error("customer service transport error: {0}")]
    Transport(String),

    #[error("customer service returned an error: {0}")]
    Envelope(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreditError {
    #[error("Customer not found with document: {document}")]
    CustomerNotFound {
        document: String,
    },

    #[error("Error consulting customer service: {source}")]
    CustomerServiceUnavailable {
        #[source]
        source: LookupError,
    },

    #[error("Customer has overdue debts. Cannot acquire new credit.")]
    OverdueDebt {
        document: String,
    },

    #[error("Customer already has an active {credit_type}. Only one allowed.")]
    DuplicateCredit {
        credit_type: CreditType,
    },

    #[error("Credit not found with ID: {id}")]
    CreditNotFound {
        id: CreditId,
    },

    #[error("Cannot delete credit with pending debt: {debt}")]
    CreditHasDebt {
        debt: Money,
    },

    #[error("{message}")]
    BusinessRule {
        message: String,
    },

    #[error("Insufficient available credit: available {available}, requested {requested}")]
    InsufficientCredit {
        available: Money,
        requested: Money,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("{message}")]
    Unexpected {
        message: String,
    },
}

impl CreditError {
    pub(crate) fn business_rule(message: impl Into<String>) -> Self {
        CreditError::BusinessRule {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        CreditError::InvalidRequest {
            message: message.into(),
        }
    }

    /// transport status for this error when raised outside an operation-specific mapping
    pub fn status_code(&self) -> u16 {
        match self {
            CreditError::CustomerNotFound { .. } | CreditError::CreditNotFound { .. } => 404,
            CreditError::OverdueDebt { .. }
            | CreditError::CreditHasDebt { .. }
            | CreditError::BusinessRule { .. }
            | CreditError::InsufficientCredit { .. }
            | CreditError::InvalidRequest { .. } => 400,
            CreditError::DuplicateCredit { .. } => 409,
            CreditError::CustomerServiceUnavailable { .. } => 503,
            CreditError::Repository(_)
            | CreditError::InvalidConfiguration { .. }
            | CreditError::Unexpected { .. } => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, CreditError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_messages_carry_detail() {
        let err = CreditError::DuplicateCredit {
            credit_type: CreditType::Personal,
        };
        assert_eq!(
            err.to_string(),
            "Customer already has an active personal credit. Only one allowed."
        );

        let err = CreditError::CustomerServiceUnavailable {
            source: LookupError::Timeout { timeout_ms: 2000 },
        };
        assert!(err.to_string().contains("timed out after 2000ms"));
    }

    #[test]
    fn test_status_codes() {
        let id = Uuid::new_v4();
        assert_eq!(CreditError::CreditNotFound { id }.status_code(), 404);
        assert_eq!(CreditError::business_rule("nope").status_code(), 400);
        assert_eq!(
            CreditError::Repository(RepositoryError::Storage {
                message: "disk".to_string()
            })
            .status_code(),
            500
        );
    }
}
