use serde::{Deserialize, Serialize};

use crate::config::ErrorMapping;
use crate::credit::Credit;
use crate::errors::CreditError;
use crate::types::CreditId;

/// outcome of a mutating operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditResponse {
    pub code: u16,
    pub message: String,
    pub entity_id: Option<CreditId>,
}

impl CreditResponse {
    pub fn success(code: u16, message: impl Into<String>, entity_id: CreditId) -> Self {
        Self {
            code,
            message: message.into(),
            entity_id: Some(entity_id),
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            entity_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// outcome of a list operation: records, an empty annotation, or a failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CreditListing {
    Found { records: Vec<Credit> },
    NoneFound { message: String },
    Failed { message: String },
}

impl CreditListing {
    /// records for a successful listing, empty otherwise
    pub fn records(&self) -> &[Credit] {
        match self {
            CreditListing::Found { records } => records,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            CreditListing::Found { .. } => None,
            CreditListing::NoneFound { message } | CreditListing::Failed { message } => Some(message),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CreditListing::Failed { .. })
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// engine operations with their own failure mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Cancel,
    MarkOverdue,
    Delete,
    Disburse,
}

impl Operation {
    /// code and message reported when this operation fails with `err`
    pub fn failure(&self, err: &CreditError, mapping: ErrorMapping) -> CreditResponse {
        use CreditError::*;

        match self {
            Operation::Create => match err {
                CustomerNotFound { .. } => CreditResponse::error(404, err.to_string()),
                OverdueDebt { .. } | InvalidRequest { .. } => CreditResponse::error(400, err.to_string()),
                DuplicateCredit { .. } => CreditResponse::error(409, err.to_string()),
                _ => CreditResponse::error(500, format!("Error creating credit: {}", err)),
            },
            Operation::Delete => match err {
                CreditNotFound { .. } => CreditResponse::error(404, err.to_string()),
                CreditHasDebt { .. } | BusinessRule { .. } => CreditResponse::error(400, err.to_string()),
                _ => CreditResponse::error(500, format!("Error deleting credit: {}", err)),
            },
            Operation::Disburse => match err {
                CreditNotFound { .. } => CreditResponse::error(404, err.to_string()),
                InsufficientCredit { .. } | InvalidRequest { .. } => {
                    CreditResponse::error(400, err.to_string())
                }
                _ => CreditResponse::error(500, format!("Error processing disbursement: {}", err)),
            },
            Operation::Update | Operation::Cancel | Operation::MarkOverdue => match mapping {
                ErrorMapping::Legacy => CreditResponse::error(500, err.to_string()),
                ErrorMapping::Unified => match err {
                    CreditNotFound { .. } => CreditResponse::error(404, err.to_string()),
                    BusinessRule { .. } | InvalidRequest { .. } => {
                        CreditResponse::error(400, err.to_string())
                    }
                    _ => CreditResponse::error(500, err.to_string()),
                },
            },
        }
    }
}
