use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for a credit
pub type CreditId = Uuid;

/// credit product types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditType {
    Personal,
    Business,
    CreditCard,
}

impl CreditType {
    /// prefix used in generated credit numbers
    pub fn number_prefix(&self) -> &'static str {
        match self {
            CreditType::Personal => "CRP",
            CreditType::Business => "CRB",
            CreditType::CreditCard => "CC",
        }
    }

    /// whether a customer may hold at most one active credit of this type
    pub fn is_single_active(&self) -> bool {
        matches!(self, CreditType::Personal | CreditType::CreditCard)
    }
}

impl fmt::Display for CreditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreditType::Personal => "personal credit",
            CreditType::Business => "business credit",
            CreditType::CreditCard => "credit card",
        };
        f.write_str(name)
    }
}

/// credit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    /// credit open and in good standing
    Active,
    /// payment overdue, overdue flag set
    Overdue,
    /// closed by request, terminal
    Cancelled,
    /// soft deleted
    Inactive,
    /// reserved for an approval step
    Approved,
    /// reserved for an approval step
    Rejected,
}

impl CreditStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CreditStatus::Cancelled)
    }

    /// valid source states for cancellation and soft delete
    pub fn is_open(&self) -> bool {
        matches!(self, CreditStatus::Active | CreditStatus::Overdue)
    }
}

/// customer data returned by the customer lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: String,
    pub customer_type: String,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
}

impl CustomerSummary {
    pub fn new(id: impl Into<String>, customer_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            customer_type: customer_type.into(),
            document_number: None,
            full_name: None,
            business_name: None,
        }
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document_number = Some(document.into());
        self
    }
}
