use serde::{Deserialize, Serialize};

use crate::config::RequestLimits;
use crate::decimal::{Money, Rate};
use crate::errors::{CreditError, Result};
use crate::types::{CreditId, CreditType};

/// request to open or re-term a credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRequest {
    pub customer_document: String,
    pub credit_type: CreditType,
    pub credit_limit: Money,
    pub interest_rate: Rate,
    pub term_months: u32,
}

impl CreditRequest {
    /// check field constraints against the configured limits
    pub fn validate(&self, limits: &RequestLimits) -> Result<()> {
        if self.customer_document.trim().is_empty() {
            return Err(CreditError::invalid_request("Customer document is required"));
        }
        self.validate_terms(limits)?;
        if self.credit_limit < limits.minimum_credit_limit {
            return Err(CreditError::invalid_request(format!(
                "Credit limit must be at least {}",
                limits.minimum_credit_limit
            )));
        }
        Ok(())
    }

    /// rate and term constraints, the only fields an update applies
    pub fn validate_terms(&self, limits: &RequestLimits) -> Result<()> {
        if self.interest_rate < Rate::ZERO || self.interest_rate > limits.maximum_interest_rate {
            return Err(CreditError::invalid_request(format!(
                "Interest rate must be between 0 and {}",
                limits.maximum_interest_rate.as_decimal()
            )));
        }
        if self.term_months < limits.minimum_term_months
            || self.term_months > limits.maximum_term_months
        {
            return Err(CreditError::invalid_request(format!(
                "Term must be between {} and {} months",
                limits.minimum_term_months, limits.maximum_term_months
            )));
        }
        Ok(())
    }
}

/// request to draw funds against a credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisbursementRequest {
    pub credit_id: CreditId,
    pub amount: Money,
}

impl DisbursementRequest {
    pub fn validate(&self, limits: &RequestLimits) -> Result<()> {
        if self.amount < limits.minimum_disbursement {
            return Err(CreditError::invalid_request(format!(
                "Disbursement amount must be at least {}",
                limits.minimum_disbursement
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn valid() -> CreditRequest {
        CreditRequest {
            customer_document: "45678912".to_string(),
            credit_type: CreditType::Business,
            credit_limit: Money::from_major(50_000),
            interest_rate: Rate::from_percentage(15),
            term_months: 48,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid().validate(&RequestLimits::default()).is_ok());
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let limits = RequestLimits::default();
        let mut request = valid();

        request.credit_limit = Money::CENT;
        request.interest_rate = Rate::ONE;
        request.term_months = 360;
        assert!(request.validate(&limits).is_ok());

        request.interest_rate = Rate::ZERO;
        request.term_months = 1;
        assert!(request.validate(&limits).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        let limits = RequestLimits::default();

        let mut request = valid();
        request.customer_document = "   ".to_string();
        assert!(matches!(request.validate(&limits), Err(CreditError::InvalidRequest { .. })));

        let mut request = valid();
        request.credit_limit = Money::ZERO;
        assert!(matches!(request.validate(&limits), Err(CreditError::InvalidRequest { .. })));

        let mut request = valid();
        request.interest_rate = Rate::from_decimal(dec!(1.01));
        assert!(matches!(request.validate(&limits), Err(CreditError::InvalidRequest { .. })));

        let mut request = valid();
        request.interest_rate = Rate::from_decimal(dec!(-0.01));
        assert!(matches!(request.validate(&limits), Err(CreditError::InvalidRequest { .. })));

        let mut request = valid();
        request.term_months = 0;
        assert!(matches!(request.validate(&limits), Err(CreditError::InvalidRequest { .. })));

        let mut request = valid();
        request.term_months = 361;
        assert!(matches!(request.validate(&limits), Err(CreditError::InvalidRequest { .. })));
    }

    #[test]
    fn test_disbursement_amount_must_be_positive() {
        let limits = RequestLimits::default();
        let mut request = DisbursementRequest {
            credit_id: Uuid::new_v4(),
            amount: Money::CENT,
        };
        assert!(request.validate(&limits).is_ok());

        request.amount = Money::ZERO;
        assert!(matches!(request.validate(&limits), Err(CreditError::InvalidRequest { .. })));

        request.amount = Money::from_decimal(dec!(-5));
        assert!(request.validate(&limits).is_err());
    }
}
