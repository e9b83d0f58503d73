use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::credit::Credit;
use crate::customer::CustomerLookup;
use crate::errors::{CreditError, Result};
use crate::repository::CreditRepository;
use crate::requests::CreditRequest;
use crate::types::{CreditId, CreditStatus, CustomerSummary};

/// business-rule checks run ahead of credit creation and deletion
///
/// Each pipeline is fail-fast: the first failing step decides the error and
/// later steps never run, so a missing customer outranks overdue debt, which
/// outranks a duplicate credit.
pub struct CreditValidator {
    customers: Arc<dyn CustomerLookup>,
    credits: Arc<dyn CreditRepository>,
}

impl CreditValidator {
    pub fn new(customers: Arc<dyn CustomerLookup>, credits: Arc<dyn CreditRepository>) -> Self {
        Self { customers, credits }
    }

    /// customer exists, has no overdue debt, and holds no conflicting active credit
    pub async fn validate_credit_creation<'r>(&self, request: &'r CreditRequest) -> Result<&'r CreditRequest> {
        debug!(credit_type = ?request.credit_type, "validating business rules for credit creation");

        let outcome = async {
            self.validate_customer_exists(request).await?;
            self.validate_no_overdue_debts(request).await?;
            self.validate_credit_type_restrictions(request).await
        }
        .await;

        match &outcome {
            Ok(()) => info!(document = %request.customer_document, "all business rules validated"),
            Err(e) => error!(document = %request.customer_document, error = %e, "business rules validation failed"),
        }

        outcome.map(|_| request)
    }

    pub async fn validate_customer_exists(&self, request: &CreditRequest) -> Result<CustomerSummary> {
        let document = request.customer_document.as_str();
        debug!(document, "validating customer exists");

        match self.customers.get_customer_by_document(document).await {
            Ok(Some(customer)) => {
                info!(document, customer_id = %customer.id, "customer found");
                Ok(customer)
            }
            Ok(None) => Err(CreditError::CustomerNotFound {
                document: document.to_string(),
            }),
            Err(source) => {
                error!(document, error = %source, "error consulting customer service");
                Err(CreditError::CustomerServiceUnavailable { source })
            }
        }
    }

    pub async fn validate_no_overdue_debts(&self, request: &CreditRequest) -> Result<()> {
        let document = request.customer_document.as_str();
        debug!(document, "validating no overdue debts");

        let credits = self.credits.find_by_customer_document(document).await?;
        if credits.iter().any(|c| c.has_overdue_debt) {
            warn!(document, "customer has overdue debts");
            return Err(CreditError::OverdueDebt {
                document: document.to_string(),
            });
        }

        Ok(())
    }

    /// one active personal credit and one active credit card per customer
    pub async fn validate_credit_type_restrictions(&self, request: &CreditRequest) -> Result<()> {
        let credit_type = request.credit_type;
        if !credit_type.is_single_active() {
            debug!(?credit_type, "no restrictions for credit type");
            return Ok(());
        }

        let document = request.customer_document.as_str();
        let credits = self.credits.find_by_customer_document(document).await?;
        let duplicate = credits
            .iter()
            .any(|c| c.credit_type == credit_type && c.status == CreditStatus::Active);

        if duplicate {
            warn!(document, ?credit_type, "customer already holds an active credit of this type");
            return Err(CreditError::DuplicateCredit { credit_type });
        }

        Ok(())
    }

    /// credit exists and carries no debt
    pub async fn validate_credit_deletion(&self, id: CreditId) -> Result<Credit> {
        let credit = self.validate_credit_exists(id).await?;
        Self::validate_credit_can_be_deleted(credit)
    }

    pub async fn validate_credit_exists(&self, id: CreditId) -> Result<Credit> {
        debug!(%id, "validating credit exists");

        self.credits
            .find_by_id(id)
            .await?
            .ok_or(CreditError::CreditNotFound { id })
    }

    pub fn validate_credit_can_be_deleted(credit: Credit) -> Result<Credit> {
        if credit.has_debt() {
            warn!(id = %credit.id, debt = %credit.current_debt, "credit has pending debt");
            return Err(CreditError::CreditHasDebt {
                debt: credit.current_debt,
            });
        }

        debug!(id = %credit.id, "credit can be deleted");
        Ok(credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCreditRepository, StaticCustomerDirectory};
    use crate::decimal::{Money, Rate};
    use crate::errors::LookupError;
    use crate::types::CreditType;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    const DOC: &str = "12345678";

    struct UnavailableLookup;

    #[async_trait]
    impl CustomerLookup for UnavailableLookup {
        async fn get_customer_by_document(&self, _: &str) -> std::result::Result<Option<CustomerSummary>, LookupError> {
            Err(LookupError::ServerError { status: 503 })
        }
    }

    /// counts repository reads to prove short-circuiting
    struct CountingRepository {
        inner: InMemoryCreditRepository,
        reads: AtomicUsize,
    }

    #[async_trait]
    impl CreditRepository for CountingRepository {
        async fn find_all(&self) -> std::result::Result<Vec<Credit>, crate::errors::RepositoryError> {
            self.inner.find_all().await
        }

        async fn save(&self, credit: Credit) -> std::result::Result<Credit, crate::errors::RepositoryError> {
            self.inner.save(credit).await
        }

        async fn delete_by_id(&self, id: CreditId) -> std::result::Result<(), crate::errors::RepositoryError> {
            self.inner.delete_by_id(id).await
        }

        async fn find_by_customer_document(&self, document: &str) -> std::result::Result<Vec<Credit>, crate::errors::RepositoryError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_customer_document(document).await
        }

        async fn find_by_id(&self, id: CreditId) -> std::result::Result<Option<Credit>, crate::errors::RepositoryError> {
            self.inner.find_by_id(id).await
        }
    }

    fn request(credit_type: CreditType) -> CreditRequest {
        CreditRequest {
            customer_document: DOC.to_string(),
            credit_type,
            credit_limit: Money::from_major(5_000),
            interest_rate: Rate::from_percentage(20),
            term_months: 24,
        }
    }

    fn existing(credit_type: CreditType) -> Credit {
        Credit::open(&request(credit_type), Utc::now()).unwrap()
    }

    fn directory() -> Arc<dyn CustomerLookup> {
        Arc::new(StaticCustomerDirectory::new().with_customer(DOC, CustomerSummary::new("c-1", "PERSONAL")))
    }

    fn validator(credits: Vec<Credit>) -> CreditValidator {
        CreditValidator::new(directory(), Arc::new(InMemoryCreditRepository::with_credits(credits)))
    }

    #[tokio::test]
    async fn test_clean_customer_passes_and_request_is_returned() {
        let v = validator(vec![]);
        let req = request(CreditType::Personal);
        let validated = v.validate_credit_creation(&req).await.unwrap();
        assert_eq!(validated, &req);
    }

    #[tokio::test]
    async fn test_unknown_customer() {
        let v = CreditValidator::new(
            Arc::new(StaticCustomerDirectory::new()),
            Arc::new(InMemoryCreditRepository::new()),
        );
        let err = v.validate_credit_creation(&request(CreditType::Business)).await.unwrap_err();
        assert!(matches!(err, CreditError::CustomerNotFound { .. }));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_not_found() {
        let v = CreditValidator::new(Arc::new(UnavailableLookup), Arc::new(InMemoryCreditRepository::new()));
        let err = v.validate_credit_creation(&request(CreditType::Business)).await.unwrap_err();
        assert_eq!(
            err,
            CreditError::CustomerServiceUnavailable {
                source: LookupError::ServerError { status: 503 }
            }
        );
    }

    #[tokio::test]
    async fn test_missing_customer_short_circuits_repository_checks() {
        let repo = Arc::new(CountingRepository {
            inner: InMemoryCreditRepository::new(),
            reads: AtomicUsize::new(0),
        });
        let v = CreditValidator::new(Arc::new(StaticCustomerDirectory::new()), repo.clone());

        let _ = v.validate_credit_creation(&request(CreditType::Personal)).await;
        assert_eq!(repo.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overdue_debt_outranks_duplicate() {
        let mut overdue = existing(CreditType::Business);
        overdue.mark_overdue(Utc::now());
        let active_personal = existing(CreditType::Personal);

        let v = validator(vec![overdue, active_personal]);
        let err = v.validate_credit_creation(&request(CreditType::Personal)).await.unwrap_err();
        assert!(matches!(err, CreditError::OverdueDebt { .. }));
    }

    #[tokio::test]
    async fn test_second_active_personal_is_duplicate() {
        let v = validator(vec![existing(CreditType::Personal)]);
        let err = v.validate_credit_creation(&request(CreditType::Personal)).await.unwrap_err();
        assert_eq!(err, CreditError::DuplicateCredit { credit_type: CreditType::Personal });
    }

    #[tokio::test]
    async fn test_second_active_card_is_duplicate() {
        let v = validator(vec![existing(CreditType::CreditCard)]);
        let err = v.validate_credit_creation(&request(CreditType::CreditCard)).await.unwrap_err();
        assert_eq!(err, CreditError::DuplicateCredit { credit_type: CreditType::CreditCard });
    }

    #[tokio::test]
    async fn test_business_credits_are_unrestricted() {
        let v = validator(vec![existing(CreditType::Business), existing(CreditType::Business)]);
        assert!(v.validate_credit_creation(&request(CreditType::Business)).await.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_personal_does_not_block_new_one() {
        let mut cancelled = existing(CreditType::Personal);
        cancelled.cancel(Utc::now()).unwrap();
        let mut deleted = existing(CreditType::Personal);
        deleted.deactivate(Utc::now()).unwrap();

        let v = validator(vec![cancelled, deleted]);
        assert!(v.validate_credit_creation(&request(CreditType::Personal)).await.is_ok());
    }

    #[tokio::test]
    async fn test_other_types_do_not_conflict() {
        let v = validator(vec![existing(CreditType::CreditCard)]);
        assert!(v.validate_credit_creation(&request(CreditType::Personal)).await.is_ok());
    }

    #[tokio::test]
    async fn test_deletion_checks() {
        let clean = existing(CreditType::Personal);
        let mut indebted = existing(CreditType::Business);
        indebted.disburse(Money::from_major(100), Utc::now()).unwrap();
        let v = validator(vec![clean.clone(), indebted.clone()]);

        assert_eq!(v.validate_credit_deletion(clean.id).await.unwrap().id, clean.id);
        assert_eq!(
            v.validate_credit_deletion(indebted.id).await.unwrap_err(),
            CreditError::CreditHasDebt { debt: Money::from_major(100) }
        );

        let missing = Uuid::new_v4();
        assert_eq!(
            v.validate_credit_deletion(missing).await.unwrap_err(),
            CreditError::CreditNotFound { id: missing }
        );
    }
}
