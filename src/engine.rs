use hourglass_rs::{SafeTimeProvider, TimeSource};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::EngineConfig;
use crate::credit::Credit;
use crate::customer::{CustomerLookup, TimeoutCustomerLookup};
use crate::errors::{CreditError, Result};
use crate::repository::CreditRepository;
use crate::requests::{CreditRequest, DisbursementRequest};
use crate::response::{CreditListing, CreditResponse, Operation};
use crate::types::CreditId;
use crate::validation::CreditValidator;

/// the credit business-rule engine
///
/// Each mutating operation checks the request, reads the record, applies one
/// transition and writes the record back once. Failures are mapped to a
/// `CreditResponse` carrying the status code for the operation.
///
/// There is no optimistic concurrency: two mutations racing on the same record
/// both read, both write, and the last write wins.
pub struct CreditEngine {
    credits: Arc<dyn CreditRepository>,
    validator: CreditValidator,
    time: Arc<SafeTimeProvider>,
    config: EngineConfig,
}

impl CreditEngine {
    pub fn builder() -> CreditEngineBuilder {
        CreditEngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// all credits; repository failures become a `Failed` listing
    pub async fn list_all(&self) -> CreditListing {
        info!("getting all credits");

        match self.credits.find_all().await {
            Ok(records) => {
                info!(count = records.len(), "retrieved credits");
                CreditListing::Found { records }
            }
            Err(e) => {
                error!(error = %e, "error getting all credits");
                CreditListing::Failed {
                    message: format!("Error getting all credits: {}", e),
                }
            }
        }
    }

    /// credits owned by `document`; an empty result is annotated, not failed
    pub async fn list_by_customer_document(&self, document: &str) -> CreditListing {
        info!(document, "getting credits for customer");

        match self.credits.find_by_customer_document(document).await {
            Ok(records) if records.is_empty() => {
                warn!(document, "no credits found for customer");
                CreditListing::NoneFound {
                    message: format!("No credits found for customer: {}", document),
                }
            }
            Ok(records) => {
                info!(document, count = records.len(), "found credits for customer");
                CreditListing::Found { records }
            }
            Err(e) => {
                error!(document, error = %e, "error getting credits for customer");
                CreditListing::Failed {
                    message: format!("Error getting credits: {}", e),
                }
            }
        }
    }

    pub async fn get_credit_by_id(&self, id: CreditId) -> Result<Credit> {
        self.validator.validate_credit_exists(id).await
    }

    pub async fn create_credit(&self, request: &CreditRequest) -> CreditResponse {
        info!(document = %request.customer_document, credit_type = ?request.credit_type, "creating credit");

        match self.try_create(request).await {
            Ok(credit) => {
                info!(id = %credit.id, credit_number = %credit.credit_number, "credit created");
                CreditResponse::success(201, "Credit created successfully", credit.id)
            }
            Err(e) => self.failure(Operation::Create, e),
        }
    }

    async fn try_create(&self, request: &CreditRequest) -> Result<Credit> {
        request.validate(&self.config.limits)?;
        let request = self.validator.validate_credit_creation(request).await?;
        let credit = Credit::open(request, self.time.now())?;
        Ok(self.credits.save(credit).await?)
    }

    /// overwrite interest rate and term; other request fields are ignored
    pub async fn update_credit(&self, id: CreditId, request: &CreditRequest) -> CreditResponse {
        info!(%id, "updating credit");

        match self.try_update(id, request).await {
            Ok(credit) => CreditResponse::success(200, "Credit updated successfully", credit.id),
            Err(e) => self.failure(Operation::Update, e),
        }
    }

    pub async fn cancel_credit(&self, id: CreditId) -> CreditResponse {
        info!(%id, "cancelling credit");

        match self.try_cancel(id).await {
            Ok(credit) => CreditResponse::success(200, "Credit cancelled successfully", credit.id),
            Err(e) => self.failure(Operation::Cancel, e),
        }
    }

    pub async fn mark_as_overdue(&self, id: CreditId) -> CreditResponse {
        info!(%id, "marking credit as overdue");

        match self.try_mark_overdue(id).await {
            Ok(credit) => CreditResponse::success(200, "Credit marked as overdue", credit.id),
            Err(e) => self.failure(Operation::MarkOverdue, e),
        }
    }

    /// soft delete: the record stays in storage as `INACTIVE`
    pub async fn delete_credit(&self, id: CreditId) -> CreditResponse {
        info!(%id, "deleting credit");

        match self.try_delete(id).await {
            Ok(credit) => {
                info!(id = %credit.id, "credit deleted");
                CreditResponse::success(200, "Credit deleted successfully", credit.id)
            }
            Err(e) => self.failure(Operation::Delete, e),
        }
    }

    pub async fn disburse_credit(&self, request: &DisbursementRequest) -> CreditResponse {
        info!(id = %request.credit_id, amount = %request.amount, "starting disbursement");

        match self.try_disburse(request).await {
            Ok(credit) => {
                info!(
                    id = %credit.id,
                    available = %credit.available_credit,
                    debt = %credit.current_debt,
                    "disbursement completed"
                );
                CreditResponse::success(200, "Disbursement completed successfully", credit.id)
            }
            Err(e) => self.failure(Operation::Disburse, e),
        }
    }

    async fn try_update(&self, id: CreditId, request: &CreditRequest) -> Result<Credit> {
        request.validate_terms(&self.config.limits)?;
        let mut credit = self.validator.validate_credit_exists(id).await?;
        credit.update_terms(request.interest_rate, request.term_months, self.time.now())?;
        Ok(self.credits.save(credit).await?)
    }

    async fn try_cancel(&self, id: CreditId) -> Result<Credit> {
        let mut credit = self.validator.validate_credit_exists(id).await?;
        credit.cancel(self.time.now())?;
        Ok(self.credits.save(credit).await?)
    }

    async fn try_mark_overdue(&self, id: CreditId) -> Result<Credit> {
        let mut credit = self.validator.validate_credit_exists(id).await?;
        credit.mark_overdue(self.time.now());
        Ok(self.credits.save(credit).await?)
    }

    async fn try_delete(&self, id: CreditId) -> Result<Credit> {
        let mut credit = self.validator.validate_credit_deletion(id).await?;
        credit.deactivate(self.time.now())?;
        Ok(self.credits.save(credit).await?)
    }

    async fn try_disburse(&self, request: &DisbursementRequest) -> Result<Credit> {
        request.validate(&self.config.limits)?;
        let mut credit = self.validator.validate_credit_exists(request.credit_id).await?;
        credit.disburse(request.amount, self.time.now())?;
        Ok(self.credits.save(credit).await?)
    }

    fn failure(&self, operation: Operation, err: CreditError) -> CreditResponse {
        let response = operation.failure(&err, self.config.error_mapping);
        error!(?operation, code = response.code, error = %err, "credit operation failed");
        response
    }
}

/// wires collaborators into a `CreditEngine`
pub struct CreditEngineBuilder {
    repository: Option<Arc<dyn CreditRepository>>,
    customers: Option<Arc<dyn CustomerLookup>>,
    time: Option<Arc<SafeTimeProvider>>,
    config: EngineConfig,
}

impl CreditEngineBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            customers: None,
            time: None,
            config: EngineConfig::default(),
        }
    }

    pub fn repository(mut self, repository: Arc<dyn CreditRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// customer lookup; wrapped in the configured deadline on `build`
    pub fn customer_lookup(mut self, customers: Arc<dyn CustomerLookup>) -> Self {
        self.customers = Some(customers);
        self
    }

    /// clock for timestamps and due dates; system time when unset
    pub fn set_time(mut self, time: Arc<SafeTimeProvider>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<CreditEngine> {
        let credits = self.repository.ok_or(CreditError::InvalidConfiguration {
            message: "credit repository not set".to_string(),
        })?;
        let customers = self.customers.ok_or(CreditError::InvalidConfiguration {
            message: "customer lookup not set".to_string(),
        })?;
        if self.config.customer_lookup_timeout_ms == 0 {
            return Err(CreditError::InvalidConfiguration {
                message: "customer lookup timeout must be positive".to_string(),
            });
        }

        let customers: Arc<dyn CustomerLookup> = Arc::new(TimeoutCustomerLookup::new(
            customers,
            self.config.customer_lookup_timeout(),
        ));
        let time = self
            .time
            .unwrap_or_else(|| Arc::new(SafeTimeProvider::new(TimeSource::System)));

        Ok(CreditEngine {
            validator: CreditValidator::new(customers, credits.clone()),
            credits,
            time,
            config: self.config,
        })
    }
}

impl Default for CreditEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
