use async_trait::async_trait;

use crate::credit::Credit;
use crate::errors::RepositoryError;
use crate::types::CreditId;

/// durable storage for credit records
///
/// Implementations translate records to and from their storage format and
/// never apply business rules. `save` is an upsert keyed by `Credit::id`.
#[async_trait]
pub trait CreditRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Credit>, RepositoryError>;

    async fn save(&self, credit: Credit) -> Result<Credit, RepositoryError>;

    async fn delete_by_id(&self, id: CreditId) -> Result<(), RepositoryError>;

    async fn find_by_customer_document(&self, document: &str) -> Result<Vec<Credit>, RepositoryError>;

    async fn find_by_id(&self, id: CreditId) -> Result<Option<Credit>, RepositoryError>;
}
