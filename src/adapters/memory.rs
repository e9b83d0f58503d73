use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::credit::Credit;
use crate::customer::CustomerLookup;
use crate::errors::{LookupError, RepositoryError};
use crate::repository::CreditRepository;
use crate::types::{CreditId, CustomerSummary};

/// process-local credit store
#[derive(Debug, Default)]
pub struct InMemoryCreditRepository {
    credits: RwLock<HashMap<CreditId, Credit>>,
}

impl InMemoryCreditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// seed with existing records
    pub fn with_credits(credits: impl IntoIterator<Item = Credit>) -> Self {
        Self {
            credits: RwLock::new(credits.into_iter().map(|c| (c.id, c)).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.credits.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credits.read().await.is_empty()
    }
}

fn ordered(mut credits: Vec<Credit>) -> Vec<Credit> {
    credits.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    credits
}

#[async_trait]
impl CreditRepository for InMemoryCreditRepository {
    async fn find_all(&self) -> Result<Vec<Credit>, RepositoryError> {
        let credits = self.credits.read().await;
        Ok(ordered(credits.values().cloned().collect()))
    }

    async fn save(&self, credit: Credit) -> Result<Credit, RepositoryError> {
        self.credits.write().await.insert(credit.id, credit.clone());
        Ok(credit)
    }

    async fn delete_by_id(&self, id: CreditId) -> Result<(), RepositoryError> {
        self.credits.write().await.remove(&id);
        Ok(())
    }

    async fn find_by_customer_document(&self, document: &str) -> Result<Vec<Credit>, RepositoryError> {
        let credits = self.credits.read().await;
        Ok(ordered(
            credits
                .values()
                .filter(|c| c.customer_document == document)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_id(&self, id: CreditId) -> Result<Option<Credit>, RepositoryError> {
        Ok(self.credits.read().await.get(&id).cloned())
    }
}

/// fixed customer directory keyed by document number
#[derive(Debug, Default, Clone)]
pub struct StaticCustomerDirectory {
    customers: HashMap<String, CustomerSummary>,
}

impl StaticCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, document: impl Into<String>, customer: CustomerSummary) -> Self {
        let document = document.into();
        let customer = customer.with_document(document.clone());
        self.customers.insert(document, customer);
        self
    }
}

#[async_trait]
impl CustomerLookup for StaticCustomerDirectory {
    async fn get_customer_by_document(
        &self,
        document: &str,
    ) -> Result<Option<CustomerSummary>, LookupError> {
        Ok(self.customers.get(document).cloned())
    }
}
