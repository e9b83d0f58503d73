use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::errors::LookupError;
use crate::types::CustomerSummary;

/// resolves a customer document to identity data
///
/// `Ok(None)` means the customer does not exist. Transport failures,
/// 4xx/5xx statuses and timeouts are reported as `LookupError`.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn get_customer_by_document(
        &self,
        document: &str,
    ) -> Result<Option<CustomerSummary>, LookupError>;
}

/// applies a fixed deadline to another lookup
pub struct TimeoutCustomerLookup {
    inner: Arc<dyn CustomerLookup>,
    timeout: Duration,
}

impl TimeoutCustomerLookup {
    pub fn new(inner: Arc<dyn CustomerLookup>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl CustomerLookup for TimeoutCustomerLookup {
    async fn get_customer_by_document(
        &self,
        document: &str,
    ) -> Result<Option<CustomerSummary>, LookupError> {
        match tokio::time::timeout(self.timeout, self.inner.get_customer_by_document(document)).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(document, timeout_ms, "customer lookup timed out");
                Err(LookupError::Timeout { timeout_ms })
            }
        }
    }
}
