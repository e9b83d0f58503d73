pub mod adapters;
pub mod config;
pub mod credit;
pub mod customer;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod payments;
pub mod repository;
pub mod requests;
pub mod response;
pub mod types;
pub mod validation;

// re-export key types
pub use adapters::{InMemoryCreditRepository, StaticCustomerDirectory};
pub use config::{EngineConfig, ErrorMapping, RequestLimits};
pub use credit::{generate_credit_number, Credit};
pub use customer::{CustomerLookup, TimeoutCustomerLookup};
pub use decimal::{Money, Rate};
pub use engine::{CreditEngine, CreditEngineBuilder};
pub use errors::{CreditError, LookupError, RepositoryError, Result};
pub use payments::{first_due_date, monthly_payment};
pub use repository::CreditRepository;
pub use requests::{CreditRequest, DisbursementRequest};
pub use response::{CreditListing, CreditResponse, Operation};
pub use types::{CreditId, CreditStatus, CreditType, CustomerSummary};
pub use validation::CreditValidator;

// re-export external dependencies that users will need
pub use async_trait::async_trait;
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
