pub mod memory;

pub use memory::{InMemoryCreditRepository, StaticCustomerDirectory};
