pub mod amortization;

pub use amortization::{first_due_date, monthly_payment};
