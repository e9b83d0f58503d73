/// credit lifecycle - open, draw, try to close, fall overdue, list
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use credit_lines_rs::{
    CreditEngine, CreditRequest, CreditType, CustomerSummary, DisbursementRequest,
    InMemoryCreditRepository, Money, Rate, SafeTimeProvider, StaticCustomerDirectory, TimeSource,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== credit lifecycle example ===\n");

    let time = Arc::new(SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
    )));
    let controller = time.test_control().unwrap();

    let customers = StaticCustomerDirectory::new().with_customer(
        "12345678",
        CustomerSummary::new("cust-001", "PERSONAL").with_document("12345678"),
    );

    let engine = CreditEngine::builder()
        .repository(Arc::new(InMemoryCreditRepository::new()))
        .customer_lookup(Arc::new(customers))
        .set_time(time.clone())
        .build()?;

    // open a personal credit line
    let request = CreditRequest {
        customer_document: "12345678".to_string(),
        credit_type: CreditType::Personal,
        credit_limit: Money::from_major(12_000),
        interest_rate: Rate::from_percentage(12),
        term_months: 12,
    };
    let created = engine.create_credit(&request).await;
    println!("create: {} {}", created.code, created.message);
    let id = created.entity_id.ok_or("credit was not created")?;

    // a second personal credit is refused
    let duplicate = engine.create_credit(&request).await;
    println!("duplicate: {} {}", duplicate.code, duplicate.message);

    // draw against the line
    controller.advance(Duration::days(5));
    let drawn = engine
        .disburse_credit(&DisbursementRequest { credit_id: id, amount: Money::from_major(3_000) })
        .await;
    println!("disburse: {} {}", drawn.code, drawn.message);

    // cannot cancel while owing
    let cancel = engine.cancel_credit(id).await;
    println!("cancel: {} {}", cancel.code, cancel.message);

    // the first due date passes unpaid
    controller.advance(Duration::days(30));
    let overdue = engine.mark_as_overdue(id).await;
    println!("overdue: {} {}", overdue.code, overdue.message);

    let credit = engine.get_credit_by_id(id).await?;
    println!("\ncurrent state on {}:", time.now().format("%Y-%m-%d"));
    println!("{}", credit.to_json_pretty()?);

    let listing = engine.list_by_customer_document("12345678").await;
    println!("\ncustomer holds {} credit(s)", listing.records().len());

    let empty = engine.list_by_customer_document("00000000").await;
    println!("{}", empty.to_json_pretty()?);

    Ok(())
}
