use chrono::Days;
use dbapi::{Client, set_token};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let token =
        env::var("DBAPI_TOKEN").map_err(|_| "Set DBAPI_TOKEN in your environment or .env file")?;

    let client = Client::new([set_token(token)])?;

    // Transactions booked within the last 30 days, across all accounts.
    let end = chrono::Utc::now().date_naive();
    let start = end
        .checked_sub_days(Days::new(29))
        .ok_or("date window out of range")?;

    let outcome = client.transactions().get_all().await;
    if let Some(response) = outcome.response() {
        log::debug!("{} answered {}", response.url(), response.status());
    }
    let transactions = outcome.into_result()?;

    let recent: Vec<_> = transactions
        .iter()
        .filter(|txn| txn.booked_on().is_some_and(|d| d >= start && d <= end))
        .collect();

    println!(
        "{} of {} transactions booked from {} to {}:",
        recent.len(),
        transactions.len(),
        start,
        end
    );
    for txn in recent {
        let direction = if txn.is_inflow() { "in " } else { "out" };
        println!(
            "{} | {} {} | {}",
            txn.booking_date.as_deref().unwrap_or("-"),
            direction,
            txn.amount.unwrap_or_default(),
            txn.counter_party_name.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
