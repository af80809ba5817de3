//! Loan CLI
//!
//! Command-line interface for the Loan Calculator API.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::Rng;

use loan_client::LoanClient;
use loan_types::PaymentResult;

#[derive(Parser)]
#[command(name = "loan")]
#[command(author, version, about = "Loan Calculator API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Loan Calculator API
    #[arg(long, env = "LOAN_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a monthly payment
    Payment {
        /// Loan amount
        #[arg(long)]
        amount: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        /// Term in years
        #[arg(long, default_value = "30")]
        years: i32,
    },
    /// Reset the request counter
    Reset,
    /// Check API health
    Health,
    /// Request random payments on an interval, printing instance and count
    Watch {
        /// Delay between requests in milliseconds
        #[arg(long, default_value = "1000")]
        interval_ms: u64,
        /// Term in years for every request
        #[arg(long, default_value = "30")]
        years: i32,
        /// Stop after this many requests
        #[arg(long)]
        count: Option<u64>,
    },
}

/// Random amount in [100_000, 800_000) truncated to cents, integer rate 0..=6.
fn random_loan(rng: &mut impl Rng) -> (f64, f64) {
    let rate = f64::from(rng.random_range(0..=6u8));
    let amount = 100_000.0 + rng.random::<f64>() * 700_000.0;
    ((amount * 100.0).floor() / 100.0, rate)
}

fn format_result(result: &PaymentResult) -> String {
    format!(
        "amount={:.2} rate={} years={} payment={} instance={} count={}",
        result.amount,
        result.rate,
        result.years,
        result.payment,
        result.instance.as_deref().unwrap_or("-"),
        result.count
    )
}

async fn watch(client: &LoanClient, interval: Duration, years: i32, limit: Option<u64>) {
    let mut rng = rand::rng();
    let mut sent = 0u64;
    loop {
        if limit.is_some_and(|limit| sent >= limit) {
            break;
        }

        let (amount, rate) = random_loan(&mut rng);
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        match client.payment(amount, rate, years).await {
            Ok(result) => println!("{} {}", timestamp, format_result(&result)),
            Err(e) => eprintln!(
                "{} ✗ amount={:.2} rate={} years={}: {}",
                timestamp, amount, rate, years, e
            ),
        }
        sent += 1;

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = LoanClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Payment {
            amount,
            rate,
            years,
        } => {
            let result = client.payment(amount, rate, years).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Reset => {
            client.reset_count().await?;
            println!("✓ Counter reset");
        }

        Commands::Watch {
            interval_ms,
            years,
            count,
        } => {
            println!("Polling {} every {}ms (Ctrl+C to stop)", client.base_url(), interval_ms);
            watch(&client, Duration::from_millis(interval_ms), years, count).await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_types::{Decimal, LoanRequest};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_random_loan_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let (amount, rate) = random_loan(&mut rng);
            assert!((100_000.0..800_000.0).contains(&amount));
            let cents = amount * 100.0;
            assert!((cents - cents.round()).abs() < 1e-6);
            assert!((0.0..=6.0).contains(&rate));
            assert_eq!(rate.fract(), 0.0);
        }
    }

    #[test]
    fn test_format_result_without_instance() {
        let result = PaymentResult::new(
            LoanRequest::new(180000.0, 0.0, 30),
            Decimal::new(50000, 2),
            None,
            4,
        );
        assert_eq!(
            format_result(&result),
            "amount=180000.00 rate=0 years=30 payment=500.00 instance=- count=4"
        );
    }
}
