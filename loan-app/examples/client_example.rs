//! Client example exercising the payment API against a running server.
//!
//! Run with: cargo run -p loan-app --example client_example

use loan_client::LoanClient;
use loan_hex::{LoanService, inbound::HttpServer};
use loan_repo::{CounterBackend, build_counter};
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind an ephemeral port and serve from it
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr} with the in-memory counter...");

    let counter = build_counter(&CounterBackend::Memory).await?;
    let service = LoanService::new(counter).with_instance(Some("example".into()));
    let router = HttpServer::new(service).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("server error: {e}");
        }
    });

    let client = LoanClient::new(format!("http://{addr}"));

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    client.reset_count().await?;
    println!("✅ Counter reset");

    for (amount, rate, years) in [(180000.0, 0.0, 30), (200000.0, 6.5, 30), (350000.0, 4.25, 15)] {
        let result = client.payment(amount, rate, years).await?;
        println!(
            "✅ {amount:.2} at {rate}% over {years}y -> {} / month (instance={}, count={})",
            result.payment,
            result.instance.as_deref().unwrap_or("-"),
            result.count
        );
    }

    // Invalid term is rejected before the counter moves
    match client.payment(1000.0, 5.0, 0).await {
        Ok(_) => println!("❌ zero-year loan was accepted"),
        Err(e) => println!("✅ Rejected zero-year loan: {e}"),
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
