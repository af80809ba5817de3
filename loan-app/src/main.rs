//! # Loan Calculator Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the counter store adapter
//! - Create the loan service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loan_hex::{LoanService, inbound::HttpServer};
use loan_repo::build_counter;

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("loan-calculator"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // OpenTelemetry only when a collector is configured
    let (telemetry, otel_provider) = match &config.otlp_endpoint {
        Some(endpoint) => {
            let (tracer, provider) = init_tracer(endpoint)?;
            (
                Some(tracing_opentelemetry::layer().with_tracer(tracer)),
                Some(provider),
            )
        }
        None => (None, None),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,loan_app=debug,loan_hex=debug,loan_repo=debug".into()
            }),
        )
        .with((!config.log_json).then(tracing_subscriber::fmt::layer))
        .with(config.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with(telemetry)
        .init();

    tracing::info!("Starting loan calculator on port {}", config.port);
    tracing::info!("Using counter store: {}", config.counter.name());
    if let Some(instance) = &config.instance_id {
        tracing::info!("Serving as instance {}", instance);
    }

    // Build counter (connects to Redis when configured)
    let counter = build_counter(&config.counter).await?;

    // Create the loan service
    let service = LoanService::new(counter).with_instance(config.instance_id.clone());

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
