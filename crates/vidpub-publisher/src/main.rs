//! Publish worker binary.
//!
//! Processes exactly one job per invocation, identified by the environment,
//! and exits non-zero on any fatal step after the best-effort `failed`
//! status write.

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use vidpub_publisher::{publish, PublisherConfig};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vidpub=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let run_id = Uuid::new_v4();
    info!(%run_id, "Starting vidpub-publisher");

    let config = match PublisherConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(kind = e.kind(), "Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    match publish(&config).await {
        Ok(outcome) => {
            info!(
                %run_id,
                "Publish complete, platform video id {}",
                outcome.platform_video_id
            );
        }
        Err(e) => {
            error!(%run_id, kind = e.kind(), "Publish failed: {}", e);
            std::process::exit(1);
        }
    }
}
