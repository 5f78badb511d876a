//! Binary entry point: `.env` merge, logging, config, router, serve.

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ecos::{Config, Server, routes};

#[tokio::main]
async fn main() -> Result<(), ecos::Error> {
    // A missing `.env` file is not an error — the process environment
    // alone is a complete configuration source.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env());
    let app = routes::app(&config);

    Server::bind(&format!("0.0.0.0:{}", config.port))
        .serve(app)
        .await
}
