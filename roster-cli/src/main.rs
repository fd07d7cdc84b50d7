mod application;
mod config;

mod presentation {
    pub mod cli;
}

use roster_core::error::Result;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "roster_cli=info,roster_core=info,roster_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    application::run().await
}
